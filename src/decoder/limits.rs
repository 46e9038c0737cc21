//! Implementation limits for binary decoding.
//!
//! These bound what a module may claim before the decoder has seen the
//! corresponding bytes, so a malformed header cannot make us reserve
//! unbounded scratch space.

/// Maximum linear memory size in 64 KiB pages (4 GiB of addressable memory).
/// Applies to both imported and defined memories, to the initial page count
/// and to the declared maximum.
pub const MAX_MEMORY_PAGES: u32 = 65_536;

/// Maximum number of targets in a single br_table instruction.
pub const MAX_BR_TABLE_TARGETS: u32 = 65_536;
