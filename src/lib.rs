//! A streaming, event-driven decoder for the WebAssembly binary format.
//!
//! wasmscan reads a fully-resident `.wasm` buffer and pushes a strictly
//! ordered event stream into a caller-supplied delegate: type signatures,
//! imports, function declarations, tables, memories, globals, exports, the
//! start function, element and data segments, per-instruction function body
//! events, and the `name`, `reloc.*`, `linking`, and `exception` custom
//! sections. It never builds a module structure of its own; consumers that
//! want one assemble it from the events.
//!
//! # Modules
//!
//! - [`decoder`] -- The decoder: entry point, cursor, LEB128, opcode table,
//!   delegate trait, and the logging tee.
//!
//! # Example
//!
//! Count the functions declared by a module:
//!
//! ```
//! use wasmscan::decoder::delegate::{CallbackResult, Delegate};
//! use wasmscan::decoder::{decode_module, DecodeOptions};
//!
//! #[derive(Default)]
//! struct FuncCounter {
//!     count: u32,
//! }
//!
//! impl Delegate for FuncCounter {
//!     fn on_function_count(&mut self, count: u32) -> CallbackResult {
//!         self.count = count;
//!         Ok(())
//!     }
//! }
//!
//! // The smallest valid module: magic and version only.
//! let module = [0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];
//!
//! let mut counter = FuncCounter::default();
//! decode_module(&module, &mut counter, DecodeOptions::default()).unwrap();
//! assert_eq!(counter.count, 0);
//! ```
//!
//! String and byte-slice event arguments borrow from the input buffer and
//! are valid only until the callback returns; delegates that retain them
//! must copy.

pub mod decoder;
