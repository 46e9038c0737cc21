//! Decode error type.
//!
//! Every failure is terminal: the decoder forms a single [`DecodeError`]
//! carrying the byte offset it stopped at, routes the rendered diagnostic
//! through the delegate's `on_error` callback, and returns.

use std::fmt;
use thiserror::Error;

/// Classification of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read ran past the current framing bound or the end of the module.
    UnexpectedEof,
    /// The 4-byte magic did not match `\0asm`.
    BadMagic,
    /// The 4-byte version did not match the supported version.
    BadVersion,
    /// LEB128 overflow or invalid sign-extension.
    BadLeb,
    /// String contents are not well-formed UTF-8.
    BadUtf8,
    /// A type byte was invalid in its position (non-concrete where concrete
    /// is required, non-anyfunc table element, bad type form, ...).
    BadType,
    /// Limits are inconsistent or exceed the page maximum.
    BadLimits,
    /// An index referred past the counted entities of its kind.
    BadIndex,
    /// Unknown opcode, feature-disabled opcode, or non-zero reserved byte.
    BadOpcode,
    /// Non-custom section out of order, or unknown section code.
    SectionOrder,
    /// Duplicate or out-of-order subsection, or out-of-order index within one.
    SubsectionOrder,
    /// A section decoder did not consume exactly its declared size.
    UnfinishedSection,
    /// A subsection decoder did not consume exactly its declared size.
    UnfinishedSubsection,
    /// A delegate callback returned an error.
    CallbackFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnexpectedEof => "unexpected eof",
            ErrorKind::BadMagic => "bad magic",
            ErrorKind::BadVersion => "bad version",
            ErrorKind::BadLeb => "bad leb128",
            ErrorKind::BadUtf8 => "bad utf-8",
            ErrorKind::BadType => "bad type",
            ErrorKind::BadLimits => "bad limits",
            ErrorKind::BadIndex => "bad index",
            ErrorKind::BadOpcode => "bad opcode",
            ErrorKind::SectionOrder => "section out of order",
            ErrorKind::SubsectionOrder => "subsection out of order",
            ErrorKind::UnfinishedSection => "unfinished section",
            ErrorKind::UnfinishedSubsection => "unfinished subsection",
            ErrorKind::CallbackFailure => "callback failed",
        };
        f.write_str(name)
    }
}

/// A terminal decode failure: what went wrong, where, and a human-readable
/// diagnostic in the same register as the messages the module format's
/// reference tooling prints.
#[derive(Debug, Error)]
#[error("{message} (at offset {offset:#x})")]
pub struct DecodeError {
    pub kind: ErrorKind,
    /// Byte offset of the cursor when the failure was detected.
    pub offset: usize,
    pub message: String,
}

impl DecodeError {
    pub fn new(kind: ErrorKind, offset: usize, message: impl Into<String>) -> DecodeError {
        DecodeError {
            kind,
            offset,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_offset() {
        let err = DecodeError::new(ErrorKind::BadMagic, 0, "bad magic value 0x6d736e00");
        assert_eq!(err.to_string(), "bad magic value 0x6d736e00 (at offset 0x0)");
    }

    #[test]
    fn test_kind_is_inspectable() {
        let err = DecodeError::new(ErrorKind::UnexpectedEof, 12, "unable to read u8: opcode");
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert_eq!(err.offset, 12);
    }
}
