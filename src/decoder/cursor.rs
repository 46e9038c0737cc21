//! Bounded byte cursor over the module buffer.
//!
//! The cursor is a position-tracked view of the input with an upper framing
//! bound (`read_end`) that is tightened while decoding a (sub)section and
//! restored on exit. Every read checks against the current bound, never the
//! raw buffer length, so a section can not read into its neighbour. The
//! invariant `offset <= read_end <= data.len()` holds throughout.
//!
//! Slices and strings returned here borrow from the input buffer.

use byteorder::{ByteOrder, LittleEndian};

use super::error::{DecodeError, ErrorKind};
use super::types::ValueType;

pub struct Cursor<'a> {
    pub(crate) data: &'a [u8],
    pub(crate) offset: usize,
    pub(crate) read_end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor {
            data,
            offset: 0,
            read_end: data.len(),
        }
    }

    pub fn pos(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Current framing bound.
    pub fn bound(&self) -> usize {
        self.read_end
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.read_end
    }

    pub(crate) fn set_bound(&mut self, end: usize) {
        self.read_end = end;
    }

    pub(crate) fn skip_to(&mut self, pos: usize) {
        self.offset = pos;
    }

    /// Runs `f` with the framing bound tightened to `end`, restoring the
    /// prior bound on every exit path.
    pub fn with_bound<T>(
        &mut self,
        end: usize,
        f: impl FnOnce(&mut Cursor<'a>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let previous = self.read_end;
        self.read_end = end;
        let result = f(self);
        self.read_end = previous;
        result
    }

    pub(crate) fn eof_error(&self, what: &str, context: &str) -> DecodeError {
        DecodeError::new(
            ErrorKind::UnexpectedEof,
            self.offset,
            format!("unable to read {what}: {context}"),
        )
    }

    // Fixed-width reads, all little-endian --------------------------------

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.offset + 1 > self.read_end {
            return Err(self.eof_error("u8", context));
        }
        let byte = self.data[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        if self.offset + 4 > self.read_end {
            return Err(self.eof_error("u32", context));
        }
        let value = LittleEndian::read_u32(&self.data[self.offset..]);
        self.offset += 4;
        Ok(value)
    }

    /// Reads an f32 as its raw bit pattern.
    pub fn read_f32_bits(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        if self.offset + 4 > self.read_end {
            return Err(self.eof_error("f32", context));
        }
        let bits = LittleEndian::read_u32(&self.data[self.offset..]);
        self.offset += 4;
        Ok(bits)
    }

    /// Reads an f64 as its raw bit pattern.
    pub fn read_f64_bits(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        if self.offset + 8 > self.read_end {
            return Err(self.eof_error("f64", context));
        }
        let bits = LittleEndian::read_u64(&self.data[self.offset..]);
        self.offset += 8;
        Ok(bits)
    }

    // Variable-size reads -------------------------------------------------

    pub fn read_bytes(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.offset + len > self.read_end {
            return Err(self.eof_error("data", context));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a u32-LEB byte count followed by that many raw bytes.
    pub fn read_len_bytes(&mut self, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u32_leb128("data size")?;
        self.read_bytes(len as usize, context)
    }

    /// Reads a u32-LEB length followed by that many bytes of UTF-8.
    pub fn read_str(&mut self, context: &'static str) -> Result<&'a str, DecodeError> {
        let len = self.read_u32_leb128("string length")? as usize;
        if self.offset + len > self.read_end {
            return Err(self.eof_error("string", context));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                self.offset += len;
                Ok(s)
            }
            Err(_) => Err(DecodeError::new(
                ErrorKind::BadUtf8,
                self.offset,
                format!("invalid utf-8 encoding: {context}"),
            )),
        }
    }

    /// Reads a value type: a signed-LEB code point in [-128, 127].
    pub fn read_type(&mut self, context: &'static str) -> Result<ValueType, DecodeError> {
        let start = self.offset;
        let code = self.read_i32_leb128(context)?;
        if !(-128..=127).contains(&code) {
            return Err(DecodeError::new(
                ErrorKind::BadType,
                start,
                format!("invalid type: {code}"),
            ));
        }
        ValueType::from_code(code).ok_or_else(|| {
            DecodeError::new(ErrorKind::BadType, start, format!("invalid type: {code}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8() {
        let data = [0xab, 0xcd];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u8("test").unwrap(), 0xab);
        assert_eq!(cur.read_u8("test").unwrap(), 0xcd);
        assert_eq!(
            cur.read_u8("test").unwrap_err().kind,
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_read_u32_le() {
        let data = [0x00, 0x61, 0x73, 0x6d];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u32_le("magic").unwrap(), 0x6d73_6100);
        assert_eq!(cur.pos(), 4);
    }

    #[test]
    fn test_read_f32_bits() {
        // 6.2831855f32
        let data = [219, 15, 201, 64];
        let mut cur = Cursor::new(&data);
        let bits = cur.read_f32_bits("value").unwrap();
        assert_eq!(f32::from_bits(bits), 6.2831855);
    }

    #[test]
    fn test_read_f64_bits() {
        let data = [24, 45, 68, 84, 251, 33, 25, 64];
        let mut cur = Cursor::new(&data);
        let bits = cur.read_f64_bits("value").unwrap();
        assert_eq!(f64::from_bits(bits), std::f64::consts::TAU);
    }

    #[test]
    fn test_read_within_bound_only() {
        let data = [1, 2, 3, 4];
        let mut cur = Cursor::new(&data);
        cur.set_bound(2);
        assert!(cur.read_bytes(2, "test").is_ok());
        assert_eq!(
            cur.read_u8("test").unwrap_err().kind,
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_with_bound_restores_on_error() {
        let data = [1, 2, 3, 4];
        let mut cur = Cursor::new(&data);
        let result = cur.with_bound(2, |cur| cur.read_bytes(3, "test"));
        assert!(result.is_err());
        assert_eq!(cur.bound(), 4);
    }

    #[test]
    fn test_read_str() {
        let data = [3, b'e', b'n', b'v'];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_str("name").unwrap(), "env");
        assert!(cur.at_end());
    }

    #[test]
    fn test_read_str_bad_utf8() {
        let data = [2, 0xc0, 0x80];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_str("name").unwrap_err().kind, ErrorKind::BadUtf8);
    }

    #[test]
    fn test_read_str_truncated() {
        let data = [5, b'a'];
        let mut cur = Cursor::new(&data);
        assert_eq!(
            cur.read_str("name").unwrap_err().kind,
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_read_type() {
        let data = [0x7f, 0x70, 0x40, 0x6f];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_type("t").unwrap(), ValueType::I32);
        assert_eq!(cur.read_type("t").unwrap(), ValueType::Anyfunc);
        assert_eq!(cur.read_type("t").unwrap(), ValueType::Void);
        assert_eq!(cur.read_type("t").unwrap_err().kind, ErrorKind::BadType);
    }
}
