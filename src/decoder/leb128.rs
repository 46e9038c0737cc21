//! LEB128 integer decoding.
//!
//! Unsigned and signed variants at 32 and 64 bits, each consuming the
//! minimal number of bytes and halting at the first byte without the
//! continuation bit. An encoding may use more bytes than necessary, but the
//! terminal byte of a maximal-length encoding must not carry payload bits
//! beyond the integer width; for the signed variants those spare bits must
//! be a proper sign-extension of the top payload bit.

use super::cursor::Cursor;
use super::error::{DecodeError, ErrorKind};

impl<'a> Cursor<'a> {
    pub fn read_u32_leb128(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.read_unsigned_leb(32, "u32 leb128", context)
            .map(|v| v as u32)
    }

    pub fn read_u64_leb128(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        self.read_unsigned_leb(64, "u64 leb128", context)
    }

    pub fn read_i32_leb128(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        self.read_signed_leb(32, "i32 leb128", context)
            .map(|v| v as i32)
    }

    pub fn read_i64_leb128(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        self.read_signed_leb(64, "i64 leb128", context)
    }

    fn read_unsigned_leb(
        &mut self,
        width: u32,
        what: &'static str,
        context: &'static str,
    ) -> Result<u64, DecodeError> {
        let max_bytes = ((width + 6) / 7) as usize;
        let mut pos = self.offset;
        let mut result: u64 = 0;

        for i in 0..max_bytes {
            if pos >= self.read_end {
                return Err(self.eof_error(what, context));
            }
            let byte = self.data[pos];
            pos += 1;
            result |= u64::from(byte & 0x7f) << (7 * i);

            if byte & 0x80 == 0 {
                if i == max_bytes - 1 {
                    // Payload bits past the integer width must be clear.
                    let used = width - 7 * (max_bytes as u32 - 1);
                    let spare_mask = 0x7f & !((1u8 << used) - 1);
                    if byte & spare_mask != 0 {
                        return Err(self.leb_error(what, context));
                    }
                }
                self.offset = pos;
                return Ok(result);
            }
        }

        // Continuation bit still set on the last permitted byte.
        Err(self.leb_error(what, context))
    }

    fn read_signed_leb(
        &mut self,
        width: u32,
        what: &'static str,
        context: &'static str,
    ) -> Result<i64, DecodeError> {
        let max_bytes = ((width + 6) / 7) as usize;
        let mut pos = self.offset;
        let mut result: i64 = 0;

        for i in 0..max_bytes {
            if pos >= self.read_end {
                return Err(self.eof_error(what, context));
            }
            let byte = self.data[pos];
            pos += 1;
            result |= i64::from(byte & 0x7f) << (7 * i);

            if byte & 0x80 == 0 {
                if i == max_bytes - 1 {
                    // The spare bits of a maximal-length terminal byte must
                    // sign-extend the integer's top bit.
                    let used = width - 7 * (max_bytes as u32 - 1);
                    let sign_bit = 1u8 << (used - 1);
                    let spare_mask = 0x7f & !((sign_bit << 1).wrapping_sub(1));
                    let spare = byte & spare_mask;
                    let expected = if byte & sign_bit != 0 { spare_mask } else { 0 };
                    if spare != expected {
                        return Err(self.leb_error(what, context));
                    }
                } else {
                    let shift = 7 * (i as u32 + 1);
                    if byte & 0x40 != 0 {
                        result |= -1i64 << shift;
                    }
                }
                self.offset = pos;
                return Ok(result);
            }
        }

        Err(self.leb_error(what, context))
    }

    fn leb_error(&self, what: &str, context: &str) -> DecodeError {
        DecodeError::new(
            ErrorKind::BadLeb,
            self.offset,
            format!("invalid {what}: {context}"),
        )
    }
}
