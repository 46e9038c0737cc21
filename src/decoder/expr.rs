//! Instruction stream decoding.
//!
//! Two entry points on [`ModuleDecoder`]: `read_init_expr` accepts only the
//! tiny constant-expression subset used by global initializers and segment
//! offsets, and `read_function_body` decodes the full gated instruction set
//! up to a declared end offset. Each instruction produces a semantic event
//! plus a raw syntactic event for pass-through consumers.

use super::error::{DecodeError, ErrorKind};
use super::limits::MAX_BR_TABLE_TARGETS;
use super::opcode::Opcode;
use super::ModuleDecoder;

impl<'a, 'd> ModuleDecoder<'a, 'd> {
    /// Reads an opcode, resolving the prefix byte to its u32-LEB sub-opcode
    /// when present.
    fn read_opcode(&mut self) -> Result<Opcode, DecodeError> {
        let start = self.cur.pos();
        let byte = self.cur.read_u8("opcode")?;
        if Opcode::is_prefix_byte(byte) {
            let code = self.cur.read_u32_leb128("opcode")?;
            Opcode::from_prefixed(byte, code).ok_or_else(|| {
                DecodeError::new(
                    ErrorKind::BadOpcode,
                    start,
                    format!("unexpected opcode: {byte} {code} ({byte:#x} {code:#x})"),
                )
            })
        } else {
            Opcode::from_byte(byte).ok_or_else(|| {
                DecodeError::new(
                    ErrorKind::BadOpcode,
                    start,
                    format!("unexpected opcode: {byte} ({byte:#x})"),
                )
            })
        }
    }

    fn unexpected_opcode(&self, opcode: Opcode, context: &str) -> DecodeError {
        self.fail(
            ErrorKind::BadOpcode,
            format!("unexpected opcode {context}: {opcode}"),
        )
    }

    fn check_opcode_enabled(&self, opcode: Opcode) -> Result<(), DecodeError> {
        if opcode.is_enabled(&self.features) {
            Ok(())
        } else {
            Err(self.fail(
                ErrorKind::BadOpcode,
                format!("unexpected opcode: {opcode} (feature disabled)"),
            ))
        }
    }

    /// Reads a constant expression: one producing instruction followed by
    /// `end`, or a bare `end`.
    pub(crate) fn read_init_expr(&mut self, index: u32) -> Result<(), DecodeError> {
        let opcode = self.read_opcode()?;
        match opcode {
            Opcode::I32Const => {
                let value = self.cur.read_i32_leb128("init_expr i32.const value")?;
                callback!(self.on_init_expr_i32_const(index, value));
            }
            Opcode::I64Const => {
                let value = self.cur.read_i64_leb128("init_expr i64.const value")?;
                callback!(self.on_init_expr_i64_const(index, value));
            }
            Opcode::F32Const => {
                let value_bits = self.cur.read_f32_bits("init_expr f32.const value")?;
                callback!(self.on_init_expr_f32_const(index, value_bits));
            }
            Opcode::F64Const => {
                let value_bits = self.cur.read_f64_bits("init_expr f64.const value")?;
                callback!(self.on_init_expr_f64_const(index, value_bits));
            }
            Opcode::GetGlobal => {
                let global_index = self.cur.read_u32_leb128("init_expr get_global index")?;
                callback!(self.on_init_expr_get_global(index, global_index));
            }
            Opcode::End => return Ok(()),
            _ => return Err(self.unexpected_opcode(opcode, "in initializer expression")),
        }

        let terminator = self.read_opcode()?;
        if terminator != Opcode::End {
            return Err(self.fail(
                ErrorKind::BadOpcode,
                "expected END opcode after initializer expression",
            ));
        }
        Ok(())
    }

    /// Decodes the instruction stream of one function body. The stream must
    /// fill `[pos, end_offset)` exactly and close with an `end` opcode.
    pub(crate) fn read_function_body(&mut self, end_offset: usize) -> Result<(), DecodeError> {
        let mut seen_end_opcode = false;
        while self.cur.pos() < end_offset {
            let opcode = self.read_opcode()?;
            callback!(self.on_opcode(opcode));

            use Opcode::*;
            match opcode {
                Unreachable => {
                    callback!(self.on_unreachable_expr());
                    callback!(self.on_opcode_bare());
                }
                Nop => {
                    callback!(self.on_nop_expr());
                    callback!(self.on_opcode_bare());
                }
                Block => {
                    let sig = self.read_inline_signature("block signature type")?;
                    callback!(self.on_block_expr(sig));
                    callback!(self.on_opcode_block_sig(sig));
                }
                Loop => {
                    let sig = self.read_inline_signature("loop signature type")?;
                    callback!(self.on_loop_expr(sig));
                    callback!(self.on_opcode_block_sig(sig));
                }
                If => {
                    let sig = self.read_inline_signature("if signature type")?;
                    callback!(self.on_if_expr(sig));
                    callback!(self.on_opcode_block_sig(sig));
                }
                Else => {
                    callback!(self.on_else_expr());
                    callback!(self.on_opcode_bare());
                }
                End => {
                    if self.cur.pos() == end_offset {
                        seen_end_opcode = true;
                        callback!(self.on_end_func());
                    } else {
                        callback!(self.on_end_expr());
                    }
                }
                Br => {
                    let depth = self.cur.read_u32_leb128("br depth")?;
                    callback!(self.on_br_expr(depth));
                    callback!(self.on_opcode_index(depth));
                }
                BrIf => {
                    let depth = self.cur.read_u32_leb128("br_if depth")?;
                    callback!(self.on_br_if_expr(depth));
                    callback!(self.on_opcode_index(depth));
                }
                BrTable => {
                    let num_targets = self.cur.read_u32_leb128("br_table target count")?;
                    if num_targets > MAX_BR_TABLE_TARGETS {
                        return Err(self.fail(
                            ErrorKind::BadLimits,
                            "br_table target count exceeds implementation limit",
                        ));
                    }

                    self.target_depths.clear();
                    for _ in 0..num_targets {
                        let depth = self.cur.read_u32_leb128("br_table target depth")?;
                        self.target_depths.push(depth);
                    }
                    let default_depth = self
                        .cur
                        .read_u32_leb128("br_table default target depth")?;

                    callback!(self.on_br_table_expr(&self.target_depths, default_depth));
                }
                Return => {
                    callback!(self.on_return_expr());
                    callback!(self.on_opcode_bare());
                }
                Call => {
                    let func_index = self.cur.read_u32_leb128("call function index")?;
                    if func_index >= self.num_total_funcs() {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            format!("invalid call function index: {func_index}"),
                        ));
                    }
                    callback!(self.on_call_expr(func_index));
                    callback!(self.on_opcode_index(func_index));
                }
                CallIndirect => {
                    let sig_index = self.cur.read_u32_leb128("call_indirect signature index")?;
                    if sig_index >= self.num_signatures {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            "invalid call_indirect signature index",
                        ));
                    }
                    let reserved = self.cur.read_u32_leb128("call_indirect reserved")?;
                    if reserved != 0 {
                        return Err(self.fail(
                            ErrorKind::BadOpcode,
                            "call_indirect reserved value must be 0",
                        ));
                    }
                    callback!(self.on_call_indirect_expr(sig_index));
                    callback!(self.on_opcode_uint32_uint32(sig_index, reserved));
                }
                Drop => {
                    callback!(self.on_drop_expr());
                    callback!(self.on_opcode_bare());
                }
                Select => {
                    callback!(self.on_select_expr());
                    callback!(self.on_opcode_bare());
                }
                GetLocal => {
                    let local_index = self.cur.read_u32_leb128("get_local local index")?;
                    callback!(self.on_get_local_expr(local_index));
                    callback!(self.on_opcode_index(local_index));
                }
                SetLocal => {
                    let local_index = self.cur.read_u32_leb128("set_local local index")?;
                    callback!(self.on_set_local_expr(local_index));
                    callback!(self.on_opcode_index(local_index));
                }
                TeeLocal => {
                    let local_index = self.cur.read_u32_leb128("tee_local local index")?;
                    callback!(self.on_tee_local_expr(local_index));
                    callback!(self.on_opcode_index(local_index));
                }
                GetGlobal => {
                    let global_index = self.cur.read_u32_leb128("get_global global index")?;
                    callback!(self.on_get_global_expr(global_index));
                    callback!(self.on_opcode_index(global_index));
                }
                SetGlobal => {
                    let global_index = self.cur.read_u32_leb128("set_global global index")?;
                    callback!(self.on_set_global_expr(global_index));
                    callback!(self.on_opcode_index(global_index));
                }
                I32Load8S | I32Load8U | I32Load16S | I32Load16U | I64Load8S | I64Load8U
                | I64Load16S | I64Load16U | I64Load32S | I64Load32U | I32Load | I64Load
                | F32Load | F64Load => {
                    let alignment_log2 = self.cur.read_u32_leb128("load alignment")?;
                    let offset = self.cur.read_u32_leb128("load offset")?;
                    callback!(self.on_load_expr(opcode, alignment_log2, offset));
                    callback!(self.on_opcode_uint32_uint32(alignment_log2, offset));
                }
                I32Store8 | I32Store16 | I64Store8 | I64Store16 | I64Store32 | I32Store
                | I64Store | F32Store | F64Store => {
                    let alignment_log2 = self.cur.read_u32_leb128("store alignment")?;
                    let offset = self.cur.read_u32_leb128("store offset")?;
                    callback!(self.on_store_expr(opcode, alignment_log2, offset));
                    callback!(self.on_opcode_uint32_uint32(alignment_log2, offset));
                }
                CurrentMemory => {
                    let reserved = self.cur.read_u32_leb128("current_memory reserved")?;
                    if reserved != 0 {
                        return Err(self.fail(
                            ErrorKind::BadOpcode,
                            "current_memory reserved value must be 0",
                        ));
                    }
                    callback!(self.on_current_memory_expr());
                    callback!(self.on_opcode_uint32(reserved));
                }
                GrowMemory => {
                    let reserved = self.cur.read_u32_leb128("grow_memory reserved")?;
                    if reserved != 0 {
                        return Err(self.fail(
                            ErrorKind::BadOpcode,
                            "grow_memory reserved value must be 0",
                        ));
                    }
                    callback!(self.on_grow_memory_expr());
                    callback!(self.on_opcode_uint32(reserved));
                }
                I32Const => {
                    let value = self.cur.read_i32_leb128("i32.const value")?;
                    callback!(self.on_i32_const_expr(value));
                    callback!(self.on_opcode_uint32(value as u32));
                }
                I64Const => {
                    let value = self.cur.read_i64_leb128("i64.const value")?;
                    callback!(self.on_i64_const_expr(value));
                    callback!(self.on_opcode_uint64(value as u64));
                }
                F32Const => {
                    let value_bits = self.cur.read_f32_bits("f32.const value")?;
                    callback!(self.on_f32_const_expr(value_bits));
                    callback!(self.on_opcode_f32(value_bits));
                }
                F64Const => {
                    let value_bits = self.cur.read_f64_bits("f64.const value")?;
                    callback!(self.on_f64_const_expr(value_bits));
                    callback!(self.on_opcode_f64(value_bits));
                }
                I32Add | I32Sub | I32Mul | I32DivS | I32DivU | I32RemS | I32RemU | I32And
                | I32Or | I32Xor | I32Shl | I32ShrU | I32ShrS | I32Rotr | I32Rotl | I64Add
                | I64Sub | I64Mul | I64DivS | I64DivU | I64RemS | I64RemU | I64And | I64Or
                | I64Xor | I64Shl | I64ShrU | I64ShrS | I64Rotr | I64Rotl | F32Add | F32Sub
                | F32Mul | F32Div | F32Min | F32Max | F32Copysign | F64Add | F64Sub | F64Mul
                | F64Div | F64Min | F64Max | F64Copysign => {
                    callback!(self.on_binary_expr(opcode));
                    callback!(self.on_opcode_bare());
                }
                I32Eq | I32Ne | I32LtS | I32LeS | I32LtU | I32LeU | I32GtS | I32GeS | I32GtU
                | I32GeU | I64Eq | I64Ne | I64LtS | I64LeS | I64LtU | I64LeU | I64GtS
                | I64GeS | I64GtU | I64GeU | F32Eq | F32Ne | F32Lt | F32Le | F32Gt | F32Ge
                | F64Eq | F64Ne | F64Lt | F64Le | F64Gt | F64Ge => {
                    callback!(self.on_compare_expr(opcode));
                    callback!(self.on_opcode_bare());
                }
                I32Clz | I32Ctz | I32Popcnt | I64Clz | I64Ctz | I64Popcnt | F32Abs | F32Neg
                | F32Ceil | F32Floor | F32Trunc | F32Nearest | F32Sqrt | F64Abs | F64Neg
                | F64Ceil | F64Floor | F64Trunc | F64Nearest | F64Sqrt => {
                    callback!(self.on_unary_expr(opcode));
                    callback!(self.on_opcode_bare());
                }
                I32TruncSF32 | I32TruncSF64 | I32TruncUF32 | I32TruncUF64 | I32WrapI64
                | I64TruncSF32 | I64TruncSF64 | I64TruncUF32 | I64TruncUF64 | I64ExtendSI32
                | I64ExtendUI32 | F32ConvertSI32 | F32ConvertUI32 | F32ConvertSI64
                | F32ConvertUI64 | F32DemoteF64 | F32ReinterpretI32 | F64ConvertSI32
                | F64ConvertUI32 | F64ConvertSI64 | F64ConvertUI64 | F64PromoteF32
                | F64ReinterpretI64 | I32ReinterpretF32 | I64ReinterpretF64 | I32Eqz
                | I64Eqz => {
                    callback!(self.on_convert_expr(opcode));
                    callback!(self.on_opcode_bare());
                }
                Try => {
                    self.check_opcode_enabled(opcode)?;
                    let sig = self.read_inline_signature("try signature type")?;
                    callback!(self.on_try_expr(sig));
                    callback!(self.on_opcode_block_sig(sig));
                }
                Catch => {
                    self.check_opcode_enabled(opcode)?;
                    let except_index = self.cur.read_u32_leb128("exception index")?;
                    callback!(self.on_catch_expr(except_index));
                    callback!(self.on_opcode_index(except_index));
                }
                CatchAll => {
                    self.check_opcode_enabled(opcode)?;
                    callback!(self.on_catch_all_expr());
                    callback!(self.on_opcode_bare());
                }
                Rethrow => {
                    self.check_opcode_enabled(opcode)?;
                    let depth = self.cur.read_u32_leb128("catch depth")?;
                    callback!(self.on_rethrow_expr(depth));
                    callback!(self.on_opcode_index(depth));
                }
                Throw => {
                    self.check_opcode_enabled(opcode)?;
                    let except_index = self.cur.read_u32_leb128("exception index")?;
                    callback!(self.on_throw_expr(except_index));
                    callback!(self.on_opcode_index(except_index));
                }
                I32TruncSSatF32 | I32TruncUSatF32 | I32TruncSSatF64 | I32TruncUSatF64
                | I64TruncSSatF32 | I64TruncUSatF32 | I64TruncSSatF64 | I64TruncUSatF64 => {
                    self.check_opcode_enabled(opcode)?;
                    callback!(self.on_convert_expr(opcode));
                    callback!(self.on_opcode_bare());
                }
            }
        }

        if self.cur.pos() != end_offset {
            return Err(self.fail(
                ErrorKind::UnfinishedSection,
                "function body longer than given size",
            ));
        }
        if !seen_end_opcode {
            return Err(self.fail(
                ErrorKind::BadOpcode,
                "function body must end with END opcode",
            ));
        }
        Ok(())
    }
}
