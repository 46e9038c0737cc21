//! Logging tee for the delegate interface.
//!
//! [`LoggingDelegate`] records every event (name and arguments) to a sink,
//! then forwards it to the wrapped delegate and propagates its result. The
//! entry point installs it automatically when a log sink is configured, so
//! consumers never interact with it directly. Sink write failures are
//! ignored; tracing is best effort and never fails a decode.

use std::fmt;
use std::io::{self, Write};

use fhex::ToHex;

use super::delegate::{CallbackResult, Delegate};
use super::opcode::Opcode;
use super::types::{ExternalKind, Limits, RelocType, SectionCode, ValueType};

const INDENT: usize = 2;

pub struct LoggingDelegate<'w, 'd> {
    sink: &'w mut dyn io::Write,
    inner: &'d mut dyn Delegate,
    indent: usize,
}

fn sig_str(sig: Option<ValueType>) -> &'static str {
    match sig {
        None => "void",
        Some(ValueType::I32) => "i32",
        Some(ValueType::I64) => "i64",
        Some(ValueType::F32) => "f32",
        Some(ValueType::F64) => "f64",
        Some(ValueType::Anyfunc) => "anyfunc",
        Some(ValueType::Func) => "func",
        Some(ValueType::Void) => "void",
    }
}

fn types_str(types: &[ValueType]) -> String {
    let names: Vec<&str> = types.iter().map(|t| sig_str(Some(*t))).collect();
    names.join(", ")
}

impl<'w, 'd> LoggingDelegate<'w, 'd> {
    pub fn new(sink: &'w mut dyn io::Write, inner: &'d mut dyn Delegate) -> LoggingDelegate<'w, 'd> {
        LoggingDelegate {
            sink,
            inner,
            indent: 0,
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.sink, "{:indent$}{args}", "", indent = self.indent);
    }

    fn push(&mut self) {
        self.indent += INDENT;
    }

    fn pop(&mut self) {
        self.indent = self.indent.saturating_sub(INDENT);
    }
}

impl Delegate for LoggingDelegate<'_, '_> {
    fn on_error(&mut self, offset: usize, message: &str) -> bool {
        self.line(format_args!("on_error(offset: {offset:#x}, \"{message}\")"));
        self.inner.on_error(offset, message)
    }

    fn begin_module(&mut self, version: u32) -> CallbackResult {
        self.line(format_args!("begin_module(version: {version})"));
        self.push();
        self.inner.begin_module(version)
    }

    fn end_module(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_module"));
        self.inner.end_module()
    }

    fn begin_section(&mut self, section: SectionCode, size: u32) -> CallbackResult {
        self.line(format_args!(
            "begin_section({}, size: {size})",
            section.name()
        ));
        self.inner.begin_section(section, size)
    }

    fn begin_custom_section(&mut self, size: u32, name: &str) -> CallbackResult {
        self.line(format_args!(
            "begin_custom_section(size: {size}, \"{name}\")"
        ));
        self.push();
        self.inner.begin_custom_section(size, name)
    }

    fn end_custom_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_custom_section"));
        self.inner.end_custom_section()
    }

    fn begin_type_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_type_section(size: {size})"));
        self.push();
        self.inner.begin_type_section(size)
    }

    fn on_type_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_type_count({count})"));
        self.inner.on_type_count(count)
    }

    fn on_type(
        &mut self,
        index: u32,
        params: &[ValueType],
        results: &[ValueType],
    ) -> CallbackResult {
        self.line(format_args!(
            "on_type(index: {index}, params: [{}], results: [{}])",
            types_str(params),
            types_str(results)
        ));
        self.inner.on_type(index, params, results)
    }

    fn end_type_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_type_section"));
        self.inner.end_type_section()
    }

    fn begin_import_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_import_section(size: {size})"));
        self.push();
        self.inner.begin_import_section(size)
    }

    fn on_import_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_import_count({count})"));
        self.inner.on_import_count(count)
    }

    fn on_import(&mut self, index: u32, module: &str, field: &str) -> CallbackResult {
        self.line(format_args!(
            "on_import(index: {index}, module: \"{module}\", field: \"{field}\")"
        ));
        self.inner.on_import(index, module, field)
    }

    fn on_import_func(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        func_index: u32,
        sig_index: u32,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_import_func(import_index: {import_index}, func_index: {func_index}, sig_index: {sig_index})"
        ));
        self.inner
            .on_import_func(import_index, module, field, func_index, sig_index)
    }

    fn on_import_table(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        table_index: u32,
        elem_type: ValueType,
        limits: &Limits,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_import_table(import_index: {import_index}, table_index: {table_index}, elem_type: {elem_type}, limits: {limits})"
        ));
        self.inner
            .on_import_table(import_index, module, field, table_index, elem_type, limits)
    }

    fn on_import_memory(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        memory_index: u32,
        limits: &Limits,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_import_memory(import_index: {import_index}, memory_index: {memory_index}, limits: {limits})"
        ));
        self.inner
            .on_import_memory(import_index, module, field, memory_index, limits)
    }

    fn on_import_global(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        global_index: u32,
        global_type: ValueType,
        mutable: bool,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_import_global(import_index: {import_index}, global_index: {global_index}, type: {global_type}, mutable: {mutable})"
        ));
        self.inner.on_import_global(
            import_index,
            module,
            field,
            global_index,
            global_type,
            mutable,
        )
    }

    fn on_import_exception(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        except_index: u32,
        sig: &[ValueType],
    ) -> CallbackResult {
        self.line(format_args!(
            "on_import_exception(import_index: {import_index}, except_index: {except_index}, sig: [{}])",
            types_str(sig)
        ));
        self.inner
            .on_import_exception(import_index, module, field, except_index, sig)
    }

    fn end_import_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_import_section"));
        self.inner.end_import_section()
    }

    fn begin_function_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_function_section(size: {size})"));
        self.push();
        self.inner.begin_function_section(size)
    }

    fn on_function_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_function_count({count})"));
        self.inner.on_function_count(count)
    }

    fn on_function(&mut self, func_index: u32, sig_index: u32) -> CallbackResult {
        self.line(format_args!(
            "on_function(func_index: {func_index}, sig_index: {sig_index})"
        ));
        self.inner.on_function(func_index, sig_index)
    }

    fn end_function_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_function_section"));
        self.inner.end_function_section()
    }

    fn begin_table_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_table_section(size: {size})"));
        self.push();
        self.inner.begin_table_section(size)
    }

    fn on_table_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_table_count({count})"));
        self.inner.on_table_count(count)
    }

    fn on_table(
        &mut self,
        table_index: u32,
        elem_type: ValueType,
        limits: &Limits,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_table(table_index: {table_index}, elem_type: {elem_type}, limits: {limits})"
        ));
        self.inner.on_table(table_index, elem_type, limits)
    }

    fn end_table_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_table_section"));
        self.inner.end_table_section()
    }

    fn begin_memory_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_memory_section(size: {size})"));
        self.push();
        self.inner.begin_memory_section(size)
    }

    fn on_memory_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_memory_count({count})"));
        self.inner.on_memory_count(count)
    }

    fn on_memory(&mut self, memory_index: u32, limits: &Limits) -> CallbackResult {
        self.line(format_args!(
            "on_memory(memory_index: {memory_index}, limits: {limits})"
        ));
        self.inner.on_memory(memory_index, limits)
    }

    fn end_memory_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_memory_section"));
        self.inner.end_memory_section()
    }

    fn begin_global_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_global_section(size: {size})"));
        self.push();
        self.inner.begin_global_section(size)
    }

    fn on_global_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_global_count({count})"));
        self.inner.on_global_count(count)
    }

    fn begin_global(
        &mut self,
        global_index: u32,
        global_type: ValueType,
        mutable: bool,
    ) -> CallbackResult {
        self.line(format_args!(
            "begin_global(global_index: {global_index}, type: {global_type}, mutable: {mutable})"
        ));
        self.inner.begin_global(global_index, global_type, mutable)
    }

    fn begin_global_init_expr(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!(
            "begin_global_init_expr(global_index: {global_index})"
        ));
        self.inner.begin_global_init_expr(global_index)
    }

    fn end_global_init_expr(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!(
            "end_global_init_expr(global_index: {global_index})"
        ));
        self.inner.end_global_init_expr(global_index)
    }

    fn end_global(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!("end_global(global_index: {global_index})"));
        self.inner.end_global(global_index)
    }

    fn end_global_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_global_section"));
        self.inner.end_global_section()
    }

    fn begin_export_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_export_section(size: {size})"));
        self.push();
        self.inner.begin_export_section(size)
    }

    fn on_export_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_export_count({count})"));
        self.inner.on_export_count(count)
    }

    fn on_export(
        &mut self,
        index: u32,
        kind: ExternalKind,
        item_index: u32,
        name: &str,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_export(index: {index}, kind: {}, item_index: {item_index}, name: \"{name}\")",
            kind.name()
        ));
        self.inner.on_export(index, kind, item_index, name)
    }

    fn end_export_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_export_section"));
        self.inner.end_export_section()
    }

    fn begin_start_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_start_section(size: {size})"));
        self.push();
        self.inner.begin_start_section(size)
    }

    fn on_start_function(&mut self, func_index: u32) -> CallbackResult {
        self.line(format_args!("on_start_function(func_index: {func_index})"));
        self.inner.on_start_function(func_index)
    }

    fn end_start_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_start_section"));
        self.inner.end_start_section()
    }

    fn begin_elem_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_elem_section(size: {size})"));
        self.push();
        self.inner.begin_elem_section(size)
    }

    fn on_elem_segment_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_elem_segment_count({count})"));
        self.inner.on_elem_segment_count(count)
    }

    fn begin_elem_segment(&mut self, index: u32, table_index: u32) -> CallbackResult {
        self.line(format_args!(
            "begin_elem_segment(index: {index}, table_index: {table_index})"
        ));
        self.inner.begin_elem_segment(index, table_index)
    }

    fn begin_elem_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("begin_elem_segment_init_expr(index: {index})"));
        self.inner.begin_elem_segment_init_expr(index)
    }

    fn end_elem_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("end_elem_segment_init_expr(index: {index})"));
        self.inner.end_elem_segment_init_expr(index)
    }

    fn on_elem_segment_function_index_count(&mut self, index: u32, count: u32) -> CallbackResult {
        self.line(format_args!(
            "on_elem_segment_function_index_count(index: {index}, count: {count})"
        ));
        self.inner.on_elem_segment_function_index_count(index, count)
    }

    fn on_elem_segment_function_index(&mut self, index: u32, func_index: u32) -> CallbackResult {
        self.line(format_args!(
            "on_elem_segment_function_index(index: {index}, func_index: {func_index})"
        ));
        self.inner.on_elem_segment_function_index(index, func_index)
    }

    fn end_elem_segment(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("end_elem_segment(index: {index})"));
        self.inner.end_elem_segment(index)
    }

    fn end_elem_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_elem_section"));
        self.inner.end_elem_section()
    }

    fn begin_code_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_code_section(size: {size})"));
        self.push();
        self.inner.begin_code_section(size)
    }

    fn on_function_body_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_function_body_count({count})"));
        self.inner.on_function_body_count(count)
    }

    fn begin_function_body(&mut self, func_index: u32) -> CallbackResult {
        self.line(format_args!("begin_function_body(func_index: {func_index})"));
        self.push();
        self.inner.begin_function_body(func_index)
    }

    fn on_local_decl_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_local_decl_count({count})"));
        self.inner.on_local_decl_count(count)
    }

    fn on_local_decl(
        &mut self,
        decl_index: u32,
        count: u32,
        local_type: ValueType,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_local_decl(decl_index: {decl_index}, count: {count}, type: {local_type})"
        ));
        self.inner.on_local_decl(decl_index, count, local_type)
    }

    fn end_function_body(&mut self, func_index: u32) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_function_body(func_index: {func_index})"));
        self.inner.end_function_body(func_index)
    }

    fn end_code_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_code_section"));
        self.inner.end_code_section()
    }

    fn begin_data_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_data_section(size: {size})"));
        self.push();
        self.inner.begin_data_section(size)
    }

    fn on_data_segment_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_data_segment_count({count})"));
        self.inner.on_data_segment_count(count)
    }

    fn begin_data_segment(&mut self, index: u32, memory_index: u32) -> CallbackResult {
        self.line(format_args!(
            "begin_data_segment(index: {index}, memory_index: {memory_index})"
        ));
        self.inner.begin_data_segment(index, memory_index)
    }

    fn begin_data_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("begin_data_segment_init_expr(index: {index})"));
        self.inner.begin_data_segment_init_expr(index)
    }

    fn end_data_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("end_data_segment_init_expr(index: {index})"));
        self.inner.end_data_segment_init_expr(index)
    }

    fn on_data_segment_data(&mut self, index: u32, data: &[u8]) -> CallbackResult {
        self.line(format_args!(
            "on_data_segment_data(index: {index}, size: {})",
            data.len()
        ));
        self.inner.on_data_segment_data(index, data)
    }

    fn end_data_segment(&mut self, index: u32) -> CallbackResult {
        self.line(format_args!("end_data_segment(index: {index})"));
        self.inner.end_data_segment(index)
    }

    fn end_data_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_data_section"));
        self.inner.end_data_section()
    }

    fn on_opcode(&mut self, opcode: Opcode) -> CallbackResult {
        self.line(format_args!("on_opcode(\"{opcode}\")"));
        self.inner.on_opcode(opcode)
    }

    fn on_unary_expr(&mut self, opcode: Opcode) -> CallbackResult {
        self.line(format_args!("on_unary_expr(\"{opcode}\")"));
        self.inner.on_unary_expr(opcode)
    }

    fn on_binary_expr(&mut self, opcode: Opcode) -> CallbackResult {
        self.line(format_args!("on_binary_expr(\"{opcode}\")"));
        self.inner.on_binary_expr(opcode)
    }

    fn on_compare_expr(&mut self, opcode: Opcode) -> CallbackResult {
        self.line(format_args!("on_compare_expr(\"{opcode}\")"));
        self.inner.on_compare_expr(opcode)
    }

    fn on_convert_expr(&mut self, opcode: Opcode) -> CallbackResult {
        self.line(format_args!("on_convert_expr(\"{opcode}\")"));
        self.inner.on_convert_expr(opcode)
    }

    fn on_unreachable_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_unreachable_expr"));
        self.inner.on_unreachable_expr()
    }

    fn on_nop_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_nop_expr"));
        self.inner.on_nop_expr()
    }

    fn on_drop_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_drop_expr"));
        self.inner.on_drop_expr()
    }

    fn on_select_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_select_expr"));
        self.inner.on_select_expr()
    }

    fn on_return_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_return_expr"));
        self.inner.on_return_expr()
    }

    fn on_block_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        self.line(format_args!("on_block_expr(sig: {})", sig_str(sig)));
        self.inner.on_block_expr(sig)
    }

    fn on_loop_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        self.line(format_args!("on_loop_expr(sig: {})", sig_str(sig)));
        self.inner.on_loop_expr(sig)
    }

    fn on_if_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        self.line(format_args!("on_if_expr(sig: {})", sig_str(sig)));
        self.inner.on_if_expr(sig)
    }

    fn on_else_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_else_expr"));
        self.inner.on_else_expr()
    }

    fn on_end_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_end_expr"));
        self.inner.on_end_expr()
    }

    fn on_end_func(&mut self) -> CallbackResult {
        self.line(format_args!("on_end_func"));
        self.inner.on_end_func()
    }

    fn on_try_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        self.line(format_args!("on_try_expr(sig: {})", sig_str(sig)));
        self.inner.on_try_expr(sig)
    }

    fn on_catch_expr(&mut self, except_index: u32) -> CallbackResult {
        self.line(format_args!("on_catch_expr(except_index: {except_index})"));
        self.inner.on_catch_expr(except_index)
    }

    fn on_catch_all_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_catch_all_expr"));
        self.inner.on_catch_all_expr()
    }

    fn on_rethrow_expr(&mut self, depth: u32) -> CallbackResult {
        self.line(format_args!("on_rethrow_expr(depth: {depth})"));
        self.inner.on_rethrow_expr(depth)
    }

    fn on_throw_expr(&mut self, except_index: u32) -> CallbackResult {
        self.line(format_args!("on_throw_expr(except_index: {except_index})"));
        self.inner.on_throw_expr(except_index)
    }

    fn on_br_expr(&mut self, depth: u32) -> CallbackResult {
        self.line(format_args!("on_br_expr(depth: {depth})"));
        self.inner.on_br_expr(depth)
    }

    fn on_br_if_expr(&mut self, depth: u32) -> CallbackResult {
        self.line(format_args!("on_br_if_expr(depth: {depth})"));
        self.inner.on_br_if_expr(depth)
    }

    fn on_br_table_expr(&mut self, targets: &[u32], default_target: u32) -> CallbackResult {
        self.line(format_args!(
            "on_br_table_expr(targets: {targets:?}, default: {default_target})"
        ));
        self.inner.on_br_table_expr(targets, default_target)
    }

    fn on_call_expr(&mut self, func_index: u32) -> CallbackResult {
        self.line(format_args!("on_call_expr(func_index: {func_index})"));
        self.inner.on_call_expr(func_index)
    }

    fn on_call_indirect_expr(&mut self, sig_index: u32) -> CallbackResult {
        self.line(format_args!("on_call_indirect_expr(sig_index: {sig_index})"));
        self.inner.on_call_indirect_expr(sig_index)
    }

    fn on_get_local_expr(&mut self, local_index: u32) -> CallbackResult {
        self.line(format_args!("on_get_local_expr(local_index: {local_index})"));
        self.inner.on_get_local_expr(local_index)
    }

    fn on_set_local_expr(&mut self, local_index: u32) -> CallbackResult {
        self.line(format_args!("on_set_local_expr(local_index: {local_index})"));
        self.inner.on_set_local_expr(local_index)
    }

    fn on_tee_local_expr(&mut self, local_index: u32) -> CallbackResult {
        self.line(format_args!("on_tee_local_expr(local_index: {local_index})"));
        self.inner.on_tee_local_expr(local_index)
    }

    fn on_get_global_expr(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!(
            "on_get_global_expr(global_index: {global_index})"
        ));
        self.inner.on_get_global_expr(global_index)
    }

    fn on_set_global_expr(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!(
            "on_set_global_expr(global_index: {global_index})"
        ));
        self.inner.on_set_global_expr(global_index)
    }

    fn on_i32_const_expr(&mut self, value: i32) -> CallbackResult {
        self.line(format_args!("on_i32_const_expr({value})"));
        self.inner.on_i32_const_expr(value)
    }

    fn on_i64_const_expr(&mut self, value: i64) -> CallbackResult {
        self.line(format_args!("on_i64_const_expr({value})"));
        self.inner.on_i64_const_expr(value)
    }

    fn on_f32_const_expr(&mut self, value_bits: u32) -> CallbackResult {
        self.line(format_args!(
            "on_f32_const_expr({})",
            f32::from_bits(value_bits).to_hex()
        ));
        self.inner.on_f32_const_expr(value_bits)
    }

    fn on_f64_const_expr(&mut self, value_bits: u64) -> CallbackResult {
        self.line(format_args!(
            "on_f64_const_expr({})",
            f64::from_bits(value_bits).to_hex()
        ));
        self.inner.on_f64_const_expr(value_bits)
    }

    fn on_load_expr(&mut self, opcode: Opcode, alignment_log2: u32, offset: u32) -> CallbackResult {
        self.line(format_args!(
            "on_load_expr(\"{opcode}\", align_log2: {alignment_log2}, offset: {offset})"
        ));
        self.inner.on_load_expr(opcode, alignment_log2, offset)
    }

    fn on_store_expr(
        &mut self,
        opcode: Opcode,
        alignment_log2: u32,
        offset: u32,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_store_expr(\"{opcode}\", align_log2: {alignment_log2}, offset: {offset})"
        ));
        self.inner.on_store_expr(opcode, alignment_log2, offset)
    }

    fn on_current_memory_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_current_memory_expr"));
        self.inner.on_current_memory_expr()
    }

    fn on_grow_memory_expr(&mut self) -> CallbackResult {
        self.line(format_args!("on_grow_memory_expr"));
        self.inner.on_grow_memory_expr()
    }

    fn on_init_expr_i32_const(&mut self, index: u32, value: i32) -> CallbackResult {
        self.line(format_args!(
            "on_init_expr_i32_const(index: {index}, value: {value})"
        ));
        self.inner.on_init_expr_i32_const(index, value)
    }

    fn on_init_expr_i64_const(&mut self, index: u32, value: i64) -> CallbackResult {
        self.line(format_args!(
            "on_init_expr_i64_const(index: {index}, value: {value})"
        ));
        self.inner.on_init_expr_i64_const(index, value)
    }

    fn on_init_expr_f32_const(&mut self, index: u32, value_bits: u32) -> CallbackResult {
        self.line(format_args!(
            "on_init_expr_f32_const(index: {index}, value: {})",
            f32::from_bits(value_bits).to_hex()
        ));
        self.inner.on_init_expr_f32_const(index, value_bits)
    }

    fn on_init_expr_f64_const(&mut self, index: u32, value_bits: u64) -> CallbackResult {
        self.line(format_args!(
            "on_init_expr_f64_const(index: {index}, value: {})",
            f64::from_bits(value_bits).to_hex()
        ));
        self.inner.on_init_expr_f64_const(index, value_bits)
    }

    fn on_init_expr_get_global(&mut self, index: u32, global_index: u32) -> CallbackResult {
        self.line(format_args!(
            "on_init_expr_get_global(index: {index}, global_index: {global_index})"
        ));
        self.inner.on_init_expr_get_global(index, global_index)
    }

    fn on_opcode_bare(&mut self) -> CallbackResult {
        self.line(format_args!("on_opcode_bare"));
        self.inner.on_opcode_bare()
    }

    fn on_opcode_index(&mut self, value: u32) -> CallbackResult {
        self.line(format_args!("on_opcode_index({value})"));
        self.inner.on_opcode_index(value)
    }

    fn on_opcode_uint32(&mut self, value: u32) -> CallbackResult {
        self.line(format_args!("on_opcode_uint32({value})"));
        self.inner.on_opcode_uint32(value)
    }

    fn on_opcode_uint32_uint32(&mut self, first: u32, second: u32) -> CallbackResult {
        self.line(format_args!("on_opcode_uint32_uint32({first}, {second})"));
        self.inner.on_opcode_uint32_uint32(first, second)
    }

    fn on_opcode_uint64(&mut self, value: u64) -> CallbackResult {
        self.line(format_args!("on_opcode_uint64({value})"));
        self.inner.on_opcode_uint64(value)
    }

    fn on_opcode_f32(&mut self, value_bits: u32) -> CallbackResult {
        self.line(format_args!("on_opcode_f32({value_bits:#010x})"));
        self.inner.on_opcode_f32(value_bits)
    }

    fn on_opcode_f64(&mut self, value_bits: u64) -> CallbackResult {
        self.line(format_args!("on_opcode_f64({value_bits:#018x})"));
        self.inner.on_opcode_f64(value_bits)
    }

    fn on_opcode_block_sig(&mut self, sig: Option<ValueType>) -> CallbackResult {
        self.line(format_args!("on_opcode_block_sig({})", sig_str(sig)));
        self.inner.on_opcode_block_sig(sig)
    }

    fn begin_names_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_names_section(size: {size})"));
        self.push();
        self.inner.begin_names_section(size)
    }

    fn on_function_name_subsection(
        &mut self,
        index: u32,
        name_type: u32,
        subsection_size: u32,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_function_name_subsection(index: {index}, type: {name_type}, size: {subsection_size})"
        ));
        self.inner
            .on_function_name_subsection(index, name_type, subsection_size)
    }

    fn on_function_names_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_function_names_count({count})"));
        self.inner.on_function_names_count(count)
    }

    fn on_function_name(&mut self, func_index: u32, name: &str) -> CallbackResult {
        self.line(format_args!(
            "on_function_name(func_index: {func_index}, name: \"{name}\")"
        ));
        self.inner.on_function_name(func_index, name)
    }

    fn on_local_name_subsection(
        &mut self,
        index: u32,
        name_type: u32,
        subsection_size: u32,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_local_name_subsection(index: {index}, type: {name_type}, size: {subsection_size})"
        ));
        self.inner
            .on_local_name_subsection(index, name_type, subsection_size)
    }

    fn on_local_name_function_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_local_name_function_count({count})"));
        self.inner.on_local_name_function_count(count)
    }

    fn on_local_name_local_count(&mut self, func_index: u32, count: u32) -> CallbackResult {
        self.line(format_args!(
            "on_local_name_local_count(func_index: {func_index}, count: {count})"
        ));
        self.inner.on_local_name_local_count(func_index, count)
    }

    fn on_local_name(&mut self, func_index: u32, local_index: u32, name: &str) -> CallbackResult {
        self.line(format_args!(
            "on_local_name(func_index: {func_index}, local_index: {local_index}, name: \"{name}\")"
        ));
        self.inner.on_local_name(func_index, local_index, name)
    }

    fn end_names_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_names_section"));
        self.inner.end_names_section()
    }

    fn begin_reloc_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_reloc_section(size: {size})"));
        self.push();
        self.inner.begin_reloc_section(size)
    }

    fn on_reloc_count(
        &mut self,
        count: u32,
        section: SectionCode,
        section_name: &str,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_reloc_count(count: {count}, section: {}, name: \"{section_name}\")",
            section.name()
        ));
        self.inner.on_reloc_count(count, section, section_name)
    }

    fn on_reloc(
        &mut self,
        reloc_type: RelocType,
        offset: u32,
        index: u32,
        addend: i32,
    ) -> CallbackResult {
        self.line(format_args!(
            "on_reloc(type: {reloc_type:?}, offset: {offset:#x}, index: {index}, addend: {addend})"
        ));
        self.inner.on_reloc(reloc_type, offset, index, addend)
    }

    fn end_reloc_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_reloc_section"));
        self.inner.end_reloc_section()
    }

    fn begin_linking_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_linking_section(size: {size})"));
        self.push();
        self.inner.begin_linking_section(size)
    }

    fn on_stack_global(&mut self, global_index: u32) -> CallbackResult {
        self.line(format_args!("on_stack_global(global_index: {global_index})"));
        self.inner.on_stack_global(global_index)
    }

    fn on_symbol_info_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_symbol_info_count({count})"));
        self.inner.on_symbol_info_count(count)
    }

    fn on_symbol_info(&mut self, name: &str, flags: u32) -> CallbackResult {
        self.line(format_args!(
            "on_symbol_info(name: \"{name}\", flags: {flags:#x})"
        ));
        self.inner.on_symbol_info(name, flags)
    }

    fn end_linking_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_linking_section"));
        self.inner.end_linking_section()
    }

    fn begin_exception_section(&mut self, size: u32) -> CallbackResult {
        self.line(format_args!("begin_exception_section(size: {size})"));
        self.push();
        self.inner.begin_exception_section(size)
    }

    fn on_exception_count(&mut self, count: u32) -> CallbackResult {
        self.line(format_args!("on_exception_count({count})"));
        self.inner.on_exception_count(count)
    }

    fn on_exception_type(&mut self, index: u32, sig: &[ValueType]) -> CallbackResult {
        self.line(format_args!(
            "on_exception_type(index: {index}, sig: [{}])",
            types_str(sig)
        ));
        self.inner.on_exception_type(index, sig)
    }

    fn end_exception_section(&mut self) -> CallbackResult {
        self.pop();
        self.line(format_args!("end_exception_section"));
        self.inner.end_exception_section()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::delegate::NopDelegate;

    #[test]
    fn test_lines_are_indented_and_forwarded() {
        let mut sink: Vec<u8> = Vec::new();
        let mut inner = NopDelegate;
        {
            let mut logging = LoggingDelegate::new(&mut sink, &mut inner);
            logging.begin_module(1).unwrap();
            logging.begin_type_section(4).unwrap();
            logging.on_type_count(0).unwrap();
            logging.end_type_section().unwrap();
            logging.end_module().unwrap();
        }
        let out = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "begin_module(version: 1)");
        assert_eq!(lines[1], "  begin_type_section(size: 4)");
        assert_eq!(lines[2], "    on_type_count(0)");
        assert_eq!(lines[3], "  end_type_section");
        assert_eq!(lines[4], "end_module");
    }

    #[test]
    fn test_write_failure_is_ignored() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = FailingSink;
        let mut inner = NopDelegate;
        let mut logging = LoggingDelegate::new(&mut sink, &mut inner);
        assert!(logging.begin_module(1).is_ok());
    }
}
