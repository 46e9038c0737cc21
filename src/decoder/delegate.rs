//! The event-consumer interface driven by the decoder.
//!
//! Every callback has a default no-op implementation, so a consumer
//! implements only the events it cares about. Returning `Err(CallbackError)`
//! from any callback stops the decoder immediately; the decode call then
//! fails with a callback-failure error naming the event.
//!
//! String and byte-slice arguments borrow from the module buffer and are
//! valid only for the duration of the callback. A delegate that wants to
//! retain them must copy.

use super::opcode::Opcode;
use super::types::{ExternalKind, Limits, RelocType, SectionCode, ValueType};

/// A delegate's way of aborting the decode. Carries no payload; the decoder
/// reports which callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackError;

pub type CallbackResult = Result<(), CallbackError>;

#[allow(unused_variables)]
pub trait Delegate {
    /// Receives the rendered diagnostic before a decode error is returned.
    /// Returns true when the delegate has taken care of reporting; false
    /// lets the decoder print to stderr.
    fn on_error(&mut self, offset: usize, message: &str) -> bool {
        false
    }

    // Module lifecycle ----------------------------------------------------

    fn begin_module(&mut self, version: u32) -> CallbackResult {
        Ok(())
    }
    fn end_module(&mut self) -> CallbackResult {
        Ok(())
    }

    /// Generic pre-dispatch event for every section, custom included.
    fn begin_section(&mut self, section: SectionCode, size: u32) -> CallbackResult {
        Ok(())
    }

    fn begin_custom_section(&mut self, size: u32, name: &str) -> CallbackResult {
        Ok(())
    }
    fn end_custom_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Type section --------------------------------------------------------

    fn begin_type_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_type_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    /// `results` holds zero or one concrete types.
    fn on_type(
        &mut self,
        index: u32,
        params: &[ValueType],
        results: &[ValueType],
    ) -> CallbackResult {
        Ok(())
    }
    fn end_type_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Import section ------------------------------------------------------

    fn begin_import_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_import_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    /// Emitted for every import before the kind-specific event.
    fn on_import(&mut self, index: u32, module: &str, field: &str) -> CallbackResult {
        Ok(())
    }
    fn on_import_func(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        func_index: u32,
        sig_index: u32,
    ) -> CallbackResult {
        Ok(())
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
        Ok(())
    }
    fn on_import_memory(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        memory_index: u32,
        limits: &Limits,
    ) -> CallbackResult {
        Ok(())
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
        Ok(())
    }
    fn on_import_exception(
        &mut self,
        import_index: u32,
        module: &str,
        field: &str,
        except_index: u32,
        sig: &[ValueType],
    ) -> CallbackResult {
        Ok(())
    }
    fn end_import_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Function section ----------------------------------------------------

    fn begin_function_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_function_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_function(&mut self, func_index: u32, sig_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_function_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Table section -------------------------------------------------------

    fn begin_table_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_table_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_table(
        &mut self,
        table_index: u32,
        elem_type: ValueType,
        limits: &Limits,
    ) -> CallbackResult {
        Ok(())
    }
    fn end_table_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Memory section ------------------------------------------------------

    fn begin_memory_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_memory_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_memory(&mut self, memory_index: u32, limits: &Limits) -> CallbackResult {
        Ok(())
    }
    fn end_memory_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Global section ------------------------------------------------------

    fn begin_global_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_global_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_global(
        &mut self,
        global_index: u32,
        global_type: ValueType,
        mutable: bool,
    ) -> CallbackResult {
        Ok(())
    }
    fn begin_global_init_expr(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_global_init_expr(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_global(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_global_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Export section ------------------------------------------------------

    fn begin_export_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_export_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_export(
        &mut self,
        index: u32,
        kind: ExternalKind,
        item_index: u32,
        name: &str,
    ) -> CallbackResult {
        Ok(())
    }
    fn end_export_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Start section -------------------------------------------------------

    fn begin_start_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_start_function(&mut self, func_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_start_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Element section -----------------------------------------------------

    fn begin_elem_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_elem_segment_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_elem_segment(&mut self, index: u32, table_index: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_elem_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_elem_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_elem_segment_function_index_count(&mut self, index: u32, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_elem_segment_function_index(&mut self, index: u32, func_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_elem_segment(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_elem_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Code section --------------------------------------------------------

    fn begin_code_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_function_body_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_function_body(&mut self, func_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_local_decl_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_local_decl(
        &mut self,
        decl_index: u32,
        count: u32,
        local_type: ValueType,
    ) -> CallbackResult {
        Ok(())
    }
    fn end_function_body(&mut self, func_index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_code_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Data section --------------------------------------------------------

    fn begin_data_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_data_segment_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_data_segment(&mut self, index: u32, memory_index: u32) -> CallbackResult {
        Ok(())
    }
    fn begin_data_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_data_segment_init_expr(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_data_segment_data(&mut self, index: u32, data: &[u8]) -> CallbackResult {
        Ok(())
    }
    fn end_data_segment(&mut self, index: u32) -> CallbackResult {
        Ok(())
    }
    fn end_data_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Instructions: semantic events ---------------------------------------

    /// Emitted for every instruction before its semantic event.
    fn on_opcode(&mut self, opcode: Opcode) -> CallbackResult {
        Ok(())
    }
    fn on_unary_expr(&mut self, opcode: Opcode) -> CallbackResult {
        Ok(())
    }
    fn on_binary_expr(&mut self, opcode: Opcode) -> CallbackResult {
        Ok(())
    }
    fn on_compare_expr(&mut self, opcode: Opcode) -> CallbackResult {
        Ok(())
    }
    fn on_convert_expr(&mut self, opcode: Opcode) -> CallbackResult {
        Ok(())
    }
    fn on_unreachable_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_nop_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_drop_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_select_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_return_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    /// `sig` is None for a void block signature.
    fn on_block_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        Ok(())
    }
    fn on_loop_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        Ok(())
    }
    fn on_if_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        Ok(())
    }
    fn on_else_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_end_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    /// The `end` closing a function body, at exactly the declared body size.
    fn on_end_func(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_try_expr(&mut self, sig: Option<ValueType>) -> CallbackResult {
        Ok(())
    }
    fn on_catch_expr(&mut self, except_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_catch_all_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_rethrow_expr(&mut self, depth: u32) -> CallbackResult {
        Ok(())
    }
    fn on_throw_expr(&mut self, except_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_br_expr(&mut self, depth: u32) -> CallbackResult {
        Ok(())
    }
    fn on_br_if_expr(&mut self, depth: u32) -> CallbackResult {
        Ok(())
    }
    fn on_br_table_expr(&mut self, targets: &[u32], default_target: u32) -> CallbackResult {
        Ok(())
    }
    fn on_call_expr(&mut self, func_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_call_indirect_expr(&mut self, sig_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_get_local_expr(&mut self, local_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_set_local_expr(&mut self, local_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_tee_local_expr(&mut self, local_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_get_global_expr(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_set_global_expr(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_i32_const_expr(&mut self, value: i32) -> CallbackResult {
        Ok(())
    }
    fn on_i64_const_expr(&mut self, value: i64) -> CallbackResult {
        Ok(())
    }
    /// Float constants carry their raw bit patterns.
    fn on_f32_const_expr(&mut self, value_bits: u32) -> CallbackResult {
        Ok(())
    }
    fn on_f64_const_expr(&mut self, value_bits: u64) -> CallbackResult {
        Ok(())
    }
    fn on_load_expr(&mut self, opcode: Opcode, alignment_log2: u32, offset: u32) -> CallbackResult {
        Ok(())
    }
    fn on_store_expr(
        &mut self,
        opcode: Opcode,
        alignment_log2: u32,
        offset: u32,
    ) -> CallbackResult {
        Ok(())
    }
    fn on_current_memory_expr(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_grow_memory_expr(&mut self) -> CallbackResult {
        Ok(())
    }

    // Init expressions ----------------------------------------------------

    fn on_init_expr_i32_const(&mut self, index: u32, value: i32) -> CallbackResult {
        Ok(())
    }
    fn on_init_expr_i64_const(&mut self, index: u32, value: i64) -> CallbackResult {
        Ok(())
    }
    fn on_init_expr_f32_const(&mut self, index: u32, value_bits: u32) -> CallbackResult {
        Ok(())
    }
    fn on_init_expr_f64_const(&mut self, index: u32, value_bits: u64) -> CallbackResult {
        Ok(())
    }
    fn on_init_expr_get_global(&mut self, index: u32, global_index: u32) -> CallbackResult {
        Ok(())
    }

    // Instructions: raw syntactic events ----------------------------------

    fn on_opcode_bare(&mut self) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_index(&mut self, value: u32) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_uint32(&mut self, value: u32) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_uint32_uint32(&mut self, first: u32, second: u32) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_uint64(&mut self, value: u64) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_f32(&mut self, value_bits: u32) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_f64(&mut self, value_bits: u64) -> CallbackResult {
        Ok(())
    }
    fn on_opcode_block_sig(&mut self, sig: Option<ValueType>) -> CallbackResult {
        Ok(())
    }

    // Name custom section -------------------------------------------------

    fn begin_names_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_function_name_subsection(
        &mut self,
        index: u32,
        name_type: u32,
        subsection_size: u32,
    ) -> CallbackResult {
        Ok(())
    }
    fn on_function_names_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_function_name(&mut self, func_index: u32, name: &str) -> CallbackResult {
        Ok(())
    }
    fn on_local_name_subsection(
        &mut self,
        index: u32,
        name_type: u32,
        subsection_size: u32,
    ) -> CallbackResult {
        Ok(())
    }
    fn on_local_name_function_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_local_name_local_count(&mut self, func_index: u32, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_local_name(&mut self, func_index: u32, local_index: u32, name: &str) -> CallbackResult {
        Ok(())
    }
    fn end_names_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Reloc custom sections -----------------------------------------------

    fn begin_reloc_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    /// `section_name` is non-empty only when the target section is custom.
    fn on_reloc_count(
        &mut self,
        count: u32,
        section: SectionCode,
        section_name: &str,
    ) -> CallbackResult {
        Ok(())
    }
    fn on_reloc(
        &mut self,
        reloc_type: RelocType,
        offset: u32,
        index: u32,
        addend: i32,
    ) -> CallbackResult {
        Ok(())
    }
    fn end_reloc_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Linking custom section ----------------------------------------------

    fn begin_linking_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_stack_global(&mut self, global_index: u32) -> CallbackResult {
        Ok(())
    }
    fn on_symbol_info_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_symbol_info(&mut self, name: &str, flags: u32) -> CallbackResult {
        Ok(())
    }
    fn end_linking_section(&mut self) -> CallbackResult {
        Ok(())
    }

    // Exception custom section --------------------------------------------

    fn begin_exception_section(&mut self, size: u32) -> CallbackResult {
        Ok(())
    }
    fn on_exception_count(&mut self, count: u32) -> CallbackResult {
        Ok(())
    }
    fn on_exception_type(&mut self, index: u32, sig: &[ValueType]) -> CallbackResult {
        Ok(())
    }
    fn end_exception_section(&mut self) -> CallbackResult {
        Ok(())
    }
}

/// Discards every event. Useful for validation-only decoding and as the
/// inner delegate under a logging tee.
#[derive(Debug, Default)]
pub struct NopDelegate;

impl Delegate for NopDelegate {}
