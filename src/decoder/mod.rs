//! Streaming decoder for the WebAssembly binary module format.
//!
//! [`decode_module`] walks a fully-resident module buffer and pushes a
//! strictly ordered event stream into a [`Delegate`]. No module structure is
//! retained; every decoded field either becomes a delegate event or feeds
//! the running validation state (entity counters, section ordering).
//!
//! Layout of this module tree:
//!
//! - [`cursor`] -- bounded byte cursor with section framing
//! - [`leb128`] -- variable-length integer decoding
//! - [`types`] -- wire-level enums and constants
//! - [`opcode`] -- opcode table and feature gating
//! - [`delegate`] -- the event consumer trait
//! - [`logging`] -- tee adapter that traces events to a sink
//! - `expr` / `custom` -- instruction streams and custom sections, decoded
//!   by the same [`ModuleDecoder`] defined here

use std::io;

// Invokes a delegate callback, converting a callback error into a decode
// failure naming the callback.
macro_rules! callback {
    ($self:ident . $name:ident ( $($arg:expr),* $(,)? )) => {
        if $self.delegate.$name($($arg),*).is_err() {
            return Err($self.callback_failed(stringify!($name)));
        }
    };
}

pub mod cursor;
pub mod delegate;
pub mod error;
pub mod features;
pub mod leb128;
pub mod limits;
pub mod logging;
pub mod opcode;
pub mod types;

mod custom;
mod expr;

use cursor::Cursor;
use delegate::Delegate;
use error::{DecodeError, ErrorKind};
use features::Features;
use logging::LoggingDelegate;
use types::{
    ExternalKind, Limits, SectionCode, ValueType, LIMITS_HAS_MAX_FLAG, MODULE_MAGIC,
    MODULE_VERSION,
};

/// Options accepted by [`decode_module`].
#[derive(Default)]
pub struct DecodeOptions<'a> {
    /// Decode "name" custom sections instead of skipping them.
    pub read_debug_names: bool,
    /// Gated opcode families and sections to accept.
    pub features: Features,
    /// When set, a [`LoggingDelegate`] wraps the caller's delegate and
    /// traces every event to this sink.
    pub log: Option<&'a mut dyn io::Write>,
}

/// Decodes an entire module, driving `delegate` with its contents.
///
/// The buffer must hold exactly one complete module. All errors are
/// terminal; the rendered diagnostic is routed through the delegate's
/// `on_error` before the error is returned, and printed to stderr if the
/// delegate does not claim it.
pub fn decode_module(
    data: &[u8],
    delegate: &mut dyn Delegate,
    options: DecodeOptions<'_>,
) -> Result<(), DecodeError> {
    let DecodeOptions {
        read_debug_names,
        features,
        log,
    } = options;

    match log {
        Some(sink) => {
            let mut logging = LoggingDelegate::new(sink, delegate);
            run(data, &mut logging, read_debug_names, features)
        }
        None => run(data, delegate, read_debug_names, features),
    }
}

fn run(
    data: &[u8],
    delegate: &mut dyn Delegate,
    read_debug_names: bool,
    features: Features,
) -> Result<(), DecodeError> {
    let mut decoder = ModuleDecoder::new(data, delegate, read_debug_names, features);
    match decoder.read_module() {
        Ok(()) => Ok(()),
        Err(err) => {
            let handled = decoder.delegate.on_error(err.offset, &err.message);
            if !handled {
                eprintln!("*ERROR*: @{:#010x}: {}", err.offset, err.message);
            }
            Err(err)
        }
    }
}

/// Decode state for a single module. Lives exactly as long as one
/// [`decode_module`] call.
pub(crate) struct ModuleDecoder<'a, 'd> {
    pub(crate) cur: Cursor<'a>,
    pub(crate) delegate: &'d mut dyn Delegate,
    pub(crate) read_debug_names: bool,
    pub(crate) features: Features,

    pub(crate) last_known_section: Option<SectionCode>,

    // Running entity totals. Index bounds are always checked against
    // imports-of-kind + declared-of-kind at the time of reference.
    pub(crate) num_signatures: u32,
    pub(crate) num_func_imports: u32,
    pub(crate) num_table_imports: u32,
    pub(crate) num_memory_imports: u32,
    pub(crate) num_global_imports: u32,
    pub(crate) num_exception_imports: u32,
    pub(crate) num_function_signatures: u32,
    pub(crate) num_tables: u32,
    pub(crate) num_memories: u32,
    pub(crate) num_globals: u32,
    pub(crate) num_function_bodies: u32,
    pub(crate) num_exceptions: u32,

    // Scratch reused across entries; no per-entry allocation.
    pub(crate) sig_types: Vec<ValueType>,
    pub(crate) target_depths: Vec<u32>,
}

impl<'a, 'd> ModuleDecoder<'a, 'd> {
    fn new(
        data: &'a [u8],
        delegate: &'d mut dyn Delegate,
        read_debug_names: bool,
        features: Features,
    ) -> ModuleDecoder<'a, 'd> {
        ModuleDecoder {
            cur: Cursor::new(data),
            delegate,
            read_debug_names,
            features,
            last_known_section: None,
            num_signatures: 0,
            num_func_imports: 0,
            num_table_imports: 0,
            num_memory_imports: 0,
            num_global_imports: 0,
            num_exception_imports: 0,
            num_function_signatures: 0,
            num_tables: 0,
            num_memories: 0,
            num_globals: 0,
            num_function_bodies: 0,
            num_exceptions: 0,
            sig_types: Vec::new(),
            target_depths: Vec::new(),
        }
    }

    pub(crate) fn callback_failed(&self, name: &'static str) -> DecodeError {
        DecodeError::new(
            ErrorKind::CallbackFailure,
            self.cur.pos(),
            format!("{name} callback failed"),
        )
    }

    pub(crate) fn fail(&self, kind: ErrorKind, message: impl Into<String>) -> DecodeError {
        DecodeError::new(kind, self.cur.pos(), message)
    }

    pub(crate) fn num_total_funcs(&self) -> u32 {
        self.num_func_imports + self.num_function_signatures
    }

    fn num_total_tables(&self) -> u32 {
        self.num_table_imports + self.num_tables
    }

    fn num_total_memories(&self) -> u32 {
        self.num_memory_imports + self.num_memories
    }

    fn num_total_globals(&self) -> u32 {
        self.num_global_imports + self.num_globals
    }

    /// Runs `f` with the cursor's framing bound tightened to `end`,
    /// restoring the prior bound on every exit path.
    pub(crate) fn with_bound<T>(
        &mut self,
        end: usize,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let previous = self.cur.bound();
        self.cur.set_bound(end);
        let result = f(self);
        self.cur.set_bound(previous);
        result
    }

    // Module ---------------------------------------------------------------

    fn read_module(&mut self) -> Result<(), DecodeError> {
        let magic = self.cur.read_u32_le("magic")?;
        if magic != MODULE_MAGIC {
            return Err(self.fail(
                ErrorKind::BadMagic,
                format!("bad magic value {magic:#010x}"),
            ));
        }
        let version = self.cur.read_u32_le("version")?;
        if version != MODULE_VERSION {
            return Err(self.fail(
                ErrorKind::BadVersion,
                format!("bad wasm file version: {version:#x} (expected {MODULE_VERSION:#x})"),
            ));
        }

        callback!(self.begin_module(version));
        self.read_sections()?;
        callback!(self.end_module());
        Ok(())
    }

    fn read_sections(&mut self) -> Result<(), DecodeError> {
        while self.cur.pos() < self.cur.size() {
            // The section header itself is framed by the module end.
            let module_end = self.cur.size();
            self.cur.set_bound(module_end);

            let section_code = self.cur.read_u32_leb128("section code")?;
            let section_size = self.cur.read_u32_leb128("section size")?;
            let read_end = self.cur.pos() + section_size as usize;

            let section = SectionCode::from_code(section_code).ok_or_else(|| {
                self.fail(
                    ErrorKind::SectionOrder,
                    format!(
                        "invalid section code: {section_code}; max is {}",
                        SectionCode::COUNT - 1
                    ),
                )
            })?;

            if read_end > module_end {
                return Err(self.fail(
                    ErrorKind::UnexpectedEof,
                    "invalid section size: extends past end",
                ));
            }

            if section != SectionCode::Custom {
                if let Some(last) = self.last_known_section {
                    if section <= last {
                        return Err(self.fail(
                            ErrorKind::SectionOrder,
                            format!("section {} out of order", section.name()),
                        ));
                    }
                }
            }

            self.cur.set_bound(read_end);
            callback!(self.begin_section(section, section_size));

            match section {
                SectionCode::Custom => self.read_custom_section(section_size)?,
                SectionCode::Type => self.read_type_section(section_size)?,
                SectionCode::Import => self.read_import_section(section_size)?,
                SectionCode::Function => self.read_function_section(section_size)?,
                SectionCode::Table => self.read_table_section(section_size)?,
                SectionCode::Memory => self.read_memory_section(section_size)?,
                SectionCode::Global => self.read_global_section(section_size)?,
                SectionCode::Export => self.read_export_section(section_size)?,
                SectionCode::Start => self.read_start_section(section_size)?,
                SectionCode::Elem => self.read_elem_section(section_size)?,
                SectionCode::Code => self.read_code_section(section_size)?,
                SectionCode::Data => self.read_data_section(section_size)?,
            }

            if self.cur.pos() != read_end {
                return Err(self.fail(
                    ErrorKind::UnfinishedSection,
                    format!("unfinished section (expected end: {read_end:#x})"),
                ));
            }

            if section != SectionCode::Custom {
                self.last_known_section = Some(section);
            }
        }
        Ok(())
    }

    // Shared entry readers -------------------------------------------------

    /// Reads an inline block signature: a concrete value type, or None for
    /// void.
    pub(crate) fn read_inline_signature(
        &mut self,
        context: &'static str,
    ) -> Result<Option<ValueType>, DecodeError> {
        let sig_type = self.cur.read_type(context)?;
        if !sig_type.is_inline_signature() {
            return Err(self.fail(ErrorKind::BadType, "expected valid block signature type"));
        }
        Ok(if sig_type == ValueType::Void {
            None
        } else {
            Some(sig_type)
        })
    }

    fn read_table_entry(&mut self) -> Result<(ValueType, Limits), DecodeError> {
        let elem_type = self.cur.read_type("table elem type")?;
        if elem_type != ValueType::Anyfunc {
            return Err(self.fail(ErrorKind::BadType, "table elem type must be anyfunc"));
        }

        let flags = self.cur.read_u32_leb128("table flags")?;
        let initial = self.cur.read_u32_leb128("table initial elem count")?;
        let has_max = flags & LIMITS_HAS_MAX_FLAG != 0;
        let mut max = 0;
        if has_max {
            max = self.cur.read_u32_leb128("table max elem count")?;
            if initial > max {
                return Err(self.fail(
                    ErrorKind::BadLimits,
                    "table initial elem count must be <= max elem count",
                ));
            }
        }
        Ok((elem_type, Limits { has_max, initial, max }))
    }

    fn read_memory_entry(&mut self) -> Result<Limits, DecodeError> {
        let flags = self.cur.read_u32_leb128("memory flags")?;
        let initial = self.cur.read_u32_leb128("memory initial page count")?;
        let has_max = flags & LIMITS_HAS_MAX_FLAG != 0;
        if initial > limits::MAX_MEMORY_PAGES {
            return Err(self.fail(ErrorKind::BadLimits, "invalid memory initial size"));
        }
        let mut max = 0;
        if has_max {
            max = self.cur.read_u32_leb128("memory max page count")?;
            if max > limits::MAX_MEMORY_PAGES {
                return Err(self.fail(ErrorKind::BadLimits, "invalid memory max size"));
            }
            if initial > max {
                return Err(self.fail(
                    ErrorKind::BadLimits,
                    "memory initial size must be <= max size",
                ));
            }
        }
        Ok(Limits { has_max, initial, max })
    }

    fn read_global_header(&mut self) -> Result<(ValueType, bool), DecodeError> {
        let global_type = self.cur.read_type("global type")?;
        if !global_type.is_concrete() {
            return Err(self.fail(
                ErrorKind::BadType,
                format!("invalid global type: {global_type}"),
            ));
        }

        let mutable = self.cur.read_u8("global mutability")?;
        if mutable > 1 {
            return Err(self.fail(ErrorKind::BadType, "global mutability must be 0 or 1"));
        }
        Ok((global_type, mutable == 1))
    }

    // Standard sections ----------------------------------------------------

    fn read_type_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_type_section(section_size));
        let count = self.cur.read_u32_leb128("type count")?;
        self.num_signatures = count;
        callback!(self.on_type_count(count));

        for i in 0..count {
            let form = self.cur.read_type("type form")?;
            if form != ValueType::Func {
                return Err(self.fail(
                    ErrorKind::BadType,
                    format!("unexpected type form: {form}"),
                ));
            }

            let num_params = self.cur.read_u32_leb128("function param count")?;
            self.sig_types.clear();
            for _ in 0..num_params {
                let param_type = self.cur.read_type("function param type")?;
                if !param_type.is_concrete() {
                    return Err(self.fail(
                        ErrorKind::BadType,
                        format!("expected valid param type (got {param_type})"),
                    ));
                }
                self.sig_types.push(param_type);
            }

            let num_results = self.cur.read_u32_leb128("function result count")?;
            if num_results > 1 {
                return Err(self.fail(ErrorKind::BadType, "result count must be 0 or 1"));
            }

            let mut result_types = [ValueType::Void; 1];
            let results: &[ValueType] = if num_results == 1 {
                let result_type = self.cur.read_type("function result type")?;
                if !result_type.is_concrete() {
                    return Err(self.fail(
                        ErrorKind::BadType,
                        format!("expected valid result type: {result_type}"),
                    ));
                }
                result_types[0] = result_type;
                &result_types
            } else {
                &[]
            };

            callback!(self.on_type(i, &self.sig_types, results));
        }
        callback!(self.end_type_section());
        Ok(())
    }

    fn read_import_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_import_section(section_size));
        let count = self.cur.read_u32_leb128("import count")?;
        callback!(self.on_import_count(count));

        for i in 0..count {
            let module = self.cur.read_str("import module name")?;
            let field = self.cur.read_str("import field name")?;

            let kind = self.cur.read_u32_leb128("import kind")?;
            match ExternalKind::from_code(kind) {
                Some(ExternalKind::Func) => {
                    let sig_index = self.cur.read_u32_leb128("import signature index")?;
                    if sig_index >= self.num_signatures {
                        return Err(
                            self.fail(ErrorKind::BadIndex, "invalid import signature index")
                        );
                    }
                    callback!(self.on_import(i, module, field));
                    callback!(self.on_import_func(i, module, field, self.num_func_imports, sig_index));
                    self.num_func_imports += 1;
                }
                Some(ExternalKind::Table) => {
                    let (elem_type, elem_limits) = self.read_table_entry()?;
                    callback!(self.on_import(i, module, field));
                    callback!(self.on_import_table(
                        i,
                        module,
                        field,
                        self.num_table_imports,
                        elem_type,
                        &elem_limits,
                    ));
                    self.num_table_imports += 1;
                }
                Some(ExternalKind::Memory) => {
                    let page_limits = self.read_memory_entry()?;
                    callback!(self.on_import(i, module, field));
                    callback!(self.on_import_memory(
                        i,
                        module,
                        field,
                        self.num_memory_imports,
                        &page_limits,
                    ));
                    self.num_memory_imports += 1;
                }
                Some(ExternalKind::Global) => {
                    let (global_type, mutable) = self.read_global_header()?;
                    callback!(self.on_import(i, module, field));
                    callback!(self.on_import_global(
                        i,
                        module,
                        field,
                        self.num_global_imports,
                        global_type,
                        mutable,
                    ));
                    self.num_global_imports += 1;
                }
                Some(ExternalKind::Except) => {
                    if !self.features.exceptions {
                        return Err(self.fail(
                            ErrorKind::BadType,
                            "invalid import exception kind: exceptions not allowed",
                        ));
                    }
                    self.read_exception_type()?;
                    callback!(self.on_import(i, module, field));
                    callback!(self.on_import_exception(
                        i,
                        module,
                        field,
                        self.num_exception_imports,
                        &self.sig_types,
                    ));
                    self.num_exception_imports += 1;
                }
                None => {
                    return Err(
                        self.fail(ErrorKind::BadType, format!("invalid import kind: {kind}"))
                    );
                }
            }
        }
        callback!(self.end_import_section());
        Ok(())
    }

    fn read_function_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_function_section(section_size));
        let count = self.cur.read_u32_leb128("function signature count")?;
        self.num_function_signatures = count;
        callback!(self.on_function_count(count));

        for i in 0..count {
            let func_index = self.num_func_imports + i;
            let sig_index = self.cur.read_u32_leb128("function signature index")?;
            if sig_index >= self.num_signatures {
                return Err(self.fail(
                    ErrorKind::BadIndex,
                    format!("invalid function signature index: {sig_index}"),
                ));
            }
            callback!(self.on_function(func_index, sig_index));
        }
        callback!(self.end_function_section());
        Ok(())
    }

    fn read_table_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_table_section(section_size));
        let count = self.cur.read_u32_leb128("table count")?;
        if count > 1 {
            return Err(self.fail(
                ErrorKind::BadLimits,
                format!("table count ({count}) must be 0 or 1"),
            ));
        }
        self.num_tables = count;
        callback!(self.on_table_count(count));

        for i in 0..count {
            let table_index = self.num_table_imports + i;
            let (elem_type, elem_limits) = self.read_table_entry()?;
            callback!(self.on_table(table_index, elem_type, &elem_limits));
        }
        callback!(self.end_table_section());
        Ok(())
    }

    fn read_memory_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_memory_section(section_size));
        let count = self.cur.read_u32_leb128("memory count")?;
        if count > 1 {
            return Err(self.fail(ErrorKind::BadLimits, "memory count must be 0 or 1"));
        }
        self.num_memories = count;
        callback!(self.on_memory_count(count));

        for i in 0..count {
            let memory_index = self.num_memory_imports + i;
            let page_limits = self.read_memory_entry()?;
            callback!(self.on_memory(memory_index, &page_limits));
        }
        callback!(self.end_memory_section());
        Ok(())
    }

    fn read_global_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_global_section(section_size));
        let count = self.cur.read_u32_leb128("global count")?;
        self.num_globals = count;
        callback!(self.on_global_count(count));

        for i in 0..count {
            let global_index = self.num_global_imports + i;
            let (global_type, mutable) = self.read_global_header()?;
            callback!(self.begin_global(global_index, global_type, mutable));
            callback!(self.begin_global_init_expr(global_index));
            self.read_init_expr(global_index)?;
            callback!(self.end_global_init_expr(global_index));
            callback!(self.end_global(global_index));
        }
        callback!(self.end_global_section());
        Ok(())
    }

    fn read_export_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_export_section(section_size));
        let count = self.cur.read_u32_leb128("export count")?;
        callback!(self.on_export_count(count));

        for i in 0..count {
            let name = self.cur.read_str("export item name")?;

            let kind_byte = self.cur.read_u8("export external kind")?;
            let kind = ExternalKind::from_code(u32::from(kind_byte)).ok_or_else(|| {
                self.fail(
                    ErrorKind::BadType,
                    format!("invalid export external kind: {kind_byte}"),
                )
            })?;

            let item_index = self.cur.read_u32_leb128("export item index")?;
            match kind {
                ExternalKind::Func => {
                    if item_index >= self.num_total_funcs() {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            format!("invalid export func index: {item_index}"),
                        ));
                    }
                }
                ExternalKind::Table => {
                    if item_index >= self.num_total_tables() {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            format!("invalid export table index: {item_index}"),
                        ));
                    }
                }
                ExternalKind::Memory => {
                    if item_index >= self.num_total_memories() {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            format!("invalid export memory index: {item_index}"),
                        ));
                    }
                }
                ExternalKind::Global => {
                    if item_index >= self.num_total_globals() {
                        return Err(self.fail(
                            ErrorKind::BadIndex,
                            format!("invalid export global index: {item_index}"),
                        ));
                    }
                }
                ExternalKind::Except => {
                    // The exception section comes later, so the index bound
                    // can not be checked here.
                    if !self.features.exceptions {
                        return Err(self.fail(
                            ErrorKind::BadType,
                            "invalid export exception kind: exceptions not allowed",
                        ));
                    }
                }
            }

            callback!(self.on_export(i, kind, item_index, name));
        }
        callback!(self.end_export_section());
        Ok(())
    }

    fn read_start_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_start_section(section_size));
        let func_index = self.cur.read_u32_leb128("start function index")?;
        if func_index >= self.num_total_funcs() {
            return Err(self.fail(
                ErrorKind::BadIndex,
                format!("invalid start function index: {func_index}"),
            ));
        }
        callback!(self.on_start_function(func_index));
        callback!(self.end_start_section());
        Ok(())
    }

    fn read_elem_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_elem_section(section_size));
        let count = self.cur.read_u32_leb128("elem segment count")?;
        callback!(self.on_elem_segment_count(count));
        if count > 0 && self.num_total_tables() == 0 {
            return Err(self.fail(ErrorKind::BadIndex, "elem section without table section"));
        }

        for i in 0..count {
            let table_index = self.cur.read_u32_leb128("elem segment table index")?;
            callback!(self.begin_elem_segment(i, table_index));
            callback!(self.begin_elem_segment_init_expr(i));
            self.read_init_expr(i)?;
            callback!(self.end_elem_segment_init_expr(i));

            let num_function_indexes = self
                .cur
                .read_u32_leb128("elem segment function index count")?;
            callback!(self.on_elem_segment_function_index_count(i, num_function_indexes));
            for _ in 0..num_function_indexes {
                let func_index = self.cur.read_u32_leb128("elem segment function index")?;
                callback!(self.on_elem_segment_function_index(i, func_index));
            }
            callback!(self.end_elem_segment(i));
        }
        callback!(self.end_elem_section());
        Ok(())
    }

    fn read_code_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_code_section(section_size));
        let count = self.cur.read_u32_leb128("function body count")?;
        if count != self.num_function_signatures {
            return Err(self.fail(
                ErrorKind::BadIndex,
                "function signature count != function body count",
            ));
        }
        self.num_function_bodies = count;
        callback!(self.on_function_body_count(count));

        for i in 0..self.num_function_bodies {
            let func_index = self.num_func_imports + i;
            callback!(self.begin_function_body(func_index));
            let body_size = self.cur.read_u32_leb128("function body size")?;
            let end_offset = self.cur.pos() + body_size as usize;

            let num_local_decls = self.cur.read_u32_leb128("local declaration count")?;
            callback!(self.on_local_decl_count(num_local_decls));
            for k in 0..num_local_decls {
                let num_local_types = self.cur.read_u32_leb128("local type count")?;
                let local_type = self.cur.read_type("local type")?;
                if !local_type.is_concrete() {
                    return Err(self.fail(ErrorKind::BadType, "expected valid local type"));
                }
                callback!(self.on_local_decl(k, num_local_types, local_type));
            }

            self.read_function_body(end_offset)?;

            callback!(self.end_function_body(func_index));
        }
        callback!(self.end_code_section());
        Ok(())
    }

    fn read_data_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_data_section(section_size));
        let count = self.cur.read_u32_leb128("data segment count")?;
        callback!(self.on_data_segment_count(count));
        if count > 0 && self.num_total_memories() == 0 {
            return Err(self.fail(ErrorKind::BadIndex, "data section without memory section"));
        }

        for i in 0..count {
            let memory_index = self.cur.read_u32_leb128("data segment memory index")?;
            callback!(self.begin_data_segment(i, memory_index));
            callback!(self.begin_data_segment_init_expr(i));
            self.read_init_expr(i)?;
            callback!(self.end_data_segment_init_expr(i));

            let data = self.cur.read_len_bytes("data segment data")?;
            callback!(self.on_data_segment_data(i, data));
            callback!(self.end_data_segment(i));
        }
        callback!(self.end_data_section());
        Ok(())
    }
}
