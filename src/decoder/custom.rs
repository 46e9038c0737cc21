//! Custom section decoding: name, reloc.*, linking, and exception sections.
//!
//! Custom sections are dispatched by name. Unrecognized ones are skipped by
//! advancing to the section end; recognized ones decode framed subsections
//! under a tightened cursor bound, each of which must be consumed exactly.

use super::error::{DecodeError, ErrorKind};
use super::types::{
    LinkingEntryType, NameSubsection, RelocType, SectionCode, EXCEPTION_SECTION_NAME,
    LINKING_SECTION_NAME, NAME_SECTION_NAME, RELOC_SECTION_PREFIX,
};
use super::ModuleDecoder;

impl<'a, 'd> ModuleDecoder<'a, 'd> {
    pub(crate) fn read_custom_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        let name = self.cur.read_str("section name")?;
        callback!(self.begin_custom_section(section_size, name));

        // Names are only meaningful once the entities they name have been
        // counted, so require a section at or past Import first.
        let names_ok = self
            .last_known_section
            .is_some_and(|s| s >= SectionCode::Import);

        if self.read_debug_names && names_ok && name == NAME_SECTION_NAME {
            self.read_names_section(section_size)?;
        } else if name.starts_with(RELOC_SECTION_PREFIX) {
            self.read_reloc_section(section_size)?;
        } else if name == LINKING_SECTION_NAME {
            self.read_linking_section(section_size)?;
        } else if self.features.exceptions && name == EXCEPTION_SECTION_NAME {
            self.read_exception_section(section_size)?;
        } else {
            // Unknown custom section, skip it.
            let end = self.cur.bound();
            self.cur.skip_to(end);
        }
        callback!(self.end_custom_section());
        Ok(())
    }

    // Name section ---------------------------------------------------------

    fn read_names_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_names_section(section_size));
        let section_end = self.cur.bound();
        let mut i: u32 = 0;
        let mut previous_type: u32 = 0;

        while self.cur.pos() < section_end {
            let name_type = self.cur.read_u32_leb128("name type")?;
            if i != 0 {
                if name_type == previous_type {
                    return Err(self.fail(ErrorKind::SubsectionOrder, "duplicate sub-section"));
                }
                if name_type < previous_type {
                    return Err(self.fail(ErrorKind::SubsectionOrder, "out-of-order sub-section"));
                }
            }
            previous_type = name_type;

            let subsection_size = self.cur.read_u32_leb128("subsection size")?;
            let subsection_end = self.cur.pos() + subsection_size as usize;
            if subsection_end > section_end {
                return Err(self.fail(
                    ErrorKind::UnexpectedEof,
                    "invalid sub-section size: extends past end",
                ));
            }

            match NameSubsection::from_code(name_type) {
                Some(NameSubsection::Function) => {
                    callback!(self.on_function_name_subsection(i, name_type, subsection_size));
                    if subsection_size > 0 {
                        self.with_bound(subsection_end, |d| d.read_function_names())?;
                    }
                }
                Some(NameSubsection::Local) => {
                    callback!(self.on_local_name_subsection(i, name_type, subsection_size));
                    if subsection_size > 0 {
                        self.with_bound(subsection_end, |d| d.read_local_names())?;
                    }
                }
                None => {
                    // Unknown subsection, skip it.
                    self.cur.skip_to(subsection_end);
                }
            }

            if self.cur.pos() != subsection_end {
                return Err(self.fail(
                    ErrorKind::UnfinishedSubsection,
                    format!("unfinished sub-section (expected end: {subsection_end:#x})"),
                ));
            }
            i += 1;
        }
        callback!(self.end_names_section());
        Ok(())
    }

    fn read_function_names(&mut self) -> Result<(), DecodeError> {
        let num_names = self.cur.read_u32_leb128("name count")?;
        callback!(self.on_function_names_count(num_names));

        let mut last_function_index: Option<u32> = None;
        for _ in 0..num_names {
            let func_index = self.cur.read_u32_leb128("function index")?;
            if let Some(last) = last_function_index {
                if func_index == last {
                    return Err(self.fail(
                        ErrorKind::SubsectionOrder,
                        format!("duplicate function name: {func_index}"),
                    ));
                }
                if func_index < last {
                    return Err(self.fail(
                        ErrorKind::SubsectionOrder,
                        format!("function index out of order: {func_index}"),
                    ));
                }
            }
            last_function_index = Some(func_index);
            if func_index >= self.num_total_funcs() {
                return Err(self.fail(
                    ErrorKind::BadIndex,
                    format!("invalid function index: {func_index}"),
                ));
            }

            let name = self.cur.read_str("function name")?;
            callback!(self.on_function_name(func_index, name));
        }
        Ok(())
    }

    fn read_local_names(&mut self) -> Result<(), DecodeError> {
        let num_funcs = self.cur.read_u32_leb128("function count")?;
        callback!(self.on_local_name_function_count(num_funcs));

        let mut last_function_index: Option<u32> = None;
        for _ in 0..num_funcs {
            let func_index = self.cur.read_u32_leb128("function index")?;
            if func_index >= self.num_total_funcs() {
                return Err(self.fail(
                    ErrorKind::BadIndex,
                    format!("invalid function index: {func_index}"),
                ));
            }
            if let Some(last) = last_function_index {
                if func_index <= last {
                    return Err(self.fail(
                        ErrorKind::SubsectionOrder,
                        format!("locals function index out of order: {func_index}"),
                    ));
                }
            }
            last_function_index = Some(func_index);

            let num_locals = self.cur.read_u32_leb128("local count")?;
            callback!(self.on_local_name_local_count(func_index, num_locals));

            let mut last_local_index: Option<u32> = None;
            for _ in 0..num_locals {
                let local_index = self.cur.read_u32_leb128("named index")?;
                if let Some(last) = last_local_index {
                    if local_index == last {
                        return Err(self.fail(
                            ErrorKind::SubsectionOrder,
                            format!("duplicate local index: {local_index}"),
                        ));
                    }
                    if local_index < last {
                        return Err(self.fail(
                            ErrorKind::SubsectionOrder,
                            format!("local index out of order: {local_index}"),
                        ));
                    }
                }
                last_local_index = Some(local_index);

                let name = self.cur.read_str("name")?;
                callback!(self.on_local_name(func_index, local_index, name));
            }
        }
        Ok(())
    }

    // Reloc sections ---------------------------------------------------------

    fn read_reloc_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_reloc_section(section_size));

        let section_code = self.cur.read_u32_leb128("section")?;
        let section = SectionCode::from_code(section_code).ok_or_else(|| {
            self.fail(
                ErrorKind::SectionOrder,
                format!("invalid reloc target section: {section_code}"),
            )
        })?;
        let mut section_name = "";
        if section == SectionCode::Custom {
            section_name = self.cur.read_str("section name")?;
        }

        let num_relocs = self.cur.read_u32_leb128("relocation count")?;
        callback!(self.on_reloc_count(num_relocs, section, section_name));

        for _ in 0..num_relocs {
            let reloc_code = self.cur.read_u32_leb128("relocation type")?;
            let offset = self.cur.read_u32_leb128("offset")?;
            let index = self.cur.read_u32_leb128("index")?;
            let reloc_type = RelocType::from_code(reloc_code).ok_or_else(|| {
                self.fail(
                    ErrorKind::BadType,
                    format!("invalid reloc type: {reloc_code}"),
                )
            })?;
            let mut addend = 0;
            if reloc_type.has_addend() {
                addend = self.cur.read_i32_leb128("addend")?;
            }
            callback!(self.on_reloc(reloc_type, offset, index, addend));
        }
        callback!(self.end_reloc_section());
        Ok(())
    }

    // Linking section --------------------------------------------------------

    fn read_linking_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_linking_section(section_size));
        let section_end = self.cur.bound();

        while self.cur.pos() < section_end {
            let linking_type = self.cur.read_u32_leb128("type")?;
            let subsection_size = self.cur.read_u32_leb128("subsection size")?;
            let subsection_end = self.cur.pos() + subsection_size as usize;
            if subsection_end > section_end {
                return Err(self.fail(
                    ErrorKind::UnexpectedEof,
                    "invalid sub-section size: extends past end",
                ));
            }

            match LinkingEntryType::from_code(linking_type) {
                Some(LinkingEntryType::StackPointer) => {
                    self.with_bound(subsection_end, |d| {
                        let stack_ptr = d.cur.read_u32_leb128("stack pointer index")?;
                        callback!(d.on_stack_global(stack_ptr));
                        Ok(())
                    })?;
                }
                Some(LinkingEntryType::SymbolInfo) => {
                    self.with_bound(subsection_end, |d| {
                        let info_count = d.cur.read_u32_leb128("info count")?;
                        callback!(d.on_symbol_info_count(info_count));
                        for _ in 0..info_count {
                            let name = d.cur.read_str("symbol name")?;
                            let flags = d.cur.read_u32_leb128("sym flags")?;
                            callback!(d.on_symbol_info(name, flags));
                        }
                        Ok(())
                    })?;
                }
                None => {
                    // Unknown subsection, skip it.
                    self.cur.skip_to(subsection_end);
                }
            }

            if self.cur.pos() != subsection_end {
                return Err(self.fail(
                    ErrorKind::UnfinishedSubsection,
                    format!("unfinished sub-section (expected end: {subsection_end:#x})"),
                ));
            }
        }
        callback!(self.end_linking_section());
        Ok(())
    }

    // Exception section ------------------------------------------------------

    /// Reads an exception signature into the shared scratch vector: a count
    /// followed by that many concrete value types. Also used for exception
    /// imports.
    pub(crate) fn read_exception_type(&mut self) -> Result<(), DecodeError> {
        let num_values = self.cur.read_u32_leb128("exception type count")?;
        self.sig_types.clear();
        for _ in 0..num_values {
            let value_type = self.cur.read_type("exception value type")?;
            if !value_type.is_concrete() {
                return Err(self.fail(
                    ErrorKind::BadType,
                    format!("expected valid exception value type (got {value_type})"),
                ));
            }
            self.sig_types.push(value_type);
        }
        Ok(())
    }

    fn read_exception_section(&mut self, section_size: u32) -> Result<(), DecodeError> {
        callback!(self.begin_exception_section(section_size));
        let count = self.cur.read_u32_leb128("exception count")?;
        self.num_exceptions = count;
        callback!(self.on_exception_count(count));

        for i in 0..self.num_exceptions {
            self.read_exception_type()?;
            callback!(self.on_exception_type(i, &self.sig_types));
        }

        callback!(self.end_exception_section());
        Ok(())
    }
}
