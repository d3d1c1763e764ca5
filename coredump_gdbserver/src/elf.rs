use goblin::elf::section_header::SHT_PROGBITS;
use goblin::elf::sym::{STT_FUNC, STT_OBJECT};
use goblin::elf::Elf;
use log::debug;

use coredump_gdbstub::coredump::MemoryRegion;

use crate::DynResult;

/// The firmware image a core dump was taken from.
pub struct Firmware<'a> {
    elf: Elf<'a>,
    data: &'a [u8],
}

impl<'a> Firmware<'a> {
    pub fn parse(data: &'a [u8]) -> DynResult<Firmware<'a>> {
        let elf = Elf::parse(data)?;
        Ok(Firmware { elf, data })
    }

    /// Allocated, non-writable `PROGBITS` sections (code and constants).
    ///
    /// These never change at runtime, so they can stand in for memory the
    /// dump didn't capture.
    pub fn readonly_regions(&self) -> Vec<MemoryRegion> {
        self.elf
            .section_headers
            .iter()
            .filter(|h| h.sh_type == SHT_PROGBITS && h.is_alloc() && !h.is_writable())
            .filter_map(|h| {
                let data = self.data.get(h.file_range()?)?;
                let region = MemoryRegion::new(h.sh_addr, data.to_vec());
                debug!(
                    "serving section {} from [{:#010x}..{:#010x}]",
                    self.elf.shdr_strtab.get_at(h.sh_name).unwrap_or("?"),
                    region.start,
                    region.end(),
                );
                Some(region)
            })
            .collect()
    }

    /// Name of the function or object containing `addr`.
    pub fn symbolize(&self, addr: u64) -> Option<&str> {
        self.elf
            .syms
            .iter()
            .filter(|sym| matches!(sym.st_type(), STT_FUNC | STT_OBJECT))
            .find(|sym| symbol_contains(sym.st_value, sym.st_size, addr))
            .and_then(|sym| self.elf.strtab.get_at(sym.st_name))
    }
}

/// Whether a symbol at `value` spanning `size` bytes covers `addr`.
/// Zero-sized symbols cover their own address.
fn symbol_contains(value: u64, size: u64, addr: u64) -> bool {
    // thumb functions have bit 0 set
    let start = value & !1;
    addr >= start && addr - start < size.max(1)
}
