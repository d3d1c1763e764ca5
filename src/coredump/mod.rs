//! The post-mortem data a [`Session`](crate::Session) is served from.
//!
//! A core dump is modeled by the [`CoreDump`] trait, which exposes the raw
//! architecture data block (decoded later by an [`Arch`](crate::arch::Arch)),
//! the captured memory regions, and optionally the signal the target died
//! with. [`zephyr`] implements it for Zephyr RTOS coredump logs.

use alloc::vec::Vec;

pub mod zephyr;

/// A read-only source of post-mortem target state.
pub trait CoreDump {
    /// The raw architecture data block, exactly as stored in the dump.
    fn arch_data(&self) -> &[u8];

    /// Memory captured at the moment of fault, in dump order.
    fn memory_regions(&self) -> &[MemoryRegion];

    /// The signal the target stopped with, if the container records one.
    fn signal(&self) -> Option<crate::common::Signal> {
        None
    }
}

impl<D: CoreDump + ?Sized> CoreDump for &D {
    fn arch_data(&self) -> &[u8] {
        (**self).arch_data()
    }

    fn memory_regions(&self) -> &[MemoryRegion] {
        (**self).memory_regions()
    }

    fn signal(&self) -> Option<crate::common::Signal> {
        (**self).signal()
    }
}

/// A contiguous run of target memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Target address of `data[0]`.
    pub start: u64,
    /// Memory contents.
    pub data: Vec<u8>,
}

impl MemoryRegion {
    /// Create a new region starting at `start`.
    pub fn new(start: u64, data: Vec<u8>) -> MemoryRegion {
        MemoryRegion { start, data }
    }

    /// One past the last address of the region.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.data.len() as u64)
    }

    /// Returns the bytes at `[addr, addr + len)` if the range lies entirely
    /// within this region.
    pub fn slice(&self, addr: u64, len: usize) -> Option<&[u8]> {
        let offset = addr.checked_sub(self.start)?;
        let end = offset.checked_add(len as u64)?;
        if end > self.data.len() as u64 {
            return None;
        }
        self.data.get(offset as usize..end as usize)
    }
}
