//! Implementations for RISC-V architectures.

use crate::arch::Arch;
use crate::common::Signal;

pub mod reg;

/// Implements `Arch` for 32-bit RISC-V.
pub enum Riscv32 {}

impl Arch for Riscv32 {
    type Usize = u32;
    type RegId = reg::id::RiscvRegId;

    const DATA_BLOCK_LAYOUT: &'static [Self::RegId] = reg::DATA_BLOCK_LAYOUT;
    const GROUP_LAYOUT: &'static [Self::RegId] = reg::GROUP_LAYOUT;
    const DEFAULT_SIGNAL: Signal = Signal::SIGEMT;
}
