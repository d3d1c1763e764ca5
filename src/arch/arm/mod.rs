//! Implementations for ARM M-profile (Cortex-M) targets.

use crate::arch::Arch;
use crate::common::Signal;

pub mod reg;

/// Implements `Arch` for ARMv6-M / ARMv7-M / ARMv8-M (Cortex-M) targets.
///
/// The architecture data block holds the exception stack frame pushed by
/// the hardware on fault entry (R0-R3, R12, LR, PC, XPSR), followed by the
/// pre-exception SP and, from block version 2 onward, the callee-saved
/// registers R4-R11.
pub enum ArmCortexM {}

impl Arch for ArmCortexM {
    type Usize = u32;
    type RegId = reg::id::CortexMRegId;

    const DATA_BLOCK_LAYOUT: &'static [Self::RegId] = reg::DATA_BLOCK_LAYOUT;
    const GROUP_LAYOUT: &'static [Self::RegId] = reg::GROUP_LAYOUT;
    const DEFAULT_SIGNAL: Signal = Signal::SIGEMT;
}
