//! `RegId` and block layouts for Cortex-M.

/// Cortex-M register identifiers.
pub mod id;

use id::CortexMRegId::{self, *};

/// Word order of the Cortex-M architecture data block.
///
/// Version 1 blocks stop after `Sp`; version 2 blocks append R4-R11.
pub const DATA_BLOCK_LAYOUT: &[CortexMRegId] = &[
    Gpr(0),
    Gpr(1),
    Gpr(2),
    Gpr(3),
    Gpr(12),
    Lr,
    Pc,
    Xpsr,
    Sp,
    Gpr(4),
    Gpr(5),
    Gpr(6),
    Gpr(7),
    Gpr(8),
    Gpr(9),
    Gpr(10),
    Gpr(11),
];

/// `g` packet order: R0-R12, SP, LR, PC, XPSR.
pub const GROUP_LAYOUT: &[CortexMRegId] = &[
    Gpr(0),
    Gpr(1),
    Gpr(2),
    Gpr(3),
    Gpr(4),
    Gpr(5),
    Gpr(6),
    Gpr(7),
    Gpr(8),
    Gpr(9),
    Gpr(10),
    Gpr(11),
    Gpr(12),
    Sp,
    Lr,
    Pc,
    Xpsr,
];
