//! `RegId` and block layouts for RISC-V.

/// RISC-V register identifiers.
pub mod id;

use id::RiscvRegId;

/// Word order of the RISC-V architecture data block.
///
/// Only the caller-saved registers are captured. Version 2 blocks append SP.
pub const DATA_BLOCK_LAYOUT: &[RiscvRegId] = &[
    RiscvRegId::RA,
    RiscvRegId::TP,
    RiscvRegId::T0,
    RiscvRegId::T1,
    RiscvRegId::T2,
    RiscvRegId::A0,
    RiscvRegId::A1,
    RiscvRegId::A2,
    RiscvRegId::A3,
    RiscvRegId::A4,
    RiscvRegId::A5,
    RiscvRegId::A6,
    RiscvRegId::A7,
    RiscvRegId::T3,
    RiscvRegId::T4,
    RiscvRegId::T5,
    RiscvRegId::T6,
    RiscvRegId::Pc,
    RiscvRegId::SP,
];

macro_rules! group_layout {
    ($($n:literal)*) => {
        /// `g` packet order: x0-x31, PC.
        pub const GROUP_LAYOUT: &[RiscvRegId] = &[$(RiscvRegId::Gpr($n),)* RiscvRegId::Pc];
    };
}

group_layout!(0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31);
