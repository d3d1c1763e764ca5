use crate::arch::RegId;

/// RISC-V register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiscvRegId {
    /// General Purpose Register (x0-x31).
    Gpr(u8),
    /// Program Counter.
    Pc,
}

#[allow(missing_docs)]
impl RiscvRegId {
    pub const ZERO: Self = Self::Gpr(0);
    pub const RA: Self = Self::Gpr(1);
    pub const SP: Self = Self::Gpr(2);
    pub const GP: Self = Self::Gpr(3);
    pub const TP: Self = Self::Gpr(4);
    pub const T0: Self = Self::Gpr(5);
    pub const T1: Self = Self::Gpr(6);
    pub const T2: Self = Self::Gpr(7);
    pub const A0: Self = Self::Gpr(10);
    pub const A1: Self = Self::Gpr(11);
    pub const A2: Self = Self::Gpr(12);
    pub const A3: Self = Self::Gpr(13);
    pub const A4: Self = Self::Gpr(14);
    pub const A5: Self = Self::Gpr(15);
    pub const A6: Self = Self::Gpr(16);
    pub const A7: Self = Self::Gpr(17);
    pub const T3: Self = Self::Gpr(28);
    pub const T4: Self = Self::Gpr(29);
    pub const T5: Self = Self::Gpr(30);
    pub const T6: Self = Self::Gpr(31);
}

impl RegId for RiscvRegId {
    fn from_raw_id(id: usize) -> Option<Self> {
        match id {
            0..=31 => Some(Self::Gpr(id as u8)),
            32 => Some(Self::Pc),
            _ => None,
        }
    }

    fn to_raw_id(self) -> usize {
        match self {
            Self::Gpr(n) => n as usize,
            Self::Pc => 32,
        }
    }
}
