use crate::arch::RegId;

/// Cortex-M core register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CortexMRegId {
    /// General purpose registers (R0-R12)
    Gpr(u8),
    /// Stack Pointer (R13)
    Sp,
    /// Link Register (R14)
    Lr,
    /// Program Counter (R15)
    Pc,
    /// Combined Program Status Register
    Xpsr,
}

impl RegId for CortexMRegId {
    fn from_raw_id(id: usize) -> Option<Self> {
        let reg = match id {
            0..=12 => Self::Gpr(id as u8),
            13 => Self::Sp,
            14 => Self::Lr,
            15 => Self::Pc,
            16 => Self::Xpsr,
            _ => return None,
        };
        Some(reg)
    }

    fn to_raw_id(self) -> usize {
        match self {
            Self::Gpr(n) => n as usize,
            Self::Sp => 13,
            Self::Lr => 14,
            Self::Pc => 15,
            Self::Xpsr => 16,
        }
    }
}
