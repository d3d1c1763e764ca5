use core::fmt;

/// Target architecture recorded in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCode {
    /// 32-bit x86
    X86,
    /// x86_64
    X86_64,
    /// ARM Cortex-M
    ArmCortexM,
    /// RISC-V
    Riscv,
    /// Xtensa
    Xtensa,
    /// 64-bit ARM
    Arm64,
    /// Code 0, or any code this crate doesn't know about.
    Unknown(u16),
}

impl From<u16> for TargetCode {
    fn from(code: u16) -> TargetCode {
        match code {
            1 => TargetCode::X86,
            2 => TargetCode::X86_64,
            3 => TargetCode::ArmCortexM,
            4 => TargetCode::Riscv,
            5 => TargetCode::Xtensa,
            6 => TargetCode::Arm64,
            other => TargetCode::Unknown(other),
        }
    }
}

impl fmt::Display for TargetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetCode::X86 => write!(f, "x86"),
            TargetCode::X86_64 => write!(f, "x86_64"),
            TargetCode::ArmCortexM => write!(f, "ARM Cortex-M"),
            TargetCode::Riscv => write!(f, "RISC-V"),
            TargetCode::Xtensa => write!(f, "Xtensa"),
            TargetCode::Arm64 => write!(f, "ARM64"),
            TargetCode::Unknown(code) => write!(f, "unknown target ({})", code),
        }
    }
}

/// Why the kernel took the coredump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// `K_ERR_CPU_EXCEPTION`
    CpuException,
    /// `K_ERR_SPURIOUS_IRQ`
    SpuriousIrq,
    /// `K_ERR_STACK_CHK_FAIL`
    StackCheckFail,
    /// `K_ERR_KERNEL_OOPS`
    KernelOops,
    /// `K_ERR_KERNEL_PANIC`
    KernelPanic,
    /// Architecture-specific reason code.
    Other(u32),
}

impl From<u32> for FatalReason {
    fn from(code: u32) -> FatalReason {
        match code {
            0 => FatalReason::CpuException,
            1 => FatalReason::SpuriousIrq,
            2 => FatalReason::StackCheckFail,
            3 => FatalReason::KernelOops,
            4 => FatalReason::KernelPanic,
            other => FatalReason::Other(other),
        }
    }
}

impl fmt::Display for FatalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalReason::CpuException => write!(f, "K_ERR_CPU_EXCEPTION"),
            FatalReason::SpuriousIrq => write!(f, "K_ERR_SPURIOUS_IRQ"),
            FatalReason::StackCheckFail => write!(f, "K_ERR_STACK_CHK_FAIL"),
            FatalReason::KernelOops => write!(f, "K_ERR_KERNEL_OOPS"),
            FatalReason::KernelPanic => write!(f, "K_ERR_KERNEL_PANIC"),
            FatalReason::Other(code) => write!(f, "reason code {}", code),
        }
    }
}

/// The 12-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// File format version (1 or 2).
    pub version: u16,
    /// Target architecture.
    pub target: TargetCode,
    /// Width of a target pointer, in bits.
    pub pointer_bits: u32,
    /// Header flags (currently unused by Zephyr).
    pub flag: u8,
    /// Why the dump was taken.
    pub reason: FatalReason,
}

impl Header {
    /// Width of a target pointer, in bytes.
    pub fn pointer_size(&self) -> usize {
        (self.pointer_bits / 8) as usize
    }
}
