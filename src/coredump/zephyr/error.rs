use core::fmt;

/// An error encountered while reading a Zephyr coredump.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The binary dump doesn't start with `ZE`.
    BadMagic,
    /// The file header declares a format version this crate can't read.
    UnsupportedVersion(u16),
    /// The file header declares a pointer size other than 32 or 64 bits
    /// (stored as log2 of the bit width).
    UnsupportedPointerSize(u8),
    /// The dump ended in the middle of a header or block.
    Truncated {
        /// Byte offset at which more data was expected.
        offset: usize,
    },
    /// A block started with an unrecognized id byte.
    UnknownBlock {
        /// The offending id.
        id: u8,
        /// Byte offset of the block.
        offset: usize,
    },
    /// A memory block whose end address precedes its start address.
    BadMemoryBlock {
        /// Declared start address.
        start: u64,
        /// Declared (exclusive) end address.
        end: u64,
    },
    /// The serial log has no `#CD:BEGIN#` marker.
    MissingBegin,
    /// The serial log has no `#CD:END#` marker after `#CD:BEGIN#`.
    MissingEnd,
    /// The target reported that it couldn't take a dump.
    DumpFailed,
    /// A `#CD:` line doesn't contain valid hex.
    BadHex {
        /// 1-based line number within the log.
        line: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::ParseError::*;
        match self {
            BadMagic => write!(f, "not a Zephyr coredump (bad magic)"),
            UnsupportedVersion(v) => write!(f, "unsupported coredump header version {}", v),
            UnsupportedPointerSize(s) => write!(f, "unsupported pointer size (2^{} bits)", s),
            Truncated { offset } => write!(f, "coredump truncated at offset {:#x}", offset),
            UnknownBlock { id, offset } => {
                write!(f, "unknown block id {:#04x} at offset {:#x}", id, offset)
            }
            BadMemoryBlock { start, end } => {
                write!(f, "memory block ends ({:#x}) before it starts ({:#x})", end, start)
            }
            MissingBegin => write!(f, "no #CD:BEGIN# marker in log"),
            MissingEnd => write!(f, "no #CD:END# marker in log (truncated dump?)"),
            DumpFailed => write!(f, "target could not take a coredump"),
            BadHex { line } => write!(f, "malformed hex data on line {}", line),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
