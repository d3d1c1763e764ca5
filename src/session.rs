use core::fmt;

use num_traits::PrimInt;

use crate::arch::{Arch, RegId, RegisterSet};
use crate::common::Signal;
use crate::coredump::CoreDump;
use crate::protocol::decode_hex;

pub(crate) const EFAULT: u8 = 14;
pub(crate) const EINVAL: u8 = 22;

/// An error raised by a [`Session`] operation.
///
/// None of these are fatal: the stub reports them to the client as an
/// errno-style `E nn` reply, and keeps serving requests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The register number doesn't map to a register of the architecture.
    InvalidRegister(usize),
    /// The register value isn't a hex number of the architecture's word size.
    InvalidValue,
    /// No single memory region covers the requested range.
    MemoryRangeUnmapped {
        /// Start of the requested range.
        addr: u64,
        /// Length of the requested range.
        len: usize,
    },
}

impl SessionError {
    /// The errno reported to the client.
    pub fn errno(&self) -> u8 {
        match self {
            SessionError::InvalidRegister(_) | SessionError::InvalidValue => EINVAL,
            SessionError::MemoryRangeUnmapped { .. } => EFAULT,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidRegister(id) => write!(f, "no such register: {}", id),
            SessionError::InvalidValue => write!(f, "malformed register value"),
            SessionError::MemoryRangeUnmapped { addr, len } => write!(
                f,
                "{:#x}..{:#x} is not covered by a single memory region",
                addr,
                addr.saturating_add(*len as u64)
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

/// The debugging state served to a single client.
///
/// A session owns its own copy of the registers, so writes never leak into
/// the core dump, or into any other session sharing it.
pub struct Session<'d, A: Arch, D: CoreDump + ?Sized> {
    registers: RegisterSet<A>,
    signal: Signal,
    dump: &'d D,
}

impl<'d, A: Arch, D: CoreDump + ?Sized> Session<'d, A, D> {
    /// Open a session over `dump`, decoding its architecture data block as
    /// `A`.
    pub fn new(dump: &'d D) -> Self {
        let registers = A::decode(dump.arch_data());
        let signal = dump.signal().unwrap_or(A::DEFAULT_SIGNAL);

        Session {
            registers,
            signal,
            dump,
        }
    }

    /// The registers known to this session.
    pub fn registers(&self) -> &RegisterSet<A> {
        &self.registers
    }

    /// The signal the target stopped with.
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// The underlying core dump.
    pub fn dump(&self) -> &'d D {
        self.dump
    }

    /// Write register `raw_id` from its `P` packet representation.
    ///
    /// `val` is parsed as a big-endian hex number, and stored byte-swapped,
    /// so that the bytes echoed back by a subsequent `g` appear in the same
    /// order the client sent them.
    pub fn write_register(&mut self, raw_id: usize, val: &[u8]) -> Result<A::RegId, SessionError> {
        let id = <A::RegId as RegId>::from_raw_id(raw_id).ok_or(SessionError::InvalidRegister(raw_id))?;
        let val: A::Usize = decode_hex(val).map_err(|_| SessionError::InvalidValue)?;

        self.registers.set(id, val.swap_bytes());
        Ok(id)
    }

    /// Read `len` bytes starting at `addr`.
    ///
    /// The range must lie entirely within one memory region, and the first
    /// region (in dump order) that covers it is used.
    pub fn read_memory(&self, addr: u64, len: usize) -> Result<&'d [u8], SessionError> {
        if len == 0 {
            return Ok(&[]);
        }

        self.dump
            .memory_regions()
            .iter()
            .find_map(|region| region.slice(addr, len))
            .ok_or(SessionError::MemoryRangeUnmapped { addr, len })
    }
}
