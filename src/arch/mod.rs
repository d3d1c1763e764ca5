//! Traits to encode architecture-specific register models.
//!
//! Each supported architecture is a zero-variant enum implementing [`Arch`].
//! `Arch` impls are only ever used at the type level, and are never
//! instantiated: a [`Session`](crate::Session) is parameterized by its
//! architecture once, when it is opened, and everything downstream (group
//! packet layout, register widths, the default trap signal) follows from it.

use core::fmt::Debug;

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, PrimInt, Unsigned, Zero};

use crate::common::Signal;
use crate::internal::{BeBytes, LeBytes};

pub mod arm;
pub mod riscv;

mod register_set;

pub use register_set::RegisterSet;

/// Register identifier for target registers.
///
/// Identifiers double as keys into a [`RegisterSet`], and their raw ids are
/// the register numbers GDB uses in `p` / `P` packets.
pub trait RegId: Sized + Debug + Copy + Ord {
    /// Map a raw GDB register number to a corresponding `RegId`.
    ///
    /// Returns `None` if the number does not correspond to a modeled register.
    fn from_raw_id(id: usize) -> Option<Self>;

    /// The raw GDB register number of this register.
    fn to_raw_id(self) -> usize;
}

/// Encodes the register model of a post-mortem target.
pub trait Arch {
    /// The architecture's word size (e.g: `u32` on a 32-bit system).
    ///
    /// Every register, and every word of the architecture data block, is
    /// exactly this wide.
    type Usize: Debug
        + FromPrimitive
        + PrimInt
        + Unsigned
        + Zero
        + CheckedAdd
        + CheckedMul
        + BeBytes
        + LeBytes;

    /// Register identifier enum.
    type RegId: RegId + 'static;

    /// Word-by-word layout of the core dump's architecture data block.
    ///
    /// Entry `i` names the register stored in the `i`th little-endian word of
    /// the block. This is _not_ the group packet order.
    const DATA_BLOCK_LAYOUT: &'static [Self::RegId];

    /// The registers sent in response to a `g` packet, in wire order.
    ///
    /// The length of this table must match what the GDB client expects for
    /// the architecture, as the client locates fields purely by position.
    const GROUP_LAYOUT: &'static [Self::RegId];

    /// Signal reported to the client when the core dump doesn't specify one.
    const DEFAULT_SIGNAL: Signal;

    /// Decode a raw architecture data block into a (partial) register set.
    fn decode(block: &[u8]) -> RegisterSet<Self>
    where
        Self: Sized,
    {
        RegisterSet::decode(block)
    }

    /// The registers sent in response to a `g` packet, in wire order.
    fn group_layout() -> &'static [Self::RegId] {
        Self::GROUP_LAYOUT
    }

    /// Width of a single register, in bytes.
    fn reg_size() -> usize {
        core::mem::size_of::<Self::Usize>()
    }
}
