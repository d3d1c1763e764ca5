use alloc::collections::BTreeMap;
use core::fmt;

use num_traits::ToPrimitive;

use super::Arch;
use crate::internal::LeBytes;

/// The registers known to a session, keyed by identifier.
///
/// A `RegisterSet` is partial by construction. Registers missing from the
/// core dump are simply absent: they are never defaulted to zero, and are
/// reported to the client as unavailable.
pub struct RegisterSet<A: Arch> {
    regs: BTreeMap<A::RegId, A::Usize>,
}

impl<A: Arch> RegisterSet<A> {
    /// Create an empty register set.
    pub fn new() -> Self {
        RegisterSet {
            regs: BTreeMap::new(),
        }
    }

    /// Decode a raw architecture data block using `A::DATA_BLOCK_LAYOUT`.
    ///
    /// Words past the end of the block leave their registers unset. Surplus
    /// trailing bytes are ignored.
    pub fn decode(block: &[u8]) -> Self {
        let width = A::reg_size();
        let mut regs = BTreeMap::new();

        for (id, word) in A::DATA_BLOCK_LAYOUT.iter().zip(block.chunks_exact(width)) {
            if let Some(val) = <A::Usize as LeBytes>::from_le_bytes(word) {
                regs.insert(*id, val);
            }
        }

        let covered = A::DATA_BLOCK_LAYOUT.len() * width;
        if block.len() > covered {
            warn!(
                "ignoring {} trailing bytes of architecture data block",
                block.len() - covered
            );
        } else if block.len() % width != 0 {
            warn!(
                "architecture data block ends with a partial {}-byte word",
                width
            );
        }

        debug!(
            "decoded {} of {} registers from {}-byte architecture data block",
            regs.len(),
            A::DATA_BLOCK_LAYOUT.len(),
            block.len()
        );

        RegisterSet { regs }
    }

    /// Return the value of `id`, if known.
    pub fn get(&self, id: A::RegId) -> Option<A::Usize> {
        self.regs.get(&id).copied()
    }

    /// Whether `id` has a known value.
    pub fn is_known(&self, id: A::RegId) -> bool {
        self.regs.contains_key(&id)
    }

    /// Set `id` to `val`, overwriting any previous value.
    pub fn set(&mut self, id: A::RegId, val: A::Usize) {
        self.regs.insert(id, val);
    }

    /// Number of known registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Whether no register is known.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Serialize the registers of `A::GROUP_LAYOUT` into a GDB register
    /// bytestream, in little-endian byte order.
    ///
    /// Unknown registers are serialized by passing `None` to `write_byte`
    /// once per byte of register width.
    pub fn gdb_serialize(&self, mut write_byte: impl FnMut(Option<u8>)) {
        let mut buf = [0u8; 16];
        for id in A::group_layout() {
            match self.get(*id) {
                Some(val) => {
                    let len = LeBytes::to_le_bytes(val, &mut buf).unwrap_or(0);
                    for b in &buf[..len] {
                        write_byte(Some(*b))
                    }
                }
                None => (0..A::reg_size()).for_each(|_| write_byte(None)),
            }
        }
    }
}

impl<A: Arch> Default for RegisterSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Arch> Clone for RegisterSet<A> {
    fn clone(&self) -> Self {
        RegisterSet {
            regs: self.regs.clone(),
        }
    }
}

impl<A: Arch> PartialEq for RegisterSet<A> {
    fn eq(&self, other: &Self) -> bool {
        self.regs == other.regs
    }
}

impl<A: Arch> fmt::Debug for RegisterSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Hex(u64);

        impl fmt::Debug for Hex {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }

        f.debug_map()
            .entries(
                self.regs
                    .iter()
                    .map(|(id, val)| (id, Hex(val.to_u64().unwrap_or(0)))),
            )
            .finish()
    }
}
