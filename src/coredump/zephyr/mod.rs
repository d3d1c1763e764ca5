//! Reader for the Zephyr RTOS coredump log format.
//!
//! A dump is a 12-byte file header followed by a sequence of blocks:
//!
//! | id  | contents                                                   |
//! |-----|------------------------------------------------------------|
//! | `A` | `u16` version, `u16` length, architecture data block       |
//! | `M` | `u16` version, start / end pointers, `end - start` bytes   |
//! | `T` | `u16` version, `u16` length, thread metadata (skipped)     |
//!
//! All integers are little-endian. Dumps captured from a serial console are
//! hex-encoded on `#CD:` lines, and are transparently decoded by
//! [`ZephyrCoreDump::from_bytes`].

use alloc::vec::Vec;
use core::convert::TryFrom;

use crate::coredump::{CoreDump, MemoryRegion};
use crate::internal::LeBytes;

mod error;
mod header;
mod serial_log;

pub use error::ParseError;
pub use header::{FatalReason, Header, TargetCode};

const MAGIC: &[u8; 2] = b"ZE";

const BLOCK_ARCH: u8 = b'A';
const BLOCK_MEMORY: u8 = b'M';
const BLOCK_THREADS_META: u8 = b'T';

/// A parsed Zephyr coredump.
#[derive(Debug, Clone)]
pub struct ZephyrCoreDump {
    header: Header,
    arch_version: Option<u16>,
    arch_data: Vec<u8>,
    regions: Vec<MemoryRegion>,
    thread_meta_blocks: usize,
}

impl ZephyrCoreDump {
    /// Parse either a binary dump, or a serial console log containing a
    /// hex-encoded dump. Binary dumps are recognized by their `ZE` magic.
    pub fn from_bytes(buf: &[u8]) -> Result<ZephyrCoreDump, ParseError> {
        if buf.starts_with(MAGIC) {
            Self::from_binary(buf)
        } else {
            Self::from_serial_log(buf)
        }
    }

    /// Parse a serial console log containing a `#CD:`-encoded dump.
    pub fn from_serial_log(log: &[u8]) -> Result<ZephyrCoreDump, ParseError> {
        let bin = serial_log::extract(log)?;
        Self::from_binary(&bin)
    }

    /// Parse a binary dump.
    pub fn from_binary(buf: &[u8]) -> Result<ZephyrCoreDump, ParseError> {
        let mut r = Reader::new(buf);

        let header = parse_header(&mut r)?;
        debug!(
            "coredump header: version {}, target {}, {}-bit pointers, reason {}",
            header.version, header.target, header.pointer_bits, header.reason
        );

        let mut dump = ZephyrCoreDump {
            header,
            arch_version: None,
            arch_data: Vec::new(),
            regions: Vec::new(),
            thread_meta_blocks: 0,
        };

        while !r.is_empty() {
            let offset = r.pos;
            match r.le::<u8>()? {
                BLOCK_ARCH => {
                    let version = r.le::<u16>()?;
                    let len = r.le::<u16>()?;
                    let data = r.bytes(len as usize)?;
                    if dump.arch_version.is_some() {
                        warn!(
                            "duplicate architecture data block at offset {:#x}, using the latest",
                            offset
                        );
                    }
                    trace!("arch block v{}: {} bytes", version, len);
                    dump.arch_version = Some(version);
                    dump.arch_data = data.to_vec();
                }
                BLOCK_MEMORY => {
                    let _version = r.le::<u16>()?;
                    let start = r.ptr(header.pointer_size())?;
                    let end = r.ptr(header.pointer_size())?;
                    let len = end
                        .checked_sub(start)
                        .ok_or(ParseError::BadMemoryBlock { start, end })?;
                    let len = usize::try_from(len).map_err(|_| ParseError::Truncated { offset: r.pos })?;
                    let data = r.bytes(len)?;
                    trace!("memory block: {:#x}..{:#x}", start, end);
                    dump.regions.push(MemoryRegion::new(start, data.to_vec()));
                }
                BLOCK_THREADS_META => {
                    let _version = r.le::<u16>()?;
                    let len = r.le::<u16>()?;
                    r.bytes(len as usize)?;
                    dump.thread_meta_blocks += 1;
                }
                id => return Err(ParseError::UnknownBlock { id, offset }),
            }
        }

        if dump.arch_version.is_none() {
            warn!("coredump has no architecture data block, all registers will be unavailable");
        }

        debug!(
            "coredump: {} memory regions, {} thread metadata blocks skipped",
            dump.regions.len(),
            dump.thread_meta_blocks
        );

        Ok(dump)
    }

    /// The file header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Version of the architecture data block, if the dump has one.
    ///
    /// Later versions carry more registers (e.g: Cortex-M version 2 adds
    /// R4 to R11).
    pub fn arch_version(&self) -> Option<u16> {
        self.arch_version
    }

    /// Number of thread metadata blocks that were skipped.
    pub fn thread_meta_blocks(&self) -> usize {
        self.thread_meta_blocks
    }

    /// Append a region after the ones captured in the dump (e.g: read-only
    /// sections of the firmware image).
    ///
    /// Since reads are served by the first region covering them, captured
    /// memory always takes precedence.
    pub fn push_region(&mut self, region: MemoryRegion) {
        self.regions.push(region)
    }
}

impl CoreDump for ZephyrCoreDump {
    fn arch_data(&self) -> &[u8] {
        &self.arch_data
    }

    fn memory_regions(&self) -> &[MemoryRegion] {
        &self.regions
    }
}

fn parse_header(r: &mut Reader<'_>) -> Result<Header, ParseError> {
    if r.bytes(MAGIC.len()).map_err(|_| ParseError::BadMagic)? != MAGIC {
        return Err(ParseError::BadMagic);
    }

    let version = r.le::<u16>()?;
    if !(1..=2).contains(&version) {
        return Err(ParseError::UnsupportedVersion(version));
    }

    let target = TargetCode::from(r.le::<u16>()?);
    let pointer_bits = match r.le::<u8>()? {
        5 => 32,
        6 => 64,
        other => return Err(ParseError::UnsupportedPointerSize(other)),
    };
    let flag = r.le::<u8>()?;
    let reason = FatalReason::from(r.le::<u32>()?);

    Ok(Header {
        version,
        target,
        pointer_bits,
        flag,
        reason,
    })
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Reader<'a> {
        Reader { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        let truncated = ParseError::Truncated { offset: self.pos };
        let end = self.pos.checked_add(len).ok_or_else(|| truncated.clone())?;
        let data = self.buf.get(self.pos..end).ok_or(truncated)?;
        self.pos = end;
        Ok(data)
    }

    fn le<T: LeBytes>(&mut self) -> Result<T, ParseError> {
        let offset = self.pos;
        let data = self.bytes(core::mem::size_of::<T>())?;
        T::from_le_bytes(data).ok_or(ParseError::Truncated { offset })
    }

    fn ptr(&mut self, size: usize) -> Result<u64, ParseError> {
        match size {
            4 => self.le::<u32>().map(u64::from),
            _ => self.le::<u64>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(version: u16, target: u16, ptr_size: u8) -> Vec<u8> {
        let mut buf = b"ZE".to_vec();
        buf.extend_from_slice(&version.to_le_bytes());
        buf.extend_from_slice(&target.to_le_bytes());
        buf.push(ptr_size);
        buf.push(0);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf
    }

    fn arch_block(version: u16, words: &[u32]) -> Vec<u8> {
        let mut buf = vec![b'A'];
        buf.extend_from_slice(&version.to_le_bytes());
        buf.extend_from_slice(&((words.len() * 4) as u16).to_le_bytes());
        for w in words {
            buf.extend_from_slice(&w.to_le_bytes());
        }
        buf
    }

    fn mem_block(start: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = vec![b'M'];
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&start.to_le_bytes());
        buf.extend_from_slice(&(start + data.len() as u32).to_le_bytes());
        buf.extend_from_slice(data);
        buf
    }

    fn sample() -> Vec<u8> {
        let mut buf = header(1, 3, 5);
        buf.extend(arch_block(1, &[1, 2, 3, 4, 12, 0x0800_0101, 0x0800_1000, 0x6100_0000, 0x2000_1000]));
        buf.extend(mem_block(0x2000_0000, &[0xaa; 32]));
        buf.extend(mem_block(0x2000_1000, &[0xbb; 16]));
        buf
    }

    #[test]
    fn parses_cortex_m_dump() {
        let dump = ZephyrCoreDump::from_bytes(&sample()).unwrap();

        assert_eq!(dump.header().target, TargetCode::ArmCortexM);
        assert_eq!(dump.header().pointer_bits, 32);
        assert_eq!(dump.header().reason, FatalReason::CpuException);
        assert_eq!(dump.arch_version(), Some(1));
        assert_eq!(dump.arch_data().len(), 9 * 4);
        assert_eq!(&dump.arch_data()[24..28], &0x0800_1000u32.to_le_bytes());
        assert_eq!(dump.signal(), None);

        let regions = dump.memory_regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].start, 0x2000_0000);
        assert_eq!(regions[0].end(), 0x2000_0020);
        assert_eq!(regions[1].data, [0xbb; 16]);
    }

    #[test]
    fn parses_serial_log() {
        let mut log = Vec::new();
        log.extend_from_slice(b"[00:00:00.100] <err> coredump: #CD:BEGIN#\r\n");
        for chunk in sample().chunks(16) {
            log.extend_from_slice(b"[00:00:00.110] <err> coredump: #CD:");
            for b in chunk {
                log.extend_from_slice(format!("{:02x}", b).as_bytes());
            }
            log.extend_from_slice(b"\r\n");
        }
        log.extend_from_slice(b"[00:00:00.200] <err> coredump: #CD:END#\r\n");

        let dump = ZephyrCoreDump::from_bytes(&log).unwrap();
        assert_eq!(dump.header().target, TargetCode::ArmCortexM);
        assert_eq!(dump.memory_regions().len(), 2);
    }

    #[test]
    fn skips_thread_metadata() {
        let mut buf = header(2, 4, 5);
        buf.extend_from_slice(&[b'T', 1, 0, 4, 0, 0xde, 0xad, 0xbe, 0xef]);
        buf.extend(arch_block(2, &[0x1000]));

        let dump = ZephyrCoreDump::from_bytes(&buf).unwrap();
        assert_eq!(dump.header().target, TargetCode::Riscv);
        assert_eq!(dump.thread_meta_blocks(), 1);
        assert_eq!(dump.arch_version(), Some(2));
        assert_eq!(dump.arch_data(), &0x1000u32.to_le_bytes());
    }

    #[test]
    fn last_arch_block_wins() {
        let mut buf = header(1, 3, 5);
        buf.extend(arch_block(1, &[1]));
        buf.extend(arch_block(2, &[2, 3]));

        let dump = ZephyrCoreDump::from_bytes(&buf).unwrap();
        assert_eq!(dump.arch_version(), Some(2));
        assert_eq!(dump.arch_data().len(), 8);
    }

    #[test]
    fn sixty_four_bit_pointers() {
        let mut buf = header(1, 6, 6);
        buf.push(b'M');
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&0x4000_0000_0000u64.to_le_bytes());
        buf.extend_from_slice(&0x4000_0000_0004u64.to_le_bytes());
        buf.extend_from_slice(&[1, 2, 3, 4]);

        let dump = ZephyrCoreDump::from_bytes(&buf).unwrap();
        assert_eq!(dump.header().target, TargetCode::Arm64);
        assert_eq!(dump.memory_regions()[0].start, 0x4000_0000_0000);
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            ZephyrCoreDump::from_binary(b"XX").unwrap_err(),
            ParseError::BadMagic
        );
        assert_eq!(
            ZephyrCoreDump::from_bytes(&header(3, 3, 5)).unwrap_err(),
            ParseError::UnsupportedVersion(3)
        );
        assert_eq!(
            ZephyrCoreDump::from_bytes(&header(1, 3, 4)).unwrap_err(),
            ParseError::UnsupportedPointerSize(4)
        );
        assert_eq!(
            ZephyrCoreDump::from_bytes(&header(1, 3, 5)[..8]).unwrap_err(),
            ParseError::Truncated { offset: 8 }
        );
    }

    #[test]
    fn block_errors() {
        let mut buf = header(1, 3, 5);
        buf.push(b'Q');
        assert_eq!(
            ZephyrCoreDump::from_bytes(&buf).unwrap_err(),
            ParseError::UnknownBlock { id: b'Q', offset: 12 }
        );

        let mut buf = sample();
        buf.truncate(buf.len() - 1);
        assert!(matches!(
            ZephyrCoreDump::from_bytes(&buf).unwrap_err(),
            ParseError::Truncated { .. }
        ));

        let mut buf = header(1, 3, 5);
        buf.push(b'M');
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&0x2000u32.to_le_bytes());
        buf.extend_from_slice(&0x1000u32.to_le_bytes());
        assert_eq!(
            ZephyrCoreDump::from_bytes(&buf).unwrap_err(),
            ParseError::BadMemoryBlock {
                start: 0x2000,
                end: 0x1000
            }
        );
    }
}
