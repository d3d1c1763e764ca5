//! Serve a post-mortem core dump to a GDB client using the
//! [GDB Remote Serial Protocol](https://sourceware.org/gdb/onlinedocs/gdb/Remote-Protocol.html).
//!
//! `coredump_gdbstub` lets a stock debugger attach to the crash record of an
//! embedded target exactly as if it were attached to a halted target over a
//! wire. Registers come from the core dump's _architecture data block_, and
//! memory reads are served from the regions captured at the moment of fault.
//!
//! ## Getting Started
//!
//! 1. Load a core dump, e.g: via [`coredump::zephyr::ZephyrCoreDump`], or
//!    implement [`coredump::CoreDump`] for your own container format.
//! 2. Pick the [`arch::Arch`] matching the dump's target (e.g:
//!    [`arch::arm::ArmCortexM`]).
//! 3. Open a [`Session`] over the dump, and hand it to a [`stub::GdbStub`]
//!    along with a [`conn::Connection`] to the GDB client.
//!
//! ```rust,ignore
//! let dump = ZephyrCoreDump::from_bytes(&std::fs::read("coredump.bin")?)?;
//! let session = Session::<ArmCortexM, _>::new(&dump);
//!
//! let (stream, _) = TcpListener::bind("127.0.0.1:1234")?.accept()?;
//! let reason = GdbStub::new(stream, session).run_blocking()?;
//! ```
//!
//! ## Features
//!
//! - `std` (default):
//!   - Implements [`conn::Connection`] for `TcpStream` and stdin/stdout
//!   - Implements `std::error::Error` for all error types
//! - `trace-pkt` (default):
//!   - Logs every incoming / outgoing packet via `trace!`

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

#[macro_use]
extern crate log;

pub mod arch;
pub mod common;
pub mod conn;
pub mod coredump;
pub mod internal;
pub mod stub;

mod protocol;
mod session;

pub use session::{Session, SessionError};
