use core::fmt::{self, Display};

use crate::arch::Arch;
use crate::conn::Connection;
use crate::coredump::CoreDump;
use crate::session::Session;

use super::GdbStub;
use super::DEFAULT_PACKET_BUFFER_SIZE;

/// Smallest packet buffer that can hold the `qSupported` packet GDB opens
/// every session with.
const MIN_PACKET_BUFFER_SIZE: usize = 256;

/// An error which may occur when building a [`GdbStub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdbStubBuilderError {
    /// The packet buffer is too small to negotiate a session.
    PacketBufferTooSmall(usize),
}

impl Display for GdbStubBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbStubBuilderError::*;
        match self {
            PacketBufferTooSmall(size) => write!(
                f,
                "packet buffer of {} bytes is too small (must be at least {})",
                size, MIN_PACKET_BUFFER_SIZE
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GdbStubBuilderError {}

/// Helper to construct and customize [`GdbStub`].
pub struct GdbStubBuilder<'d, A: Arch, D: CoreDump + ?Sized, C: Connection> {
    conn: C,
    session: Session<'d, A, D>,
    packet_buffer_size: Option<usize>,
    no_ack_mode: bool,
}

impl<'d, A: Arch, D: CoreDump + ?Sized, C: Connection> GdbStubBuilder<'d, A, D, C> {
    /// Create a new `GdbStubBuilder` using the provided Connection and
    /// Session.
    pub fn new(conn: C, session: Session<'d, A, D>) -> GdbStubBuilder<'d, A, D, C> {
        GdbStubBuilder {
            conn,
            session,
            packet_buffer_size: None,
            no_ack_mode: true,
        }
    }

    /// Specify a custom size for the packet buffer. Defaults to 4096 bytes.
    pub fn packet_buffer_size(mut self, size: usize) -> Self {
        self.packet_buffer_size = Some(size);
        self
    }

    /// Whether the client may negotiate no-ack mode (`QStartNoAckMode`).
    /// Defaults to `true`.
    ///
    /// Acks are pointless over a reliable transport such as TCP, but can
    /// help when debugging the stub itself.
    pub fn no_ack_mode(mut self, allow: bool) -> Self {
        self.no_ack_mode = allow;
        self
    }

    /// Build the GdbStub, returning an error if something went wrong.
    pub fn build(self) -> Result<GdbStub<'d, A, D, C>, GdbStubBuilderError> {
        let size = self
            .packet_buffer_size
            .unwrap_or(DEFAULT_PACKET_BUFFER_SIZE);
        if size < MIN_PACKET_BUFFER_SIZE {
            return Err(GdbStubBuilderError::PacketBufferTooSmall(size));
        }

        Ok(GdbStub::from_parts(
            self.conn,
            self.session,
            size,
            self.no_ack_mode,
        ))
    }
}
