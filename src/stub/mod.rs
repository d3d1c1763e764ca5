//! The core [`GdbStub`] type, used to serve a [`Session`] to a GDB client
//! over a given [`Connection`].

use alloc::vec;
use alloc::vec::Vec;

use crate::arch::Arch;
use crate::conn::{Connection, ConnectionExt};
use crate::coredump::CoreDump;
use crate::protocol::RecvPacketStateMachine;
use crate::session::Session;

mod builder;
mod core_impl;
mod error;

pub use builder::{GdbStubBuilder, GdbStubBuilderError};
pub use core_impl::DisconnectReason;
pub use error::GdbStubError;

use GdbStubError as Error;

/// Default size of the incoming packet buffer, reported to the client via
/// `qSupported`.
pub const DEFAULT_PACKET_BUFFER_SIZE: usize = 4096;

/// Serve a [`Session`] using the GDB Remote Serial Protocol over a given
/// [`Connection`].
pub struct GdbStub<'d, A: Arch, D: CoreDump + ?Sized, C: Connection> {
    conn: C,
    packet_buffer: Vec<u8>,
    recv_packet: RecvPacketStateMachine,
    session: Session<'d, A, D>,
    inner: core_impl::GdbStubImpl<A, C>,
}

impl<'d, A: Arch, D: CoreDump + ?Sized, C: Connection> GdbStub<'d, A, D, C> {
    /// Create a [`GdbStubBuilder`] using the provided Connection and Session.
    pub fn builder(conn: C, session: Session<'d, A, D>) -> GdbStubBuilder<'d, A, D, C> {
        GdbStubBuilder::new(conn, session)
    }

    /// Create a new `GdbStub` using the provided connection, with a
    /// [`DEFAULT_PACKET_BUFFER_SIZE`] byte packet buffer and no-ack mode
    /// enabled.
    ///
    /// For fine-grained control over various `GdbStub` options, use the
    /// [`GdbStub::builder`] method instead.
    pub fn new(conn: C, session: Session<'d, A, D>) -> GdbStub<'d, A, D, C> {
        GdbStub::from_parts(conn, session, DEFAULT_PACKET_BUFFER_SIZE, true)
    }

    fn from_parts(
        conn: C,
        session: Session<'d, A, D>,
        packet_buffer_size: usize,
        allow_no_ack_mode: bool,
    ) -> GdbStub<'d, A, D, C> {
        GdbStub {
            conn,
            packet_buffer: vec![0; packet_buffer_size],
            recv_packet: RecvPacketStateMachine::new(),
            session,
            inner: core_impl::GdbStubImpl::new(packet_buffer_size, allow_no_ack_mode),
        }
    }

    /// Start a GDB remote debugging session, blocking on the connection for
    /// each incoming byte.
    ///
    /// Returns once the client detaches, kills the session, or closes the
    /// connection.
    pub fn run_blocking(mut self) -> Result<DisconnectReason, Error<C::Error>>
    where
        C: ConnectionExt,
    {
        self.conn.on_session_start().map_err(Error::ConnectionInit)?;
        info!("client connected");

        loop {
            let byte = match self.conn.read().map_err(Error::ConnectionRead)? {
                Some(byte) => byte,
                None => {
                    info!("client closed the connection");
                    return Ok(DisconnectReason::TransportClosed);
                }
            };

            if let Some(reason) = self.incoming_data(byte)? {
                return Ok(reason);
            }
        }
    }

    /// Pass a byte from the GDB client into the stub.
    ///
    /// This is the building block of [`GdbStub::run_blocking`], for callers
    /// that receive data some other way (e.g: from an event loop). Returns
    /// `Some` once the session is over.
    pub fn incoming_data(
        &mut self,
        byte: u8,
    ) -> Result<Option<DisconnectReason>, Error<C::Error>> {
        let frame = match self.recv_packet.pump(&mut self.packet_buffer, byte)? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        self.inner
            .handle_frame(&mut self.session, &mut self.conn, frame)
    }

    /// The session being served.
    pub fn session(&self) -> &Session<'d, A, D> {
        &self.session
    }

    /// Returns a mutable reference to the underlying connection.
    pub fn borrow_conn(&mut self) -> &mut C {
        &mut self.conn
    }
}
