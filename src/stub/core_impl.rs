use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::arch::Arch;
use crate::conn::Connection;
use crate::coredump::CoreDump;
use crate::protocol::commands::_h_upcase::ThreadSel;
use crate::protocol::commands::{Command, CommandParseError};
use crate::protocol::{Packet, ResponseWriter};
use crate::session::{Session, EINVAL};
use crate::stub::error::GdbStubError as Error;

/// Common imports used by the command handlers.
mod prelude {
    pub(super) use crate::arch::Arch;
    pub(super) use crate::conn::Connection;
    pub(super) use crate::coredump::CoreDump;
    pub(super) use crate::protocol::ResponseWriter;
    pub(super) use crate::session::Session;
    pub(super) use crate::stub::core_impl::session_result_ext::SessionResultExt;
    pub(super) use crate::stub::core_impl::GdbStubImpl;
    pub(super) use crate::stub::core_impl::HandlerStatus;
    pub(super) use crate::stub::error::GdbStubError as Error;
}

mod base;
mod no_ack_mode;
mod resume;

pub(crate) mod session_result_ext {
    use crate::session::SessionError;
    use crate::stub::GdbStubError;

    /// Extension trait to ease working with `SessionError`s in the GdbStub
    /// implementation.
    pub(in crate::stub) trait SessionResultExt<V, C> {
        /// Turns a `SessionError` into an errno-style error reply.
        fn handle_error(self) -> Result<V, GdbStubError<C>>;
    }

    impl<V, C> SessionResultExt<V, C> for Result<V, SessionError> {
        fn handle_error(self) -> Result<V, GdbStubError<C>> {
            self.map_err(|e| {
                debug!("request failed: {}", e);
                GdbStubError::NonFatalError(e.errno())
            })
        }
    }
}

/// Describes why the GDB session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// GDB issued a disconnect command
    Disconnect,
    /// GDB issued a kill command
    Kill,
    /// The client closed the connection without saying goodbye
    TransportClosed,
}

pub enum HandlerStatus {
    Handled,
    NeedsOk,
    Disconnect(DisconnectReason),
}

pub(crate) struct GdbStubImpl<A: Arch, C: Connection> {
    _arch: PhantomData<A>,
    _connection: PhantomData<C>,

    packet_buffer_len: usize,
    allow_no_ack_mode: bool,
    features: ProtocolFeatures,
    last_response: Option<Vec<u8>>,
}

impl<A: Arch, C: Connection> GdbStubImpl<A, C> {
    pub fn new(packet_buffer_len: usize, allow_no_ack_mode: bool) -> GdbStubImpl<A, C> {
        GdbStubImpl {
            _arch: PhantomData,
            _connection: PhantomData,

            packet_buffer_len,
            allow_no_ack_mode,
            features: ProtocolFeatures::empty(),
            last_response: None,
        }
    }

    /// Handle a raw frame yielded by the packet state machine.
    pub fn handle_frame<D: CoreDump + ?Sized>(
        &mut self,
        session: &mut Session<'_, A, D>,
        conn: &mut C,
        frame: &[u8],
    ) -> Result<Option<DisconnectReason>, Error<C::Error>> {
        match Packet::from_buf(frame) {
            Ok(packet) => self.handle_packet(session, conn, packet),
            Err(e) => {
                warn!("dropping malformed packet: {:?}", e);
                if !self.features.no_ack_mode() {
                    conn.write(b'-').map_err(Error::ConnectionWrite)?;
                    conn.flush().map_err(Error::ConnectionWrite)?;
                }
                Ok(None)
            }
        }
    }

    fn handle_packet<D: CoreDump + ?Sized>(
        &mut self,
        session: &mut Session<'_, A, D>,
        conn: &mut C,
        packet: Packet<'_>,
    ) -> Result<Option<DisconnectReason>, Error<C::Error>> {
        match packet {
            Packet::Ack => Ok(None),
            Packet::Nack => {
                match &self.last_response {
                    Some(frame) => {
                        debug!("client nack'd the last response, re-sending");
                        conn.write_all(frame).map_err(Error::ConnectionWrite)?;
                        conn.flush().map_err(Error::ConnectionWrite)?;
                    }
                    None => debug!("client nack'd before any response was sent"),
                }
                Ok(None)
            }
            Packet::Interrupt => {
                debug!("<-- interrupt packet");
                let mut res = ResponseWriter::new(conn);
                self.write_stop_reply(&mut res, session)?;
                self.last_response = Some(res.flush()?);
                Ok(None)
            }
            Packet::Command(body) => {
                // Acknowledge the command
                if !self.features.no_ack_mode() {
                    conn.write(b'+').map_err(Error::ConnectionWrite)?;
                }

                let mut res = ResponseWriter::new(conn);
                let disconnect_reason = match self.handle_command(&mut res, session, body) {
                    Ok(HandlerStatus::Handled) => None,
                    Ok(HandlerStatus::NeedsOk) => {
                        res.write_str("OK")?;
                        None
                    }
                    Ok(HandlerStatus::Disconnect(reason)) => Some(reason),
                    // HACK: handling this "dummy" error is required as part of the
                    // `SessionResultExt::handle_error()` machinery.
                    Err(Error::NonFatalError(code)) => {
                        res.write_str("E")?;
                        res.write_num(code)?;
                        None
                    }
                    Err(e) => return Err(e),
                };

                // every response needs to be flushed, _except_ for the
                // response to a kill packet.
                if disconnect_reason != Some(DisconnectReason::Kill) {
                    self.last_response = Some(res.flush()?);
                }

                Ok(disconnect_reason)
            }
        }
    }

    fn handle_command<D: CoreDump + ?Sized>(
        &mut self,
        res: &mut ResponseWriter<'_, C>,
        session: &mut Session<'_, A, D>,
        body: &[u8],
    ) -> Result<HandlerStatus, Error<C::Error>> {
        let cmd = match Command::from_packet_body(body) {
            Ok(cmd) => cmd,
            Err(CommandParseError::MalformedCommand(name)) => {
                warn!(
                    "malformed `{}` packet: {}",
                    alloc::string::String::from_utf8_lossy(name),
                    alloc::string::String::from_utf8_lossy(body)
                );
                return Err(Error::NonFatalError(EINVAL));
            }
        };

        match cmd {
            // `handle_X` methods are defined in the submodules
            Command::qSupported(cmd) => self.handle_q_supported(res, cmd),
            Command::QStartNoAckMode(_) => self.handle_no_ack_mode(res),
            Command::qAttached(cmd) => {
                trace!("qAttached for pid {:?}", cmd.pid);
                // a core dump is always an "existing process"
                res.write_str("1")?;
                Ok(HandlerStatus::Handled)
            }
            Command::H(cmd) => {
                match cmd.thread {
                    ThreadSel::Id(tid) => trace!("ignoring H{} of thread {}", cmd.kind as char, tid),
                    sel => trace!("ignoring H{} of {:?} threads", cmd.kind as char, sel),
                }
                Ok(HandlerStatus::NeedsOk)
            }
            Command::QuestionMark(_) => {
                self.write_stop_reply(res, session)?;
                Ok(HandlerStatus::Handled)
            }
            Command::g(_) => self.handle_read_registers(res, session),
            Command::p(cmd) => self.handle_read_register(res, cmd),
            Command::P(cmd) => self.handle_write_register(session, cmd),
            Command::m(cmd) => self.handle_read_memory(res, session, cmd),
            Command::c(cmd) => self.handle_resume(res, session, cmd.addr),
            Command::s(cmd) => self.handle_resume(res, session, cmd.addr),
            Command::k(_) => {
                info!("client killed the session");
                Ok(HandlerStatus::Disconnect(DisconnectReason::Kill))
            }
            Command::D(cmd) => {
                match cmd.pid {
                    Some(pid) => info!("client detached from pid {}", pid),
                    None => info!("client detached"),
                }
                res.write_str("OK")?;
                Ok(HandlerStatus::Disconnect(DisconnectReason::Disconnect))
            }
            // in the worst case, the command could not be parsed...
            Command::Unknown(cmd) => {
                info!(
                    "Unknown command: {}",
                    alloc::string::String::from_utf8_lossy(cmd)
                );
                Ok(HandlerStatus::Handled)
            }
        }
    }
}

// This bitflag is not part of the protocol - it is an internal implementation
// detail. The alternative would be to use multiple `bool` fields.
bitflags::bitflags! {
    #[derive(Copy, Clone, Debug)]
    struct ProtocolFeatures: u8 {
        const NO_ACK_MODE = 1 << 0;
    }
}

impl ProtocolFeatures {
    #[inline(always)]
    fn no_ack_mode(&self) -> bool {
        self.contains(ProtocolFeatures::NO_ACK_MODE)
    }

    #[inline(always)]
    fn set_no_ack_mode(&mut self, val: bool) {
        self.set(ProtocolFeatures::NO_ACK_MODE, val)
    }
}
