//! GDB Remote Serial Protocol plumbing: framing, checksums, and command
//! parsing.

mod common;
mod packet;
mod recv_packet;
mod response_writer;

pub(crate) mod commands;

pub(crate) use common::{decode_hex, decode_hex_buf};
pub(crate) use packet::Packet;
pub(crate) use recv_packet::{CapacityError, RecvPacketStateMachine};
pub(crate) use response_writer::{Error as ResponseWriterError, ResponseWriter};
