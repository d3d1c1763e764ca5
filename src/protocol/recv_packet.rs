#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Body,
    Checksum1,
    Checksum2,
}

/// The incoming frame didn't fit in the packet buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct CapacityError;

/// Receives a packet incrementally using a byte-driven state machine.
///
/// `pump` yields a complete frame (`$body#cc`), or one of the single-byte
/// packets (`+`, `-`, and the `0x03` interrupt). Anything else received
/// outside of a frame is line noise, and is dropped.
pub struct RecvPacketStateMachine {
    state: State,
    idx: usize,
}

impl RecvPacketStateMachine {
    pub fn new() -> Self {
        RecvPacketStateMachine {
            state: State::Ready,
            idx: 0,
        }
    }

    fn push(&mut self, packet_buffer: &mut [u8], byte: u8) -> Result<(), CapacityError> {
        match packet_buffer.get_mut(self.idx) {
            Some(slot) => {
                *slot = byte;
                self.idx += 1;
                Ok(())
            }
            None => {
                self.state = State::Ready;
                self.idx = 0;
                Err(CapacityError)
            }
        }
    }

    pub fn pump<'b>(
        &mut self,
        packet_buffer: &'b mut [u8],
        byte: u8,
    ) -> Result<Option<&'b [u8]>, CapacityError> {
        match self.state {
            State::Ready => match byte {
                b'$' => {
                    self.idx = 0;
                    self.push(packet_buffer, byte)?;
                    self.state = State::Body;
                    return Ok(None);
                }
                b'+' | b'-' | 0x03 => {
                    self.idx = 0;
                    self.push(packet_buffer, byte)?;
                }
                _ => {
                    trace!("dropping stray byte {:#04x} outside of packet", byte);
                    return Ok(None);
                }
            },
            State::Body => {
                self.push(packet_buffer, byte)?;
                if byte == b'#' {
                    self.state = State::Checksum1;
                }
                return Ok(None);
            }
            State::Checksum1 => {
                self.push(packet_buffer, byte)?;
                self.state = State::Checksum2;
                return Ok(None);
            }
            State::Checksum2 => {
                self.push(packet_buffer, byte)?;
                self.state = State::Ready;
            }
        }

        let len = self.idx;
        self.idx = 0;
        let packet = &packet_buffer[..len];

        #[cfg(feature = "trace-pkt")]
        trace!(
            "<-- {}",
            core::str::from_utf8(packet).unwrap_or("<invalid packet>")
        );

        Ok(Some(packet))
    }
}
