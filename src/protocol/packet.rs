use crate::protocol::common::decode_hex;

/// Packet parse error.
#[derive(Debug, PartialEq, Eq)]
pub enum PacketParseError {
    ChecksumMismatched { checksum: u8, calculated: u8 },
    EmptyBuf,
    MissingChecksum,
    MalformedChecksum,
    NotAscii,
    UnexpectedHeader(u8),
}

/// Top-Level GDB packet
#[derive(Debug, PartialEq, Eq)]
pub enum Packet<'a> {
    Ack,
    Nack,
    Interrupt,
    /// The (checksum-validated) body of a `$...#cc` frame.
    Command(&'a [u8]),
}

/// Sum of `body` modulo 256.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |a, x| a.wrapping_add(*x))
}

impl<'a> Packet<'a> {
    /// Validate a raw frame, checking for checksum consistency, structural
    /// correctness, and ASCII validation.
    pub fn from_buf(buf: &'a [u8]) -> Result<Packet<'a>, PacketParseError> {
        let (&header, rest) = buf.split_first().ok_or(PacketParseError::EmptyBuf)?;

        match header {
            b'$' => {}
            b'+' => return Ok(Packet::Ack),
            b'-' => return Ok(Packet::Nack),
            0x03 => return Ok(Packet::Interrupt),
            _ => return Err(PacketParseError::UnexpectedHeader(header)),
        }

        // split buffer into body and checksum components
        let hash = rest
            .iter()
            .position(|&b| b == b'#')
            .ok_or(PacketParseError::MissingChecksum)?;
        let (body, checksum_digits) = (&rest[..hash], &rest[hash + 1..]);

        if checksum_digits.len() != 2 {
            return Err(PacketParseError::MalformedChecksum);
        }
        let sent = decode_hex::<u8>(checksum_digits).map_err(|_| PacketParseError::MalformedChecksum)?;

        if !body.is_ascii() {
            return Err(PacketParseError::NotAscii);
        }

        let calculated = checksum(body);
        if calculated != sent {
            return Err(PacketParseError::ChecksumMismatched {
                checksum: sent,
                calculated,
            });
        }

        Ok(Packet::Command(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_command() {
        assert_eq!(Packet::from_buf(b"$g#67"), Ok(Packet::Command(b"g")));
        assert_eq!(Packet::from_buf(b"$#00"), Ok(Packet::Command(b"")));
    }

    #[test]
    fn single_byte_packets() {
        assert_eq!(Packet::from_buf(b"+"), Ok(Packet::Ack));
        assert_eq!(Packet::from_buf(b"-"), Ok(Packet::Nack));
        assert_eq!(Packet::from_buf(&[0x03]), Ok(Packet::Interrupt));
        assert_eq!(
            Packet::from_buf(b"!"),
            Err(PacketParseError::UnexpectedHeader(b'!'))
        );
    }

    #[test]
    fn checksum_mismatch() {
        assert_eq!(
            Packet::from_buf(b"$g#68"),
            Err(PacketParseError::ChecksumMismatched {
                checksum: 0x68,
                calculated: 0x67
            })
        );
    }

    #[test]
    fn malformed_framing() {
        assert_eq!(Packet::from_buf(b""), Err(PacketParseError::EmptyBuf));
        assert_eq!(
            Packet::from_buf(b"$g"),
            Err(PacketParseError::MissingChecksum)
        );
        assert_eq!(
            Packet::from_buf(b"$g#6"),
            Err(PacketParseError::MalformedChecksum)
        );
        assert_eq!(
            Packet::from_buf(b"$g#xx"),
            Err(PacketParseError::MalformedChecksum)
        );
    }

    #[test]
    fn checksum_wraps() {
        // 'm' + "20000000,100" sums past 0xff
        let body = b"m20000000,100";
        let sum: u32 = body.iter().map(|&b| b as u32).sum();
        assert_eq!(checksum(body), (sum % 256) as u8);
    }
}
