use alloc::vec::Vec;

use super::ParseError;
use crate::protocol::decode_hex_buf;

const PREFIX: &[u8] = b"#CD:";
const BEGIN: &[u8] = b"BEGIN#";
const END: &[u8] = b"END#";
const ERROR: &[u8] = b"ERROR CANNOT DUMP#";

/// Recover the binary dump from a serial console capture.
///
/// Only lines carrying a `#CD:` marker are considered, and the marker may be
/// preceded by anything (e.g: a log timestamp). Everything between
/// `#CD:BEGIN#` and `#CD:END#` is hex, and is concatenated in order.
pub(super) fn extract(log: &[u8]) -> Result<Vec<u8>, ParseError> {
    let mut data = Vec::new();
    let mut in_dump = false;

    for (idx, line) in log.split(|&b| b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let payload = match find(line, PREFIX) {
            Some(pos) => &line[pos + PREFIX.len()..],
            None => continue,
        };

        if payload.starts_with(BEGIN) {
            if in_dump {
                warn!("line {}: restarting dump at repeated #CD:BEGIN#", idx + 1);
            }
            data.clear();
            in_dump = true;
        } else if payload.starts_with(END) {
            if in_dump {
                debug!("extracted {} bytes of coredump from serial log", data.len());
                return Ok(data);
            }
            warn!("line {}: #CD:END# without #CD:BEGIN#", idx + 1);
        } else if payload.starts_with(ERROR) {
            return Err(ParseError::DumpFailed);
        } else if in_dump {
            let bytes = decode_hex_buf(payload).map_err(|_| ParseError::BadHex { line: idx + 1 })?;
            data.extend_from_slice(&bytes);
        }
    }

    if in_dump {
        Err(ParseError::MissingEnd)
    } else {
        Err(ParseError::MissingBegin)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
