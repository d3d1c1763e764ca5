use super::prelude::*;

/// 'D'
/// 'D;pid'
///
/// Detach from the remote system. The second form, including a process ID,
/// is used when multiprocess protocol extensions are enabled. The pid is
/// specified as a big-endian hex string.
#[derive(PartialEq, Eq, Debug)]
pub struct D {
    pub pid: Option<usize>,
}

impl<'a> ParseCommand<'a> for D {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        let pid = match body {
            [] => None,
            [b';', pid @ ..] => Some(decode_hex(pid).ok()?),
            _ => return None,
        };
        Some(D { pid })
    }
}
