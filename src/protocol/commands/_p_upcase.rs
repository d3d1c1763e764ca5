use super::prelude::*;

/// 'P n...=r...'
///
/// Write register n... with value r... The register number n is in
/// hexadecimal, and r... contains the register's value as a hex string.
///
/// The value is kept as raw ascii, since its width depends on the target
/// architecture.
#[derive(PartialEq, Eq, Debug)]
pub struct P<'a> {
    pub reg_id: usize,
    pub val: &'a [u8],
}

impl<'a> ParseCommand<'a> for P<'a> {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        let mut body = body.splitn(2, |&b| b == b'=');
        let reg_id = decode_hex(body.next()?).ok()?;
        let val = body.next()?;
        if val.is_empty() {
            return None;
        }
        Some(P { reg_id, val })
    }
}
