use super::prelude::*;

#[derive(PartialEq, Eq, Debug)]
pub struct s {
    pub addr: Option<u64>,
}

impl<'a> ParseCommand<'a> for s {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        if body.is_empty() {
            return Some(s { addr: None });
        }
        let addr = decode_hex(body).ok()?;
        Some(s { addr: Some(addr) })
    }
}
