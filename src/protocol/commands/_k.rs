use super::prelude::*;

#[derive(PartialEq, Eq, Debug)]
pub struct k;

impl<'a> ParseCommand<'a> for k {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        if !body.is_empty() {
            return None;
        }
        Some(k)
    }
}
