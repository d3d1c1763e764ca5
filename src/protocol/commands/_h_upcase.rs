use super::prelude::*;

/// Thread selector of an `H` packet.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ThreadSel {
    /// `-1`
    All,
    /// `0`
    Any,
    /// A specific thread id.
    Id(usize),
}

#[derive(PartialEq, Eq, Debug)]
pub struct H {
    pub kind: u8,
    pub thread: ThreadSel,
}

impl<'a> ParseCommand<'a> for H {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        let (&kind, tid) = body.split_first()?;
        let thread = match tid {
            b"-1" => ThreadSel::All,
            _ => match decode_hex(tid).ok()? {
                0 => ThreadSel::Any,
                id => ThreadSel::Id(id),
            },
        };

        Some(H { kind, thread })
    }
}
