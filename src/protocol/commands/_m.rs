use super::prelude::*;

#[derive(PartialEq, Eq, Debug)]
pub struct m {
    pub addr: u64,
    pub len: usize,
}

impl<'a> ParseCommand<'a> for m {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        let mut body = body.split(|&b| b == b',');
        let addr = decode_hex(body.next()?).ok()?;
        let len = decode_hex(body.next()?).ok()?;
        if body.next().is_some() {
            return None;
        }

        Some(m { addr, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_addr_and_len() {
        assert_eq!(
            m::from_packet(b"8001000,4"),
            Some(m {
                addr: 0x0800_1000,
                len: 4
            })
        );
        assert_eq!(m::from_packet(b"0,0"), Some(m { addr: 0, len: 0 }));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(m::from_packet(b"8001000"), None);
        assert_eq!(m::from_packet(b"8001000,"), None);
        assert_eq!(m::from_packet(b"zz,4"), None);
        assert_eq!(m::from_packet(b"1,2,3"), None);
    }
}
