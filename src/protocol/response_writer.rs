use alloc::vec::Vec;

use num_traits::PrimInt;

use crate::conn::Connection;
use crate::internal::BeBytes;

/// Newtype around a Connection error. Having a newtype allows implementing a
/// `From<ResponseWriterError<C>> for GdbStubError<C>`, which greatly
/// simplifies some of the error handling in the main stub.
#[derive(Debug, Clone)]
pub struct Error<C>(pub C);

/// Assembles a single `$<payload>#<checksum>` response frame.
///
/// The frame is built in memory and only hits the connection on `flush`, at
/// which point it is handed back to the caller so it can be re-sent verbatim
/// should the client NACK it.
pub struct ResponseWriter<'a, C: Connection> {
    inner: &'a mut C,
    checksum: u8,
    frame: Vec<u8>,
}

impl<'a, C: Connection + 'a> ResponseWriter<'a, C> {
    /// Creates a new ResponseWriter
    pub fn new(inner: &'a mut C) -> Self {
        let mut frame = Vec::with_capacity(64);
        frame.push(b'$');
        Self {
            inner,
            checksum: 0,
            frame,
        }
    }

    /// Consumes self, writing out the final '#' and checksum, and returns the
    /// complete frame that was sent.
    pub fn flush(mut self) -> Result<Vec<u8>, Error<C::Error>> {
        // don't include the '#' in checksum calculation
        let checksum = self.checksum;
        self.frame.push(b'#');
        self.frame.extend_from_slice(&hex_digits(checksum));

        #[cfg(feature = "trace-pkt")]
        trace!("--> {}", alloc::string::String::from_utf8_lossy(&self.frame));

        self.inner.write_all(&self.frame).map_err(Error)?;
        self.inner.flush().map_err(Error)?;

        Ok(self.frame)
    }

    fn write(&mut self, byte: u8) {
        self.checksum = self.checksum.wrapping_add(byte);
        self.frame.push(byte);
    }

    /// Write an entire string into the payload.
    pub fn write_str(&mut self, s: &str) -> Result<(), Error<C::Error>> {
        for b in s.as_bytes().iter() {
            self.write(*b);
        }
        Ok(())
    }

    /// Write a single byte as a hex string (two ascii chars)
    pub fn write_hex(&mut self, byte: u8) -> Result<(), Error<C::Error>> {
        for c in hex_digits(byte).iter() {
            self.write(*c);
        }
        Ok(())
    }

    /// Write a byte-buffer as a hex string (i.e: two ascii chars / byte).
    pub fn write_hex_buf(&mut self, data: &[u8]) -> Result<(), Error<C::Error>> {
        for b in data.iter() {
            self.write_hex(*b)?;
        }
        Ok(())
    }

    /// Write a number as a big-endian hex string using the most compact
    /// representation possible (i.e: trimming leading zero bytes).
    pub fn write_num<D: BeBytes + PrimInt>(&mut self, digit: D) -> Result<(), Error<C::Error>> {
        if digit.is_zero() {
            return self.write_hex(0);
        }

        let mut buf = [0; 16];
        // infallible (unless digit is a >128 bit number)
        let len = BeBytes::to_be_bytes(digit, &mut buf).unwrap_or(0);
        for b in buf[..len].iter().copied().skip_while(|&b| b == 0) {
            self.write_hex(b)?
        }
        Ok(())
    }
}

fn hex_digits(byte: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    [
        DIGITS[(byte >> 4) as usize],
        DIGITS[(byte & 0x0f) as usize],
    ]
}
