use crate::conn::Connection;
use crate::conn::ConnectionExt;
use std::io::{self, ErrorKind, Read, Stdin, Stdout, Write};

/// Speaks the protocol over the process' stdin / stdout, as used by
/// `target remote | <command>`.
///
/// Anything else the process wants to say must go to stderr.
pub struct PipeConnection {
    stdin: Stdin,
    stdout: Stdout,
}

impl PipeConnection {
    /// Wrap the process' stdin / stdout.
    pub fn new() -> PipeConnection {
        PipeConnection {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for PipeConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for PipeConnection {
    type Error = io::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.stdout.lock().write_all(&[byte])
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.stdout.lock().write_all(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stdout.lock().flush()
    }
}

impl ConnectionExt for PipeConnection {
    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8];
        loop {
            return match self.stdin.lock().read(&mut buf) {
                Ok(0) => Ok(None),
                Ok(_) => Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => Err(e),
            };
        }
    }
}
