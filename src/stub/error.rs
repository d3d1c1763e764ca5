use core::fmt::{self, Debug, Display};

use crate::protocol::{CapacityError, ResponseWriterError};

/// An error which may occur during a GDB debugging session.
///
/// Only transport failures are fatal. Anything a client can get wrong in a
/// request is answered with an error reply, and the session carries on.
#[derive(Debug)]
#[non_exhaustive]
pub enum GdbStubError<C> {
    /// Connection Error while initializing the session.
    ConnectionInit(C),
    /// Connection Error while reading request.
    ConnectionRead(C),
    /// Connection Error while writing response.
    ConnectionWrite(C),
    /// Packet cannot fit in the provided packet buffer.
    PacketBufferOverflow,

    // Internal - A non-fatal error occurred (with errno-style error code)
    //
    // This "dummy" error is required as part of the internal
    // `SessionResultExt::handle_error()` machinery, and will never be
    // propagated up to the end user.
    #[doc(hidden)]
    NonFatalError(u8),
}

impl<C> From<ResponseWriterError<C>> for GdbStubError<C> {
    fn from(e: ResponseWriterError<C>) -> Self {
        GdbStubError::ConnectionWrite(e.0)
    }
}

impl<C> From<CapacityError> for GdbStubError<C> {
    fn from(_: CapacityError) -> Self {
        GdbStubError::PacketBufferOverflow
    }
}

impl<C> Display for GdbStubError<C>
where
    C: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbStubError::*;
        match self {
            ConnectionInit(e) => write!(f, "Connection Error while initializing the session: {:?}", e),
            ConnectionRead(e) => write!(f, "Connection Error while reading request: {:?}", e),
            ConnectionWrite(e) => write!(f, "Connection Error while writing response: {:?}", e),
            PacketBufferOverflow => write!(f, "Packet too big for provided buffer!"),
            NonFatalError(_) => write!(f, "Internal non-fatal error. End users should never see this!"),
        }
    }
}

#[cfg(feature = "std")]
impl<C> std::error::Error for GdbStubError<C> where C: Debug {}
