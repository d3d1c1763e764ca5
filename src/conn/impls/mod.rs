mod boxed;

#[cfg(feature = "std")]
mod pipe;
#[cfg(feature = "std")]
mod tcpstream;

#[cfg(feature = "std")]
pub use pipe::PipeConnection;
