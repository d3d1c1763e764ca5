//! Common types and definitions used across `coredump_gdbstub`.

mod signal;

pub use self::signal::Signal;
