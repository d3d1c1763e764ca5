/// Cross-platform signal numbers defined by the GDB Remote Serial Protocol.
///
/// Only the low, POSIX-flavoured range of GDB's signal table is named here,
/// since that is all a post-mortem fault ever gets reported as. Any other
/// value can still be carried (and reported) as a raw `Signal(n)`.
///
/// Transcribed from <https://github.com/bminor/binutils-gdb/blob/master/include/gdb/signals.def>
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u8);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl Signal {
    #[doc = "Signal 0 (shouldn't be used)"]    pub const SIGZERO:    Self = Self(0);
    #[doc = "Hangup"]                          pub const SIGHUP:     Self = Self(1);
    #[doc = "Interrupt"]                       pub const SIGINT:     Self = Self(2);
    #[doc = "Quit"]                            pub const SIGQUIT:    Self = Self(3);
    #[doc = "Illegal instruction"]             pub const SIGILL:     Self = Self(4);
    #[doc = "Trace/breakpoint trap"]           pub const SIGTRAP:    Self = Self(5);
    #[doc = "Aborted"]                         pub const SIGABRT:    Self = Self(6);
    #[doc = "Emulation trap"]                  pub const SIGEMT:     Self = Self(7);
    #[doc = "Arithmetic exception"]            pub const SIGFPE:     Self = Self(8);
    #[doc = "Killed"]                          pub const SIGKILL:    Self = Self(9);
    #[doc = "Bus error"]                       pub const SIGBUS:     Self = Self(10);
    #[doc = "Segmentation fault"]              pub const SIGSEGV:    Self = Self(11);
    #[doc = "Bad system call"]                 pub const SIGSYS:     Self = Self(12);
    #[doc = "Broken pipe"]                     pub const SIGPIPE:    Self = Self(13);
    #[doc = "Alarm clock"]                     pub const SIGALRM:    Self = Self(14);
    #[doc = "Terminated"]                      pub const SIGTERM:    Self = Self(15);
    #[doc = "Unknown signal"]                  pub const UNKNOWN:    Self = Self(143);
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[rustfmt::skip]
        let s = match *self {
            Signal::SIGZERO => "SIGZERO - Signal 0",
            Signal::SIGHUP  => "SIGHUP - Hangup",
            Signal::SIGINT  => "SIGINT - Interrupt",
            Signal::SIGQUIT => "SIGQUIT - Quit",
            Signal::SIGILL  => "SIGILL - Illegal instruction",
            Signal::SIGTRAP => "SIGTRAP - Trace/breakpoint trap",
            Signal::SIGABRT => "SIGABRT - Aborted",
            Signal::SIGEMT  => "SIGEMT - Emulation trap",
            Signal::SIGFPE  => "SIGFPE - Arithmetic exception",
            Signal::SIGKILL => "SIGKILL - Killed",
            Signal::SIGBUS  => "SIGBUS - Bus error",
            Signal::SIGSEGV => "SIGSEGV - Segmentation fault",
            Signal::SIGSYS  => "SIGSYS - Bad system call",
            Signal::SIGPIPE => "SIGPIPE - Broken pipe",
            Signal::SIGALRM => "SIGALRM - Alarm clock",
            Signal::SIGTERM => "SIGTERM - Terminated",
            Signal::UNKNOWN => "UNKNOWN - Unknown signal",
            _ => return write!(f, "signal {}", self.0),
        };

        write!(f, "{}", s)
    }
}
