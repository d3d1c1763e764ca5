pub(self) mod prelude {
    pub use super::ParseCommand;
    pub use crate::protocol::common::decode_hex;
}

/// Parses the argument portion of a command (i.e: everything after the
/// command's name).
pub trait ParseCommand<'a>: Sized {
    /// Try to extract a packet from the provided body. Returns `None` if the
    /// arguments are malformed.
    fn from_packet(body: &'a [u8]) -> Option<Self>;
}

// TODO: use a trie structure for more efficient longest-prefix matching
macro_rules! prefix_match {
    (
        match $val:expr => [$name:ident|$rest:ident] {
            $($prefix:literal => $arm:block)*
            _ => $other:block
        }
    ) => {{
        let $name: &[u8];
        let $rest: &[u8];
        match $val {
            $(_ if $val.starts_with($prefix.as_bytes()) => {
                $name = &$val[..$prefix.len()];
                $rest = &$val[$prefix.len()..];
                $arm
            })*
            _ => $other
        }
    }};
}

macro_rules! commands {
    ($($name:literal => $mod:ident::$command:ident$(<$lifetime:lifetime>)?,)*) => {
        $(
            #[allow(non_snake_case, non_camel_case_types)]
            pub mod $mod;
        )*
        $(pub use $mod::$command;)*

        /// GDB commands
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        pub enum Command<'a> {
            $($command($command<$($lifetime)?>),)*
            /// Anything the stub doesn't implement (answered with an empty
            /// packet).
            Unknown(&'a [u8]),
        }

        impl<'a> Command<'a> {
            pub fn from_packet_body(body: &'a [u8]) -> Result<Command<'a>, CommandParseError<'a>> {
                if body.is_empty() {
                    return Ok(Command::Unknown(body));
                }

                let command = prefix_match! {
                    match body => [name | rest] {
                        $($name => {
                            let cmd = <$command>::from_packet(rest)
                                .ok_or(CommandParseError::MalformedCommand(name))?;
                            Command::$command(cmd)
                        })*
                        _ => { Command::Unknown(body) }
                    }
                };

                Ok(command)
            }
        }
    };
}

/// Command parse error
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError<'a> {
    /// catch-all
    MalformedCommand(&'a [u8]),
}

commands! {
    "?" => question_mark::QuestionMark,
    "c" => _c::c,
    "D" => _d_upcase::D,
    "g" => _g::g,
    "H" => _h_upcase::H,
    "k" => _k::k,
    "m" => _m::m,
    "p" => _p::p,
    "P" => _p_upcase::P<'a>,
    "qAttached" => _qAttached::qAttached,
    "qSupported" => _qSupported::qSupported<'a>,
    "QStartNoAckMode" => _QStartNoAckMode::QStartNoAckMode,
    "s" => _s::s,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_prefix() {
        assert!(matches!(Command::from_packet_body(b"g"), Ok(Command::g(_))));
        assert!(matches!(
            Command::from_packet_body(b"?"),
            Ok(Command::QuestionMark(_))
        ));
        assert!(matches!(
            Command::from_packet_body(b"m20000000,10"),
            Ok(Command::m(m {
                addr: 0x2000_0000,
                len: 0x10
            }))
        ));
        assert!(matches!(
            Command::from_packet_body(b"p0f"),
            Ok(Command::p(p { reg_id: 15 }))
        ));
    }

    #[test]
    fn unknown_commands() {
        for body in [&b"G0000"[..], b"vMustReplyEmpty", b"qC", b"Z0,1000,2", b""] {
            assert!(matches!(
                Command::from_packet_body(body),
                Ok(Command::Unknown(_))
            ));
        }
    }

    #[test]
    fn malformed_arguments() {
        assert_eq!(
            Command::from_packet_body(b"mzz,4").unwrap_err(),
            CommandParseError::MalformedCommand(b"m")
        );
        assert_eq!(
            Command::from_packet_body(b"p").unwrap_err(),
            CommandParseError::MalformedCommand(b"p")
        );
        assert_eq!(
            Command::from_packet_body(b"g00").unwrap_err(),
            CommandParseError::MalformedCommand(b"g")
        );
        assert_eq!(
            Command::from_packet_body(b"Pxx=01020304").unwrap_err(),
            CommandParseError::MalformedCommand(b"P")
        );
        assert_eq!(
            Command::from_packet_body(b"mxx,4").unwrap_err(),
            CommandParseError::MalformedCommand(b"m")
        );
        assert_eq!(
            Command::from_packet_body(b"D;x").unwrap_err(),
            CommandParseError::MalformedCommand(b"D")
        );
    }
}
