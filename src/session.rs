//! Session boundary for interactive front-ends

/// One line of caller input, interpreted against the termination token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput<'a> {
    /// The termination token; no further turns should run
    Exit,
    Message(&'a str),
}

impl<'a> SessionInput<'a> {
    /// Strip the line terminator and compare against `exit_token` exactly
    pub fn parse(line: &'a str, exit_token: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        if line == exit_token {
            SessionInput::Exit
        } else {
            SessionInput::Message(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_token_ends_session() {
        assert_eq!(SessionInput::parse("exit", "exit"), SessionInput::Exit);
        assert_eq!(SessionInput::parse("exit\n", "exit"), SessionInput::Exit);
        assert_eq!(SessionInput::parse("exit\r\n", "exit"), SessionInput::Exit);
        assert_eq!(SessionInput::parse("quit", "quit"), SessionInput::Exit);
    }

    #[test]
    fn test_near_misses_are_messages() {
        for line in ["Exit", " exit", "exit now", "exit.", ""] {
            assert_eq!(
                SessionInput::parse(line, "exit"),
                SessionInput::Message(line)
            );
        }
    }
}
