//! Commands of the home computer interface.

use super::command::normalize;

/// A command typed at the `COMPUTER>` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Connect to the forum.
    Online,
    /// Read the inserted diskette.
    ReadDisk,
    /// List reachable networks.
    ScanNetwork,
    /// Leave the interface and log out.
    Logout,
    /// Quit the game.
    Quit,
    /// Anything else, normalized.
    Unknown(String),
}

/// Parse a line typed at the computer prompt. Blank input yields `None`.
pub fn parse_terminal(input: &str) -> Option<TerminalCommand> {
    let input = normalize(input);
    let words: Vec<&str> = input.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return None,
        ["ONLINE"] | ["ONLINE", "GEHEN"] => TerminalCommand::Online,
        ["LIES", "DISKETTE"] => TerminalCommand::ReadDisk,
        ["SCANNE", "NETZWERK"] | ["SCAN", "NETZWERK"] | ["NETZWERK", "SCAN"] => {
            TerminalCommand::ScanNetwork
        }
        ["LOGOUT"] => TerminalCommand::Logout,
        ["QUIT"] | ["EXIT"] | ["ENDE"] => TerminalCommand::Quit,
        _ => TerminalCommand::Unknown(words.join(" ")),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_commands() {
        assert_eq!(parse_terminal("online"), Some(TerminalCommand::Online));
        assert_eq!(parse_terminal("ONLINE GEHEN"), Some(TerminalCommand::Online));
        assert_eq!(parse_terminal("lies  diskette"), Some(TerminalCommand::ReadDisk));
        for scan in ["SCANNE NETZWERK", "SCAN NETZWERK", "NETZWERK SCAN"] {
            assert_eq!(parse_terminal(scan), Some(TerminalCommand::ScanNetwork));
        }
        assert_eq!(parse_terminal(" logout "), Some(TerminalCommand::Logout));
        assert_eq!(parse_terminal("ENDE"), Some(TerminalCommand::Quit));
    }

    #[test]
    fn blank_and_unknown() {
        assert_eq!(parse_terminal("  "), None);
        assert_eq!(
            parse_terminal("format c:"),
            Some(TerminalCommand::Unknown("FORMAT C:".into()))
        );
    }
}
