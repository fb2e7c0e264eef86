//! Error types for the fiction engine.
//!
//! Most variants are refusals: the player asked for something that cannot
//! happen right now. Their `Display` text is the in-game line narrated to the
//! player, and a handler that returns one has not changed any state.

use std::fmt;

use kb_core::CoreError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// How a session ended. Every ending is a normal end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player quit.
    Quit,
    /// The alert level reached the game-over threshold.
    Caught,
    /// Input was interrupted or closed.
    Interrupted,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("quit"),
            Self::Caught => f.write_str("caught"),
            Self::Interrupted => f.write_str("interrupted"),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!(" MEINTEST DU '{h}'?"))
        .unwrap_or_default()
}

/// Errors that can occur during interactive fiction.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The command is missing its arguments or connector word.
    #[error("{0}")]
    Usage(&'static str),

    /// The verb is not known.
    #[error("ICH VERSTEHE '{verb}' NICHT.{}", hint_suffix(.hint))]
    UnknownVerb {
        /// The verb as typed.
        verb: String,
        /// A similar known verb, if any.
        hint: Option<String>,
    },

    /// No exit leads that way.
    #[error("DU KANNST NICHT NACH '{0}' GEHEN.")]
    NoExit(String),

    /// The destination can only be reached through the computer.
    #[error("DU MUSST DAFUER DEN COMPUTER BENUTZEN.")]
    LoginRequired,

    /// No such item lies here.
    #[error("HIER GIBT ES KEIN '{0}'.")]
    NotHere(String),

    /// The item cannot be picked up.
    #[error("DU KANNST '{0}' NICHT NEHMEN.")]
    CannotTake(String),

    /// The player does not carry the item.
    #[error("DU HAST '{0}' NICHT.")]
    NotCarried(String),

    /// Nothing by that name can be used here.
    #[error("DU KANNST '{0}' HIER NICHT BENUTZEN.")]
    CannotUse(String),

    /// No interaction exists between the item and the object here.
    #[error("DU KANNST '{item}' NICHT MIT '{object}' BENUTZEN.")]
    CannotCombine {
        /// The carried item.
        item: String,
        /// The object it was used with.
        object: String,
    },

    /// No character by that name is here.
    #[error("HIER IST NIEMAND MIT DEM NAMEN '{0}'.")]
    NobodyNamed(String),

    /// Nothing to look at by that name.
    #[error("DU SIEHST NICHTS BESONDERES AN '{0}'.")]
    NothingSpecial(String),

    /// Nothing to read by that name.
    #[error("DU KANNST '{0}' NICHT LESEN ODER HAST ES NICHT.")]
    CannotRead(String),

    /// Nothing to open by that name.
    #[error("DU KANNST '{0}' NICHT OEFFNEN.")]
    CannotOpen(String),

    /// Nothing to push by that name.
    #[error("DU KANNST '{0}' NICHT DRUECKEN ODER ES GIBT HIER NICHTS ZU DRUECKEN.")]
    CannotPush(String),

    /// Nothing to hack by that name.
    #[error("DU KANNST '{0}' HIER NICHT HACKEN.")]
    CannotHack(String),

    /// Nothing to scan by that name.
    #[error("HIER GIBT ES NICHTS SINNVOLLES ZU SCANNEN MIT '{0}'.")]
    NothingToScan(String),

    /// Nothing to decrypt by that name.
    #[error(
        "ES GIBT HIER KEIN '{0}' ZUM DEKRYPTIEREN, DU HAST ES NICHT, ODER DER SCHLUESSEL IST FALSCH."
    )]
    NothingToDecrypt(String),

    /// The current location has no numpad.
    #[error("HIER GIBT ES KEIN NUMPAD, UM EINEN CODE EINZUGEBEN.")]
    NoNumpad,

    /// A one-shot action was already completed.
    #[error("{0}")]
    AlreadyDone(&'static str),

    /// The computer interface does not know the command.
    #[error(
        "UNBEKANNTER COMPUTER-BEFEHL: '{0}'. Verfuegbar: ONLINE GEHEN, LIES DISKETTE, SCANNE NETZWERK, LOGOUT"
    )]
    UnknownTerminalCommand(String),

    /// A precondition is not met.
    #[error("{0}")]
    Refused(&'static str),

    /// The game is over.
    #[error("game ended: {0}")]
    Ended(Ending),

    /// Console input or output failed.
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    /// The world model rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FictionError {
    /// Whether this error is an in-game refusal that the session narrates and survives.
    pub fn is_refusal(&self) -> bool {
        !matches!(self, Self::Ended(_) | Self::Io(_) | Self::Core(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_verb_with_and_without_hint() {
        let plain = FictionError::UnknownVerb {
            verb: "TANZE".into(),
            hint: None,
        };
        assert_eq!(plain.to_string(), "ICH VERSTEHE 'TANZE' NICHT.");

        let hinted = FictionError::UnknownVerb {
            verb: "HACKEN".into(),
            hint: Some("HACKE".into()),
        };
        assert_eq!(
            hinted.to_string(),
            "ICH VERSTEHE 'HACKEN' NICHT. MEINTEST DU 'HACKE'?"
        );
    }

    #[test]
    fn refusals_and_endings() {
        assert!(FictionError::LoginRequired.is_refusal());
        assert!(FictionError::Usage("WOHIN SOLL ES GEHEN?").is_refusal());
        assert!(!FictionError::Ended(Ending::Caught).is_refusal());
        assert!(!FictionError::Io(std::io::Error::other("x")).is_refusal());
    }
}
