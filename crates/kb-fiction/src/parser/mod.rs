//! Command parsing and verb suggestions.

mod command;
mod resolver;
mod terminal;

pub use command::{Command, normalize, parse_command};
pub use resolver::{fuzzy_match, suggest_verb};
pub use terminal::{TerminalCommand, parse_terminal};
