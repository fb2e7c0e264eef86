//! Game engine for the Kaninchenbau text adventure.
//!
//! Parses German commands, runs the story scripts against a [`kb_core::World`],
//! tracks the player's flags and alert level, and narrates everything through
//! a [`Console`]. The console is the only I/O seam, so a whole game can be
//! played from a script in tests.

/// Alert level and its narration bands.
pub mod alert;
/// Session tuning.
pub mod config;
/// Narration and input abstraction.
pub mod console;
/// Error types for the fiction engine.
pub mod error;
/// Command parsing and verb suggestions.
pub mod parser;
/// Player state management.
pub mod player;
/// The port-scan minigame.
pub mod portscan;
/// Story-specific interaction tables.
pub mod scripts;
/// Interactive fiction session management.
pub mod session;
/// Per-turn scripted events.
pub mod trigger;

pub use alert::{AlertLevel, AlertShift, Band};
pub use config::GameConfig;
pub use console::{Console, Input, Pace, ScriptedConsole, Tone};
pub use error::{Ending, FictionError, FictionResult};
pub use parser::{Command, TerminalCommand, parse_command, parse_terminal};
pub use player::PlayerState;
pub use portscan::PortScan;
pub use session::{FictionSession, PROMPT};
pub use trigger::Trigger;
