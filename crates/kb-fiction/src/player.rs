//! Player state management.

use std::collections::BTreeSet;

use kb_core::{Flag, FlagSet, LocationId};
use log::debug;

use crate::alert::AlertLevel;

/// The player's current state in the fiction session.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Current location.
    pub location: LocationId,
    /// Story flags.
    pub flags: FlagSet,
    /// Suspicion meter.
    pub alert: AlertLevel,
    /// Plaintext of the decrypted first message.
    pub decrypted: Option<String>,
    /// Door code learned from the server-farm shell.
    pub access_code: Option<String>,
    visited: BTreeSet<LocationId>,
}

impl PlayerState {
    /// Create a new player state at the given location.
    pub fn new(location: LocationId, max_alert: u32) -> Self {
        Self {
            location,
            flags: FlagSet::default(),
            alert: AlertLevel::new(max_alert),
            decrypted: None,
            access_code: None,
            visited: BTreeSet::new(),
        }
    }

    /// Check if a story flag is set.
    pub fn has(&self, flag: Flag) -> bool {
        self.flags.has(flag)
    }

    /// Set a story flag.
    pub fn set(&mut self, flag: Flag) -> bool {
        self.flags.set(flag)
    }

    /// Clear a story flag.
    pub fn clear(&mut self, flag: Flag) -> bool {
        self.flags.clear(flag)
    }

    /// Mark `location` as displayed. Returns `true` the first time.
    pub fn first_visit(&mut self, location: &LocationId) -> bool {
        self.visited.insert(location.clone())
    }

    /// Whether `location` has been displayed before.
    pub fn has_visited(&self, location: &LocationId) -> bool {
        self.visited.contains(location)
    }

    /// Move the player.
    pub fn move_to(&mut self, location: LocationId) {
        debug!("player: {} -> {location}", self.location);
        self.location = location;
    }
}
