//! Scripted events checked once per turn.

use kb_core::{Flag, World};

use crate::config::GameConfig;
use crate::player::PlayerState;
use crate::scripts::story;

/// A story event that fires on its own when its conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The encrypted message appears on the home computer.
    FirstMessage,
    /// The public phone starts ringing.
    PhoneRing,
}

impl Trigger {
    /// Evaluation order.
    pub const ORDER: [Trigger; 2] = [Trigger::FirstMessage, Trigger::PhoneRing];

    /// Whether the preconditions hold. Armed triggers still roll [`Trigger::chance`].
    pub fn armed(self, state: &PlayerState) -> bool {
        let here = state.location.as_str();
        match self {
            Self::FirstMessage => here == story::APARTMENT && !state.has(Flag::FirstMessageReceived),
            Self::PhoneRing => {
                here == story::STRASSE
                    && state.has(Flag::DisketteRead)
                    && !state.has(Flag::PhoneRinging)
                    && !state.has(Flag::OracleContacted)
            }
        }
    }

    /// Chance to fire per armed turn.
    pub fn chance(self, config: &GameConfig) -> f64 {
        match self {
            Self::FirstMessage => 1.0,
            Self::PhoneRing => config.ring_chance,
        }
    }
}

/// Triggers do not run while the player is logged in or inside the forum.
pub fn suspended(state: &PlayerState, world: &World) -> bool {
    state.has(Flag::LoggedIn)
        || world
            .location(&state.location)
            .is_some_and(|l| l.requires_login)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::LocationId;

    fn state_at(id: &str) -> PlayerState {
        PlayerState::new(LocationId::new(id), 10)
    }

    #[test]
    fn first_message_only_at_home_and_once() {
        let mut state = state_at(story::APARTMENT);
        assert!(Trigger::FirstMessage.armed(&state));
        state.set(Flag::FirstMessageReceived);
        assert!(!Trigger::FirstMessage.armed(&state));
        assert!(!Trigger::FirstMessage.armed(&state_at(story::STRASSE)));
    }

    #[test]
    fn phone_needs_diskette_read_on_the_street() {
        let mut state = state_at(story::STRASSE);
        assert!(!Trigger::PhoneRing.armed(&state));
        state.set(Flag::DisketteRead);
        assert!(Trigger::PhoneRing.armed(&state));
        state.set(Flag::PhoneRinging);
        assert!(!Trigger::PhoneRing.armed(&state));
        state.clear(Flag::PhoneRinging);
        state.set(Flag::OracleContacted);
        assert!(!Trigger::PhoneRing.armed(&state));
    }

    #[test]
    fn suspended_when_logged_in_or_in_forum() {
        let world = World::embedded().unwrap();
        let mut state = state_at(story::APARTMENT);
        assert!(!suspended(&state, &world));
        state.set(Flag::LoggedIn);
        assert!(suspended(&state, &world));
        state.clear(Flag::LoggedIn);
        state.move_to(LocationId::new(story::KANINCHENBAU_FORUM));
        assert!(suspended(&state, &world));
    }

    #[test]
    fn chances_follow_config() {
        let cfg = GameConfig::default().with_ring_chance(0.5);
        assert!((Trigger::PhoneRing.chance(&cfg) - 0.5).abs() < f64::EPSILON);
        assert!((Trigger::FirstMessage.chance(&cfg) - 1.0).abs() < f64::EPSILON);
    }
}
