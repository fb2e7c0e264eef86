//! Tuning for a game session.

/// Tuning for a game session.
///
/// Probabilities are clamped to `0.0..=1.0`; a NaN probability counts as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// RNG seed for reproducible games. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Upper bound of the alert level.
    pub max_alert: u32,
    /// Alert level at which the player is caught.
    pub game_over_level: u32,
    /// Alert level from which the strong ambient warning may appear.
    pub high_warning_level: u32,
    /// Chance of the strong ambient warning per evaluation.
    pub high_warning_chance: f64,
    /// Alert level from which the mild ambient warning may appear.
    pub mid_warning_level: u32,
    /// Chance of the mild ambient warning per evaluation.
    pub mid_warning_chance: f64,
    /// Chance that hacking the public terminal succeeds.
    pub hack_chance: f64,
    /// Chance per qualifying turn that the public phone starts ringing.
    pub ring_chance: f64,
    /// Password guesses per login attempt.
    pub password_attempts: u32,
    /// Connection attempts per port scan.
    pub port_scan_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_alert: 10,
            game_over_level: 8,
            high_warning_level: 6,
            high_warning_chance: 1.0 / 3.0,
            mid_warning_level: 4,
            mid_warning_chance: 1.0 / 5.0,
            hack_chance: 1.0 / 3.0,
            ring_chance: 1.0 / 8.0,
            password_attempts: 3,
            port_scan_attempts: 2,
        }
    }
}

fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the chance that the terminal hack succeeds.
    pub fn with_hack_chance(mut self, chance: f64) -> Self {
        self.hack_chance = probability(chance);
        self
    }

    /// Set the per-turn chance that the phone rings.
    pub fn with_ring_chance(mut self, chance: f64) -> Self {
        self.ring_chance = probability(chance);
        self
    }

    /// Set the chances of the strong and the mild ambient warning.
    pub fn with_warning_chances(mut self, high: f64, mid: f64) -> Self {
        self.high_warning_chance = probability(high);
        self.mid_warning_chance = probability(mid);
        self
    }

    /// Set the game-over level (clamped to 1..=max_alert).
    pub fn with_game_over_level(mut self, level: u32) -> Self {
        self.game_over_level = level.clamp(1, self.max_alert);
        self
    }

    /// Set the password guesses per login (at least 1).
    pub fn with_password_attempts(mut self, attempts: u32) -> Self {
        self.password_attempts = attempts.max(1);
        self
    }

    /// Set the connection attempts per port scan (at least 1).
    pub fn with_port_scan_attempts(mut self, attempts: u32) -> Self {
        self.port_scan_attempts = attempts.max(1);
        self
    }

    /// A seeded configuration with every chance set to zero.
    pub fn deterministic(seed: u64) -> Self {
        Self::default()
            .with_seed(seed)
            .with_hack_chance(0.0)
            .with_ring_chance(0.0)
            .with_warning_chances(0.0, 0.0)
    }
}
