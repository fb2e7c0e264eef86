//! The port-scan minigame at the server farm.
//!
//! A scan shows the open ports in random order. The player has a fixed
//! number of connection attempts to pick the telnet port by its position.

use rand::Rng;
use rand::seq::SliceRandom;

/// Ports found by every scan.
pub const PORTS: [&str; 6] = [
    "21 (FTP)",
    "22 (SSH)",
    "23 (TELNET)",
    "80 (HTTP)",
    "443 (HTTPS)",
    "6667 (IRC)",
];

/// The port that lets the player in.
pub const TARGET_PORT: &str = "23 (TELNET)";

/// Intercepted system message pointing at the target port (ROT13).
pub const INTERCEPTED_HINT: &str =
    "QRE GRYARG-MHTEVSS VFG NYG, AHGMR QRA CBEG, QRE BSG SHRE HAFVPURER IREOVAQHATRA IREJRAQRG JVEQ.";

/// Where a scan stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a guess.
    Awaiting {
        /// Connection attempts still available.
        attempts_left: u32,
    },
    /// The target port was picked.
    Succeeded,
    /// All attempts were used up.
    Exhausted,
}

/// Outcome of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// The input was not a number. No attempt used.
    NotANumber,
    /// The number is not a listed position. No attempt used.
    OutOfRange,
    /// The target port was picked.
    Hit {
        /// The chosen port label.
        port: &'static str,
    },
    /// Another port was picked and one attempt used.
    Miss {
        /// The chosen port label.
        port: &'static str,
        /// Attempts remaining; zero means the scan is exhausted.
        attempts_left: u32,
    },
    /// The scan is already over.
    Closed,
}

/// One run of the minigame.
#[derive(Debug, Clone)]
pub struct PortScan {
    ports: Vec<&'static str>,
    phase: Phase,
}

impl PortScan {
    /// Scan with freshly shuffled ports and `attempts` connection attempts.
    pub fn start<R: Rng + ?Sized>(rng: &mut R, attempts: u32) -> Self {
        let mut ports = PORTS.to_vec();
        ports.shuffle(rng);
        Self {
            ports,
            phase: Phase::Awaiting {
                attempts_left: attempts.max(1),
            },
        }
    }

    /// Ports in display order.
    pub fn ports(&self) -> &[&'static str] {
        &self.ports
    }

    /// 1-based display position of the target port.
    pub fn target_position(&self) -> usize {
        self.ports
            .iter()
            .position(|p| *p == TARGET_PORT)
            .map_or(0, |i| i + 1)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Try to connect to the port at the 1-based position typed by the player.
    pub fn guess(&mut self, input: &str) -> Guess {
        let Phase::Awaiting { attempts_left } = self.phase else {
            return Guess::Closed;
        };
        let Ok(position) = input.trim().parse::<usize>() else {
            return Guess::NotANumber;
        };
        let Some(port) = position
            .checked_sub(1)
            .and_then(|i| self.ports.get(i))
            .copied()
        else {
            return Guess::OutOfRange;
        };

        if port == TARGET_PORT {
            self.phase = Phase::Succeeded;
            return Guess::Hit { port };
        }

        let attempts_left = attempts_left.saturating_sub(1);
        self.phase = if attempts_left == 0 {
            Phase::Exhausted
        } else {
            Phase::Awaiting { attempts_left }
        };
        Guess::Miss {
            port,
            attempts_left,
        }
    }
}
