//! The suspicion meter.
//!
//! The alert level rises with noticeable actions and falls only when the
//! story allows the player to calm down. Every change is narrated; the
//! narration depends on the band the level ends up in.

/// Bands of the alert level, used for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Band {
    /// 0-2.
    Unnoticed,
    /// 3-4.
    Uneasy,
    /// 5-6.
    Watched,
    /// 7 and above.
    Compromised,
}

impl Band {
    /// The band a level falls into.
    pub fn of(level: u32) -> Self {
        match level {
            0..=2 => Self::Unnoticed,
            3..=4 => Self::Uneasy,
            5..=6 => Self::Watched,
            _ => Self::Compromised,
        }
    }

    /// Narration for a rise that ends in this band.
    pub fn narration(self) -> &'static str {
        match self {
            Self::Unnoticed => "(Du fuehlst dich noch relativ unbemerkt.)",
            Self::Uneasy => "(Ein ungutes Gefuehl... als ob jemand deine Aktivitaeten bemerkt.)",
            Self::Watched => "[SYSTEM WARNUNG: Erhoehte Ueberwachungsaktivitaet in deinem Sektor!]",
            Self::Compromised => {
                "[ALARM! HOECHSTE GEFAHRENSTUFE! DEINE POSITION IST WAHRSCHEINLICH KOMPROMITTIERT!]"
            }
        }
    }
}

/// The direction of an alert change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertShift {
    /// The level went up (or was pushed against the maximum) and is now in this band.
    Rose(Band),
    /// The level went down (or was pushed against zero).
    Fell,
}

impl AlertShift {
    /// The line narrated for this change.
    pub fn narration(&self) -> &'static str {
        match self {
            Self::Rose(band) => band.narration(),
            Self::Fell => "(Die digitale Anspannung laesst etwas nach.)",
        }
    }
}

/// Alert level, always within `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertLevel {
    value: u32,
    max: u32,
}

impl AlertLevel {
    /// A zero alert level with the given maximum.
    pub fn new(max: u32) -> Self {
        Self { value: 0, max }
    }

    /// An alert level at `value`, clamped to `0..=max`.
    pub fn with_value(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Current level.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Band of the current level.
    pub fn band(&self) -> Band {
        Band::of(self.value)
    }

    /// Add `delta` and clamp. A zero delta changes nothing and returns `None`.
    ///
    /// The shift follows the sign of `delta`, even when clamping kept the
    /// level where it was.
    pub fn adjust(&mut self, delta: i32) -> Option<AlertShift> {
        if delta == 0 {
            return None;
        }
        let next = (i64::from(self.value) + i64::from(delta)).clamp(0, i64::from(self.max));
        self.value = u32::try_from(next).unwrap_or(self.max);
        Some(if delta > 0 {
            AlertShift::Rose(self.band())
        } else {
            AlertShift::Fell
        })
    }
}
