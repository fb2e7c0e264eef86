use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A boolean story fact. Every flag starts out unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Logged in to the home computer.
    LoggedIn,
    /// The home computer password has been found.
    PasswordCracked,
    /// The encrypted first message has appeared on screen.
    FirstMessageReceived,
    /// The first message has been decrypted.
    MessageDecrypted,
    /// The caller in the phone booth has been heard.
    OracleContacted,
    /// The contact in the cafe has spoken to the player.
    MetContact,
    /// The public phone is ringing.
    PhoneRinging,
    /// The diskette has been revealed by the terminal hack.
    DisketteReceived,
    /// The diskette has been read on the home computer.
    DisketteRead,
    /// The port scan at the server farm succeeded.
    ServerHacked,
    /// The keycard was accepted by the card reader.
    CardUsed,
    /// The numpad accepted the door code.
    CodeCorrect,
    /// Card and code are both accepted.
    AccessGranted,
    /// The server farm door has been opened.
    DoorOpen,
}

impl Flag {
    /// Every flag, in declaration order.
    pub const ALL: [Flag; 14] = [
        Flag::LoggedIn,
        Flag::PasswordCracked,
        Flag::FirstMessageReceived,
        Flag::MessageDecrypted,
        Flag::OracleContacted,
        Flag::MetContact,
        Flag::PhoneRinging,
        Flag::DisketteReceived,
        Flag::DisketteRead,
        Flag::ServerHacked,
        Flag::CardUsed,
        Flag::CodeCorrect,
        Flag::AccessGranted,
        Flag::DoorOpen,
    ];
}

/// The set of flags currently set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet(BTreeSet<Flag>);

impl FlagSet {
    /// Whether `flag` is set.
    pub fn has(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    /// Set `flag`. Returns true if it was not set before.
    pub fn set(&mut self, flag: Flag) -> bool {
        let changed = self.0.insert(flag);
        if changed {
            log::debug!("flag set: {flag:?}");
        }
        changed
    }

    /// Clear `flag`. Returns true if it was set before.
    pub fn clear(&mut self, flag: Flag) -> bool {
        let changed = self.0.remove(&flag);
        if changed {
            log::debug!("flag cleared: {flag:?}");
        }
        changed
    }

    /// Iterate over the set flags.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}

/// A replacement text that applies once a flag is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// The flag that activates this variant.
    pub when: Flag,
    /// The text shown while the flag is set.
    pub text: String,
}

/// Text whose rendering depends on story flags.
///
/// Content never changes at runtime; instead each text carries the variants it
/// can turn into, and the current [`FlagSet`] picks one when it is displayed.
/// In JSON a text is either a plain string or `{"text": ..., "variants": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextRepr", into = "TextRepr")]
pub struct Text {
    /// Text shown when no variant applies.
    pub base: String,
    /// Variants in priority order; the last matching one wins.
    pub variants: Vec<Variant>,
}

impl Text {
    /// Create a plain text without variants.
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variants: Vec::new(),
        }
    }

    /// Add a variant that replaces the text once `when` is set.
    pub fn with_variant(mut self, when: Flag, text: impl Into<String>) -> Self {
        self.variants.push(Variant {
            when,
            text: text.into(),
        });
        self
    }

    /// Render the text for the given flags.
    pub fn render(&self, flags: &FlagSet) -> &str {
        self.variants
            .iter()
            .rev()
            .find(|v| flags.has(v.when))
            .map_or(self.base.as_str(), |v| v.text.as_str())
    }

    /// Whether the base text is empty.
    pub fn is_empty(&self) -> bool {
        self.base.trim().is_empty()
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Rich {
        text: String,
        #[serde(default)]
        variants: Vec<Variant>,
    },
}

impl From<TextRepr> for Text {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Plain(base) => Self::plain(base),
            TextRepr::Rich { text, variants } => Self {
                base: text,
                variants,
            },
        }
    }
}

impl From<Text> for TextRepr {
    fn from(text: Text) -> Self {
        if text.variants.is_empty() {
            Self::Plain(text.base)
        } else {
            Self::Rich {
                text: text.base,
                variants: text.variants,
            }
        }
    }
}
