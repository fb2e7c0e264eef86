use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flag::{Flag, FlagSet, Text};

macro_rules! story_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier. Identifiers are case-insensitive and stored uppercased.
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(id.as_ref().trim().to_uppercase())
            }

            /// The identifier as written in commands and content.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

story_id! {
    /// Key of a location, e.g. `APARTMENT`.
    LocationId
}

story_id! {
    /// Key of an item, e.g. `SCHLUESSELKARTE`.
    ItemId
}

/// Where an item currently is. Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    /// Lying at a location.
    At(LocationId),
    /// Carried by the player. `order` is the pickup sequence number.
    Carried {
        /// Monotonic pickup counter, used to list the inventory in pickup order.
        order: u32,
    },
    /// Not in the world (yet).
    #[default]
    Nowhere,
}

/// A named exit out of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// The word the player types, e.g. `RAUS`.
    pub keyword: String,
    /// Destination location.
    pub to: LocationId,
}

/// A place the player can be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique key.
    pub id: LocationId,
    /// Display name, shown in the location header.
    #[serde(default)]
    pub name: String,
    /// Long description shown on every display.
    #[serde(default)]
    pub description: String,
    /// Paragraphs shown instead of the description the first time the location is displayed.
    #[serde(default)]
    pub first_visit: Vec<String>,
    /// Things that can be looked at or used here without being items.
    #[serde(default)]
    pub interactables: Vec<String>,
    /// Detail text per interactable (or item name).
    #[serde(default)]
    pub details: BTreeMap<String, Text>,
    /// Exits in display order.
    #[serde(default)]
    pub exits: Vec<Exit>,
    /// Characters present here.
    #[serde(default)]
    pub npcs: Vec<String>,
    /// Only reachable while logged in to the home computer.
    #[serde(default)]
    pub requires_login: bool,
    /// Lines narrated when the player is caught here.
    #[serde(default)]
    pub doom: Vec<String>,
}

impl Location {
    /// Detail text for `key`, rendered against the current flags.
    pub fn detail(&self, key: &str, flags: &FlagSet) -> Option<&str> {
        self.details.get(key).map(|t| t.render(flags))
    }

    /// Whether `name` is an interactable of this location.
    pub fn has_interactable(&self, name: &str) -> bool {
        self.interactables.iter().any(|i| i == name)
    }

    /// Whether `name` is a character present here.
    pub fn has_npc(&self, name: &str) -> bool {
        self.npcs.iter().any(|n| n == name)
    }
}

/// Text used once a story flag has made an item obsolete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retirement {
    /// The flag that retires the item.
    pub by: Flag,
    /// Narrated instead of picking the item up.
    pub take: String,
    /// Narrated instead of reading the item.
    pub read: String,
}

fn default_takable() -> bool {
    true
}

/// A thing that can lie somewhere or be carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique key, also the word the player types.
    pub id: ItemId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Description, possibly flag-dependent.
    #[serde(default)]
    pub description: Text,
    /// Whether the item carries text to read.
    #[serde(default)]
    pub readable: bool,
    /// Whether the item can be picked up.
    #[serde(default = "default_takable")]
    pub takable: bool,
    /// Initial location. `None` means the item enters the world through a script.
    #[serde(default)]
    pub starts_at: Option<LocationId>,
    /// Optional retirement once a flag is set.
    #[serde(default)]
    pub retired: Option<Retirement>,
    #[serde(skip)]
    pub(crate) placement: Placement,
}

impl Item {
    /// Current placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Whether the item lies at `location`.
    pub fn is_at(&self, location: &LocationId) -> bool {
        matches!(&self.placement, Placement::At(here) if here == location)
    }

    /// Whether the player carries the item.
    pub fn is_carried(&self) -> bool {
        matches!(self.placement, Placement::Carried { .. })
    }

    /// The retirement record, if its flag is set.
    pub fn retirement(&self, flags: &FlagSet) -> Option<&Retirement> {
        self.retired.as_ref().filter(|r| flags.has(r.by))
    }
}
