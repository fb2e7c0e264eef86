//! The story content document.
//!
//! Content is plain JSON. The default story is compiled into the crate; an
//! alternative document can be loaded from disk. Validation never rejects a
//! document except for a missing start location: every other problem is
//! repaired, logged with `warn!`, and reported as a [`ContentWarning`].

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::entity::{Item, ItemId, Location, LocationId};
use crate::error::{CoreError, CoreResult};

const EMBEDDED: &str = include_str!("../content/matrix.json");

/// Fixed answers to the story's puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secrets {
    /// Home computer password, compared case-insensitively.
    pub password: String,
    /// Key that decrypts the first message.
    pub cipher_key: String,
    /// The first message as it appears on screen.
    pub ciphertext: String,
    /// The first message after decryption.
    pub plaintext: String,
    /// Numpad code of the server farm door.
    pub door_code: String,
}

/// A complete story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Story title.
    #[serde(default)]
    pub title: String,
    /// Where the player begins.
    pub start: LocationId,
    /// All locations.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// All items.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Puzzle answers.
    pub secrets: Secrets,
}

/// A non-fatal problem found while validating content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentWarning {
    /// A location or item lacks a required field.
    MissingField {
        /// `"location"` or `"item"`.
        kind: &'static str,
        /// The offending id.
        id: String,
        /// The missing field.
        field: &'static str,
    },
    /// Two locations share an id. The later one is ignored.
    DuplicateLocation(LocationId),
    /// Two items share an id. The later one is ignored.
    DuplicateItem(ItemId),
    /// An exit leads to an unknown location. The exit is dropped.
    DanglingExit {
        /// Location the exit belongs to.
        from: LocationId,
        /// Exit keyword.
        keyword: String,
        /// Unknown destination.
        to: LocationId,
    },
    /// An item starts in an unknown location. It starts nowhere instead.
    UnknownStartingLocation {
        /// The item.
        item: ItemId,
        /// Unknown location.
        location: LocationId,
    },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { kind, id, field } => {
                write!(f, "{kind} \"{id}\" has no {field}")
            }
            Self::DuplicateLocation(id) => write!(f, "duplicate location \"{id}\" ignored"),
            Self::DuplicateItem(id) => write!(f, "duplicate item \"{id}\" ignored"),
            Self::DanglingExit { from, keyword, to } => {
                write!(f, "exit {keyword} of \"{from}\" leads to unknown location \"{to}\"")
            }
            Self::UnknownStartingLocation { item, location } => {
                write!(f, "item \"{item}\" starts in unknown location \"{location}\"")
            }
        }
    }
}

impl Content {
    /// The story compiled into the crate.
    pub fn embedded() -> CoreResult<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Parse content from a JSON string.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse content from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a location by id.
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    /// Repair the document in place and report what was repaired.
    ///
    /// Fails only when the start location does not exist.
    pub fn validate(&mut self) -> CoreResult<Vec<ContentWarning>> {
        let mut warnings = Vec::new();

        let mut seen = BTreeSet::new();
        self.locations.retain(|loc| {
            let fresh = seen.insert(loc.id.clone());
            if !fresh {
                warnings.push(ContentWarning::DuplicateLocation(loc.id.clone()));
            }
            fresh
        });

        let mut seen_items = BTreeSet::new();
        self.items.retain(|item| {
            let fresh = seen_items.insert(item.id.clone());
            if !fresh {
                warnings.push(ContentWarning::DuplicateItem(item.id.clone()));
            }
            fresh
        });

        for loc in &mut self.locations {
            for (field, missing) in [
                ("name", loc.name.trim().is_empty()),
                ("description", loc.description.trim().is_empty()),
            ] {
                if missing {
                    warnings.push(ContentWarning::MissingField {
                        kind: "location",
                        id: loc.id.to_string(),
                        field,
                    });
                }
            }

            let from = loc.id.clone();
            loc.exits.retain(|exit| {
                let known = seen.contains(&exit.to);
                if !known {
                    warnings.push(ContentWarning::DanglingExit {
                        from: from.clone(),
                        keyword: exit.keyword.clone(),
                        to: exit.to.clone(),
                    });
                }
                known
            });
        }

        for item in &mut self.items {
            for (field, missing) in [
                ("name", item.name.trim().is_empty()),
                ("description", item.description.is_empty()),
            ] {
                if missing {
                    warnings.push(ContentWarning::MissingField {
                        kind: "item",
                        id: item.id.to_string(),
                        field,
                    });
                }
            }

            if let Some(start) = &item.starts_at {
                if !seen.contains(start) {
                    warnings.push(ContentWarning::UnknownStartingLocation {
                        item: item.id.clone(),
                        location: start.clone(),
                    });
                    item.starts_at = None;
                }
            }
        }

        if !seen.contains(&self.start) {
            return Err(CoreError::MissingStart(self.start.clone()));
        }

        for w in &warnings {
            warn!("content: {w}");
        }
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn minimal() -> Content {
        Content::from_json(
            r#"{
                "title": "TEST",
                "start": "A",
                "locations": [
                    {"id": "A", "name": "ORT A", "description": "HIER.",
                     "exits": [{"keyword": "RAUS", "to": "B"}, {"keyword": "NIRGENDS", "to": "X"}]},
                    {"id": "B", "name": "ORT B", "description": "DORT."}
                ],
                "items": [
                    {"id": "KARTE", "name": "KARTE", "description": "EINE KARTE.", "starts_at": "A"},
                    {"id": "STEIN", "name": "STEIN", "description": "EIN STEIN.", "starts_at": "Z"}
                ],
                "secrets": {
                    "password": "pw", "cipher_key": "KEY", "ciphertext": "XYZ",
                    "plaintext": "ABC", "door_code": "1234"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn embedded_content_is_clean() {
        let mut content = Content::embedded().unwrap();
        let warnings = content.validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(content.start, LocationId::new("APARTMENT"));
        assert_eq!(content.secrets.door_code, "1999");
    }

    #[test]
    fn embedded_locations_have_exits_back() {
        let content = Content::embedded().unwrap();
        let street = content.location(&LocationId::new("STRASSE")).unwrap();
        let keywords: Vec<_> = street.exits.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, ["CAFE", "ZURUECK", "TELEFONZELLE", "SERVERFARM"]);
    }

    #[test]
    fn dangling_exit_is_dropped() {
        let mut content = minimal();
        let warnings = content.validate().unwrap();
        assert!(warnings.contains(&ContentWarning::DanglingExit {
            from: LocationId::new("A"),
            keyword: "NIRGENDS".into(),
            to: LocationId::new("X"),
        }));
        assert_eq!(content.locations[0].exits.len(), 1);
    }

    #[test]
    fn unknown_start_moves_item_nowhere() {
        let mut content = minimal();
        let warnings = content.validate().unwrap();
        assert!(warnings.contains(&ContentWarning::UnknownStartingLocation {
            item: ItemId::new("STEIN"),
            location: LocationId::new("Z"),
        }));
        assert!(content.items[1].starts_at.is_none());
    }

    #[test]
    fn missing_fields_and_duplicates_warn() {
        let mut content = minimal();
        content.locations.push(content.locations[1].clone());
        content.locations[1].description.clear();
        let warnings = content.validate().unwrap();
        assert!(warnings.contains(&ContentWarning::DuplicateLocation(LocationId::new("B"))));
        assert!(warnings.contains(&ContentWarning::MissingField {
            kind: "location",
            id: "B".into(),
            field: "description",
        }));
        assert_eq!(content.locations.len(), 2);
    }

    #[test]
    fn missing_start_is_fatal() {
        let mut content = minimal();
        content.start = LocationId::new("NIRGENDWO");
        assert!(matches!(content.validate(), Err(CoreError::MissingStart(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&minimal()).unwrap()).unwrap();
        let content = Content::load(file.path()).unwrap();
        assert_eq!(content.title, "TEST");
        assert_eq!(content.locations.len(), 2);
    }

    #[test]
    fn load_reports_parse_errors() {
        assert!(matches!(Content::from_json("{"), Err(CoreError::Parse(_))));
        assert!(matches!(
            Content::load("/definitely/not/here.json"),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn warning_display() {
        let w = ContentWarning::DuplicateItem(ItemId::new("karte"));
        assert_eq!(w.to_string(), "duplicate item \"KARTE\" ignored");
    }
}
