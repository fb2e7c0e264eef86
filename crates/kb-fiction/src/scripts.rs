//! Resolution of story-specific interactions.
//!
//! Content supplies the words; these tables decide which scripted behaviour a
//! word triggers at a location. Every lookup is exhaustive over a closed enum
//! so the handlers match on variants instead of strings.

use kb_core::{Flag, LocationId};

/// Identifiers the scripts refer to.
pub mod story {
    /// The player's apartment.
    pub const APARTMENT: &str = "APARTMENT";
    /// The street in front of the house.
    pub const STRASSE: &str = "STRASSE";
    /// The cyber cafe.
    pub const CAFE: &str = "CAFE";
    /// Inside the phone booth.
    pub const TELEFONZELLE_INNERES: &str = "TELEFONZELLE_INNERES";
    /// In front of the server farm.
    pub const SERVER_FARM_EINGANG: &str = "SERVER_FARM_EINGANG";
    /// The online forum.
    pub const KANINCHENBAU_FORUM: &str = "KANINCHENBAU_FORUM";

    /// The note with the password hint.
    pub const ZETTEL: &str = "ZETTEL";
    /// The diskette from the cafe terminal.
    pub const DATEN_DISKETTE: &str = "DATEN_DISKETTE";
    /// The keycard from the contact.
    pub const SCHLUESSELKARTE: &str = "SCHLUESSELKARTE";

    /// Home computer.
    pub const COMPUTER: &str = "COMPUTER";
    /// Public phone.
    pub const TELEFON: &str = "TELEFON";
    /// Phone receiver.
    pub const HOERER: &str = "HOERER";
    /// Public terminal in the cafe.
    pub const TERMINAL: &str = "TERMINAL";
    /// Server farm numpad.
    pub const NUMPAD: &str = "NUMPAD";
    /// Server farm card reader.
    pub const KARTENLESER: &str = "KARTENLESER";
    /// Apartment window.
    pub const FENSTER: &str = "FENSTER";
    /// Apartment bed.
    pub const BETT: &str = "BETT";
    /// The booth seen from the street.
    pub const TELEFONZELLE: &str = "TELEFONZELLE";
    /// Server farm door.
    pub const TUER: &str = "TUER";
    /// Button in the booth.
    pub const KNOPF: &str = "KNOPF";
    /// The contact in the cafe.
    pub const MANN: &str = "MANN";
    /// The encrypted first message.
    pub const NACHRICHT: &str = "NACHRICHT";
    /// Scan target at the server farm and at home.
    pub const PORTS: &str = "PORTS";
}

use story::*;

fn is(location: &LocationId, id: &str) -> bool {
    location.as_str() == id
}

/// A location-bound object with scripted behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// The home computer.
    Computer,
    /// The public phone.
    Phone,
    /// The phone receiver.
    Receiver,
    /// The cafe terminal.
    Terminal,
    /// The server farm numpad.
    Numpad,
    /// The server farm card reader.
    CardReader,
    /// The apartment window.
    Window,
    /// The apartment bed.
    Bed,
    /// The phone booth, seen from the street.
    PhoneBooth,
    /// The server farm door.
    Door,
    /// The button in the booth.
    Button,
}

impl Fixture {
    /// The fixture `target` names at `location`, if any.
    pub fn resolve(location: &LocationId, target: &str) -> Option<Self> {
        let fixture = match (location.as_str(), target) {
            (APARTMENT, COMPUTER) => Self::Computer,
            (APARTMENT, FENSTER) => Self::Window,
            (APARTMENT, BETT) => Self::Bed,
            (STRASSE, TELEFONZELLE) => Self::PhoneBooth,
            (CAFE, TERMINAL) => Self::Terminal,
            (TELEFONZELLE_INNERES, TELEFON) => Self::Phone,
            (TELEFONZELLE_INNERES, HOERER) => Self::Receiver,
            (TELEFONZELLE_INNERES, KNOPF) => Self::Button,
            (SERVER_FARM_EINGANG, NUMPAD) => Self::Numpad,
            (SERVER_FARM_EINGANG, KARTENLESER) => Self::CardReader,
            (SERVER_FARM_EINGANG, TUER) => Self::Door,
            _ => return None,
        };
        Some(fixture)
    }
}

/// A carried item used on an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Keycard through the card reader.
    SwipeKeycard,
    /// Diskette into the home computer.
    InsertDiskette,
}

impl Interaction {
    /// The interaction for `item` used on `object` at `location`, if any.
    pub fn resolve(item: &str, object: &str, location: &LocationId) -> Option<Self> {
        match (item, object, location.as_str()) {
            (SCHLUESSELKARTE, KARTENLESER, SERVER_FARM_EINGANG) => Some(Self::SwipeKeycard),
            (DATEN_DISKETTE, COMPUTER, APARTMENT) => Some(Self::InsertDiskette),
            _ => None,
        }
    }
}

/// Something that can be hacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackTarget {
    /// The server farm, through the port scan.
    ServerFarm,
    /// The public terminal, a dice roll.
    CafeTerminal,
    /// The home computer, which wants a password instead.
    HomeComputer,
}

impl HackTarget {
    /// The hack target `target` names at `location`, if any.
    pub fn resolve(target: &str, location: &LocationId) -> Option<Self> {
        if is(location, SERVER_FARM_EINGANG)
            && matches!(target, "SERVER" | "SERVER-FARM" | "SERVERFARM" | PORTS)
        {
            return Some(Self::ServerFarm);
        }
        match (target, location.as_str()) {
            (TERMINAL, CAFE) => Some(Self::CafeTerminal),
            (COMPUTER, APARTMENT) => Some(Self::HomeComputer),
            _ => None,
        }
    }
}

/// Characters with their own dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcScript {
    /// The man behind the cafe counter.
    Contact,
}

impl NpcScript {
    /// The script for `npc` at `location`, if any.
    pub fn resolve(npc: &str, location: &LocationId) -> Option<Self> {
        (npc == MANN && is(location, CAFE)).then_some(Self::Contact)
    }
}

/// One half of the server farm lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockHalf {
    /// The keycard was accepted.
    Card,
    /// The door code was accepted.
    Code,
}

impl LockHalf {
    /// The flag recording this half.
    pub fn flag(self) -> Flag {
        match self {
            Self::Card => Flag::CardUsed,
            Self::Code => Flag::CodeCorrect,
        }
    }

    /// The other half.
    pub fn other(self) -> Self {
        match self {
            Self::Card => Self::Code,
            Self::Code => Self::Card,
        }
    }

    /// Narrated when this half is accepted but the other is still missing.
    pub fn partial(self) -> &'static str {
        match self {
            Self::Card => "DIE KARTE WURDE AKZEPTIERT, ABER DIE TUER BLEIBT ZU. FEHLT NOCH DER CODE?",
            Self::Code => {
                "DAS NUMPAD LEUCHTET GRUEN, ABER DIE TUER BLEIBT ZU. FEHLT NOCH DIE SCHLUESSELKARTE?"
            }
        }
    }

    /// Narrated when the door is tried with only this half done.
    pub fn door_refusal(self) -> &'static str {
        match self {
            Self::Card => {
                "DIE TUER BLEIBT VERSCHLOSSEN. DER KARTENLESER LEUCHTETE, ABER ES FEHLT WOHL NOCH DER CODE."
            }
            Self::Code => {
                "DIE TUER BLEIBT VERSCHLOSSEN. DAS NUMPAD LEUCHTETE, ABER ES FEHLT WOHL NOCH DIE KARTE."
            }
        }
    }
}
