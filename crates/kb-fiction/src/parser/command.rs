//! Command parsing for player input.
//!
//! Input is case-insensitive: it is trimmed and uppercased before the verb is
//! looked up. Multi-word verb phrases are tried first, then single verbs.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Go through an exit or to a neighbouring location.
    Go {
        /// Exit keyword or destination id.
        target: String,
    },
    /// Pick up an item.
    Take {
        /// The item name.
        item: String,
    },
    /// Look around or at something.
    Look {
        /// Optional target to examine.
        target: Option<String>,
    },
    /// Read an item or a detail.
    Read {
        /// What to read.
        target: String,
    },
    /// Use something, optionally with an object.
    Use {
        /// The fixture or item to use.
        target: String,
        /// The object after `MIT`, `AN` or `AUF`.
        object: Option<String>,
    },
    /// List the inventory.
    Inventory,
    /// Show help.
    Help,
    /// Decrypt something with a key.
    Decrypt {
        /// What to decrypt.
        target: String,
        /// The key after `MIT`.
        key: String,
    },
    /// Hack a target.
    Hack {
        /// What to hack.
        target: String,
    },
    /// Talk to a character.
    Talk {
        /// The character name.
        npc: String,
    },
    /// Open something.
    Open {
        /// What to open.
        target: String,
    },
    /// Push something.
    Push {
        /// What to push.
        target: String,
    },
    /// Scan something.
    Scan {
        /// What to scan.
        target: String,
    },
    /// Enter a code on a numpad.
    Code {
        /// The code as typed.
        code: String,
    },
    /// Go online from the logged-in computer.
    Online,
    /// Quit the game.
    Quit,
    /// A known verb with missing or malformed arguments.
    Malformed {
        /// The usage reminder.
        usage: &'static str,
    },
    /// An unknown verb.
    Unknown {
        /// The verb as typed.
        verb: String,
    },
}

/// Verb synonyms for command parsing.
const GO_VERBS: &[&str] = &["GEHE", "G", "LAUFE"];
const TAKE_VERBS: &[&str] = &["NIMM", "NEHMEN", "N"];
const LOOK_VERBS: &[&str] = &["SCHAU", "UMSCHAUEN", "L", "LOOK"];
const USE_VERBS: &[&str] = &["BENUTZE", "USE", "U"];
const INVENTORY_VERBS: &[&str] = &["INVENTAR", "INV", "I"];
const HELP_VERBS: &[&str] = &["HILFE", "HELP", "?"];
const DECRYPT_VERBS: &[&str] = &["DEKRYPTIERE", "DECRYPT"];
const HACK_VERBS: &[&str] = &["HACKE", "HACK"];
const TALK_VERBS: &[&str] = &["REDE", "SPRECHE", "TALK"];
const READ_VERBS: &[&str] = &["LIES", "LESEN", "READ"];
const OPEN_VERBS: &[&str] = &["OEFFNE", "OPEN"];
const PUSH_VERBS: &[&str] = &["DRUECKE", "PUSH"];
const SCAN_VERBS: &[&str] = &["SCANNE", "SCAN"];
const CODE_VERBS: &[&str] = &["CODE", "EINGABE"];
const QUIT_VERBS: &[&str] = &["QUIT", "EXIT", "ENDE"];

/// Every single-word verb the parser knows.
pub(crate) const VERBS: &[&[&str]] = &[
    GO_VERBS,
    TAKE_VERBS,
    LOOK_VERBS,
    USE_VERBS,
    INVENTORY_VERBS,
    HELP_VERBS,
    DECRYPT_VERBS,
    HACK_VERBS,
    TALK_VERBS,
    READ_VERBS,
    OPEN_VERBS,
    PUSH_VERBS,
    SCAN_VERBS,
    CODE_VERBS,
    QUIT_VERBS,
];

/// Connector words of the two-operand `BENUTZE` form.
const USE_CONNECTORS: &[&str] = &["MIT", "AN", "AUF"];

const GO_USAGE: &str = "WOHIN SOLL ES GEHEN?";
const TAKE_USAGE: &str = "WAS MOECHTEST DU NEHMEN?";
const READ_USAGE: &str = "WAS MOECHTEST DU LESEN?";
const USE_USAGE: &str = "WAS MOECHTEST DU BENUTZEN?";
const DECRYPT_USAGE: &str = "BENUTZE: DEKRYPTIERE [WAS] MIT [SCHLUESSEL]";
const HACK_USAGE: &str = "WAS MOECHTEST DU HACKEN?";
const TALK_USAGE: &str = "MIT WEM MOECHTEST DU SPRECHEN? (BENUTZE 'REDE MIT [NAME]')";
const OPEN_USAGE: &str = "WAS MOECHTEST DU OEFFNEN?";
const PUSH_USAGE: &str = "WAS MOECHTEST DU DRUECKEN?";
const SCAN_USAGE: &str = "WAS MOECHTEST DU SCANNEN? (Z.B. SCANNE PORTS)";
const CODE_USAGE: &str = "WELCHEN CODE MOECHTEST DU EINGEBEN? (BENUTZE 'CODE [NUMMER]')";

/// Multi-word verb phrases, checked before single verbs.
enum Phrase {
    TalkTo,
    GoOnline,
}

const PHRASES: &[(&[&str], Phrase)] = &[
    (&["REDE", "MIT"], Phrase::TalkTo),
    (&["SPRECHE", "MIT"], Phrase::TalkTo),
    (&["ONLINE", "GEHEN"], Phrase::GoOnline),
];

/// Normalize raw input: trim and uppercase.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Parse a player input string into a command.
///
/// Returns `None` for blank input.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = normalize(input);
    let words: Vec<&str> = input.split_whitespace().collect();
    let (&verb, rest) = words.split_first()?;

    for (pattern, phrase) in PHRASES {
        if let Some(args) = words.strip_prefix(*pattern) {
            return Some(match phrase {
                Phrase::TalkTo => required(args, TALK_USAGE, |npc| Command::Talk { npc }),
                Phrase::GoOnline => Command::Online,
            });
        }
    }

    let is = |verbs: &[&str]| verbs.contains(&verb);
    let command = if is(GO_VERBS) {
        required(rest, GO_USAGE, |target| Command::Go { target })
    } else if is(TAKE_VERBS) {
        required(rest, TAKE_USAGE, |item| Command::Take { item })
    } else if is(LOOK_VERBS) {
        Command::Look {
            target: (!rest.is_empty()).then(|| rest.join(" ")),
        }
    } else if is(USE_VERBS) {
        parse_use(rest)
    } else if is(INVENTORY_VERBS) {
        Command::Inventory
    } else if is(HELP_VERBS) {
        Command::Help
    } else if is(DECRYPT_VERBS) {
        parse_decrypt(rest)
    } else if is(HACK_VERBS) {
        required(rest, HACK_USAGE, |target| Command::Hack { target })
    } else if is(TALK_VERBS) {
        required(rest, TALK_USAGE, |npc| Command::Talk { npc })
    } else if is(READ_VERBS) {
        required(rest, READ_USAGE, |target| Command::Read { target })
    } else if is(OPEN_VERBS) {
        required(rest, OPEN_USAGE, |target| Command::Open { target })
    } else if is(PUSH_VERBS) {
        required(rest, PUSH_USAGE, |target| Command::Push { target })
    } else if is(SCAN_VERBS) {
        required(rest, SCAN_USAGE, |target| Command::Scan { target })
    } else if is(CODE_VERBS) {
        match rest.first() {
            Some(code) => Command::Code {
                code: (*code).to_string(),
            },
            None => Command::Malformed { usage: CODE_USAGE },
        }
    } else if is(QUIT_VERBS) {
        Command::Quit
    } else {
        Command::Unknown {
            verb: verb.to_string(),
        }
    };
    Some(command)
}

fn required(args: &[&str], usage: &'static str, build: impl FnOnce(String) -> Command) -> Command {
    if args.is_empty() {
        Command::Malformed { usage }
    } else {
        build(args.join(" "))
    }
}

fn parse_use(rest: &[&str]) -> Command {
    match rest {
        [] => Command::Malformed { usage: USE_USAGE },
        [item, connector, object @ ..] if USE_CONNECTORS.contains(connector) && !object.is_empty() => {
            Command::Use {
                target: (*item).to_string(),
                object: Some(object.join(" ")),
            }
        }
        _ => Command::Use {
            target: rest.join(" "),
            object: None,
        },
    }
}

fn parse_decrypt(rest: &[&str]) -> Command {
    match rest {
        [target, "MIT", key @ ..] if !key.is_empty() => Command::Decrypt {
            target: (*target).to_string(),
            key: key.join(" "),
        },
        _ => Command::Malformed {
            usage: DECRYPT_USAGE,
        },
    }
}
