//! The home computer: login, the `COMPUTER>` interface, and the first message.

use kb_core::{Flag, ItemId, LocationId};
use log::info;

use super::{FAREWELL, FictionSession};
use crate::console::Console;
use crate::error::{Ending, FictionError, FictionResult};
use crate::parser::{TerminalCommand, parse_terminal};
use crate::scripts::story;

const COMPUTER_PROMPT: &str = "COMPUTER> ";

impl<C: Console> FictionSession<C> {
    /// Log in if needed, then run the computer interface until logout or relocation.
    pub(super) fn use_computer(&mut self) -> FictionResult<()> {
        if !self.has(Flag::LoggedIn) && !self.login()? {
            return Ok(());
        }
        self.show("--- COMPUTER INTERFACE ---");
        self.show("SYSTEM 'HEIMBASIS' BEREIT.");
        self.show("MOEGLICHE AKTIONEN: ONLINE GEHEN, LIES DISKETTE, SCANNE NETZWERK, LOGOUT");

        loop {
            let line = self.read_input(COMPUTER_PROMPT)?;
            let Some(command) = parse_terminal(&line) else {
                continue;
            };
            match self.terminal_command(command) {
                Ok(()) => {}
                Err(e) if e.is_refusal() => self.say(&e.to_string()),
                Err(e) => return Err(e),
            }
            self.evaluate_alert()?;
            if !self.is_at(story::APARTMENT) {
                break;
            }
            if !self.has(Flag::LoggedIn) {
                self.show("--- COMPUTER INTERFACE GESCHLOSSEN ---");
                break;
            }
        }
        Ok(())
    }

    /// Ask for the password. Returns whether the login succeeded.
    fn login(&mut self) -> FictionResult<bool> {
        self.say("DU VERSUCHST, DICH AM COMPUTER EINZULOGGEN.");
        self.show("PASSWORT GESCHUETZT. SYSTEM: 'HEIMBASIS'.");

        let note = ItemId::new(story::ZETTEL);
        let here = self.location_id();
        let note_at_hand = self
            .world
            .item(&note)
            .is_some_and(|i| i.is_carried() || i.is_at(&here));
        let cracked = self.has(Flag::PasswordCracked);
        let hint = if cracked {
            " (PASSWORT BEREITS GEKNACKT)"
        } else if note_at_hand {
            " (HINWEIS AUF DEM ZETTEL VERFUEGBAR - 'LIES ZETTEL')"
        } else {
            " (DU HAST KEINEN HINWEIS)"
        };
        let prompt = format!("PASSWORT EINGEBEN{hint}: ");
        let password = self.world.secrets().password.to_lowercase();

        let attempts = self.config.password_attempts;
        for attempt in 1..=attempts {
            let guess = self.read_input(&prompt)?;
            if guess.to_lowercase() == password {
                self.show("ZUGRIFF GEWAEHRT. WILLKOMMEN ZURUECK.");
                self.state.set(Flag::LoggedIn);
                self.state.set(Flag::PasswordCracked);
                info!("logged in to the home computer");
                self.adjust_alert(1);
                if !cracked && note_at_hand {
                    self.say("(Der Zettel mit dem Hinweis scheint nun ueberfluessig.)");
                }
                return Ok(true);
            }
            let left = attempts - attempt;
            self.alarm(&format!("PASSWORT FALSCH. VERBLEIBENDE VERSUCHE: {left}"));
            self.adjust_alert(2);
            self.evaluate_alert()?;
        }
        self.alarm("ZU VIELE FEHLVERSUCHE. SYSTEM TEMPORAER GESPERRT.");
        Ok(false)
    }

    fn terminal_command(&mut self, command: TerminalCommand) -> FictionResult<()> {
        match command {
            TerminalCommand::Online if self.has(Flag::MessageDecrypted) => {
                self.say("DU VERBINDEST DICH MIT DEM NETZWERK...");
                self.console.pause(1000);
                self.say("SUCHE NACH DEM 'KANINCHENBAU' FORUM...");
                self.console.pause(1500);
                self.say("VERBINDUNG HERGESTELLT.");
                self.enter(LocationId::new(story::KANINCHENBAU_FORUM))
            }
            TerminalCommand::Online => {
                self.say("DU WEISST NICHT, WONACH DU SUCHEN SOLLST... DU BRAUCHST EINEN HINWEIS ODER EIN ZIEL.");
                self.say("(Hast du schon die erste Nachricht auf dem Bildschirm dekryptiert?)");
                Ok(())
            }
            TerminalCommand::ReadDisk => {
                if !self.world.is_carried(&ItemId::new(story::DATEN_DISKETTE)) {
                    return Err(FictionError::Refused(
                        "KEINE DISKETTE IM LAUFWERK. HAST DU SIE IM INVENTAR?",
                    ));
                }
                self.say("Lese Diskette 'PROTOKOLL 7'...");
                self.console.pause(1000);
                self.show("INHALT: Verschluesselte Uebertragungslogs. Zeitstempel stimmen mit den 'Glitches' ueberein. Eine Signatur: 'Morpheus'. Eine Koordinatenangabe zu einer oeffentlichen Telefonzelle auf der STRASSE VOR DEM HAUS.");
                self.say("(Die TELEFONZELLE auf der STRASSE erscheint nun sehr wichtig. Koennte sie der naechste Schritt sein?)");
                self.adjust_alert(2);
                if self.state.set(Flag::DisketteRead) {
                    info!("diskette read");
                }
                Ok(())
            }
            TerminalCommand::ScanNetwork => {
                self.say("DU STARTETST EINEN NETZWERK-SCAN...");
                self.console.pause(1500);
                self.show("SCAN ERGEBNISSE:");
                self.show("- Lokales Netzwerk: HEIMBASIS (AKTUELL)");
                if self.world.location(&LocationId::new(story::CAFE)).is_some() {
                    self.show("- Oeffentliches Netzwerk: CYBER CAFE TERMINAL (IP: 192.168.1.101)");
                }
                if self
                    .world
                    .location(&LocationId::new(story::SERVER_FARM_EINGANG))
                    .is_some()
                {
                    self.show("- Externe Adresse: SERVER-FARM (IP: 213.45.67.89 - HOHE SICHERHEIT)");
                }
                self.adjust_alert(1);
                Ok(())
            }
            TerminalCommand::Logout => {
                self.say("DU LOGGST DICH VOM COMPUTER AUS.");
                self.state.clear(Flag::LoggedIn);
                Ok(())
            }
            TerminalCommand::Quit => {
                self.say(FAREWELL);
                Err(FictionError::Ended(Ending::Quit))
            }
            TerminalCommand::Unknown(text) => Err(FictionError::UnknownTerminalCommand(text)),
        }
    }

    /// `ONLINE GEHEN` typed at the main prompt.
    pub(super) fn go_online(&mut self) -> FictionResult<()> {
        if self.has(Flag::LoggedIn) && self.is_at(story::APARTMENT) {
            return self.terminal_command(TerminalCommand::Online);
        }
        Err(FictionError::UnknownVerb {
            verb: "ONLINE".to_string(),
            hint: None,
        })
    }

    pub(super) fn deliver_first_message(&mut self) {
        let secrets = self.world.secrets();
        let ciphertext = secrets.ciphertext.clone();
        let key = secrets.cipher_key.clone();
        self.console.blank();
        self.console.rule();
        self.alarm("PLOETZLICH BLINKT EIN FENSTER AUF DEINEM COMPUTERBILDSCHIRM AUF.");
        self.show(" EINGEHENDE NACHRICHT:");
        self.show(" QUELLE: UNBEKANNT");
        self.show(" VERSCHLUESSELUNG: STANDARD ROT13");
        self.show(&format!(" NACHRICHT: '{ciphertext}' (ROT13)"));
        self.console.rule();
        self.say(&format!("(DU KOENNTEST VERSUCHEN: DEKRYPTIERE NACHRICHT MIT {key})"));
        self.state.set(Flag::FirstMessageReceived);
        info!("first message delivered");
    }

    pub(super) fn decrypt(&mut self, target: &str, key: &str) -> FictionResult<()> {
        if target != story::NACHRICHT {
            return Err(FictionError::NothingToDecrypt(target.to_string()));
        }
        if self.has(Flag::MessageDecrypted) {
            return Err(FictionError::AlreadyDone(
                "DU HAST DIESE NACHRICHT BEREITS DEKRYPTIERT.",
            ));
        }
        if !self.is_at(story::APARTMENT) || !self.has(Flag::FirstMessageReceived) {
            return Err(FictionError::NothingToDecrypt(target.to_string()));
        }
        if !key.eq_ignore_ascii_case(&self.world.secrets().cipher_key) {
            self.say("FALSCHER SCHLUESSEL. DEKRYPTION FEHLGESCHLAGEN.");
            self.adjust_alert(1);
            return Ok(());
        }
        let plaintext = self.world.secrets().plaintext.clone();
        self.show("DEKRYPTION ERFOLGREICH!");
        self.show(&format!("NACHRICHT ENTSCHLUESSELT: '{plaintext}'"));
        self.say("WAS BEDEUTET DAS NUR? VIELLEICHT EIN HINWEIS AUF EIN ONLINE FORUM?");
        self.state.set(Flag::MessageDecrypted);
        self.state.decrypted = Some(plaintext);
        info!("first message decrypted");
        self.adjust_alert(1);
        self.say("(VIELLEICHT KANNST DU JETZT MIT DEM COMPUTER 'ONLINE GEHEN'?)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::*;

    fn at_home() -> FictionSession<crate::console::ScriptedConsole> {
        let mut s = session(&[]);
        place_player(&mut s, story::APARTMENT);
        s
    }

    #[test]
    fn scenario_b_three_wrong_passwords() {
        let mut s = at_home();
        for guess in ["neo", "trinity", "zion"] {
            s.console_mut().push_input(guess);
        }
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(!s.has(Flag::LoggedIn));
        assert!(!s.has(Flag::PasswordCracked));
        assert!(said(&s, "VERBLEIBENDE VERSUCHE: 0"));
        assert!(said(&s, "SYSTEM TEMPORAER GESPERRT."));
        assert_eq!(s.state().alert.value(), 6);
        assert!(
            s.console()
                .prompts()
                .iter()
                .all(|p| p.contains("HINWEIS AUF DEM ZETTEL VERFUEGBAR"))
        );
    }

    #[test]
    fn login_then_logout() {
        let mut s = at_home();
        for line in ["MATRIX", "", "LOGOUT"] {
            s.console_mut().push_input(line);
        }
        s.process("U COMPUTER").unwrap();
        assert!(said(&s, "ZUGRIFF GEWAEHRT."));
        assert!(said(&s, "Der Zettel mit dem Hinweis scheint nun ueberfluessig."));
        assert!(said(&s, "--- COMPUTER INTERFACE GESCHLOSSEN ---"));
        assert!(s.has(Flag::PasswordCracked));
        assert!(!s.has(Flag::LoggedIn));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn cracked_password_hint_on_second_login() {
        let mut s = at_home();
        s.state.set(Flag::PasswordCracked);
        s.console_mut().push_input("matrix");
        s.console_mut().push_input("LOGOUT");
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(s.console().prompts()[0].contains("(PASSWORT BEREITS GEKNACKT)"));
        assert!(!said(&s, "ueberfluessig"));
    }

    #[test]
    fn scenario_c_decrypt_first_message() {
        let mut s = at_home();
        s.deliver_first_message();
        assert!(said(&s, "SBYTR QHZ JRVFFRA XNAVAPURA."));
        s.process("DEKRYPTIERE NACHRICHT MIT redpill").unwrap();
        assert!(s.has(Flag::MessageDecrypted));
        assert_eq!(
            s.state().decrypted.as_deref(),
            Some(s.world().secrets().plaintext.as_str())
        );
        assert!(said(&s, "DEKRYPTION ERFOLGREICH!"));
        assert_eq!(s.state().alert.value(), 1);

        s.process("DEKRYPTIERE NACHRICHT MIT REDPILL").unwrap();
        assert!(said(&s, "BEREITS DEKRYPTIERT."));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn decrypt_with_wrong_key_or_too_early() {
        let mut s = at_home();
        s.process("DEKRYPTIERE NACHRICHT MIT REDPILL").unwrap();
        assert!(said(&s, "ES GIBT HIER KEIN 'NACHRICHT' ZUM DEKRYPTIEREN"));
        assert_eq!(s.state().alert.value(), 0);

        s.state.set(Flag::FirstMessageReceived);
        s.process("DEKRYPTIERE NACHRICHT MIT BLUEPILL").unwrap();
        assert!(said(&s, "FALSCHER SCHLUESSEL."));
        assert!(!s.has(Flag::MessageDecrypted));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn online_needs_decrypted_message() {
        let mut s = at_home();
        s.state.set(Flag::LoggedIn);
        s.console_mut().push_input("ONLINE GEHEN");
        s.console_mut().push_input("LOGOUT");
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(said(&s, "DU WEISST NICHT, WONACH DU SUCHEN SOLLST"));
        assert!(s.is_at(story::APARTMENT));
    }

    #[test]
    fn online_moves_to_forum_and_closes_interface() {
        let mut s = at_home();
        s.state.set(Flag::LoggedIn);
        s.state.set(Flag::MessageDecrypted);
        s.console_mut().push_input("online");
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(s.is_at(story::KANINCHENBAU_FORUM));
        assert!(s.has(Flag::LoggedIn));
        assert!(said(&s, "VERBINDUNG HERGESTELLT."));
        assert_eq!(s.console().remaining_input(), 0);
    }

    #[test]
    fn online_at_main_prompt() {
        let mut s = at_home();
        s.process("ONLINE GEHEN").unwrap();
        assert!(said(&s, "ICH VERSTEHE 'ONLINE' NICHT."));

        s.state.set(Flag::LoggedIn);
        s.state.set(Flag::MessageDecrypted);
        s.process("ONLINE GEHEN").unwrap();
        assert!(s.is_at(story::KANINCHENBAU_FORUM));
    }

    #[test]
    fn read_diskette_in_computer() {
        let mut s = at_home();
        s.state.set(Flag::LoggedIn);
        s.console_mut().push_input("LIES DISKETTE");
        s.console_mut().push_input("HACK THE PLANET");
        s.console_mut().push_input("LOGOUT");
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(said(&s, "KEINE DISKETTE IM LAUFWERK."));
        assert!(said(&s, "UNBEKANNTER COMPUTER-BEFEHL: 'HACK THE PLANET'."));
        assert!(!s.has(Flag::DisketteRead));

        s.world.carry(&ItemId::new(story::DATEN_DISKETTE)).unwrap();
        s.state.set(Flag::LoggedIn);
        s.process("BENUTZE DATEN_DISKETTE MIT COMPUTER").unwrap();
        assert!(said(&s, "'LIES DISKETTE'"));
        s.console_mut().push_input("LIES DISKETTE");
        s.console_mut().push_input("SCANNE NETZWERK");
        s.console_mut().push_input("LOGOUT");
        s.process("BENUTZE COMPUTER").unwrap();
        assert!(said(&s, "Eine Signatur: 'Morpheus'."));
        assert!(said(&s, "SERVER-FARM (IP: 213.45.67.89 - HOHE SICHERHEIT)"));
        assert!(s.has(Flag::DisketteRead));
        assert_eq!(s.state().alert.value(), 4);
    }

    #[test]
    fn diskette_needs_running_computer() {
        let mut s = at_home();
        s.world.carry(&ItemId::new(story::DATEN_DISKETTE)).unwrap();
        s.process("BENUTZE DATEN_DISKETTE MIT COMPUTER").unwrap();
        assert!(said(&s, "DU MUSST ZUERST DEN COMPUTER STARTEN"));
        assert_eq!(s.state().alert.value(), 0);
    }

    #[test]
    fn quit_from_computer_ends_game() {
        let mut s = at_home();
        s.state.set(Flag::LoggedIn);
        s.console_mut().push_input("ENDE");
        let err = s.process("BENUTZE COMPUTER").unwrap_err();
        assert!(matches!(err, FictionError::Ended(Ending::Quit)));
        assert!(said(&s, FAREWELL));
    }

    #[test]
    fn end_of_input_inside_computer_interrupts() {
        let mut s = at_home();
        s.state.set(Flag::LoggedIn);
        let err = s.process("BENUTZE COMPUTER").unwrap_err();
        assert!(matches!(err, FictionError::Ended(Ending::Interrupted)));
    }
}
