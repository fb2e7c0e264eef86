//! The public phone in the booth.

use kb_core::Flag;
use log::info;

use super::FictionSession;
use crate::console::Console;
use crate::error::FictionResult;

const CALL: [&str; 7] = [
    "Eine ruhige, tiefe, vertrauenswuerdig klingende Stimme sagt: 'Hallo?'",
    "'Ich weiss, wonach du suchst', sagt die Stimme. 'Die Anomalien. Die Glitches in der Realitaet.'",
    "'Die Wahrheit ist da draussen, aber sie ist gefaehrlich.'",
    "'Du hast einen ersten Schritt gemacht. Aber sei vorsichtig. Sie beobachten dich jetzt.'",
    "'Es gibt andere wie uns. Suche im 'KANINCHENBAU' nach dem ORACLE. Sie erwartet dich.'",
    "KLICK.",
    "Die Verbindung bricht ab. Nur noch Stille und das leise Rauschen der Leitung.",
];

impl<C: Console> FictionSession<C> {
    pub(super) fn use_phone(&mut self) {
        if self.has(Flag::PhoneRinging) {
            self.say("DAS TELEFON KLINGELT LAUT! NIMM LIEBER DEN HOERER AB ('BENUTZE HOERER').");
        } else {
            self.say("DU NIMMST DEN HOERER AB. ES IST EIN WAEHLTON ZU HOEREN.");
            self.say("DU HAST KEINE NUMMER ZUM WAEHLEN IM KOPF UND LEGST WIEDER AUF.");
        }
    }

    pub(super) fn pick_up_receiver(&mut self) {
        if !self.has(Flag::PhoneRinging) {
            self.say("DU NIMMST DEN HOERER AB. NUR EIN NORMALER WAEHLTON. DU LEGST WIEDER AUF.");
            return;
        }
        self.say("DU NIMMST DEN SCHWEREN, KUEHLEN BAKELIT-HOERER ANS OHR. DAS KLINGELN STOPPT SOFORT.");
        self.adjust_alert(1);
        self.console.pause(1000);
        for line in CALL {
            self.say(line);
            self.console.pause(1200);
        }
        self.state.clear(Flag::PhoneRinging);
        self.adjust_alert(-1);
        self.state.set(Flag::OracleContacted);
        info!("oracle call taken");
        self.say("(Du koenntest jetzt im KANINCHENBAU Forum versuchen, das ORACLE zu kontaktieren.)");
    }

    /// The phone starts ringing next to the player on the street.
    pub(super) fn ring_phone(&mut self) -> FictionResult<()> {
        self.console.blank();
        self.alarm("*** RIIING RIIING... RIIING RIIING ***");
        self.console.pause(800);
        self.say("Das oeffentliche Telefon in der Zelle neben dir beginnt laut und eindringlich zu klingeln!");
        self.state.set(Flag::PhoneRinging);
        info!("phone ringing");
        self.say("(Du koenntest zur 'TELEFONZELLE' gehen und den 'HOERER' benutzen, um abzunehmen.)");
        self.adjust_alert(1);
        self.evaluate_alert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::scripts::story;
    use crate::session::fixtures::*;

    #[test]
    fn quiet_phone_gives_dial_tone() {
        let mut s = session(&[]);
        place_player(&mut s, story::TELEFONZELLE_INNERES);
        s.process("BENUTZE TELEFON").unwrap();
        assert!(said(&s, "KEINE NUMMER ZUM WAEHLEN"));
        s.process("BENUTZE HOERER").unwrap();
        assert!(said(&s, "NUR EIN NORMALER WAEHLTON."));
        assert!(!s.has(Flag::OracleContacted));
        assert_eq!(s.state().alert.value(), 0);
    }

    #[test]
    fn ringing_phone_delivers_the_call() {
        let mut s = session(&[]);
        place_player(&mut s, story::TELEFONZELLE_INNERES);
        s.state.set(Flag::PhoneRinging);
        s.process("BENUTZE TELEFON").unwrap();
        assert!(said(&s, "NIMM LIEBER DEN HOERER AB"));

        s.process("BENUTZE HOERER").unwrap();
        assert!(said(&s, "Suche im 'KANINCHENBAU' nach dem ORACLE."));
        assert!(s.has(Flag::OracleContacted));
        assert!(!s.has(Flag::PhoneRinging));
        assert_eq!(s.state().alert.value(), 0);
    }

    #[test]
    fn phone_rings_after_diskette_was_read() {
        let mut s = session_with(GameConfig::deterministic(7).with_ring_chance(1.0), &["SCHAU"]);
        place_player(&mut s, story::STRASSE);
        s.state.set(Flag::FirstMessageReceived);
        s.state.set(Flag::DisketteRead);
        s.turn().unwrap();
        assert!(said(&s, "*** RIIING RIIING... RIIING RIIING ***"));
        assert!(s.has(Flag::PhoneRinging));
        assert_eq!(s.state().alert.value(), 1);
    }
}
