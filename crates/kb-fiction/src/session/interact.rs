//! Using fixtures and items, the server farm lock, and dialogue.

use kb_core::{Flag, ItemId, Placement};
use log::info;
use rand::seq::IndexedRandom;

use super::FictionSession;
use crate::console::Console;
use crate::error::{FictionError, FictionResult};
use crate::scripts::{Fixture, Interaction, LockHalf, NpcScript, story};

const DOOR_UNLOCKED: &str =
    "EIN KLICKEN IST ZU HOEREN. DIE TUER SCHEINT ENTSPERRT ZU SEIN. (VERSUCHE 'OEFFNE TUER')";

const CONTACT_FILLER: [&str; 4] = [
    "{npc} poliert weiter seine Brille. 'IMMER NOCH HIER? Suchst du was bestimmtes?'",
    "{npc} zuckt mit den Schultern. 'FRAGEN UEBER FRAGEN... FINDE DEINE EIGENEN ANTWORTEN. Oder frag jemand anderen.'",
    "{npc} murmelt: 'Ignoranz ist manchmal ein Segen... aber selten profitabel.'",
    "{npc} schaut kurz auf. 'Pass auf die Agenten auf. Sie sind ueberall.'",
];

impl<C: Console> FictionSession<C> {
    pub(super) fn use_target(&mut self, target: &str, object: Option<&str>) -> FictionResult<()> {
        if let Some(object) = object {
            return self.use_with(target, object);
        }
        match Fixture::resolve(&self.state.location, target) {
            Some(Fixture::Computer) => self.use_computer(),
            Some(Fixture::Phone) => {
                self.use_phone();
                Ok(())
            }
            Some(Fixture::Receiver) => {
                self.pick_up_receiver();
                Ok(())
            }
            Some(Fixture::Terminal) => {
                self.say("DU SETZT DICH AN DAS OEFFENTLICHE TERMINAL. ES RIECHT NACH STAUB UND NIKOTIN.");
                self.say("ES VERLANGT NACH EINER ANMELDUNG ODER MUENZEN...");
                self.say("(VIELLEICHT KANNST DU ES HACKEN? 'HACKE TERMINAL')");
                self.adjust_alert(1);
                Ok(())
            }
            Some(Fixture::Numpad) => {
                self.say("DAS NUMPAD IST BEREIT FUER EINE EINGABE. (BENUTZE 'CODE [NUMMER]')");
                Ok(())
            }
            Some(Fixture::CardReader) => {
                self.say("DER KARTENLESER WARTET AUF EINE KARTE. (BENUTZE 'SCHLUESSELKARTE MIT KARTENLESER')");
                Ok(())
            }
            Some(Fixture::Window) => {
                let view = self
                    .here()?
                    .detail(story::FENSTER, &self.state.flags)
                    .unwrap_or_default()
                    .to_string();
                self.say(&view);
                Ok(())
            }
            Some(Fixture::Bed) => {
                self.say("DU SETZT DICH AUFS BETT. ES IST NICHT SEHR BEQUEM. AUSRUHEN?");
                Ok(())
            }
            Some(Fixture::PhoneBooth) => {
                self.say("DU RUETTELST AN DER TUER DER TELEFONZELLE. DU KOENNTEST HINEINGEHEN ('GEHE TELEFONZELLE').");
                Ok(())
            }
            Some(Fixture::Door | Fixture::Button) | None => {
                if self.here()?.has_interactable(target) {
                    self.say(&format!(
                        "DU VERSUCHST '{target}' ZU BENUTZEN, ABER NICHTS SINNVOLLES PASSIERT."
                    ));
                    Ok(())
                } else {
                    Err(FictionError::CannotUse(target.to_string()))
                }
            }
        }
    }

    fn use_with(&mut self, item: &str, object: &str) -> FictionResult<()> {
        let id = self
            .item_carried(item)
            .map(|i| i.id.clone())
            .ok_or_else(|| FictionError::NotCarried(item.to_string()))?;
        match Interaction::resolve(id.as_str(), object, &self.state.location) {
            Some(Interaction::SwipeKeycard) => {
                self.say("DU ZIEHST DIE SCHLUESSELKARTE DURCH DEN LESER...");
                self.console.pause(1000);
                self.say("...EIN GRUENES LICHT BLINKT KURZ AUF. KARTE AKZEPTIERT.");
                self.complete_lock_half(LockHalf::Card);
                Ok(())
            }
            Some(Interaction::InsertDiskette) => {
                if !self.has(Flag::LoggedIn) {
                    return Err(FictionError::Refused(
                        "DU MUSST ZUERST DEN COMPUTER STARTEN/BENUTZEN (BENUTZE COMPUTER).",
                    ));
                }
                self.say("DU SCHIEBST DIE DISKETTE 'PROTOKOLL 7' IN DAS LAUFWERK.");
                self.say("(IM COMPUTER-MODUS KANNST DU JETZT 'LIES DISKETTE' EINGEBEN.)");
                self.adjust_alert(1);
                Ok(())
            }
            None => Err(FictionError::CannotCombine {
                item: item.to_string(),
                object: object.to_string(),
            }),
        }
    }

    /// Record one half of the server farm lock and grant access if the other half is done.
    fn complete_lock_half(&mut self, half: LockHalf) {
        self.state.set(half.flag());
        self.adjust_alert(1);
        if self.has(half.other().flag()) {
            if self.state.set(Flag::AccessGranted) {
                info!("server farm access granted");
            }
            self.say(DOOR_UNLOCKED);
        } else {
            self.say(half.partial());
        }
    }

    pub(super) fn enter_code(&mut self, code: &str) -> FictionResult<()> {
        if Fixture::resolve(&self.state.location, story::NUMPAD).is_none() {
            return Err(FictionError::NoNumpad);
        }
        self.say(&format!("DU GIBST DEN CODE '{code}' AM NUMPAD EIN..."));
        self.console.pause(1500);
        let Some(expected) = self.state.access_code.clone() else {
            self.say("DU HAST KEINE AHNUNG, WELCHEN CODE DU EINGEBEN SOLLST.");
            self.adjust_alert(1);
            return Ok(());
        };
        if code == expected {
            self.say("EIN GRUENES LICHT LEUCHTET AM NUMPAD. CODE AKZEPTIERT.");
            self.complete_lock_half(LockHalf::Code);
            Ok(())
        } else {
            self.say("FALSCHER CODE. EIN ROTES LICHT BLINKT WARNEND.");
            self.state.clear(Flag::CodeCorrect);
            self.state.clear(Flag::AccessGranted);
            self.adjust_alert(3);
            self.evaluate_alert()
        }
    }

    pub(super) fn open(&mut self, target: &str) -> FictionResult<()> {
        match Fixture::resolve(&self.state.location, target) {
            Some(Fixture::Door) => {
                if self.has(Flag::DoorOpen) {
                    return Err(FictionError::AlreadyDone("DIE SCHWERE STAHLTUER STEHT BEREITS OFFEN."));
                }
                let line = if self.has(Flag::AccessGranted) {
                    self.state.set(Flag::DoorOpen);
                    info!("server farm door opened");
                    "DIE SCHWERE STAHLTUER SCHWINGT MIT EINEM LEISEN SUMMEN AUF."
                } else if self.has(Flag::CardUsed) {
                    LockHalf::Card.door_refusal()
                } else if self.has(Flag::CodeCorrect) {
                    LockHalf::Code.door_refusal()
                } else {
                    "DIE TUER IST FEST VERSCHLOSSEN. SIE BENOETIGT WOHL EINE SCHLUESSELKARTE UND EINEN CODE."
                };
                self.say(line);
                Ok(())
            }
            Some(Fixture::PhoneBooth) => {
                self.say("Du oeffnest die Tuer zur Telefonzelle und gehst hinein.");
                self.go(story::TELEFONZELLE)
            }
            _ => Err(FictionError::CannotOpen(target.to_string())),
        }
    }

    pub(super) fn push(&mut self, target: &str) -> FictionResult<()> {
        match Fixture::resolve(&self.state.location, target) {
            Some(Fixture::Button) => {
                self.say("DU DRUECKST EINEN KLEINEN, UNBESCHRIFTETEN KNOPF NEBEN DEM MUENZSCHLITZ.");
                self.say("NICHTS SCHEINT ZU PASSIEREN.");
                Ok(())
            }
            _ => Err(FictionError::CannotPush(target.to_string())),
        }
    }

    pub(super) fn talk(&mut self, npc: &str) -> FictionResult<()> {
        let location = self.here()?;
        if !location.has_npc(npc) {
            return Err(FictionError::NobodyNamed(npc.to_string()));
        }
        let detail = location
            .detail(npc, &self.state.flags)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{npc} scheint beschaeftigt."));
        match NpcScript::resolve(npc, &self.state.location) {
            Some(NpcScript::Contact) => self.talk_to_contact(npc),
            None => {
                self.say(&detail);
                self.say(&format!("{npc} IGNORIERT DICH WEITGEHEND."));
                Ok(())
            }
        }
    }

    fn talk_to_contact(&mut self, npc: &str) -> FictionResult<()> {
        if self.has(Flag::MetContact) {
            let line = CONTACT_FILLER
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CONTACT_FILLER[0])
                .replace("{npc}", npc);
            self.say(&line);
            return Ok(());
        }

        self.say(&format!("'NA?', sagt {npc}, ohne dich anzusehen. 'NEU HIER IM SCHATTEN?'"));
        self.console.pause(1000);
        self.say("'SEI VORSICHTIG, WEM DU TRAUST. NICHTS IST, WIE ES SCHEINT.'");
        self.console.pause(1000);
        self.say("'MANCHE SUCHEN DIE WAHRHEIT, ANDERE NUR DEN AUSWEG.'");
        self.state.set(Flag::MetContact);
        self.adjust_alert(1);

        let card = ItemId::new(story::SCHLUESSELKARTE);
        let unplaced = self
            .world
            .item(&card)
            .is_some_and(|i| *i.placement() == Placement::Nowhere);
        if unplaced {
            self.console.pause(1500);
            self.say(&format!("{npc} schiebt dir unauffaellig etwas ueber die Theke."));
            self.say("'VIELLEICHT HILFT DIR DAS BEI EINER VERSCHLOSSENEN TUER IRGENDWO IN DER STADT. ABER FRAG NICHT, WOHER ICH ES HABE.'");
            let here = self.location_id();
            self.world.place(&card, &here)?;
            self.console.blank();
            self.say("DU SIEHST HIER JETZT: SCHLUESSELKARTE");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::*;

    fn at_farm_with_card() -> crate::session::FictionSession<crate::console::ScriptedConsole> {
        let mut s = session(&[]);
        place_player(&mut s, story::SERVER_FARM_EINGANG);
        s.world.carry(&ItemId::new(story::SCHLUESSELKARTE)).unwrap();
        s
    }

    fn assert_lock_invariant(s: &crate::session::FictionSession<crate::console::ScriptedConsole>) {
        if s.has(Flag::AccessGranted) {
            assert!(s.has(Flag::CardUsed) && s.has(Flag::CodeCorrect));
        }
    }

    #[test]
    fn scenario_d_card_then_code() {
        let mut s = at_farm_with_card();
        s.process("BENUTZE SCHLUESSELKARTE MIT KARTENLESER").unwrap();
        assert!(s.has(Flag::CardUsed));
        assert!(!s.has(Flag::AccessGranted));
        assert!(said(&s, LockHalf::Card.partial()));

        s.state.set(Flag::ServerHacked);
        s.state.access_code = Some("1999".into());
        s.process("CODE 1999").unwrap();
        assert!(s.has(Flag::CodeCorrect));
        assert!(s.has(Flag::AccessGranted));
        assert!(said(&s, DOOR_UNLOCKED));
        assert_lock_invariant(&s);
    }

    #[test]
    fn code_then_card_grants_too() {
        let mut s = at_farm_with_card();
        s.state.access_code = Some("1999".into());
        s.process("CODE 1999").unwrap();
        assert!(s.has(Flag::CodeCorrect));
        assert!(!s.has(Flag::AccessGranted));
        assert!(said(&s, LockHalf::Code.partial()));

        s.process("U SCHLUESSELKARTE AN KARTENLESER").unwrap();
        assert!(s.has(Flag::AccessGranted));
        assert_lock_invariant(&s);
    }

    #[test]
    fn code_without_knowledge_costs_alert() {
        let mut s = at_farm_with_card();
        s.process("CODE 1999").unwrap();
        assert!(said(&s, "DU HAST KEINE AHNUNG"));
        assert!(!s.has(Flag::CodeCorrect));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn wrong_code_revokes_access() {
        let mut s = at_farm_with_card();
        s.state.access_code = Some("1999".into());
        s.process("BENUTZE SCHLUESSELKARTE MIT KARTENLESER").unwrap();
        s.process("CODE 1999").unwrap();
        assert!(s.has(Flag::AccessGranted));
        set_alert(&mut s, 0);

        s.process("CODE 1234").unwrap();
        assert!(said(&s, "FALSCHER CODE."));
        assert!(!s.has(Flag::CodeCorrect));
        assert!(!s.has(Flag::AccessGranted));
        assert!(s.has(Flag::CardUsed));
        assert_eq!(s.state().alert.value(), 3);
        assert_lock_invariant(&s);
    }

    #[test]
    fn code_needs_numpad() {
        let mut s = session(&[]);
        place_player(&mut s, story::CAFE);
        s.process("CODE 1999").unwrap();
        assert!(said(&s, "HIER GIBT ES KEIN NUMPAD"));
        assert_eq!(s.state().alert.value(), 0);
    }

    #[test]
    fn compound_use_requires_carried_item() {
        let mut s = session(&[]);
        place_player(&mut s, story::SERVER_FARM_EINGANG);
        s.process("BENUTZE SCHLUESSELKARTE MIT KARTENLESER").unwrap();
        assert!(said(&s, "DU HAST 'SCHLUESSELKARTE' NICHT."));
        assert!(!s.has(Flag::CardUsed));

        let mut s = at_farm_with_card();
        s.process("BENUTZE SCHLUESSELKARTE MIT TUER").unwrap();
        assert!(said(&s, "DU KANNST 'SCHLUESSELKARTE' NICHT MIT 'TUER' BENUTZEN."));
    }

    #[test]
    fn door_reports_progress_and_opens() {
        let mut s = at_farm_with_card();
        s.process("OEFFNE TUER").unwrap();
        assert!(said(&s, "SIE BENOETIGT WOHL EINE SCHLUESSELKARTE UND EINEN CODE."));

        s.process("BENUTZE SCHLUESSELKARTE MIT KARTENLESER").unwrap();
        s.process("OEFFNE TUER").unwrap();
        assert!(said(&s, LockHalf::Card.door_refusal()));

        s.state.access_code = Some("1999".into());
        s.process("CODE 1999").unwrap();
        s.process("OEFFNE TUER").unwrap();
        assert!(s.has(Flag::DoorOpen));
        assert!(said(&s, "SCHWINGT MIT EINEM LEISEN SUMMEN AUF."));

        s.process("SCHAU TUER").unwrap();
        assert!(said(&s, "DIE SCHWERE STAHLTUER STEHT EINEN SPALT OFFEN."));
        s.process("OEFFNE TUER").unwrap();
        assert!(said(&s, "BEREITS OFFEN"));
    }

    #[test]
    fn open_booth_walks_in() {
        let mut s = session(&[]);
        place_player(&mut s, story::STRASSE);
        s.process("OEFFNE TELEFONZELLE").unwrap();
        assert!(s.is_at(story::TELEFONZELLE_INNERES));
        s.process("OEFFNE FENSTER").unwrap();
        assert!(said(&s, "DU KANNST 'FENSTER' NICHT OEFFNEN."));
    }

    #[test]
    fn push_button_in_booth() {
        let mut s = session(&[]);
        place_player(&mut s, story::TELEFONZELLE_INNERES);
        s.process("DRUECKE KNOPF").unwrap();
        assert!(said(&s, "NICHTS SCHEINT ZU PASSIEREN."));
        s.process("DRUECKE HOERER").unwrap();
        assert!(said(&s, "DU KANNST 'HOERER' NICHT DRUECKEN"));
    }

    #[test]
    fn simple_use_scripts() {
        let mut s = session(&[]);
        place_player(&mut s, story::APARTMENT);
        s.process("BENUTZE BETT").unwrap();
        assert!(said(&s, "DU SETZT DICH AUFS BETT."));
        s.process("BENUTZE FENSTER").unwrap();
        assert!(said(&s, "DIE STADT SCHLAEFT NIE."));
        s.process("BENUTZE TERMINAL").unwrap();
        assert!(said(&s, "DU KANNST 'TERMINAL' HIER NICHT BENUTZEN."));

        place_player(&mut s, story::CAFE);
        s.process("BENUTZE GESTALTEN").unwrap();
        assert!(said(&s, "ABER NICHTS SINNVOLLES PASSIERT."));
        s.process("BENUTZE TERMINAL").unwrap();
        assert!(said(&s, "'HACKE TERMINAL'"));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn contact_gives_card_once() {
        let mut s = session(&[]);
        place_player(&mut s, story::CAFE);
        s.process("REDE MIT MANN").unwrap();
        assert!(s.has(Flag::MetContact));
        assert!(said(&s, "DU SIEHST HIER JETZT: SCHLUESSELKARTE"));
        let card = ItemId::new(story::SCHLUESSELKARTE);
        assert!(s.world().item(&card).unwrap().is_at(&s.location_id()));
        assert_eq!(s.state().alert.value(), 1);

        s.console_mut().clear_output();
        s.process("SPRECHE MIT MANN").unwrap();
        assert!(s.console().output().iter().any(|l| l.starts_with("MANN ")));
        assert!(!said(&s, "SCHLUESSELKARTE"));
        assert_eq!(s.state().alert.value(), 1);
    }

    #[test]
    fn contact_keeps_card_where_it_is() {
        let mut s = session(&[]);
        place_player(&mut s, story::CAFE);
        s.world.carry(&ItemId::new(story::SCHLUESSELKARTE)).unwrap();
        s.process("REDE MIT MANN").unwrap();
        assert!(s.world().is_carried(&ItemId::new(story::SCHLUESSELKARTE)));
        assert!(!said(&s, "DU SIEHST HIER JETZT"));
    }

    #[test]
    fn talk_to_nobody() {
        let mut s = session(&[]);
        place_player(&mut s, story::STRASSE);
        s.process("REDE MIT MANN").unwrap();
        assert!(said(&s, "HIER IST NIEMAND MIT DEM NAMEN 'MANN'."));
        assert!(!s.has(Flag::MetContact));
    }
}
