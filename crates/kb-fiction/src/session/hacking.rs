//! Hacking the cafe terminal and the server farm.

use kb_core::{Flag, ItemId};
use log::{debug, info};

use super::FictionSession;
use crate::console::Console;
use crate::error::{FictionError, FictionResult};
use crate::portscan::{Guess, INTERCEPTED_HINT, PortScan};
use crate::scripts::{HackTarget, story};

const PORT_PROMPT: &str = "WELCHEN PORT VERSUCHST DU ZU VERBINDEN (1-6)?> ";

impl<C: Console> FictionSession<C> {
    pub(super) fn hack(&mut self, target: &str) -> FictionResult<()> {
        match HackTarget::resolve(target, &self.state.location) {
            Some(HackTarget::ServerFarm) => self.port_scan(),
            Some(HackTarget::CafeTerminal) => self.hack_terminal(),
            Some(HackTarget::HomeComputer) => Err(FictionError::Refused(
                "DU MUSST DEN COMPUTER ZUERST BENUTZEN ('BENUTZE COMPUTER'), UM ZU VERSUCHEN, DICH EINZULOGGEN.",
            )),
            None => Err(FictionError::CannotHack(target.to_string())),
        }
    }

    fn hack_terminal(&mut self) -> FictionResult<()> {
        self.say("DU VERSUCHST, DIE ANMELDUNG DES TERMINALS ZU UMGEHEN...");
        self.console.pause(1500);
        if !self.roll(self.config.hack_chance) {
            debug!("terminal hack failed");
            self.alarm("FEHLGESCHLAGEN! DAS SYSTEM HAT DEINEN VERSUCH REGISTRIERT.");
            self.adjust_alert(4);
            return self.evaluate_alert();
        }

        self.say("ERFOLG! DU HAST EINE TEMPORAERE SITZUNG ERLANGT.");
        self.say("DU FINDEST EINE HERUM LIEGENDE DATEI 'TRANSFER.LOG'.");
        if self.has(Flag::DisketteReceived) {
            self.say("DU DURCHSUCHST DIE LOGS, FINDEST ABER NICHTS NEUES VON INTERESSE.");
            return Ok(());
        }
        self.say("IN DEN LOGS WIRD EINE VERSCHOBENE 'PROTOKOLL 7' DATEI ERWAEHNT. JEMAND HAT EINE KOPIE AUF EINER DISKETTE ZURUECKGELASSEN!");
        let here = self.location_id();
        self.world.place(&ItemId::new(story::DATEN_DISKETTE), &here)?;
        self.state.set(Flag::DisketteReceived);
        info!("diskette dropped at {here}");
        self.say("DU SIEHST HIER JETZT: DATEN DISKETTE");
        self.adjust_alert(3);
        Ok(())
    }

    pub(super) fn scan(&mut self, target: &str) -> FictionResult<()> {
        if target != story::PORTS {
            return Err(FictionError::NothingToScan(target.to_string()));
        }
        if self.is_at(story::SERVER_FARM_EINGANG) {
            return self.port_scan();
        }
        if self.is_at(story::APARTMENT) && self.has(Flag::LoggedIn) {
            self.say("DU STARTETST EINEN NETZWERK-SCAN VON DEINEM COMPUTER AUS...");
            self.say("SCAN ERGEBNISSE: Lokales Netzwerk (HEIMBASIS), Oeffentliches Terminal (CYBER CAFE), Unbekannte Adresse (SERVER-FARM IP)");
            self.adjust_alert(1);
            return Ok(());
        }
        Err(FictionError::NothingToScan(target.to_string()))
    }

    /// The port-scan minigame. Reads guesses until a hit, exhaustion, or capture.
    pub(super) fn port_scan(&mut self) -> FictionResult<()> {
        if !self.is_at(story::SERVER_FARM_EINGANG) {
            return Err(FictionError::Refused(
                "DU MUSST VOR DER SERVER-FARM STEHEN, UM PORTS ZU SCANNEN.",
            ));
        }
        if self.has(Flag::ServerHacked) {
            return Err(FictionError::AlreadyDone(
                "DU HAST BEREITS EINEN ZUGANG ZUM SYSTEM UEBER TELNET GEFUNDEN.",
            ));
        }

        self.say("DU STARTETST EINEN PORT SCAN AUF DIE IP DER SERVER-FARM (213.45.67.89)...");
        self.adjust_alert(2);
        self.console.pause(2000);

        let mut scan = PortScan::start(&mut self.rng, self.config.port_scan_attempts);
        debug!("telnet at position {}", scan.target_position());
        self.say("OFFENE PORTS GEFUNDEN:");
        for (i, port) in scan.ports().iter().enumerate() {
            self.show(&format!("{}: {port}", i + 1));
        }
        self.console.blank();
        self.say("EINE VERSTECKTE SYSTEMNACHRICHT WIRD ABGEFANGEN:");
        self.show(&format!("'{INTERCEPTED_HINT}' (ROT13)"));

        loop {
            let input = self.read_input(PORT_PROMPT)?;
            match scan.guess(&input) {
                Guess::NotANumber => self.say("UNGUELTIGE EINGABE. BITTE EINE ZAHL EINGEBEN."),
                Guess::OutOfRange => self.say("UNGUELTIGE AUSWAHL."),
                Guess::Hit { port } => {
                    self.say(&format!("VERSUCHE VERBINDUNG MIT PORT {port}..."));
                    self.console.pause(1500);
                    self.say("VERBINDUNG UEBER PORT 23 HERGESTELLT!");
                    self.alarm(">>> TELNET-BANNER: 'UNAUTORISIERTER ZUGRIFF STRENGSTENS VERBOTEN! LOGGING AKTIV!' <<<");
                    self.say("DU BIST DRIN! DU HAST EINE MINIMALE SHELL-SITZUNG.");
                    self.state.set(Flag::ServerHacked);
                    info!("server farm shell obtained");
                    self.adjust_alert(4);
                    self.evaluate_alert()?;

                    let code = self.world.secrets().door_code.clone();
                    self.say("IN DEN WILLKOMMENSNACHRICHTEN DER ALTEN SHELL FINDEST DU EINEN VERGESSENEN HINWEIS:");
                    self.say("'ADMIN-NOTIZ: TUERCODE IST DAS JAHR, IN DEM DER ERSTE FILM IN DIE KINOS KAM.'");
                    self.say(&format!(
                        "(DU KANNST JETZT VERSUCHEN, DEN CODE AM NUMPAD EINZUGEBEN: 'CODE {code}')"
                    ));
                    self.state.access_code = Some(code);
                    return Ok(());
                }
                Guess::Miss {
                    port,
                    attempts_left,
                } => {
                    self.say(&format!("VERSUCHE VERBINDUNG MIT PORT {port}..."));
                    self.console.pause(1000);
                    self.say(&format!(
                        "VERBINDUNG FEHLGESCHLAGEN ODER ABGELEHNT. {attempts_left} VERSUCH(E) UEBRIG."
                    ));
                    self.adjust_alert(2);
                    self.evaluate_alert()?;
                    if attempts_left == 0 {
                        self.alarm("SYSTEM HAT MEHRERE FEHLGESCHLAGENE VERBINDUNGSVERSUCHE REGISTRIERT! VERBINDUNG BLOCKIERT.");
                        self.adjust_alert(3);
                        self.evaluate_alert()?;
                        self.say("DER PORT SCAN UND VERBINDUNGSVERSUCH WAR NICHT ERFOLGREICH.");
                        return Ok(());
                    }
                }
                Guess::Closed => return Ok(()),
            }
        }
    }
}
