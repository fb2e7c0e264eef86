//! Location display and movement.

use kb_core::{Flag, LocationId};
use log::info;

use super::FictionSession;
use crate::console::Console;
use crate::error::{FictionError, FictionResult};
use crate::scripts::story;

/// Longest detail shown in the look overview before it is cut.
const DETAIL_PREVIEW: usize = 50;

fn preview(text: &str) -> String {
    if text.chars().count() > DETAIL_PREVIEW {
        let cut: String = text.chars().take(DETAIL_PREVIEW - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

impl<C: Console> FictionSession<C> {
    /// Show the current location: header, text, items and exits.
    pub(crate) fn display_location(&mut self) -> FictionResult<()> {
        self.needs_display = false;
        let here = self.location_id();
        let first = self.state.first_visit(&here);
        let location = self.here()?;
        let name = location.name.clone();
        let paragraphs = if first && !location.first_visit.is_empty() {
            location.first_visit.clone()
        } else {
            vec![location.description.clone()]
        };
        let exits: Vec<String> = location.exits.iter().map(|e| e.keyword.clone()).collect();
        let items: Vec<String> = self
            .world
            .items_at(&here)
            .map(|i| i.id.to_string())
            .collect();

        self.console.rule();
        self.show(&format!("ORT: {name}"));
        self.console.rule();
        for paragraph in &paragraphs {
            self.say(paragraph);
        }
        if !items.is_empty() {
            self.console.blank();
            self.show("DU SIEHST HIER:");
            for item in &items {
                self.show(&format!("- {item}"));
            }
        }
        if !exits.is_empty() {
            self.console.blank();
            self.show("MOEGLICHE AUSGAENGE:");
            self.show(&exits.join(", "));
        }
        Ok(())
    }

    /// `SCHAU` without a target: the location plus a preview of every interactable.
    pub(crate) fn look_around(&mut self) -> FictionResult<()> {
        self.display_location()?;
        let location = self.here()?;
        let things: Vec<(String, Option<String>)> = location
            .interactables
            .iter()
            .map(|thing| {
                let detail = location.detail(thing, &self.state.flags).map(preview);
                (thing.clone(), detail)
            })
            .collect();
        if things.is_empty() {
            return Ok(());
        }
        self.console.blank();
        self.show("INTERESSANTE DINGE HIER:");
        for (thing, detail) in things {
            self.show(&format!("- {thing}"));
            if let Some(detail) = detail {
                self.show(&format!("  ({detail})"));
            }
        }
        Ok(())
    }

    pub(super) fn go(&mut self, target: &str) -> FictionResult<()> {
        let destination = self
            .world
            .resolve_exit(&self.state.location, target)
            .cloned()
            .ok_or_else(|| FictionError::NoExit(target.to_string()))?;
        if self.world.require_location(&destination)?.requires_login && !self.has(Flag::LoggedIn) {
            return Err(FictionError::LoginRequired);
        }
        self.enter(destination)
    }

    /// Move the player and show the new location.
    ///
    /// Leaving a login-gated location for an ungated one ends the login.
    pub(super) fn enter(&mut self, destination: LocationId) -> FictionResult<()> {
        let gated = |s: &Self, id: &LocationId| s.world.location(id).is_some_and(|l| l.requires_login);
        if gated(self, &self.state.location)
            && !gated(self, &destination)
            && self.state.clear(Flag::LoggedIn)
        {
            info!("logged out by leaving {}", self.state.location);
        }
        self.state.move_to(destination);
        self.display_location()?;
        if self.is_at(story::TELEFONZELLE_INNERES) && self.has(Flag::PhoneRinging) {
            self.say("Das Klingeln ist hier drinnen ohrenbetaeubend!");
        }
        Ok(())
    }
}
