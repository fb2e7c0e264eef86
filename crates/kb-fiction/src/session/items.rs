//! Taking, examining and reading things.

use kb_core::Item;

use super::FictionSession;
use crate::console::Console;
use crate::error::{FictionError, FictionResult};
use crate::scripts::story;

const HELP: &[&str] = &[
    "MOEGLICHE BEFEHLE SIND:",
    "- GEHE [RICHTUNG/ORT] (ODER G)",
    "- NIMM [GEGENSTAND] (ODER N)",
    "- SCHAU (UMSCHAUEN) [OBJEKT/RICHTUNG] (ODER L)",
    "- LIES [GEGENSTAND]",
    "- BENUTZE [GEGENSTAND/OBJEKT] (ODER U)",
    "- BENUTZE [GEGENSTAND] MIT/AN/AUF [OBJEKT]",
    "- INVENTAR (ODER I)",
    "- HACKE [ZIEL]",
    "- DEKRYPTIERE [WAS] MIT [SCHLUESSEL]",
    "- REDE MIT [PERSON]",
    "- SCANNE [ZIEL/PORTS]",
    "- CODE [NUMMER] (Fuer Numpads)",
    "- OEFFNE [TUER/OBJEKT]",
    "- DRUECKE [KNOPF]",
    "- HILFE (?)",
    "- QUIT (ODER EXIT, ENDE)",
];

fn named(item: &Item, word: &str) -> bool {
    item.id.as_str() == word || item.name == word
}

impl<C: Console> FictionSession<C> {
    /// An item lying here, by id or display name.
    fn item_here(&self, word: &str) -> Option<&Item> {
        self.world
            .items_at(&self.state.location)
            .find(|i| named(i, word))
    }

    /// A carried item, by id or display name.
    pub(super) fn item_carried(&self, word: &str) -> Option<&Item> {
        self.world
            .items()
            .find(|i| i.is_carried() && named(i, word))
    }

    pub(super) fn take(&mut self, word: &str) -> FictionResult<()> {
        let item = self
            .item_here(word)
            .ok_or_else(|| FictionError::NotHere(word.to_string()))?;
        if let Some(retired) = item.retirement(&self.state.flags) {
            let line = retired.take.clone();
            self.say(&line);
            return Ok(());
        }
        if !item.takable {
            return Err(FictionError::CannotTake(word.to_string()));
        }
        let id = item.id.clone();
        self.world.carry(&id)?;
        self.say(&format!("DU NIMMST: {id}"));
        self.adjust_alert(1);
        Ok(())
    }

    pub(super) fn look(&mut self, target: Option<&str>) -> FictionResult<()> {
        let Some(target) = target else {
            return self.look_around();
        };
        let flags = &self.state.flags;
        let text = self
            .here()?
            .detail(target, flags)
            .or_else(|| self.item_carried(target).map(|i| i.description.render(flags)))
            .or_else(|| self.item_here(target).map(|i| i.description.render(flags)))
            .map(str::to_string)
            .ok_or_else(|| FictionError::NothingSpecial(target.to_string()))?;
        self.say(&text);
        Ok(())
    }

    pub(super) fn read_item(&mut self, word: &str) -> FictionResult<()> {
        let flags = &self.state.flags;
        let lines: Vec<String> = if let Some(item) = self.item_here(word).filter(|i| i.readable) {
            match item.retirement(flags) {
                Some(retired) => vec![retired.read.clone()],
                None => vec![
                    format!("DU LIEST DEN {word}:"),
                    item.description.render(flags).to_string(),
                ],
            }
        } else if let Some(item) = self.item_carried(word) {
            if let Some(retired) = item.retirement(flags) {
                vec![retired.read.clone()]
            } else if item.readable {
                vec![
                    format!("DU LIEST DEN {word} AUS DEINEM INVENTAR:"),
                    item.description.render(flags).to_string(),
                ]
            } else if item.id.as_str() == story::DATEN_DISKETTE {
                vec!["DU KANNST EINE DISKETTE NICHT EINFACH SO LESEN. DU BRAUCHST EINEN COMPUTER. (BENUTZE COMPUTER, DANN LIES DISKETTE)".to_string()]
            } else {
                vec![
                    format!("DU SCHAUST DIR {word} AN:"),
                    item.description.render(flags).to_string(),
                ]
            }
        } else if let Some(detail) = self.here()?.detail(word, flags) {
            vec![format!("DU LIEST {word}:"), detail.to_string()]
        } else {
            return Err(FictionError::CannotRead(word.to_string()));
        };
        for line in &lines {
            self.say(line);
        }
        Ok(())
    }

    pub(super) fn inventory(&mut self) -> FictionResult<()> {
        let carried: Vec<String> = self
            .world
            .inventory()
            .iter()
            .map(|i| i.id.to_string())
            .collect();
        if carried.is_empty() {
            self.say("DU TRAEGST NICHTS BEI DIR.");
            return Ok(());
        }
        self.say("DU TRAEGST:");
        for id in &carried {
            self.show(&format!("- {id}"));
        }
        Ok(())
    }

    pub(super) fn help(&mut self) -> FictionResult<()> {
        for line in HELP {
            self.say(line);
        }
        Ok(())
    }
}
