//! Interactive fiction session management.
//!
//! A session owns the world, the player state, the RNG and the console. Each
//! turn runs display, triggers, input, parse, dispatch and alert evaluation,
//! in that order. Handlers live in the submodules and refuse by returning a
//! [`FictionError`] before they change anything.

mod computer;
mod hacking;
mod interact;
mod items;
mod movement;
mod phone;

use kb_core::{Flag, Location, LocationId, World};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alert::Band;
use crate::config::GameConfig;
use crate::console::{Console, Input, Pace, Tone};
use crate::error::{Ending, FictionError, FictionResult};
use crate::parser::{Command, parse_command, suggest_verb};
use crate::player::PlayerState;
use crate::trigger::{self, Trigger};

/// Main prompt.
pub const PROMPT: &str = "WAS TUN?> ";

const FAREWELL: &str = "BIS BALD IM DIGITALEN NIRVANA...";
const INTERRUPTED: &str = "Spiel durch Benutzer unterbrochen. Bis bald!";

const HIGH_WARNING: &str = "[SYSTEM WARNUNG: Unbekannte Prozesse analysieren deine Netzwerkverbindung intensiv... SEI EXTREM VORSICHTIG!]";
const MID_WARNING: &str = "(Ein kurzer Glitch auf deinem Monitor... oder bildest du dir das nur ein?)";

const GENERIC_DOOM: [&str; 2] = [
    "EIN OHRENBETAEUBENDES RAUSCHEN ERFUELLT DEINE SINNE! DEINE SICHT VERSCHWIMMT!",
    "DU WIRST GEWALTSAM AUS DEM SYSTEM GEWORFEN!",
];

/// An interactive fiction session.
pub struct FictionSession<C: Console> {
    world: World,
    state: PlayerState,
    config: GameConfig,
    rng: StdRng,
    console: C,
    needs_display: bool,
}

impl<C: Console> FictionSession<C> {
    /// Create a new session with the player at the world's start location.
    pub fn new(world: World, config: GameConfig, console: C) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = PlayerState::new(world.start().clone(), config.max_alert);
        Self {
            world,
            state,
            config,
            rng,
            console,
            needs_display: true,
        }
    }

    /// Get the current world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the player state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Get a mutable reference to the player state.
    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Get the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get the console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Get a mutable reference to the console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Give the console back.
    pub fn into_console(self) -> C {
        self.console
    }

    /// Play until the game ends.
    pub fn run(&mut self) -> FictionResult<Ending> {
        info!("session started: {}", self.world.title());
        loop {
            match self.turn() {
                Ok(()) => {}
                Err(FictionError::Ended(ending)) => {
                    if ending == Ending::Interrupted {
                        self.console.blank();
                        self.say(INTERRUPTED);
                    }
                    info!("session ended: {ending}");
                    return Ok(ending);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Play one turn.
    pub fn turn(&mut self) -> FictionResult<()> {
        if self.needs_display {
            self.display_location()?;
        }
        self.run_triggers()?;
        let line = self.read_input(PROMPT)?;
        let Some(command) = parse_command(&line) else {
            return Ok(());
        };
        self.console.rule();
        self.dispatch(command)
    }

    /// Parse and run one line of input, skipping display and triggers.
    pub fn process(&mut self, input: &str) -> FictionResult<()> {
        match parse_command(input) {
            Some(command) => self.dispatch(command),
            None => Ok(()),
        }
    }

    /// Run a command, narrate a refusal, then evaluate the alert level.
    pub fn dispatch(&mut self, command: Command) -> FictionResult<()> {
        debug!("command: {command:?}");
        match self.execute(command) {
            Err(e) if e.is_refusal() => self.say(&e.to_string()),
            other => other?,
        }
        self.evaluate_alert()
    }

    /// Execute a parsed command. Refusals are returned, not narrated.
    pub fn execute(&mut self, command: Command) -> FictionResult<()> {
        match command {
            Command::Go { target } => self.go(&target),
            Command::Take { item } => self.take(&item),
            Command::Look { target } => self.look(target.as_deref()),
            Command::Read { target } => self.read_item(&target),
            Command::Use { target, object } => self.use_target(&target, object.as_deref()),
            Command::Inventory => self.inventory(),
            Command::Help => self.help(),
            Command::Decrypt { target, key } => self.decrypt(&target, &key),
            Command::Hack { target } => self.hack(&target),
            Command::Talk { npc } => self.talk(&npc),
            Command::Open { target } => self.open(&target),
            Command::Push { target } => self.push(&target),
            Command::Scan { target } => self.scan(&target),
            Command::Code { code } => self.enter_code(&code),
            Command::Online => self.go_online(),
            Command::Quit => {
                self.say(FAREWELL);
                Err(FictionError::Ended(Ending::Quit))
            }
            Command::Malformed { usage } => Err(FictionError::Usage(usage)),
            Command::Unknown { verb } => Err(FictionError::UnknownVerb {
                hint: suggest_verb(&verb).map(String::from),
                verb,
            }),
        }
    }

    /// Change the alert level by `delta` and narrate the change.
    pub fn adjust_alert(&mut self, delta: i32) {
        let before = self.state.alert.value();
        if let Some(shift) = self.state.alert.adjust(delta) {
            debug!("alert: {before} -> {}", self.state.alert.value());
            let tone = if self.state.alert.band() >= Band::Watched {
                Tone::Alarm
            } else {
                Tone::Narration
            };
            self.console.say(shift.narration(), Pace::Slow, tone);
        }
    }

    /// End the game if the alert level reached the threshold, else maybe warn.
    pub fn evaluate_alert(&mut self) -> FictionResult<()> {
        let level = self.state.alert.value();
        if level >= self.config.game_over_level {
            self.doom()?;
            info!("caught at {} with alert {level}", self.state.location);
            return Err(FictionError::Ended(Ending::Caught));
        }
        if level >= self.config.high_warning_level {
            if self.roll(self.config.high_warning_chance) {
                self.console.blank();
                self.alarm(HIGH_WARNING);
                self.console.pause(1000);
            }
        } else if level >= self.config.mid_warning_level && self.roll(self.config.mid_warning_chance) {
            self.console.blank();
            self.say(MID_WARNING);
            self.console.pause(500);
        }
        Ok(())
    }

    fn doom(&mut self) -> FictionResult<()> {
        let local = self.here()?.doom.clone();
        self.console.blank();
        self.console.rule();
        self.alarm("!!! SYSTEM ALARM !!!");
        self.console.pause(1000);
        self.alarm("DEINE VERBINDUNG WIRD GEKAPERT! MEHRERE EXTERNE ZUGRIFFE!");
        self.console.pause(1500);
        if local.is_empty() {
            for line in GENERIC_DOOM {
                self.alarm(line);
                self.console.pause(1000);
            }
        } else {
            for line in &local {
                self.alarm(line);
                self.console.pause(1000);
            }
        }
        self.console.pause(500);
        self.say("'Zielperson gesichert.', hoerst du eine kalte Stimme sagen.");
        self.console.pause(1000);
        self.say("Alles wird schwarz...");
        self.console.rule();
        self.alarm("--- VERBINDUNG PERMANENT UNTERBROCHEN ---");
        self.alarm("--- SPIEL ENDE ---");
        Ok(())
    }

    fn run_triggers(&mut self) -> FictionResult<()> {
        if trigger::suspended(&self.state, &self.world) {
            return Ok(());
        }
        for t in Trigger::ORDER {
            if t.armed(&self.state) && self.roll(t.chance(&self.config)) {
                debug!("trigger fired: {t:?}");
                match t {
                    Trigger::FirstMessage => self.deliver_first_message(),
                    Trigger::PhoneRing => self.ring_phone()?,
                }
            }
        }
        Ok(())
    }

    fn roll(&mut self, chance: f64) -> bool {
        chance >= 1.0 || (chance > 0.0 && self.rng.random_bool(chance))
    }

    fn read_input(&mut self, prompt: &str) -> FictionResult<String> {
        match self.console.read_line(prompt)? {
            Input::Line(line) => Ok(line.trim().to_string()),
            Input::Interrupted | Input::Eof => Err(FictionError::Ended(Ending::Interrupted)),
        }
    }

    fn here(&self) -> FictionResult<&Location> {
        Ok(self.world.require_location(&self.state.location)?)
    }

    fn is_at(&self, id: &str) -> bool {
        self.state.location.as_str() == id
    }

    fn has(&self, flag: Flag) -> bool {
        self.state.has(flag)
    }

    fn location_id(&self) -> LocationId {
        self.state.location.clone()
    }

    fn say(&mut self, text: &str) {
        self.console.say(text, Pace::Slow, Tone::Narration);
    }

    fn show(&mut self, text: &str) {
        self.console.say(text, Pace::Instant, Tone::Screen);
    }

    fn alarm(&mut self, text: &str) {
        self.console.say(text, Pace::Slow, Tone::Alarm);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::console::ScriptedConsole;

    /// A deterministic session on the embedded story.
    pub(crate) fn session(lines: &[&str]) -> FictionSession<ScriptedConsole> {
        session_with(GameConfig::deterministic(7), lines)
    }

    /// A session with a custom configuration.
    pub(crate) fn session_with(
        config: GameConfig,
        lines: &[&str],
    ) -> FictionSession<ScriptedConsole> {
        let world = World::embedded().unwrap();
        FictionSession::new(world, config, ScriptedConsole::new(lines.iter().copied()))
    }

    /// Put the player somewhere without narration.
    pub(crate) fn place_player(s: &mut FictionSession<ScriptedConsole>, id: &str) {
        s.state.move_to(LocationId::new(id));
        s.state.first_visit(&LocationId::new(id));
        s.needs_display = false;
    }

    /// Set the alert level directly.
    pub(crate) fn set_alert(s: &mut FictionSession<ScriptedConsole>, value: u32) {
        s.state.alert = crate::alert::AlertLevel::with_value(value, s.config.max_alert);
    }

    pub(crate) fn said(s: &FictionSession<ScriptedConsole>, needle: &str) -> bool {
        s.console.output().iter().any(|l| l.contains(needle))
    }
}
