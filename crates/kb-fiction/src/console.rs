//! The boundary between the engine and whatever shows text and reads lines.

use std::collections::VecDeque;
use std::io;

/// How fast a line should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Typed out character by character.
    Slow,
    /// Printed at once.
    Instant,
}

/// What kind of text a line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Story narration.
    Narration,
    /// Lists, headers and other screen furniture.
    Screen,
    /// Alarms and system warnings.
    Alarm,
}

/// One read from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without the trailing newline.
    Line(String),
    /// The player pressed Ctrl-C.
    Interrupted,
    /// Input is closed.
    Eof,
}

/// Narration sink and line source for a session.
pub trait Console {
    /// Show a line of text.
    fn say(&mut self, text: &str, pace: Pace, tone: Tone);

    /// Prompt for and read one line.
    fn read_line(&mut self, prompt: &str) -> io::Result<Input>;

    /// Draw a horizontal separator.
    fn rule(&mut self) {}

    /// Wait for dramatic effect.
    fn pause(&mut self, _millis: u64) {}

    /// Show an empty line.
    fn blank(&mut self) {
        self.say("", Pace::Instant, Tone::Screen);
    }
}

/// A console fed from a fixed list of lines, recording everything said.
///
/// Reading past the last queued line yields [`Input::Eof`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue another input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Number of queued lines not yet read.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Every line said so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything said so far, one line per entry.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Forget what was said so far.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str, _pace: Pace, _tone: Tone) {
        self.output.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front().map_or(Input::Eof, Input::Line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_and_records() {
        let mut console = ScriptedConsole::new(["SCHAU", "I"]);
        assert_eq!(console.remaining_input(), 2);
        assert_eq!(
            console.read_line("> ").unwrap(),
            Input::Line("SCHAU".into())
        );
        console.say("HALLO", Pace::Slow, Tone::Narration);
        console.blank();
        assert_eq!(console.read_line("> ").unwrap(), Input::Line("I".into()));
        assert_eq!(console.read_line("> ").unwrap(), Input::Eof);
        assert_eq!(console.output(), ["HALLO", ""]);
        assert_eq!(console.prompts().len(), 3);
        console.clear_output();
        assert!(console.transcript().is_empty());
    }
}
