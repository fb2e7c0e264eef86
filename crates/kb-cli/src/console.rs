//! Terminal console: line editing, slow typing, wrapping and colour.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use kb_fiction::{Console, Input, Pace, Tone};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Delay per character for slow narration.
const TYPING_DELAY: Duration = Duration::from_millis(15);

/// A [`Console`] on stdin/stdout.
pub struct TerminalConsole {
    editor: DefaultEditor,
    fast: bool,
    width: usize,
}

impl TerminalConsole {
    /// Create a console wrapping at `width` columns. `fast` skips delays.
    pub fn new(fast: bool, width: usize) -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            fast,
            width: width.max(20),
        })
    }

    fn paint(line: &str, tone: Tone) -> String {
        match tone {
            Tone::Narration => line.green().to_string(),
            Tone::Screen => line.bright_green().to_string(),
            Tone::Alarm => line.red().bold().to_string(),
        }
    }

    fn type_out(&self, line: &str, tone: Tone) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for c in line.chars() {
            write!(out, "{}", Self::paint(c.encode_utf8(&mut [0; 4]), tone))?;
            out.flush()?;
            thread::sleep(TYPING_DELAY);
        }
        writeln!(out)
    }
}

/// Break `text` into lines of at most `width` characters at spaces.
///
/// Words longer than `width` stay whole on their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

impl Console for TerminalConsole {
    fn say(&mut self, text: &str, pace: Pace, tone: Tone) {
        for line in wrap(text, self.width) {
            let result = if pace == Pace::Slow && !self.fast {
                self.type_out(&line, tone)
            } else {
                writeln!(io::stdout(), "{}", Self::paint(&line, tone))
            };
            if let Err(e) = result {
                log::debug!("stdout write failed: {e}");
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }

    fn rule(&mut self) {
        let line = "-".repeat(self.width);
        self.say(&line, Pace::Instant, Tone::Screen);
    }

    fn pause(&mut self, millis: u64) {
        if !self.fast {
            thread::sleep(Duration::from_millis(millis));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(wrap("EINS ZWEI DREI", 9), ["EINS ZWEI", "DREI"]);
        assert_eq!(wrap("EINS ZWEI DREI", 80), ["EINS ZWEI DREI"]);
    }

    #[test]
    fn wrap_keeps_long_words_and_empty_lines() {
        assert_eq!(wrap("ABCDEFGHIJ KL", 5), ["ABCDEFGHIJ", "KL"]);
        assert_eq!(wrap("", 10), [""]);
    }
}
