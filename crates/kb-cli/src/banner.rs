//! The home computer boot sequence shown before the game starts.

use std::io;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use kb_fiction::{Console, Pace, Tone};

const HEADER: [&str; 4] = [
    "    **** C=64 ZEITMASCHINE ****",
    " 64K RAM SYSTEM 38911 BASIC BYTES FREE",
    "",
    "READY.",
];

/// Clear the terminal and home the cursor.
pub fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

/// Play the boot sequence on `console`.
pub fn boot(console: &mut impl Console) -> io::Result<()> {
    clear_screen()?;
    for line in HEADER {
        console.say(line, Pace::Slow, Tone::Screen);
    }
    console.pause(1000);
    for (line, wait) in [
        ("LOAD\"*\",8,1", 500),
        ("SEARCHING FOR *", 1500),
        ("LOADING...", 2000),
        ("READY.", 0),
    ] {
        console.say(line, Pace::Slow, Tone::Screen);
        console.pause(wait);
    }
    console.say("RUN", Pace::Slow, Tone::Screen);
    console.rule();
    console.pause(1500);
    clear_screen()
}
