//! In-place terminal rendering with raw ANSI escapes.
//!
//! The display is redrawn wholesale on every signal: header, one line per
//! timer, command menu. While a prompt is active the cursor is saved and
//! restored around the redraw so the user's half-typed command survives.

use std::io::Write;

use multitimer_core::TimerManager;

const CLEAR_SCREEN: &str = "\x1b[2J";
const MOVE_TO_TOP: &str = "\x1b[H";
const CLEAR_LINE: &str = "\x1b[K";
const SAVE_CURSOR: &str = "\x1b[s";
const RESTORE_CURSOR: &str = "\x1b[u";

pub fn clear() {
    print!("{CLEAR_SCREEN}{MOVE_TO_TOP}");
    flush();
}

/// Redraw the timer list and menu.
///
/// With `preserve_prompt` the cursor is parked back where it was, so an
/// in-flight command line keeps its position; otherwise the screen is
/// cleared first. Timer lines are formatted by the manager under its
/// lock; everything printed here happens outside it.
pub fn draw(manager: &TimerManager, preserve_prompt: bool) {
    let lines = manager.status_lines();

    let mut out = String::new();
    if preserve_prompt {
        out.push_str(SAVE_CURSOR);
        out.push_str(MOVE_TO_TOP);
    } else {
        out.push_str(CLEAR_SCREEN);
        out.push_str(MOVE_TO_TOP);
    }

    out.push_str(CLEAR_LINE);
    out.push_str("=== Active Timers ===\n");
    for line in &lines {
        out.push_str(CLEAR_LINE);
        out.push_str(line);
        out.push('\n');
    }

    out.push_str(CLEAR_LINE);
    out.push_str("\nCommands:\n");
    for entry in [
        "a - Add new timer",
        "p <number> - Pause/Resume timer",
        "r <number> - Reset timer",
        "d <number> - Delete timer",
        "q - Quit",
    ] {
        out.push_str(CLEAR_LINE);
        out.push_str(entry);
        out.push('\n');
    }

    if preserve_prompt {
        out.push_str(RESTORE_CURSOR);
    }

    print!("{out}");
    flush();
}

pub fn prompt() {
    print!("\nEnter command: ");
    flush();
}

fn flush() {
    let _ = std::io::stdout().flush();
}
