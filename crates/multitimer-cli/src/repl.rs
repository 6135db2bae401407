//! Interactive command loop.
//!
//! One line per command; the first character picks the action and indexed
//! commands carry a 1-based timer number. Out-of-range numbers fall
//! through as no-ops so a stale index never crashes the session.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use multitimer_core::{parse_duration, CycleLimit, Phase, TimerConfig, TimerManager};

use crate::screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    TogglePause(usize),
    Reset(usize),
    Delete(usize),
    Quit,
}

impl Command {
    /// Parse a command line. Case-insensitive on the action character;
    /// an index is only read after a bare action letter, and a missing
    /// or unparseable number becomes index 0, which every manager
    /// operation treats as out of range.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let first = line.chars().next()?;
        match first.to_ascii_lowercase() {
            'a' => Some(Command::Add),
            'p' => Some(Command::TogglePause(parse_index(line))),
            'r' => Some(Command::Reset(parse_index(line))),
            'd' => Some(Command::Delete(parse_index(line))),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

fn parse_index(line: &str) -> usize {
    let mut tokens = line.split_whitespace();
    // Only a bare action letter carries an index; "pause 3" is not "p 3".
    if tokens.next().map_or(true, |t| t.chars().count() != 1) {
        return 0;
    }
    tokens.next().and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Run the command loop until `q` or stdin EOF.
pub fn run(manager: &Arc<TimerManager>) -> Result<()> {
    screen::prompt();
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Some(Command::Add) => {
                match build_timer() {
                    Ok(config) => {
                        if let Err(e) = manager.add(config) {
                            eprintln!("Error saving timer configurations: {e}");
                        }
                    }
                    Err(e) => eprintln!("Timer creation aborted: {e}"),
                }
                screen::draw(manager, false);
            }
            Some(Command::TogglePause(n)) => {
                if manager.toggle_pause(n) {
                    screen::draw(manager, false);
                }
            }
            Some(Command::Reset(n)) => {
                if manager.reset(n) {
                    screen::draw(manager, false);
                }
            }
            Some(Command::Delete(n)) => match manager.remove(n) {
                Ok(true) => screen::draw(manager, false),
                Ok(false) => {}
                Err(e) => {
                    // The in-memory deletion stands; only the save failed.
                    eprintln!("Error saving timer configurations: {e}");
                    screen::draw(manager, false);
                }
            },
            Some(Command::Quit) => return Ok(()),
            None => {}
        }
        screen::prompt();
    }
    Ok(())
}

/// Interactively collect a new timer program.
fn build_timer() -> Result<TimerConfig> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Timer name")
        .interact_text()?;
    let notif_text: String = Input::with_theme(&theme)
        .with_prompt("Notification text")
        .interact_text()?;

    let mut phases = Vec::new();
    loop {
        println!("Phase {}", phases.len() + 1);
        let work = prompt_duration(&theme, "Work time (MM:SS or minutes)")?;
        let break_time = prompt_duration(&theme, "Break time (MM:SS or minutes)")?;
        phases.push(Phase::new(work, break_time));

        let again = Confirm::with_theme(&theme)
            .with_prompt("Add another phase?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }

    let raw: String = Input::with_theme(&theme)
        .with_prompt("Cycle count (u for unlimited)")
        .validate_with(|input: &String| match parse_cycle_limit(input) {
            Some(_) => Ok(()),
            None => Err("enter u or a positive number"),
        })
        .interact_text()?;
    let max_cycles = parse_cycle_limit(&raw).unwrap_or(CycleLimit::Unlimited);

    Ok(TimerConfig {
        name,
        notif_text,
        phases,
        max_cycles,
    })
}

fn prompt_duration(theme: &ColorfulTheme, prompt: &str) -> Result<Duration> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            parse_duration(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_duration(&raw)?)
}

fn parse_cycle_limit(input: &str) -> Option<CycleLimit> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("u") {
        return Some(CycleLimit::Unlimited);
    }
    input
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .map(CycleLimit::Bounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_case_insensitively() {
        assert_eq!(Command::parse("a"), Some(Command::Add));
        assert_eq!(Command::parse("Add"), Some(Command::Add));
        assert_eq!(Command::parse("P 2"), Some(Command::TogglePause(2)));
        assert_eq!(Command::parse("r 10"), Some(Command::Reset(10)));
        assert_eq!(Command::parse("d 1"), Some(Command::Delete(1)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn blank_and_unknown_lines_reprompt() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("x 1"), None);
    }

    #[test]
    fn missing_or_bad_index_becomes_zero() {
        // Index 0 is out of range for every 1-based manager operation.
        assert_eq!(Command::parse("p"), Some(Command::TogglePause(0)));
        assert_eq!(Command::parse("d abc"), Some(Command::Delete(0)));
        assert_eq!(Command::parse("r -1"), Some(Command::Reset(0)));
    }

    #[test]
    fn spelled_out_actions_carry_no_index() {
        // "pause 3" selects the pause action by its first letter but the
        // number after a spelled-out word is not an index.
        assert_eq!(Command::parse("pause 3"), Some(Command::TogglePause(0)));
        assert_eq!(Command::parse("delete 2"), Some(Command::Delete(0)));
        assert_eq!(Command::parse("p 3"), Some(Command::TogglePause(3)));
    }

    #[test]
    fn cycle_limit_input() {
        assert_eq!(parse_cycle_limit("u"), Some(CycleLimit::Unlimited));
        assert_eq!(parse_cycle_limit("U"), Some(CycleLimit::Unlimited));
        assert_eq!(parse_cycle_limit("4"), Some(CycleLimit::Bounded(4)));
        assert_eq!(parse_cycle_limit("0"), None);
        assert_eq!(parse_cycle_limit("-2"), None);
        assert_eq!(parse_cycle_limit("lots"), None);
    }
}
