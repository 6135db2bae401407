//! Timer state machine.
//!
//! A `Timer` is tick-driven: it has no clock of its own, the scheduler
//! calls [`Timer::tick`] once per second. The zero check happens before
//! the decrement-or-transition choice, so a timer that just reached zero
//! and one that was already at zero behave identically regardless of when
//! the tick arrives.
//!
//! ## Sub-phase transitions
//!
//! ```text
//! Working --expiry--> OnBreak --expiry--> Working (cycle + 1)
//!                                    \--> next phase (cycle budget spent)
//!                                    \--> completed (no next phase)
//! ```

use std::fmt;
use std::time::Duration;

use chrono::Utc;

use crate::duration::format_mmss;
use crate::events::TimerEvent;
use crate::timer::phase::{CycleLimit, Phase, TimerConfig};

/// One scheduler tick worth of time.
pub const TICK: Duration = Duration::from_secs(1);

/// A single work/break cycling program.
///
/// The immutable program (name, notification text, phases, cycle limit)
/// comes from a [`TimerConfig`]; everything else is transient countdown
/// state that is rebuilt fresh on startup.
#[derive(Debug, Clone)]
pub struct Timer {
    name: String,
    notif_text: String,
    phases: Vec<Phase>,
    limit: CycleLimit,
    paused: bool,
    is_work: bool,
    remaining: Duration,
    cycle: u32,
    phase_index: usize,
}

impl Timer {
    /// Build a fresh timer at the start of its first work sub-phase.
    pub fn from_config(config: &TimerConfig) -> Self {
        let remaining = config
            .phases
            .first()
            .map(|p| p.work)
            .unwrap_or(Duration::ZERO);
        Self {
            name: config.name.clone(),
            notif_text: config.notif_text.clone(),
            phases: config.phases.clone(),
            limit: config.max_cycles,
            paused: false,
            is_work: true,
            remaining,
            cycle: 1,
            phase_index: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_work(&self) -> bool {
        self.is_work
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    fn current_phase(&self) -> Phase {
        self.phases
            .get(self.phase_index)
            .copied()
            .unwrap_or(Phase::new(Duration::ZERO, Duration::ZERO))
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Restore the countdown to the first phase's work duration.
    ///
    /// Deliberately partial: the current sub-phase, cycle count and phase
    /// index are left alone, so the timer resumes its current slot with a
    /// refilled clock.
    pub fn reset(&mut self) {
        self.remaining = self
            .phases
            .first()
            .map(|p| p.work)
            .unwrap_or(Duration::ZERO);
    }

    /// Advance the timer by one second of wall time.
    ///
    /// Returns an event at every sub-phase boundary. A
    /// [`TimerEvent::PhasesCompleted`] means the timer has exhausted its
    /// program and should be removed; its state is not advanced further.
    /// Paused timers ignore the tick entirely.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.paused {
            return None;
        }

        if !self.remaining.is_zero() {
            self.remaining = self.remaining.saturating_sub(TICK);
            return None;
        }

        if self.is_work {
            self.is_work = false;
            self.remaining = self.current_phase().break_time;
            return Some(TimerEvent::BreakStarted {
                timer: self.name.clone(),
                text: self.notif_text.clone(),
                at: Utc::now(),
            });
        }

        self.cycle += 1;
        if let CycleLimit::Bounded(max) = self.limit {
            if self.cycle > max {
                if self.phase_index + 1 >= self.phases.len() {
                    return Some(TimerEvent::PhasesCompleted {
                        timer: self.name.clone(),
                        text: self.notif_text.clone(),
                        at: Utc::now(),
                    });
                }
                self.phase_index += 1;
                self.cycle = 1;
            }
        }
        self.is_work = true;
        self.remaining = self.current_phase().work;
        Some(TimerEvent::WorkStarted {
            timer: self.name.clone(),
            text: self.notif_text.clone(),
            at: Utc::now(),
        })
    }
}

impl fmt::Display for Timer {
    /// Status line: name, sub-phase, countdown, cycle counter, phase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_work { "Work" } else { "Break" };
        let cycle = match self.limit {
            CycleLimit::Unlimited => format!("{} (∞)", self.cycle),
            CycleLimit::Bounded(max) => format!("{}/{}", self.cycle, max),
        };
        write!(
            f,
            "{} - {}: {} (Cycle {}) Phase {}/{}",
            self.name,
            state,
            format_mmss(self.remaining),
            cycle,
            self.phase_index + 1,
            self.phases.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn config(phases: Vec<Phase>, max_cycles: CycleLimit) -> TimerConfig {
        TimerConfig {
            name: "focus".into(),
            notif_text: "stretch".into(),
            phases,
            max_cycles,
        }
    }

    fn one_phase(work: u64, break_time: u64, limit: CycleLimit) -> Timer {
        Timer::from_config(&config(
            vec![Phase::new(secs(work), secs(break_time))],
            limit,
        ))
    }

    #[test]
    fn starts_in_first_work_phase() {
        let t = one_phase(120, 60, CycleLimit::Unlimited);
        assert!(t.is_work());
        assert_eq!(t.remaining(), secs(120));
        assert_eq!(t.cycle(), 1);
        assert_eq!(t.phase_index(), 0);
    }

    #[test]
    fn counts_down_then_switches_to_break() {
        let mut t = one_phase(2, 1, CycleLimit::Unlimited);

        assert_eq!(t.tick(), None);
        assert_eq!(t.remaining(), secs(1));
        assert_eq!(t.tick(), None);
        assert_eq!(t.remaining(), secs(0));
        assert!(t.is_work());

        // The tick after the countdown hits zero performs the switch.
        let event = t.tick().expect("expected break transition");
        assert!(matches!(event, TimerEvent::BreakStarted { .. }));
        assert_eq!(event.body(), "Break: stretch");
        assert!(!t.is_work());
        assert_eq!(t.remaining(), secs(1));
    }

    #[test]
    fn break_expiry_starts_next_cycle() {
        let mut t = one_phase(2, 1, CycleLimit::Unlimited);
        for _ in 0..3 {
            t.tick();
        }
        assert!(!t.is_work());

        assert_eq!(t.tick(), None); // 1 -> 0
        let event = t.tick().expect("expected work transition");
        assert!(matches!(event, TimerEvent::WorkStarted { .. }));
        assert_eq!(event.body(), "stretch");
        assert!(t.is_work());
        assert_eq!(t.cycle(), 2);
        assert_eq!(t.remaining(), secs(2));
        assert_eq!(t.phase_index(), 0);
    }

    #[test]
    fn bounded_timer_completes_after_last_phase() {
        let mut t = one_phase(1, 1, CycleLimit::Bounded(1));
        assert_eq!(t.tick(), None); // work 1 -> 0
        assert!(!t.tick().expect("break transition").is_completion());
        assert_eq!(t.tick(), None); // break 1 -> 0

        let event = t.tick().expect("expected completion");
        assert!(event.is_completion());
        assert_eq!(event.body(), "All phases completed: stretch");
        // No further state advance: index stays in range.
        assert_eq!(t.phase_index(), 0);
        assert_eq!(t.cycle(), 2);
    }

    #[test]
    fn cycle_budget_spent_advances_phase() {
        let mut t = Timer::from_config(&config(
            vec![
                Phase::new(secs(1), secs(1)),
                Phase::new(secs(3), secs(2)),
            ],
            CycleLimit::Bounded(1),
        ));
        for _ in 0..3 {
            t.tick(); // work out, into break, break out
        }
        let event = t.tick().expect("expected phase advance");
        assert!(matches!(event, TimerEvent::WorkStarted { .. }));
        assert_eq!(t.phase_index(), 1);
        assert_eq!(t.cycle(), 1);
        assert!(t.is_work());
        assert_eq!(t.remaining(), secs(3));
    }

    #[test]
    fn paused_ticks_are_no_ops() {
        let mut t = one_phase(2, 1, CycleLimit::Unlimited);
        t.tick();
        t.toggle_pause();
        for _ in 0..10 {
            assert_eq!(t.tick(), None);
        }
        assert_eq!(t.remaining(), secs(1));
        assert!(t.is_work());
        assert_eq!(t.cycle(), 1);
        assert_eq!(t.phase_index(), 0);

        t.toggle_pause();
        t.tick();
        assert_eq!(t.remaining(), secs(0));
    }

    #[test]
    fn reset_refills_clock_but_keeps_position() {
        // Documented quirk: reset restores only the countdown, not the
        // sub-phase, cycle count or phase index.
        let mut t = one_phase(2, 5, CycleLimit::Unlimited);
        for _ in 0..3 {
            t.tick();
        }
        assert!(!t.is_work());
        assert_eq!(t.remaining(), secs(5));

        t.reset();
        assert_eq!(t.remaining(), secs(2)); // first phase's work duration
        assert!(!t.is_work()); // still on break
        assert_eq!(t.cycle(), 1);
        assert_eq!(t.phase_index(), 0);
    }

    #[test]
    fn zero_length_work_switches_on_first_tick() {
        let mut t = one_phase(0, 1, CycleLimit::Unlimited);
        let event = t.tick().expect("expected immediate break");
        assert!(matches!(event, TimerEvent::BreakStarted { .. }));
    }

    #[test]
    fn status_line_formats() {
        let t = one_phase(25 * 60, 5 * 60, CycleLimit::Unlimited);
        assert_eq!(t.to_string(), "focus - Work: 25:00 (Cycle 1 (∞)) Phase 1/1");

        let mut t = one_phase(2, 90, CycleLimit::Bounded(4));
        for _ in 0..3 {
            t.tick();
        }
        assert_eq!(t.to_string(), "focus - Break: 01:30 (Cycle 1/4) Phase 1/1");
    }
}
