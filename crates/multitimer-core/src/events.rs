//! Events emitted by timer state transitions.
//!
//! Every sub-phase boundary produces an event. The manager forwards them
//! to the notification sink after releasing its lock; a completion event
//! additionally tells the manager to retire the timer.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A work sub-phase ended and the break started.
    BreakStarted {
        timer: String,
        text: String,
        at: DateTime<Utc>,
    },
    /// A break ended and the next work sub-phase started.
    WorkStarted {
        timer: String,
        text: String,
        at: DateTime<Utc>,
    },
    /// The final phase exhausted its cycle budget; the timer is done.
    PhasesCompleted {
        timer: String,
        text: String,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    /// Notification title: the timer's display name.
    pub fn title(&self) -> &str {
        match self {
            TimerEvent::BreakStarted { timer, .. }
            | TimerEvent::WorkStarted { timer, .. }
            | TimerEvent::PhasesCompleted { timer, .. } => timer,
        }
    }

    /// Notification body built from the timer's notification text.
    pub fn body(&self) -> String {
        match self {
            TimerEvent::BreakStarted { text, .. } => format!("Break: {text}"),
            TimerEvent::WorkStarted { text, .. } => text.clone(),
            TimerEvent::PhasesCompleted { text, .. } => {
                format!("All phases completed: {text}")
            }
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TimerEvent::BreakStarted { at, .. }
            | TimerEvent::WorkStarted { at, .. }
            | TimerEvent::PhasesCompleted { at, .. } => *at,
        }
    }

    /// True when the emitting timer has finished its whole program.
    pub fn is_completion(&self) -> bool {
        matches!(self, TimerEvent::PhasesCompleted { .. })
    }
}
