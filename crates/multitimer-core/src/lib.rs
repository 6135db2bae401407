//! # Multitimer Core Library
//!
//! Core business logic for multitimer, a terminal multi-timer manager
//! that runs independent work/break cycle timers side by side. The CLI
//! binary is a thin interactive layer over this library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. Each call to `tick()`
//!   represents one elapsed second; the caller owns the clock.
//! - **Manager**: Owns every active timer and its durable config behind a
//!   single lock, and drives the shared one-second scheduler.
//! - **Store**: JSON persistence of timer configurations, durations kept
//!   as integer nanoseconds.
//! - **Notifier**: Seam for the desktop notification sink.
//!
//! ## Key Components
//!
//! - [`Timer`]: Work/break cycling state machine
//! - [`TimerManager`]: Thread-safe timer collection + scheduler
//! - [`ConfigStore`]: Timer config persistence
//! - [`Notifier`]: Trait for notification delivery

pub mod duration;
pub mod error;
pub mod events;
pub mod manager;
pub mod notify;
pub mod store;
pub mod timer;

pub use duration::{format_mmss, parse_duration};
pub use error::{ParseDurationError, StoreError};
pub use events::TimerEvent;
pub use manager::{spawn_scheduler, RedrawSignal, TimerManager};
pub use notify::{Notifier, NullNotifier};
pub use store::ConfigStore;
pub use timer::{CycleLimit, Phase, Timer, TimerConfig};
