//! Timer collection, shared lock, and the one-second scheduler.
//!
//! The manager owns two parallel lists: the live [`Timer`]s and their
//! durable [`TimerConfig`]s, always the same length and order so that
//! deletion and persistence stay consistent. One mutex guards both; no
//! operation does more than O(timer count) in-memory work while holding
//! it. Notifications and store writes happen after the lock is released.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::events::TimerEvent;
use crate::notify::Notifier;
use crate::store::ConfigStore;
use crate::timer::{Timer, TimerConfig, TICK};

/// Receiving side of the coalescing redraw mailbox.
///
/// The channel has capacity one and senders never block: bursts of ticks
/// collapse into a single pending request. The renderer drains one signal
/// and then reads the *current* manager state, not a snapshot from signal
/// time.
pub type RedrawSignal = Receiver<()>;

struct Inner {
    timers: Vec<Timer>,
    configs: Vec<TimerConfig>,
}

/// Thread-safe owner of every active timer.
pub struct TimerManager {
    inner: Mutex<Inner>,
    redraw_tx: SyncSender<()>,
    store: ConfigStore,
    notifier: Arc<dyn Notifier>,
}

impl TimerManager {
    pub fn new(store: ConfigStore, notifier: Arc<dyn Notifier>) -> (Self, RedrawSignal) {
        let (redraw_tx, redraw_rx) = mpsc::sync_channel(1);
        let manager = Self {
            inner: Mutex::new(Inner {
                timers: Vec::new(),
                configs: Vec::new(),
            }),
            redraw_tx,
            store,
            notifier,
        };
        (manager, redraw_rx)
    }

    /// Rebuild the active timer list from the persisted configs.
    ///
    /// Returns how many timers were restored. A missing store restores
    /// nothing and is not an error.
    pub fn load_saved(&self) -> Result<usize, StoreError> {
        let configs = self.store.load()?;
        let mut inner = self.inner.lock();
        inner.timers = configs.iter().map(Timer::from_config).collect();
        inner.configs = configs;
        Ok(inner.timers.len())
    }

    /// Add a timer built from `config` and persist the new config list.
    ///
    /// A failed save is returned for reporting, but the in-memory
    /// addition stands either way; memory is the source of truth until
    /// the next successful save.
    pub fn add(&self, config: TimerConfig) -> Result<(), StoreError> {
        let snapshot = {
            let mut inner = self.inner.lock();
            inner.timers.push(Timer::from_config(&config));
            inner.configs.push(config);
            inner.configs.clone()
        };
        self.store.save(&snapshot)
    }

    /// Flip the paused flag of the 1-based `index`. Out of range is a
    /// silent no-op; returns whether a timer was touched.
    pub fn toggle_pause(&self, index: usize) -> bool {
        let mut inner = self.inner.lock();
        match index.checked_sub(1).and_then(|i| inner.timers.get_mut(i)) {
            Some(timer) => {
                timer.toggle_pause();
                true
            }
            None => false,
        }
    }

    /// Refill the countdown of the 1-based `index` (partial reset, see
    /// [`Timer::reset`]). Out of range is a silent no-op.
    pub fn reset(&self, index: usize) -> bool {
        let mut inner = self.inner.lock();
        match index.checked_sub(1).and_then(|i| inner.timers.get_mut(i)) {
            Some(timer) => {
                timer.reset();
                true
            }
            None => false,
        }
    }

    /// Delete the timer and its config at the 1-based `index` in
    /// lock-step, then persist. Returns `Ok(false)` untouched when the
    /// index is out of range.
    pub fn remove(&self, index: usize) -> Result<bool, StoreError> {
        let snapshot = {
            let mut inner = self.inner.lock();
            let i = match index.checked_sub(1) {
                Some(i) if i < inner.timers.len() => i,
                _ => return Ok(false),
            };
            inner.timers.remove(i);
            inner.configs.remove(i);
            inner.configs.clone()
        };
        self.store.save(&snapshot)?;
        Ok(true)
    }

    /// Advance every timer by one second.
    ///
    /// Each timer is processed exactly once; completed timers and their
    /// configs are compacted out afterwards, so removals never skip or
    /// reprocess neighbours. If any timer was present, one coalescing
    /// redraw request is posted.
    pub fn tick(&self) {
        let mut events: Vec<TimerEvent> = Vec::new();
        let (snapshot, had_timers) = {
            let mut inner = self.inner.lock();
            let had_timers = !inner.timers.is_empty();

            let mut completed: Vec<usize> = Vec::new();
            for (i, timer) in inner.timers.iter_mut().enumerate() {
                if let Some(event) = timer.tick() {
                    if event.is_completion() {
                        completed.push(i);
                    }
                    events.push(event);
                }
            }

            let snapshot = if completed.is_empty() {
                None
            } else {
                for &i in completed.iter().rev() {
                    inner.timers.remove(i);
                    inner.configs.remove(i);
                }
                Some(inner.configs.clone())
            };
            (snapshot, had_timers)
        };

        for event in &events {
            tracing::debug!(timer = event.title(), at = %event.at(), "timer transition");
            self.notifier.notify(event.title(), &event.body());
        }

        if let Some(configs) = snapshot {
            // Background save; there is no user to report to from here.
            if let Err(e) = self.store.save(&configs) {
                tracing::warn!("failed to persist configs after timer completion: {e}");
            }
        }

        if had_timers {
            let _ = self.redraw_tx.try_send(());
        }
    }

    pub fn timer_count(&self) -> usize {
        self.inner.lock().timers.len()
    }

    /// Numbered status lines for the renderer. Only the list read holds
    /// the lock; formatting works on a snapshot and printing is the
    /// caller's business, both outside it.
    pub fn status_lines(&self) -> Vec<String> {
        let timers = self.inner.lock().timers.clone();
        timers
            .iter()
            .enumerate()
            .map(|(i, timer)| {
                let paused = if timer.is_paused() { " (PAUSED)" } else { "" };
                format!("{}. {}{}", i + 1, timer, paused)
            })
            .collect()
    }
}

/// Free-running 1 Hz driver: wall-clock sleeps, no drift correction.
pub fn spawn_scheduler(manager: Arc<TimerManager>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(TICK);
        manager.tick();
    })
}
