//! JSON persistence for timer configurations.
//!
//! The store is a single file holding the full config list; every save
//! rewrites it wholesale. Saves go through a temp file in the same
//! directory followed by a rename, so a crash mid-write never leaves a
//! truncated store behind.

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::timer::TimerConfig;

const STORE_FILE: &str = "timers.json";

/// File-backed store of [`TimerConfig`] records.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/multitimer/timers.json`, creating the directory.
    pub fn default_path() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .ok_or(StoreError::NoConfigDir)?
            .join(".config")
            .join("multitimer");
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self::new(dir.join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all saved configs. A missing store is an empty list, not an
    /// error.
    pub fn load(&self) -> Result<Vec<TimerConfig>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Atomically overwrite the store with the full current config list.
    pub fn save(&self, configs: &[TimerConfig]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(configs).map_err(StoreError::Encode)?;
        let tmp = self.path.with_extension("json.tmp");
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{CycleLimit, Phase};
    use std::time::Duration;

    fn sample_configs() -> Vec<TimerConfig> {
        vec![
            TimerConfig {
                name: "deep work".into(),
                notif_text: "walk around".into(),
                phases: vec![Phase::new(
                    Duration::from_secs(50 * 60),
                    Duration::from_secs(10 * 60),
                )],
                max_cycles: CycleLimit::Unlimited,
            },
            TimerConfig {
                name: "sprint".into(),
                notif_text: "done".into(),
                phases: vec![
                    Phase::new(Duration::from_secs(90), Duration::from_secs(30)),
                    Phase::new(Duration::from_nanos(1_500_000_123), Duration::ZERO),
                ],
                max_cycles: CycleLimit::Bounded(3),
            },
        ]
    }

    #[test]
    fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("timers.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("timers.json"));
        let configs = sample_configs();
        store.save(&configs).unwrap();
        // Sub-second nanoseconds survive untouched.
        assert_eq!(store.load().unwrap(), configs);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("timers.json"));
        store.save(&sample_configs()).unwrap();
        store.save(&sample_configs()[..1]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_store_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        std::fs::write(&path, "not json").unwrap();
        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
