//! Durable timer program: phases and cycle policy.
//!
//! These types are what the config store persists. The wire format keeps
//! the field names and representations of earlier store files: durations
//! as integer nanoseconds, the cycle limit as a signed integer where `-1`
//! means unlimited.

use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One work/break pair within a timer's program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "WorkDuration", with = "duration_nanos")]
    pub work: Duration,
    #[serde(rename = "BreakDuration", with = "duration_nanos")]
    pub break_time: Duration,
}

impl Phase {
    pub fn new(work: Duration, break_time: Duration) -> Self {
        Self { work, break_time }
    }
}

/// How many work/break cycles each phase runs before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleLimit {
    Unlimited,
    /// Always at least 1.
    Bounded(u32),
}

impl Serialize for CycleLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw: i64 = match self {
            CycleLimit::Unlimited => -1,
            CycleLimit::Bounded(n) => i64::from(*n),
        };
        serializer.serialize_i64(raw)
    }
}

impl<'de> Deserialize<'de> for CycleLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        match raw {
            -1 => Ok(CycleLimit::Unlimited),
            n if n >= 1 => u32::try_from(n)
                .map(CycleLimit::Bounded)
                .map_err(|_| de::Error::custom(format!("cycle limit {n} out of range"))),
            n => Err(de::Error::custom(format!("invalid cycle limit {n}"))),
        }
    }
}

/// Durable projection of a timer: everything but the transient countdown
/// state. One config exists per active timer, at the same list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimerConfig {
    pub name: String,
    pub notif_text: String,
    pub phases: Vec<Phase>,
    pub max_cycles: CycleLimit,
}

/// Durations on the wire are signed nanosecond counts.
mod duration_nanos {
    use super::*;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = i64::try_from(d.as_nanos())
            .map_err(|_| serde::ser::Error::custom("duration too large for the store"))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let nanos = i64::deserialize(deserializer)?;
        let nanos = u64::try_from(nanos)
            .map_err(|_| de::Error::custom(format!("negative duration {nanos}ns")))?;
        Ok(Duration::from_nanos(nanos))
    }
}
