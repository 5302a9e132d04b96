//! Monitoring configuration.

use std::time::Duration;

use crate::alert::Tone;

/// Parameters of the live arrivals view.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Delay between arrival polls (seconds).
    pub tick_interval_secs: u64,

    /// Buses at most this many minutes away are shown as "due soon"
    /// and trigger an alert tone.
    pub due_soon_mins: u32,

    /// Tone played once per due-soon bus per poll.
    pub tone: Tone,
}

impl MonitorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(tick_interval_secs: u64, due_soon_mins: u32, tone: Tone) -> Self {
        Self {
            tick_interval_secs,
            due_soon_mins,
            tone,
        }
    }

    /// Returns the tick interval as a Duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 1,
            due_soon_mins: 5,
            tone: Tone::default(),
        }
    }
}
