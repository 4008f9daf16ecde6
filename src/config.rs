use std::{path::PathBuf, time::Duration};

// Runtime settings (not gameplay tuning).

pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Sleep between ticks; paces the simulation, not wall-clock exact.
    pub tick: Duration,
    /// Fixed RNG seed for reproducible sessions; entropy when absent.
    pub seed: Option<u64>,
    /// Where log records go.  Logging is off without one, since the
    /// terminal itself is owned by the renderer.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tick: TICK_INTERVAL,
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// A zero tick would spin the loop; fall back to the default pace.
    pub fn with_tick_ms(mut self, millis: u64) -> Self {
        self.tick = if millis == 0 {
            TICK_INTERVAL
        } else {
            Duration::from_millis(millis)
        };
        self
    }
}
