//! Play/pause state owned by whoever schedules epochs

use std::fmt;

/// Whether the scheduler should advance the grid on its next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Paused,
    Running,
}

impl Playback {
    pub fn is_running(self) -> bool {
        self == Playback::Running
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Playback::Paused => Playback::Running,
            Playback::Running => Playback::Paused,
        }
    }
}

impl fmt::Display for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Playback::Paused => write!(f, "paused"),
            Playback::Running => write!(f, "running"),
        }
    }
}
