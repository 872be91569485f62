use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::{SessionConfiguration, SessionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Focus,
    Break,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus Session",
            Self::Break => "Break Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

/// What a single tick did, so the caller can react to phase changes without
/// diffing states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickOutcome {
    /// The session was not running; nothing changed.
    Idle,
    /// One second elapsed inside the current phase.
    Counted,
    FocusCompleted { block: u8 },
    BreakCompleted { next_block: u8 },
    /// Last phase elapsed; the state is back at its idle starting point.
    SessionCompleted,
}

impl TickOutcome {
    pub fn is_transition(self) -> bool {
        !matches!(self, Self::Idle | Self::Counted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub run_status: RunStatus,
    pub seconds_remaining: u32,
    pub current_block_index: u8,
    pub completed_blocks: BTreeSet<u8>,
}

impl SessionState {
    pub fn start(config: &SessionConfiguration) -> Self {
        Self {
            phase: Phase::Focus,
            run_status: RunStatus::Running,
            seconds_remaining: config.focus_duration_seconds,
            current_block_index: 1,
            completed_blocks: BTreeSet::new(),
        }
    }

    /// The state `start` would produce, but not running.
    pub fn idle(config: &SessionConfiguration) -> Self {
        Self {
            run_status: RunStatus::Idle,
            ..Self::start(config)
        }
    }

    /// Advances the countdown by one second. The final second is consumed by
    /// the transition itself, so `00:00` is never observable.
    pub fn tick(&mut self, config: &SessionConfiguration) -> TickOutcome {
        if self.run_status != RunStatus::Running {
            return TickOutcome::Idle;
        }

        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            return TickOutcome::Counted;
        }

        match (self.phase, config.kind) {
            (Phase::Focus, SessionKind::Pomodoro) => {
                let block = self.current_block_index;
                self.completed_blocks.insert(block);
                self.phase = Phase::Break;
                self.seconds_remaining = config.break_duration_seconds;
                TickOutcome::FocusCompleted { block }
            }
            (Phase::Focus, SessionKind::Custom) => {
                self.quit(config);
                TickOutcome::SessionCompleted
            }
            (Phase::Break, _) => {
                let next_block = self.current_block_index.saturating_add(1);
                if next_block <= config.total_blocks {
                    self.current_block_index = next_block;
                    self.phase = Phase::Focus;
                    self.seconds_remaining = config.focus_duration_seconds;
                    TickOutcome::BreakCompleted { next_block }
                } else {
                    self.quit(config);
                    TickOutcome::SessionCompleted
                }
            }
        }
    }

    /// Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.run_status == RunStatus::Running {
            self.run_status = RunStatus::Paused;
            true
        } else {
            false
        }
    }

    /// Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        if self.run_status == RunStatus::Paused {
            self.run_status = RunStatus::Running;
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self, config: &SessionConfiguration) {
        *self = Self::idle(config);
    }

    pub fn is_running(&self) -> bool {
        self.run_status == RunStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.run_status == RunStatus::Paused
    }

    pub fn is_idle(&self) -> bool {
        self.run_status == RunStatus::Idle
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
