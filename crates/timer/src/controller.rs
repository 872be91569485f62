use tracing::{debug, info};

use crate::{
    config::SessionConfiguration,
    display::{block_statuses, format_countdown, progress_percent, BlockStatus},
    state::{RunStatus, SessionState, TickOutcome},
};

/// Owns the configuration and state of one session visit. Dropping the
/// controller discards the session; nothing is persisted.
#[derive(Debug, Clone)]
pub struct SessionTimerController {
    config: SessionConfiguration,
    state: SessionState,
}

impl SessionTimerController {
    pub fn start(config: SessionConfiguration) -> Self {
        info!(
            kind = ?config.kind,
            focus_seconds = config.focus_duration_seconds,
            break_seconds = config.break_duration_seconds,
            total_blocks = config.total_blocks,
            "focus session started"
        );
        Self {
            state: SessionState::start(&config),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn run_status(&self) -> RunStatus {
        self.state.run_status
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.tick(&self.config);
        match outcome {
            TickOutcome::Idle | TickOutcome::Counted => {}
            TickOutcome::FocusCompleted { block } => {
                info!(block, completed = self.state.completed_blocks.len(), "focus block completed");
            }
            TickOutcome::BreakCompleted { next_block } => {
                info!(next_block, "break over, next focus block");
            }
            TickOutcome::SessionCompleted => {
                info!(total_blocks = self.config.total_blocks, "focus session completed");
            }
        }
        outcome
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.state.pause();
        if changed {
            debug!(seconds_remaining = self.state.seconds_remaining, "session paused");
        }
        changed
    }

    pub fn resume(&mut self) -> bool {
        let changed = self.state.resume();
        if changed {
            debug!(seconds_remaining = self.state.seconds_remaining, "session resumed");
        }
        changed
    }

    /// Pause when running, resume when paused. Idle sessions stay idle.
    pub fn toggle_pause(&mut self) -> RunStatus {
        match self.state.run_status {
            RunStatus::Running => {
                self.pause();
            }
            RunStatus::Paused => {
                self.resume();
            }
            RunStatus::Idle => {}
        }
        self.state.run_status
    }

    pub fn quit(&mut self) {
        info!(
            block = self.state.current_block_index,
            seconds_remaining = self.state.seconds_remaining,
            "focus session quit"
        );
        self.state.quit(&self.config);
    }

    pub fn countdown(&self) -> String {
        format_countdown(self.state.seconds_remaining)
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(&self.state, &self.config)
    }

    pub fn block_statuses(&self) -> Vec<(u8, BlockStatus)> {
        block_statuses(&self.state, &self.config)
    }
}
