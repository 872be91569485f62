use serde::{Deserialize, Serialize};

use crate::{config::SessionConfiguration, state::SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Active,
    Done,
    Pending,
}

impl BlockStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Done => "Done",
            Self::Pending => "Pending",
        }
    }
}

/// `MM:SS`, minutes zero padded but not wrapped at an hour.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed share of the current phase in `0.0..=100.0`.
pub fn progress_percent(state: &SessionState, config: &SessionConfiguration) -> f64 {
    let total = config.phase_duration(state.phase);
    if total == 0 {
        return 100.0;
    }
    let elapsed = total.saturating_sub(state.seconds_remaining);
    (f64::from(elapsed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
}

/// One entry per configured block. The current block reads as active even
/// when its focus phase is already done.
pub fn block_statuses(state: &SessionState, config: &SessionConfiguration) -> Vec<(u8, BlockStatus)> {
    (1..=config.total_blocks)
        .map(|block| {
            let status = if block == state.current_block_index {
                BlockStatus::Active
            } else if state.completed_blocks.contains(&block) {
                BlockStatus::Done
            } else {
                BlockStatus::Pending
            };
            (block, status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SessionKind, state::Phase};

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(1), "00:01");
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(59 * 60 + 59), "59:59");
        assert_eq!(format_countdown(7200), "120:00");
    }

    #[test]
    fn progress_tracks_elapsed_share_of_phase() {
        let config = SessionConfiguration::new(SessionKind::Pomodoro, 100, 10, 1);
        let mut state = SessionState::start(&config);
        assert_eq!(progress_percent(&state, &config), 0.0);
        state.seconds_remaining = 25;
        assert_eq!(progress_percent(&state, &config), 75.0);
        state.phase = Phase::Break;
        state.seconds_remaining = 5;
        assert_eq!(progress_percent(&state, &config), 50.0);
    }

    #[test]
    fn zero_length_phase_reports_complete() {
        let config = SessionConfiguration::new(SessionKind::Pomodoro, 0, 10, 1);
        let state = SessionState::start(&config);
        assert_eq!(progress_percent(&state, &config), 100.0);
    }

    #[test]
    fn block_statuses_prefer_active_over_done() {
        let config = SessionConfiguration::new(SessionKind::Pomodoro, 60, 10, 3);
        let mut state = SessionState::start(&config);
        state.completed_blocks.insert(1);
        state.current_block_index = 2;
        assert_eq!(
            block_statuses(&state, &config),
            vec![
                (1, BlockStatus::Done),
                (2, BlockStatus::Active),
                (3, BlockStatus::Pending),
            ]
        );

        state.completed_blocks.insert(2);
        assert_eq!(block_statuses(&state, &config)[1].1, BlockStatus::Active);
    }
}
