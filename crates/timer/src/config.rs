use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::Phase;

pub const MIN_BLOCKS: u8 = 1;
pub const MAX_BLOCKS: u8 = 8;
pub const DEFAULT_BLOCKS: u8 = 4;

pub const CUSTOM_MIN_MINUTES: u32 = 25;
pub const CUSTOM_MAX_MINUTES: u32 = 120;
pub const CUSTOM_DEFAULT_MINUTES: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Pomodoro,
    Custom,
}

/// Named Pomodoro lengths offered by the session picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationPreset {
    /// 25 minutes focus, 5 minutes break.
    Short,
    /// 50 minutes focus, 10 minutes break.
    #[default]
    Long,
}

impl DurationPreset {
    pub fn focus_minutes(self) -> u32 {
        match self {
            Self::Short => 25,
            Self::Long => 50,
        }
    }

    pub fn break_minutes(self) -> u32 {
        match self {
            Self::Short => 5,
            Self::Long => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "25min",
            Self::Long => "50min",
        }
    }

    /// Lenient lookup: anything [`FromStr`] rejects falls back to the long
    /// preset.
    pub fn from_label(label: &str) -> Self {
        label.parse::<Self>().unwrap_or_default()
    }
}

impl FromStr for DurationPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "25min" | "25" | "short" => Ok(Self::Short),
            "50min" | "50" | "long" => Ok(Self::Long),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("focus duration must be positive")]
    ZeroFocusDuration,
    #[error("pomodoro sessions need a positive break duration")]
    ZeroBreakDuration,
    #[error("block count {0} is outside 1..=8")]
    BlocksOutOfRange(u8),
    #[error("custom sessions have no break, got {0} seconds")]
    CustomWithBreak(u32),
    #[error("custom sessions run a single block, got {0}")]
    CustomWithMultipleBlocks(u8),
    #[error("unknown duration preset '{0}', expected 25min or 50min")]
    UnknownPreset(String),
}

/// Immutable parameters of one session, fixed when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    pub kind: SessionKind,
    pub focus_duration_seconds: u32,
    pub break_duration_seconds: u32,
    pub total_blocks: u8,
}

impl SessionConfiguration {
    /// Raw constructor. Nothing is clamped or checked; see [`Self::validate`].
    pub fn new(
        kind: SessionKind,
        focus_duration_seconds: u32,
        break_duration_seconds: u32,
        total_blocks: u8,
    ) -> Self {
        Self {
            kind,
            focus_duration_seconds,
            break_duration_seconds,
            total_blocks,
        }
    }

    pub fn pomodoro(preset: DurationPreset, requested_blocks: i64) -> Self {
        Self::new(
            SessionKind::Pomodoro,
            preset.focus_minutes() * 60,
            preset.break_minutes() * 60,
            clamp_blocks(requested_blocks),
        )
    }

    pub fn custom(focus_minutes: u32) -> Self {
        let minutes = focus_minutes.clamp(CUSTOM_MIN_MINUTES, CUSTOM_MAX_MINUTES);
        Self::new(SessionKind::Custom, minutes * 60, 0, 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.focus_duration_seconds == 0 {
            return Err(ConfigError::ZeroFocusDuration);
        }
        if !(MIN_BLOCKS..=MAX_BLOCKS).contains(&self.total_blocks) {
            return Err(ConfigError::BlocksOutOfRange(self.total_blocks));
        }
        match self.kind {
            SessionKind::Pomodoro if self.break_duration_seconds == 0 => {
                Err(ConfigError::ZeroBreakDuration)
            }
            SessionKind::Custom if self.break_duration_seconds != 0 => {
                Err(ConfigError::CustomWithBreak(self.break_duration_seconds))
            }
            SessionKind::Custom if self.total_blocks != 1 => {
                Err(ConfigError::CustomWithMultipleBlocks(self.total_blocks))
            }
            _ => Ok(()),
        }
    }

    pub fn phase_duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_duration_seconds,
            Phase::Break => self.break_duration_seconds,
        }
    }

    pub fn has_breaks(&self) -> bool {
        self.kind == SessionKind::Pomodoro
    }

    /// Wall-clock length of the whole session when it runs uninterrupted.
    pub fn total_seconds(&self) -> u64 {
        let per_block = u64::from(self.focus_duration_seconds)
            + if self.has_breaks() {
                u64::from(self.break_duration_seconds)
            } else {
                0
            };
        per_block * u64::from(self.total_blocks)
    }
}

pub fn clamp_blocks(requested: i64) -> u8 {
    requested.clamp(i64::from(MIN_BLOCKS), i64::from(MAX_BLOCKS)) as u8
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
