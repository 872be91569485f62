//! Countdown and phase sequencing for one focus session.
//!
//! The state machine is pure: nothing here owns a clock. A presentation layer
//! calls [`SessionTimerController::tick`] once per wall-clock second while the
//! session is running and renders whatever the state says.

pub mod config;
pub mod controller;
pub mod display;
pub mod state;

pub use config::{ConfigError, DurationPreset, SessionConfiguration, SessionKind};
pub use controller::SessionTimerController;
pub use display::{block_statuses, format_countdown, progress_percent, BlockStatus};
pub use state::{Phase, RunStatus, SessionState, TickOutcome};
