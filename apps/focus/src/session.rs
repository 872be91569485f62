use std::{io::Write, time::Duration};

use anyhow::Result;
use timer::{SessionConfiguration, SessionState, SessionTimerController, TickOutcome};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::render::{status_line, transition_line, HELP};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Quit,
    InputClosed,
}

#[derive(Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub final_state: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    TogglePause,
    Quit,
    Status,
    Help,
    Confirm,
    Deny,
    Nothing,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "p" | "pause" | "r" | "resume" => Command::TogglePause,
        "q" | "quit" => Command::Quit,
        "s" | "status" => Command::Status,
        "h" | "help" | "?" => Command::Help,
        "y" | "yes" => Command::Confirm,
        "n" | "no" => Command::Deny,
        _ => Command::Unknown,
    }
}

pub struct SessionOptions {
    pub tick_period: Duration,
    /// Print the countdown every N seconds; transitions always print.
    pub render_every: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            render_every: 60,
        }
    }
}

/// Drives one session: ticks once per period while running and applies
/// line-based commands from `input`. Returns when the session completes, the
/// user confirms a quit, or `input` reaches EOF.
pub async fn run_session<R, W>(
    config: SessionConfiguration,
    input: R,
    out: &mut W,
    options: SessionOptions,
) -> Result<SessionReport>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = SessionTimerController::start(config);
    let mut lines = input.lines();
    let mut ticker = interval_at(Instant::now() + options.tick_period, options.tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let render_every = options.render_every.max(1);
    let mut confirming_quit = false;

    writeln!(out, "{HELP}")?;
    writeln!(out, "{}", status_line(&controller))?;

    let end = loop {
        tokio::select! {
            _ = ticker.tick(), if controller.state().is_running() => {
                let outcome = controller.tick();
                if let Some(message) = transition_line(outcome) {
                    writeln!(out, "{message}")?;
                }
                if outcome == TickOutcome::SessionCompleted {
                    break SessionEnd::Completed;
                }
                if outcome.is_transition()
                    || controller.state().seconds_remaining % render_every == 0
                {
                    writeln!(out, "{}", status_line(&controller))?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("session input closed");
                    break SessionEnd::InputClosed;
                };
                let command = parse_command(&line);

                if confirming_quit {
                    confirming_quit = false;
                    if command == Command::Confirm {
                        controller.quit();
                        writeln!(out, "Session ended.")?;
                        break SessionEnd::Quit;
                    }
                    writeln!(out, "Continuing session.")?;
                    continue;
                }

                match command {
                    Command::TogglePause => {
                        let was_paused = controller.state().is_paused();
                        controller.toggle_pause();
                        if was_paused {
                            // Re-arm so the first second after resuming is a full one.
                            ticker.reset();
                        }
                        writeln!(out, "{}", status_line(&controller))?;
                    }
                    Command::Quit => {
                        confirming_quit = true;
                        writeln!(
                            out,
                            "End session? Progress for this block will be lost. [y/N]"
                        )?;
                    }
                    Command::Status => writeln!(out, "{}", status_line(&controller))?,
                    Command::Nothing => {}
                    Command::Help | Command::Confirm | Command::Deny | Command::Unknown => {
                        writeln!(out, "{HELP}")?
                    }
                }
            }
        }
        out.flush()?;
    };

    out.flush()?;
    Ok(SessionReport {
        end,
        final_state: controller.state().clone(),
    })
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
