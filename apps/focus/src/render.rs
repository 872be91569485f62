use timer::{SessionTimerController, TickOutcome};

pub const HELP: &str = "commands: p = pause/resume, q = quit, s = status, h = help";

pub fn status_line(controller: &SessionTimerController) -> String {
    let state = controller.state();
    let blocks = controller
        .block_statuses()
        .iter()
        .map(|(block, status)| format!("{block}:{}", status.label()))
        .collect::<Vec<_>>()
        .join(" ");
    let paused = if state.is_paused() { " (paused)" } else { "" };
    format!(
        "{:<13} {} {:>3.0}% [{blocks}]{paused}",
        state.phase.label(),
        controller.countdown(),
        controller.progress_percent(),
    )
}

pub fn transition_line(outcome: TickOutcome) -> Option<String> {
    match outcome {
        TickOutcome::Idle | TickOutcome::Counted => None,
        TickOutcome::FocusCompleted { block } => {
            Some(format!("Block {block} done. Break time."))
        }
        TickOutcome::BreakCompleted { next_block } => {
            Some(format!("Break over. Starting block {next_block}."))
        }
        TickOutcome::SessionCompleted => Some("Session complete. Well done!".to_string()),
    }
}
