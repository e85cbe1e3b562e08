//! Plain-text rendering of replayed drags

use std::fmt::Write;

use crate::constraint::LintWarning;
use crate::geometry::{Movement, Rect};
use crate::gesture::SampleOutcome;
use crate::scene::{Replay, SceneSample};

fn format_pair(x: f64, y: f64) -> String {
    format!("{:.2},{:.2}", x, y)
}

pub fn format_rect(rect: &Rect) -> String {
    format!(
        "[{:.2} {:.2} {:.2} {:.2}]",
        rect.left, rect.top, rect.right, rect.bottom
    )
}

fn format_movement(movement: &Movement) -> String {
    format_pair(movement.x, movement.y)
}

pub fn format_input(sample: &SceneSample) -> String {
    match sample {
        SceneSample::Pointer(offset) => format!("pointer {}", format_movement(offset)),
        SceneSample::Scroll(offset) => format!("scroll {}", format_pair(offset.x, offset.y)),
        SceneSample::MoveBy(delta) => format!("move_by {}", format_movement(delta)),
    }
}

/// One report line for a replayed sample
///
/// `index` is zero-based; lines are numbered from 1.
pub fn format_sample(index: usize, sample: &SceneSample, outcome: Option<&SampleOutcome>) -> String {
    let input = format_input(sample);
    match outcome {
        None => format!("{:>3} {:<22} -> ignored", index + 1, input),
        Some(outcome) => {
            let resolution = &outcome.resolution;
            format!(
                "{:>3} {:<22} -> {} {} x:{} y:{}",
                index + 1,
                input,
                format_movement(&resolution.movement),
                format_rect(&outcome.rect),
                resolution.x_source.as_deref().unwrap_or("-"),
                resolution.y_source.as_deref().unwrap_or("-"),
            )
        }
    }
}

/// Distinct warnings across every sample, in first-seen order
pub fn distinct_warnings(replay: &Replay) -> Vec<&LintWarning> {
    let mut seen: Vec<&LintWarning> = Vec::new();
    for outcome in replay.steps.iter().filter_map(|s| s.outcome.as_ref()) {
        for warning in &outcome.warnings {
            if !seen.contains(&warning) {
                seen.push(warning);
            }
        }
    }
    seen
}

/// Full report: one line per sample, the released position, then warnings
pub fn format_replay(replay: &Replay) -> String {
    let mut out = String::new();
    for (index, step) in replay.steps.iter().enumerate() {
        let _ = writeln!(out, "{}", format_sample(index, &step.sample, step.outcome.as_ref()));
    }
    let _ = writeln!(
        out,
        "released at {} moved {}",
        format_rect(&replay.released.current),
        format_movement(&replay.released.cumulative)
    );
    for warning in distinct_warnings(replay) {
        let _ = writeln!(out, "warning: {}", warning);
    }
    out
}
