//! Clamping a proposed movement to an area constraint

use crate::geometry::{Axes, Movement, Rect};

use super::types::AreaConstraint;

/// Clamp `movement` so that `current` translated by it stays inside `area`
///
/// Returns `None` when the proposal already satisfies every present bound.
/// When an area is narrower than the element the left/top bound wins, which
/// keeps the element pinned to the start side instead of oscillating.
pub fn clamp(
    current: &Rect,
    movement: Movement,
    axes: Axes,
    area: &AreaConstraint,
) -> Option<Movement> {
    if !current.is_finite() || !movement.is_finite() {
        return None;
    }

    let mut corrected = movement;
    if axes.x {
        corrected.x = clamp_axis(
            current.left,
            current.width(),
            movement.x,
            area.left,
            area.right,
        );
    }
    if axes.y {
        corrected.y = clamp_axis(
            current.top,
            current.height(),
            movement.y,
            area.top,
            area.bottom,
        );
    }

    if corrected == movement {
        None
    } else {
        Some(corrected)
    }
}

fn clamp_axis(start: f64, extent: f64, delta: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut delta = delta;
    if let Some(max) = max.filter(|v| v.is_finite()) {
        let limit = max - extent - start;
        if delta > limit {
            delta = limit;
        }
    }
    if let Some(min) = min.filter(|v| v.is_finite()) {
        let limit = min - start;
        if delta < limit {
            delta = limit;
        }
    }
    delta
}
