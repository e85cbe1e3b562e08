//! Collision resolution between the dragged element and one obstacle
//!
//! Resolution has two regimes. When the element currently sits clear of the
//! obstacle on some side, the move is clamped on that side only if the move
//! would also line the element up with the obstacle on the other axis. When
//! the element already overlaps the obstacle, it is pushed out along the
//! single direction that needs the smallest displacement.
//!
//! Classification uses coordinates rounded to the configured precision, so
//! an element resting flush against an obstacle after sub-pixel layout math
//! still counts as adjacent rather than overlapping.

use crate::geometry::{round_to, Axes, Movement, Rect};

use super::types::ObstacleConstraint;

/// Where the element sits relative to an obstacle before moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Left,
    Right,
    Above,
    Below,
    /// No side is clear: the rectangles already overlap
    Overlapping,
}

/// Escape direction chosen for an overlapping element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    Left,
    Right,
    Up,
    Down,
}

/// Classify `current` against `obstacle`, first clear side wins
///
/// Precedence is left, right, above, below; an element diagonally off a
/// corner is therefore handled as left or right of the obstacle.
pub fn classify(current: &Rect, obstacle: &Rect, precision: u32) -> Placement {
    let cur = current.rounded(precision);
    let obs = obstacle.rounded(precision);

    if cur.right <= obs.left {
        Placement::Left
    } else if cur.left >= obs.right {
        Placement::Right
    } else if cur.bottom <= obs.top {
        Placement::Above
    } else if cur.top >= obs.bottom {
        Placement::Below
    } else {
        Placement::Overlapping
    }
}

/// Pick the cheapest escape for an overlapping element
///
/// Distances are measured from the current, unrounded position. Ties go to
/// left, then right, then up, then down. Only directions on enabled axes
/// compete; `None` means no enabled axis can resolve the overlap.
pub fn least_resistance(current: &Rect, obstacle: &Rect, axes: Axes) -> Option<Push> {
    let mut candidates = Vec::with_capacity(4);
    if axes.x {
        candidates.push((Push::Left, current.right - obstacle.left));
        candidates.push((Push::Right, obstacle.right - current.left));
    }
    if axes.y {
        candidates.push((Push::Up, current.bottom - obstacle.top));
        candidates.push((Push::Down, obstacle.bottom - current.top));
    }

    let mut best: Option<(Push, f64)> = None;
    for (push, distance) in candidates {
        match best {
            Some((_, shortest)) if distance >= shortest => {}
            _ => best = Some((push, distance)),
        }
    }
    best.map(|(push, _)| push)
}

/// Correct `movement` so the element does not enter `obstacle`
///
/// `current` is the element's rectangle before this movement is applied.
/// Returns `None` when the movement needs no correction, including when the
/// obstacle geometry is degenerate (non-finite or without area).
pub fn resolve(
    current: &Rect,
    movement: Movement,
    axes: Axes,
    precision: u32,
    obstacle: &ObstacleConstraint,
) -> Option<Movement> {
    let obs = &obstacle.rect;
    if !obs.has_area() || !current.is_finite() || !movement.is_finite() {
        return None;
    }

    let proposed = current.translate(movement);
    let width = current.width();
    let height = current.height();
    let mut corrected = movement;

    match classify(current, obs, precision) {
        Placement::Left => {
            if axes.x && overlaps_vertically(&proposed, obs, precision) {
                corrected.x = movement.x.min(obs.left - width - current.left);
            }
        }
        Placement::Right => {
            if axes.x && overlaps_vertically(&proposed, obs, precision) {
                corrected.x = movement.x.max(obs.right - current.left);
            }
        }
        Placement::Above => {
            if axes.y && overlaps_horizontally(&proposed, obs, precision) {
                corrected.y = movement.y.min(obs.top - height - current.top);
            }
        }
        Placement::Below => {
            if axes.y && overlaps_horizontally(&proposed, obs, precision) {
                corrected.y = movement.y.max(obs.bottom - current.top);
            }
        }
        Placement::Overlapping => match least_resistance(current, obs, axes)? {
            Push::Left => corrected.x = movement.x.min(obs.left - width - current.left),
            Push::Right => corrected.x = movement.x.max(obs.right - current.left),
            Push::Up => corrected.y = movement.y.min(obs.top - height - current.top),
            Push::Down => corrected.y = movement.y.max(obs.bottom - current.top),
        },
    }

    if corrected == movement {
        None
    } else {
        Some(corrected)
    }
}

fn overlaps_vertically(proposed: &Rect, obstacle: &Rect, precision: u32) -> bool {
    round_to(proposed.top, precision) < round_to(obstacle.bottom, precision)
        && round_to(proposed.bottom, precision) > round_to(obstacle.top, precision)
}

fn overlaps_horizontally(proposed: &Rect, obstacle: &Rect, precision: u32) -> bool {
    round_to(proposed.left, precision) < round_to(obstacle.right, precision)
        && round_to(proposed.right, precision) > round_to(obstacle.left, precision)
}
