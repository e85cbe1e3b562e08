//! Sticky frontiers: live bounds that shrink the movable area as content scrolls

use tracing::warn;

use crate::geometry::Axes;

use super::types::{AreaConstraint, Side, StickyFrontier};

/// Marker name filter: unnamed markers apply to every gesture
pub fn marker_applies(marker_name: Option<&str>, gesture_name: Option<&str>) -> bool {
    match marker_name {
        None => true,
        Some(name) => gesture_name == Some(name),
    }
}

/// Tighten `base` with every frontier on an enabled axis
///
/// A left or top frontier only applies when it lies further in than the
/// current bound; right and bottom frontiers mirror that. A frontier that
/// would leave the area inverted is reported and skipped.
pub fn apply_frontiers(
    base: &AreaConstraint,
    frontiers: &[StickyFrontier],
    axes: Axes,
) -> AreaConstraint {
    let mut area = base.clone();

    for frontier in frontiers {
        let enabled = if frontier.side.is_horizontal() {
            axes.x
        } else {
            axes.y
        };
        if !enabled || !frontier.bound.is_finite() {
            continue;
        }
        if !tightens(&area, frontier) {
            continue;
        }

        if let Some(opposite) = area.bound(opposite_side(frontier.side)) {
            if inverts(frontier.side, frontier.bound, opposite) {
                warn!(
                    frontier = %frontier.source,
                    side = %frontier.side,
                    bound = frontier.bound,
                    opposite,
                    "sticky frontier would invert the movable area; ignoring it"
                );
                continue;
            }
        }

        area.set_bound(frontier.side, frontier.bound);
    }

    area
}

fn tightens(area: &AreaConstraint, frontier: &StickyFrontier) -> bool {
    match (frontier.side, area.bound(frontier.side)) {
        (_, None) => true,
        (Side::Left | Side::Top, Some(current)) => frontier.bound > current,
        (Side::Right | Side::Bottom, Some(current)) => frontier.bound < current,
    }
}

fn inverts(side: Side, bound: f64, opposite: f64) -> bool {
    match side {
        Side::Left | Side::Top => bound > opposite,
        Side::Right | Side::Bottom => bound < opposite,
    }
}

fn opposite_side(side: Side) -> Side {
    match side {
        Side::Left => Side::Right,
        Side::Right => Side::Left,
        Side::Top => Side::Bottom,
        Side::Bottom => Side::Top,
    }
}
