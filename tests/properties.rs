//! Property-based invariant tests for constraint resolution.
//!
//! 1. Movement on a disabled axis is always zero
//! 2. Clamping to an area is idempotent
//! 3. After resolution the element never overlaps the obstacle, wherever it started
//! 4. Push-out direction is deterministic
//! 5. Sub-precision jitter never changes classification or moves the target by more than the jitter
//! 6. Push-out takes the shortest escape, ties going left, right, up, down, and lands flush
//! 7. An element within half a hundredth of an obstacle edge is adjacent, not overlapping

use dragfence::constraint::obstacle::{Placement, Push};
use dragfence::constraint::{area, composer, obstacle, AreaConstraint, Constraint, ObstacleConstraint, ResolveContext};
use dragfence::{Axes, Movement, Rect};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f64> {
    (-500i32..500).prop_map(|v| v as f64)
}

fn extent() -> impl Strategy<Value = f64> {
    (1i32..120).prop_map(|v| v as f64)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (coord(), coord(), extent(), extent())
        .prop_map(|(left, top, width, height)| Rect::new(left, top, left + width, top + height))
}

fn movement_strategy() -> impl Strategy<Value = Movement> {
    (-300i32..300, -300i32..300).prop_map(|(x, y)| Movement::new(x as f64, y as f64))
}

fn axes_strategy() -> impl Strategy<Value = Axes> {
    prop_oneof![Just(Axes::BOTH), Just(Axes::X), Just(Axes::Y)]
}

/// An element and an area at least as large as it that contains it
fn contained_strategy() -> impl Strategy<Value = (Rect, AreaConstraint)> {
    (rect_strategy(), 0i32..200, 0i32..200, 0i32..200, 0i32..200).prop_map(
        |(element, pad_left, pad_top, pad_right, pad_bottom)| {
            let area = AreaConstraint::unbounded()
                .with_left(element.left - pad_left as f64)
                .with_top(element.top - pad_top as f64)
                .with_right(element.right + pad_right as f64)
                .with_bottom(element.bottom + pad_bottom as f64);
            (element, area)
        },
    )
}

/// An element and an obstacle that strictly overlap
fn overlapping_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    (rect_strategy(), 1i32..120, 1i32..120).prop_flat_map(|(obs, width, height)| {
        let x_range = (obs.left as i32 - width + 1)..(obs.right as i32);
        let y_range = (obs.top as i32 - height + 1)..(obs.bottom as i32);
        (x_range, y_range).prop_map(move |(left, top)| {
            let (left, top) = (left as f64, top as f64);
            (Rect::new(left, top, left + width as f64, top + height as f64), obs)
        })
    })
}

/// Any element and obstacle, with overlapping starts well represented
fn pair_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    prop_oneof![(rect_strategy(), rect_strategy()), overlapping_strategy()]
}

/// An obstacle on the hundredths grid and an element whose right edge sits
/// within half a hundredth of the obstacle's left edge, overlapping it vertically
fn flush_left_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    (
        -50_000i64..50_000,
        -50_000i64..50_000,
        1i64..5_000,
        1i64..5_000,
        1i64..5_000,
        1i64..5_000,
    )
        .prop_flat_map(|(left, top, width, height, el_width, el_height)| {
            let offsets = (-el_height + 1)..height;
            (offsets, -0.0049f64..0.0049).prop_map(move |(offset, gap)| {
                let hundredths = |v: i64| v as f64 / 100.0;
                let obstacle = Rect::new(
                    hundredths(left),
                    hundredths(top),
                    hundredths(left + width),
                    hundredths(top + height),
                );
                let right = obstacle.left + gap;
                let element = Rect::new(
                    right - hundredths(el_width),
                    hundredths(top + offset),
                    right,
                    hundredths(top + offset + el_height),
                );
                (element, obstacle)
            })
        })
}

fn strictly_overlaps(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    a.intersection(b).map_or(0.0, |r| r.width() * r.height())
}

/// Shortest escape with ties resolved in the order left, right, up, down
fn shortest_escape(current: &Rect, obstacle: &Rect) -> Push {
    let distances = [
        (Push::Left, current.right - obstacle.left),
        (Push::Right, obstacle.right - current.left),
        (Push::Up, current.bottom - obstacle.top),
        (Push::Down, obstacle.bottom - current.top),
    ];
    let mut best = distances[0];
    for candidate in &distances[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn disabled_axis_never_moves(
        current in rect_strategy(),
        obstacles in prop::collection::vec(rect_strategy(), 0..4),
        requested in movement_strategy(),
        axes in axes_strategy(),
    ) {
        let constraints: Vec<Constraint> = obstacles
            .into_iter()
            .map(|rect| ObstacleConstraint::new(rect).into())
            .collect();
        let resolution = composer::resolve(requested, &constraints, &ResolveContext::new(current, axes));
        if !axes.x {
            prop_assert_eq!(resolution.movement.x, 0.0);
            prop_assert!(resolution.x_source.is_none());
        }
        if !axes.y {
            prop_assert_eq!(resolution.movement.y, 0.0);
            prop_assert!(resolution.y_source.is_none());
        }
    }

    #[test]
    fn area_clamp_is_idempotent(
        (current, bounds) in contained_strategy(),
        requested in movement_strategy(),
    ) {
        let once = area::clamp(&current, requested, Axes::BOTH, &bounds).unwrap_or(requested);
        prop_assert!(area::clamp(&current, once, Axes::BOTH, &bounds).is_none());

        let target = current.translate(once);
        prop_assert!(target.left >= bounds.left.unwrap_or(f64::NEG_INFINITY));
        prop_assert!(target.right <= bounds.right.unwrap_or(f64::INFINITY));
        prop_assert!(target.top >= bounds.top.unwrap_or(f64::NEG_INFINITY));
        prop_assert!(target.bottom <= bounds.bottom.unwrap_or(f64::INFINITY));
    }

    #[test]
    fn resolved_element_never_overlaps_obstacle(
        (current, obstacle_rect) in pair_strategy(),
        requested in movement_strategy(),
        axes in axes_strategy(),
    ) {
        let constraint = ObstacleConstraint::new(obstacle_rect);
        let masked = requested.masked(axes);
        let movement = obstacle::resolve(&current, masked, axes, 2, &constraint).unwrap_or(masked);
        let target = current.translate(movement);

        prop_assert!(overlap_area(&target, &obstacle_rect) <= overlap_area(&current, &obstacle_rect));
        prop_assert!(!strictly_overlaps(&target, &obstacle_rect));
    }

    #[test]
    fn push_out_is_deterministic(
        current in rect_strategy(),
        obstacle_rect in rect_strategy(),
        axes in axes_strategy(),
    ) {
        let first = obstacle::least_resistance(&current, &obstacle_rect, axes);
        let second = obstacle::least_resistance(&current, &obstacle_rect, axes);
        prop_assert_eq!(first, second);

        let constraint = ObstacleConstraint::new(obstacle_rect);
        let a = obstacle::resolve(&current, Movement::zero(), axes, 2, &constraint);
        let b = obstacle::resolve(&current, Movement::zero(), axes, 2, &constraint);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sub_precision_jitter_is_stable(
        current in rect_strategy(),
        obstacle_rect in rect_strategy(),
        requested in movement_strategy(),
        jitter in -0.0004f64..0.0004,
    ) {
        prop_assume!(!strictly_overlaps(&current, &obstacle_rect));
        let jittered = current.translate(Movement::new(jitter, jitter));
        let constraint = ObstacleConstraint::new(obstacle_rect);

        prop_assert_eq!(
            obstacle::classify(&current, &obstacle_rect, 2),
            obstacle::classify(&jittered, &obstacle_rect, 2)
        );

        // the corrected target may only move by the jitter itself
        let plain = obstacle::resolve(&current, requested, Axes::BOTH, 2, &constraint).unwrap_or(requested);
        let shaken = obstacle::resolve(&jittered, requested, Axes::BOTH, 2, &constraint).unwrap_or(requested);
        let a = current.translate(plain);
        let b = jittered.translate(shaken);
        prop_assert!((a.left - b.left).abs() <= 0.001);
        prop_assert!((a.top - b.top).abs() <= 0.001);
    }

    #[test]
    fn push_out_takes_shortest_escape(
        (current, obstacle_rect) in overlapping_strategy(),
    ) {
        prop_assert_eq!(obstacle::classify(&current, &obstacle_rect, 2), Placement::Overlapping);

        let expected = shortest_escape(&current, &obstacle_rect);
        prop_assert_eq!(obstacle::least_resistance(&current, &obstacle_rect, Axes::BOTH), Some(expected));

        let constraint = ObstacleConstraint::new(obstacle_rect);
        let movement = obstacle::resolve(&current, Movement::zero(), Axes::BOTH, 2, &constraint);
        prop_assert!(movement.is_some());
        let movement = movement.unwrap_or_default();
        let target = current.translate(movement);
        match expected {
            Push::Left => { prop_assert_eq!(target.right, obstacle_rect.left); }
            Push::Right => { prop_assert_eq!(target.left, obstacle_rect.right); }
            Push::Up => { prop_assert_eq!(target.bottom, obstacle_rect.top); }
            Push::Down => { prop_assert_eq!(target.top, obstacle_rect.bottom); }
        }
        match expected {
            Push::Left | Push::Right => { prop_assert_eq!(movement.y, 0.0); }
            Push::Up | Push::Down => { prop_assert_eq!(movement.x, 0.0); }
        }
    }

    #[test]
    fn flush_edge_is_adjacent(
        (current, obstacle_rect) in flush_left_strategy(),
        push in 0i32..300,
    ) {
        prop_assert_eq!(obstacle::classify(&current, &obstacle_rect, 2), Placement::Left);

        // pushing into the obstacle leaves the element flush against it
        let constraint = ObstacleConstraint::new(obstacle_rect);
        let requested = Movement::new(push as f64, 0.0);
        let movement = obstacle::resolve(&current, requested, Axes::BOTH, 2, &constraint).unwrap_or(requested);
        let target = current.translate(movement);
        prop_assert!(target.right <= obstacle_rect.left + 1e-9);
        prop_assert!(target.right >= obstacle_rect.left - 0.005);
        prop_assert_eq!(movement.y, 0.0);
    }
}
