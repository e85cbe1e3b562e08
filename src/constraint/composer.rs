//! Sequential composition of a constraint list over one requested movement

use tracing::trace;

use crate::geometry::{Axes, Movement, Rect};

use super::area;
use super::obstacle;
use super::types::Constraint;

/// Everything the composer needs besides the constraints themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    /// Element rectangle before the movement is applied
    pub current: Rect,
    /// Axes the gesture may move along
    pub axes: Axes,
    /// Decimal places used for resolver comparisons
    pub precision: u32,
}

impl ResolveContext {
    pub fn new(current: Rect, axes: Axes) -> Self {
        Self {
            current,
            axes,
            precision: 2,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

/// Outcome of folding the constraint list
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Movement as requested, masked to the enabled axes
    pub requested: Movement,
    /// Movement after every constraint has been applied
    pub movement: Movement,
    /// Name of the constraint that last changed the X component
    pub x_source: Option<String>,
    /// Name of the constraint that last changed the Y component
    pub y_source: Option<String>,
}

impl Resolution {
    /// Rectangle the element occupies once the corrected movement is applied
    pub fn target(&self, current: &Rect) -> Rect {
        current.translate(self.movement)
    }

    pub fn is_corrected(&self) -> bool {
        self.x_source.is_some() || self.y_source.is_some()
    }
}

/// Apply `constraints` in order to `requested`
///
/// Each constraint sees the movement as corrected by the constraints before
/// it, never the original request. Obstacles are therefore resolved one at a
/// time: a correction made for one obstacle can push the element into a later
/// one that was already evaluated. That ordering is part of the contract.
pub fn resolve(requested: Movement, constraints: &[Constraint], ctx: &ResolveContext) -> Resolution {
    let requested = requested.masked(ctx.axes);
    let mut movement = requested;
    let mut x_source = None;
    let mut y_source = None;

    for constraint in constraints {
        let corrected = match constraint {
            Constraint::Area(bounds) => area::clamp(&ctx.current, movement, ctx.axes, bounds),
            Constraint::Obstacle(obs) => {
                obstacle::resolve(&ctx.current, movement, ctx.axes, ctx.precision, obs)
            }
        };
        let Some(corrected) = corrected else {
            continue;
        };
        let corrected = corrected.masked(ctx.axes);

        let name = &constraint.source().name;
        if corrected.x != movement.x {
            trace!(constraint = %name, from = movement.x, to = corrected.x, "x corrected");
            x_source = Some(name.clone());
        }
        if corrected.y != movement.y {
            trace!(constraint = %name, from = movement.y, to = corrected.y, "y corrected");
            y_source = Some(name.clone());
        }
        movement = corrected;
    }

    Resolution {
        requested,
        movement,
        x_source,
        y_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::types::{AreaConstraint, ObstacleConstraint};

    fn ctx() -> ResolveContext {
        ResolveContext::new(Rect::new(0.0, 0.0, 10.0, 10.0), Axes::BOTH)
    }

    #[test]
    fn test_no_constraints_passes_through() {
        let resolution = resolve(Movement::new(3.0, 4.0), &[], &ctx());
        assert_eq!(resolution.movement, Movement::new(3.0, 4.0));
        assert!(!resolution.is_corrected());
    }

    #[test]
    fn test_records_last_source_per_axis() {
        let constraints = vec![
            AreaConstraint::unbounded()
                .with_right(100.0)
                .with_bottom(30.0)
                .named("viewport")
                .into(),
            ObstacleConstraint::new(Rect::new(50.0, 0.0, 60.0, 10.0))
                .named("sidebar")
                .into(),
        ];
        let resolution = resolve(Movement::new(200.0, 200.0), &constraints, &ctx());

        // capped at y=20 the element runs below the sidebar, so only the area applies
        assert_eq!(resolution.movement, Movement::new(90.0, 20.0));
        assert_eq!(resolution.x_source.as_deref(), Some("viewport"));
        assert_eq!(resolution.y_source.as_deref(), Some("viewport"));
    }

    #[test]
    fn test_obstacle_after_area() {
        let constraints = vec![
            AreaConstraint::unbounded().with_right(100.0).named("viewport").into(),
            ObstacleConstraint::new(Rect::new(50.0, 0.0, 60.0, 10.0))
                .named("sidebar")
                .into(),
        ];
        let resolution = resolve(Movement::new(200.0, 0.0), &constraints, &ctx());
        assert_eq!(resolution.movement, Movement::new(40.0, 0.0));
        assert_eq!(resolution.x_source.as_deref(), Some("sidebar"));
        assert_eq!(resolution.y_source, None);
    }

    #[test]
    fn test_disabled_axis_is_masked() {
        let ctx = ResolveContext::new(Rect::new(0.0, 0.0, 10.0, 10.0), Axes::X);
        let resolution = resolve(Movement::new(5.0, 50.0), &[], &ctx);
        assert_eq!(resolution.requested, Movement::new(5.0, 0.0));
        assert_eq!(resolution.movement, Movement::new(5.0, 0.0));
    }

    #[test]
    fn test_sequential_order_matters() {
        // pushed right out of `wide`, the element lands inside `narrow`
        let ctx = ResolveContext::new(Rect::new(12.0, 0.0, 22.0, 10.0), Axes::BOTH);
        let wide = ObstacleConstraint::new(Rect::new(0.0, -50.0, 24.0, 50.0)).named("wide");
        let narrow = ObstacleConstraint::new(Rect::new(26.0, 0.0, 40.0, 10.0)).named("narrow");

        let narrow_first = resolve(
            Movement::zero(),
            &[narrow.clone().into(), wide.clone().into()],
            &ctx,
        );
        assert_eq!(narrow_first.movement, Movement::new(12.0, 0.0));
        assert_eq!(narrow_first.x_source.as_deref(), Some("wide"));

        let wide_first = resolve(Movement::zero(), &[wide.into(), narrow.into()], &ctx);
        assert_eq!(wide_first.movement, Movement::new(4.0, 0.0));
        assert_eq!(wide_first.x_source.as_deref(), Some("narrow"));
    }
}
