//! Diagnostics for constraint configurations.
//!
//! Runs over the constraints materialized for one sample and reports
//! configurations that cannot behave as intended: inverted or undersized
//! areas, broken obstacle geometry, obstacles that wall off the whole area,
//! and obstacles that overlap each other. Findings never block a drag.

use std::fmt;

use tracing::warn;

use crate::geometry::Size;

use super::types::{AreaConstraint, Constraint, ObstacleConstraint};

/// A diagnostic about a constraint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of configuration defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    InvertedArea,
    AreaTooSmall,
    InvalidObstacle,
    BlockingObstacle,
    ObstacleOverlap,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::InvertedArea => write!(f, "inverted-area"),
            LintCategory::AreaTooSmall => write!(f, "area-too-small"),
            LintCategory::InvalidObstacle => write!(f, "invalid-obstacle"),
            LintCategory::BlockingObstacle => write!(f, "blocking-obstacle"),
            LintCategory::ObstacleOverlap => write!(f, "obstacle-overlap"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all checks against the constraints of one sample.
pub fn check(constraints: &[Constraint], element: Size) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    let areas: Vec<&AreaConstraint> = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::Area(area) => Some(area),
            Constraint::Obstacle(_) => None,
        })
        .collect();
    let obstacles: Vec<&ObstacleConstraint> = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::Obstacle(obstacle) => Some(obstacle),
            Constraint::Area(_) => None,
        })
        .collect();

    for area in &areas {
        check_area(area, element, &mut warnings);
    }
    for obstacle in &obstacles {
        check_obstacle_geometry(obstacle, &mut warnings);
        for area in &areas {
            check_blocking(obstacle, area, &mut warnings);
        }
    }
    check_overlaps(&obstacles, &mut warnings);

    warnings
}

/// Log every warning through `tracing`
pub fn report(warnings: &[LintWarning]) {
    for warning in warnings {
        warn!(category = %warning.category, "{}", warning.message);
    }
}

// ── Areas ─────────────────────────────────────────────────────────

fn check_area(area: &AreaConstraint, element: Size, warnings: &mut Vec<LintWarning>) {
    if let (Some(left), Some(right)) = (area.left, area.right) {
        if left > right {
            warnings.push(LintWarning {
                category: LintCategory::InvertedArea,
                message: format!(
                    "area {} has left bound {:.2} past right bound {:.2}",
                    area.source, left, right
                ),
            });
        } else if right - left < element.width {
            warnings.push(LintWarning {
                category: LintCategory::AreaTooSmall,
                message: format!(
                    "area {} is {:.2}px wide but the element needs {:.2}px",
                    area.source,
                    right - left,
                    element.width
                ),
            });
        }
    }

    if let (Some(top), Some(bottom)) = (area.top, area.bottom) {
        if top > bottom {
            warnings.push(LintWarning {
                category: LintCategory::InvertedArea,
                message: format!(
                    "area {} has top bound {:.2} past bottom bound {:.2}",
                    area.source, top, bottom
                ),
            });
        } else if bottom - top < element.height {
            warnings.push(LintWarning {
                category: LintCategory::AreaTooSmall,
                message: format!(
                    "area {} is {:.2}px tall but the element needs {:.2}px",
                    area.source,
                    bottom - top,
                    element.height
                ),
            });
        }
    }
}

// ── Obstacles ─────────────────────────────────────────────────────

fn check_obstacle_geometry(obstacle: &ObstacleConstraint, warnings: &mut Vec<LintWarning>) {
    let rect = &obstacle.rect;
    let problem = if !rect.is_finite() {
        Some("has unresolved (non-finite) geometry")
    } else if !rect.is_valid() {
        Some("has inverted edges")
    } else if !rect.has_area() {
        Some("has zero area and will be ignored")
    } else {
        None
    };

    if let Some(problem) = problem {
        warnings.push(LintWarning {
            category: LintCategory::InvalidObstacle,
            message: format!("obstacle {} {}", obstacle.source, problem),
        });
    }
}

fn check_blocking(
    obstacle: &ObstacleConstraint,
    area: &AreaConstraint,
    warnings: &mut Vec<LintWarning>,
) {
    let rect = &obstacle.rect;
    if !rect.has_area() {
        return;
    }

    // an unbounded side can never be covered
    let covers_x = matches!(
        (area.left, area.right),
        (Some(l), Some(r)) if rect.width() >= r - l
    );
    let covers_y = matches!(
        (area.top, area.bottom),
        (Some(t), Some(b)) if rect.height() >= b - t
    );

    if covers_x && covers_y {
        warnings.push(LintWarning {
            category: LintCategory::BlockingObstacle,
            message: format!(
                "obstacle {} is at least as large as area {} and blocks it entirely",
                obstacle.source, area.source
            ),
        });
    }
}

fn check_overlaps(obstacles: &[&ObstacleConstraint], warnings: &mut Vec<LintWarning>) {
    for i in 0..obstacles.len() {
        for j in (i + 1)..obstacles.len() {
            let a = obstacles[i];
            let b = obstacles[j];
            // a stuck obstacle slides over the content beneath it
            if !a.rect.has_area() || !b.rect.has_area() || a.is_sticky || b.is_sticky {
                continue;
            }
            if let Some(overlap) = a.rect.intersection(&b.rect) {
                warnings.push(LintWarning {
                    category: LintCategory::ObstacleOverlap,
                    message: format!(
                        "obstacles {} and {} overlap by {:.2}x{:.2}px",
                        a.source,
                        b.source,
                        overlap.width(),
                        overlap.height()
                    ),
                });
            }
        }
    }
}
