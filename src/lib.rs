//! Dragfence - a constraint engine for dragging elements inside scroll surfaces
//!
//! A drag is constrained by an allowed area, by obstacles the element may
//! not enter, and by sticky frontiers that shrink the area while pinned
//! headers or sidebars are stuck. Geometry comes from a [`Host`]; the engine
//! only decides how far the element may actually move.
//!
//! # Example
//!
//! ```rust
//! use dragfence::{replay_str, EngineConfig};
//!
//! let report = replay_str(r#"
//!     [surface]
//!     document = true
//!     viewport = [0.0, 0.0, 400.0, 300.0]
//!     size = [400.0, 300.0]
//!
//!     [element]
//!     id = "card"
//!     rect = [0.0, 0.0, 10.0, 10.0]
//!
//!     [[elements]]
//!     id = "wall"
//!     rect = [30.0, 0.0, 40.0, 10.0]
//!     marker = "obstacle"
//!
//!     [[samples]]
//!     pointer = [50.0, 0.0]
//! "#, EngineConfig::default()).unwrap();
//!
//! assert!(report.contains("x:wall"));
//! ```

pub mod constraint;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod report;
pub mod scene;

pub use constraint::{
    AreaConstraint, AreaSource, Constraint, ConstraintSet, ConfigError, EngineConfig,
    LintWarning, ObstacleConstraint, Resolution, ResolveContext, Side, StickyFrontier,
};
pub use error::DragError;
pub use geometry::{Axes, Movement, Point, Positioning, Rect, ScrollContainer};
pub use gesture::{Gesture, GestureSpec, GestureState, SampleOutcome, ScrollGuard};
pub use host::{
    Boundary, ElementGeometry, ElementId, Host, MarkedElement, MarkerKind, RecordingSink,
    ScrollState, VisualizationSink,
};
pub use scene::{Replay, Scene, SceneError};

use thiserror::Error;

/// Errors that can occur while replaying a scene
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The scene could not be loaded
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// The gesture could not start
    #[error("drag error: {0}")]
    Drag(#[from] DragError),
}

/// Replay a TOML scene and return the text report
pub fn replay_str(source: &str, config: EngineConfig) -> Result<String, ReplayError> {
    let scene = Scene::from_str(source)?;
    let replay = scene.replay(config)?;
    Ok(report::format_replay(&replay))
}
