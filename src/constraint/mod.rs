//! Constraint engine: materialize, resolve, diagnose
//!
//! Resolution is split in two phases. [`collector`] asks the host for the
//! geometry of the current sample and produces plain constraint values;
//! [`composer::resolve`] folds those values over a requested movement without
//! touching the host.

pub mod area;
pub mod collector;
pub mod composer;
pub mod config;
pub mod lint;
pub mod obstacle;
pub mod sticky;
pub mod types;

pub use collector::{AreaSource, ConstraintCollector, ConstraintSet};
pub use composer::{resolve, Resolution, ResolveContext};
pub use config::{ConfigError, EngineConfig};
pub use lint::{LintCategory, LintWarning};
pub use types::*;
