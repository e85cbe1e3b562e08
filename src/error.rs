//! Error types for gesture setup

use thiserror::Error;

use crate::host::ElementId;

/// Precondition violations that prevent a gesture from starting
#[derive(Debug, Error, PartialEq)]
pub enum DragError {
    /// The host has no position for an element
    #[error("element '{element}' has no defined position")]
    MissingGeometry { element: ElementId },

    /// The host returned geometry that is not a finite rectangle
    #[error("element '{element}' has unresolved geometry")]
    UnresolvedGeometry { element: ElementId },

    /// The scroll surface did not report a scroll state
    #[error("scroll surface '{surface}' has no scroll state")]
    MissingScrollState { surface: ElementId },

    /// The positioning of the dragged element cannot be tracked in scroll-relative space
    #[error("unsupported positioning for '{element}': {reason}")]
    UnsupportedPositioning { element: ElementId, reason: String },

    /// The gesture does not allow movement on any axis
    #[error("gesture allows no movement on either axis")]
    NoDraggableAxis,
}

impl DragError {
    /// Create a missing geometry error
    pub fn missing_geometry(element: &ElementId) -> Self {
        Self::MissingGeometry {
            element: element.clone(),
        }
    }

    /// Create an unresolved geometry error
    pub fn unresolved_geometry(element: &ElementId) -> Self {
        Self::UnresolvedGeometry {
            element: element.clone(),
        }
    }

    /// Create a missing scroll state error
    pub fn missing_scroll_state(surface: &ElementId) -> Self {
        Self::MissingScrollState {
            surface: surface.clone(),
        }
    }

    /// Create an unsupported positioning error
    pub fn unsupported_positioning(element: &ElementId, reason: impl Into<String>) -> Self {
        Self::UnsupportedPositioning {
            element: element.clone(),
            reason: reason.into(),
        }
    }

    /// The element the error is about, if any
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Self::MissingGeometry { element }
            | Self::UnresolvedGeometry { element }
            | Self::UnsupportedPositioning { element, .. } => Some(element),
            Self::MissingScrollState { surface } => Some(surface),
            Self::NoDraggableAxis => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_geometry_display() {
        let err = DragError::missing_geometry(&ElementId::new("card"));
        assert_eq!(err.to_string(), "element '#card' has no defined position");
    }

    #[test]
    fn test_unsupported_positioning_display() {
        let err = DragError::unsupported_positioning(&ElementId::new("card"), "sticky elements cannot be dragged");
        assert!(err.to_string().contains("sticky elements cannot be dragged"));
        assert_eq!(err.element(), Some(&ElementId::new("card")));
    }

    #[test]
    fn test_no_axis_has_no_element() {
        assert_eq!(DragError::NoDraggableAxis.element(), None);
    }
}
