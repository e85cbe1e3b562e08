//! Scene files: an in-memory host for replaying drags
//!
//! A scene describes one scroll surface, the dragged element, the elements
//! around it (obstacles, frontiers, area elements, plain groups) and a list
//! of samples to replay. Element rectangles are written in content space,
//! the coordinates they have when the surface is not scrolled; the scene
//! derives viewport rectangles from the current scroll like a browser would.

use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constraint::{AreaConstraint, AreaSource, EngineConfig, Side};
use crate::error::DragError;
use crate::geometry::{Axes, Movement, Point, Positioning, Rect, StickyAnchor};
use crate::gesture::{Gesture, GestureSpec, GestureState, SampleOutcome};
use crate::host::{ElementGeometry, ElementId, Host, MarkedElement, MarkerKind, ScrollState};

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// The scroll surface of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub id: ElementId,
    pub is_document: bool,
    /// Visible part of the surface in viewport space
    pub viewport: Rect,
    /// Full scrollable extent
    pub scroll_width: f64,
    pub scroll_height: f64,
}

/// How a scene element is positioned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenePositioning {
    Normal,
    /// `rect` is given in viewport space
    Fixed,
    /// `rect` is the in-flow position; the element sticks at these offsets
    Sticky { left: Option<f64>, top: Option<f64> },
}

/// An element of the scene other than the surface
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub id: ElementId,
    pub rect: Rect,
    pub positioning: ScenePositioning,
    pub parent: Option<ElementId>,
    pub marker: Option<MarkerKind>,
    /// Gesture name the marker is restricted to
    pub name: Option<String>,
    pub side: Option<Side>,
    /// Ignore marker: hides the element and its descendants from discovery
    pub ignore: bool,
}

/// One replayed input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneSample {
    /// Pointer offset since the grab
    Pointer(Movement),
    /// Absolute scroll offset of the surface
    Scroll(Point),
    /// Programmatic move relative to the element's position
    MoveBy(Movement),
}

/// A replayable drag scene
#[derive(Debug)]
pub struct Scene {
    pub surface: Surface,
    pub elements: Vec<SceneElement>,
    pub gesture: GestureSpec,
    pub samples: Vec<SceneSample>,
    initial_scroll: Point,
    scroll: Cell<Point>,
}

/// A replayed step and its outcome (`None` when the step was ignored)
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub sample: SceneSample,
    pub outcome: Option<SampleOutcome>,
}

/// Result of replaying every sample of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub steps: Vec<ReplayStep>,
    pub released: GestureState,
}

// ── TOML structure ────────────────────────────────────────────────

#[derive(Deserialize)]
struct TomlScene {
    surface: TomlSurface,
    element: TomlDragged,
    #[serde(default)]
    elements: Vec<TomlElement>,
    #[serde(default)]
    samples: Vec<TomlSample>,
}

#[derive(Deserialize)]
struct TomlSurface {
    #[serde(default = "default_surface_id")]
    id: String,
    #[serde(default)]
    document: bool,
    viewport: [f64; 4],
    size: [f64; 2],
    #[serde(default)]
    scroll: [f64; 2],
}

fn default_surface_id() -> String {
    "surface".to_string()
}

#[derive(Deserialize)]
struct TomlDragged {
    id: String,
    rect: [f64; 4],
    #[serde(default)]
    axes: TomlAxes,
    name: Option<String>,
    #[serde(default)]
    area: TomlArea,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum TomlAxes {
    #[default]
    Both,
    X,
    Y,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlArea {
    Keyword(String),
    Element {
        element: String,
    },
    Bounds {
        left: Option<f64>,
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
    },
}

impl Default for TomlArea {
    fn default() -> Self {
        TomlArea::Keyword("surface".to_string())
    }
}

#[derive(Deserialize)]
struct TomlElement {
    id: String,
    rect: [f64; 4],
    #[serde(default)]
    positioning: TomlPositioning,
    parent: Option<String>,
    marker: Option<TomlMarker>,
    name: Option<String>,
    side: Option<Side>,
    #[serde(default)]
    ignore: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum TomlPositioning {
    #[default]
    Normal,
    Fixed,
    Sticky {
        left: Option<f64>,
        top: Option<f64>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum TomlMarker {
    Obstacle,
    Frontier,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TomlSample {
    Pointer([f64; 2]),
    Scroll([f64; 2]),
    MoveBy([f64; 2]),
}

fn rect_from(edges: [f64; 4]) -> Rect {
    Rect::new(edges[0], edges[1], edges[2], edges[3])
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let surface = Surface {
            id: ElementId::new(parsed.surface.id),
            is_document: parsed.surface.document,
            viewport: rect_from(parsed.surface.viewport),
            scroll_width: parsed.surface.size[0],
            scroll_height: parsed.surface.size[1],
        };
        let initial_scroll = Point::new(parsed.surface.scroll[0], parsed.surface.scroll[1]);

        let dragged_id = ElementId::new(parsed.element.id);
        let mut elements = vec![SceneElement {
            id: dragged_id.clone(),
            rect: rect_from(parsed.element.rect),
            positioning: ScenePositioning::Normal,
            parent: None,
            marker: None,
            name: None,
            side: None,
            ignore: false,
        }];

        for element in parsed.elements {
            let positioning = match element.positioning {
                TomlPositioning::Normal => ScenePositioning::Normal,
                TomlPositioning::Fixed => ScenePositioning::Fixed,
                TomlPositioning::Sticky { left, top } => ScenePositioning::Sticky { left, top },
            };
            let marker = element.marker.map(|m| match m {
                TomlMarker::Obstacle => MarkerKind::Obstacle,
                TomlMarker::Frontier => MarkerKind::Frontier,
            });
            if marker == Some(MarkerKind::Frontier) && element.side.is_none() {
                return Err(SceneError::Invalid(format!(
                    "frontier '{}' needs a side",
                    element.id
                )));
            }
            elements.push(SceneElement {
                id: ElementId::new(element.id),
                rect: rect_from(element.rect),
                positioning,
                parent: element.parent.map(ElementId::new),
                marker,
                name: element.name,
                side: element.side,
                ignore: element.ignore,
            });
        }

        validate_elements(&surface, &elements)?;

        let axes = match parsed.element.axes {
            TomlAxes::Both => Axes::BOTH,
            TomlAxes::X => Axes::X,
            TomlAxes::Y => Axes::Y,
        };
        let area = match parsed.element.area {
            TomlArea::Keyword(keyword) => match keyword.as_str() {
                "surface" => AreaSource::Surface,
                "none" => AreaSource::Bounds(AreaConstraint::unbounded()),
                other => {
                    return Err(SceneError::Invalid(format!(
                        "unknown area '{}' (expected \"surface\" or \"none\")",
                        other
                    )))
                }
            },
            TomlArea::Element { element } => {
                let id = ElementId::new(element);
                if !elements.iter().any(|e| e.id == id) {
                    return Err(SceneError::Invalid(format!("area element '{}' is not defined", id.as_str())));
                }
                AreaSource::Element(id)
            }
            TomlArea::Bounds {
                left,
                top,
                right,
                bottom,
            } => AreaSource::Bounds(AreaConstraint {
                left,
                top,
                right,
                bottom,
                ..AreaConstraint::unbounded()
            }),
        };

        let mut gesture =
            GestureSpec::new(dragged_id, surface.id.clone()).with_axes(axes).with_area(area);
        if let Some(name) = parsed.element.name {
            gesture = gesture.named(name);
        }

        let samples = parsed
            .samples
            .into_iter()
            .map(|sample| match sample {
                TomlSample::Pointer([x, y]) => SceneSample::Pointer(Movement::new(x, y)),
                TomlSample::Scroll([x, y]) => SceneSample::Scroll(Point::new(x, y)),
                TomlSample::MoveBy([x, y]) => SceneSample::MoveBy(Movement::new(x, y)),
            })
            .collect();

        Ok(Scene {
            surface,
            elements,
            gesture,
            samples,
            initial_scroll,
            scroll: Cell::new(initial_scroll),
        })
    }

    /// Current scroll offset of the surface
    pub fn scroll(&self) -> Point {
        self.scroll.get()
    }

    /// Scroll the surface, clamped to its scrollable range
    pub fn set_scroll(&self, offset: Point) {
        let max_x = (self.surface.scroll_width - self.surface.viewport.width()).max(0.0);
        let max_y = (self.surface.scroll_height - self.surface.viewport.height()).max(0.0);
        self.scroll
            .set(Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y)));
    }

    pub fn element(&self, id: &ElementId) -> Option<&SceneElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Replay every sample from the initial scroll offset
    pub fn replay(&self, config: EngineConfig) -> Result<Replay, DragError> {
        self.scroll.set(self.initial_scroll);
        let mut gesture = Gesture::grab(self, self.gesture.clone(), config)?;

        let mut steps = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            let outcome = match *sample {
                SceneSample::Pointer(offset) => Some(gesture.pointer_move(offset)),
                SceneSample::MoveBy(delta) => Some(gesture.move_by(delta)),
                SceneSample::Scroll(offset) => {
                    self.set_scroll(offset);
                    gesture.scroll()
                }
            };
            steps.push(ReplayStep {
                sample: *sample,
                outcome,
            });
        }

        Ok(Replay {
            steps,
            released: gesture.release(),
        })
    }

    /// Viewport offset that in-flow content is placed relative to
    fn content_origin(&self) -> Point {
        if self.surface.is_document {
            Point::new(0.0, 0.0)
        } else {
            self.surface.viewport.origin()
        }
    }

    fn to_viewport(&self, rect: Rect) -> Rect {
        let origin = self.content_origin();
        let scroll = self.scroll();
        rect.translate(Movement::new(origin.x - scroll.x, origin.y - scroll.y))
    }

    fn is_ignored(&self, element: &SceneElement) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(element);
        while let Some(e) = current {
            if e.ignore {
                return true;
            }
            if !seen.insert(e.id.clone()) {
                return false;
            }
            current = e.parent.as_ref().and_then(|p| self.element(p));
        }
        false
    }
}

fn validate_elements(surface: &Surface, elements: &[SceneElement]) -> Result<(), SceneError> {
    let mut ids = HashSet::new();
    ids.insert(surface.id.clone());
    for element in elements {
        if !ids.insert(element.id.clone()) {
            return Err(SceneError::Invalid(format!(
                "element '{}' is defined twice",
                element.id.as_str()
            )));
        }
    }
    for element in elements {
        if let Some(parent) = &element.parent {
            if !ids.contains(parent) {
                return Err(SceneError::Invalid(format!(
                    "element '{}' has unknown parent '{}'",
                    element.id.as_str(),
                    parent.as_str()
                )));
            }
        }
    }
    Ok(())
}

impl Host for Scene {
    fn geometry(&self, element: &ElementId) -> Option<ElementGeometry> {
        if *element == self.surface.id {
            return Some(ElementGeometry::normal(self.surface.viewport));
        }
        let element = self.element(element)?;

        let geometry = match element.positioning {
            ScenePositioning::Normal => ElementGeometry::normal(self.to_viewport(element.rect)),
            ScenePositioning::Fixed => ElementGeometry {
                rect: element.rect,
                positioning: Positioning::Fixed,
            },
            ScenePositioning::Sticky { left, top } => {
                let flow = self.to_viewport(element.rect);
                let origin = self.content_origin();
                let stuck_left = left.map(|offset| origin.x + offset).filter(|l| *l > flow.left);
                let stuck_top = top.map(|offset| origin.y + offset).filter(|t| *t > flow.top);
                let shift = Movement::new(
                    stuck_left.map_or(0.0, |l| l - flow.left),
                    stuck_top.map_or(0.0, |t| t - flow.top),
                );
                ElementGeometry {
                    rect: flow.translate(shift),
                    positioning: Positioning::Sticky(StickyAnchor {
                        left,
                        top,
                        flow_rect: flow,
                    }),
                }
            }
        };
        Some(geometry)
    }

    fn scroll_state(&self, surface: &ElementId) -> Option<ScrollState> {
        if *surface != self.surface.id {
            return None;
        }
        let scroll = self.scroll();
        Some(ScrollState {
            scroll_left: scroll.x,
            scroll_top: scroll.y,
            client_width: self.surface.viewport.width(),
            client_height: self.surface.viewport.height(),
            scroll_width: self.surface.scroll_width,
            scroll_height: self.surface.scroll_height,
            is_document: self.surface.is_document,
        })
    }

    fn discover(&self, container: &ElementId, marker: MarkerKind) -> Vec<MarkedElement> {
        if *container != self.surface.id {
            return Vec::new();
        }
        self.elements
            .iter()
            .filter(|e| e.marker == Some(marker) && !self.is_ignored(e))
            .map(|e| MarkedElement {
                element: e.id.clone(),
                name: e.name.clone(),
                side: e.side,
            })
            .collect()
    }
}
