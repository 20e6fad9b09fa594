//! Shape model: geometry, styling and the factory contract.
//!
//! A [`Shape`] is the registry-owned entity every command mutates. Factories
//! only produce a [`ShapeBody`]; identity, metadata and interactivity are
//! attached by the [`ShapeManager`](crate::ShapeManager) when the body is
//! registered.

use async_trait::async_trait;
use floorkit_core::{RegistryError, Result, ShapeId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

mod arc;
mod ellipse;
mod line;
mod polygon;
mod rectangle;
pub mod snapshot;

pub use arc::{ArcFactory, ArcParams};
pub use ellipse::{EllipseFactory, EllipseParams};
pub use line::{LineFactory, LineParams};
pub use polygon::{PolygonFactory, PolygonParams};
pub use rectangle::{RectangleFactory, RectangleParams};
pub use snapshot::{AdditionalDataSnapshot, MetadataSnapshot, ShapeSnapshot, SpecificSnapshot};

/// Default fill colour for every built-in shape (0xRRGGBB).
pub const DEFAULT_COLOR: u32 = 0xffffff;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Position, display size and rotation (radians) of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Transform {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Position and size pair changed together by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Endpoints of a line shape, relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Fill colour (0xRRGGBB).
    pub color: u32,
    pub alpha: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            alpha: 1.0,
        }
    }
}

/// The closed set of shape types the editor knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polygon,
    Arc,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
        ShapeKind::Arc,
        ShapeKind::Line,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Arc => "arc",
            ShapeKind::Line => "line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RegistryError::NotRegistered {
                kind: s.to_string(),
            })
    }
}

/// Type-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Rectangle,
    Ellipse,
    Polygon {
        points: Vec<Point>,
    },
    /// Angles are in degrees.
    Arc {
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Line {
        segment: Segment,
        line_width: f64,
    },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Rectangle => ShapeKind::Rectangle,
            Geometry::Ellipse => ShapeKind::Ellipse,
            Geometry::Polygon { .. } => ShapeKind::Polygon,
            Geometry::Arc { .. } => ShapeKind::Arc,
            Geometry::Line { .. } => ShapeKind::Line,
        }
    }
}

/// What a factory builds: everything about a shape except its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBody {
    pub transform: Transform,
    pub style: Style,
    pub geometry: Geometry,
}

impl ShapeBody {
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

/// Caller-supplied extras attached when a shape is registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalData {
    /// Reuse this id instead of generating one.
    pub id: Option<ShapeId>,
    /// Interactive configuration; falls back to the type's default.
    pub interactive: Option<Value>,
    /// Merged into the shape's metadata.
    pub metadata: Map<String, Value>,
    pub managers: Vec<String>,
}

impl AdditionalData {
    pub fn with_id(mut self, id: ShapeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_interactive(mut self, interactive: Value) -> Self {
        self.interactive = Some(interactive);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.managers.push(manager.into());
        self
    }
}

/// Per-type registration metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeTypeMetadata {
    /// Applied to new shapes whose caller supplies no interactive config.
    pub default_interactive: Option<Value>,
    /// Free-form entries (form field maps, command names).
    pub extra: Map<String, Value>,
}

impl ShapeTypeMetadata {
    pub fn draggable() -> Self {
        Self {
            default_interactive: Some(serde_json::json!({ "draggable": true })),
            extra: Map::new(),
        }
    }
}

/// A registered shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub transform: Transform,
    pub style: Style,
    pub geometry: Geometry,
    /// Open key/value map, e.g. `zoneName`.
    pub metadata: Map<String, Value>,
    pub interactive: Option<Value>,
    pub managers: Vec<String>,
}

impl Shape {
    pub fn from_body(id: ShapeId, body: ShapeBody) -> Self {
        Self {
            id,
            transform: body.transform,
            style: body.style,
            geometry: body.geometry,
            metadata: Map::new(),
            interactive: None,
            managers: Vec::new(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn position(&self) -> Point {
        self.transform.position()
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.x = x;
        self.transform.y = y;
    }

    /// Set position and display size together.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.transform.x = dimensions.x;
        self.transform.y = dimensions.y;
        self.transform.width = dimensions.width;
        self.transform.height = dimensions.height;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.transform.rotation = rotation;
    }

    /// Line endpoints, or `None` for any other kind.
    pub fn segment(&self) -> Option<Segment> {
        match self.geometry {
            Geometry::Line { segment, .. } => Some(segment),
            _ => None,
        }
    }

    /// Replace the endpoints of a line and refit its size. Returns `false`
    /// for any other kind.
    pub fn set_segment(&mut self, segment: Segment) -> bool {
        match &mut self.geometry {
            Geometry::Line { segment: current, .. } => {
                *current = segment;
                self.transform.width = (segment.to.x - segment.from.x).abs();
                self.transform.height = (segment.to.y - segment.from.y).abs();
                true
            }
            _ => false,
        }
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// Builds shape bodies for one shape kind.
#[async_trait]
pub trait ShapeFactory: Send + Sync {
    async fn create(&self, params: &Value) -> Result<ShapeBody>;
}

/// Deserialize factory params, treating `null` as "all defaults".
pub(crate) fn parse_params<T: DeserializeOwned>(kind: ShapeKind, params: &Value) -> Result<T> {
    let value = if params.is_null() {
        Value::Object(Map::new())
    } else {
        params.clone()
    };
    serde_json::from_value(value).map_err(|e| {
        RegistryError::FactoryFailed {
            kind: kind.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn default_color() -> u32 {
    DEFAULT_COLOR
}

fn default_alpha() -> f64 {
    1.0
}
