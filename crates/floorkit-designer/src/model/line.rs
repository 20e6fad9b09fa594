use async_trait::async_trait;
use floorkit_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_alpha, default_color, parse_params, Geometry, Point, Segment, ShapeBody,
    ShapeFactory, ShapeKind, Style, Transform,
};

/// Construction parameters for a line from `from` to `to`, both relative to
/// `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineParams {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub from: Point,
    #[serde(default)]
    pub to: Point,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_line_width() -> f64 {
    1.0
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            from: Point::default(),
            to: Point::default(),
            line_width: default_line_width(),
            color: default_color(),
            alpha: default_alpha(),
        }
    }
}

impl LineParams {
    /// A line anchored at the origin with absolute endpoints.
    pub fn between(from: Point, to: Point, line_width: f64, color: u32) -> Self {
        Self {
            from,
            to,
            line_width,
            color,
            ..Self::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineFactory;

#[async_trait]
impl ShapeFactory for LineFactory {
    async fn create(&self, params: &Value) -> Result<ShapeBody> {
        let p: LineParams = parse_params(ShapeKind::Line, params)?;
        Ok(ShapeBody {
            transform: Transform {
                x: p.x,
                y: p.y,
                width: (p.to.x - p.from.x).abs(),
                height: (p.to.y - p.from.y).abs(),
                rotation: 0.0,
            },
            style: Style {
                color: p.color,
                alpha: p.alpha,
            },
            geometry: Geometry::Line {
                segment: Segment::new(p.from, p.to),
                line_width: p.line_width,
            },
        })
    }
}
