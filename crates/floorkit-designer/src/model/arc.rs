use async_trait::async_trait;
use floorkit_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_alpha, default_color, parse_params, Geometry, ShapeBody, ShapeFactory, ShapeKind,
    Style, Transform,
};

/// Construction parameters for an arc centred on `(x, y)`.
///
/// Angles are in degrees; the defaults describe a full circle, which is how
/// floor corners are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcParams {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,
    #[serde(default)]
    pub anticlockwise: bool,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_radius() -> f64 {
    128.0
}

fn default_end_angle() -> f64 {
    360.0
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: default_radius(),
            start_angle: 0.0,
            end_angle: default_end_angle(),
            anticlockwise: false,
            color: default_color(),
            alpha: default_alpha(),
        }
    }
}

impl ArcParams {
    /// A full circle.
    pub fn circle(x: f64, y: f64, radius: f64, color: u32) -> Self {
        Self {
            x,
            y,
            radius,
            color,
            ..Self::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArcFactory;

#[async_trait]
impl ShapeFactory for ArcFactory {
    async fn create(&self, params: &Value) -> Result<ShapeBody> {
        let p: ArcParams = parse_params(ShapeKind::Arc, params)?;
        Ok(ShapeBody {
            transform: Transform {
                x: p.x,
                y: p.y,
                width: p.radius * 2.0,
                height: p.radius * 2.0,
                rotation: 0.0,
            },
            style: Style {
                color: p.color,
                alpha: p.alpha,
            },
            geometry: Geometry::Arc {
                radius: p.radius,
                start_angle: p.start_angle,
                end_angle: p.end_angle,
                anticlockwise: p.anticlockwise,
            },
        })
    }
}
