use async_trait::async_trait;
use floorkit_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_alpha, default_color, parse_params, Geometry, ShapeBody, ShapeFactory, ShapeKind,
    Style, Transform,
};

/// Construction parameters for a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleParams {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_size")]
    pub width: f64,
    #[serde(default = "default_size")]
    pub height: f64,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_size() -> f64 {
    128.0
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: default_size(),
            height: default_size(),
            color: default_color(),
            alpha: default_alpha(),
        }
    }
}

impl RectangleParams {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleFactory;

#[async_trait]
impl ShapeFactory for RectangleFactory {
    async fn create(&self, params: &Value) -> Result<ShapeBody> {
        let p: RectangleParams = parse_params(ShapeKind::Rectangle, params)?;
        Ok(ShapeBody {
            transform: Transform {
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
                rotation: 0.0,
            },
            style: Style {
                color: p.color,
                alpha: p.alpha,
            },
            geometry: Geometry::Rectangle,
        })
    }
}
