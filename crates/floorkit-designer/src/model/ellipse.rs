use async_trait::async_trait;
use floorkit_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_alpha, default_color, parse_params, Geometry, ShapeBody, ShapeFactory, ShapeKind,
    Style, Transform,
};

/// Construction parameters for an ellipse inscribed in `width` x `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseParams {
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

impl Default for EllipseParams {
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

#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseFactory;

#[async_trait]
impl ShapeFactory for EllipseFactory {
    async fn create(&self, params: &Value) -> Result<ShapeBody> {
        let p: EllipseParams = parse_params(ShapeKind::Ellipse, params)?;
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
            geometry: Geometry::Ellipse,
        })
    }
}
