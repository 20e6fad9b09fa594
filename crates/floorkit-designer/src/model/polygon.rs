use async_trait::async_trait;
use floorkit_core::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    default_alpha, default_color, parse_params, Geometry, Point, ShapeBody, ShapeFactory,
    ShapeKind, Style, Transform,
};

/// Construction parameters for a polygon.
///
/// `points` is a flat coordinate list `[x0, y0, x1, y1, ...]` relative to
/// the polygon's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonParams {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub points: Vec<f64>,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            points: Vec::new(),
            color: default_color(),
            alpha: default_alpha(),
        }
    }
}

/// Pair up a flat coordinate list.
pub(crate) fn points_from_flat(coords: &[f64]) -> Option<Vec<Point>> {
    if coords.len() % 2 != 0 {
        return None;
    }
    Some(
        coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect(),
    )
}

pub(crate) fn points_to_flat(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Width and height of the box enclosing `points`.
pub(crate) fn extent(points: &[Point]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x, max_y - min_y)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonFactory;

#[async_trait]
impl ShapeFactory for PolygonFactory {
    async fn create(&self, params: &Value) -> Result<ShapeBody> {
        let p: PolygonParams = parse_params(ShapeKind::Polygon, params)?;
        let points = points_from_flat(&p.points).ok_or_else(|| RegistryError::FactoryFailed {
            kind: ShapeKind::Polygon.to_string(),
            reason: format!("odd number of coordinates ({})", p.points.len()),
        })?;
        let (width, height) = extent(&points);

        Ok(ShapeBody {
            transform: Transform {
                x: p.x,
                y: p.y,
                width,
                height,
                rotation: 0.0,
            },
            style: Style {
                color: p.color,
                alpha: p.alpha,
            },
            geometry: Geometry::Polygon { points },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_polygon_extent() {
        let body = PolygonFactory
            .create(&json!({ "points": [0, 0, 40, 0, 20, 30] }))
            .await
            .unwrap();
        assert_eq!(body.transform.width, 40.0);
        assert_eq!(body.transform.height, 30.0);
        match body.geometry {
            Geometry::Polygon { points } => assert_eq!(points.len(), 3),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_polygon_odd_coordinates() {
        let err = PolygonFactory
            .create(&json!({ "points": [0, 0, 40] }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("odd number"));
    }
}
