use serde::{Deserialize, Serialize};

/// Axis-aligned box in the square target coordinate space.
///
/// Zero-area boxes are valid. Inverted extents (`x_max < x_min`) are treated
/// as empty rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let inter_w = (self.x_max.min(other.x_max) - self.x_min.max(other.x_min)).max(0.0);
        let inter_h = (self.y_max.min(other.y_max) - self.y_min.max(other.y_min)).max(0.0);
        inter_w * inter_h
    }

    /// Intersection over union; 0 when the union is empty.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union > 0.0 { inter / union } else { 0.0 }
    }

    /// Clamps every coordinate into `[0, size]`.
    pub fn clamp_to(&self, size: f64) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.clamp(0.0, size),
            y_min: self.y_min.clamp(0.0, size),
            x_max: self.x_max.clamp(0.0, size),
            y_max: self.y_max.clamp(0.0, size),
        }
    }
}
