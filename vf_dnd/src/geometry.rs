use serde::{Deserialize, Serialize};

use crate::engine::DropSpot;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// A droppable region on the canvas and the spot it resolves to.
#[derive(Clone, Debug, PartialEq)]
pub struct DropZone {
    pub rect: Rect,
    pub spot: DropSpot,
}

/// Pick the zone under the pointer. Entity zones nest inside their section
/// zones, which nest inside the canvas, so the smallest containing zone wins.
pub fn hit_test<'a>(zones: &'a [DropZone], point: Point) -> Option<&'a DropZone> {
    zones
        .iter()
        .filter(|zone| zone.rect.contains(point))
        .min_by(|a, b| {
            a.rect
                .area()
                .partial_cmp(&b.rect.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
