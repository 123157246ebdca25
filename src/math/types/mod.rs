// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use geo::{Coord, MultiPolygon, Polygon};
pub use spade::Point2;

pub type SpadePoint = Point2<f64>;

pub fn coord_to_spade(coord: Coord<f64>) -> SpadePoint {
    Point2::new(coord.x, coord.y)
}

pub fn spade_to_coord(point: SpadePoint) -> Coord<f64> {
    Coord {
        x: point.x,
        y: point.y,
    }
}
