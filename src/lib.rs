// src/lib.rs
//! Polygon-basierte Voronoi-Partition: jedes Eingabe-Polygon bekommt die Fläche
//! der Boundary, die näher an ihm liegt als an jedem anderen Polygon.
//!
//! ```no_run
//! use geo::polygon;
//! use polygon_voronoi::{InputPolygon, build_polygon_voronoi};
//!
//! let boundary = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)];
//! let houses = vec![
//!     InputPolygon::new("a", polygon![(x: 0.5, y: 0.5), (x: 1.0, y: 0.5), (x: 1.0, y: 1.0)]),
//!     InputPolygon::new("b", polygon![(x: 3.0, y: 3.0), (x: 3.5, y: 3.0), (x: 3.5, y: 3.5)]),
//! ];
//! let result = build_polygon_voronoi(&houses, &boundary)?;
//! assert_eq!(result.len(), 2);
//! # Ok::<(), polygon_voronoi::PartitionError>(())
//! ```

pub mod math;

pub use math::error::{AttributionWarning, BuildResult, PartitionError};
pub use math::geometry::voronoi::{
    InputPolygon, PartitionBuilder, PartitionConfig, PartitionResult, Region, Spacing,
    build_polygon_voronoi,
};
pub use math::prelude;
