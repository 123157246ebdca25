// src/math/geometry/voronoi/mod.rs

// Pipeline: Sampling -> Punkt-Voronoi -> Attributierung -> Clipping -> Reparatur
pub mod builder;
pub mod clipper;
pub mod config;
pub mod merger;
pub mod repair;
pub mod sampler;
pub mod triangulation; // Punkt-Voronoi über spade

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Voronoi-Elemente
pub use self::builder::{
    PartitionBuilder, PartitionResult, PipelineStage, Region, build_polygon_voronoi,
};
pub use self::clipper::BoundaryClipper;
pub use self::config::{PartitionConfig, Spacing};
pub use self::merger::{CellAttributor, OwnedRegion};
pub use self::repair::GeometryRepair;
pub use self::sampler::{InputPolygon, TaggedPoint, VertexSampler};
pub use self::triangulation::{PointVoronoiEngine, RawCell, SpadeVoronoiEngine};
