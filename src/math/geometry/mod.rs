// src/math/geometry/mod.rs

// Deklaration der Haupt-Geometriemodule
pub mod polygon;
pub mod voronoi;

// Polygon-Exporte
pub use self::polygon::{CleanRing, PolygonValidator, ValidationError, ValidationResult};

// Voronoi-Exporte
pub use self::voronoi::{
    BoundaryClipper, CellAttributor, GeometryRepair, InputPolygon, OwnedRegion, PartitionBuilder,
    PartitionConfig, PartitionResult, PipelineStage, PointVoronoiEngine, RawCell, Region,
    Spacing, SpadeVoronoiEngine, TaggedPoint, VertexSampler, build_polygon_voronoi,
};
