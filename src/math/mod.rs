pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{AttributionWarning, BuildResult, PartitionError};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{AttributionWarning, BuildResult, PartitionError},
        geometry::voronoi::{
            BoundaryClipper, CellAttributor, GeometryRepair, InputPolygon, PartitionBuilder,
            PartitionConfig, PartitionResult, PointVoronoiEngine, Region, Spacing,
            SpadeVoronoiEngine, VertexSampler, build_polygon_voronoi,
        },
        types::*,
    };
}
