// src/math/error.rs
use std::fmt::Debug;
use thiserror::Error;

/// Fatale Fehler. Bricht den Lauf ab und wird direkt an den Aufrufer gegeben.
#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Empty input: {reason}")]
    EmptyInput { reason: String },

    #[error("Invalid boundary polygon: {reason}")]
    InvalidBoundary { reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Point Voronoi engine returned {actual} cells for {expected} sites")]
    EngineContract { expected: usize, actual: usize },
}

pub type BuildResult<T> = Result<T, PartitionError>;

/// Nicht-fatale Degenerierungen einzelner Owner.
/// Werden gesammelt und an das Ergebnis gehängt, der Lauf geht weiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributionWarning<K: Debug> {
    #[error("Polygon {owner:?} has only {distinct_vertices} distinct outer ring vertices")]
    DegenerateRing { owner: K, distinct_vertices: usize },

    #[error("Polygon {owner:?}: skipped {skipped} non-finite vertices")]
    NonFiniteVertices { owner: K, skipped: usize },

    #[error("Polygon {owner:?} contributed no usable vertex")]
    NoUsableVertices { owner: K },

    #[error("Cells of polygon {owner:?} merged into an empty region")]
    EmptyUnion { owner: K },

    #[error("Region of polygon {owner:?} does not overlap the boundary")]
    OutsideBoundary { owner: K },

    #[error("Repair of region {owner:?} failed ({reason}), keeping unrepaired geometry")]
    RepairFailed { owner: K, reason: String },
}

impl<K: Debug> AttributionWarning<K> {
    pub fn owner(&self) -> &K {
        match self {
            Self::DegenerateRing { owner, .. }
            | Self::NonFiniteVertices { owner, .. }
            | Self::NoUsableVertices { owner }
            | Self::EmptyUnion { owner }
            | Self::OutsideBoundary { owner }
            | Self::RepairFailed { owner, .. } => owner,
        }
    }

    /// `true`, wenn der Owner deswegen keine Region im Ergebnis hat
    pub fn drops_owner(&self) -> bool {
        matches!(
            self,
            Self::NoUsableVertices { .. } | Self::EmptyUnion { .. } | Self::OutsideBoundary { .. }
        )
    }
}
