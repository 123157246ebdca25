// src/math/geometry/voronoi/clipper.rs

use super::merger::{OwnedRegion, drop_slivers};
use crate::math::{error::AttributionWarning, types::*, utils::constants};
use geo::BooleanOps;
use std::fmt::Debug;
use tracing::{debug, warn};

/// Schneidet jede Region mit der Boundary. Material außerhalb wird verworfen.
pub struct BoundaryClipper {
    boundary: MultiPolygon<f64>,
    min_area: f64,
}

impl BoundaryClipper {
    pub fn new(boundary: &Polygon<f64>) -> Self {
        Self {
            boundary: MultiPolygon::from(boundary.clone()),
            min_area: constants::EPSILON,
        }
    }

    /// Schnittflächen bis einschließlich `min_area` gelten als leer
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn clip_region(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        drop_slivers(geometry.intersection(&self.boundary), self.min_area)
    }

    /// Regionen, deren Schnitt mit der Boundary keine Fläche hat, fallen mit Warnung heraus.
    pub fn clip<K>(
        &self,
        regions: Vec<OwnedRegion<K>>,
        warnings: &mut Vec<AttributionWarning<K>>,
    ) -> Vec<OwnedRegion<K>>
    where
        K: Debug,
    {
        let input_count = regions.len();
        let clipped: Vec<OwnedRegion<K>> = regions
            .into_iter()
            .filter_map(|region| {
                let geometry = self.clip_region(&region.geometry);
                if geometry.0.is_empty() {
                    warn!(
                        "BoundaryClipper: region {:?} has no area inside the boundary, dropping it",
                        region.owner
                    );
                    warnings.push(AttributionWarning::OutsideBoundary {
                        owner: region.owner,
                    });
                    return None;
                }
                Some(OwnedRegion {
                    owner: region.owner,
                    geometry,
                })
            })
            .collect();

        debug!(
            "BoundaryClipper: {} of {} regions inside boundary",
            clipped.len(),
            input_count
        );
        clipped
    }
}
