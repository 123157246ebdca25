// src/math/geometry/voronoi/repair.rs
//
// Löcher werden ausnahmslos entfernt, auch echte Lücken. Mehrteilige Regionen
// bleiben mehrteilig. Wer einteilige, überlappungsfreie Regionen braucht, macht
// danach pro Region Buffer(+eps) -> Dissolve -> Buffer(-eps) außerhalb dieses Moduls.

use super::merger::OwnedRegion;
use crate::math::{error::AttributionWarning, types::*};
use geo::{Area, Contains, InteriorPoint, Validation};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Repariert die geclippten Regionen
pub struct GeometryRepair;

impl GeometryRepair {
    pub fn new() -> Self {
        Self
    }

    /// Fehlgeschlagene Reparaturen betreffen nur die eine Region: sie behält ihre
    /// unreparierte Geometrie und es wird eine Warnung erfasst.
    ///
    /// Als fehlgeschlagen gilt nur, was die Reparatur selbst ungültig macht. Ein schon
    /// vorher ungültiger Umriss (z.B. Selbstberührung nach dem Vereinigen verdichteter
    /// Zellen) wird trotzdem von seinen Löchern befreit.
    pub fn repair<K>(
        &self,
        regions: Vec<OwnedRegion<K>>,
        warnings: &mut Vec<AttributionWarning<K>>,
    ) -> Vec<OwnedRegion<K>>
    where
        K: Clone + Debug,
    {
        let mut holes_removed = 0usize;
        let repaired = regions
            .into_iter()
            .map(|region| {
                let hole_count: usize = region.geometry.iter().map(|p| p.interiors().len()).sum();
                let geometry = remove_holes(&region.geometry);

                if !geometry.is_valid() {
                    if region.geometry.is_valid() {
                        warn!(
                            "GeometryRepair: repaired region {:?} is invalid, keeping unrepaired geometry",
                            region.owner
                        );
                        warnings.push(AttributionWarning::RepairFailed {
                            owner: region.owner.clone(),
                            reason: "repaired geometry is not topologically valid".to_string(),
                        });
                        return region;
                    }
                    warn!(
                        "GeometryRepair: outline of region {:?} was already invalid before repair",
                        region.owner
                    );
                }

                holes_removed += hole_count;
                OwnedRegion {
                    owner: region.owner,
                    geometry,
                }
            })
            .collect();

        debug!("GeometryRepair: removed {} holes", holes_removed);
        repaired
    }
}

impl Default for GeometryRepair {
    fn default() -> Self {
        Self::new()
    }
}

/// Füllt alle Löcher. Teile, die danach im Inneren eines anderen Teils liegen
/// (vorher in dessen Loch), werden von diesem absorbiert.
pub fn remove_holes(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let mut filled: Vec<Polygon<f64>> = geometry
        .iter()
        .map(|part| Polygon::new(part.exterior().clone(), vec![]))
        .collect();
    filled.sort_by(|a, b| b.unsigned_area().total_cmp(&a.unsigned_area()));

    let mut kept: Vec<Polygon<f64>> = Vec::with_capacity(filled.len());
    for part in filled {
        let absorbed = part
            .interior_point()
            .is_some_and(|point| kept.iter().any(|outer| outer.contains(&point)));
        if !absorbed {
            kept.push(part);
        }
    }

    MultiPolygon::new(kept)
}
