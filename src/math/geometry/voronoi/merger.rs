// src/math/geometry/voronoi/merger.rs

use super::triangulation::RawCell;
use crate::math::{error::AttributionWarning, types::*, utils::constants};
use geo::{Area, BooleanOps, Validation};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// Vereinigte Zellen eines Eingabe-Polygons
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRegion<K> {
    pub owner: K,
    pub geometry: MultiPolygon<f64>,
}

impl<K> OwnedRegion<K> {
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }
}

/// Führt die Punkt-Voronoi-Zellen pro Owner zu einer Region zusammen (Dissolve by Owner)
pub struct CellAttributor {
    min_area: f64,
}

impl CellAttributor {
    pub fn new() -> Self {
        Self {
            min_area: constants::EPSILON,
        }
    }

    /// Flächen bis einschließlich `min_area` gelten als leer
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Gruppiert die Zellen nach Owner und vereinigt jede Gruppe.
    ///
    /// Die Reihenfolge der Regionen ist die Reihenfolge, in der die Owner zum ersten
    /// Mal in `cells` auftauchen. Leere oder ungültige Zellen fließen nicht in die
    /// Vereinigung ein; bleibt für einen Owner nichts übrig, wird er mit Warnung verworfen.
    pub fn merge_cells<K>(
        &self,
        cells: Vec<RawCell<K>>,
        warnings: &mut Vec<AttributionWarning<K>>,
    ) -> Vec<OwnedRegion<K>>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<Polygon<f64>>)> = Vec::new();
        let mut skipped_cells = 0usize;

        for cell in cells {
            let slot = *slots.entry(cell.owner.clone()).or_insert_with(|| {
                groups.push((cell.owner.clone(), Vec::new()));
                groups.len() - 1
            });

            if cell.is_empty()
                || cell.geometry.unsigned_area() <= self.min_area
                || !cell.geometry.is_valid()
            {
                skipped_cells += 1;
                continue;
            }
            groups[slot].1.push(cell.geometry);
        }

        debug!(
            "CellAttributor: {} owners, {} cells excluded as empty/invalid",
            groups.len(),
            skipped_cells
        );

        let mut regions = Vec::with_capacity(groups.len());
        for (owner, polygons) in groups {
            let cell_count = polygons.len();
            let geometry = drop_slivers(union_all(polygons), self.min_area);

            if geometry.0.is_empty() {
                warn!(
                    "CellAttributor: owner {:?} has an empty union ({} usable cells), dropping it",
                    owner, cell_count
                );
                warnings.push(AttributionWarning::EmptyUnion { owner });
                continue;
            }
            regions.push(OwnedRegion { owner, geometry });
        }

        regions
    }
}

impl Default for CellAttributor {
    fn default() -> Self {
        Self::new()
    }
}

/// Vereinigt alle Polygone paarweise in einem balancierten Baum
pub fn union_all(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut layer: Vec<MultiPolygon<f64>> = polygons.into_iter().map(MultiPolygon::from).collect();

    while layer.len() > 1 {
        let mut next_layer = Vec::with_capacity(layer.len() / 2 + 1);
        let mut iter = layer.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => next_layer.push(a.union(&b)),
                None => next_layer.push(a),
            }
        }
        layer = next_layer;
    }

    layer
        .into_iter()
        .next()
        .unwrap_or_else(|| MultiPolygon::new(vec![]))
}

/// Entfernt Teile ohne nennenswerte Fläche
pub fn drop_slivers(geometry: MultiPolygon<f64>, min_area: f64) -> MultiPolygon<f64> {
    MultiPolygon::new(
        geometry
            .into_iter()
            .filter(|part| part.unsigned_area() > min_area)
            .collect(),
    )
}
