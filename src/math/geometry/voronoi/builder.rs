// src/math/geometry/voronoi/builder.rs

use super::{
    clipper::BoundaryClipper,
    config::PartitionConfig,
    merger::CellAttributor,
    repair::GeometryRepair,
    sampler::{InputPolygon, VertexSampler},
    triangulation::{PointVoronoiEngine, RawCell, SpadeVoronoiEngine},
};
use crate::math::{
    error::{AttributionWarning, BuildResult, PartitionError},
    geometry::polygon::PolygonValidator,
    types::*,
};
use geo::Area;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use tracing::{debug, info};

/// Zustände eines Laufs. Strikt sequentiell, kein Rücksprung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Sampling,
    ComputingCells,
    Attributing,
    Clipping,
    Repairing,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sampling => "Sampling",
            Self::ComputingCells => "ComputingCells",
            Self::Attributing => "Attributing",
            Self::Clipping => "Clipping",
            Self::Repairing => "Repairing",
            Self::Done => "Done",
        };
        write!(f, "{}", name)
    }
}

/// Ein Eintrag des Ergebnisses: die Region eines Eingabe-Polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Region<K, A = ()> {
    pub id: K,
    /// Attribute des ersten Eingabe-Polygons mit dieser ID
    pub attributes: A,
    pub geometry: MultiPolygon<f64>,
}

impl<K, A> Region<K, A> {
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }
}

/// Regionen in der Reihenfolge, in der ihre IDs zuerst in der Eingabe auftauchen,
/// plus alle gesammelten Warnungen.
#[derive(Debug, Clone)]
pub struct PartitionResult<K: Debug, A = ()> {
    pub regions: Vec<Region<K, A>>,
    pub warnings: Vec<AttributionWarning<K>>,
}

impl<K, A> PartitionResult<K, A>
where
    K: Debug + PartialEq,
{
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: &K) -> Option<&Region<K, A>> {
        self.regions.iter().find(|region| &region.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region<K, A>> {
        self.regions.iter()
    }

    pub fn total_area(&self) -> f64 {
        self.regions.iter().map(Region::area).sum()
    }
}

/// Erzeugt die polygon-basierte Voronoi-Partition.
/// Orchestriert die Schritte: Sampling, Punkt-Voronoi, Attributierung pro Owner,
/// Clipping an der Boundary und Reparatur.
pub struct PartitionBuilder<E = SpadeVoronoiEngine> {
    config: PartitionConfig,
    engine: E,
}

impl PartitionBuilder<SpadeVoronoiEngine> {
    pub fn new(config: PartitionConfig) -> BuildResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: SpadeVoronoiEngine::new(),
        })
    }
}

impl<E: PointVoronoiEngine> PartitionBuilder<E> {
    /// Ersetzt die Punkt-Voronoi-Implementierung
    pub fn with_engine<F: PointVoronoiEngine>(self, engine: F) -> PartitionBuilder<F> {
        PartitionBuilder {
            config: self.config,
            engine,
        }
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Führt einen kompletten Lauf aus.
    ///
    /// Fatal sind nur eine ungültige Boundary und eine Eingabe ohne verwertbare
    /// Vertices. Alles andere landet als Warnung im Ergebnis.
    pub fn build<K, A>(
        &self,
        polygons: &[InputPolygon<K, A>],
        boundary: &Polygon<f64>,
    ) -> BuildResult<PartitionResult<K, A>>
    where
        K: Clone + Eq + Hash + Debug,
        A: Clone,
    {
        let validation = PolygonValidator::new()
            .with_min_area(self.config.min_area)
            .validate(boundary);
        if !validation.is_valid {
            return Err(PartitionError::InvalidBoundary {
                reason: validation.summary(),
            });
        }

        if polygons.is_empty() {
            return Err(PartitionError::EmptyInput {
                reason: "no input polygons".to_string(),
            });
        }

        let mut warnings = Vec::new();

        // 1. Vertices sampeln
        log_stage(PipelineStage::Sampling);
        let points = VertexSampler::new()
            .with_densify(self.config.densify)
            .sample(polygons, &mut warnings);
        if points.is_empty() {
            return Err(PartitionError::EmptyInput {
                reason: format!("{} polygons yielded no usable vertex", polygons.len()),
            });
        }

        // 2. Punkt-Voronoi auf der gepaddeten Arbeitsfläche
        log_stage(PipelineStage::ComputingCells);
        let extent = self.working_extent(boundary, points.iter().map(|point| point.coord))?;
        let sites: Vec<Coord<f64>> = points.iter().map(|point| point.coord).collect();
        let cells = self.engine.compute_cells(&sites, &extent)?;
        if cells.len() != sites.len() {
            return Err(PartitionError::EngineContract {
                expected: sites.len(),
                actual: cells.len(),
            });
        }
        let raw_cells: Vec<RawCell<K>> = points
            .into_iter()
            .zip(cells)
            .map(|(point, geometry)| RawCell {
                owner: point.owner,
                geometry,
            })
            .collect();

        // 3. Zellen pro Owner vereinigen
        log_stage(PipelineStage::Attributing);
        let regions = CellAttributor::new()
            .with_min_area(self.config.min_area)
            .merge_cells(raw_cells, &mut warnings);

        // 4. An der Boundary abschneiden
        log_stage(PipelineStage::Clipping);
        let regions = BoundaryClipper::new(boundary)
            .with_min_area(self.config.min_area)
            .clip(regions, &mut warnings);

        // 5. Löcher entfernen
        log_stage(PipelineStage::Repairing);
        let regions = GeometryRepair::new().repair(regions, &mut warnings);

        let mut attributes: HashMap<&K, &A> = HashMap::new();
        for polygon in polygons {
            attributes
                .entry(&polygon.id)
                .or_insert(&polygon.attributes);
        }

        let regions: Vec<Region<K, A>> = regions
            .into_iter()
            .filter_map(|region| {
                let attributes = (*attributes.get(&region.owner)?).clone();
                Some(Region {
                    id: region.owner,
                    attributes,
                    geometry: region.geometry,
                })
            })
            .collect();

        log_stage(PipelineStage::Done);
        let result = PartitionResult { regions, warnings };
        info!(
            "PartitionBuilder: {} regions from {} polygons, total area {:.3}, {} warnings",
            result.len(),
            polygons.len(),
            result.total_area(),
            result.warnings.len()
        );
        Ok(result)
    }

    /// Bounding Box von Boundary und Punkten, gepaddet um einen Anteil der längeren Seite
    fn working_extent<I>(&self, boundary: &Polygon<f64>, points: I) -> BuildResult<Bounds2D>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let bounds = Bounds2D::from_points_iter(boundary.exterior().coords().copied().chain(points))
            .ok_or_else(|| PartitionError::EmptyInput {
                reason: "cannot derive a working extent".to_string(),
            })?;

        let padding = bounds.width().max(bounds.height()) * self.config.boundary_padding_factor;
        let extent = bounds.expand(padding);
        debug!(
            "PartitionBuilder: working extent {} (padding {:.3})",
            extent, padding
        );
        Ok(extent)
    }
}

fn log_stage(stage: PipelineStage) {
    debug!("PartitionBuilder: stage {}", stage);
}

/// Partition mit Standardkonfiguration und der spade-Engine
pub fn build_polygon_voronoi<K, A>(
    polygons: &[InputPolygon<K, A>],
    boundary: &Polygon<f64>,
) -> BuildResult<PartitionResult<K, A>>
where
    K: Clone + Eq + Hash + Debug,
    A: Clone,
{
    PartitionBuilder::new(PartitionConfig::default())?.build(polygons, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::voronoi::config::Spacing;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use geo::{BooleanOps, Centroid, Contains, LineString, polygon};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (x, y),
                (x + size, y),
                (x + size, y + size),
                (x, y + size),
                (x, y),
            ]),
            vec![],
        )
    }

    fn boundary() -> Polygon<f64> {
        square(0.0, 0.0, 4.0)
    }

    fn outside_area(geometry: &MultiPolygon<f64>, boundary: &Polygon<f64>) -> f64 {
        geometry
            .difference(&MultiPolygon::from(boundary.clone()))
            .unsigned_area()
    }

    fn two_clusters() -> Vec<InputPolygon<&'static str>> {
        vec![
            InputPolygon::new("low", square(0.9, 0.9, 0.2)),
            InputPolygon::new("high", square(2.9, 2.9, 0.2)),
        ]
    }

    #[test]
    fn test_two_clusters_split_along_bisector() {
        let result = build_polygon_voronoi(&two_clusters(), &boundary()).unwrap();

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result.get(&"low").unwrap().area(), 8.0, epsilon = 1e-6);
        assert_relative_eq!(result.get(&"high").unwrap().area(), 8.0, epsilon = 1e-6);
        assert!(result.warnings.is_empty());

        let low = &result.get(&"low").unwrap().geometry;
        assert!(low.contains(&geo::Point::new(0.5, 0.5)));
        assert!(!low.contains(&geo::Point::new(3.5, 3.5)));
    }

    #[test]
    fn test_regions_stay_inside_boundary_and_cover_it() {
        let boundary = boundary();
        let result = build_polygon_voronoi(&two_clusters(), &boundary).unwrap();

        for region in result.iter() {
            assert_abs_diff_eq!(outside_area(&region.geometry, &boundary), 0.0, epsilon = 1e-9);
        }
        assert_relative_eq!(result.total_area(), 16.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_polygon_equal_to_boundary() {
        let boundary = boundary();
        let polygons = vec![InputPolygon::new(1u32, boundary.clone())];

        let result = build_polygon_voronoi(&polygons, &boundary).unwrap();

        assert_eq!(result.len(), 1);
        let region = &result.regions[0];
        assert_eq!(region.id, 1);
        assert_relative_eq!(region.area(), 16.0, epsilon = 1e-9);
        let mismatch = region
            .geometry
            .xor(&MultiPolygon::from(boundary))
            .unsigned_area();
        assert_abs_diff_eq!(mismatch, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collapsed_ring_is_not_fatal() {
        let collapsed = polygon![
            (x: 3.0, y: 3.0),
            (x: 3.5, y: 3.0),
            (x: 3.0, y: 3.0),
        ];
        let polygons = vec![
            InputPolygon::new("ok", square(0.5, 0.5, 1.0)),
            InputPolygon::new("collapsed", collapsed),
        ];

        let result = build_polygon_voronoi(&polygons, &boundary()).unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.get(&"collapsed").unwrap().area() > 0.0);
        assert!(result.warnings.iter().any(|warning| matches!(
            warning,
            AttributionWarning::DegenerateRing {
                owner: "collapsed",
                distinct_vertices: 2
            }
        )));
        assert_relative_eq!(result.total_area(), 16.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let polygons: Vec<InputPolygon<u32>> = Vec::new();
        let result = build_polygon_voronoi(&polygons, &boundary());
        assert!(matches!(result, Err(PartitionError::EmptyInput { .. })));

        let nan = polygon![
            (x: f64::NAN, y: 0.0),
            (x: 1.0, y: f64::NAN),
            (x: f64::NAN, y: f64::NAN),
        ];
        let result = build_polygon_voronoi(&[InputPolygon::new(1u32, nan)], &boundary());
        assert!(matches!(result, Err(PartitionError::EmptyInput { .. })));
    }

    #[test]
    fn test_invalid_boundary_is_fatal() {
        let flat = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 8.0, y: 0.0),
        ];
        let result = build_polygon_voronoi(&two_clusters(), &flat);
        assert!(matches!(result, Err(PartitionError::InvalidBoundary { .. })));
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = PartitionConfig::new().with_padding_factor(0.0);
        assert!(matches!(
            PartitionBuilder::new(config),
            Err(PartitionError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_attributes_and_order_follow_input() {
        let polygons = vec![
            InputPolygon::with_attributes(5, square(0.5, 0.5, 0.5), "school"),
            InputPolygon::with_attributes(2, square(2.5, 0.5, 0.5), "house"),
            InputPolygon::with_attributes(9, square(1.5, 2.5, 0.5), "shop"),
            InputPolygon::with_attributes(5, square(3.0, 3.0, 0.5), "ignored"),
        ];

        let result = build_polygon_voronoi(&polygons, &boundary()).unwrap();

        let ids: Vec<i32> = result.iter().map(|region| region.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert_eq!(result.get(&5).unwrap().attributes, "school");
        assert_eq!(result.get(&9).unwrap().attributes, "shop");
        // Gleiche ID wird mit aufgelöst
        assert!(
            result
                .get(&5)
                .unwrap()
                .geometry
                .contains(&geo::Point::new(3.25, 3.25))
        );
    }

    #[test]
    fn test_clipping_again_is_a_fixed_point() {
        let boundary = boundary();
        let result = build_polygon_voronoi(&two_clusters(), &boundary).unwrap();
        let clipper = BoundaryClipper::new(&boundary);

        for region in result.iter() {
            let reclipped = clipper.clip_region(&region.geometry);
            let mismatch = reclipped.xor(&region.geometry).unsigned_area();
            assert_abs_diff_eq!(mismatch, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_enclosed_hole_is_removed() {
        let boundary = square(0.0, 0.0, 10.0);
        let polygons = vec![
            InputPolygon::new("yard", boundary.clone()),
            InputPolygon::new("shed", square(4.0, 4.0, 2.0)),
        ];
        let config = PartitionConfig::new().with_densify(Spacing::Fixed(1.0));

        let result = PartitionBuilder::new(config)
            .unwrap()
            .build(&polygons, &boundary)
            .unwrap();

        assert_eq!(result.len(), 2);
        for region in result.iter() {
            assert!(region.geometry.iter().all(|part| part.interiors().is_empty()));
        }
        assert_relative_eq!(result.get(&"yard").unwrap().area(), 100.0, epsilon = 1e-6);
        assert!(result.get(&"shed").unwrap().area() > 4.0);
    }

    #[test]
    fn test_densified_regions_lose_all_holes() {
        let boundary = square(0.0, 0.0, 100.0);
        let polygons = vec![
            InputPolygon::new(0, polygon![(x: 10.0, y: 10.0), (x: 30.0, y: 12.0), (x: 25.0, y: 40.0)]),
            InputPolygon::new(1, polygon![(x: 60.0, y: 5.0), (x: 95.0, y: 5.0), (x: 95.0, y: 30.0)]),
            InputPolygon::new(
                2,
                polygon![(x: 40.0, y: 60.0), (x: 70.0, y: 55.0), (x: 80.0, y: 90.0), (x: 45.0, y: 85.0)],
            ),
        ];

        for spacing in [Spacing::Fixed(0.5), Spacing::Auto] {
            let result = PartitionBuilder::new(PartitionConfig::new().with_densify(spacing))
                .unwrap()
                .build(&polygons, &boundary)
                .unwrap();

            assert_eq!(result.len(), 3, "{:?}", spacing);
            for region in result.iter() {
                assert!(
                    region.geometry.iter().all(|part| part.interiors().is_empty()),
                    "region {} keeps holes with {:?}",
                    region.id,
                    spacing
                );
            }
            assert!(
                !result
                    .warnings
                    .iter()
                    .any(|warning| matches!(warning, AttributionWarning::RepairFailed { .. })),
                "{:?}: {:?}",
                spacing,
                result.warnings
            );
        }
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::ComputingCells.to_string(), "ComputingCells");
        assert_eq!(PipelineStage::Done.to_string(), "Done");
    }

    struct MissingCellEngine;

    impl PointVoronoiEngine for MissingCellEngine {
        fn compute_cells(
            &self,
            sites: &[Coord<f64>],
            extent: &Bounds2D,
        ) -> BuildResult<Vec<Polygon<f64>>> {
            Ok(vec![extent.to_polygon(); sites.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_engine_breaking_one_to_one_is_fatal() {
        let builder = PartitionBuilder::new(PartitionConfig::default())
            .unwrap()
            .with_engine(MissingCellEngine);

        let result = builder.build(&two_clusters(), &boundary());

        assert!(matches!(
            result,
            Err(PartitionError::EngineContract {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_random_footprints_partition_the_block() {
        let mut rng = StdRng::seed_from_u64(42);
        let boundary = square(0.0, 0.0, 100.0);

        let mut polygons = Vec::new();
        for row in 0..5 {
            for col in 0..5 {
                let size = rng.random_range(1.0..4.0);
                let x = col as f64 * 20.0 + rng.random_range(2.0..14.0);
                let y = row as f64 * 20.0 + rng.random_range(2.0..14.0);
                polygons.push(InputPolygon::new(row * 5 + col, square(x, y, size)));
            }
        }

        let result = build_polygon_voronoi(&polygons, &boundary).unwrap();

        assert_eq!(result.len(), 25);
        assert!(result.warnings.is_empty());
        assert_relative_eq!(result.total_area(), 10_000.0, max_relative = 1e-6);
        for (polygon, region) in polygons.iter().zip(result.iter()) {
            assert_eq!(polygon.id, region.id);
            assert_abs_diff_eq!(outside_area(&region.geometry, &boundary), 0.0, epsilon = 1e-6);
            let center = polygon.geometry.centroid().unwrap();
            assert!(region.geometry.contains(&center));
        }

        // Paarweise überlappungsfrei
        for (i, a) in result.regions.iter().enumerate() {
            for b in &result.regions[i + 1..] {
                let overlap = a.geometry.intersection(&b.geometry).unsigned_area();
                assert!(overlap < 1e-5, "regions {} and {} overlap by {}", a.id, b.id, overlap);
            }
        }
    }
}
