// src/math/geometry/voronoi/sampler.rs

use super::config::Spacing;
use crate::math::{
    error::AttributionWarning,
    geometry::polygon::CleanRing,
    types::*,
    utils::{constants, simple_geometry},
};
use spade::{DelaunayTriangulation, Triangulation};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Obergrenze für eingefügte Vertices pro Kante beim Verdichten
const MAX_DENSIFY_STEPS: usize = 10_000;

/// Ein Eingabe-Polygon (z.B. ein Gebäudegrundriss) mit eindeutiger ID
/// und optionaler Attribut-Nutzlast.
#[derive(Debug, Clone, PartialEq)]
pub struct InputPolygon<K, A = ()> {
    pub id: K,
    pub geometry: Polygon<f64>,
    pub attributes: A,
}

impl<K> InputPolygon<K> {
    pub fn new(id: K, geometry: Polygon<f64>) -> Self {
        Self {
            id,
            geometry,
            attributes: (),
        }
    }
}

impl<K, A> InputPolygon<K, A> {
    pub fn with_attributes(id: K, geometry: Polygon<f64>, attributes: A) -> Self {
        Self {
            id,
            geometry,
            attributes,
        }
    }
}

/// Ein gesampelter Vertex mit dem Polygon, zu dem er gehört.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPoint<K> {
    pub coord: Coord<f64>,
    pub owner: K,
}

/// Extrahiert die Vertices der äußeren Ringe und taggt sie mit ihrem Owner.
/// Löcher werden nicht gesampelt.
#[derive(Debug, Clone, Default)]
pub struct VertexSampler {
    densify: Option<Spacing>,
}

impl VertexSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdichtet die Ringe vor dem Sampling
    pub fn with_densify(mut self, spacing: Option<Spacing>) -> Self {
        self.densify = spacing;
        self
    }

    /// Sampelt alle Polygone in Eingabereihenfolge.
    /// Degenerierte Ringe werden mit dem gesampelt, was übrig bleibt, und als Warnung gemeldet.
    pub fn sample<K, A>(
        &self,
        polygons: &[InputPolygon<K, A>],
        warnings: &mut Vec<AttributionWarning<K>>,
    ) -> Vec<TaggedPoint<K>>
    where
        K: Clone + Debug,
    {
        let mut rings = Vec::with_capacity(polygons.len());

        for polygon in polygons {
            let ring = CleanRing::from_ring(polygon.geometry.exterior());

            if ring.skipped_non_finite > 0 {
                warn!(
                    "VertexSampler: polygon {:?} has {} non-finite vertices, skipping them",
                    polygon.id, ring.skipped_non_finite
                );
                warnings.push(AttributionWarning::NonFiniteVertices {
                    owner: polygon.id.clone(),
                    skipped: ring.skipped_non_finite,
                });
            }

            if ring.is_empty() {
                warn!(
                    "VertexSampler: polygon {:?} has no usable vertex and is dropped",
                    polygon.id
                );
                warnings.push(AttributionWarning::NoUsableVertices {
                    owner: polygon.id.clone(),
                });
                continue;
            }

            if !ring.is_proper() {
                warn!(
                    "VertexSampler: polygon {:?} collapsed to {} distinct vertices",
                    polygon.id,
                    ring.len()
                );
                warnings.push(AttributionWarning::DegenerateRing {
                    owner: polygon.id.clone(),
                    distinct_vertices: ring.len(),
                });
            }

            rings.push((&polygon.id, ring.vertices));
        }

        let spacing = match self.densify {
            None => None,
            Some(Spacing::Fixed(spacing)) => Some(spacing),
            Some(Spacing::Auto) => {
                let spacing = minimum_distance(rings.iter().flat_map(|(_, v)| v.iter().copied()))
                    .map(|d| d * constants::AUTO_SPACING_FACTOR);
                debug!("VertexSampler: auto densify spacing = {:?}", spacing);
                spacing
            }
        };

        let mut points = Vec::new();
        for (owner, vertices) in rings {
            let vertices = match spacing {
                Some(spacing) => densify_ring(&vertices, spacing),
                None => vertices,
            };
            points.extend(vertices.into_iter().map(|coord| TaggedPoint {
                coord,
                owner: owner.clone(),
            }));
        }

        debug!(
            "VertexSampler: {} tagged points from {} polygons",
            points.len(),
            polygons.len()
        );
        points
    }
}

/// Kleinster Abstand ungleich Null zwischen zwei Punkten.
/// Der nächste Nachbar jedes Punkts ist ein Delaunay-Nachbar, deshalb reichen die Kanten der Triangulation.
pub fn minimum_distance<I>(points: I) -> Option<f64>
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut triangulation = DelaunayTriangulation::<SpadePoint>::new();
    for point in points {
        if let Err(error) = triangulation.insert(coord_to_spade(point)) {
            debug!("minimum_distance: skipping {:?}: {}", point, error);
        }
    }

    triangulation
        .undirected_edges()
        .map(|edge| {
            let [from, to] = edge.vertices();
            simple_geometry::distance(spade_to_coord(from.position()), spade_to_coord(to.position()))
        })
        .filter(|&distance| distance > 0.0)
        .min_by(f64::total_cmp)
}

/// Fügt entlang jeder Kante alle `spacing` Einheiten einen Vertex ein.
/// Ringe mit mindestens 3 Vertices gelten als geschlossen, kürzere als offene Linie.
pub fn densify_ring(vertices: &[Coord<f64>], spacing: f64) -> Vec<Coord<f64>> {
    if vertices.len() < 2 || !spacing.is_finite() || spacing <= 0.0 {
        return vertices.to_vec();
    }

    let closed = vertices.len() >= 3;
    let edge_count = if closed {
        vertices.len()
    } else {
        vertices.len() - 1
    };

    let mut densified = Vec::with_capacity(vertices.len());
    for i in 0..edge_count {
        let start = vertices[i];
        let end = vertices[(i + 1) % vertices.len()];
        densified.push(start);

        let length = simple_geometry::distance(start, end);
        let mut steps = (length / spacing).ceil() as usize;
        if steps > MAX_DENSIFY_STEPS {
            warn!(
                "densify_ring: edge of length {} needs {} steps at spacing {}, clamping to {}",
                length, steps, spacing, MAX_DENSIFY_STEPS
            );
            steps = MAX_DENSIFY_STEPS;
        }
        let step_length = length / steps.max(1) as f64;

        for k in 1..steps {
            let t = (k as f64 * step_length) / length;
            densified.push(start + (end - start) * t);
        }
    }
    if !closed {
        densified.push(vertices[vertices.len() - 1]);
    }

    densified
}
