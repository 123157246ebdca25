// src/math/geometry/voronoi/triangulation.rs

use crate::math::{error::BuildResult, types::*, utils::*};
use geo::{Area, LineString};
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Triangulation};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Punkt-Voronoi-Primitiv: eine Zelle pro Site, 1:1 in Eingabereihenfolge,
/// beschnitten auf `extent`. Degenerierte Eingaben (kollinear, doppelt) liefern
/// trotzdem eine (ggf. leere) Zelle pro Site statt eines Fehlers.
pub trait PointVoronoiEngine {
    fn compute_cells(
        &self,
        sites: &[Coord<f64>],
        extent: &Bounds2D,
    ) -> BuildResult<Vec<Polygon<f64>>>;
}

/// Voronoi-Zelle eines gesampelten Vertex, Owner vom Generatorpunkt geerbt
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell<K> {
    pub owner: K,
    pub geometry: Polygon<f64>,
}

impl<K> RawCell<K> {
    /// Leere oder degenerierte Zelle (weniger als 3 Vertices oder keine Fläche)
    pub fn is_empty(&self) -> bool {
        self.geometry.exterior().0.len() < 4 || self.geometry.unsigned_area() <= 0.0
    }
}

pub fn empty_polygon() -> Polygon<f64> {
    Polygon::new(LineString::new(vec![]), vec![])
}

/// Punkt-Voronoi über eine Delaunay-Triangulation von spade.
///
/// Vier Rahmen-Sites weit außerhalb der Arbeitsfläche sorgen dafür, dass jede
/// echte Zelle beschränkt ist. Die Zellen sind die Umkreismittelpunkte der
/// angrenzenden Dreiecke, nach Winkel sortiert und per Sutherland-Hodgman auf
/// die Arbeitsfläche geclippt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeVoronoiEngine;

impl SpadeVoronoiEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rahmen-Sites: Abstand zur Arbeitsfläche größer als deren Diagonale,
    /// damit kein Punkt der Fläche einer Rahmen-Site zugeordnet wird.
    fn frame_sites(extent: &Bounds2D) -> [Coord<f64>; 4] {
        let center = extent.center();
        let reach = extent.diagonal().max(1.0) * constants::FRAME_DISTANCE_FACTOR;
        [
            Coord {
                x: center.x - reach,
                y: center.y - reach,
            },
            Coord {
                x: center.x + reach,
                y: center.y - reach,
            },
            Coord {
                x: center.x + reach,
                y: center.y + reach,
            },
            Coord {
                x: center.x - reach,
                y: center.y + reach,
            },
        ]
    }

    fn cell_polygon(
        triangulation: &DelaunayTriangulation<SpadePoint>,
        handle: FixedVertexHandle,
        extent: &Bounds2D,
    ) -> Polygon<f64> {
        let vertex_handle = triangulation.vertex(handle);
        let generator = spade_to_coord(vertex_handle.position());

        let mut circumcenters = Vec::new();
        for edge in vertex_handle.out_edges() {
            match edge.face().as_inner() {
                Some(face) => circumcenters.push(spade_to_coord(face.circumcenter())),
                None => {
                    // Liegt auf der konvexen Hülle, also außerhalb des Rahmens
                    warn!(
                        "SpadeVoronoiEngine: site {:?} lies outside the working frame, cell left empty",
                        generator
                    );
                    return empty_polygon();
                }
            }
        }
        circumcenters.retain(|c| c.x.is_finite() && c.y.is_finite());

        // Sortiere Circumcenter um den Generator-Punkt
        circumcenters.sort_by(|a, b| {
            let angle_a = (a.y - generator.y).atan2(a.x - generator.x);
            let angle_b = (b.y - generator.y).atan2(b.x - generator.x);
            angle_a.total_cmp(&angle_b)
        });
        circumcenters.dedup_by(|a, b| simple_geometry::coords_coincide(*a, *b));

        if circumcenters.len() < 3 {
            return empty_polygon();
        }

        let clipped = clip_to_bounds(&circumcenters, extent);
        if clipped.len() < 3 {
            return empty_polygon();
        }
        Polygon::new(LineString::from(clipped), vec![])
    }
}

impl PointVoronoiEngine for SpadeVoronoiEngine {
    fn compute_cells(
        &self,
        sites: &[Coord<f64>],
        extent: &Bounds2D,
    ) -> BuildResult<Vec<Polygon<f64>>> {
        let mut triangulation = DelaunayTriangulation::<SpadePoint>::new();

        for frame_site in Self::frame_sites(extent) {
            if let Err(error) = triangulation.insert(coord_to_spade(frame_site)) {
                warn!(
                    "SpadeVoronoiEngine: frame site {:?} rejected: {}",
                    frame_site, error
                );
            }
        }

        // Doppelte Koordinaten landen auf demselben Vertex
        let handles: Vec<Option<FixedVertexHandle>> = sites
            .iter()
            .map(|&site| match triangulation.insert(coord_to_spade(site)) {
                Ok(handle) => Some(handle),
                Err(error) => {
                    warn!("SpadeVoronoiEngine: site {:?} rejected: {}", site, error);
                    None
                }
            })
            .collect();

        debug!(
            "SpadeVoronoiEngine: {} sites, {} distinct vertices (incl. frame), extent {}",
            sites.len(),
            triangulation.num_vertices(),
            extent
        );

        let mut cache: HashMap<FixedVertexHandle, Polygon<f64>> = HashMap::new();
        let cells = handles
            .into_iter()
            .map(|handle| match handle {
                Some(handle) => cache
                    .entry(handle)
                    .or_insert_with(|| Self::cell_polygon(&triangulation, handle, extent))
                    .clone(),
                None => empty_polygon(),
            })
            .collect();

        Ok(cells)
    }
}

/// Sutherland-Hodgman Clipping einer CCW-Zelle gegen eine Bounding Box
pub fn clip_to_bounds(vertices: &[Coord<f64>], bounds: &Bounds2D) -> Vec<Coord<f64>> {
    let corners = bounds.corners();
    let mut clipped = vertices.to_vec();

    for i in 0..corners.len() {
        if clipped.is_empty() {
            break;
        }
        let edge_start = corners[i];
        let edge_end = corners[(i + 1) % corners.len()];

        let input_vertices = std::mem::take(&mut clipped);
        let is_inside =
            |point: Coord<f64>| simple_geometry::cross_product_2d(edge_start, edge_end, point) >= 0.0;

        let mut s = input_vertices[input_vertices.len() - 1];
        for e in input_vertices {
            if is_inside(e) {
                if !is_inside(s) {
                    if let Some(intersection) =
                        simple_geometry::line_intersection(s, e, edge_start, edge_end)
                    {
                        clipped.push(intersection);
                    }
                }
                clipped.push(e);
            } else if is_inside(s) {
                if let Some(intersection) =
                    simple_geometry::line_intersection(s, e, edge_start, edge_end)
                {
                    clipped.push(intersection);
                }
            }
            s = e;
        }
    }

    clipped.dedup_by(|a, b| simple_geometry::coords_coincide(*a, *b));
    while clipped.len() > 1
        && simple_geometry::coords_coincide(clipped[0], clipped[clipped.len() - 1])
    {
        clipped.pop();
    }
    clipped
}
