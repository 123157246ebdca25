// src/math/geometry/polygon/validation.rs

use crate::math::{types::*, utils::*};
use geo::{Area, LineString, Validation};
use thiserror::Error;

/// Bereinigter äußerer Ring: aufeinanderfolgende Duplikate und der
/// schließende Vertex sind entfernt, nicht-endliche Koordinaten übersprungen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanRing {
    pub vertices: Vec<Coord<f64>>,
    pub skipped_non_finite: usize,
}

impl CleanRing {
    pub fn from_ring(ring: &LineString<f64>) -> Self {
        let mut vertices: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
        let mut skipped_non_finite = 0;

        for &coord in ring.coords() {
            if !coord.x.is_finite() || !coord.y.is_finite() {
                skipped_non_finite += 1;
                continue;
            }
            if vertices
                .last()
                .is_some_and(|&last| simple_geometry::coords_coincide(last, coord))
            {
                continue;
            }
            vertices.push(coord);
        }

        // Schließender Vertex
        while vertices.len() > 1
            && simple_geometry::coords_coincide(vertices[0], vertices[vertices.len() - 1])
        {
            vertices.pop();
        }

        Self {
            vertices,
            skipped_non_finite,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Mindestens 3 verschiedene Vertices
    pub fn is_proper(&self) -> bool {
        self.vertices.len() >= 3
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("exterior ring has {count} distinct vertices, at least {minimum} required")]
    InsufficientVertices { count: usize, minimum: usize },

    #[error("vertex {vertex_index}: {reason}")]
    InvalidVertex { vertex_index: usize, reason: String },

    #[error("polygon encloses no area")]
    ZeroArea,

    #[error("{description}")]
    TopologicalError { description: String },
}

/// Validation-Ergebnisse
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Alle Fehler als eine Zeile, für Fehlermeldungen
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Polygon-Validator für die Clip-Boundary
pub struct PolygonValidator {
    min_area: f64,
}

impl PolygonValidator {
    pub fn new() -> Self {
        Self {
            min_area: constants::EPSILON,
        }
    }

    /// Flächen bis einschließlich `min_area` gelten als Null
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn validate(&self, polygon: &Polygon<f64>) -> ValidationResult {
        let mut errors = Vec::new();

        self.validate_vertices(polygon, &mut errors);
        let ring = CleanRing::from_ring(polygon.exterior());
        if !ring.is_proper() {
            errors.push(ValidationError::InsufficientVertices {
                count: ring.len(),
                minimum: 3,
            });
        }

        // Weitere Checks sind auf kaputten Koordinaten sinnlos
        if errors.is_empty() {
            if polygon.unsigned_area() <= self.min_area {
                errors.push(ValidationError::ZeroArea);
            } else if !polygon.is_valid() {
                errors.push(ValidationError::TopologicalError {
                    description: "polygon is not topologically valid (self-intersection or misplaced hole)"
                        .to_string(),
                });
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn validate_vertices(&self, polygon: &Polygon<f64>, errors: &mut Vec<ValidationError>) {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for (i, vertex) in rings.flat_map(|ring| ring.coords()).enumerate() {
            if !vertex.x.is_finite() || !vertex.y.is_finite() {
                errors.push(ValidationError::InvalidVertex {
                    vertex_index: i,
                    reason: "Non-finite coordinates".to_string(),
                });
            }
        }
    }
}

impl Default for PolygonValidator {
    fn default() -> Self {
        Self::new()
    }
}
