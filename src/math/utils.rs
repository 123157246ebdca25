// src/math/utils.rs

pub mod constants {
    pub const EPSILON: f64 = 1e-10;
    pub const EPSILON_SQUARED: f64 = EPSILON * EPSILON; // Für Vergleiche mit quadrierten Längen
    /// Abstand der Rahmen-Sites zur Arbeitsfläche, als Vielfaches der Diagonale.
    pub const FRAME_DISTANCE_FACTOR: f64 = 4.0;
    /// Anteil des minimalen Vertex-Abstands für `Spacing::Auto`.
    pub const AUTO_SPACING_FACTOR: f64 = 0.25;
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use super::constants;
    use geo::Coord;

    pub fn distance_sq(p1: Coord<f64>, p2: Coord<f64>) -> f64 {
        (p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)
    }

    pub fn distance(p1: Coord<f64>, p2: Coord<f64>) -> f64 {
        distance_sq(p1, p2).sqrt()
    }

    /// Prüft ob zwei Koordinaten (nahezu) zusammenfallen
    pub fn coords_coincide(a: Coord<f64>, b: Coord<f64>) -> bool {
        distance_sq(a, b) <= constants::EPSILON_SQUARED
    }

    /// Kreuzprodukt von (edge_end - edge_start) und (point - edge_start).
    /// Positiv, wenn `point` links der gerichteten Kante liegt.
    pub fn cross_product_2d(edge_start: Coord<f64>, edge_end: Coord<f64>, point: Coord<f64>) -> f64 {
        (edge_end.x - edge_start.x) * (point.y - edge_start.y)
            - (edge_end.y - edge_start.y) * (point.x - edge_start.x)
    }

    /// Schnittpunkt der Geraden durch (p1, p2) und (p3, p4).
    /// `None` bei (nahezu) parallelen Geraden.
    pub fn line_intersection(
        p1: Coord<f64>,
        p2: Coord<f64>,
        p3: Coord<f64>,
        p4: Coord<f64>,
    ) -> Option<Coord<f64>> {
        let d1 = p2 - p1;
        let d2 = p4 - p3;

        let denominator = d1.x * d2.y - d1.y * d2.x;
        if denominator.abs() < constants::EPSILON {
            return None;
        }

        let t = ((p3.x - p1.x) * d2.y - (p3.y - p1.y) * d2.x) / denominator;
        Some(p1 + d1 * t)
    }
}
