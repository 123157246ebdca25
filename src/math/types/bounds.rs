// src/math/types/bounds.rs

use geo::{Coord, LineString, Polygon};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Coord<f64>,
    pub max: Coord<f64>,
}

impl Bounds2D {
    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Coord<f64>, p2: Coord<f64>) -> Self {
        Self {
            min: Coord {
                x: p1.x.min(p2.x),
                y: p1.y.min(p2.y),
            },
            max: Coord {
                x: p1.x.max(p2.x),
                y: p1.y.max(p2.y),
            },
        }
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut bounds = Self {
            min: first_point,
            max: first_point,
        };
        for point in points_iter {
            bounds.expand_to_include_point(point);
        }

        Some(bounds)
    }

    /// Prüft ob die Bounding Box leer ist
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Coord<f64> {
        (self.min + self.max) * 0.5
    }

    /// Länge der Diagonale
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Erweitert die Bounding Box um einen Punkt
    pub fn expand_to_include_point(&mut self, point: Coord<f64>) {
        if self.is_empty() {
            self.min = point;
            self.max = point;
        } else {
            self.min.x = self.min.x.min(point.x);
            self.min.y = self.min.y.min(point.y);
            self.max.x = self.max.x.max(point.x);
            self.max.y = self.max.y.max(point.y);
        }
    }

    /// Erweitert die Bounding Box um einen Margin
    pub fn expand(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }

        Self {
            min: Coord {
                x: self.min.x - margin,
                y: self.min.y - margin,
            },
            max: Coord {
                x: self.max.x + margin,
                y: self.max.y + margin,
            },
        }
    }

    /// Erzeugt die vier Eckpunkte der Bounding Box (CCW)
    pub fn corners(&self) -> [Coord<f64>; 4] {
        [
            self.min, // unten links
            Coord {
                x: self.max.x,
                y: self.min.y,
            }, // unten rechts
            self.max, // oben rechts
            Coord {
                x: self.min.x,
                y: self.max.y,
            }, // oben links
        ]
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.corners().to_vec()), vec![])
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Bounds2D(empty)")
        } else {
            write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
        }
    }
}
