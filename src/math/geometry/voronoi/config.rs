// src/math/geometry/voronoi/config.rs
use crate::math::{
    error::{BuildResult, PartitionError},
    utils::constants,
};
use serde::{Deserialize, Serialize};

/// Abstand der zusätzlich eingefügten Vertices beim Verdichten der Ringe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Spacing {
    /// Ein Viertel des kleinsten Abstands zwischen zwei gesampelten Vertices.
    Auto,
    /// Fester Abstand in Koordinateneinheiten.
    Fixed(f64),
}

/// Konfiguration für die Erzeugung einer polygon-basierten Voronoi-Partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Faktor, wie weit die Punkt-Voronoi-Berechnung über Boundary und Punkte hinausgeht
    /// (bezogen auf die längere Seite der Bounding Box).
    pub boundary_padding_factor: f64,
    /// Optionales Verdichten der äußeren Ringe vor dem Sampling.
    pub densify: Option<Spacing>,
    /// Flächen bis einschließlich dieses Werts gelten als Null.
    pub min_area: f64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            boundary_padding_factor: 0.15,
            densify: None,
            min_area: constants::EPSILON,
        }
    }
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding_factor(mut self, factor: f64) -> Self {
        self.boundary_padding_factor = factor;
        self
    }

    pub fn with_densify(mut self, spacing: Spacing) -> Self {
        self.densify = Some(spacing);
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn validate(&self) -> BuildResult<()> {
        if !self.boundary_padding_factor.is_finite() || self.boundary_padding_factor <= 0.0 {
            return Err(PartitionError::InvalidConfiguration {
                message: format!(
                    "Boundary padding factor must be finite and positive, got {}",
                    self.boundary_padding_factor
                ),
            });
        }
        if let Some(Spacing::Fixed(spacing)) = self.densify {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(PartitionError::InvalidConfiguration {
                    message: format!("Densify spacing must be finite and positive, got {}", spacing),
                });
            }
        }
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(PartitionError::InvalidConfiguration {
                message: format!("Minimum area must be finite and >= 0, got {}", self.min_area),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PartitionConfig::default().validate().is_ok());
        assert!(
            PartitionConfig::new()
                .with_densify(Spacing::Auto)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            PartitionConfig::new().with_padding_factor(0.0),
            PartitionConfig::new().with_padding_factor(f64::NAN),
            PartitionConfig::new().with_densify(Spacing::Fixed(-1.0)),
            PartitionConfig::new().with_densify(Spacing::Fixed(f64::INFINITY)),
            PartitionConfig::new().with_min_area(-1.0),
        ];
        for config in bad {
            assert!(
                matches!(
                    config.validate(),
                    Err(PartitionError::InvalidConfiguration { .. })
                ),
                "{:?} should be rejected",
                config
            );
        }
    }
}
