// src/math/geometry/polygon/mod.rs
pub mod validation;

pub use validation::{CleanRing, PolygonValidator, ValidationError, ValidationResult};
