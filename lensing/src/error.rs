//! Error types for the lensing engine

use thiserror::Error;

/// Result alias for engine operations.
pub type LensingResult<T> = Result<T, LensingError>;

/// Precondition violations raised when creating masses or spawning rays.
///
/// Numerical trouble during integration never surfaces here; an unstable ray
/// is retired in place instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LensingError {
    #[error("mass must be finite and positive, got {mass}")]
    InvalidMass { mass: f64 },
    #[error("cannot spawn a ray at the centre of the mass (polar angle undefined)")]
    SpawnAtOrigin,
    #[error("spawn radius {r} is inside the Schwarzschild radius {schwarzschild_radius}")]
    InsideHorizon { r: f64, schwarzschild_radius: f64 },
    #[error("{what} must be finite")]
    NonFiniteInput { what: &'static str },
    #[error("ray direction must be non-zero")]
    ZeroDirection,
    #[error("{what} {value:e} is beyond the representable world range")]
    OutOfRange { what: &'static str, value: f64 },
    #[error("trail length must be at least one point")]
    InvalidTrailLength,
    #[error("escape distance must be positive and within the world range, got {max_distance}")]
    InvalidMaxDistance { max_distance: f64 },
}
