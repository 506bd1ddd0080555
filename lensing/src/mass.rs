//! Point-mass descriptor for a non-rotating black hole

use common::constants::SCHWARZSCHILD_COEFF;
use glam::DVec2;

use crate::error::{LensingError, LensingResult};

/// Mass of Sagittarius A* in kilograms.
pub const SAGITTARIUS_A_MASS: f64 = 8.54e36;

/// Schwarzschild black hole
///
/// The horizon radius is derived once at construction; the descriptor is
/// immutable afterwards and shared read-only by every ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassDescriptor {
    position: DVec2,
    mass: f64,
    schwarzschild_radius: f64,
}

impl MassDescriptor {
    pub fn new(position: DVec2, mass: f64) -> LensingResult<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(LensingError::InvalidMass { mass });
        }
        if !position.is_finite() {
            return Err(LensingError::NonFiniteInput { what: "mass position" });
        }

        Ok(Self {
            position,
            mass,
            // rs = 2GM/c²
            schwarzschild_radius: SCHWARZSCHILD_COEFF * mass,
        })
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn schwarzschild_radius(&self) -> f64 {
        self.schwarzschild_radius
    }

    /// Radius of the unstable circular photon orbit, 1.5 rs.
    pub fn photon_sphere_radius(&self) -> f64 {
        1.5 * self.schwarzschild_radius
    }

    /// Check if a point is inside the event horizon
    pub fn is_inside_horizon(&self, point: DVec2) -> bool {
        (point - self.position).length() <= self.schwarzschild_radius
    }
}

impl Default for MassDescriptor {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            mass: SAGITTARIUS_A_MASS,
            schwarzschild_radius: SCHWARZSCHILD_COEFF * SAGITTARIUS_A_MASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derives_schwarzschild_radius() {
        let bh = MassDescriptor::new(DVec2::new(3.0, -4.0), SAGITTARIUS_A_MASS).unwrap();
        assert_relative_eq!(bh.schwarzschild_radius(), 1.2683e10, max_relative = 1e-3);
        assert_relative_eq!(bh.photon_sphere_radius(), 1.5 * bh.schwarzschild_radius());
        assert_eq!(bh, MassDescriptor { position: DVec2::new(3.0, -4.0), ..MassDescriptor::default() });
    }

    #[test]
    fn rejects_non_positive_mass() {
        assert!(matches!(
            MassDescriptor::new(DVec2::ZERO, 0.0),
            Err(LensingError::InvalidMass { .. })
        ));
        assert!(matches!(
            MassDescriptor::new(DVec2::ZERO, -1.0e30),
            Err(LensingError::InvalidMass { .. })
        ));
        assert!(matches!(
            MassDescriptor::new(DVec2::ZERO, f64::NAN),
            Err(LensingError::InvalidMass { .. })
        ));
    }

    #[test]
    fn horizon_test_is_relative_to_position() {
        let bh = MassDescriptor::new(DVec2::new(1.0e11, 0.0), SAGITTARIUS_A_MASS).unwrap();
        assert!(bh.is_inside_horizon(DVec2::new(1.0e11 + 1.0e9, 0.0)));
        assert!(!bh.is_inside_horizon(DVec2::ZERO));
    }
}
