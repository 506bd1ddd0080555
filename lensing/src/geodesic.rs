//! Schwarzschild null geodesics in the equatorial plane
//!
//! The state vector is `(r, φ, dr/dλ, dφ/dλ)`. The time component never
//! appears explicitly: `dt/dλ = E / f` with `f = 1 - rs/r` and the photon's
//! conserved energy `E`.

use std::ops::{Add, Mul};

use crate::mass::MassDescriptor;

/// Scalar polar state of a photon, or its derivative with respect to λ.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeodesicState {
    pub r: f64,
    pub phi: f64,
    pub dr: f64,
    pub dphi: f64,
}

impl GeodesicState {
    pub fn new(r: f64, phi: f64, dr: f64, dphi: f64) -> Self {
        Self { r, phi, dr, dphi }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.phi.is_finite() && self.dr.is_finite() && self.dphi.is_finite()
    }
}

impl Add for GeodesicState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            phi: self.phi + rhs.phi,
            dr: self.dr + rhs.dr,
            dphi: self.dphi + rhs.dphi,
        }
    }
}

impl Mul<f64> for GeodesicState {
    type Output = Self;

    fn mul(self, h: f64) -> Self {
        Self {
            r: self.r * h,
            phi: self.phi * h,
            dr: self.dr * h,
            dphi: self.dphi * h,
        }
    }
}

/// Read-only view of a ray used to evaluate one Runge-Kutta stage.
///
/// Carries only the scalar state plus the quantities fixed at spawn, so
/// intermediate stages never touch the authoritative ray or its trail.
#[derive(Debug, Clone, Copy)]
pub struct Stage<'a> {
    pub state: GeodesicState,
    pub energy: f64,
    pub angular_momentum: f64,
    pub mass: &'a MassDescriptor,
}

impl<'a> Stage<'a> {
    pub fn with_state(self, state: GeodesicState) -> Self {
        Self { state, ..self }
    }
}

/// Angular-momentum-like constant `L = r²·dφ/dλ`.
pub fn angular_momentum(state: &GeodesicState) -> f64 {
    state.r * state.r * state.dphi
}

/// Energy-like constant `E = f·dt/dλ`, with `dt/dλ` taken from the null condition
/// `f·ṫ² = ṙ²/f + r²φ̇²`.
pub fn energy(state: &GeodesicState, schwarzschild_radius: f64) -> f64 {
    let GeodesicState { r, dr, dphi, .. } = *state;
    let f = 1.0 - schwarzschild_radius / r;
    let dt_dlambda = ((dr * dr) / (f * f) + (r * r * dphi * dphi) / f).sqrt();
    f * dt_dlambda
}

/// Right-hand side of the geodesic equations at one stage.
pub fn geodesic_rhs(stage: &Stage) -> GeodesicState {
    let GeodesicState { r, dr, dphi, .. } = stage.state;
    let rs = stage.mass.schwarzschild_radius();
    let f = 1.0 - rs / r;
    let dt_dlambda = stage.energy / f;

    GeodesicState {
        r: dr,
        phi: dphi,
        dr: -(rs / (2.0 * r * r)) * f * (dt_dlambda * dt_dlambda)
            + (rs / (2.0 * r * r * f)) * (dr * dr)
            + (r - rs) * (dphi * dphi),
        dphi: -2.0 * dr * dphi / r,
    }
}

/// Classic RK4 step of size `dλ`.
///
/// Returns `None` when any component of the advanced state is NaN or
/// infinite; the caller must not commit such a state.
pub fn rk4_step(stage: &Stage, d_lambda: f64) -> Option<GeodesicState> {
    let y0 = stage.state;
    let half = d_lambda / 2.0;

    let k1 = geodesic_rhs(stage);
    let k2 = geodesic_rhs(&stage.with_state(y0 + k1 * half));
    let k3 = geodesic_rhs(&stage.with_state(y0 + k2 * half));
    let k4 = geodesic_rhs(&stage.with_state(y0 + k3 * d_lambda));

    let next = y0 + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (d_lambda / 6.0);
    next.is_finite().then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use glam::DVec2;

    fn unit_hole() -> MassDescriptor {
        // rs = 1 m
        MassDescriptor::new(DVec2::ZERO, 1.0 / common::constants::SCHWARZSCHILD_COEFF).unwrap()
    }

    fn stage(mass: &MassDescriptor, state: GeodesicState) -> Stage<'_> {
        Stage {
            state,
            energy: energy(&state, mass.schwarzschild_radius()),
            angular_momentum: angular_momentum(&state),
            mass,
        }
    }

    #[test]
    fn radial_photon_has_no_radial_acceleration() {
        let bh = unit_hole();
        let s = stage(&bh, GeodesicState::new(4.0, 0.3, -1.0, 0.0));
        let rhs = geodesic_rhs(&s);

        assert_eq!(rhs.r, -1.0);
        assert_eq!(rhs.phi, 0.0);
        assert_abs_diff_eq!(rhs.dr, 0.0, epsilon = 1e-12);
        assert_eq!(rhs.dphi, 0.0);
    }

    #[test]
    fn photon_sphere_is_an_equilibrium() {
        let bh = unit_hole();
        let r = bh.photon_sphere_radius();
        let s = stage(&bh, GeodesicState::new(r, 0.0, 0.0, 1.0 / r));
        let rhs = geodesic_rhs(&s);

        assert_abs_diff_eq!(rhs.dr, 0.0, epsilon = 1e-12);
        assert_eq!(rhs.dphi, 0.0);
    }

    #[test]
    fn rk4_matches_straight_line_far_from_mass() {
        // rs is negligible at r = 1e9, the photon should move on a straight line
        let bh = unit_hole();
        let start = DVec2::new(1.0e9, 0.0);
        let s = stage(&bh, GeodesicState::new(start.x, 0.0, 0.0, 1.0 / start.x));

        let next = rk4_step(&s, 1.0e6).unwrap();
        let end = DVec2::new(next.r * next.phi.cos(), next.r * next.phi.sin());

        assert_relative_eq!(end.x, 1.0e9, max_relative = 1e-6);
        assert_relative_eq!(end.y, 1.0e6, max_relative = 1e-3);
    }

    #[test]
    fn rk4_preserves_angular_momentum_over_one_step() {
        let bh = unit_hole();
        let s = stage(&bh, GeodesicState::new(20.0, 0.0, -0.6, 0.04));
        let next = rk4_step(&s, 0.01).unwrap();

        assert_relative_eq!(angular_momentum(&next), s.angular_momentum, max_relative = 1e-9);
        assert_relative_eq!(
            energy(&next, bh.schwarzschild_radius()),
            s.energy,
            max_relative = 1e-9
        );
    }

    #[test]
    fn rk4_rejects_non_finite_result() {
        let bh = unit_hole();
        // f = 0 on the horizon, every stage divides by it
        let s = Stage {
            state: GeodesicState::new(bh.schwarzschild_radius(), 0.0, -1.0, 0.0),
            energy: 1.0,
            angular_momentum: 0.0,
            mass: &bh,
        };

        assert!(rk4_step(&s, 0.1).is_none());
    }
}
