//! A single photon travelling around the mass
//!
//! Position is kept in polar coordinates centred on the mass, the rendered
//! history in Cartesian world coordinates.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::DVec2;
use log::debug;

use crate::error::{LensingError, LensingResult};
use crate::geodesic::{self, GeodesicState, Stage};
use crate::mass::MassDescriptor;

/// Default escape radius in metres.
pub const DEFAULT_MAX_DISTANCE: f64 = 2.0e11;

/// Default number of points kept in a trail.
pub const DEFAULT_MAX_TRAIL_LENGTH: usize = 500;

/// Largest coordinate magnitude a trail point may take.
///
/// Half of `f32::MAX`, so every point stays finite in single precision and
/// never collides with the strip restart marker.
pub const MAX_COORDINATE: f64 = f32::MAX as f64 / 2.0;

/// Where a ray is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayStatus {
    InFlight,
    /// Fell below the Schwarzschild radius.
    Captured,
    /// Left the escape radius.
    Escaped,
    /// Integration produced a non-finite state.
    Unstable,
}

#[derive(Debug, Clone)]
pub struct Ray {
    state: GeodesicState,
    energy: f64,
    angular_momentum: f64,
    status: RayStatus,
    trail: VecDeque<DVec2>,
    max_trail_length: usize,
    max_distance: f64,
    mass: Arc<MassDescriptor>,
}

impl Ray {
    /// Spawn a photon at `position` heading along `direction`.
    ///
    /// The direction is rotated into the local polar frame without being
    /// normalised, its magnitude sets the speed in λ.
    pub fn new(
        position: DVec2,
        direction: DVec2,
        mass: Arc<MassDescriptor>,
        max_distance: f64,
        max_trail_length: usize,
    ) -> LensingResult<Self> {
        if !position.is_finite() {
            return Err(LensingError::NonFiniteInput { what: "ray position" });
        }
        if !direction.is_finite() {
            return Err(LensingError::NonFiniteInput { what: "ray direction" });
        }
        if direction == DVec2::ZERO {
            return Err(LensingError::ZeroDirection);
        }
        let extent = position.abs().max_element();
        if extent > MAX_COORDINATE {
            return Err(LensingError::OutOfRange {
                what: "ray position",
                value: extent,
            });
        }
        if !(max_distance > 0.0 && max_distance <= MAX_COORDINATE) {
            return Err(LensingError::InvalidMaxDistance { max_distance });
        }
        if max_trail_length == 0 {
            return Err(LensingError::InvalidTrailLength);
        }

        let offset = position - mass.position();
        let r = offset.length();
        if r == 0.0 {
            return Err(LensingError::SpawnAtOrigin);
        }
        if mass.is_inside_horizon(position) {
            return Err(LensingError::InsideHorizon {
                r,
                schwarzschild_radius: mass.schwarzschild_radius(),
            });
        }

        let phi = offset.y.atan2(offset.x);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let dr = direction.x * cos_phi + direction.y * sin_phi;
        let dphi = (-direction.x * sin_phi + direction.y * cos_phi) / r;
        let state = GeodesicState::new(r, phi, dr, dphi);

        let mut trail = VecDeque::with_capacity(max_trail_length.min(DEFAULT_MAX_TRAIL_LENGTH) + 1);
        trail.push_back(position);

        Ok(Self {
            state,
            energy: geodesic::energy(&state, mass.schwarzschild_radius()),
            angular_momentum: geodesic::angular_momentum(&state),
            status: RayStatus::InFlight,
            trail,
            max_trail_length,
            max_distance,
            mass,
        })
    }

    /// Advance the photon by `dλ`, or drain one trail point once it is done.
    pub fn step(&mut self, d_lambda: f64) {
        let r = self.state.r;
        let rs = self.mass.schwarzschild_radius();

        if !self.is_alive() || r < rs || r > self.max_distance {
            self.trail.pop_front();
            if self.is_alive() {
                self.status = if r < rs {
                    RayStatus::Captured
                } else {
                    RayStatus::Escaped
                };
                debug!("ray {:?} at r = {:.4e} (rs = {:.4e})", self.status, r, rs);
            }
            return;
        }

        let Some(next) = geodesic::rk4_step(&self.snapshot_for_stage(), d_lambda) else {
            self.status = RayStatus::Unstable;
            debug!("ray integration diverged from r = {:.4e}, retiring it", r);
            return;
        };
        // overshot through the centre; the mirrored point is never drawn
        if next.r <= 0.0 {
            self.status = RayStatus::Captured;
            debug!("ray stepped through the centre from r = {:.4e}", r);
            return;
        }
        let position = self.world_position(&next);
        if position.abs().max_element() > MAX_COORDINATE {
            self.status = RayStatus::Escaped;
            debug!("ray left the world range from r = {:.4e}", r);
            return;
        }
        self.state = next;

        self.trail.push_back(position);
        if self.trail.len() > self.max_trail_length {
            self.trail.pop_front();
        }
    }

    /// Scalar state and fixed quantities for evaluating Runge-Kutta stages.
    pub fn snapshot_for_stage(&self) -> Stage<'_> {
        Stage {
            state: self.state,
            energy: self.energy,
            angular_momentum: self.angular_momentum,
            mass: &self.mass,
        }
    }

    /// Current Cartesian position in world coordinates.
    pub fn position(&self) -> DVec2 {
        self.world_position(&self.state)
    }

    fn world_position(&self, state: &GeodesicState) -> DVec2 {
        let (sin_phi, cos_phi) = state.phi.sin_cos();
        self.mass.position() + DVec2::new(cos_phi, sin_phi) * state.r
    }

    pub fn state(&self) -> GeodesicState {
        self.state
    }

    pub fn r(&self) -> f64 {
        self.state.r
    }

    pub fn phi(&self) -> f64 {
        self.state.phi
    }

    pub fn dr(&self) -> f64 {
        self.state.dr
    }

    pub fn dphi(&self) -> f64 {
        self.state.dphi
    }

    /// `E` captured at spawn.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// `L` captured at spawn.
    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    /// `E` recomputed from the current state.
    pub fn current_energy(&self) -> f64 {
        geodesic::energy(&self.state, self.mass.schwarzschild_radius())
    }

    /// `L` recomputed from the current state.
    pub fn current_angular_momentum(&self) -> f64 {
        geodesic::angular_momentum(&self.state)
    }

    pub fn status(&self) -> RayStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == RayStatus::InFlight
    }

    /// Trail points, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn max_trail_length(&self) -> usize {
        self.max_trail_length
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn mass(&self) -> &MassDescriptor {
        &self.mass
    }
}
