//! The set of live and fading rays around one mass

use std::f64::consts::PI;
use std::sync::Arc;

use glam::DVec2;

use crate::error::LensingResult;
use crate::mass::MassDescriptor;
use crate::ray::{Ray, RayStatus, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_TRAIL_LENGTH};

/// Lifecycle transitions seen during one `advance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceStats {
    pub captured: usize,
    pub escaped: usize,
    pub unstable: usize,
    /// Dead rays whose trail finished draining and were dropped.
    pub removed: usize,
}

impl AdvanceStats {
    fn record(&mut self, status: RayStatus) {
        match status {
            RayStatus::Captured => self.captured += 1,
            RayStatus::Escaped => self.escaped += 1,
            RayStatus::Unstable => self.unstable += 1,
            RayStatus::InFlight => {}
        }
    }
}

impl std::ops::AddAssign for AdvanceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.captured += rhs.captured;
        self.escaped += rhs.escaped;
        self.unstable += rhs.unstable;
        self.removed += rhs.removed;
    }
}

/// Owns every ray still worth drawing, in spawn order.
#[derive(Debug, Clone)]
pub struct Population {
    mass: Arc<MassDescriptor>,
    rays: Vec<Ray>,
    max_distance: f64,
    max_trail_length: usize,
}

impl Population {
    pub fn new(mass: MassDescriptor) -> Self {
        Self::with_defaults(mass, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_TRAIL_LENGTH)
    }

    /// Population whose spawns fall back to the given escape radius and trail capacity.
    pub fn with_defaults(mass: MassDescriptor, max_distance: f64, max_trail_length: usize) -> Self {
        Self {
            mass: Arc::new(mass),
            rays: Vec::new(),
            max_distance,
            max_trail_length,
        }
    }

    /// Construct a ray and append it. Nothing is added if construction fails.
    pub fn spawn(
        &mut self,
        position: DVec2,
        direction: DVec2,
        max_distance: Option<f64>,
        max_trail_length: Option<usize>,
    ) -> LensingResult<()> {
        let ray = Ray::new(
            position,
            direction,
            Arc::clone(&self.mass),
            max_distance.unwrap_or(self.max_distance),
            max_trail_length.unwrap_or(self.max_trail_length),
        )?;
        self.rays.push(ray);
        Ok(())
    }

    /// Spawn `count` rays from one point, directions evenly spaced around the circle.
    ///
    /// All-or-nothing: a rejected position adds no rays.
    pub fn spawn_burst(&mut self, position: DVec2, count: usize) -> LensingResult<()> {
        let burst = (0..count)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / count as f64;
                Ray::new(
                    position,
                    DVec2::new(angle.cos(), angle.sin()),
                    Arc::clone(&self.mass),
                    self.max_distance,
                    self.max_trail_length,
                )
            })
            .collect::<LensingResult<Vec<_>>>()?;

        self.rays.extend(burst);
        Ok(())
    }

    /// Step every ray, then drop the ones that are dead and fully drained.
    pub fn advance(&mut self, d_lambda: f64) -> AdvanceStats {
        let mut stats = AdvanceStats::default();
        for ray in &mut self.rays {
            let was_alive = ray.is_alive();
            ray.step(d_lambda);
            if was_alive && !ray.is_alive() {
                stats.record(ray.status());
            }
        }

        let before = self.rays.len();
        self.rays.retain(|ray| ray.is_alive() || ray.trail_len() > 0);
        stats.removed = before - self.rays.len();
        stats
    }

    pub fn clear(&mut self) {
        self.rays.clear();
    }

    pub fn count(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    pub fn ray_at(&self, index: usize) -> Option<&Ray> {
        self.rays.get(index)
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn alive_count(&self) -> usize {
        self.rays.iter().filter(|ray| ray.is_alive()).count()
    }

    pub fn mass(&self) -> &MassDescriptor {
        &self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LensingError;
    use approx::assert_relative_eq;

    #[test]
    fn rejected_spawn_adds_nothing() {
        let mut population = Population::new(MassDescriptor::default());
        let rs = population.mass().schwarzschild_radius();

        assert_eq!(
            population.spawn(DVec2::ZERO, DVec2::X, None, None),
            Err(LensingError::SpawnAtOrigin)
        );
        assert!(population.spawn(DVec2::new(0.0, rs), DVec2::X, None, None).is_err());
        assert!(population.is_empty());

        population.spawn(DVec2::new(5.0e10, 0.0), DVec2::Y, None, Some(7)).unwrap();
        assert_eq!(population.count(), 1);
        let ray = population.ray_at(0).unwrap();
        assert_eq!(ray.max_trail_length(), 7);
        assert_eq!(ray.max_distance(), DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn burst_fans_out_evenly() {
        let mut population = Population::new(MassDescriptor::default());
        population.spawn_burst(DVec2::new(-5.0e10, 0.0), 4).unwrap();

        assert_eq!(population.count(), 4);
        // heading straight out along +x from the negative axis means moving inward
        assert_relative_eq!(population.ray_at(0).unwrap().dr(), -1.0, max_relative = 1e-12);
        assert_relative_eq!(population.ray_at(2).unwrap().dr(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn burst_inside_horizon_is_all_or_nothing() {
        let mut population = Population::new(MassDescriptor::default());
        assert!(population.spawn_burst(DVec2::new(1.0e9, 0.0), 100).is_err());
        assert!(population.is_empty());
    }

    #[test]
    fn advance_keeps_dead_rays_until_drained() {
        let mut population = Population::with_defaults(MassDescriptor::default(), 2.0e11, 3);
        population.spawn(DVec2::new(5.0e10, 0.0), DVec2::Y, None, None).unwrap();
        population.spawn(DVec2::new(1.9e11, 0.0), DVec2::X, Some(1.9e11 + 2.5e8), None).unwrap();

        for _ in 0..3 {
            population.advance(1.0e8);
        }
        // the second ray has just crossed its escape radius
        assert_eq!(population.count(), 2);
        assert_eq!(population.alive_count(), 2);

        let stats = population.advance(1.0e8);
        assert_eq!(stats, AdvanceStats { escaped: 1, ..AdvanceStats::default() });
        assert_eq!(population.alive_count(), 1);
        assert_eq!(population.ray_at(1).unwrap().trail_len(), 2);

        population.advance(1.0e8);
        let stats = population.advance(1.0e8);
        assert_eq!(stats.removed, 1);
        assert_eq!(population.count(), 1);
        assert!(population.ray_at(0).unwrap().is_alive());
    }

    #[test]
    fn unstable_ray_is_counted_then_drained() {
        let mut population = Population::new(MassDescriptor::default());
        population.spawn(DVec2::new(5.0e10, 0.0), DVec2::Y, None, None).unwrap();
        population.advance(1.0e8);

        let stats = population.advance(f64::NAN);
        assert_eq!(stats, AdvanceStats { unstable: 1, ..AdvanceStats::default() });
        let ray = population.ray_at(0).unwrap();
        assert_eq!(ray.status(), RayStatus::Unstable);
        assert_eq!(ray.trail_len(), 2);

        population.advance(1.0e8);
        let stats = population.advance(1.0e8);
        assert_eq!(stats.removed, 1);
        assert!(population.is_empty());
    }
}
