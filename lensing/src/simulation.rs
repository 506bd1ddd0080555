//! Simulation context: one mass, its rays, and the frame loop entry points
//!
//! The frame driver and the input layer share one `Simulation`. Input events
//! either spawn immediately or queue requests that the next `frame()` applies
//! before advancing.

use glam::DVec2;
use log::{info, warn};

use crate::config::{ConfigError, SimulationConfig};
use crate::error::LensingResult;
use crate::mass::MassDescriptor;
use crate::population::{AdvanceStats, Population};

/// Start-up rays, as (position, direction) in units of the world extent.
const DEFAULT_SCENE: [([f64; 2], [f64; 2]); 4] = [
    ([-0.5, 0.5], [1.0, -0.10484016]),
    ([0.5, 0.5], [-1.0, -0.10484016]),
    ([-1.0, 1.0], [1.0, -0.3]),
    ([1.0, 1.0], [-1.0, -0.3]),
];

/// A spawn deferred to the start of the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Ray {
        position: DVec2,
        direction: DVec2,
        max_distance: Option<f64>,
        max_trail_length: Option<usize>,
    },
    /// `burst_rays` photons fanning out from one point.
    Burst { position: DVec2 },
}

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    population: Population,
    pending: Vec<SpawnRequest>,
    frames: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let [x, y] = config.mass_position;
        let mass = MassDescriptor::new(DVec2::new(x, y), config.mass_kg)?;

        info!(
            "simulation ready: M = {:.3e} kg, rs = {:.4e} m",
            mass.mass(),
            mass.schwarzschild_radius()
        );

        Ok(Self {
            population: Population::with_defaults(mass, config.max_distance, config.max_trail_length),
            config,
            pending: Vec::new(),
            frames: 0,
        })
    }

    /// Spawn the four start-up rays aimed across the mass.
    pub fn seed_default_scene(&mut self) -> LensingResult<()> {
        let extent = DVec2::new(self.config.world_width, self.config.world_height);
        for (position, direction) in DEFAULT_SCENE {
            self.population.spawn(
                DVec2::from(position) * extent,
                DVec2::from(direction),
                None,
                None,
            )?;
        }
        info!("seeded {} start-up rays", DEFAULT_SCENE.len());
        Ok(())
    }

    pub fn spawn(
        &mut self,
        position: DVec2,
        direction: DVec2,
        max_distance: Option<f64>,
        max_trail_length: Option<usize>,
    ) -> LensingResult<()> {
        self.population
            .spawn(position, direction, max_distance, max_trail_length)
    }

    pub fn spawn_burst(&mut self, position: DVec2) -> LensingResult<()> {
        self.population.spawn_burst(position, self.config.burst_rays)
    }

    /// Defer a spawn until the next `frame()`.
    pub fn queue_spawn(&mut self, request: SpawnRequest) {
        self.pending.push(request);
    }

    pub fn pending_spawns(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued spawns, then advance every ray by `step · speed`.
    pub fn frame(&mut self) -> AdvanceStats {
        for request in std::mem::take(&mut self.pending) {
            let result = match request {
                SpawnRequest::Ray {
                    position,
                    direction,
                    max_distance,
                    max_trail_length,
                } => self.spawn(position, direction, max_distance, max_trail_length),
                SpawnRequest::Burst { position } => self.spawn_burst(position),
            };
            if let Err(err) = result {
                warn!("dropping spawn request {:?}: {}", request, err);
            }
        }

        let stats = self.population.advance(self.d_lambda());
        self.frames += 1;
        stats
    }

    /// Affine-parameter increment applied by the next frame.
    pub fn d_lambda(&self) -> f64 {
        self.config.step * self.config.speed
    }

    /// Scale the per-frame step. Non-positive or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.config.speed = speed;
        } else {
            warn!("ignoring speed {}", speed);
        }
    }

    /// Drop every ray and any queued spawns.
    pub fn reset(&mut self) {
        info!("reset: clearing {} rays", self.population.count());
        self.population.clear();
        self.pending.clear();
    }

    pub fn schwarzschild_radius(&self) -> f64 {
        self.population.mass().schwarzschild_radius()
    }

    pub fn ray_count(&self) -> usize {
        self.population.count()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn mass(&self) -> &MassDescriptor {
        self.population.mass()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
