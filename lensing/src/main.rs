//! Headless 2D Gravitational Lensing driver
//!
//! Runs the lensing engine without a window: seeds the start-up rays and
//! one burst of photons, steps a fixed number of frames and rebuilds the
//! trail buffer each frame exactly as a renderer would.
//!
//! Usage: `lensing_2d [config.json]`
//!
//! Set `RUST_LOG=debug` to see individual captures and escapes.

use anyhow::{Context, Result};
use glam::DVec2;
use lensing::{
    AdvanceStats, HorizonDisc, ProducesRenderPoints, RayRenderer, Simulation, SimulationConfig,
    SpawnRequest,
};
use log::info;

const FRAMES: u64 = 3000;
const REPORT_EVERY: u64 = 250;

fn main() -> Result<()> {
    common::logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_path(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => SimulationConfig::default(),
    };

    let mut sim = Simulation::new(config).context("building simulation")?;
    sim.seed_default_scene().context("seeding start-up rays")?;

    // Same click the interactive version would receive: left of the mass, slightly low
    let extent = DVec2::new(sim.config().world_width, sim.config().world_height);
    sim.queue_spawn(SpawnRequest::Burst {
        position: DVec2::new(-0.6, -0.2) * extent,
    });

    let horizon = HorizonDisc::new(sim.mass());
    info!(
        "horizon quad: {} vertices, rs = {:.4e} m, photon sphere at {:.4e} m",
        horizon.render_points().len(),
        sim.schwarzschild_radius(),
        horizon.uniform.photon_sphere_radius
    );

    let mut renderer = RayRenderer::new(sim.config().max_points);
    let mut totals = AdvanceStats::default();

    for frame in 1..=FRAMES {
        totals += sim.frame();
        let vertices = renderer.update(sim.population());

        if frame % REPORT_EVERY == 0 {
            info!(
                "frame {frame}: {} rays ({} in flight), {} vertices, {} bytes",
                sim.ray_count(),
                sim.population().alive_count(),
                vertices,
                renderer.buffer().as_bytes().len()
            );
        }
        if sim.ray_count() == 0 {
            info!("all rays drained after {frame} frames");
            break;
        }
    }

    info!(
        "done: {} captured, {} escaped, {} unstable, {} still drawn",
        totals.captured,
        totals.escaped,
        totals.unstable,
        sim.ray_count()
    );
    Ok(())
}
