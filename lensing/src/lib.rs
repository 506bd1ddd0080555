//! 2D gravitational lensing around a Schwarzschild black hole
//!
//! Photons are integrated along null geodesics with RK4 in polar coordinates
//! centred on a single point mass. Each ray keeps a bounded trail; the
//! render-facing layer flattens those trails into one line-strip buffer.
//!
//! Dependencies run one way: [`render`] and [`trail_buffer`] read from the
//! physics modules, never the reverse.

pub mod config;
pub mod error;
pub mod geodesic;
pub mod mass;
pub mod population;
pub mod ray;
pub mod render;
pub mod simulation;
pub mod trail_buffer;

pub use config::{ConfigError, SimulationConfig};
pub use error::{LensingError, LensingResult};
pub use mass::MassDescriptor;
pub use population::{AdvanceStats, Population};
pub use ray::{Ray, RayStatus, MAX_COORDINATE};
pub use render::{HorizonDisc, ProducesRenderPoints, RayRenderer};
pub use simulation::{Simulation, SpawnRequest};
pub use trail_buffer::{TrailBuffer, TrailVertex};
