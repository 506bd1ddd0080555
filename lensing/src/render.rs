//! Render-facing wrappers around the physics core
//!
//! Nothing in the core knows about drawing; these types read from it and
//! hand out vertex data in the form a line-strip or quad pipeline expects.

use bytemuck::{Pod, Zeroable};

use crate::mass::MassDescriptor;
use crate::population::Population;
use crate::trail_buffer::{TrailBuffer, TrailVertex, DEFAULT_MAX_POINTS};

/// How the vertices from a [`ProducesRenderPoints`] source are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Line strips separated by [`TrailVertex::RESTART`] markers.
    LineStripWithRestart,
    TriangleStrip,
}

/// Anything that can hand vertices to the renderer for the current frame.
pub trait ProducesRenderPoints {
    fn render_points(&self) -> &[TrailVertex];

    fn topology(&self) -> Topology;
}

/// Trail renderer state: one shared vertex buffer for every ray.
#[derive(Debug, Clone)]
pub struct RayRenderer {
    buffer: TrailBuffer,
    max_points: usize,
}

impl RayRenderer {
    pub fn new(max_points: usize) -> Self {
        Self {
            buffer: TrailBuffer::new(),
            max_points,
        }
    }

    /// Rebuild the vertex stream from the population. Returns the vertex count.
    pub fn update(&mut self, population: &Population) -> usize {
        self.buffer.build(population.rays(), self.max_points)
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }
}

impl Default for RayRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl ProducesRenderPoints for RayRenderer {
    fn render_points(&self) -> &[TrailVertex] {
        self.buffer.vertices()
    }

    fn topology(&self) -> Topology {
        Topology::LineStripWithRestart
    }
}

/// Uniform data for the horizon disc
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct HorizonUniform {
    pub center: [f32; 2],
    pub radius: f32,
    pub photon_sphere_radius: f32,
}

impl HorizonUniform {
    pub fn from_mass(mass: &MassDescriptor) -> Self {
        let center = mass.position();
        Self {
            center: [center.x as f32, center.y as f32],
            radius: mass.schwarzschild_radius() as f32,
            photon_sphere_radius: mass.photon_sphere_radius() as f32,
        }
    }
}

/// Quad covering the horizon; the fragment stage cuts the disc out of it.
#[derive(Debug, Clone, Copy)]
pub struct HorizonDisc {
    pub uniform: HorizonUniform,
    corners: [TrailVertex; 4],
}

impl HorizonDisc {
    pub fn new(mass: &MassDescriptor) -> Self {
        let uniform = HorizonUniform::from_mass(mass);
        let [cx, cy] = uniform.center;
        let r = uniform.radius;
        // triangle strip order: (-1,-1), (-1,1), (1,-1), (1,1)
        let corners = [
            TrailVertex::new(cx - r, cy - r),
            TrailVertex::new(cx - r, cy + r),
            TrailVertex::new(cx + r, cy - r),
            TrailVertex::new(cx + r, cy + r),
        ];
        Self { uniform, corners }
    }
}

impl ProducesRenderPoints for HorizonDisc {
    fn render_points(&self) -> &[TrailVertex] {
        &self.corners
    }

    fn topology(&self) -> Topology {
        Topology::TriangleStrip
    }
}
