//! Flattens ray trails into one line-strip vertex stream
//!
//! Each trail of two or more points is written oldest first and followed by
//! a restart vertex, so the whole population draws with a single call.

use bytemuck::{Pod, Zeroable};
use log::trace;

use crate::ray::Ray;

/// Coordinate value that tells the renderer to start a new strip.
pub const RESTART_SENTINEL: f32 = f32::MAX;

/// Default vertex cap per frame.
pub const DEFAULT_MAX_POINTS: usize = 2 << 20;

/// Vertex for ray trail visualization
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 2],
}

impl TrailVertex {
    pub const RESTART: Self = Self {
        position: [RESTART_SENTINEL, RESTART_SENTINEL],
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn is_restart(&self) -> bool {
        self.position == [RESTART_SENTINEL, RESTART_SENTINEL]
    }
}

/// Reusable vertex storage, rebuilt every frame.
#[derive(Debug, Clone, Default)]
pub struct TrailBuffer {
    vertices: Vec<TrailVertex>,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from `rays` in order, writing at most `max_points` vertices.
    ///
    /// Returns the number of vertices written, restart markers included. A
    /// full buffer truncates silently; the last strip may lose its marker.
    pub fn build<'a, I>(&mut self, rays: I, max_points: usize) -> usize
    where
        I: IntoIterator<Item = &'a Ray>,
    {
        self.vertices.clear();

        'rays: for ray in rays {
            if ray.trail_len() < 2 {
                continue;
            }
            for point in ray.trail() {
                if self.vertices.len() >= max_points {
                    break 'rays;
                }
                self.vertices.push(TrailVertex::new(point.x as f32, point.y as f32));
            }
            if self.vertices.len() >= max_points {
                break;
            }
            self.vertices.push(TrailVertex::RESTART);
        }

        if self.vertices.len() >= max_points {
            trace!("trail buffer full at {} vertices", max_points);
        }
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[TrailVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes for a vertex-buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass::MassDescriptor;
    use glam::DVec2;
    use std::sync::Arc;

    fn ray_with_trail(y: f64, steps: usize) -> Ray {
        let mass = Arc::new(MassDescriptor::default());
        let mut ray = Ray::new(DVec2::new(-6.0e10, y), DVec2::X, mass, 2.0e11, 500).unwrap();
        for _ in 0..steps {
            ray.step(1.0e8);
        }
        ray
    }

    #[test]
    fn short_trails_are_skipped() {
        let rays = vec![ray_with_trail(3.0e10, 0), ray_with_trail(4.0e10, 1)];
        let mut buffer = TrailBuffer::new();

        assert_eq!(buffer.build(&rays, DEFAULT_MAX_POINTS), 3);
        assert!(!buffer.vertices()[0].is_restart());
        assert!(buffer.vertices()[2].is_restart());
        assert_eq!(buffer.vertices()[0], TrailVertex::new(-6.0e10, 4.0e10));
    }

    #[test]
    fn truncates_at_cap() {
        let rays = vec![ray_with_trail(3.0e10, 4), ray_with_trail(4.0e10, 4)];
        let mut buffer = TrailBuffer::new();

        assert_eq!(buffer.build(&rays, 12), 12);
        assert_eq!(buffer.build(&rays, 7), 7);
        // first strip fills the cap exactly, no marker after it
        assert_eq!(buffer.build(&rays, 5), 5);
        assert!(buffer.vertices().iter().all(|v| !v.is_restart()));
        assert_eq!(buffer.build(&rays, 0), 0);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let rays = vec![ray_with_trail(3.0e10, 2)];
        let mut buffer = TrailBuffer::new();

        buffer.build(&rays, DEFAULT_MAX_POINTS);
        buffer.build(&rays, DEFAULT_MAX_POINTS);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.as_bytes().len(), 4 * std::mem::size_of::<TrailVertex>());
    }
}
