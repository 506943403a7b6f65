//! Triangulated sphere mesh shared by every particle.
//!
//! The mesh is built once at startup and never mutated. Particles hold it
//! through an `Arc`, so handing it to every slot is a pointer copy.
//!
//! # Layout
//!
//! Slices run around the Z axis and stacks run from `+Z` (stack 0) to `-Z`
//! (last stack):
//!
//! - `(slices + 1) * (stacks + 1)` vertices (the seam is duplicated)
//! - `slices * stacks * 6` indices (two triangles per quad)

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Tessellation used by the particle sphere.
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_SLICES: u32 = 5;
pub const DEFAULT_STACKS: u32 = 5;

/// Upper bound on slices and stacks: `(255 + 1)^2` vertices is exactly the
/// `u16` index range.
pub const MAX_TESSELLATION: u32 = 255;

/// Vertex with position and normal, laid out for a GPU vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Immutable indexed triangle mesh of a sphere centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl SphereMesh {
    /// Build a sphere of `radius` with `slices` longitudinal and `stacks`
    /// latitudinal subdivisions.
    ///
    /// Both counts are clamped to at least 3 and 2 so the result is always a
    /// closed solid, and to at most [`MAX_TESSELLATION`] so every vertex
    /// fits a `u16` index.
    pub fn new(radius: f32, slices: u32, stacks: u32) -> Self {
        let slices = slices.clamp(3, MAX_TESSELLATION);
        let stacks = stacks.clamp(2, MAX_TESSELLATION);

        let rad_per_slice = TAU / slices as f32;
        let rad_per_stack = PI / stacks as f32;

        let mut vertices = Vec::with_capacity(Self::vertex_count_for(slices, stacks));
        let mut indices = Vec::with_capacity(Self::index_count_for(slices, stacks));

        let row = slices + 1;
        for i in 0..=stacks {
            let (sin_stack, cos_stack) = (i as f32 * rad_per_stack).sin_cos();
            for j in 0..=slices {
                let (sin_slice, cos_slice) = (j as f32 * rad_per_slice).sin_cos();
                let n = Vec3::new(cos_slice * sin_stack, sin_slice * sin_stack, cos_stack);
                vertices.push(Vertex {
                    position: (n * radius).to_array(),
                    normal: n.to_array(),
                });

                if i < stacks && j < slices {
                    let a = (row * i + j) as u16;
                    let b = (row * i + j + 1) as u16;
                    let c = (row * (i + 1) + j + 1) as u16;
                    let d = (row * (i + 1) + j) as u16;
                    indices.extend_from_slice(&[a, b, c, a, c, d]);
                }
            }
        }

        Self {
            vertices,
            indices,
        }
    }

    pub fn vertex_count_for(slices: u32, stacks: u32) -> usize {
        (slices as usize + 1) * (stacks as usize + 1)
    }

    pub fn index_count_for(slices: u32, stacks: u32) -> usize {
        slices as usize * stacks as usize * 6
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS, DEFAULT_SLICES, DEFAULT_STACKS)
    }
}
