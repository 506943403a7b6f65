use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::geometry::Vertex;
use crate::render::Instance;

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// World-space light positions.
pub const LIGHT1: Vec3 = Vec3::new(2.0, 3.0, 14.0);
pub const LIGHT2: Vec3 = Vec3::new(-2.0, -3.0, -5.0);

/// Fragment shading mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Two-light Lambert shading.
    #[default]
    Diffuse,
    /// Flat instance color.
    Solid,
}

impl Shading {
    pub fn toggled(self) -> Self {
        match self {
            Shading::Diffuse => Shading::Solid,
            Shading::Solid => Shading::Diffuse,
        }
    }

    fn as_u32(self) -> u32 {
        match self {
            Shading::Diffuse => 0,
            Shading::Solid => 1,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub proj: [[f32; 4]; 4],
    pub light1: [f32; 4],
    pub light2: [f32; 4],
    pub shading: u32,
    pub _padding: [u32; 3],
}

impl Uniforms {
    /// Uniforms for a frame; lights are moved into eye space here.
    pub fn new(proj: Mat4, eye_from_world: Mat4, shading: Shading) -> Self {
        let light1 = eye_from_world.transform_point3(LIGHT1);
        let light2 = eye_from_world.transform_point3(LIGHT2);
        Self {
            proj: proj.to_cols_array_2d(),
            light1: light1.extend(1.0).to_array(),
            light2: light2.extend(1.0).to_array(),
            shading: shading.as_u32(),
            _padding: [0; 3],
        }
    }
}

/// Per-instance vertex data, matching `InstanceInput` in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model_view: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub opacity: f32,
}

impl From<Instance> for InstanceRaw {
    fn from(instance: Instance) -> Self {
        Self {
            model_view: instance.model_view.to_cols_array_2d(),
            color: instance.color.to_array(),
            opacity: instance.opacity,
        }
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3
];

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x3,
    7 => Float32
];

pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}
