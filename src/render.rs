//! Frame renderer: turns the particle store into draw calls.
//!
//! The renderer knows nothing about the graphics API. It asks a
//! [`DrawBackend`] for the camera transform once per frame and hands it one
//! [`Instance`] per particle.

use glam::{Mat4, Vec3};

use crate::geometry::SphereMesh;
use crate::particle::{Particle, ParticleKind};

/// Uniform scale applied to the shared sphere for every particle.
pub const PARTICLE_SCALE: f32 = 0.02;

/// Opacity of fountain droplets.
pub const SPRAY_OPACITY: f32 = 0.6;

/// Everything the backend needs to draw one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    /// Object-to-eye transform, scale included.
    pub model_view: Mat4,
    pub color: Vec3,
    /// Blend alpha in `[0, 1]`.
    pub opacity: f32,
}

/// The drawing side of the host.
pub trait DrawBackend {
    /// World-from-eye transform of the camera for the current frame.
    fn camera_transform(&self) -> Mat4;

    /// Draw `mesh` once with the given per-instance data.
    fn draw_instance(&mut self, mesh: &SphereMesh, instance: Instance);
}

/// Opacity a particle is drawn with.
///
/// Fire and smoke fade out linearly over their life; spray is constant.
#[inline]
pub fn opacity(particle: &Particle) -> f32 {
    match particle.kind {
        ParticleKind::Spray => SPRAY_OPACITY,
        ParticleKind::Fire | ParticleKind::Smoke => (1.0 - particle.life_fraction()).clamp(0.0, 1.0),
    }
}

/// Stateless per-frame renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRenderer {
    scale: f32,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self {
            scale: PARTICLE_SCALE,
        }
    }
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue one draw per particle. Returns the number of draws.
    pub fn render<B: DrawBackend + ?Sized>(&self, particles: &[Particle], backend: &mut B) -> usize {
        let eye_from_world = backend.camera_transform().inverse();
        for particle in particles {
            let instance = self.instance(eye_from_world, particle);
            backend.draw_instance(&particle.mesh, instance);
        }
        particles.len()
    }

    /// Per-particle draw data given the inverse camera transform.
    pub fn instance(&self, eye_from_world: Mat4, particle: &Particle) -> Instance {
        let world_from_object = Mat4::from_translation(particle.position) * Mat4::from_scale(Vec3::splat(self.scale));
        Instance {
            model_view: eye_from_world * world_from_object,
            color: particle.color,
            opacity: opacity(particle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Recorder {
        camera: Mat4,
        draws: Vec<Instance>,
    }

    impl DrawBackend for Recorder {
        fn camera_transform(&self) -> Mat4 {
            self.camera
        }

        fn draw_instance(&mut self, _mesh: &SphereMesh, instance: Instance) {
            self.draws.push(instance);
        }
    }

    fn particle(kind: ParticleKind, position: Vec3) -> Particle {
        let mut p = Particle::unspawned(kind, Arc::new(SphereMesh::new(1.0, 4, 4)));
        p.position = position;
        p.life = 2.0;
        p.age = 0.5;
        p.color = Vec3::new(0.1, 0.2, 0.3);
        p
    }

    #[test]
    fn test_one_draw_per_particle() {
        let particles = vec![
            particle(ParticleKind::Fire, Vec3::ZERO),
            particle(ParticleKind::Smoke, Vec3::X),
            particle(ParticleKind::Fire, Vec3::Y),
        ];
        let mut backend = Recorder {
            camera: Mat4::IDENTITY,
            draws: Vec::new(),
        };

        let count = FrameRenderer::new().render(&particles, &mut backend);

        assert_eq!(count, 3);
        assert_eq!(backend.draws.len(), 3);
        assert_eq!(backend.draws[1].color, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_eye_transform_uses_inverse_camera() {
        let p = particle(ParticleKind::Fire, Vec3::new(1.0, 2.0, 3.0));
        let mut backend = Recorder {
            camera: Mat4::from_translation(Vec3::new(0.0, 3.0, 20.0)),
            draws: Vec::new(),
        };

        FrameRenderer::new().render(std::slice::from_ref(&p), &mut backend);

        let mv = backend.draws[0].model_view;
        let center = mv.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(1.0, -1.0, -17.0)).length() < 1e-4);
        let edge = mv.transform_point3(Vec3::X);
        assert!(((edge - center).length() - PARTICLE_SCALE).abs() < 1e-4);
    }

    #[test]
    fn test_opacity() {
        let fire = particle(ParticleKind::Fire, Vec3::ZERO);
        assert!((opacity(&fire) - 0.75).abs() < 1e-6);

        let mut spent = particle(ParticleKind::Smoke, Vec3::ZERO);
        spent.age = 3.0;
        assert_eq!(opacity(&spent), 0.0);

        let spray = particle(ParticleKind::Spray, Vec3::ZERO);
        assert_eq!(opacity(&spray), SPRAY_OPACITY);
    }
}
