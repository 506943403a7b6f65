//! Particle records and kinds.
//!
//! A [`Particle`] is a plain value owned by its slot in the store. It never
//! references another particle; the only thing it shares is the sphere mesh,
//! held through a reference-counted handle.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;

use crate::geometry::SphereMesh;

/// Red, reached when a flame is close to burning out.
pub const RED: Vec3 = Vec3::new(1.0, 0.2, 0.0);
/// Gold, the middle of a flame's life.
pub const GOLD: Vec3 = Vec3::new(1.0, 0.8, 0.0);
/// Yellow, early flame.
pub const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
/// Pale yellow, the color of a freshly spawned flame.
pub const PALE_YELLOW: Vec3 = Vec3::new(1.0, 0.95, 0.8);
/// Smoke gray.
pub const SMOKE_GRAY: Vec3 = Vec3::new(0.6, 0.6, 0.6);
/// Fountain water.
pub const SPRAY_BLUE: Vec3 = Vec3::new(0.55, 0.75, 1.0);

/// What a particle currently is.
///
/// Fire and Smoke only appear in the fire/smoke variant and convert into
/// each other on expiry. Spray is the single kind of the fountain variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Fire,
    Smoke,
    Spray,
}

impl ParticleKind {
    /// All kinds, in declaration order.
    pub const ALL: [ParticleKind; 3] = [ParticleKind::Fire, ParticleKind::Smoke, ParticleKind::Spray];
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleKind::Fire => write!(f, "fire"),
            ParticleKind::Smoke => write!(f, "smoke"),
            ParticleKind::Spray => write!(f, "spray"),
        }
    }
}

/// One slot of the particle store.
#[derive(Clone, Debug)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// World-space displacement per tick.
    pub velocity: Vec3,
    /// Gravity-like offset added to the position every tick.
    ///
    /// Grows monotonically until the next respawn.
    pub accumulated_bias: Vec3,
    /// RGB color, each channel in `[0, 1]`.
    pub color: Vec3,
    /// Seconds since the last (re)spawn.
    pub age: f32,
    /// Expiry threshold for `age`. Infinite for spray.
    pub life: f32,
    pub kind: ParticleKind,
    /// Shared sphere mesh, identical for every particle.
    pub mesh: Arc<SphereMesh>,
}

impl Particle {
    /// A zeroed particle of the given kind, waiting to be spawned.
    pub fn unspawned(kind: ParticleKind, mesh: Arc<SphereMesh>) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            accumulated_bias: Vec3::ZERO,
            color: Vec3::ONE,
            age: 0.0,
            life: 0.0,
            kind,
            mesh,
        }
    }

    /// `age / life`, the fraction of its life the particle has used.
    ///
    /// Zero for particles that never expire by age.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.life.is_finite() && self.life > 0.0 {
            self.age / self.life
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_expired_by_age(&self) -> bool {
        self.age > self.life
    }
}
