//! Random sampling for spawning and converting particles.
//!
//! Randomness is injected through [`RandomSource`] so the lifecycle can be
//! driven by a seeded generator in the demo and by a scripted one in tests.
//!
//! ```ignore
//! let mut rng = SeededRandom::new(42);
//! let life = rng.upper_closed(Span::new(0.1, 1.0)); // in (0.1, 1.0]
//! if rng.chance(0.1) {
//!     // one time in ten
//! }
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::particle::{Particle, ParticleKind};
use crate::profile::{Launch, SpawnArea, Span};

/// Source of uniform randomness with the named distributions the lifecycle
/// needs.
///
/// Only [`next_unit`](RandomSource::next_unit) has to be implemented.
pub trait RandomSource {
    /// Uniform `f32` in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[span.min, span.max]`.
    #[inline]
    fn uniform(&mut self, span: Span) -> f32 {
        let value = span.min + span.width() * self.next_unit();
        value.min(span.max)
    }

    /// Uniform value in `(span.min, span.max]`.
    #[inline]
    fn upper_closed(&mut self, span: Span) -> f32 {
        span.max - span.width() * self.next_unit()
    }

    /// `true` with probability `p`.
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    fn angle(&mut self) -> f32 {
        self.next_unit() * TAU
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    #[inline]
    fn below(&mut self, n: u32) -> u32 {
        ((self.next_unit() * n as f32) as u32).min(n.saturating_sub(1))
    }
}

/// Seeded [`SmallRng`]-backed random source.
pub struct SeededRandom {
    seed: u64,
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed from the wall clock, different each program execution.
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::new(seed)
    }

    /// Seed this source was created with, for reproducing a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.rng.gen()
    }
}

impl SpawnArea {
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.center
            + Vec3::new(
                rng.uniform(Span::symmetric(self.jitter.x)),
                rng.uniform(Span::symmetric(self.jitter.y)),
                rng.uniform(Span::symmetric(self.jitter.z)),
            )
    }
}

impl Launch {
    /// Draw an initial velocity, in world units per tick.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            Launch::Box { x, y, z } => Vec3::new(rng.uniform(x), rng.uniform(y), rng.uniform(z)),
            Launch::Cone { half_angle, speed } => {
                let tilt = rng.uniform(Span::new(0.0, half_angle));
                let azimuth = rng.angle();
                let (sin_tilt, cos_tilt) = tilt.sin_cos();
                let dir = Vec3::new(sin_tilt * azimuth.cos(), cos_tilt, sin_tilt * azimuth.sin());
                dir * rng.uniform(speed)
            }
        }
    }
}

/// Reinitialize `particle` as a brand new particle of `kind`.
///
/// Position (when the kind has a spawn area), velocity, life and color are
/// resampled; age and accumulated bias are reset.
pub fn spawn<R: RandomSource + ?Sized>(particle: &mut Particle, kind: ParticleKind, rng: &mut R) {
    let profile = kind.profile();
    if let Some(area) = profile.spawn_area {
        particle.position = area.sample(rng);
    }
    particle.accumulated_bias = Vec3::ZERO;
    resample(particle, kind, rng);
}

/// Turn `particle` into `kind` where it stands.
///
/// Velocity, life and color follow the new kind; position and accumulated
/// bias carry over.
pub fn convert<R: RandomSource + ?Sized>(particle: &mut Particle, kind: ParticleKind, rng: &mut R) {
    resample(particle, kind, rng);
}

/// Send a particle back to its spawn area keeping its launch velocity.
pub fn recycle<R: RandomSource + ?Sized>(particle: &mut Particle, rng: &mut R) {
    if let Some(area) = particle.kind.profile().spawn_area {
        particle.position = area.sample(rng);
    }
    particle.accumulated_bias = Vec3::ZERO;
    particle.age = 0.0;
}

fn resample<R: RandomSource + ?Sized>(particle: &mut Particle, kind: ParticleKind, rng: &mut R) {
    let profile = kind.profile();
    particle.kind = kind;
    particle.age = 0.0;
    particle.velocity = profile.launch.sample(rng);
    particle.life = match profile.life {
        Some(span) => rng.upper_closed(span),
        None => f32::INFINITY,
    };
    particle.color = profile.spawn_color;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SphereMesh;
    use crate::profile::{FIRE, SMOKE, SPRAY};
    use std::sync::Arc;

    /// Always returns the same value.
    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f32 {
            self.0
        }
    }

    fn particle(kind: ParticleKind) -> Particle {
        Particle::unspawned(kind, Arc::new(SphereMesh::new(1.0, 4, 4)))
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_upper_closed_extremes() {
        let span = Span::new(0.1, 1.0);
        assert_eq!(Fixed(0.0).upper_closed(span), 1.0);
        let low = Fixed(0.999_999_9).upper_closed(span);
        assert!(low > 0.1 && low < 0.11);
    }

    #[test]
    fn test_uniform_stays_in_span() {
        let mut rng = SeededRandom::new(3);
        let span = Span::new(-2.0, 5.0);
        for _ in 0..1000 {
            assert!(span.contains(rng.uniform(span)));
        }
    }

    #[test]
    fn test_below() {
        assert_eq!(Fixed(0.0).below(10), 0);
        assert_eq!(Fixed(0.999_999_9).below(10), 9);
        assert_eq!(Fixed(0.5).below(0), 0);
    }

    #[test]
    fn test_spawn_fire_resets_bias_and_age() {
        let mut rng = SeededRandom::new(11);
        let mut p = particle(ParticleKind::Smoke);
        p.accumulated_bias = Vec3::new(0.0, 3.0, 0.0);
        p.age = 4.0;

        spawn(&mut p, ParticleKind::Fire, &mut rng);

        assert_eq!(p.kind, ParticleKind::Fire);
        assert_eq!(p.age, 0.0);
        assert_eq!(p.accumulated_bias, Vec3::ZERO);
        assert_eq!(p.position.y, -5.0);
        assert!(p.position.x.abs() <= 1.0);
        assert!(p.life > 0.1 && p.life <= 1.0);
        assert_eq!(p.color, FIRE.spawn_color);
    }

    #[test]
    fn test_convert_keeps_position_and_bias() {
        let mut rng = SeededRandom::new(5);
        let mut p = particle(ParticleKind::Fire);
        p.position = Vec3::new(3.0, 12.0, -1.0);
        p.accumulated_bias = Vec3::new(0.0, 0.25, 0.0);
        p.age = 0.9;

        convert(&mut p, ParticleKind::Smoke, &mut rng);

        assert_eq!(p.kind, ParticleKind::Smoke);
        assert_eq!(p.position, Vec3::new(3.0, 12.0, -1.0));
        assert_eq!(p.accumulated_bias, Vec3::new(0.0, 0.25, 0.0));
        assert_eq!(p.age, 0.0);
        assert!(p.life > 5.1 && p.life <= 17.5);
        assert_eq!(p.color, SMOKE.spawn_color);
    }

    #[test]
    fn test_cone_launch_points_up() {
        let mut rng = SeededRandom::new(99);
        let Launch::Cone { half_angle, speed } = SPRAY.launch else {
            panic!("spray launches from a cone");
        };
        for _ in 0..500 {
            let v = SPRAY.launch.sample(&mut rng);
            assert!(v.y > 0.0);
            let len = v.length();
            assert!(len >= speed.min - 1e-5 && len <= speed.max + 1e-5);
            assert!(v.angle_between(Vec3::Y) <= half_angle + 1e-4);
        }
    }

    #[test]
    fn test_recycle_keeps_velocity() {
        let mut rng = SeededRandom::new(1);
        let mut p = particle(ParticleKind::Spray);
        spawn(&mut p, ParticleKind::Spray, &mut rng);
        let velocity = p.velocity;
        p.position = Vec3::new(5.0, -9.0, 2.0);
        p.accumulated_bias = Vec3::new(0.0, -0.4, 0.0);
        p.age = 3.0;

        recycle(&mut p, &mut rng);

        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.accumulated_bias, Vec3::ZERO);
        assert_eq!(p.age, 0.0);
        assert_eq!(p.velocity, velocity);
        assert!(p.life.is_infinite());
    }
}
