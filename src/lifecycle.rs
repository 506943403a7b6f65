//! Particle lifecycle engine.
//!
//! Advances every particle by exactly one fixed tick and enforces the
//! respawn and conversion rules.
//!
//! # Per-tick order
//!
//! For each particle:
//!
//! 1. `age += TICK`
//! 2. `position += velocity + accumulated_bias`
//! 3. `accumulated_bias.y += gravity_step(kind)`
//! 4. fire only: color from `life / age`
//! 5. expiry test: `age > life` or outside the kind's bounding box
//! 6. on expiry, one of the transitions below
//!
//! # Transitions
//!
//! | Expiring kind | Outcome |
//! |---------------|---------|
//! | Fire | smoke with [`SMOKE_CONVERSION_CHANCE`], otherwise a fresh flame |
//! | Smoke | always a fresh flame |
//! | Spray | back to the nozzle, same launch velocity |
//!
//! # Flame colors
//!
//! | `life / age` | Color |
//! |--------------|-------|
//! | < 1.75 | red |
//! | < 3.0 | gold |
//! | < 10.0 | yellow |
//! | otherwise | pale yellow |

use glam::Vec3;
use std::ops::AddAssign;

use crate::particle::{Particle, ParticleKind, GOLD, PALE_YELLOW, RED, YELLOW};
use crate::profile::{SMOKE_CONVERSION_CHANCE, TICK};
use crate::spawn::{self, RandomSource};

/// Color stops for flames, checked in order against `life / age`.
const FLAME_STOPS: [(f32, Vec3); 3] = [(1.75, RED), (3.0, GOLD), (10.0, YELLOW)];

/// Flame color for a given `life / age` ratio.
///
/// A brand new flame (age 0) has an infinite ratio and is pale yellow.
pub fn flame_color(ratio: f32) -> Vec3 {
    FLAME_STOPS
        .iter()
        .find(|(limit, _)| ratio < *limit)
        .map(|(_, color)| *color)
        .unwrap_or(PALE_YELLOW)
}

/// What happened to a particle when it expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Fire expired and came back as a fresh flame.
    Respawned,
    /// Fire expired and turned into smoke.
    ConvertedToSmoke,
    /// Smoke expired and came back as a fresh flame.
    Rekindled,
    /// Spray left its box and went back to the nozzle.
    Recycled,
}

/// Counts of transitions over one or more ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub respawned: u32,
    pub converted_to_smoke: u32,
    pub rekindled: u32,
    pub recycled: u32,
}

impl TickReport {
    pub fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Respawned => self.respawned += 1,
            Transition::ConvertedToSmoke => self.converted_to_smoke += 1,
            Transition::Rekindled => self.rekindled += 1,
            Transition::Recycled => self.recycled += 1,
        }
    }

    /// Total number of expiries.
    pub fn expired(&self) -> u32 {
        self.respawned + self.converted_to_smoke + self.rekindled + self.recycled
    }

    /// Number of flames that expired (respawned or turned to smoke).
    pub fn fire_expired(&self) -> u32 {
        self.respawned + self.converted_to_smoke
    }
}

impl AddAssign for TickReport {
    fn add_assign(&mut self, rhs: Self) {
        self.respawned += rhs.respawned;
        self.converted_to_smoke += rhs.converted_to_smoke;
        self.rekindled += rhs.rekindled;
        self.recycled += rhs.recycled;
    }
}

/// Fixed-step particle integrator and lifecycle rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifecycleEngine {
    tick: f32,
    smoke_chance: f32,
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleEngine {
    pub const fn new() -> Self {
        Self {
            tick: TICK,
            smoke_chance: SMOKE_CONVERSION_CHANCE,
        }
    }

    /// Advance every particle by one tick.
    pub fn step<R: RandomSource + ?Sized>(&self, particles: &mut [Particle], rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        for particle in particles.iter_mut() {
            if let Some(transition) = self.advance(particle, rng) {
                report.record(transition);
            }
        }
        report
    }

    /// Advance one particle by one tick.
    ///
    /// Returns the transition it went through if it expired.
    pub fn advance<R: RandomSource + ?Sized>(&self, particle: &mut Particle, rng: &mut R) -> Option<Transition> {
        let profile = particle.kind.profile();

        particle.age += self.tick;
        particle.position += particle.velocity + particle.accumulated_bias;
        particle.accumulated_bias.y += profile.gravity_step;

        if particle.kind == ParticleKind::Fire {
            particle.color = flame_color(particle.life / particle.age);
        }

        if !self.is_expired(particle) {
            return None;
        }
        Some(self.expire(particle, rng))
    }

    /// `true` when the particle outlived its life or left its box.
    #[inline]
    pub fn is_expired(&self, particle: &Particle) -> bool {
        particle.is_expired_by_age() || !particle.kind.profile().bounds.contains(particle.position)
    }

    fn expire<R: RandomSource + ?Sized>(&self, particle: &mut Particle, rng: &mut R) -> Transition {
        match particle.kind {
            ParticleKind::Fire => {
                if rng.chance(self.smoke_chance) {
                    spawn::convert(particle, ParticleKind::Smoke, rng);
                    Transition::ConvertedToSmoke
                } else {
                    spawn::spawn(particle, ParticleKind::Fire, rng);
                    Transition::Respawned
                }
            }
            ParticleKind::Smoke => {
                spawn::spawn(particle, ParticleKind::Fire, rng);
                Transition::Rekindled
            }
            ParticleKind::Spray => {
                spawn::recycle(particle, rng);
                Transition::Recycled
            }
        }
    }
}
