//! Per-kind constant tables.
//!
//! Every behavioural difference between fire, smoke and spray lives here as
//! data: gravity step, bounding box, life range, launch distribution and
//! spawn color. The lifecycle engine looks the table up by
//! [`ParticleKind`] and never branches on magic numbers of its own.
//!
//! | Kind | gravity / tick | box (x, y, z) | life (s) |
//! |------|----------------|---------------|----------|
//! | Fire | +0.005 | ±40, -25..35, - | (0.1, 1.0] |
//! | Smoke | +0.0005 | ±80, -35..45, - | (5.1, 17.5] |
//! | Spray | -0.004 | ±20, -8..30, ±20 | never |

use glam::Vec3;

use crate::particle::{ParticleKind, PALE_YELLOW, SMOKE_GRAY, SPRAY_BLUE};

/// Simulated seconds per tick.
pub const TICK: f32 = 0.02;

/// Probability that an expiring flame turns into smoke instead of
/// respawning as a fresh flame.
pub const SMOKE_CONVERSION_CHANCE: f32 = 0.10;

/// Upper bound (exclusive) on the number of ticks a spray particle is
/// pre-advanced at startup.
pub const SPRAY_STAGGER_TICKS: u32 = 150;

/// A closed interval of `f32` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    /// An axis that is not tracked by a bounding box.
    pub const UNBOUNDED: Span = Span {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval symmetric around zero.
    pub const fn symmetric(half_width: f32) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Axis-aligned region a particle must stay inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: Span,
    pub y: Span,
    pub z: Span,
}

impl Bounds {
    /// `true` when `position` is inside (or exactly on) every tracked limit.
    #[inline]
    pub fn contains(&self, position: Vec3) -> bool {
        self.x.contains(position.x) && self.y.contains(position.y) && self.z.contains(position.z)
    }
}

/// Where freshly spawned particles appear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnArea {
    pub center: Vec3,
    /// Half extent of the uniform jitter on each axis.
    pub jitter: Vec3,
}

/// Initial velocity distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Launch {
    /// Independent uniform components.
    Box { x: Span, y: Span, z: Span },
    /// Uniform direction inside a cone around `+Y` with uniform speed.
    Cone { half_angle: f32, speed: Span },
}

/// Constant table for one particle kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindProfile {
    /// Added to `accumulated_bias.y` every tick.
    pub gravity_step: f32,
    pub bounds: Bounds,
    /// `None` means the kind never expires by age.
    pub life: Option<Span>,
    /// `None` means the kind keeps the position it had when it was created
    /// by conversion.
    pub spawn_area: Option<SpawnArea>,
    pub launch: Launch,
    pub spawn_color: Vec3,
}

pub const FIRE: KindProfile = KindProfile {
    gravity_step: 0.005,
    bounds: Bounds {
        x: Span::new(-40.0, 40.0),
        y: Span::new(-25.0, 35.0),
        z: Span::UNBOUNDED,
    },
    life: Some(Span::new(0.1, 1.0)),
    spawn_area: Some(SpawnArea {
        center: Vec3::new(0.0, -5.0, 0.0),
        jitter: Vec3::new(1.0, 0.0, 0.0),
    }),
    launch: Launch::Box {
        x: Span::symmetric(0.07),
        y: Span::new(0.02, 0.22),
        z: Span::symmetric(0.07),
    },
    spawn_color: PALE_YELLOW,
};

pub const SMOKE: KindProfile = KindProfile {
    gravity_step: 0.0005,
    bounds: Bounds {
        x: Span::new(-80.0, 80.0),
        y: Span::new(-35.0, 45.0),
        z: Span::UNBOUNDED,
    },
    life: Some(Span::new(5.1, 17.5)),
    spawn_area: None,
    launch: Launch::Box {
        x: Span::symmetric(0.035),
        y: Span::new(0.105, 0.255),
        z: Span::symmetric(0.015),
    },
    spawn_color: SMOKE_GRAY,
};

pub const SPRAY: KindProfile = KindProfile {
    gravity_step: -0.004,
    bounds: Bounds {
        x: Span::new(-20.0, 20.0),
        y: Span::new(-8.0, 30.0),
        z: Span::new(-20.0, 20.0),
    },
    life: None,
    spawn_area: Some(SpawnArea {
        center: Vec3::ZERO,
        jitter: Vec3::ZERO,
    }),
    launch: Launch::Cone {
        half_angle: 0.35,
        speed: Span::new(0.15, 0.3),
    },
    spawn_color: SPRAY_BLUE,
};

impl ParticleKind {
    /// Constant table for this kind.
    #[inline]
    pub fn profile(self) -> &'static KindProfile {
        match self {
            ParticleKind::Fire => &FIRE,
            ParticleKind::Smoke => &SMOKE,
            ParticleKind::Spray => &SPRAY,
        }
    }
}

/// Which of the two effects a simulation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Rising flames that occasionally turn into drifting smoke.
    #[default]
    FireSmoke,
    /// A fountain of droplets launched from the origin.
    Spray,
}

impl Variant {
    /// Kind every slot starts as.
    pub fn initial_kind(self) -> ParticleKind {
        match self {
            Variant::FireSmoke => ParticleKind::Fire,
            Variant::Spray => ParticleKind::Spray,
        }
    }

    /// Number of particle slots the effect is designed for.
    pub fn default_capacity(self) -> usize {
        match self {
            Variant::FireSmoke => 3000,
            Variant::Spray => 2000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::FireSmoke => "fire",
            Variant::Spray => "spray",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_rises_faster_than_smoke() {
        assert!(FIRE.gravity_step > SMOKE.gravity_step);
        assert!(SMOKE.gravity_step > 0.0);
        assert!(SPRAY.gravity_step < 0.0);
    }

    #[test]
    fn test_smoke_box_is_looser() {
        assert!(SMOKE.bounds.x.width() > FIRE.bounds.x.width());
        assert!(SMOKE.bounds.y.width() > FIRE.bounds.y.width());
    }

    #[test]
    fn test_bounds_untracked_axis() {
        assert!(FIRE.bounds.contains(Vec3::new(0.0, 0.0, 1.0e9)));
        assert!(!SPRAY.bounds.contains(Vec3::new(0.0, 0.0, 21.0)));
    }

    #[test]
    fn test_bounds_edges_are_inside() {
        assert!(FIRE.bounds.contains(Vec3::new(40.0, 35.0, 0.0)));
        assert!(FIRE.bounds.contains(Vec3::new(-40.0, -25.0, 0.0)));
        assert!(!FIRE.bounds.contains(Vec3::new(40.01, 0.0, 0.0)));
    }

    #[test]
    fn test_vertical_launch_is_positive() {
        for profile in [&FIRE, &SMOKE] {
            match profile.launch {
                Launch::Box { x, y, z } => {
                    assert!(y.min > 0.0);
                    assert_eq!(x.min, -x.max);
                    assert_eq!(z.min, -z.max);
                }
                Launch::Cone { .. } => panic!("expected box launch"),
            }
        }
    }

    #[test]
    fn test_variant_defaults() {
        assert_eq!(Variant::FireSmoke.initial_kind(), ParticleKind::Fire);
        assert_eq!(Variant::Spray.initial_kind(), ParticleKind::Spray);
        assert_eq!(Variant::FireSmoke.default_capacity(), 3000);
        assert_eq!(Variant::Spray.default_capacity(), 2000);
    }
}
