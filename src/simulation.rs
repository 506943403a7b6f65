//! Simulation state: the particle store and everything that mutates it.

use std::sync::Arc;

use crate::geometry::SphereMesh;
use crate::lifecycle::{LifecycleEngine, TickReport};
use crate::particle::{Particle, ParticleKind};
use crate::profile::{Variant, SPRAY_STAGGER_TICKS};
use crate::spawn::{self, RandomSource, SeededRandom};

/// A fixed-size particle ensemble and the engine that advances it.
///
/// The store is allocated once in [`SimulationBuilder::build`] and never
/// grows or shrinks; expired particles are reinitialized in place.
///
/// # Example
///
/// ```ignore
/// let mut sim = SimulationState::builder(Variant::FireSmoke)
///     .with_seed(42)
///     .build();
///
/// for _ in 0..100 {
///     sim.tick();
/// }
/// assert_eq!(sim.particles().len(), 3000);
/// ```
pub struct SimulationState<R: RandomSource = SeededRandom> {
    variant: Variant,
    particles: Box<[Particle]>,
    engine: LifecycleEngine,
    rng: R,
    mesh: Arc<SphereMesh>,
    ticks: u64,
    totals: TickReport,
}

impl SimulationState<SeededRandom> {
    /// Start configuring a simulation of `variant`.
    pub fn builder(variant: Variant) -> SimulationBuilder {
        SimulationBuilder::new(variant)
    }

    /// A simulation of `variant` with default capacity and a time-based seed.
    pub fn new(variant: Variant) -> Self {
        SimulationBuilder::new(variant).build()
    }

    /// Seed the random source was created with.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> SimulationState<R> {
    /// Advance every particle by one tick.
    pub fn tick(&mut self) -> TickReport {
        let report = self.engine.step(&mut self.particles, &mut self.rng);
        self.ticks += 1;
        self.totals += report;
        if report.expired() > 0 {
            log::trace!("tick {}: {:?}", self.ticks, report);
        }
        report
    }

    /// Advance `count` ticks and return the combined report.
    pub fn run(&mut self, count: u32) -> TickReport {
        let mut report = TickReport::default();
        for _ in 0..count {
            report += self.tick();
        }
        report
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The sphere mesh every particle is drawn with.
    #[inline]
    pub fn mesh(&self) -> &Arc<SphereMesh> {
        &self.mesh
    }

    /// Ticks run since construction (the startup stagger is not counted).
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Transitions accumulated since construction.
    #[inline]
    pub fn totals(&self) -> TickReport {
        self.totals
    }

    /// Number of particles currently of `kind`.
    pub fn count_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }
}

/// Builder for [`SimulationState`].
pub struct SimulationBuilder {
    variant: Variant,
    capacity: usize,
    seed: Option<u64>,
    mesh: Option<Arc<SphereMesh>>,
}

impl SimulationBuilder {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            capacity: variant.default_capacity(),
            seed: None,
            mesh: None,
        }
    }

    /// Override the number of particle slots.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seed the random source for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Share an existing mesh instead of building the default sphere.
    pub fn with_mesh(mut self, mesh: Arc<SphereMesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn build(self) -> SimulationState<SeededRandom> {
        let rng = match self.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_time(),
        };
        log::debug!("seeding {} simulation with {}", self.variant.name(), rng.seed());
        self.build_with_rng(rng)
    }

    /// Build with a caller-provided random source.
    pub fn build_with_rng<R: RandomSource>(self, mut rng: R) -> SimulationState<R> {
        let mesh = self.mesh.unwrap_or_else(|| Arc::new(SphereMesh::default()));
        let engine = LifecycleEngine::new();
        let kind = self.variant.initial_kind();

        let particles: Box<[Particle]> = (0..self.capacity)
            .map(|_| {
                let mut particle = Particle::unspawned(kind, Arc::clone(&mesh));
                spawn::spawn(&mut particle, kind, &mut rng);
                if self.variant == Variant::Spray {
                    // Spread the fountain along its arc so it does not start
                    // as one synchronized pulse.
                    for _ in 0..rng.below(SPRAY_STAGGER_TICKS) {
                        engine.advance(&mut particle, &mut rng);
                    }
                }
                particle
            })
            .collect();

        log::debug!(
            "built {} simulation with {} particles",
            self.variant.name(),
            particles.len()
        );

        SimulationState {
            variant: self.variant,
            particles,
            engine,
            rng,
            mesh,
            ticks: 0,
            totals: TickReport::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_capacity() {
        let sim = SimulationState::builder(Variant::FireSmoke).with_seed(1).build();
        assert_eq!(sim.capacity(), 3000);
        assert_eq!(sim.variant(), Variant::FireSmoke);
        assert_eq!(sim.count_of(ParticleKind::Fire), 3000);

        let sim = SimulationState::builder(Variant::Spray).with_seed(1).build();
        assert_eq!(sim.capacity(), 2000);
        assert_eq!(sim.count_of(ParticleKind::Spray), 2000);
    }

    #[test]
    fn test_mesh_is_shared() {
        let sim = SimulationState::builder(Variant::FireSmoke)
            .with_capacity(16)
            .with_seed(2)
            .build();
        assert!(sim.particles().iter().all(|p| Arc::ptr_eq(&p.mesh, sim.mesh())));
        // One reference per particle plus the state's own.
        assert_eq!(Arc::strong_count(sim.mesh()), 17);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = SimulationState::builder(Variant::FireSmoke).with_capacity(64).with_seed(9).build();
        let mut b = SimulationState::builder(Variant::FireSmoke).with_capacity(64).with_seed(9).build();
        a.run(200);
        b.run(200);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.kind, pb.kind);
        }
        assert_eq!(a.totals(), b.totals());
    }

    #[test]
    fn test_spray_starts_staggered() {
        let sim = SimulationState::builder(Variant::Spray).with_capacity(200).with_seed(5).build();
        let at_nozzle = sim
            .particles()
            .iter()
            .filter(|p| p.position == Vec3::ZERO)
            .count();
        assert!(at_nozzle < 20, "{at_nozzle} particles still at the nozzle");
    }

    #[test]
    fn test_tick_counts() {
        let mut sim = SimulationState::builder(Variant::Spray).with_capacity(10).with_seed(3).build();
        sim.run(5);
        assert_eq!(sim.ticks(), 5);
    }
}
