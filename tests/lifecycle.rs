//! Lifecycle behavior observed through the public simulation API.

use std::sync::Arc;

use ember::lifecycle::{flame_color, Transition};
use ember::particle::{GOLD, PALE_YELLOW, RED, YELLOW};
use ember::prelude::*;

fn assert_life_in_range(particle: &Particle) {
    match particle.kind {
        ParticleKind::Fire => assert!(
            particle.life > 0.1 && particle.life <= 1.0,
            "fire life {} out of range",
            particle.life
        ),
        ParticleKind::Smoke => assert!(
            particle.life > 5.1 && particle.life <= 17.5,
            "smoke life {} out of range",
            particle.life
        ),
        ParticleKind::Spray => assert!(particle.life.is_infinite()),
    }
}

fn lone(kind: ParticleKind) -> Particle {
    Particle::unspawned(kind, Arc::new(SphereMesh::default()))
}

#[test]
fn test_age_grows_by_tick_until_reset() {
    let mut sim = SimulationState::builder(Variant::FireSmoke)
        .with_capacity(500)
        .with_seed(1)
        .build();

    for _ in 0..200 {
        let before: Vec<f32> = sim.particles().iter().map(|p| p.age).collect();
        let report = sim.tick();

        let mut resets = 0;
        for (old, particle) in before.iter().zip(sim.particles()) {
            if particle.age == 0.0 {
                resets += 1;
            } else {
                assert!((particle.age - (old + TICK)).abs() < 1e-4);
            }
        }
        assert_eq!(resets, report.expired());
    }
}

#[test]
fn test_life_stays_in_kind_range() {
    let mut sim = SimulationState::builder(Variant::FireSmoke)
        .with_capacity(1000)
        .with_seed(2)
        .build();

    for _ in 0..600 {
        sim.tick();
        sim.particles().iter().for_each(assert_life_in_range);
    }
    assert!(sim.count_of(ParticleKind::Smoke) > 0);
}

#[test]
fn test_expired_particle_always_comes_back_valid() {
    let engine = LifecycleEngine::new();
    let mut rng = SeededRandom::new(3);

    for kind in [ParticleKind::Fire, ParticleKind::Smoke] {
        let mut particle = lone(kind);
        for _ in 0..2000 {
            particle.age = 1000.0;
            let transition = engine.advance(&mut particle, &mut rng);
            assert!(transition.is_some());
            assert_eq!(particle.age, 0.0);
            assert_ne!(particle.kind, ParticleKind::Spray);
            assert_life_in_range(&particle);
        }
    }
}

#[test]
fn test_out_of_bounds_expires_regardless_of_age() {
    let engine = LifecycleEngine::new();
    let mut rng = SeededRandom::new(4);

    let mut fire = lone(ParticleKind::Fire);
    fire.life = 1.0;
    fire.position = Vec3::new(50.0, 0.0, 0.0);
    assert!(engine.advance(&mut fire, &mut rng).is_some());
    assert_eq!(fire.age, 0.0);

    let mut smoke = lone(ParticleKind::Smoke);
    smoke.life = 10.0;
    smoke.position = Vec3::new(0.0, 50.0, 0.0);
    assert_eq!(engine.advance(&mut smoke, &mut rng), Some(Transition::Rekindled));
    assert_eq!(smoke.kind, ParticleKind::Fire);
    assert_eq!(smoke.position.y, -5.0);
    assert!(smoke.position.x.abs() <= 1.0);

    let mut spray = lone(ParticleKind::Spray);
    spray.life = f32::INFINITY;
    spray.velocity = Vec3::new(0.0, 0.1, 0.0);
    spray.position = Vec3::new(0.0, 0.0, 25.0);
    assert_eq!(engine.advance(&mut spray, &mut rng), Some(Transition::Recycled));
    assert_eq!(spray.position, Vec3::ZERO);
    assert_eq!(spray.velocity, Vec3::new(0.0, 0.1, 0.0));
}

#[test]
fn test_fire_depth_is_not_bounded() {
    let engine = LifecycleEngine::new();
    let mut rng = SeededRandom::new(5);

    let mut fire = lone(ParticleKind::Fire);
    fire.life = 1.0;
    fire.position = Vec3::new(0.0, 0.0, 1000.0);
    assert_eq!(engine.advance(&mut fire, &mut rng), None);
}

#[test]
fn test_flame_color_thresholds() {
    assert_eq!(flame_color(1.5), RED);
    assert_eq!(flame_color(2.0), GOLD);
    assert_eq!(flame_color(5.0), YELLOW);
    assert_eq!(flame_color(20.0), PALE_YELLOW);
}

#[test]
fn test_smoke_conversion_fraction() {
    let mut sim = SimulationState::builder(Variant::FireSmoke).with_seed(11).build();

    while sim.totals().fire_expired() < 20_000 {
        sim.tick();
    }

    let totals = sim.totals();
    let fraction = totals.converted_to_smoke as f32 / totals.fire_expired() as f32;
    assert!(
        (fraction - 0.10).abs() < 0.02,
        "conversion fraction {fraction} over {} expiries",
        totals.fire_expired()
    );
}

#[test]
fn test_store_size_is_constant() {
    for variant in [Variant::FireSmoke, Variant::Spray] {
        let mut sim = SimulationState::builder(variant).with_capacity(300).with_seed(6).build();
        for _ in 0..20 {
            sim.run(25);
            assert_eq!(sim.particles().len(), 300);
            let total: usize = ParticleKind::ALL.iter().map(|&k| sim.count_of(k)).sum();
            assert_eq!(total, 300);
        }
    }
}

#[test]
fn test_spray_only_recycles() {
    let mut sim = SimulationState::builder(Variant::Spray).with_capacity(400).with_seed(7).build();
    let report = sim.run(1500);

    assert_eq!(sim.count_of(ParticleKind::Spray), 400);
    assert!(report.recycled > 0);
    assert_eq!(report.recycled, report.expired());
    assert!(sim.particles().iter().all(|p| p.life.is_infinite()));
}
