//! # ember - fire, smoke and spray particle effects
//!
//! A fixed pool of particles is advanced one fixed tick per frame and drawn
//! as small lit spheres.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ember::prelude::*;
//!
//! let mut sim = SimulationState::builder(Variant::FireSmoke)
//!     .with_seed(7)
//!     .build();
//!
//! for _ in 0..100 {
//!     sim.tick();
//! }
//! println!("{} smoke particles", sim.count_of(ParticleKind::Smoke));
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles and kinds
//!
//! Every slot in the store holds a [`Particle`] of one [`ParticleKind`]:
//! Fire, Smoke or Spray. Each kind has a constant [`KindProfile`] with its
//! gravity, bounds, life range and launch velocities.
//!
//! ### Lifecycle
//!
//! The [`LifecycleEngine`] moves each particle by its velocity plus an
//! accumulated gravity bias and ages it by [`TICK`]. A particle that
//! outlives its life or leaves its box is reset in place:
//!
//! - Fire respawns, or with 10% chance turns into Smoke where it is
//! - Smoke comes back as a fresh flame
//! - Spray goes back to the nozzle keeping its launch velocity
//!
//! The store never grows or shrinks.
//!
//! ### Rendering
//!
//! [`FrameRenderer`] turns the store into one [`Instance`] per particle for
//! any [`DrawBackend`]. The windowed viewer in [`window`] uses a wgpu
//! backend that draws them as one instanced call.

pub mod error;
pub mod geometry;
mod gpu;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod profile;
pub mod render;
pub mod shader;
pub mod simulation;
pub mod spawn;
pub mod time;
pub mod window;

pub use error::{GpuError, ScreenshotError, ShellError};
pub use geometry::{SphereMesh, Vertex};
pub use glam::{Mat4, Vec3};
pub use gpu::{fov_y_degrees, projection_matrix, Camera};
pub use lifecycle::{flame_color, LifecycleEngine, TickReport, Transition};
pub use particle::{Particle, ParticleKind};
pub use profile::{KindProfile, Variant, TICK};
pub use render::{DrawBackend, FrameRenderer, Instance};
pub use simulation::{SimulationBuilder, SimulationState};
pub use spawn::{RandomSource, SeededRandom};
pub use window::{run, ShellConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::geometry::SphereMesh;
    pub use crate::lifecycle::{LifecycleEngine, TickReport};
    pub use crate::particle::{Particle, ParticleKind};
    pub use crate::profile::{Variant, TICK};
    pub use crate::render::{DrawBackend, FrameRenderer, Instance};
    pub use crate::simulation::SimulationState;
    pub use crate::spawn::{RandomSource, SeededRandom};
    pub use glam::{Mat4, Vec3};
}
