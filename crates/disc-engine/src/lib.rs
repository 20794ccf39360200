//! Discrete-time 2D simulator for elastic discs.
//!
//! Each [`World::step`] integrates every particle with semi-implicit Euler,
//! reflects particles off the optional box, then resolves overlapping pairs
//! with a single pass of elastic impulses.

pub mod api;
pub mod core;
pub mod error;
pub mod history;

// Re-export key types at crate root for convenience
pub use crate::api::config::{WorldConfig, DEFAULT_ACCELERATION, DEFAULT_DT};
pub use crate::api::types::ParticleHandle;
pub use crate::core::collision::{
    reflect_off_bounds, resolve_pair, Bounds, PairOutcome, SEPARATION_SLOP,
};
pub use crate::core::particle::{Particle, ParticleDesc};
pub use crate::core::world::{World, MAX_STORED_PARTICLES};
pub use crate::error::{Error, Result};
pub use crate::history::History;

pub use glam::DVec2;
