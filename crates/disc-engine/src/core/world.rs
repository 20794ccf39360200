use std::fmt;

use glam::DVec2;
use slotmap::SlotMap;

use crate::api::config::{WorldConfig, DEFAULT_ACCELERATION, DEFAULT_DT};
use crate::api::types::ParticleHandle;
use crate::core::collision::{reflect_off_bounds, resolve_pair, Bounds, PairOutcome};
use crate::core::particle::Particle;
use crate::error::{Error, Result};
use crate::history::History;

/// Most particles a world can store at once (slot indices are 32-bit).
pub const MAX_STORED_PARTICLES: usize = u32::MAX as usize - 2;

fn check_capacity(stored: usize) -> Result<()> {
    if stored >= MAX_STORED_PARTICLES {
        return Err(Error::InvalidParam(format!(
            "world already stores {stored} particles (limit {MAX_STORED_PARTICLES})"
        )));
    }
    Ok(())
}

/// A stored particle and the number of collection entries that refer to it.
#[derive(Debug, Clone)]
struct Slot {
    particle: Particle,
    entries: usize,
}

/// The simulated scene: an ordered collection of particles under a uniform
/// acceleration, optionally confined to a box.
///
/// Particles live in world-owned storage and are addressed by
/// [`ParticleHandle`]. The active collection is an ordered list of handles;
/// the same handle may appear more than once. A particle's slot is reclaimed
/// when its last entry is removed or the world is cleared, after which its
/// handle resolves to `None`.
#[derive(Debug, Clone)]
pub struct World {
    store: SlotMap<ParticleHandle, Slot>,
    entries: Vec<ParticleHandle>,
    acceleration: DVec2,
    bounds: Option<Bounds>,
    clock: f64,
    default_dt: f64,
}

impl World {
    /// Create an empty world. Pass `None` for an unbounded domain.
    pub fn new(acceleration: DVec2, bounds: Option<Bounds>) -> Self {
        Self {
            store: SlotMap::with_key(),
            entries: Vec::new(),
            acceleration,
            bounds,
            clock: 0.0,
            default_dt: DEFAULT_DT,
        }
    }

    /// Create an empty world from a validated config.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let [ax, ay] = config.acceleration;
        let mut world = Self::new(
            DVec2::new(ax, ay),
            config.bounds.map(|[w, h]| Bounds::new(w, h)),
        );
        world.default_dt = config.dt;
        Ok(world)
    }

    // -- Collection --

    /// Store a particle without adding it to the collection. The particle
    /// stays stored until it has been added and removed again, or until
    /// [`clear`](Self::clear).
    pub fn insert(&mut self, particle: Particle) -> Result<ParticleHandle> {
        check_capacity(self.store.len())?;
        Ok(self.store.insert(Slot {
            particle,
            entries: 0,
        }))
    }

    /// Store a particle and append it to the collection.
    pub fn spawn(&mut self, particle: Particle) -> Result<ParticleHandle> {
        let handle = self.insert(particle)?;
        self.add_particle(handle)?;
        log::debug!("spawned particle {} ({} in world)", handle, self.entries.len());
        Ok(handle)
    }

    /// Append a stored particle. Adding a handle that is already present
    /// creates a second, independent entry.
    pub fn add_particle(&mut self, handle: ParticleHandle) -> Result<()> {
        let slot = self.store.get_mut(handle).ok_or_else(|| {
            Error::InvalidParam(format!("particle {handle} is not stored in this world"))
        })?;
        slot.entries += 1;
        self.entries.push(handle);
        Ok(())
    }

    /// Remove the first entry for `handle`. Returns false if it was not present.
    /// Removing the last entry frees the particle's slot.
    pub fn remove_particle(&mut self, handle: ParticleHandle) -> bool {
        let Some(idx) = self.entries.iter().position(|&h| h == handle) else {
            return false;
        };
        // Order is significant for collision resolution: no swap_remove.
        self.entries.remove(idx);
        if let Some(slot) = self.store.get_mut(handle) {
            slot.entries -= 1;
            if slot.entries == 0 {
                self.store.remove(handle);
            }
        }
        log::debug!("removed particle {handle}");
        true
    }

    /// Empty the collection, free all stored particles and reset the clock.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.clear();
        self.clock = 0.0;
        log::debug!("world cleared");
    }

    /// Ordered copy of the collection.
    pub fn particles(&self) -> Vec<ParticleHandle> {
        self.entries.clone()
    }

    /// Look up a stored particle. `None` once the handle is stale.
    pub fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.store.get(handle).map(|slot| &slot.particle)
    }

    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.store.get_mut(handle).map(|slot| &mut slot.particle)
    }

    /// Iterate over collection entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.entries
            .iter()
            .filter_map(move |&h| self.store.get(h).map(|slot| &slot.particle))
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.entries.contains(&handle)
    }

    /// Number of collection entries (duplicates counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct particles currently stored, in or out of the collection.
    pub fn stored(&self) -> usize {
        self.store.len()
    }

    /// Slots allocated for particle storage.
    pub fn storage_capacity(&self) -> usize {
        self.store.capacity()
    }

    // -- Parameters --

    pub fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: DVec2) {
        self.acceleration = acceleration;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Simulated time since creation or the last [`clear`](Self::clear).
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Step size used by [`run_default`](Self::run_default).
    pub fn default_dt(&self) -> f64 {
        self.default_dt
    }

    // -- Aggregates --

    pub fn total_kinetic_energy(&self) -> f64 {
        self.iter().map(Particle::kinetic_energy).sum()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.iter().fold(DVec2::ZERO, |acc, p| acc + p.momentum())
    }

    // -- Stepping --

    /// Advance the world by `dt`:
    /// integrate, reflect off the bounds, resolve overlapping pairs once, tick
    /// the clock. Fails without mutating anything if `dt <= 0`.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        validate_dt(dt)?;

        for &handle in &self.entries {
            if let Some(slot) = self.store.get_mut(handle) {
                slot.particle.integrate(dt, self.acceleration);
            }
        }

        if let Some(bounds) = self.bounds {
            for &handle in &self.entries {
                if let Some(slot) = self.store.get_mut(handle) {
                    if reflect_off_bounds(&mut slot.particle, bounds) {
                        log::trace!("particle {handle} hit the bounds");
                    }
                }
            }
        }

        self.resolve_collisions();
        self.clock += dt;
        Ok(())
    }

    /// Single pass over all pairs `(i, j)`, `i < j`, in collection order.
    fn resolve_collisions(&mut self) {
        let n = self.entries.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.entries[i], self.entries[j]);
                let outcome = match self.store.get_disjoint_mut([a, b]) {
                    Some([s1, s2]) => resolve_pair(&mut s1.particle, &mut s2.particle),
                    // A duplicated entry overlaps itself with no normal.
                    None => PairOutcome::Coincident,
                };
                match outcome {
                    PairOutcome::Resolved => log::trace!("collision {a} <-> {b}"),
                    PairOutcome::Coincident => {
                        log::debug!("skipping {a} <-> {b}: coincident centers")
                    }
                    PairOutcome::Apart | PairOutcome::Separating => {}
                }
            }
        }
    }

    /// Step `floor(duration / dt)` times, recording every entry's position
    /// before each step. Tracks follow the collection order at call time.
    pub fn run(&mut self, duration: f64, dt: f64) -> Result<History> {
        validate_dt(dt)?;
        // Truncating cast: non-positive or NaN durations give zero steps.
        let steps = (duration / dt) as usize;
        log::debug!(
            "running {steps} steps of {dt} over {} particles",
            self.entries.len()
        );

        let mut history = History::with_capacity(dt, self.entries.len(), steps);
        for _ in 0..steps {
            let store = &self.store;
            history.record(self.entries.iter().map(|&h| {
                store
                    .get(h)
                    .map_or(DVec2::ZERO, |slot| slot.particle.position())
            }));
            self.step(dt)?;
        }
        Ok(history)
    }

    /// [`run`](Self::run) with the configured default step.
    pub fn run_default(&mut self, duration: f64) -> Result<History> {
        self.run(duration, self.default_dt)
    }
}

fn validate_dt(dt: f64) -> Result<()> {
    if dt > 0.0 {
        Ok(())
    } else {
        log::warn!("rejected time step {dt}");
        Err(Error::InvalidParam(format!("time step must be positive, got {dt}")))
    }
}

impl Default for World {
    /// Unbounded world under standard gravity `(0, -9.81)`.
    fn default() -> Self {
        let [ax, ay] = DEFAULT_ACCELERATION;
        Self::new(DVec2::new(ax, ay), None)
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "World(particles={}, acceleration=({}, {}), bounds=",
            self.entries.len(),
            self.acceleration.x,
            self.acceleration.y
        )?;
        match self.bounds {
            Some(b) => write!(f, "({}, {}))", b.width, b.height),
            None => write!(f, "None)"),
        }
    }
}
