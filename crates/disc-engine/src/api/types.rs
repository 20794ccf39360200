use std::fmt;

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Identity of a particle stored in a [`World`](crate::World).
    ///
    /// Generational: once the particle is reclaimed (its last collection entry
    /// removed, or the world cleared) the handle goes stale and lookups return
    /// `None`, even if the slot is reused by a later particle.
    pub struct ParticleHandle;
}

impl fmt::Display for ParticleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.data())
    }
}
