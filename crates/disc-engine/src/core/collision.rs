//! Boundary reflection and elastic pair resolution.
//!
//! Both operate on end-of-step positions; there is no swept test.

use glam::DVec2;

use super::particle::Particle;

/// Extra separation added per particle after an overlap is resolved, so that
/// rounding residue does not re-trigger the same contact on the next step.
pub const SEPARATION_SLOP: f64 = 0.01;

/// Axis-aligned box from the origin to `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// Result of resolving one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// The discs do not overlap.
    Apart,
    /// Overlapping with coincident centers: no normal, nothing done.
    Coincident,
    /// Overlapping but already moving apart along the normal.
    Separating,
    /// Impulse applied (and positions pushed apart).
    Resolved,
}

/// Clamp one coordinate into `[radius, extent - radius]`, forcing the velocity
/// component to point back inside. Returns true if a wall was hit.
fn reflect_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) -> bool {
    let mut hit = false;
    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = vel.abs();
        hit = true;
    }
    if *pos + radius > extent {
        *pos = extent - radius;
        *vel = -vel.abs();
        hit = true;
    }
    hit
}

/// Keep a particle inside `bounds`. Each axis is corrected independently, so a
/// corner hit fixes both. Returns true if any wall was touched.
pub fn reflect_off_bounds(particle: &mut Particle, bounds: Bounds) -> bool {
    let radius = particle.radius();
    let mut pos = particle.position();
    let mut vel = particle.velocity();

    let hit_x = reflect_axis(&mut pos.x, &mut vel.x, radius, bounds.width);
    let hit_y = reflect_axis(&mut pos.y, &mut vel.y, radius, bounds.height);

    particle.set_position(pos);
    particle.set_velocity(vel);
    hit_x || hit_y
}

/// Resolve a perfectly elastic collision between `p1` and `p2`.
///
/// The impulse acts along the center-to-center normal with restitution 1,
/// conserving momentum and kinetic energy. Any remaining overlap is removed by
/// pushing each disc half the overlap plus [`SEPARATION_SLOP`] along the normal.
pub fn resolve_pair(p1: &mut Particle, p2: &mut Particle) -> PairOutcome {
    if !p1.collides_with(p2) {
        return PairOutcome::Apart;
    }

    let delta = p1.position() - p2.position();
    let distance = delta.length();
    if distance == 0.0 {
        return PairOutcome::Coincident;
    }
    let normal: DVec2 = delta / distance;

    let vel_along_normal = (p1.velocity() - p2.velocity()).dot(normal);
    if vel_along_normal > 0.0 {
        return PairOutcome::Separating;
    }

    let (m1, m2) = (p1.mass(), p2.mass());
    // j = -(1 + e) v_n / (1/m1 + 1/m2), e = 1
    let impulse = -2.0 * vel_along_normal / (1.0 / m1 + 1.0 / m2);

    p1.set_velocity(p1.velocity() + normal * (impulse / m1));
    p2.set_velocity(p2.velocity() - normal * (impulse / m2));

    let overlap = (p1.radius() + p2.radius()) - distance;
    if overlap > 0.0 {
        let separation = normal * (overlap / 2.0 + SEPARATION_SLOP);
        p1.set_position(p1.position() + separation);
        p2.set_position(p2.position() - separation);
    }

    PairOutcome::Resolved
}
