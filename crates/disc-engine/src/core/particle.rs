use std::fmt;

use glam::DVec2;

use crate::error::{Error, Result};

/// A rigid disc with fixed mass and radius.
///
/// `position` and `velocity` are plain values: the getters return copies and the
/// setters replace the whole vector. `mass` and `radius` are validated once at
/// construction and never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    mass: f64,
    radius: f64,
}

impl Particle {
    /// Create a particle, rejecting `mass <= 0` or `radius <= 0` (and NaN).
    pub fn new(position: DVec2, velocity: DVec2, mass: f64, radius: f64) -> Result<Self> {
        // Written as negated `>` so NaN fails too.
        if !(mass > 0.0) {
            return Err(Error::InvalidParam(format!("mass must be positive, got {mass}")));
        }
        if !(radius > 0.0) {
            return Err(Error::InvalidParam(format!("radius must be positive, got {radius}")));
        }
        Ok(Self {
            position,
            velocity,
            mass,
            radius,
        })
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Advance by `dt` under a constant `acceleration` (semi-implicit Euler).
    ///
    /// Velocity is updated first and the position uses the new velocity.
    /// Swapping the two lines gives explicit Euler and different numbers.
    pub fn integrate(&mut self, dt: f64, acceleration: DVec2) {
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum: m v.
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// Distance between the two centers.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.position - other.position).length()
    }

    /// True when the discs overlap. Exactly touching discs do not collide.
    #[inline]
    pub fn collides_with(&self, other: &Particle) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

impl Default for Particle {
    /// Unit disc of unit mass at rest at the origin.
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass: 1.0,
            radius: 1.0,
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Particle(position=({}, {}), velocity=({}, {}), mass={}, radius={})",
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.mass,
            self.radius
        )
    }
}

/// Builder for a particle, starting from the defaults of [`Particle::default`].
#[derive(Debug, Clone, Copy)]
pub struct ParticleDesc {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
}

impl ParticleDesc {
    pub fn new() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass: 1.0,
            radius: 1.0,
        }
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Validate and create the particle.
    pub fn build(self) -> Result<Particle> {
        Particle::new(self.position, self.velocity, self.mass, self.radius)
    }
}

impl Default for ParticleDesc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, radius: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::ZERO, 1.0, radius).unwrap()
    }

    #[test]
    fn defaults() {
        let p = Particle::default();
        assert_eq!(p.position(), DVec2::ZERO);
        assert_eq!(p.velocity(), DVec2::ZERO);
        assert_eq!(p.mass(), 1.0);
        assert_eq!(p.radius(), 1.0);
        assert_eq!(ParticleDesc::default().build().unwrap(), p);
    }

    #[test]
    fn non_positive_mass_rejected() {
        for mass in [0.0, -1.0, f64::NAN] {
            let err = Particle::new(DVec2::ZERO, DVec2::ZERO, mass, 1.0).unwrap_err();
            assert!(matches!(err, Error::InvalidParam(_)));
            assert!(err.to_string().contains("mass"));
        }
    }

    #[test]
    fn non_positive_radius_rejected() {
        for radius in [0.0, -0.5, f64::NAN] {
            let err = ParticleDesc::new().with_radius(radius).build().unwrap_err();
            assert!(err.to_string().contains("radius"));
        }
    }

    #[test]
    fn getters_return_copies() {
        let mut p = ParticleDesc::new()
            .with_position(DVec2::new(1.0, 2.0))
            .with_velocity(DVec2::new(3.0, 4.0))
            .build()
            .unwrap();
        let mut pos = p.position();
        pos.x = 100.0;
        let mut vel = p.velocity();
        vel.y = -100.0;
        assert_eq!(p.position(), DVec2::new(1.0, 2.0));
        assert_eq!(p.velocity(), DVec2::new(3.0, 4.0));

        p.set_position(pos);
        p.set_velocity(vel);
        assert_eq!(p.position(), DVec2::new(100.0, 2.0));
        assert_eq!(p.velocity(), DVec2::new(3.0, -100.0));
    }

    #[test]
    fn integrate_updates_velocity_before_position() {
        let mut p = ParticleDesc::new()
            .with_position(DVec2::new(0.0, 100.0))
            .build()
            .unwrap();
        p.integrate(1.0, DVec2::new(0.0, -10.0));
        assert_eq!(p.velocity(), DVec2::new(0.0, -10.0));
        // Explicit Euler would leave the position at 100.
        assert_eq!(p.position(), DVec2::new(0.0, 90.0));
    }

    #[test]
    fn integrate_without_acceleration_is_linear_motion() {
        let mut p = ParticleDesc::new()
            .with_velocity(DVec2::new(2.0, -1.0))
            .build()
            .unwrap();
        p.integrate(0.5, DVec2::ZERO);
        assert!((p.position() - DVec2::new(1.0, -0.5)).length() < 1e-12);
        assert_eq!(p.velocity(), DVec2::new(2.0, -1.0));
    }

    #[test]
    fn kinetic_energy_and_momentum() {
        // |v|^2 = 25, m = 2
        let p = ParticleDesc::new()
            .with_velocity(DVec2::new(3.0, 4.0))
            .with_mass(2.0)
            .build()
            .unwrap();
        assert!((p.kinetic_energy() - 25.0).abs() < 1e-12);
        assert_eq!(p.momentum(), DVec2::new(6.0, 8.0));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = at(0.0, 0.0, 1.0);
        let b = at(3.0, 4.0, 1.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn touching_discs_do_not_collide() {
        let a = at(0.0, 0.0, 1.0);
        let b = at(2.0, 0.0, 1.0);
        assert_eq!(a.distance_to(&b), 2.0);
        assert!(!a.collides_with(&b));
        assert!(!b.collides_with(&a));
    }

    #[test]
    fn overlapping_discs_collide() {
        let a = at(0.0, 0.0, 1.0);
        let b = at(1.5, 0.0, 1.0);
        assert!(a.collides_with(&b));
        let far = at(10.0, 0.0, 1.0);
        assert!(!a.collides_with(&far));
    }

    #[test]
    fn display_lists_all_fields() {
        let p = ParticleDesc::new().with_mass(2.5).build().unwrap();
        let s = p.to_string();
        assert!(s.starts_with("Particle(position=(0, 0)"));
        assert!(s.contains("mass=2.5"));
        assert!(s.contains("radius=1"));
    }
}
