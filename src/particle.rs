//! Particles, detector tracks, and the kinematic behavior they share
//!
//! The key design constraint here is that binary operations on 4-momentum
//! carriers must preserve the concrete type of their operands: merging two
//! detector tracks yields a detector track, not a bare particle. The
//! `Kinematic` trait provides the reconstruction seam which makes this
//! possible, and every carrier gets the derived kinematic quantities in
//! exchange.

use crate::{
    momentum::{minkowski_norm_squared, Momentum, E, X, Y, Z},
    numeric::Float,
    Result,
};
use eyre::ensure;
use prefix_num_ops::real::*;
use std::{fmt::Display, ops::Add};

/// Behavior shared by everything that carries a relativistic 4-momentum
pub trait Kinematic: Sized {
    /// Access the carried 4-momentum
    fn momentum(&self) -> &Momentum;

    /// Rebuild a value of the same concrete type around a new 4-momentum
    ///
    /// Implementations must carry over every non-kinematic field of `self`
    /// unchanged, so that merging keeps the left operand's identity.
    ///
    fn with_momentum(&self, momentum: Momentum) -> Self;

    /// Squared invariant mass, i.e. the Minkowski norm of the 4-momentum
    fn mass_squared(&self) -> Float {
        minkowski_norm_squared(self.momentum())
    }

    /// Invariant mass
    ///
    /// Fails on spacelike 4-momenta (E² < |p|²), where the mass would be
    /// imaginary. Such momenta can be constructed freely, the error only
    /// surfaces here.
    ///
    fn mass(&self) -> Result<Float> {
        let m2 = self.mass_squared();
        ensure!(
            m2 >= 0.,
            "Spacelike 4-momentum (m² = {}) has no real invariant mass",
            m2
        );
        Ok(sqrt(m2))
    }

    /// Energy of the carrier
    fn energy(&self) -> Float {
        self.momentum()[E]
    }

    /// Momentum component transverse to the beam axis
    fn transverse_momentum(&self) -> Float {
        self.momentum().xy().norm()
    }

    /// Azimuthal angle around the beam axis, in radians
    fn azimuth(&self) -> Float {
        let p = self.momentum();
        atan2(p[Y], p[X])
    }

    /// Rapidity along the beam axis
    ///
    /// The light-like edge case E = ±p_z is mapped to an infinity of the
    /// appropriate sign rather than left to produce a NaN.
    ///
    fn rapidity(&self) -> Float {
        let p = self.momentum();
        if p[E] == p[Z] {
            Float::INFINITY
        } else if p[E] == -p[Z] {
            Float::NEG_INFINITY
        } else {
            0.5 * ln((p[E] + p[Z]) / (p[E] - p[Z]))
        }
    }

    /// Pseudorapidity, the purely angular stand-in for rapidity
    fn pseudorapidity(&self) -> Float {
        let p = self.momentum();
        let p_norm = p.xyz().norm();
        if p_norm == p[Z] {
            Float::INFINITY
        } else if p_norm == -p[Z] {
            Float::NEG_INFINITY
        } else {
            0.5 * ln((p_norm + p[Z]) / (p_norm - p[Z]))
        }
    }

    /// Merge with another 4-momentum carrier
    ///
    /// The result has the concrete type of `self` and carries the
    /// component-wise sum of both operands' 4-momenta. Any non-kinematic
    /// state comes from `self`, per the `with_momentum` contract.
    ///
    fn merged(&self, other: &impl Kinematic) -> Self {
        self.with_momentum(self.momentum() + other.momentum())
    }
}

/// Bare relativistic particle, fully described by its 4-momentum
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// 4-momentum of the particle
    momentum: Momentum,
}
//
impl Particle {
    /// Build a particle from its momentum components and energy
    ///
    /// The components are stored exactly as given. Nothing forces them onto
    /// a physical mass shell, see `Kinematic::mass()` for the consequences.
    ///
    pub fn new(px: Float, py: Float, pz: Float, e: Float) -> Self {
        Self {
            momentum: Momentum::new(px, py, pz, e),
        }
    }

    /// X momentum component
    pub fn px(&self) -> Float {
        self.momentum[X]
    }

    /// Y momentum component
    pub fn py(&self) -> Float {
        self.momentum[Y]
    }

    /// Z momentum component
    pub fn pz(&self) -> Float {
        self.momentum[Z]
    }
}
//
impl Kinematic for Particle {
    fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    fn with_momentum(&self, momentum: Momentum) -> Self {
        Self { momentum }
    }
}

impl Add for Particle {
    type Output = Self;

    /// Merging two particles adds up their 4-momenta
    fn add(self, rhs: Self) -> Self {
        self.merged(&rhs)
    }
}

impl Display for Particle {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            fmt,
            "(px = {}, py = {}, pz = {}, E = {})",
            self.px(),
            self.py(),
            self.pz(),
            self.energy()
        )
    }
}

/// Detector track: a particle plus the identifier it was recorded under
///
/// This is the specialized 4-momentum carrier of the program. Its extra
/// state does not participate in kinematics, but must survive every
/// kinematic operation: a merged track keeps the identifier of its left
/// operand.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Identifier of the track in the input dataset (numbered from 1)
    id: usize,

    /// Measured particle which this track records
    particle: Particle,
}
//
impl Track {
    /// Build a track from its identifier and the measured particle
    pub fn new(id: usize, particle: Particle) -> Self {
        Self { id, particle }
    }

    /// Identifier of the track
    pub fn id(&self) -> usize {
        self.id
    }
}
//
impl Kinematic for Track {
    fn momentum(&self) -> &Momentum {
        self.particle.momentum()
    }

    fn with_momentum(&self, momentum: Momentum) -> Self {
        Self {
            id: self.id,
            particle: self.particle.with_momentum(momentum),
        }
    }
}

impl Add for Track {
    type Output = Self;

    /// Merging two tracks adds up their 4-momenta and keeps the left id
    fn add(self, rhs: Self) -> Self {
        self.merged(&rhs)
    }
}

impl Display for Track {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "#{} {}", self.id, self.particle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    /// Tolerance of floating-point comparisons against literal references
    const TOLERANCE: Float = 1e-4;

    #[test]
    fn stored_components_read_back_exactly() {
        let p = Particle::new(10., 20., 30., 100.);
        assert_eq!(p.px(), 10.);
        assert_eq!(p.py(), 20.);
        assert_eq!(p.pz(), 30.);
        assert_eq!(p.energy(), 100.);
        assert_eq!(p.momentum(), &vector![10., 20., 30., 100.]);
    }

    #[test]
    fn timelike_mass() {
        // √(100² - (10² + 20² + 30²)) = √8600
        let p = Particle::new(10., 20., 30., 100.);
        assert!((p.mass().unwrap() - 92.736185).abs() < TOLERANCE);
    }

    #[test]
    fn near_boundary_mass_is_real() {
        // E² exceeds |p|² = 1700 by only ~0.2615 here, so the radicand is
        // small but positive and the mass must come out real
        let p = Particle::new(20., 30., 20., 41.234227);
        assert!(p.mass_squared() > 0.);
        assert!((p.mass().unwrap() - 0.511347).abs() < 1e-3);
    }

    #[test]
    fn spacelike_mass_is_an_error() {
        let p = Particle::new(4., 0., 3., 2.);
        assert!(p.mass().is_err());
    }

    #[test]
    fn massless_and_at_rest_limits() {
        let photon = Particle::new(3., 4., 0., 5.);
        assert!(photon.mass().unwrap().abs() < TOLERANCE);
        let at_rest = Particle::new(0., 0., 0., 1.5);
        assert!((at_rest.mass().unwrap() - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn addition_is_commutative_and_associative() {
        // Components are small integers, so these checks can be exact
        let a = Particle::new(1., -2., 3., 10.);
        let b = Particle::new(-4., 5., -6., 20.);
        let c = Particle::new(7., 8., -9., 30.);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn merging_tracks_keeps_the_concrete_type_and_left_id() {
        let t1 = Track::new(1, Particle::new(1., 0., 0., 5.));
        let t2 = Track::new(2, Particle::new(0., 1., 0., 5.));
        let merged: Track = t1 + t2;
        assert_eq!(merged.id(), 1);
        assert_eq!(merged.momentum(), &vector![1., 1., 0., 10.]);
        // Flipped around, the other operand's identity wins
        assert_eq!((t2 + t1).id(), 2);
    }

    #[test]
    fn heterogeneous_merge_keeps_self_type() {
        let track = Track::new(7, Particle::new(1., 2., 3., 10.));
        let particle = Particle::new(1., 1., 1., 4.);
        let merged = track.merged(&particle);
        assert_eq!(merged.id(), 7);
        assert_eq!(merged.energy(), 14.);
    }

    #[test]
    fn kinematic_observables() {
        let p = Particle::new(3., 4., 0., 13.);
        assert!((p.transverse_momentum() - 5.).abs() < TOLERANCE);
        assert!((p.azimuth() - 0.927295).abs() < TOLERANCE);
        // Transverse momenta have vanishing (pseudo)rapidity
        assert!(p.rapidity().abs() < TOLERANCE);
        assert!(p.pseudorapidity().abs() < TOLERANCE);
    }

    #[test]
    fn beam_aligned_momentum_has_infinite_rapidity() {
        let p = Particle::new(0., 0., 5., 5.);
        assert!(p.rapidity().is_infinite() && p.rapidity() > 0.);
        assert!(p.pseudorapidity().is_infinite() && p.pseudorapidity() > 0.);
    }
}
