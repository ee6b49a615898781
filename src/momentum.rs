//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::{functions::sqr, Float};
use nalgebra::SVector;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Squared Minkowski norm of a 4-momentum, in the (+, -, -, -) convention
///
/// For the 4-momentum of a physical particle, this is the squared invariant
/// mass. Nothing prevents building a 4-momentum for which it is negative.
///
pub fn minkowski_norm_squared(m: &Momentum) -> Float {
    sqr(m[E]) - m.xyz().norm_squared()
}

/// Minkowski scalar product of two 4-momenta
#[allow(dead_code)]
pub fn minkowski_dot(p: &Momentum, q: &Momentum) -> Float {
    p[E] * q[E] - p.xyz().dot(&q.xyz())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn coordinate_consts_match_storage_order() {
        let p: Momentum = vector![1., 2., 3., 4.];
        assert_eq!(p[X], 1.);
        assert_eq!(p[Y], 2.);
        assert_eq!(p[Z], 3.);
        assert_eq!(p[E], 4.);
    }

    #[test]
    fn minkowski_norm_of_a_lightlike_momentum_vanishes() {
        let p: Momentum = vector![3., 4., 0., 5.];
        assert_eq!(minkowski_norm_squared(&p), 0.);
    }

    #[test]
    fn minkowski_dot_is_symmetric_and_consistent_with_the_norm() {
        let p: Momentum = vector![1., 2., 3., 10.];
        let q: Momentum = vector![-4., 5., -6., 20.];
        assert_eq!(minkowski_dot(&p, &q), minkowski_dot(&q, &p));
        assert_eq!(minkowski_dot(&p, &p), minkowski_norm_squared(&p));
    }
}
