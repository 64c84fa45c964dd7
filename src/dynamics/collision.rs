//! Closed-form two-body collision resolution along a contact normal,
//! plus the inverse problem of estimating a restitution coefficient
//! from measured velocities.

use crate::math::{decompose, DegenerateVectorError, Unit, Vec2, Vec3, VectorLike};
use crate::units::{Dimension, DimensionError, Quantity};

/// Relative approach speeds below this count as "not approaching"
/// when estimating a restitution coefficient.
pub const APPROACH_EPS: f64 = 1e-12;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CollisionError {
    #[error("mass must be positive, got {mass}")]
    InvalidMass { mass: f64 },
    #[error("restitution coefficient must be within [0, 1], got {e}")]
    InvalidRestitution { e: f64 },
    #[error("contact normal is degenerate: {0}")]
    DegenerateNormal(#[from] DegenerateVectorError),
    #[error("bodies have no relative velocity along the contact normal")]
    ZeroRelativeVelocity,
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// A validated coefficient of restitution.
///
/// 1 is a perfectly elastic collision, 0 a perfectly inelastic one.
/// The regular constructor rejects anything outside `[0, 1]`;
/// energy-generating collisions (`e > 1`) exist in some models
/// (think explosive separation) and require the explicit
/// [`superelastic`](Self::superelastic) opt-in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Restitution(f64);

// Deserialization funnels through the same [0, 1] check as `new`;
// out-of-range coefficients never enter through serde either.
impl TryFrom<f64> for Restitution {
    type Error = CollisionError;

    fn try_from(e: f64) -> Result<Self, Self::Error> {
        Restitution::new(e)
    }
}

impl From<Restitution> for f64 {
    fn from(e: Restitution) -> f64 {
        e.0
    }
}

impl Restitution {
    pub const ELASTIC: Self = Restitution(1.0);
    pub const PLASTIC: Self = Restitution(0.0);

    pub fn new(e: f64) -> Result<Self, CollisionError> {
        if !(0.0..=1.0).contains(&e) {
            return Err(CollisionError::InvalidRestitution { e });
        }
        Ok(Restitution(e))
    }

    /// Allow coefficients above 1. Never the default; callers asking for
    /// this know their collision adds energy.
    pub fn superelastic(e: f64) -> Result<Self, CollisionError> {
        if !e.is_finite() || e < 0.0 {
            return Err(CollisionError::InvalidRestitution { e });
        }
        Ok(Restitution(e))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

fn check_mass(mass: f64) -> Result<(), CollisionError> {
    // the negated comparison also rejects NaN
    if !(mass > 0.0) {
        return Err(CollisionError::InvalidMass { mass });
    }
    Ok(())
}

/// Resolve a two-body collision along a single axis.
///
/// Solves momentum conservation together with the restitution relation
/// `v2f − v1f = −e·(v2i − v1i)`:
///
/// ```text
/// v1f = ((m1 − e·m2)·v1i + (1+e)·m2·v2i) / (m1 + m2)
/// v2f = ((m2 − e·m1)·v2i + (1+e)·m1·v1i) / (m1 + m2)
/// ```
///
/// All values are in consistent units (use the quantity-aware
/// [`collision_1d_q`] for mixed-unit inputs). This is the kernel the
/// 2D and 3D resolvers reduce to.
pub fn collision_1d(
    m1: f64,
    v1i: f64,
    m2: f64,
    v2i: f64,
    e: Restitution,
) -> Result<(f64, f64), CollisionError> {
    check_mass(m1)?;
    check_mass(m2)?;
    let e = e.get();
    let total = m1 + m2;
    let v1f = ((m1 - e * m2) * v1i + (1.0 + e) * m2 * v2i) / total;
    let v2f = ((m2 - e * m1) * v2i + (1.0 + e) * m1 * v1i) / total;
    log::trace!("1d collision e={e}: ({v1i}, {v2i}) -> ({v1f}, {v2f})");
    Ok((v1f, v2f))
}

/// The N-dimensional resolution shared by [`collision_2d`] and
/// [`collision_3d`]. Momentum is exchanged only along the contact normal;
/// tangential components pass through untouched (frictionless contact).
fn collision_along_normal<V: VectorLike>(
    m1: f64,
    v1i: V,
    m2: f64,
    v2i: V,
    normal: V,
    e: Restitution,
) -> Result<(V, V), CollisionError> {
    check_mass(m1)?;
    check_mass(m2)?;
    let n = Unit::new_normalize(normal)?;

    let (v1_n, v1_t) = decompose(v1i, n);
    let (v2_n, v2_t) = decompose(v2i, n);
    let (v1_n_f, v2_n_f) = collision_1d(m1, v1_n, m2, v2_n, e)?;

    Ok((n.scaled(v1_n_f) + v1_t, n.scaled(v2_n_f) + v2_t))
}

/// Resolve a 2D collision given the contact normal (need not be normalized,
/// must be non-zero).
pub fn collision_2d(
    m1: f64,
    v1i: Vec2,
    m2: f64,
    v2i: Vec2,
    normal: Vec2,
    e: Restitution,
) -> Result<(Vec2, Vec2), CollisionError> {
    collision_along_normal(m1, v1i, m2, v2i, normal, e)
}

/// Resolve a 3D collision given the contact normal (need not be normalized,
/// must be non-zero).
pub fn collision_3d(
    m1: f64,
    v1i: Vec3,
    m2: f64,
    v2i: Vec3,
    normal: Vec3,
    e: Restitution,
) -> Result<(Vec3, Vec3), CollisionError> {
    collision_along_normal(m1, v1i, m2, v2i, normal, e)
}

/// Estimate the restitution coefficient from measured 1D velocities:
/// the ratio of separation to approach speed.
///
/// Undefined (and an error) when the bodies were not approaching.
pub fn restitution_coefficient(
    v1i: f64,
    v2i: f64,
    v1f: f64,
    v2f: f64,
) -> Result<f64, CollisionError> {
    let approach = v2i - v1i;
    if approach.abs() <= APPROACH_EPS {
        return Err(CollisionError::ZeroRelativeVelocity);
    }
    Ok(-(v2f - v1f) / approach)
}

/// Estimate the restitution coefficient from measured velocity vectors,
/// projected onto the given contact normal.
pub fn restitution_coefficient_nd<V: VectorLike>(
    v1i: V,
    v2i: V,
    v1f: V,
    v2f: V,
    normal: V,
) -> Result<f64, CollisionError> {
    let n = Unit::new_normalize(normal)?;
    let approach = (v2i - v1i).dot(*n);
    if approach.abs() <= APPROACH_EPS {
        return Err(CollisionError::ZeroRelativeVelocity);
    }
    Ok(-(v2f - v1f).dot(*n) / approach)
}

/// Quantity-aware variant of [`restitution_coefficient`]: the four measured
/// velocities may arrive in mixed velocity units and are brought to a common
/// base before the ratio is taken.
pub fn restitution_coefficient_q(
    v1i: Quantity,
    v2i: Quantity,
    v1f: Quantity,
    v2f: Quantity,
) -> Result<f64, CollisionError> {
    restitution_coefficient(
        expect_dim(v1i, Dimension::VELOCITY)?,
        expect_dim(v2i, Dimension::VELOCITY)?,
        expect_dim(v1f, Dimension::VELOCITY)?,
        expect_dim(v2f, Dimension::VELOCITY)?,
    )
}

/// Quantity-aware variant of [`restitution_coefficient_nd`]. The normal is a
/// bare direction and carries no unit.
pub fn restitution_coefficient_nd_q<V: VectorLike>(
    v1i: Quantity<V>,
    v2i: Quantity<V>,
    v1f: Quantity<V>,
    v2f: Quantity<V>,
    normal: V,
) -> Result<f64, CollisionError> {
    restitution_coefficient_nd(
        expect_dim(v1i, Dimension::VELOCITY)?,
        expect_dim(v2i, Dimension::VELOCITY)?,
        expect_dim(v1f, Dimension::VELOCITY)?,
        expect_dim(v2f, Dimension::VELOCITY)?,
        normal,
    )
}

fn expect_dim<V: VectorLike>(
    q: Quantity<V>,
    dim: Dimension,
) -> Result<V, CollisionError> {
    if q.dimension() != dim {
        return Err(DimensionError::Mismatch {
            left: q.dimension(),
            right: dim,
        }
        .into());
    }
    Ok(q.base_value())
}

/// Quantity-aware variant of [`collision_1d`]: masses and velocities may
/// arrive in any mass/velocity units (grams with kilograms, km/h with m/s).
/// Results come back in the unit of `v1i`.
pub fn collision_1d_q(
    m1: Quantity,
    v1i: Quantity,
    m2: Quantity,
    v2i: Quantity,
    e: Restitution,
) -> Result<(Quantity, Quantity), CollisionError> {
    let (v1f, v2f) = collision_1d(
        expect_dim(m1, Dimension::MASS)?,
        expect_dim(v1i, Dimension::VELOCITY)?,
        expect_dim(m2, Dimension::MASS)?,
        expect_dim(v2i, Dimension::VELOCITY)?,
        e,
    )?;
    let out = v1i.unit();
    Ok((
        Quantity::base(v1f, Dimension::VELOCITY).to(out)?,
        Quantity::base(v2f, Dimension::VELOCITY).to(out)?,
    ))
}

/// Quantity-aware variant of [`collision_2d`]. The normal is a bare
/// direction and carries no unit.
pub fn collision_2d_q(
    m1: Quantity,
    v1i: Quantity<Vec2>,
    m2: Quantity,
    v2i: Quantity<Vec2>,
    normal: Vec2,
    e: Restitution,
) -> Result<(Quantity<Vec2>, Quantity<Vec2>), CollisionError> {
    collision_nd_q(m1, v1i, m2, v2i, normal, e)
}

/// Quantity-aware variant of [`collision_3d`].
pub fn collision_3d_q(
    m1: Quantity,
    v1i: Quantity<Vec3>,
    m2: Quantity,
    v2i: Quantity<Vec3>,
    normal: Vec3,
    e: Restitution,
) -> Result<(Quantity<Vec3>, Quantity<Vec3>), CollisionError> {
    collision_nd_q(m1, v1i, m2, v2i, normal, e)
}

fn collision_nd_q<V: VectorLike>(
    m1: Quantity,
    v1i: Quantity<V>,
    m2: Quantity,
    v2i: Quantity<V>,
    normal: V,
    e: Restitution,
) -> Result<(Quantity<V>, Quantity<V>), CollisionError> {
    let (v1f, v2f) = collision_along_normal(
        expect_dim(m1, Dimension::MASS)?,
        expect_dim(v1i, Dimension::VELOCITY)?,
        expect_dim(m2, Dimension::MASS)?,
        expect_dim(v2i, Dimension::VELOCITY)?,
        normal,
        e,
    )?;
    let out = v1i.unit();
    Ok((
        Quantity::base(v1f, Dimension::VELOCITY).to(out)?,
        Quantity::base(v2f, Dimension::VELOCITY).to(out)?,
    ))
}
