//! Types, aliases and helper operations for doing math with `ultraviolet`.
use std::f64::consts::PI;
pub use ultraviolet as uv;

pub type Vec2 = uv::DVec2;
pub type Vec3 = uv::DVec3;

/// Magnitudes below this are treated as zero when a direction is required.
pub const DEGENERATE_EPS: f64 = 1e-12;

/// Error returned when an operation needs a direction
/// but the given vector has no defined one.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("zero-length vector has no direction")]
pub struct DegenerateVectorError;

/// An angle in either degrees or radians.
/// Default conversion from f64 is in degrees.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Angle {
    Rad(f64),
    Deg(f64),
}
impl Angle {
    /// Get the angle as degrees.
    #[inline]
    pub fn deg(&self) -> f64 {
        match self {
            Angle::Rad(rad) => rad * 180.0 / PI,
            Angle::Deg(deg) => *deg,
        }
    }

    /// Get the angle as radians.
    #[inline]
    pub fn rad(&self) -> f64 {
        match self {
            Angle::Rad(rad) => *rad,
            Angle::Deg(deg) => deg * PI / 180.0,
        }
    }
}
impl Default for Angle {
    fn default() -> Self {
        Angle::Rad(0.0)
    }
}

/// The operations collision math needs from a velocity or force value,
/// available on plain scalars as well as 2D and 3D vectors.
///
/// Implementing this for `f64` lets the 1D formulas, the energy bookkeeping
/// and the quantity layer share one code path with the vector cases.
pub trait VectorLike:
    Copy
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Neg<Output = Self>
{
    fn zero() -> Self;
    fn dot(self, other: Self) -> f64;
    fn scaled(self, s: f64) -> Self;

    #[inline]
    fn mag_sq(self) -> f64 {
        self.dot(self)
    }
    #[inline]
    fn mag(self) -> f64 {
        self.mag_sq().sqrt()
    }
}

impl VectorLike for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }
    #[inline]
    fn dot(self, other: Self) -> f64 {
        self * other
    }
    #[inline]
    fn scaled(self, s: f64) -> Self {
        self * s
    }
}

impl VectorLike for Vec2 {
    #[inline]
    fn zero() -> Self {
        Vec2::zero()
    }
    #[inline]
    fn dot(self, other: Self) -> f64 {
        Vec2::dot(&self, other)
    }
    #[inline]
    fn scaled(self, s: f64) -> Self {
        self * s
    }
}

impl VectorLike for Vec3 {
    #[inline]
    fn zero() -> Self {
        Vec3::zero()
    }
    #[inline]
    fn dot(self, other: Self) -> f64 {
        Vec3::dot(&self, other)
    }
    #[inline]
    fn scaled(self, s: f64) -> Self {
        self * s
    }
}

/// A wrapper type to indicate a vector should always be normalized.
#[derive(Clone, Copy, Debug)]
pub struct Unit<V>(V);

impl<V: VectorLike> Unit<V> {
    /// Normalize a vector, failing when its magnitude is (numerically) zero.
    pub fn new_normalize(v: V) -> Result<Self, DegenerateVectorError> {
        let mag = v.mag();
        if mag <= DEGENERATE_EPS {
            return Err(DegenerateVectorError);
        }
        Ok(Unit(v.scaled(1.0 / mag)))
    }

    /// Wrap a vector that is already known to be normalized.
    pub const fn new_unchecked(v: V) -> Self {
        Unit(v)
    }
}

impl<T> std::ops::Deref for Unit<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Neg for Unit<T>
where
    T: std::ops::Neg,
{
    type Output = Unit<<T as std::ops::Neg>::Output>;

    fn neg(self) -> Self::Output {
        Unit(-self.0)
    }
}

/// Split `v` into its signed projection along `n` and the tangential remainder.
///
/// `v == n * projection + tangential` holds exactly (up to rounding).
/// This is what reduces an N-dimensional collision to a 1D problem
/// along the line of impact.
#[inline]
pub fn decompose<V: VectorLike>(v: V, n: Unit<V>) -> (f64, V) {
    let along = v.dot(*n);
    (along, v - n.scaled(along))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(
            Unit::new_normalize(Vec2::zero()).unwrap_err(),
            DegenerateVectorError
        );
        assert!(Unit::new_normalize(Vec3::new(0.0, 1e-15, 0.0)).is_err());
        assert!(Unit::new_normalize(Vec2::new(0.0, -2.0)).is_ok());
    }

    #[test]
    fn decompose_splits_orthogonally() {
        let v = Vec2::new(3.0, 2.0);
        let n = Unit::new_normalize(Vec2::new(1.0, 1.0)).unwrap();
        let (along, tangential) = decompose(v, n);

        // components recombine into the original vector
        let recombined = n.scaled(along) + tangential;
        assert!((recombined - v).mag() < 1e-12);
        // tangential part carries no component along the normal
        assert!(tangential.dot(*n).abs() < 1e-12);
        assert!((along - 5.0 / 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn decompose_scalar_case() {
        let n = Unit::new_normalize(-1.0).unwrap();
        let (along, tangential) = decompose(4.0, n);
        assert!((along + 4.0).abs() < 1e-12);
        assert!(tangential.abs() < 1e-12);
    }

    #[test]
    fn angle_conversions() {
        assert!((Angle::Deg(180.0).rad() - PI).abs() < 1e-12);
        assert!((Angle::Rad(PI / 2.0).deg() - 90.0).abs() < 1e-12);
    }
}
