//! Dimensioned quantities: runtime-checked unit-safe arithmetic
//! over scalars and vectors.
//!
//! The unit table is a fixed set of constants built into the binary;
//! there is no global registry and nothing to mutate after startup.
//! Raw, untagged numbers enter the system only through an explicit
//! [`UnitSystem`], never by silent coercion.

use std::fmt;

use crate::math::VectorLike;

/// A physical dimension as an exponent vector over the base dimensions
/// (mass, length, time, angle).
///
/// Multiplying quantities adds exponents, dividing subtracts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub angle: i8,
}

impl Dimension {
    pub const NONE: Self = Self::new(0, 0, 0, 0);
    pub const MASS: Self = Self::new(1, 0, 0, 0);
    pub const LENGTH: Self = Self::new(0, 1, 0, 0);
    pub const TIME: Self = Self::new(0, 0, 1, 0);
    pub const ANGLE: Self = Self::new(0, 0, 0, 1);
    pub const VELOCITY: Self = Self::new(0, 1, -1, 0);
    pub const ACCELERATION: Self = Self::new(0, 1, -2, 0);
    pub const MOMENTUM: Self = Self::new(1, 1, -1, 0);
    pub const FORCE: Self = Self::new(1, 1, -2, 0);
    pub const ENERGY: Self = Self::new(1, 2, -2, 0);

    pub const fn new(mass: i8, length: i8, time: i8, angle: i8) -> Self {
        Self {
            mass,
            length,
            time,
            angle,
        }
    }
}

impl std::ops::Mul for Dimension {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.mass + rhs.mass,
            self.length + rhs.length,
            self.time + rhs.time,
            self.angle + rhs.angle,
        )
    }
}

impl std::ops::Div for Dimension {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.mass - rhs.mass,
            self.length - rhs.length,
            self.time - rhs.time,
            self.angle - rhs.angle,
        )
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return write!(f, "1");
        }
        let mut first = true;
        for (sym, exp) in [
            ("kg", self.mass),
            ("m", self.length),
            ("s", self.time),
            ("rad", self.angle),
        ] {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            if exp == 1 {
                write!(f, "{sym}")?;
            } else {
                write!(f, "{sym}^{exp}")?;
            }
            first = false;
        }
        Ok(())
    }
}

/// Error raised when quantities of incompatible dimensions are combined.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    #[error("dimension mismatch: {left} is not compatible with {right}")]
    Mismatch { left: Dimension, right: Dimension },
}

/// A named unit: a symbol, the dimension it measures
/// and the factor converting a value in this unit to the base (SI) unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitDef {
    pub symbol: &'static str,
    pub dim: Dimension,
    pub factor: f64,
}

impl UnitDef {
    /// The anonymous base unit for a dimension, factor 1.
    /// Arithmetic that combines dimensions lands on these.
    pub const fn base(dim: Dimension) -> Self {
        Self {
            symbol: "",
            dim,
            factor: 1.0,
        }
    }
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{}", self.dim)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

pub const KILOGRAM: UnitDef = UnitDef {
    symbol: "kg",
    dim: Dimension::MASS,
    factor: 1.0,
};
pub const GRAM: UnitDef = UnitDef {
    symbol: "g",
    dim: Dimension::MASS,
    factor: 1e-3,
};
pub const METER: UnitDef = UnitDef {
    symbol: "m",
    dim: Dimension::LENGTH,
    factor: 1.0,
};
pub const CENTIMETER: UnitDef = UnitDef {
    symbol: "cm",
    dim: Dimension::LENGTH,
    factor: 1e-2,
};
pub const KILOMETER: UnitDef = UnitDef {
    symbol: "km",
    dim: Dimension::LENGTH,
    factor: 1e3,
};
pub const SECOND: UnitDef = UnitDef {
    symbol: "s",
    dim: Dimension::TIME,
    factor: 1.0,
};
pub const MILLISECOND: UnitDef = UnitDef {
    symbol: "ms",
    dim: Dimension::TIME,
    factor: 1e-3,
};
pub const MINUTE: UnitDef = UnitDef {
    symbol: "min",
    dim: Dimension::TIME,
    factor: 60.0,
};
pub const HOUR: UnitDef = UnitDef {
    symbol: "h",
    dim: Dimension::TIME,
    factor: 3600.0,
};
pub const RADIAN: UnitDef = UnitDef {
    symbol: "rad",
    dim: Dimension::ANGLE,
    factor: 1.0,
};
pub const DEGREE: UnitDef = UnitDef {
    symbol: "°",
    dim: Dimension::ANGLE,
    factor: std::f64::consts::PI / 180.0,
};
pub const METER_PER_SECOND: UnitDef = UnitDef {
    symbol: "m/s",
    dim: Dimension::VELOCITY,
    factor: 1.0,
};
pub const KILOMETER_PER_HOUR: UnitDef = UnitDef {
    symbol: "km/h",
    dim: Dimension::VELOCITY,
    factor: 1000.0 / 3600.0,
};
pub const METER_PER_SECOND_SQUARED: UnitDef = UnitDef {
    symbol: "m/s²",
    dim: Dimension::ACCELERATION,
    factor: 1.0,
};
pub const KILOGRAM_METER_PER_SECOND: UnitDef = UnitDef {
    symbol: "kg·m/s",
    dim: Dimension::MOMENTUM,
    factor: 1.0,
};
pub const NEWTON: UnitDef = UnitDef {
    symbol: "N",
    dim: Dimension::FORCE,
    factor: 1.0,
};
pub const JOULE: UnitDef = UnitDef {
    symbol: "J",
    dim: Dimension::ENERGY,
    factor: 1.0,
};

/// The unit assumed for raw, untagged numbers, per dimension.
///
/// Passing plain floats into the quantity layer always goes through one of
/// these, making "no unit given" an explicit choice rather than a coercion.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitSystem;

impl UnitSystem {
    /// SI base units: kilograms, meters, seconds, radians.
    pub const SI: Self = Self;

    pub fn unit_for(&self, dim: Dimension) -> UnitDef {
        match dim {
            Dimension::MASS => KILOGRAM,
            Dimension::LENGTH => METER,
            Dimension::TIME => SECOND,
            Dimension::ANGLE => RADIAN,
            Dimension::VELOCITY => METER_PER_SECOND,
            Dimension::ACCELERATION => METER_PER_SECOND_SQUARED,
            Dimension::MOMENTUM => KILOGRAM_METER_PER_SECOND,
            Dimension::FORCE => NEWTON,
            Dimension::ENERGY => JOULE,
            other => UnitDef::base(other),
        }
    }
}

/// An immutable value (scalar or 2/3-component vector) tagged with its unit.
///
/// Addition and subtraction require compatible dimensions and keep the
/// left-hand side's unit; multiplication and division combine dimensions
/// and renormalize to base units.
#[derive(Clone, Copy, Debug)]
pub struct Quantity<V = f64> {
    value: V,
    unit: UnitDef,
}

impl<V: VectorLike> Quantity<V> {
    pub fn new(value: V, unit: UnitDef) -> Self {
        Self { value, unit }
    }

    /// Tag a raw value with the SI base unit of `dim`.
    pub fn base(value: V, dim: Dimension) -> Self {
        Self::with_system(value, dim, &UnitSystem::SI)
    }

    /// Tag a raw value with the unit `system` assigns to `dim`.
    pub fn with_system(value: V, dim: Dimension, system: &UnitSystem) -> Self {
        Self {
            value,
            unit: system.unit_for(dim),
        }
    }

    #[inline]
    pub fn value(&self) -> V {
        self.value
    }
    #[inline]
    pub fn unit(&self) -> UnitDef {
        self.unit
    }
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.unit.dim
    }

    /// The value expressed in the base unit of its dimension.
    #[inline]
    pub fn base_value(&self) -> V {
        self.value.scaled(self.unit.factor)
    }

    /// Re-express this quantity in `target`, which must measure the
    /// same dimension. Only the representation changes.
    pub fn to(self, target: UnitDef) -> Result<Self, DimensionError> {
        if self.unit.dim != target.dim {
            return Err(DimensionError::Mismatch {
                left: self.unit.dim,
                right: target.dim,
            });
        }
        Ok(Self {
            value: self.value.scaled(self.unit.factor / target.factor),
            unit: target,
        })
    }

    /// The value expressed in `target` units.
    pub fn value_in(&self, target: UnitDef) -> Result<V, DimensionError> {
        self.to(target).map(|q| q.value)
    }

    /// Add a quantity of the same dimension, converting it into this
    /// quantity's unit first.
    pub fn try_add(self, rhs: Self) -> Result<Self, DimensionError> {
        let rhs = rhs.to(self.unit)?;
        Ok(Self {
            value: self.value + rhs.value,
            unit: self.unit,
        })
    }

    /// Subtract a quantity of the same dimension, converting it into this
    /// quantity's unit first.
    pub fn try_sub(self, rhs: Self) -> Result<Self, DimensionError> {
        let rhs = rhs.to(self.unit)?;
        Ok(Self {
            value: self.value - rhs.value,
            unit: self.unit,
        })
    }
}

impl<V: VectorLike> std::ops::Mul<f64> for Quantity<V> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            value: self.value.scaled(rhs),
            unit: self.unit,
        }
    }
}

impl<V: VectorLike> std::ops::Div<f64> for Quantity<V> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self {
            value: self.value.scaled(1.0 / rhs),
            unit: self.unit,
        }
    }
}

impl<V: VectorLike> std::ops::Neg for Quantity<V> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            unit: self.unit,
        }
    }
}

// Combining two quantities multiplies/divides dimensions.
// The scalar operand goes on the right so that e.g.
// `velocity * mass` has one unambiguous vector output type.
impl<V: VectorLike> std::ops::Mul<Quantity<f64>> for Quantity<V> {
    type Output = Self;
    fn mul(self, rhs: Quantity<f64>) -> Self {
        Self {
            value: self.base_value().scaled(rhs.base_value()),
            unit: UnitDef::base(self.unit.dim * rhs.unit.dim),
        }
    }
}

impl<V: VectorLike> std::ops::Div<Quantity<f64>> for Quantity<V> {
    type Output = Self;
    fn div(self, rhs: Quantity<f64>) -> Self {
        Self {
            value: self.base_value().scaled(1.0 / rhs.base_value()),
            unit: UnitDef::base(self.unit.dim / rhs.unit.dim),
        }
    }
}

impl fmt::Display for Quantity<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn conversion_rescales_value_only() {
        let d = Quantity::new(1.5, KILOMETER);
        let in_m = d.to(METER).unwrap();
        assert_eq!(in_m.value(), 1500.0);
        assert_eq!(in_m.dimension(), Dimension::LENGTH);
        // round trip
        assert!((in_m.to(KILOMETER).unwrap().value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn conversion_rejects_other_dimension() {
        let m = Quantity::new(2.0, KILOGRAM);
        assert_eq!(
            m.to(METER).unwrap_err(),
            DimensionError::Mismatch {
                left: Dimension::MASS,
                right: Dimension::LENGTH,
            }
        );
    }

    #[test]
    fn addition_converts_into_lhs_unit() {
        let total = Quantity::new(2.0, KILOGRAM)
            .try_add(Quantity::new(500.0, GRAM))
            .unwrap();
        assert_eq!(total.unit(), KILOGRAM);
        assert!((total.value() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn addition_rejects_mixed_dimensions() {
        let r = Quantity::new(1.0, METER).try_add(Quantity::new(1.0, KILOGRAM));
        assert!(matches!(r, Err(DimensionError::Mismatch { .. })));
    }

    #[test]
    fn multiplication_combines_dimensions() {
        let v = Quantity::new(Vec2::new(3.0, 4.0), METER_PER_SECOND);
        let m = Quantity::new(2000.0, GRAM);
        let p = v * m;
        assert_eq!(p.dimension(), Dimension::MOMENTUM);
        // grams were normalized to kilograms before combining
        assert_eq!(p.value(), Vec2::new(6.0, 8.0));

        let back = p / m;
        assert_eq!(back.dimension(), Dimension::VELOCITY);
        assert!((back.value() - Vec2::new(3.0, 4.0)).mag() < 1e-12);
    }

    #[test]
    fn velocity_in_km_h_round_trip() {
        let v = Quantity::new(36.0, KILOMETER_PER_HOUR);
        assert!((v.value_in(METER_PER_SECOND).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn dimension_display_names_base_units() {
        assert_eq!(Dimension::ENERGY.to_string(), "kg·m^2·s^-2");
        assert_eq!(Dimension::NONE.to_string(), "1");
        assert_eq!(Quantity::new(2.5, JOULE).to_string(), "2.5 J");
    }
}
