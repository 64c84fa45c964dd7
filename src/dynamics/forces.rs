//! Newton's second law, net-force summation, weight and
//! constant-force work.
//!
//! The second-law solver takes an explicit enum naming which pair of
//! variables is known rather than a set of optional arguments, so the
//! "solve for the missing one" intent is visible in the type.

use crate::math::{Angle, VectorLike};
use crate::units::{Dimension, DimensionError, Quantity};

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ForceError {
    #[error("mass must be positive, got {mass}")]
    InvalidMass { mass: f64 },
    #[error("cannot infer a mass from zero acceleration")]
    ZeroAcceleration,
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// The known pair of `F = m·a` variables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondLawKnowns {
    ForceMass { force: f64, mass: f64 },
    ForceAcceleration { force: f64, acceleration: f64 },
    MassAcceleration { mass: f64, acceleration: f64 },
}

/// The variable the solver derived, tagged with which one it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondLawSolution {
    Force(f64),
    Mass(f64),
    Acceleration(f64),
}

impl SecondLawSolution {
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Force(x) | Self::Mass(x) | Self::Acceleration(x) => x,
        }
    }
}

fn check_mass(mass: f64) -> Result<f64, ForceError> {
    if !(mass > 0.0) {
        return Err(ForceError::InvalidMass { mass });
    }
    Ok(mass)
}

/// Solve `F = m·a` for whichever variable the known pair leaves open.
pub fn solve_second_law(knowns: SecondLawKnowns) -> Result<SecondLawSolution, ForceError> {
    use SecondLawKnowns::*;
    match knowns {
        ForceMass { force, mass } => {
            Ok(SecondLawSolution::Acceleration(force / check_mass(mass)?))
        }
        ForceAcceleration {
            force,
            acceleration,
        } => {
            if acceleration == 0.0 {
                return Err(ForceError::ZeroAcceleration);
            }
            let mass = force / acceleration;
            Ok(SecondLawSolution::Mass(check_mass(mass)?))
        }
        MassAcceleration { mass, acceleration } => {
            Ok(SecondLawSolution::Force(check_mass(mass)? * acceleration))
        }
    }
}

/// Sum of the given forces; zero for an empty slice.
pub fn net_force<V: VectorLike>(forces: &[V]) -> V {
    forces.iter().copied().fold(V::zero(), |acc, f| acc + f)
}

/// Quantity-aware net force. Every operand must be a force; mixed force
/// units are converted into the first operand's unit, an empty slice
/// sums to zero newtons.
pub fn net_force_q<V: VectorLike>(
    forces: &[Quantity<V>],
) -> Result<Quantity<V>, ForceError> {
    let mut total = match forces.first() {
        Some(first) => {
            if first.dimension() != Dimension::FORCE {
                return Err(DimensionError::Mismatch {
                    left: first.dimension(),
                    right: Dimension::FORCE,
                }
                .into());
            }
            *first
        }
        None => return Ok(Quantity::base(V::zero(), Dimension::FORCE)),
    };
    for f in &forces[1..] {
        total = total.try_add(*f).map_err(ForceError::from)?;
    }
    Ok(total)
}

/// Weight `m·g` under the given gravitational acceleration.
/// Pass [`STANDARD_GRAVITY`] for Earth surface values.
pub fn weight(mass: f64, gravity: f64) -> Result<f64, ForceError> {
    Ok(check_mass(mass)? * gravity)
}

/// Work done by a constant force over a straight displacement at the given
/// angle between them: `F·d·cos θ`.
pub fn work_constant_force(force: f64, displacement: f64, angle: Angle) -> f64 {
    force * displacement * angle.rad().cos()
}

/// Work as the dot product of a force vector and a displacement vector.
pub fn work<V: VectorLike>(force: V, displacement: V) -> f64 {
    force.dot(displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::units::NEWTON;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn second_law_round_trips() {
        let f = solve_second_law(SecondLawKnowns::MassAcceleration {
            mass: 4.0,
            acceleration: 2.5,
        })
        .unwrap();
        assert_eq!(f, SecondLawSolution::Force(10.0));

        let a = solve_second_law(SecondLawKnowns::ForceMass {
            force: 10.0,
            mass: 4.0,
        })
        .unwrap();
        assert_eq!(a, SecondLawSolution::Acceleration(2.5));

        let m = solve_second_law(SecondLawKnowns::ForceAcceleration {
            force: 10.0,
            acceleration: 2.5,
        })
        .unwrap();
        assert_eq!(m, SecondLawSolution::Mass(4.0));
    }

    #[test]
    fn second_law_rejects_bad_inputs() {
        assert!(matches!(
            solve_second_law(SecondLawKnowns::ForceMass {
                force: 1.0,
                mass: 0.0
            }),
            Err(ForceError::InvalidMass { .. })
        ));
        assert_eq!(
            solve_second_law(SecondLawKnowns::ForceAcceleration {
                force: 1.0,
                acceleration: 0.0
            })
            .unwrap_err(),
            ForceError::ZeroAcceleration
        );
        // a negative inferred mass is physically inconsistent input
        assert!(matches!(
            solve_second_law(SecondLawKnowns::ForceAcceleration {
                force: -1.0,
                acceleration: 2.0
            }),
            Err(ForceError::InvalidMass { .. })
        ));
    }

    #[test]
    fn net_force_sums_vectors() {
        let total = net_force(&[
            Vec2::new(1.0, 0.0),
            Vec2::new(-3.0, 2.0),
            Vec2::new(0.5, 0.5),
        ]);
        assert!((total - Vec2::new(-1.5, 2.5)).mag() < 1e-12);
        assert_eq!(net_force::<f64>(&[]), 0.0);
    }

    #[test]
    fn net_force_quantities_check_dimension() {
        let ok = net_force_q(&[
            Quantity::new(2.0, NEWTON),
            Quantity::new(-0.5, NEWTON),
        ])
        .unwrap();
        assert!(close(ok.value(), 1.5));

        let bad = net_force_q(&[Quantity::new(2.0, crate::units::KILOGRAM)]);
        assert!(matches!(bad, Err(ForceError::Dimension(_))));
    }

    #[test]
    fn weight_and_work_spot_values() {
        assert!(close(weight(10.0, STANDARD_GRAVITY).unwrap(), 98.0665));
        assert!(weight(0.0, STANDARD_GRAVITY).is_err());

        assert!(close(work_constant_force(10.0, 2.0, Angle::Deg(0.0)), 20.0));
        assert!(close(work_constant_force(10.0, 2.0, Angle::Deg(60.0)), 10.0));
        assert!(work_constant_force(10.0, 2.0, Angle::Deg(90.0)).abs() < 1e-9);

        assert!(close(
            work(Vec2::new(3.0, 4.0), Vec2::new(2.0, -1.0)),
            2.0
        ));
    }
}
