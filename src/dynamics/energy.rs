//! Kinetic-energy bookkeeping around a collision.

use super::collision::{
    self, collision_1d, CollisionError, Restitution,
};
use crate::math::{Vec2, Vec3, VectorLike};
use crate::units::{Dimension, DimensionError, Quantity, JOULE};

/// Energy "gained" past this relative tolerance is flagged as anomalous.
/// Rounding near e=1 can produce negligible gains; those stay unflagged.
pub const ENERGY_GAIN_TOL: f64 = 1e-9;

/// Kinetic energy `½·m·|v|²` of one particle. Fails on non-positive mass.
pub fn kinetic_energy<V: VectorLike>(mass: f64, v: V) -> Result<f64, CollisionError> {
    if !(mass > 0.0) {
        return Err(CollisionError::InvalidMass { mass });
    }
    Ok(0.5 * mass * v.mag_sq())
}

fn expect_mass(q: Quantity) -> Result<f64, CollisionError> {
    if q.dimension() != Dimension::MASS {
        return Err(DimensionError::Mismatch {
            left: q.dimension(),
            right: Dimension::MASS,
        }
        .into());
    }
    Ok(q.base_value())
}

fn expect_velocity<V: VectorLike>(q: Quantity<V>) -> Result<V, CollisionError> {
    if q.dimension() != Dimension::VELOCITY {
        return Err(DimensionError::Mismatch {
            left: q.dimension(),
            right: Dimension::VELOCITY,
        }
        .into());
    }
    Ok(q.base_value())
}

/// Quantity-aware kinetic energy, returned in joules.
pub fn kinetic_energy_q<V: VectorLike>(
    mass: Quantity,
    v: Quantity<V>,
) -> Result<Quantity, CollisionError> {
    let ke = kinetic_energy(expect_mass(mass)?, expect_velocity(v)?)?;
    Ok(Quantity::new(ke, JOULE))
}

/// Total kinetic energy of the pair before and after a collision.
///
/// `loss` is positive when energy was dissipated. `anomalous_gain` is an
/// advisory flag, not an error: it marks an input combination that gained
/// energy beyond rounding, which a restitution coefficient in `[0, 1]`
/// cannot produce.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct EnergyBalance {
    pub before: f64,
    pub after: f64,
    pub loss: f64,
    pub anomalous_gain: bool,
}

impl EnergyBalance {
    fn from_totals(before: f64, after: f64) -> Self {
        let gain = after - before;
        Self {
            before,
            after,
            loss: -gain,
            anomalous_gain: gain > ENERGY_GAIN_TOL * before.abs().max(1.0),
        }
    }
}

/// Full result of a resolved-then-audited collision:
/// final velocities plus the energy account.
#[derive(Clone, Copy, Debug)]
pub struct CollisionOutcome<V> {
    pub v1_final: V,
    pub v2_final: V,
    pub energy: EnergyBalance,
}

/// Energy balance of a collision whose final velocities are already known.
pub fn collision_energy_loss<V: VectorLike>(
    m1: f64,
    v1i: V,
    m2: f64,
    v2i: V,
    v1f: V,
    v2f: V,
) -> Result<EnergyBalance, CollisionError> {
    let before = kinetic_energy(m1, v1i)? + kinetic_energy(m2, v2i)?;
    let after = kinetic_energy(m1, v1f)? + kinetic_energy(m2, v2f)?;
    let balance = EnergyBalance::from_totals(before, after);
    if balance.anomalous_gain {
        log::debug!(
            "collision gained energy: {} J -> {} J",
            balance.before,
            balance.after
        );
    }
    Ok(balance)
}

/// Resolve a 1D collision with the given restitution coefficient and
/// account for its energy in one step.
pub fn resolve_energy_loss_1d(
    m1: f64,
    v1i: f64,
    m2: f64,
    v2i: f64,
    e: Restitution,
) -> Result<CollisionOutcome<f64>, CollisionError> {
    let (v1f, v2f) = collision_1d(m1, v1i, m2, v2i, e)?;
    Ok(CollisionOutcome {
        v1_final: v1f,
        v2_final: v2f,
        energy: collision_energy_loss(m1, v1i, m2, v2i, v1f, v2f)?,
    })
}

/// Resolve a 2D collision along `normal` and account for its energy.
pub fn resolve_energy_loss_2d(
    m1: f64,
    v1i: Vec2,
    m2: f64,
    v2i: Vec2,
    normal: Vec2,
    e: Restitution,
) -> Result<CollisionOutcome<Vec2>, CollisionError> {
    let (v1f, v2f) = collision::collision_2d(m1, v1i, m2, v2i, normal, e)?;
    Ok(CollisionOutcome {
        v1_final: v1f,
        v2_final: v2f,
        energy: collision_energy_loss(m1, v1i, m2, v2i, v1f, v2f)?,
    })
}

/// Resolve a 3D collision along `normal` and account for its energy.
pub fn resolve_energy_loss_3d(
    m1: f64,
    v1i: Vec3,
    m2: f64,
    v2i: Vec3,
    normal: Vec3,
    e: Restitution,
) -> Result<CollisionOutcome<Vec3>, CollisionError> {
    let (v1f, v2f) = collision::collision_3d(m1, v1i, m2, v2i, normal, e)?;
    Ok(CollisionOutcome {
        v1_final: v1f,
        v2_final: v2f,
        energy: collision_energy_loss(m1, v1i, m2, v2i, v1f, v2f)?,
    })
}

/// Quantity-aware energy balance; all totals are in joules.
/// Delegates to [`collision_energy_loss`] after unit conversion, so an
/// anomalous gain is reported the same way on both entry points.
pub fn collision_energy_loss_q<V: VectorLike>(
    m1: Quantity,
    v1i: Quantity<V>,
    m2: Quantity,
    v2i: Quantity<V>,
    v1f: Quantity<V>,
    v2f: Quantity<V>,
) -> Result<EnergyBalance, CollisionError> {
    collision_energy_loss(
        expect_mass(m1)?,
        expect_velocity(v1i)?,
        expect_mass(m2)?,
        expect_velocity(v2i)?,
        expect_velocity(v1f)?,
        expect_velocity(v2f)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{GRAM, KILOGRAM, METER_PER_SECOND};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn elastic_collision_conserves_energy() {
        let out = resolve_energy_loss_1d(2.0, 3.0, 5.0, -1.0, Restitution::ELASTIC).unwrap();
        assert!(close(out.energy.before, 11.5));
        assert!(close(out.energy.after, 11.5));
        assert!(out.energy.loss.abs() < 1e-9);
        assert!(!out.energy.anomalous_gain);
    }

    #[test]
    fn partial_restitution_dissipates_energy() {
        let e = Restitution::new(0.5).unwrap();
        let out = resolve_energy_loss_1d(2.0, 3.0, 5.0, -1.0, e).unwrap();
        assert!(out.energy.loss > 0.0);
        assert!(out.energy.after < out.energy.before);
        assert!(!out.energy.anomalous_gain);

        // matches the hand-computed delta from the resolved velocities
        let (v1f, v2f) = collision_1d(2.0, 3.0, 5.0, -1.0, e).unwrap();
        let after = 0.5 * 2.0 * v1f * v1f + 0.5 * 5.0 * v2f * v2f;
        assert!(close(out.energy.loss, 11.5 - after));
    }

    #[test]
    fn energy_bound_holds_across_restitution_range() {
        for i in 0..=10 {
            let e = Restitution::new(i as f64 / 10.0).unwrap();
            let out = resolve_energy_loss_3d(
                2.0,
                Vec3::new(3.0, 2.0, 1.0),
                4.0,
                Vec3::new(-1.0, 0.5, -0.5),
                Vec3::new(1.0, -1.0, 2.0),
                e,
            )
            .unwrap();
            assert!(out.energy.after <= out.energy.before + 1e-9);
            assert!(!out.energy.anomalous_gain);
        }
    }

    #[test]
    fn inconsistent_finals_flag_a_gain() {
        // final speeds larger than anything e <= 1 could produce
        let balance = collision_energy_loss(2.0, 3.0, 5.0, -1.0, 10.0, -10.0).unwrap();
        assert!(balance.anomalous_gain);
        assert!(balance.loss < 0.0);
    }

    #[test]
    fn kinetic_energy_validates_mass() {
        assert!(matches!(
            kinetic_energy(-1.0, 2.0),
            Err(CollisionError::InvalidMass { .. })
        ));
        assert!(close(kinetic_energy(2.0, Vec2::new(3.0, 4.0)).unwrap(), 25.0));
    }

    #[test]
    fn quantity_balance_matches_plain_variant_including_gain_flag() {
        // final speeds larger than anything e <= 1 could produce
        let plain = collision_energy_loss(2.0, 3.0, 5.0, -1.0, 10.0, -10.0).unwrap();
        let q = collision_energy_loss_q(
            Quantity::new(2000.0, GRAM),
            Quantity::new(3.0, METER_PER_SECOND),
            Quantity::new(5.0, KILOGRAM),
            Quantity::new(-1.0, METER_PER_SECOND),
            Quantity::new(10.0, METER_PER_SECOND),
            Quantity::new(-10.0, METER_PER_SECOND),
        )
        .unwrap();
        assert_eq!(q, plain);
        assert!(q.anomalous_gain);
    }

    #[test]
    fn quantity_energy_is_in_joules() {
        let ke = kinetic_energy_q(
            Quantity::new(2000.0, GRAM),
            Quantity::new(3.0, METER_PER_SECOND),
        )
        .unwrap();
        assert_eq!(ke.unit(), JOULE);
        assert!(close(ke.value(), 9.0));

        let balance = collision_energy_loss_q(
            Quantity::new(2.0, KILOGRAM),
            Quantity::new(3.0, METER_PER_SECOND),
            Quantity::new(5000.0, GRAM),
            Quantity::new(-1.0, METER_PER_SECOND),
            Quantity::new(-19.0 / 7.0, METER_PER_SECOND),
            Quantity::new(9.0 / 7.0, METER_PER_SECOND),
        )
        .unwrap();
        assert!(close(balance.before, 11.5));
        assert!(close(balance.after, 11.5));
    }
}
