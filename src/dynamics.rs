//! Closed-form dynamics: two-body collision resolution, restitution
//! estimation, kinetic-energy bookkeeping and a thin force layer.
//!
//! Everything here is a pure function over immutable inputs. Validation
//! happens at the entry of each public operation; a call either returns a
//! fully valid result or an error, never a partial or clamped one.

pub mod collision;
pub use collision::{
    collision_1d, collision_1d_q, collision_2d, collision_2d_q, collision_3d, collision_3d_q,
    restitution_coefficient, restitution_coefficient_nd, restitution_coefficient_nd_q,
    restitution_coefficient_q, CollisionError, Restitution,
};

pub mod energy;
pub use energy::{
    collision_energy_loss, collision_energy_loss_q, kinetic_energy, kinetic_energy_q,
    resolve_energy_loss_1d, resolve_energy_loss_2d, resolve_energy_loss_3d, CollisionOutcome,
    EnergyBalance,
};

pub mod forces;
pub use forces::{
    net_force, net_force_q, solve_second_law, weight, work, work_constant_force, ForceError,
    SecondLawKnowns, SecondLawSolution, STANDARD_GRAVITY,
};
