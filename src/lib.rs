//! # Kinetica
//!
//! Closed-form collision mechanics with unit-safe arithmetic.
//!
//! ## Architecture
//!
//! - `math`: vector aliases over `ultraviolet`, normalized-vector wrapper,
//!   normal/tangential decomposition
//! - `units`: dimensioned quantities with a fixed unit table and
//!   runtime-checked arithmetic
//! - `dynamics`: 1D/2D/3D collision resolvers, restitution estimation,
//!   energy bookkeeping, Newton's second law

pub mod math;
pub use math::{decompose, uv, Angle, DegenerateVectorError, Unit, Vec2, Vec3, VectorLike};

pub mod units;
pub use units::{Dimension, DimensionError, Quantity, UnitDef, UnitSystem};

pub mod dynamics;
pub use dynamics::{
    collision::{
        collision_1d, collision_2d, collision_3d, restitution_coefficient,
        restitution_coefficient_nd, CollisionError, Restitution,
    },
    energy::{kinetic_energy, CollisionOutcome, EnergyBalance},
    forces::{solve_second_law, SecondLawKnowns, SecondLawSolution},
};
