//! Exact Riemann solvers for the Euler equations of an ideal gas and for the
//! LWR traffic flow model, with a constant or a piecewise constant speed limit.
//!
//! Every solver returns an immutable [`RiemannSolution`] which can be sampled
//! at any similarity coordinate `xi = x / t`.

pub use errors::{ConfigError, RiemannError};
pub use problem::{RiemannProblem, Solution};
pub use riemann_solver::{
    ExactRiemannSolver, RiemannSolution, RiemannSolver, TrafficRiemannSolver,
    VariableSpeedTrafficSolver,
};

mod errors;
pub mod gas_law;
pub mod physical_quantities;
mod problem;
pub mod riemann_solver;
pub mod traffic_flux;
mod utils;
