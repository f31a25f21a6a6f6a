//! Exact Riemann solvers.
//!
//! Every solver resolves the middle states between a left and right constant
//! state and returns an immutable [`RiemannSolution`] that can be sampled at any
//! similarity coordinate `xi = x / t`.

mod exact;
mod solution;
mod traffic;
mod variable_speed;

pub use exact::{EulerFan, ExactRiemannSolver, IterationParameters, StarState};
pub use solution::{Connection, RiemannSolution, SelfSimilar, WaveKind, WaveSegment, WaveSpeed};
pub use traffic::{TrafficFan, TrafficRiemannSolver};
pub use variable_speed::{TrafficRegime, VariableSpeedTrafficSolver};

use crate::errors::RiemannError;

/// Common interface of all exact Riemann solvers.
pub trait RiemannSolver {
    type State: SelfSimilar;

    /// Solve the Riemann problem with the given left and right states.
    fn solve(
        &self,
        left: &Self::State,
        right: &Self::State,
    ) -> Result<RiemannSolution<Self::State>, RiemannError>;
}
