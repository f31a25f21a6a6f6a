use log::debug;

use crate::{errors::RiemannError, traffic_flux::TrafficFlux};

use super::{traffic::connect, RiemannSolution, RiemannSolver, WaveSegment};

/// The qualitative regimes of the LWR Riemann problem with a speed limit jump at `x = 0`.
///
/// A regime is named after the traffic on both sides of the interface (free flow:
/// `q <= 1/2`, congested: `q > 1/2`) and after whether the flux through the
/// interface is limited by what the left can send (demand) or by what the
/// right can receive (supply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficRegime {
    /// `f_0 = f_l(q_l)`: the left state reaches the interface untouched.
    FreeFreeDemand,
    /// `f_0 = v_r / 4`: transonic on the right, a shock backs up on the left.
    FreeFreeSupply,
    /// `f_0 = f_l(q_l)`
    FreeCongestedDemand,
    /// `f_0 = f_r(q_r)`: the right state reaches the interface untouched.
    FreeCongestedSupply,
    /// `f_0 = v_l / 4`: transonic on the left.
    CongestedFreeDemand,
    /// `f_0 = v_r / 4`
    CongestedFreeSupply,
    /// `f_0 = v_l / 4`: transonic on the left.
    CongestedCongestedDemand,
    /// `f_0 = f_r(q_r)`
    CongestedCongestedSupply,
}

impl TrafficRegime {
    /// Decision table: (left congested, right congested, demand limits the flux) -> regime.
    ///
    /// The demand of the left side is `f_l(q_l)` in free flow and `v_l / 4`
    /// when congested, the supply of the right side is `v_r / 4` in free flow
    /// and `f_r(q_r)` when congested. Ties are resolved as demand limited, in
    /// which case both sides give the same flux.
    pub fn classify(left: &TrafficFlux, right: &TrafficFlux, q_l: f64, q_r: f64) -> Self {
        let left_congested = q_l > 0.5;
        let right_congested = q_r > 0.5;
        let demand_limited = left.demand(q_l) <= right.supply(q_r);
        match (left_congested, right_congested, demand_limited) {
            (false, false, true) => TrafficRegime::FreeFreeDemand,
            (false, false, false) => TrafficRegime::FreeFreeSupply,
            (false, true, true) => TrafficRegime::FreeCongestedDemand,
            (false, true, false) => TrafficRegime::FreeCongestedSupply,
            (true, false, true) => TrafficRegime::CongestedFreeDemand,
            (true, false, false) => TrafficRegime::CongestedFreeSupply,
            (true, true, true) => TrafficRegime::CongestedCongestedDemand,
            (true, true, false) => TrafficRegime::CongestedCongestedSupply,
        }
    }

    /// The flux through the interface, one of `f_l(q_l)`, `f_r(q_r)`, `v_l / 4`, `v_r / 4`.
    pub fn interface_flux(
        &self,
        left: &TrafficFlux,
        right: &TrafficFlux,
        q_l: f64,
        q_r: f64,
    ) -> f64 {
        match self {
            TrafficRegime::FreeFreeDemand | TrafficRegime::FreeCongestedDemand => left.flux(q_l),
            TrafficRegime::FreeCongestedSupply | TrafficRegime::CongestedCongestedSupply => {
                right.flux(q_r)
            }
            TrafficRegime::CongestedFreeDemand | TrafficRegime::CongestedCongestedDemand => {
                left.capacity()
            }
            TrafficRegime::FreeFreeSupply | TrafficRegime::CongestedFreeSupply => {
                right.capacity()
            }
        }
    }
}

/// Exact Riemann solver for the LWR traffic model with speed limit `v_l` for
/// `x < 0` and `v_r` for `x > 0`.
///
/// The solution always contains a stationary jump at `x = 0` across which the
/// flux is continuous, preceded by a left going wave and followed by a right
/// going wave when these have nonzero strength.
#[derive(Debug, Clone, Copy)]
pub struct VariableSpeedTrafficSolver {
    left: TrafficFlux,
    right: TrafficFlux,
}

impl VariableSpeedTrafficSolver {
    pub fn new(v_l: f64, v_r: f64) -> Result<Self, RiemannError> {
        Ok(Self {
            left: TrafficFlux::new(v_l)?,
            right: TrafficFlux::new(v_r)?,
        })
    }

    pub fn left_flux(&self) -> &TrafficFlux {
        &self.left
    }

    pub fn right_flux(&self) -> &TrafficFlux {
        &self.right
    }

    /// Interface flux and the densities directly left and right of the interface.
    fn resolve(&self, q_l: f64, q_r: f64) -> Result<(f64, f64, f64), RiemannError> {
        TrafficFlux::check_density(q_l)?;
        TrafficFlux::check_density(q_r)?;
        let regime = TrafficRegime::classify(&self.left, &self.right, q_l, q_r);
        let f_0 = regime.interface_flux(&self.left, &self.right, q_l, q_r);
        debug!("Traffic regime {regime:?} with interface flux {f_0:.6e}");

        // Left of the interface only left going waves are possible: either the
        // left state itself or a congested state.
        let q_l_star = if self.left.flux(q_l) == f_0 {
            q_l
        } else {
            self.left.congested_density(f_0)
        };
        // Similarly only free flow states can emit right going waves.
        let q_r_star = if self.right.flux(q_r) == f_0 {
            q_r
        } else {
            self.right.free_flow_density(f_0)
        };

        Ok((f_0, q_l_star, q_r_star))
    }

    /// Densities directly left and right of the interface.
    pub fn interface_densities(&self, q_l: f64, q_r: f64) -> Result<(f64, f64), RiemannError> {
        let (_, q_l_star, q_r_star) = self.resolve(q_l, q_r)?;
        Ok((q_l_star, q_r_star))
    }

    /// Godunov flux through the interface.
    pub fn solve_for_flux(&self, q_l: f64, q_r: f64) -> Result<f64, RiemannError> {
        let (f_0, _, _) = self.resolve(q_l, q_r)?;
        Ok(f_0)
    }
}

impl RiemannSolver for VariableSpeedTrafficSolver {
    type State = f64;

    fn solve(&self, left: &f64, right: &f64) -> Result<RiemannSolution<f64>, RiemannError> {
        let (q_l, q_r) = (*left, *right);
        let (q_l_star, q_r_star) = self.interface_densities(q_l, q_r)?;

        let mut waves = Vec::with_capacity(3);
        if q_l_star != q_l {
            waves.push(connect(&self.left, q_l, q_l_star));
        }
        waves.push(WaveSegment::StationaryJump {
            left: q_l_star,
            right: q_r_star,
        });
        if q_r_star != q_r {
            waves.push(connect(&self.right, q_r_star, q_r));
        }

        Ok(RiemannSolution::new(q_l, q_r, waves))
    }
}
