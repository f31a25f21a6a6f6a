use crate::{errors::RiemannError, traffic_flux::TrafficFlux};

use super::{Connection, RiemannSolution, RiemannSolver, SelfSimilar, WaveSegment};

/// Centred rarefaction of the LWR equation with speed limit `flux.v_max()`.
#[derive(Debug, Clone, Copy)]
pub struct TrafficFan {
    pub(super) flux: TrafficFlux,
}

impl SelfSimilar for f64 {
    type Fan = TrafficFan;

    fn sample_fan(fan: &TrafficFan, xi: f64) -> Self {
        fan.flux.density_at_speed(xi)
    }
}

/// Classify the wave connecting `q_l` to `q_r` for the flux `flux` and build it.
///
/// Converging characteristics (`f'(q_l) > f'(q_r)`) give a shock, diverging
/// ones a rarefaction.
pub(super) fn connect(flux: &TrafficFlux, q_l: f64, q_r: f64) -> WaveSegment<f64> {
    let speed_l = flux.characteristic_speed(q_l);
    let speed_r = flux.characteristic_speed(q_r);
    match classify(speed_l, speed_r) {
        Connection::Shock => WaveSegment::Shock {
            left: q_l,
            right: q_r,
            speed: (flux.flux(q_l) - flux.flux(q_r)) / (q_l - q_r),
        },
        Connection::Rarefaction => WaveSegment::Rarefaction {
            left: q_l,
            right: q_r,
            speeds: (speed_l, speed_r),
            fan: TrafficFan { flux: *flux },
        },
    }
}

fn classify(speed_l: f64, speed_r: f64) -> Connection {
    if speed_l > speed_r {
        Connection::Shock
    } else {
        Connection::Rarefaction
    }
}

/// Exact Riemann solver for the LWR traffic model with a constant speed limit.
#[derive(Debug, Clone, Copy)]
pub struct TrafficRiemannSolver {
    flux: TrafficFlux,
}

impl TrafficRiemannSolver {
    pub fn new(v_max: f64) -> Result<Self, RiemannError> {
        Ok(Self {
            flux: TrafficFlux::new(v_max)?,
        })
    }

    pub fn flux(&self) -> &TrafficFlux {
        &self.flux
    }

    /// Godunov flux of the traffic density through `x = 0`.
    pub fn solve_for_flux(&self, q_l: f64, q_r: f64) -> Result<f64, RiemannError> {
        let half = self.solve(&q_l, &q_r)?.interface_state();
        Ok(self.flux.flux(half))
    }
}

impl RiemannSolver for TrafficRiemannSolver {
    type State = f64;

    fn solve(&self, left: &f64, right: &f64) -> Result<RiemannSolution<f64>, RiemannError> {
        TrafficFlux::check_density(*left)?;
        TrafficFlux::check_density(*right)?;
        let wave = connect(&self.flux, *left, *right);
        Ok(RiemannSolution::new(*left, *right, vec![wave]))
    }
}
