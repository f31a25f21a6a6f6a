use std::fmt::Debug;

use rayon::prelude::*;

/// A state type that can appear in a self-similar Riemann solution.
///
/// The interior of a rarefaction fan is known in closed form for every
/// supported system, the `Fan` type holds whatever is needed to evaluate it.
pub trait SelfSimilar: Copy + Debug + Send + Sync {
    type Fan: Copy + Debug + Send + Sync;

    /// The state inside the fan at similarity coordinate `xi`.
    fn sample_fan(fan: &Self::Fan, xi: f64) -> Self;
}

/// How a genuinely nonlinear field connects a known state to a middle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Shock,
    Rarefaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Shock,
    Rarefaction,
    Contact,
    StationaryJump,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveSpeed {
    Discontinuity(f64),
    /// Characteristic speeds at the left and right edge of a rarefaction.
    Fan(f64, f64),
}

impl WaveSpeed {
    pub fn lower(&self) -> f64 {
        match self {
            WaveSpeed::Discontinuity(speed) => *speed,
            WaveSpeed::Fan(lower, _) => *lower,
        }
    }

    pub fn upper(&self) -> f64 {
        match self {
            WaveSpeed::Discontinuity(speed) => *speed,
            WaveSpeed::Fan(_, upper) => *upper,
        }
    }
}

/// A single wave separating two constant states.
#[derive(Debug, Clone, Copy)]
pub enum WaveSegment<S: SelfSimilar> {
    Shock {
        left: S,
        right: S,
        speed: f64,
    },
    Rarefaction {
        left: S,
        right: S,
        speeds: (f64, f64),
        fan: S::Fan,
    },
    Contact {
        left: S,
        right: S,
        speed: f64,
    },
    /// Jump at a stationary interface (`xi = 0`) between two flux functions.
    StationaryJump {
        left: S,
        right: S,
    },
}

impl<S: SelfSimilar> WaveSegment<S> {
    pub fn left(&self) -> S {
        match self {
            WaveSegment::Shock { left, .. }
            | WaveSegment::Rarefaction { left, .. }
            | WaveSegment::Contact { left, .. }
            | WaveSegment::StationaryJump { left, .. } => *left,
        }
    }

    pub fn right(&self) -> S {
        match self {
            WaveSegment::Shock { right, .. }
            | WaveSegment::Rarefaction { right, .. }
            | WaveSegment::Contact { right, .. }
            | WaveSegment::StationaryJump { right, .. } => *right,
        }
    }

    pub fn kind(&self) -> WaveKind {
        match self {
            WaveSegment::Shock { .. } => WaveKind::Shock,
            WaveSegment::Rarefaction { .. } => WaveKind::Rarefaction,
            WaveSegment::Contact { .. } => WaveKind::Contact,
            WaveSegment::StationaryJump { .. } => WaveKind::StationaryJump,
        }
    }

    pub fn speed(&self) -> WaveSpeed {
        match self {
            WaveSegment::Shock { speed, .. } | WaveSegment::Contact { speed, .. } => {
                WaveSpeed::Discontinuity(*speed)
            }
            WaveSegment::Rarefaction { speeds, .. } => WaveSpeed::Fan(speeds.0, speeds.1),
            WaveSegment::StationaryJump { .. } => WaveSpeed::Discontinuity(0.),
        }
    }
}

/// The self-similar solution of a Riemann problem.
///
/// Waves are stored from left to right. The right state of every wave is the
/// left state of the next one.
#[derive(Debug, Clone)]
pub struct RiemannSolution<S: SelfSimilar> {
    left: S,
    right: S,
    waves: Vec<WaveSegment<S>>,
}

impl<S: SelfSimilar> RiemannSolution<S> {
    pub(crate) fn new(left: S, right: S, waves: Vec<WaveSegment<S>>) -> Self {
        debug_assert!(
            waves
                .windows(2)
                .all(|w| w[0].speed().upper() <= w[1].speed().lower()),
            "Waves are not ordered by speed: {:?}",
            waves
        );
        Self { left, right, waves }
    }

    pub fn left(&self) -> S {
        self.left
    }

    pub fn right(&self) -> S {
        self.right
    }

    pub fn waves(&self) -> &[WaveSegment<S>] {
        &self.waves
    }

    /// The left state, every intermediate state and the right state, in order.
    pub fn states(&self) -> Vec<S> {
        let mut states = Vec::with_capacity(self.waves.len() + 1);
        states.push(self.left);
        states.extend(self.waves.iter().map(|wave| wave.right()));
        states
    }

    pub fn speeds(&self) -> Vec<WaveSpeed> {
        self.waves.iter().map(|wave| wave.speed()).collect()
    }

    pub fn wave_kinds(&self) -> Vec<WaveKind> {
        self.waves.iter().map(|wave| wave.kind()).collect()
    }

    /// Largest absolute signal speed, e.g. for a CFL time step estimate.
    pub fn max_speed(&self) -> f64 {
        self.waves
            .iter()
            .map(|wave| {
                let speed = wave.speed();
                speed.lower().abs().max(speed.upper().abs())
            })
            .fold(0., f64::max)
    }

    /// Sample the solution at `xi = x / t`.
    ///
    /// At the exact location of a discontinuity the state to its right is returned.
    pub fn evaluate(&self, xi: f64) -> S {
        for wave in &self.waves {
            match wave {
                WaveSegment::Rarefaction {
                    left, speeds, fan, ..
                } => {
                    if xi < speeds.0 {
                        return *left;
                    }
                    if xi < speeds.1 {
                        return S::sample_fan(fan, xi);
                    }
                }
                WaveSegment::Shock { left, speed, .. }
                | WaveSegment::Contact { left, speed, .. } => {
                    if xi < *speed {
                        return *left;
                    }
                }
                WaveSegment::StationaryJump { left, .. } => {
                    if xi < 0. {
                        return *left;
                    }
                }
            }
        }
        self.right
    }

    /// Sample the solution at every coordinate of `xi`, in parallel.
    pub fn evaluate_many(&self, xi: &[f64]) -> Vec<S> {
        xi.par_iter().map(|&xi| self.evaluate(xi)).collect()
    }

    /// The state at `xi = 0`, i.e. the Godunov state of the interface.
    pub fn interface_state(&self) -> S {
        self.evaluate(0.)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Scalar(f64);

    #[derive(Debug, Clone, Copy)]
    struct LinearFan;

    impl SelfSimilar for Scalar {
        type Fan = LinearFan;

        fn sample_fan(_fan: &LinearFan, xi: f64) -> Self {
            Scalar(xi)
        }
    }

    fn solution() -> RiemannSolution<Scalar> {
        RiemannSolution::new(
            Scalar(-2.),
            Scalar(5.),
            vec![
                WaveSegment::Rarefaction {
                    left: Scalar(-2.),
                    right: Scalar(-1.),
                    speeds: (-2., -1.),
                    fan: LinearFan,
                },
                WaveSegment::StationaryJump {
                    left: Scalar(-1.),
                    right: Scalar(3.),
                },
                WaveSegment::Shock {
                    left: Scalar(3.),
                    right: Scalar(5.),
                    speed: 2.,
                },
            ],
        )
    }

    #[test]
    fn test_states_and_speeds() {
        let solution = solution();
        assert_eq!(
            solution.states(),
            vec![Scalar(-2.), Scalar(-1.), Scalar(3.), Scalar(5.)]
        );
        assert_eq!(
            solution.speeds(),
            vec![
                WaveSpeed::Fan(-2., -1.),
                WaveSpeed::Discontinuity(0.),
                WaveSpeed::Discontinuity(2.)
            ]
        );
        assert_eq!(
            solution.wave_kinds(),
            vec![WaveKind::Rarefaction, WaveKind::StationaryJump, WaveKind::Shock]
        );
        assert_approx_eq!(f64, solution.max_speed(), 2.);
    }

    #[test]
    fn test_evaluate() {
        let solution = solution();
        assert_eq!(solution.evaluate(-10.), Scalar(-2.));
        assert_approx_eq!(f64, solution.evaluate(-1.5).0, -1.5);
        assert_eq!(solution.evaluate(-0.5), Scalar(-1.));
        // Right continuous at discontinuities
        assert_eq!(solution.evaluate(0.), Scalar(3.));
        assert_eq!(solution.interface_state(), Scalar(3.));
        assert_eq!(solution.evaluate(1.), Scalar(3.));
        assert_eq!(solution.evaluate(2.), Scalar(5.));
        assert_eq!(solution.evaluate(10.), Scalar(5.));
    }

    #[test]
    fn test_evaluate_many() {
        let solution = solution();
        let xi = vec![-10., -1.5, -0.5, 0., 1., 2., 10.];
        let sampled = solution.evaluate_many(&xi);
        assert_eq!(sampled.len(), xi.len());
        for (&xi, sample) in xi.iter().zip(sampled) {
            assert_eq!(sample, solution.evaluate(xi));
        }
    }

    #[test]
    fn test_no_waves() {
        let solution = RiemannSolution::new(Scalar(1.), Scalar(1.), vec![]);
        assert_eq!(solution.states(), vec![Scalar(1.)]);
        assert_eq!(solution.evaluate(0.), Scalar(1.));
        assert_approx_eq!(f64, solution.max_speed(), 0.);
    }
}
