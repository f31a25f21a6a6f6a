use glam::DVec3;
use log::{debug, warn};
use yaml_rust::Yaml;

use crate::{
    errors::{ConfigError, RiemannError},
    gas_law::{AdiabaticIndex, GasLaw},
    physical_quantities::{Conserved, Primitive, State},
    utils::yaml_f64,
};

use super::{Connection, RiemannSolution, RiemannSolver, SelfSimilar, WaveSegment};

/// Stopping criteria of the iterative pressure solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationParameters {
    /// Relative tolerance on the middle pressure.
    pub tolerance: f64,
    /// Maximal number of Newton-Raphson and Brent iterations combined.
    pub max_iterations: usize,
}

impl Default for IterationParameters {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl IterationParameters {
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, ConfigError> {
        if !(tolerance > 0.) || !tolerance.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "tolerance".to_string(),
                value: tolerance.to_string(),
            });
        }
        if max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations".to_string(),
                value: max_iterations.to_string(),
            });
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Reads `tolerance` and `max_iterations`, falling back to the defaults.
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let default = Self::default();
        let tolerance = yaml_f64(cfg, "tolerance")?.unwrap_or(default.tolerance);
        let max_iterations = match &cfg["max_iterations"] {
            Yaml::BadValue | Yaml::Null => default.max_iterations,
            Yaml::Integer(i) if *i > 0 => *i as usize,
            value => {
                return Err(ConfigError::InvalidParameter {
                    name: "max_iterations".to_string(),
                    value: format!("{:?}", value),
                })
            }
        };
        Self::new(tolerance, max_iterations)
    }
}

/// Pressure, velocity and densities in the middle region.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StarState {
    pub rho_l: f64,
    pub rho_r: f64,
    pub u: f64,
    pub p: f64,
}

/// Closed form centred rarefaction of the Euler equations.
///
/// `sound_speed` is positive for a left facing (1-)fan, negative for a right facing (3-)fan.
#[derive(Debug, Clone, Copy)]
pub struct EulerFan {
    state: State<Primitive>,
    sound_speed: f64,
    gamma: AdiabaticIndex,
}

impl SelfSimilar for State<Primitive> {
    type Fan = EulerFan;

    /// Toro (4.56) and (4.63).
    fn sample_fan(fan: &EulerFan, xi: f64) -> Self {
        let gamma = &fan.gamma;
        let v = fan.state.velocity().x;
        let a = fan.sound_speed;
        let base = gamma.tdgp1() + gamma.gm1dgp1() * (v - xi) / a;
        let u = gamma.tdgp1() * (a + v / gamma.tdgm1() + xi);
        let velocity = fan.state.velocity();
        State::<Primitive>::new(
            fan.state.density() * base.powf(gamma.tdgm1()),
            DVec3::new(u, velocity.y, velocity.z),
            fan.state.pressure() * base.powf(gamma.gamma() * gamma.tdgm1()),
        )
    }
}

/// Exact Riemann solver for the Euler equations of an ideal gas, along the x-axis.
///
/// The transverse velocity components are advected passively and only jump
/// across the contact discontinuity.
#[derive(Debug, Clone, Copy)]
pub struct ExactRiemannSolver {
    eos: GasLaw,
    parameters: IterationParameters,
}

impl ExactRiemannSolver {
    pub fn new(eos: GasLaw) -> Self {
        Self::with_parameters(eos, IterationParameters::default())
    }

    pub fn with_parameters(eos: GasLaw, parameters: IterationParameters) -> Self {
        Self { eos, parameters }
    }

    /// Reads the gas law from the `gamma` key and the iteration parameters from
    /// the optional `solver` section.
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let eos = GasLaw::init(cfg)?;
        let parameters = IterationParameters::init(&cfg["solver"])?;
        Ok(Self::with_parameters(eos, parameters))
    }

    pub fn eos(&self) -> &GasLaw {
        &self.eos
    }

    pub fn parameters(&self) -> &IterationParameters {
        &self.parameters
    }

    fn gamma(&self) -> &AdiabaticIndex {
        self.eos.gamma()
    }

    /// Decide which wave connects `state` to a middle state with pressure `p`.
    pub fn classify(&self, p: f64, state: &State<Primitive>) -> Connection {
        if p > state.pressure() {
            Connection::Shock
        } else {
            Connection::Rarefaction
        }
    }

    /// Functions (4.6) and (4.7) in Toro.
    fn fb(&self, p: f64, state: &State<Primitive>, a: f64) -> f64 {
        let gamma = self.gamma();
        match self.classify(p, state) {
            Connection::Shock => {
                let cap_a = gamma.tdgp1() / state.density();
                let cap_b = gamma.gm1dgp1() * state.pressure();
                (p - state.pressure()) * (cap_a / (p + cap_b)).sqrt()
            }
            Connection::Rarefaction => {
                gamma.tdgm1() * a * ((p / state.pressure()).powf(gamma.gm1d2g()) - 1.)
            }
        }
    }

    /// Velocity of the middle state connected to `left` by a 1-wave with middle pressure `p`.
    ///
    /// `left` must be a physical state.
    pub fn velocity_from_left(&self, p: f64, left: &State<Primitive>) -> f64 {
        let a_l = self
            .eos
            .sound_speed_unchecked(left.pressure(), 1. / left.density());
        left.velocity().x - self.fb(p, left, a_l)
    }

    /// Velocity of the middle state connected to `right` by a 3-wave with middle pressure `p`.
    ///
    /// `right` must be a physical state.
    pub fn velocity_from_right(&self, p: f64, right: &State<Primitive>) -> f64 {
        let a_r = self
            .eos
            .sound_speed_unchecked(right.pressure(), 1. / right.density());
        right.velocity().x + self.fb(p, right, a_r)
    }

    /// Function (4.5) in Toro
    fn f(
        &self,
        p: f64,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> f64 {
        self.fb(p, left, a_l) + self.fb(p, right, a_r) + (v_r - v_l)
    }

    /// Function (4.37) in Toro
    fn fprimeb(&self, p: f64, state: &State<Primitive>, a: f64) -> f64 {
        let gamma = self.gamma();
        match self.classify(p, state) {
            Connection::Shock => {
                let cap_a = gamma.tdgp1() / state.density();
                let cap_b = gamma.gm1dgp1() * state.pressure();
                (1. - 0.5 * (p - state.pressure()) / (cap_b + p)) * (cap_a / (p + cap_b)).sqrt()
            }
            Connection::Rarefaction => {
                1. / state.density() / a * (p / state.pressure()).powf(-gamma.gm1d2g())
            }
        }
    }

    /// The derivative of riemann_f w.r.t. p
    fn fprime(
        &self,
        p: f64,
        left: &State<Primitive>,
        right: &State<Primitive>,
        a_l: f64,
        a_r: f64,
    ) -> f64 {
        self.fprimeb(p, left, a_l) + self.fprimeb(p, right, a_r)
    }

    /// Bottom function of (4.48) in Toro
    fn gb(&self, p: f64, state: &State<Primitive>) -> f64 {
        let gamma = self.gamma();
        let cap_a = gamma.tdgp1() / state.density();
        let cap_b = gamma.gm1dgp1() * state.pressure();
        (cap_a / (p + cap_b)).sqrt()
    }

    /// Get a good first guess for the pressure in the iterative scheme
    ///
    /// This function is based on (4.47) and (4.48) in Toro and on the
    /// FORTRAN code provided in Toro p.156-157
    fn guess_p(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> f64 {
        let gamma = self.gamma();
        let p_min = left.pressure().min(right.pressure());
        let p_max = left.pressure().max(right.pressure());
        let q_max = p_max / p_min;
        let ppv = 0.5 * (left.pressure() + right.pressure())
            - 0.125 * (v_r - v_l) * (left.density() + right.density()) * (a_l + a_r);
        let ppv = ppv.max(1e-8);
        let p_guess = if q_max <= 2. && p_min <= ppv && ppv <= p_max {
            ppv
        } else if ppv < p_min {
            // two rarefactions: exact, and arbitrarily small close to vacuum
            let base = (a_l + a_r - 0.5 * (gamma.gamma() - 1.) * (v_r - v_l))
                / (a_l / left.pressure().powf(gamma.gm1d2g())
                    + a_r / right.pressure().powf(gamma.gm1d2g()));
            return base.powf(1. / gamma.gm1d2g()).max(f64::MIN_POSITIVE);
        } else {
            // two shocks
            (self.gb(ppv, left) * left.pressure() + self.gb(ppv, right) * right.pressure() - v_r
                + v_l)
                / (self.gb(ppv, left) + self.gb(ppv, right))
        };

        p_guess.max(1e-8)
    }

    /// Find the zeropoint of riemann_f(p) in `[lower_lim, upper_lim]` using Brent's method
    fn solve_brent(
        &self,
        lower_lim: f64,
        upper_lim: f64,
        low_f: f64,
        up_f: f64,
        max_iterations: usize,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> Result<(f64, usize), RiemannError> {
        let error_tol = self.parameters.tolerance;
        let mut a = lower_lim;
        let mut b = upper_lim;
        let mut c;
        let mut d = f64::INFINITY;

        let mut fa = low_f;
        let mut fb = up_f;
        let mut fc;

        let mut s;
        let mut fs;

        if fa * fb > 0. {
            return Err(RiemannError::NoConvergence {
                iterations: 0,
                estimate: upper_lim,
            });
        }

        // if |f(a)| < |f(b)| then swap (a,b)
        if fa.abs() < fb.abs() {
            (a, b) = (b, a);
            (fa, fb) = (fb, fa);
        }

        c = a;
        fc = fa;
        let mut mflag = true;
        let mut counter = 0;

        while fb != 0. && (a - b).abs() > error_tol * 0.5 * (a + b) {
            if counter >= max_iterations {
                return Err(RiemannError::NoConvergence {
                    iterations: counter,
                    estimate: b,
                });
            }
            counter += 1;

            s = if fa != fc && fb != fc {
                // Inverse quadratic interpolation
                a * fb * fc / (fa - fb) / (fa - fc)
                    + b * fa * fc / (fb - fa) / (fb - fc)
                    + c * fa * fb / (fc - fa) / (fc - fb)
            } else {
                // Secant rule
                b - fb * (b - a) / (fb - fa)
            };

            let tmp = 0.25 * (3. * a + b);

            if !((s > tmp && s < b) || (s < tmp && s > b))
                || (mflag && (s - b).abs() >= (0.5 * (b - c).abs()))
                || (!mflag && (s - b).abs() >= (0.5 * (c - d).abs()))
                || (mflag && (b - c).abs() < 0.5 * error_tol * (b + c))
                || (!mflag && (c - d).abs() < 0.5 * error_tol * (c + d))
            {
                s = 0.5 * (a + b);
                mflag = true;
            } else {
                mflag = false;
            }

            fs = self.f(s, left, right, v_l, v_r, a_l, a_r);
            d = c;
            c = b;
            fc = fb;
            if fa * fs < 0. {
                b = s;
                fb = fs;
            } else {
                a = s;
                fa = fs;
            }

            // if |f(a)| < |f(b)| then swap (a,b)
            if fa.abs() < fb.abs() {
                (a, b) = (b, a);
                (fa, fb) = (fb, fa);
            }
        }

        Ok((b, counter))
    }

    /// Solve riemann_f(p) = 0 for the middle pressure.
    ///
    /// We normally use a Newton-Raphson iteration to find the zeropoint
    /// of riemann_f(p), but if pstar is close to 0, we risk negative p values.
    /// Since riemann_f(p) is undefined for negative pressures, we use Brent's
    /// method as soon as an interval containing the root is known.
    fn solve_for_pressure(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> Result<f64, RiemannError> {
        let tol = self.parameters.tolerance;
        let max_iterations = self.parameters.max_iterations;
        let mut p = 0.;
        let mut p_guess = self.guess_p(left, right, v_l, v_r, a_l, a_r);
        let fp = self.f(p, left, right, v_l, v_r, a_l, a_r);
        let mut fp_guess = self.f(p_guess, left, right, v_l, v_r, a_l, a_r);
        let mut counter = 0;
        if fp * fp_guess >= 0. {
            // Newton-Raphson until convergence or until suitable interval is found
            // to use Brent's method
            while (p - p_guess).abs() > tol * 0.5 * (p + p_guess) && fp_guess < 0.0 {
                if counter >= max_iterations {
                    warn!("Newton-Raphson iteration did not converge after {counter} iterations");
                    return Err(RiemannError::NoConvergence {
                        iterations: counter,
                        estimate: p_guess,
                    });
                }
                p = p_guess;
                p_guess -= fp_guess / self.fprime(p_guess, left, right, a_l, a_r);
                fp_guess = self.f(p_guess, left, right, v_l, v_r, a_l, a_r);
                counter += 1;
            }
        }

        // As soon as there is a suitable interval: use Brent's method
        if (p - p_guess).abs() > tol * 0.5 * (p + p_guess) && fp_guess > 0. {
            let (p, brent_iterations) = self
                .solve_brent(
                    0.,
                    p_guess,
                    fp,
                    fp_guess,
                    max_iterations.saturating_sub(counter),
                    left,
                    right,
                    v_l,
                    v_r,
                    a_l,
                    a_r,
                )
                .map_err(|err| {
                    warn!("Brent's method did not converge: {err}");
                    match err {
                        RiemannError::NoConvergence {
                            iterations,
                            estimate,
                        } => RiemannError::NoConvergence {
                            iterations: iterations + counter,
                            estimate,
                        },
                        err => err,
                    }
                })?;
            debug!(
                "Middle pressure {p:.6e} found after {counter} Newton-Raphson and {brent_iterations} Brent iterations"
            );
            Ok(p)
        } else {
            debug!("Middle pressure {p_guess:.6e} found after {counter} Newton-Raphson iterations");
            Ok(p_guess)
        }
    }

    fn shock_middle_density(&self, pdps: f64, state: &State<Primitive>) -> f64 {
        let gm1dgp1 = self.gamma().gm1dgp1();
        state.density() * (pdps + gm1dgp1) / (gm1dgp1 * pdps + 1.)
    }

    fn rarefaction_middle_density(&self, pdps: f64, state: &State<Primitive>) -> f64 {
        state.density() * pdps.powf(self.gamma().gamma_inv())
    }

    fn middle_density(&self, p: f64, state: &State<Primitive>) -> f64 {
        let pdps = p / state.pressure();
        match self.classify(p, state) {
            Connection::Shock => self.shock_middle_density(pdps, state),
            Connection::Rarefaction => self.rarefaction_middle_density(pdps, state),
        }
    }

    fn sound_speeds(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
    ) -> Result<(f64, f64), RiemannError> {
        left.check_physical()?;
        right.check_physical()?;
        let a_l = self.eos.sound_speed(left)?;
        let a_r = self.eos.sound_speed(right)?;

        let v_r_m_v_l = right.velocity().x - left.velocity().x;
        let critical = self.gamma().tdgm1() * (a_l + a_r);
        if critical <= v_r_m_v_l {
            warn!("Vacuum generation: v_r - v_l = {v_r_m_v_l:.4e} >= {critical:.4e}");
            return Err(RiemannError::VacuumFormation {
                velocity_difference: v_r_m_v_l,
                critical,
            });
        }

        Ok((a_l, a_r))
    }

    /// Solve for the middle pressure, velocity and densities only.
    pub fn solve_for_star_state(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
    ) -> Result<StarState, RiemannError> {
        let (a_l, a_r) = self.sound_speeds(left, right)?;
        self.star_state(left, right, a_l, a_r)
    }

    fn star_state(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        a_l: f64,
        a_r: f64,
    ) -> Result<StarState, RiemannError> {
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let p = self.solve_for_pressure(left, right, v_l, v_r, a_l, a_r)?;

        // calculate the velocity in the intermediate state
        let u = 0.5 * (v_l + v_r) + 0.5 * (self.fb(p, right, a_r) - self.fb(p, left, a_l));

        // calculate the left and right intermediate densities
        let rho_l = self.middle_density(p, left);
        let rho_r = self.middle_density(p, right);

        Ok(StarState { rho_l, rho_r, u, p })
    }

    /// Solve the Riemann problem given in conserved variables.
    pub fn solve_conserved(
        &self,
        left: &State<Conserved>,
        right: &State<Conserved>,
    ) -> Result<RiemannSolution<State<Primitive>>, RiemannError> {
        self.solve(
            &State::<Primitive>::from_conserved(left, &self.eos),
            &State::<Primitive>::from_conserved(right, &self.eos),
        )
    }

    /// The Godunov flux: the Euler flux of the solution sampled at `x / t = 0`.
    pub fn solve_for_flux(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
    ) -> Result<State<Conserved>, RiemannError> {
        let half = self.solve(left, right)?.interface_state();
        Ok(half.flux(&self.eos))
    }
}

impl RiemannSolver for ExactRiemannSolver {
    type State = State<Primitive>;

    fn solve(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
    ) -> Result<RiemannSolution<State<Primitive>>, RiemannError> {
        let (a_l, a_r) = self.sound_speeds(left, right)?;
        let star = self.star_state(left, right, a_l, a_r)?;
        let gamma = *self.gamma();
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;

        let left_star = State::<Primitive>::new(
            star.rho_l,
            DVec3::new(star.u, left.velocity().y, left.velocity().z),
            star.p,
        );
        let right_star = State::<Primitive>::new(
            star.rho_r,
            DVec3::new(star.u, right.velocity().y, right.velocity().z),
            star.p,
        );

        let left_wave = match self.classify(star.p, left) {
            Connection::Shock => WaveSegment::Shock {
                left: *left,
                right: left_star,
                speed: v_l
                    - a_l * (gamma.gp1d2g() * star.p / left.pressure() + gamma.gm1d2g()).sqrt(),
            },
            Connection::Rarefaction => {
                let a_star = a_l * (star.p / left.pressure()).powf(gamma.gm1d2g());
                WaveSegment::Rarefaction {
                    left: *left,
                    right: left_star,
                    speeds: (v_l - a_l, star.u - a_star),
                    fan: EulerFan {
                        state: *left,
                        sound_speed: a_l,
                        gamma,
                    },
                }
            }
        };
        let contact = WaveSegment::Contact {
            left: left_star,
            right: right_star,
            speed: star.u,
        };
        let right_wave = match self.classify(star.p, right) {
            Connection::Shock => WaveSegment::Shock {
                left: right_star,
                right: *right,
                speed: v_r
                    + a_r * (gamma.gp1d2g() * star.p / right.pressure() + gamma.gm1d2g()).sqrt(),
            },
            Connection::Rarefaction => {
                let a_star = a_r * (star.p / right.pressure()).powf(gamma.gm1d2g());
                WaveSegment::Rarefaction {
                    left: right_star,
                    right: *right,
                    speeds: (star.u + a_star, v_r + a_r),
                    fan: EulerFan {
                        state: *right,
                        sound_speed: -a_r,
                        gamma,
                    },
                }
            }
        };

        Ok(RiemannSolution::new(
            *left,
            *right,
            vec![left_wave, contact, right_wave],
        ))
    }
}
