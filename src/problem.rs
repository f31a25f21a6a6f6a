use glam::DVec3;
use log::info;
use yaml_rust::Yaml;

use crate::{
    errors::{ConfigError, RiemannError},
    physical_quantities::{Primitive, State},
    riemann_solver::{
        ExactRiemannSolver, RiemannSolution, RiemannSolver, TrafficRiemannSolver,
        VariableSpeedTrafficSolver,
    },
    utils::{yaml_dvec3, yaml_f64, yaml_f64_required},
};

/// A fully configured Riemann problem: the solver and both initial states.
#[derive(Debug, Clone, Copy)]
pub enum RiemannProblem {
    Euler {
        left: State<Primitive>,
        right: State<Primitive>,
        solver: ExactRiemannSolver,
    },
    Traffic {
        left: f64,
        right: f64,
        solver: TrafficRiemannSolver,
    },
    VariableSpeedTraffic {
        left: f64,
        right: f64,
        solver: VariableSpeedTrafficSolver,
    },
}

/// The solution of a [`RiemannProblem`], for either system.
#[derive(Debug, Clone)]
pub enum Solution {
    Euler(RiemannSolution<State<Primitive>>),
    Traffic(RiemannSolution<f64>),
}

impl Solution {
    pub fn as_euler(&self) -> Option<&RiemannSolution<State<Primitive>>> {
        match self {
            Solution::Euler(solution) => Some(solution),
            Solution::Traffic(_) => None,
        }
    }

    pub fn as_traffic(&self) -> Option<&RiemannSolution<f64>> {
        match self {
            Solution::Traffic(solution) => Some(solution),
            Solution::Euler(_) => None,
        }
    }

    pub fn max_speed(&self) -> f64 {
        match self {
            Solution::Euler(solution) => solution.max_speed(),
            Solution::Traffic(solution) => solution.max_speed(),
        }
    }
}

fn euler_state(cfg: &Yaml, side: &str) -> Result<State<Primitive>, ConfigError> {
    let state_cfg = &cfg[side];
    if state_cfg.is_badvalue() {
        return Err(ConfigError::MissingParameter(side.to_string()));
    }
    let density = yaml_f64_required(state_cfg, "density", side)?;
    let velocity = yaml_dvec3(state_cfg, "velocity")?.unwrap_or(DVec3::ZERO);
    let pressure = yaml_f64_required(state_cfg, "pressure", side)?;
    Ok(State::<Primitive>::new(density, velocity, pressure))
}

fn traffic_density(cfg: &Yaml, side: &str) -> Result<f64, ConfigError> {
    let state_cfg = &cfg[side];
    if state_cfg.is_badvalue() {
        return Err(ConfigError::MissingParameter(side.to_string()));
    }
    yaml_f64_required(state_cfg, "density", side)
}

fn traffic_problem(cfg: &Yaml) -> Result<RiemannProblem, RiemannError> {
    let left = traffic_density(cfg, "left")?;
    let right = traffic_density(cfg, "right")?;
    let speed_limit = yaml_f64(cfg, "speed_limit")?;
    let speed_limit_left = yaml_f64(cfg, "speed_limit_left")?;
    let speed_limit_right = yaml_f64(cfg, "speed_limit_right")?;

    match (speed_limit, speed_limit_left, speed_limit_right) {
        (Some(v_max), None, None) => Ok(RiemannProblem::Traffic {
            left,
            right,
            solver: TrafficRiemannSolver::new(v_max)?,
        }),
        (None, None, None) => Ok(RiemannProblem::Traffic {
            left,
            right,
            solver: TrafficRiemannSolver::new(1.)?,
        }),
        (None, Some(v_l), Some(v_r)) => Ok(RiemannProblem::VariableSpeedTraffic {
            left,
            right,
            solver: VariableSpeedTrafficSolver::new(v_l, v_r)?,
        }),
        (Some(_), _, _) => Err(ConfigError::ConflictingParameters(
            "speed_limit cannot be combined with speed_limit_left or speed_limit_right".to_string(),
        )
        .into()),
        (None, _, _) => Err(ConfigError::ConflictingParameters(
            "speed_limit_left and speed_limit_right must be given together".to_string(),
        )
        .into()),
    }
}

impl RiemannProblem {
    /// Reads a problem from its yaml description.
    ///
    /// The `system` key selects `"euler"` (the default) or `"traffic"`. Every
    /// physical parameter is validated here, so a successfully read problem only
    /// fails to solve on non-physical states or when the pressure iteration
    /// does not converge.
    pub fn init(cfg: &Yaml) -> Result<Self, RiemannError> {
        let system = match &cfg["system"] {
            Yaml::BadValue | Yaml::Null => "euler".to_string(),
            Yaml::String(system) => system.clone(),
            other => {
                return Err(ConfigError::InvalidParameter {
                    name: "system".to_string(),
                    value: format!("{other:?}"),
                }
                .into())
            }
        };
        let problem = match system.as_str() {
            "euler" => RiemannProblem::Euler {
                left: euler_state(cfg, "left")?,
                right: euler_state(cfg, "right")?,
                solver: ExactRiemannSolver::init(cfg)?,
            },
            "traffic" => traffic_problem(cfg)?,
            _ => return Err(ConfigError::UnknownSystem(system).into()),
        };
        info!("Configured {system} Riemann problem");
        Ok(problem)
    }

    pub fn solve(&self) -> Result<Solution, RiemannError> {
        match self {
            RiemannProblem::Euler {
                left,
                right,
                solver,
            } => Ok(Solution::Euler(solver.solve(left, right)?)),
            RiemannProblem::Traffic {
                left,
                right,
                solver,
            } => Ok(Solution::Traffic(solver.solve(left, right)?)),
            RiemannProblem::VariableSpeedTraffic {
                left,
                right,
                solver,
            } => Ok(Solution::Traffic(solver.solve(left, right)?)),
        }
    }
}
