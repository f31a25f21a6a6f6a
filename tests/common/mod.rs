use exact_riemann::{
    gas_law::GasLaw,
    physical_quantities::{Primitive, State},
    ExactRiemannSolver, RiemannProblem, RiemannSolution,
};
use float_cmp::assert_approx_eq;
use yaml_rust::YamlLoader;

pub const EOS_CONFIG: &'static str = r##"
gamma: 1.4
"##;

pub const SOLVER_CONFIG: &'static str = r##"
gamma: 1.4
solver:
  tolerance: 1e-12
  max_iterations: 100
"##;

pub const SOD_CONFIG: &'static str = r##"
system: "euler"
gamma: 1.4
left:
  density: 3.
  velocity: 0.
  pressure: 3.
right:
  density: 1.
  velocity: 0.
  pressure: 1.
solver:
  tolerance: 1e-12
"##;

pub const COLLIDING_FLOWS_CONFIG: &'static str = r##"
system: "euler"
gamma: 1.4
left:
  density: 1.
  velocity: 3.
  pressure: 1.
right:
  density: 1.
  velocity: -3.
  pressure: 1.
solver:
  tolerance: 1e-12
"##;

pub const RED_LIGHT_CONFIG: &'static str = r##"
system: "traffic"
left:
  density: 0.2
right:
  density: 1.
speed_limit: 1.
"##;

pub const GREEN_LIGHT_CONFIG: &'static str = r##"
system: "traffic"
left:
  density: 1.
right:
  density: 0.
speed_limit: 1.
"##;

pub fn get_eos(cfg: &str) -> GasLaw {
    GasLaw::init(&YamlLoader::load_from_str(cfg).expect("Error loading EOS cfg!")[0])
        .expect("Error creating GasLaw!")
}

pub fn get_solver(cfg: &str) -> ExactRiemannSolver {
    ExactRiemannSolver::init(&YamlLoader::load_from_str(cfg).expect("Error loading solver cfg!")[0])
        .expect("Error creating ExactRiemannSolver!")
}

pub fn get_problem(cfg: &str) -> RiemannProblem {
    RiemannProblem::init(&YamlLoader::load_from_str(cfg).expect("Error loading problem cfg!")[0])
        .expect("Error creating RiemannProblem!")
}

pub fn assert_approx_eq_primitives(a: &State<Primitive>, b: &State<Primitive>, epsilon: f64) {
    assert_approx_eq!(f64, a.density(), b.density(), epsilon = epsilon);
    assert_approx_eq!(f64, a.velocity().x, b.velocity().x, epsilon = epsilon);
    assert_approx_eq!(f64, a.velocity().y, b.velocity().y, epsilon = epsilon);
    assert_approx_eq!(f64, a.velocity().z, b.velocity().z, epsilon = epsilon);
    assert_approx_eq!(f64, a.pressure(), b.pressure(), epsilon = epsilon);
}

/// Coordinates in `[min, max]` that are at least `margin` away from every wave edge.
pub fn sample_points<S: exact_riemann::riemann_solver::SelfSimilar>(
    solution: &RiemannSolution<S>,
    min: f64,
    max: f64,
    count: usize,
    margin: f64,
) -> Vec<f64> {
    let edges = solution
        .speeds()
        .iter()
        .flat_map(|speed| [speed.lower(), speed.upper()])
        .collect::<Vec<_>>();
    (0..count)
        .map(|i| min + (max - min) * (i as f64 + 0.5) / count as f64)
        .filter(|xi| edges.iter().all(|edge| (xi - edge).abs() > margin))
        .collect()
}
