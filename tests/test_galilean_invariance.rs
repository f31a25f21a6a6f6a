use common::{assert_approx_eq_primitives, get_solver, sample_points, SOLVER_CONFIG};
use exact_riemann::{
    physical_quantities::{Primitive, State},
    riemann_solver::WaveKind,
    ExactRiemannSolver, RiemannSolver,
};
use float_cmp::assert_approx_eq;
use glam::DVec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

mod common;

fn random_state(rng: &mut StdRng) -> State<Primitive> {
    State::<Primitive>::new(
        rng.gen_range(0.1..2.),
        DVec3::new(
            rng.gen_range(-1. ..1.),
            rng.gen_range(-1. ..1.),
            rng.gen_range(-1. ..1.),
        ),
        rng.gen_range(0.1..2.),
    )
}

fn check_invariance(
    solver: &ExactRiemannSolver,
    left: &State<Primitive>,
    right: &State<Primitive>,
    boost_velocity: DVec3,
) {
    let solution = solver.solve(left, right).expect("Error solving Riemann problem!");
    let solution_boosted = solver
        .solve(&left.boost(boost_velocity), &right.boost(boost_velocity))
        .expect("Error solving boosted Riemann problem!");

    // Same wave structure, shifted by the boost velocity
    assert_eq!(solution.wave_kinds(), solution_boosted.wave_kinds());
    solution
        .speeds()
        .iter()
        .zip(solution_boosted.speeds().iter())
        .for_each(|(speed, speed_boosted)| {
            assert_approx_eq!(
                f64,
                speed.lower() + boost_velocity.x,
                speed_boosted.lower(),
                epsilon = 1e-8
            );
            assert_approx_eq!(
                f64,
                speed.upper() + boost_velocity.x,
                speed_boosted.upper(),
                epsilon = 1e-8
            );
        });

    // Middle states
    solution
        .states()
        .iter()
        .zip(solution_boosted.states().iter())
        .for_each(|(state, state_boosted)| {
            assert_approx_eq_primitives(&state.boost(boost_velocity), state_boosted, 1e-8);
        });

    // Full profile, away from the discontinuities
    for xi in sample_points(&solution, -4., 4., 200, 1e-6) {
        assert_approx_eq_primitives(
            &solution.evaluate(xi).boost(boost_velocity),
            &solution_boosted.evaluate(xi + boost_velocity.x),
            1e-8,
        );
    }
}

#[test]
fn test_sod_invariance() {
    let solver = get_solver(SOLVER_CONFIG);
    let left = State::<Primitive>::new_1d(1., 0., 1.);
    let right = State::<Primitive>::new_1d(0.125, 0., 0.1);
    let solution = solver.solve(&left, &right).unwrap();
    assert_eq!(
        solution.wave_kinds(),
        vec![WaveKind::Rarefaction, WaveKind::Contact, WaveKind::Shock]
    );
    check_invariance(&solver, &left, &right, 10. * DVec3::X);
    check_invariance(&solver, &left, &right, DVec3::new(-3., 1., 2.));
}

#[test]
fn test_star_state_invariance() {
    let solver = get_solver(SOLVER_CONFIG);
    let left = State::<Primitive>::new_1d(1., 0.5, 1.);
    let right = State::<Primitive>::new_1d(0.125, -0.3, 0.1);
    let boost_velocity = 10. * DVec3::X;
    let star = solver.solve_for_star_state(&left, &right).unwrap();
    let star_boosted = solver
        .solve_for_star_state(&left.boost(boost_velocity), &right.boost(boost_velocity))
        .unwrap();
    assert_approx_eq!(f64, star.p, star_boosted.p, epsilon = 1e-10);
    assert_approx_eq!(f64, star.u + 10., star_boosted.u, epsilon = 1e-10);
    assert_approx_eq!(f64, star.rho_l, star_boosted.rho_l, epsilon = 1e-10);
    assert_approx_eq!(f64, star.rho_r, star_boosted.rho_r, epsilon = 1e-10);
}

#[test]
fn test_random_invariance() {
    let solver = get_solver(SOLVER_CONFIG);
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..100 {
        let left = random_state(&mut rng);
        let right = random_state(&mut rng);
        let boost_velocity = DVec3::new(
            rng.gen_range(-10. ..10.),
            rng.gen_range(-10. ..10.),
            rng.gen_range(-10. ..10.),
        );
        check_invariance(&solver, &left, &right, boost_velocity);
    }
}
