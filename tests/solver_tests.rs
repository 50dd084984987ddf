use std::io::Write;

use paste::paste;
use sidsat::core::graph::{FactorGraph, VariableIndex};
use sidsat::{
    instance_from_cnf_file, random_ksat, solve, verify_assignment, Parameters, QuietSolver,
    SidResult, Verdict, WalksatResult,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn parameters(seed: u64) -> Parameters {
    let mut parameters = Parameters::default();
    parameters.set_seed(seed);
    parameters
}

#[test]
fn trivially_sat_single_clause() {
    let clauses = vec![vec![1, 2, 3]];
    match solve(3, &clauses, parameters(1), false) {
        Verdict::Satisfiable(assignment) => {
            assert!(verify_assignment(&clauses, &assignment));
        }
        other => panic!("expected a satisfying assignment, got {:?}", other),
    }
}

#[test]
fn unit_cascade_forces_the_chain() {
    // x1, x1 => x2, x2 => x3: the only model sets everything to true
    let clauses = vec![vec![1], vec![-1, 2], vec![-2, 3]];
    match solve(3, &clauses, parameters(1), false) {
        Verdict::Satisfiable(assignment) => {
            assert_eq!(assignment, vec![true, true, true]);
        }
        other => panic!("expected a satisfying assignment, got {:?}", other),
    }
}

#[test]
fn direct_contradiction_is_detected_on_assignment() {
    let graph = FactorGraph::from_clauses(1, &[vec![1], vec![-1]]);
    let mut solver = QuietSolver::new(graph, parameters(1));
    assert!(solver.assign(VariableIndex(0), true).is_err());
}

#[test]
fn contradictory_formula_is_never_satisfiable() {
    let clauses = vec![vec![1], vec![-1]];
    match solve(1, &clauses, parameters(1), false) {
        Verdict::Satisfiable(_) => panic!("x1 and not x1 cannot both hold"),
        _ => (),
    }
}

#[test]
fn below_threshold_instance_is_solved() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let clauses = random_ksat(100, 3.0, 3, &mut rng);
    match solve(100, &clauses, parameters(1), false) {
        Verdict::Satisfiable(assignment) => {
            assert!(verify_assignment(&clauses, &assignment));
        }
        other => panic!("expected a satisfying assignment, got {:?}", other),
    }
}

#[test]
fn near_threshold_outcomes_are_sound_and_reproducible() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let clauses = random_ksat(500, 4.25, 3, &mut rng);
    let first = solve(500, &clauses, parameters(1), false);
    if let Verdict::Satisfiable(ref assignment) = first {
        assert!(verify_assignment(&clauses, assignment));
    }
    // Whatever the outcome, the same seed must reproduce it exactly
    let second = solve(500, &clauses, parameters(1), false);
    assert_eq!(first, second);
}

#[test]
fn under_constrained_instance_triggers_walksat() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let clauses = random_ksat(100, 0.5, 3, &mut rng);
    let graph = FactorGraph::from_clauses(100, &clauses);
    let mut solver = QuietSolver::new(graph, parameters(3));
    assert_eq!(solver.solve(), SidResult::WalksatRequested);
    match solver.run_walksat() {
        WalksatResult::Sat(assignment) => {
            assert!(verify_assignment(&clauses, &assignment));
        }
        WalksatResult::UnsatUnknown => {
            panic!("walksat must solve an instance this sparse")
        }
    }
}

#[test]
fn determinism_by_seed() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let clauses = random_ksat(150, 4.0, 3, &mut rng);
    let first = solve(150, &clauses, parameters(7), false);
    let second = solve(150, &clauses, parameters(7), false);
    assert_eq!(first, second);
}

#[test]
fn instance_from_disk_round_trips() {
    let mut file = tempfile::Builder::new().suffix(".cnf").tempfile().unwrap();
    writeln!(file, "c a chain of implications").unwrap();
    writeln!(file, "p cnf 3 3").unwrap();
    writeln!(file, "1 0").unwrap();
    writeln!(file, "-1 2 0").unwrap();
    writeln!(file, "-2 3 0").unwrap();
    let instance = instance_from_cnf_file(file.path()).unwrap();
    assert_eq!(instance.number_variables(), 3);
    assert_eq!(instance.clauses().len(), 3);
    let (number_variables, clauses) = instance.into_parts();
    match solve(number_variables, &clauses, parameters(1), false) {
        Verdict::Satisfiable(assignment) => {
            assert_eq!(assignment, vec![true, true, true]);
        }
        other => panic!("expected a satisfying assignment, got {:?}", other),
    }
}

#[test]
fn malformed_input_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".cnf").tempfile().unwrap();
    writeln!(file, "p cnf 2 1").unwrap();
    writeln!(file, "1 x 0").unwrap();
    assert!(instance_from_cnf_file(file.path()).is_err());
}

#[test]
fn literals_outside_the_declared_range_are_rejected() {
    let mut file = tempfile::Builder::new().suffix(".cnf").tempfile().unwrap();
    writeln!(file, "p cnf 2 1").unwrap();
    writeln!(file, "1 -5 0").unwrap();
    assert!(instance_from_cnf_file(file.path()).is_err());
}

macro_rules! below_threshold_tests {
    ($($name:ident: $seed:expr,)*) => {
        $(
            paste! {
                #[test]
                fn [<below_threshold_ $name>]() {
                    let mut rng = ChaCha8Rng::seed_from_u64($seed);
                    let clauses = random_ksat(80, 3.0, 3, &mut rng);
                    match solve(80, &clauses, parameters($seed), false) {
                        Verdict::Satisfiable(assignment) => {
                            assert!(verify_assignment(&clauses, &assignment));
                        }
                        other => panic!("expected a satisfying assignment, got {:?}", other),
                    }
                }
            }
        )*
    }
}

below_threshold_tests! {
    seed_2: 2,
    seed_5: 5,
    seed_11: 11,
    seed_42: 42,
}
