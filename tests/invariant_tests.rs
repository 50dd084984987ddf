use sidsat::core::graph::{ClauseIndex, EdgeIndex, FactorGraph, VariableIndex};
use sidsat::{random_ksat, Parameters, QuietSolver, SpResult};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn parameters(seed: u64) -> Parameters {
    let mut parameters = Parameters::default();
    parameters.set_seed(seed);
    parameters
}

fn solver_on_random_instance(seed: u64, alpha: f64) -> QuietSolver {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let clauses = random_ksat(50, alpha, 3, &mut rng);
    let graph = FactorGraph::from_clauses(50, &clauses);
    QuietSolver::new(graph, parameters(seed))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// The incrementally maintained subproducts must agree with a from-scratch
/// rebuild
fn assert_subproducts_consistent(graph: &FactorGraph) {
    let mut rebuilt = graph.clone();
    rebuilt.compute_subproducts();
    for variable in graph.variables_iter() {
        if graph[variable].is_assigned() {
            continue;
        }
        let maintained = &graph[variable];
        let reference = &rebuilt[variable];
        assert!(close(maintained.positive_subproduct(), reference.positive_subproduct()));
        assert!(close(maintained.negative_subproduct(), reference.negative_subproduct()));
        assert_eq!(maintained.positive_zero_count(), reference.positive_zero_count());
        assert_eq!(maintained.negative_zero_count(), reference.negative_zero_count());
    }
}

#[test]
fn incremental_subproducts_match_rebuild_after_sp() {
    let mut solver = solver_on_random_instance(13, 3.5);
    solver.initialize_surveys();
    solver.survey_propagation();
    assert_subproducts_consistent(solver.graph());
}

#[test]
fn incremental_subproducts_match_rebuild_after_assignments() {
    let mut solver = solver_on_random_instance(17, 3.5);
    solver.initialize_surveys();
    solver.survey_propagation();
    for variable in [VariableIndex(3), VariableIndex(27)] {
        if !solver.graph()[variable].is_assigned() {
            // A contradiction would stop the cascade early, which still
            // leaves a valid graph to check the caches on
            let _ = solver.assign(variable, true);
        }
    }
    // Assignments leave the caches stale; the next run rebuilds them and the
    // sweeps must keep them consistent again
    solver.survey_propagation();
    assert_subproducts_consistent(solver.graph());
}

#[test]
fn surveys_stay_in_the_unit_interval() {
    let mut solver = solver_on_random_instance(19, 4.2);
    solver.initialize_surveys();
    solver.survey_propagation();
    let graph = solver.graph();
    for edge in graph.edges_iter() {
        let survey = graph[edge].survey();
        assert!((0.0..=1.0).contains(&survey), "survey {} out of range", survey);
    }
}

#[test]
fn single_clause_update_keeps_surveys_in_range() {
    let mut solver = solver_on_random_instance(23, 4.2);
    solver.initialize_surveys();
    // The run leaves the subproduct caches consistent, so further per-clause
    // updates are well defined
    solver.survey_propagation();
    for clause in solver.graph().enabled_clauses() {
        solver.update_surveys(clause);
        let graph = solver.graph();
        for edge in graph.clause_enabled_edges(clause) {
            let survey = graph[edge].survey();
            assert!((0.0..=1.0).contains(&survey));
        }
    }
}

#[test]
fn magnetizations_are_normalized() {
    let mut solver = solver_on_random_instance(29, 4.0);
    solver.initialize_surveys();
    solver.survey_propagation();
    for variable in solver.graph().variables_iter() {
        if solver.graph()[variable].is_assigned() {
            continue;
        }
        solver.evaluate_variable(variable);
        let var = &solver.graph()[variable];
        let sum = var.h_plus() + var.h_minus() + var.h_zero();
        assert!((sum - 1.0).abs() < 1e-9, "magnetizations sum to {}", sum);
        assert!((var.eval_value() - (var.h_plus() - var.h_minus()).abs()).abs() < 1e-12);
    }
}

fn enabled_sets(graph: &FactorGraph) -> (Vec<ClauseIndex>, Vec<EdgeIndex>) {
    let clauses = graph.clauses_iter().filter(|&c| graph[c].is_enabled()).collect();
    let edges = graph.edges_iter().filter(|&e| graph[e].is_enabled()).collect();
    (clauses, edges)
}

#[test]
fn enabledness_is_monotone_and_assignments_are_permanent() {
    let mut solver = solver_on_random_instance(31, 3.0);
    solver.initialize_surveys();
    solver.survey_propagation();
    let (clauses_before, edges_before) = enabled_sets(solver.graph());
    if solver.assign(VariableIndex(0), true).is_err() {
        return;
    }
    let (clauses_after, edges_after) = enabled_sets(solver.graph());
    assert!(clauses_after.iter().all(|c| clauses_before.contains(c)));
    assert!(edges_after.iter().all(|e| edges_before.contains(e)));
    assert_eq!(solver.graph()[VariableIndex(0)].value(), Some(true));

    solver.survey_propagation();
    // Nothing in a survey run may touch assignments or re-enable anything
    let (clauses_final, edges_final) = enabled_sets(solver.graph());
    assert_eq!(clauses_after, clauses_final);
    assert_eq!(edges_after, edges_final);
    assert_eq!(solver.graph()[VariableIndex(0)].value(), Some(true));
}

#[test]
fn unit_propagation_leaves_no_unit_clause() {
    let clauses = vec![vec![-1, 2], vec![-2, 3], vec![-3, 4], vec![1, 4]];
    let graph = FactorGraph::from_clauses(4, &clauses);
    let mut solver = QuietSolver::new(graph, parameters(1));
    solver.assign(VariableIndex(0), true).unwrap();
    let graph = solver.graph();
    for clause in graph.clauses_iter() {
        if graph[clause].is_enabled() {
            assert!(graph.clause_enabled_edges(clause).count() != 1);
        }
    }
    // The implication chain x1 => x2 => x3 => x4 must have fired completely
    assert_eq!(graph[VariableIndex(1)].value(), Some(true));
    assert_eq!(graph[VariableIndex(2)].value(), Some(true));
    assert_eq!(graph[VariableIndex(3)].value(), Some(true));
    assert!(graph.is_sat());
}

#[test]
fn reassignment_with_the_same_value_is_a_no_op() {
    let clauses = vec![vec![1, 2], vec![-1, 2]];
    let graph = FactorGraph::from_clauses(2, &clauses);
    let mut solver = QuietSolver::new(graph, parameters(1));
    solver.assign(VariableIndex(0), true).unwrap();
    assert!(solver.assign(VariableIndex(0), true).is_ok());
    assert!(solver.assign(VariableIndex(0), false).is_err());
}

#[test]
fn trivial_fixed_point_is_reported() {
    // With no clause constraining them, every survey collapses immediately
    let graph = FactorGraph::from_clauses(5, &[]);
    let mut solver = QuietSolver::new(graph, parameters(1));
    solver.initialize_surveys();
    assert_eq!(solver.survey_propagation(), SpResult::Trivial);
}
