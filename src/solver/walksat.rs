//Sidsat
//Copyright (C) 2024-2025 The sidsat developers
//
//This program is free software: you can redistribute it and/or modify
//it under the terms of the GNU Affero General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//This program is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU Affero General Public License for more details.
//
//You should have received a copy of the GNU Affero General Public License
//along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! WalkSAT local search over the residual formula. Called when the surveys
//! stop being informative: the clauses still enabled at that point are, with
//! high probability, an easy under-constrained subformula.
//!
//! The residual clauses are extracted once into flat literal lists, the
//! unsatisfied set is maintained exactly (a clause enters when its last true
//! literal is flipped away, leaves when it gains its first), and each flip
//! picks, inside a random unsatisfied clause, either a random variable (with
//! the noise probability) or one that breaks the fewest currently satisfied
//! clauses.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::common::WalksatResult;
use crate::core::graph::FactorGraph;

const UNSAT_NONE: usize = usize::MAX;

/// One clause of the residual formula: the variables of its enabled edges
/// with their polarities
type ResidualClause = Vec<(usize, bool)>;

/// Runs WalkSAT on the residual formula of the graph, within the given flip
/// budget. Returns the outcome and the number of flips performed. Variables
/// already fixed by the decimation keep their values in the reported
/// assignment
pub fn walksat(
    graph: &FactorGraph,
    max_flips: usize,
    noise: f64,
    rng: &mut ChaCha8Rng,
) -> (WalksatResult, usize) {
    let number_variables = graph.number_variables();
    let clauses: Vec<ResidualClause> = graph
        .clauses_iter()
        .filter(|&c| graph[c].is_enabled())
        .map(|c| {
            graph
                .clause_enabled_edges(c)
                .map(|e| (graph[e].variable().0, graph[e].polarity()))
                .collect()
        })
        .collect();
    if clauses.iter().any(|c| c.is_empty()) {
        return (WalksatResult::UnsatUnknown, 0);
    }

    // Decimated variables keep their values, the rest start at random
    let mut assignment: Vec<bool> = graph
        .variables_iter()
        .map(|v| graph[v].value().unwrap_or_else(|| rng.gen_bool(0.5)))
        .collect();

    // Occurrence lists split by polarity, and the number of true literals of
    // each residual clause under the current assignment
    let mut positive_occurrences: Vec<Vec<usize>> = vec![vec![]; number_variables];
    let mut negative_occurrences: Vec<Vec<usize>> = vec![vec![]; number_variables];
    let mut number_true: Vec<usize> = vec![0; clauses.len()];
    for (i, clause) in clauses.iter().enumerate() {
        for &(variable, polarity) in clause {
            if polarity {
                positive_occurrences[variable].push(i);
            } else {
                negative_occurrences[variable].push(i);
            }
            if assignment[variable] == polarity {
                number_true[i] += 1;
            }
        }
    }

    let mut unsatisfied: Vec<usize> = vec![];
    let mut unsatisfied_position: Vec<usize> = vec![UNSAT_NONE; clauses.len()];
    for (i, &count) in number_true.iter().enumerate() {
        if count == 0 {
            unsatisfied_position[i] = unsatisfied.len();
            unsatisfied.push(i);
        }
    }

    let mut candidates: Vec<usize> = vec![];
    for flip in 0..max_flips {
        if unsatisfied.is_empty() {
            return (WalksatResult::Sat(assignment), flip);
        }
        let clause = unsatisfied[rng.gen_range(0..unsatisfied.len())];

        // Break count of each variable of the clause: the satisfied clauses
        // it is the sole supporter of
        let mut min_breaks = usize::MAX;
        candidates.clear();
        for &(variable, _) in &clauses[clause] {
            let supported = if assignment[variable] {
                &positive_occurrences[variable]
            } else {
                &negative_occurrences[variable]
            };
            let breaks = supported.iter().filter(|&&c| number_true[c] == 1).count();
            if breaks < min_breaks {
                min_breaks = breaks;
                candidates.clear();
                candidates.push(variable);
            } else if breaks == min_breaks {
                candidates.push(variable);
            }
        }
        let variable = if min_breaks > 0 && rng.gen_bool(noise) {
            clauses[clause][rng.gen_range(0..clauses[clause].len())].0
        } else {
            *candidates.choose(rng).unwrap()
        };

        // Flip: clauses supported by the old value lose a true literal,
        // clauses of the opposite polarity gain one
        let (losing, gaining) = if assignment[variable] {
            (&positive_occurrences[variable], &negative_occurrences[variable])
        } else {
            (&negative_occurrences[variable], &positive_occurrences[variable])
        };
        for &c in losing {
            number_true[c] -= 1;
            if number_true[c] == 0 {
                unsatisfied_position[c] = unsatisfied.len();
                unsatisfied.push(c);
            }
        }
        for &c in gaining {
            number_true[c] += 1;
            if number_true[c] == 1 {
                let position = unsatisfied_position[c];
                let last = *unsatisfied.last().unwrap();
                unsatisfied.swap_remove(position);
                unsatisfied_position[c] = UNSAT_NONE;
                if position < unsatisfied.len() {
                    unsatisfied_position[last] = position;
                }
            }
        }
        assignment[variable] = !assignment[variable];
    }

    if unsatisfied.is_empty() {
        (WalksatResult::Sat(assignment), max_flips)
    } else {
        (WalksatResult::UnsatUnknown, max_flips)
    }
}
