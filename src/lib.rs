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

//! Survey inspired decimation for random k-SAT.
//!
//! The solver runs survey propagation, a message-passing procedure on the
//! factor graph of the formula, to estimate how strongly each variable is
//! pulled towards true or false, fixes the most polarized fraction of the
//! variables, simplifies the formula by unit propagation and starts over on
//! what remains. When the messages stop carrying information the residual
//! formula is handed to a WalkSAT local search.

mod args;
pub mod common;
pub mod core;
mod generator;
mod parser;
pub mod propagator;
pub mod solver;

pub use args::Args;
pub use common::{Parameters, SidResult, SpResult, Verdict, WalksatResult};
pub use generator::random_ksat;
pub use parser::{instance_from_cnf, instance_from_cnf_file, CnfInstance, ParseError};
pub use solver::{DefaultSolver, QuietSolver, Solver};

use crate::core::graph::FactorGraph;

use peak_alloc::PeakAlloc;
#[global_allocator]
pub static PEAK_ALLOC: PeakAlloc = PeakAlloc;

/// Solves a CNF formula by survey inspired decimation, falling back on
/// WalkSAT when the surveys become uninformative
pub fn solve(
    number_variables: usize,
    clauses: &[Vec<isize>],
    parameters: Parameters,
    statistics: bool,
) -> Verdict {
    if statistics {
        solve_generic::<true>(number_variables, clauses, parameters)
    } else {
        solve_generic::<false>(number_variables, clauses, parameters)
    }
}

fn solve_generic<const S: bool>(
    number_variables: usize,
    clauses: &[Vec<isize>],
    parameters: Parameters,
) -> Verdict {
    let graph = FactorGraph::from_clauses(number_variables, clauses);
    let mut solver = Solver::<S>::new(graph, parameters);
    let verdict = match solver.solve() {
        SidResult::Sat => Verdict::Satisfiable(solver.graph().assignment()),
        SidResult::Contradiction => Verdict::Contradiction,
        SidResult::Unconverged => Verdict::Unconverged,
        SidResult::WalksatRequested => match solver.run_walksat() {
            WalksatResult::Sat(assignment) => Verdict::Satisfiable(assignment),
            WalksatResult::UnsatUnknown => Verdict::Unknown,
        },
    };
    solver.print_statistics();
    verdict
}

/// Evaluates a CNF formula under an assignment. Used to check every
/// satisfiability claim before reporting it
pub fn verify_assignment(clauses: &[Vec<isize>], assignment: &[bool]) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&literal| {
            let value = assignment[literal.unsigned_abs() - 1];
            if literal > 0 {
                value
            } else {
                !value
            }
        })
    })
}
