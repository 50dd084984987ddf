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

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

/// Draws a uniform random k-SAT formula with the given clause-to-variable
/// ratio: round(alpha * n) clauses, each over `clause_size` distinct
/// variables negated independently with probability 1/2
pub fn random_ksat(
    number_variables: usize,
    alpha: f64,
    clause_size: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<isize>> {
    assert!(clause_size <= number_variables);
    let number_clauses = (alpha * number_variables as f64).round() as usize;
    let mut clauses = Vec::with_capacity(number_clauses);
    let mut drawn: FxHashSet<isize> = FxHashSet::default();
    for _ in 0..number_clauses {
        drawn.clear();
        let mut clause = Vec::with_capacity(clause_size);
        while clause.len() < clause_size {
            let variable = rng.gen_range(1..=number_variables as isize);
            if drawn.insert(variable) {
                clause.push(if rng.gen_bool(0.5) { variable } else { -variable });
            }
        }
        clauses.push(clause);
    }
    clauses
}
