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

//! This module gives the implementation of the propagator used during the
//! decimation. Fixing a variable walks its enabled incident edges: an edge
//! whose polarity agrees with the value satisfies its clause, which is
//! disabled together with all of its edges; an edge of the opposite polarity
//! is disabled and leaves its clause shorter, which may make the clause
//! unitary (its last literal is forced) or empty (the current partial
//! assignment is contradictory).
//!
//! The cascade runs on an explicit propagation stack rather than by
//! recursion. Popping a variable that is already fixed to the same value is
//! a no-op; to the opposite value, a contradiction. Everything the cascade
//! does is monotone, so nothing has to be undone on failure.

use crate::core::graph::{FactorGraph, VariableIndex};

/// Unit structure representing that the partial assignment is contradictory
#[derive(Debug)]
pub struct Contradiction;

/// Type alias used for the result of a propagation, which either completes or
/// derives a contradiction
pub type PropagationResult = Result<(), Contradiction>;

#[derive(Debug, Default)]
pub struct Propagator {
    propagation_stack: Vec<(VariableIndex, bool)>,
    /// Number of variables fixed by the cascades, forced assignments included
    number_assigned: usize,
}

impl Propagator {

    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes a variable to the given value and propagates the consequences
    /// until a fix point or a contradiction is reached
    pub fn assign(
        &mut self,
        variable: VariableIndex,
        value: bool,
        graph: &mut FactorGraph,
    ) -> PropagationResult {
        debug_assert!(self.propagation_stack.is_empty());
        self.propagation_stack.push((variable, value));
        let result = self.propagate(graph);
        if result.is_err() {
            self.propagation_stack.clear();
        }
        result
    }

    /// Returns the total number of variables fixed through this propagator
    pub fn number_assigned(&self) -> usize {
        self.number_assigned
    }

    fn propagate(&mut self, graph: &mut FactorGraph) -> PropagationResult {
        while let Some((variable, value)) = self.propagation_stack.pop() {
            if let Some(current) = graph[variable].value() {
                if current != value {
                    return Err(Contradiction);
                }
                continue;
            }
            graph[variable].set_value(value);
            self.number_assigned += 1;
            for i in 0..graph[variable].degree() {
                let edge = graph[variable].edge_at(i);
                if !graph[edge].is_enabled() {
                    continue;
                }
                let clause = graph[edge].clause();
                if graph[edge].polarity() == value {
                    graph.disable_clause(clause);
                } else {
                    graph.disable_edge(edge);
                    let (first, second) = {
                        let mut remaining = graph.clause_enabled_edges(clause);
                        (remaining.next(), remaining.next())
                    };
                    match (first, second) {
                        (None, _) => return Err(Contradiction),
                        (Some(unit), None) => {
                            let forced = graph[unit].variable();
                            let polarity = graph[unit].polarity();
                            self.propagation_stack.push((forced, polarity));
                        }
                        _ => (),
                    }
                }
            }
        }
        Ok(())
    }
}
