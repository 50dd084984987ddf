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

//! The factor graph of a CNF formula: variable nodes on one side, clause
//! nodes on the other, edges labeled with the polarity of the literal
//! occurrence. All three kinds of node live in arenas owned by the graph and
//! refer to each other through typed indexes, so the cyclic structure needs
//! no shared ownership. Nothing is ever removed from the arenas; clauses and
//! edges are disabled in place and the disabling is monotone over a solve.

use rustc_hash::FxHashSet;

use super::clause::Clause;
use super::edge::Edge;
use super::variable::Variable;

/// Abstraction used as a typesafe way of retrieving a `Variable` in the
/// `FactorGraph` structure
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VariableIndex(pub usize);

/// Abstraction used as a typesafe way of retrieving a `Clause` in the
/// `FactorGraph` structure
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClauseIndex(pub usize);

/// Abstraction used as a typesafe way of retrieving an `Edge` in the
/// `FactorGraph` structure
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeIndex(pub usize);

/// Data structure representing the factor graph of the formula
#[derive(Debug, Clone)]
pub struct FactorGraph {
    /// Vector containing the variables of the formula
    variables: Vec<Variable>,
    /// Vector containing the clauses of the formula
    clauses: Vec<Clause>,
    /// Vector containing the literal occurrences of the formula
    edges: Vec<Edge>,
}

impl FactorGraph {

    // --- GRAPH CREATION --- //

    /// Creates a factor graph with the given number of variables and no
    /// clause
    pub fn new(number_variables: usize) -> Self {
        let variables = (0..number_variables).map(|_| Variable::new()).collect();
        Self {
            variables,
            clauses: vec![],
            edges: vec![],
        }
    }

    /// Creates the factor graph of a formula given in the DIMACS literal
    /// convention (variable i is the literals i and -i, 1-indexed)
    pub fn from_clauses(number_variables: usize, clauses: &[Vec<isize>]) -> Self {
        let mut graph = Self::new(number_variables);
        for clause in clauses {
            graph.add_clause(clause);
        }
        graph
    }

    /// Adds a clause, creating one edge per distinct literal. A literal
    /// repeated inside the clause contributes a single edge; a tautological
    /// clause keeps both polarities and is satisfied by the first assignment
    /// of its variable
    pub fn add_clause(&mut self, literals: &[isize]) -> ClauseIndex {
        let clause_index = ClauseIndex(self.clauses.len());
        let mut clause = Clause::new();
        let mut seen: FxHashSet<isize> = FxHashSet::default();
        for &literal in literals {
            debug_assert!(literal != 0 && literal.unsigned_abs() <= self.variables.len());
            if !seen.insert(literal) {
                continue;
            }
            let variable = VariableIndex(literal.unsigned_abs() - 1);
            let edge_index = EdgeIndex(self.edges.len());
            self.edges.push(Edge::new(variable, clause_index, literal > 0));
            self[variable].add_edge(edge_index);
            clause.add_edge(edge_index);
        }
        self.clauses.push(clause);
        clause_index
    }

    // --- GRAPH MODIFICATIONS --- //

    /// Disables a clause and all of its edges. Eagerly clearing the edges
    /// keeps `edge.is_enabled()` authoritative on its own
    pub fn disable_clause(&mut self, clause: ClauseIndex) {
        self[clause].disable();
        for i in 0..self[clause].degree() {
            let edge = self[clause].edge_at(i);
            self[edge].disable();
        }
    }

    /// Disables a single edge, removing the literal occurrence from both its
    /// clause's and its variable's effective neighborhood
    pub fn disable_edge(&mut self, edge: EdgeIndex) {
        self[edge].disable();
    }

    /// Rebuilds the subproduct caches of every unassigned variable from the
    /// current surveys. The incremental updates performed during the survey
    /// sweeps start from the state this computes
    pub fn compute_subproducts(&mut self) {
        for variable in self.variables_iter() {
            if self[variable].is_assigned() {
                continue;
            }
            self[variable].reset_subproducts();
            for i in 0..self[variable].degree() {
                let edge = self[variable].edge_at(i);
                if !self[edge].is_enabled() {
                    continue;
                }
                let polarity = self[edge].polarity();
                let survey = self[edge].survey();
                self[variable].absorb_survey(polarity, survey);
            }
        }
    }

    // --- QUERIES --- //

    /// Returns true iff every clause of the formula is satisfied
    pub fn is_sat(&self) -> bool {
        self.clauses.iter().all(|clause| !clause.is_enabled())
    }

    /// Returns the enabled clauses of the graph
    pub fn enabled_clauses(&self) -> Vec<ClauseIndex> {
        self.clauses_iter().filter(|&c| self[c].is_enabled()).collect()
    }

    /// Returns an iterator on the enabled edges of the given clause
    pub fn clause_enabled_edges(&self, clause: ClauseIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self[clause].iter_edges().filter(move |&e| self[e].is_enabled())
    }

    /// Returns the current assignment, mapping unassigned variables to false
    pub fn assignment(&self) -> Vec<bool> {
        self.variables.iter().map(|v| v.value().unwrap_or(false)).collect()
    }

    // --- GETTERS --- //

    /// Returns the number of variables in the formula
    pub fn number_variables(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of clauses in the formula
    pub fn number_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the number of literal occurrences in the formula
    pub fn number_edges(&self) -> usize {
        self.edges.len()
    }

    // --- ITERATORS --- //

    pub fn variables_iter(&self) -> impl Iterator<Item = VariableIndex> {
        (0..self.variables.len()).map(VariableIndex)
    }

    pub fn clauses_iter(&self) -> impl Iterator<Item = ClauseIndex> {
        (0..self.clauses.len()).map(ClauseIndex)
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex)
    }
}

// --- Indexing the graph with the various indexes --- //

impl std::ops::Index<VariableIndex> for FactorGraph {
    type Output = Variable;

    fn index(&self, index: VariableIndex) -> &Self::Output {
        &self.variables[index.0]
    }
}

impl std::ops::IndexMut<VariableIndex> for FactorGraph {
    fn index_mut(&mut self, index: VariableIndex) -> &mut Self::Output {
        &mut self.variables[index.0]
    }
}

impl std::ops::Index<ClauseIndex> for FactorGraph {
    type Output = Clause;

    fn index(&self, index: ClauseIndex) -> &Self::Output {
        &self.clauses[index.0]
    }
}

impl std::ops::IndexMut<ClauseIndex> for FactorGraph {
    fn index_mut(&mut self, index: ClauseIndex) -> &mut Self::Output {
        &mut self.clauses[index.0]
    }
}

impl std::ops::Index<EdgeIndex> for FactorGraph {
    type Output = Edge;

    fn index(&self, index: EdgeIndex) -> &Self::Output {
        &self.edges[index.0]
    }
}

impl std::ops::IndexMut<EdgeIndex> for FactorGraph {
    fn index_mut(&mut self, index: EdgeIndex) -> &mut Self::Output {
        &mut self.edges[index.0]
    }
}
