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

use crate::core::graph::EdgeIndex;

/// A clause node of the factor graph. A clause starts enabled and is disabled
/// permanently as soon as one of its literals is made true
#[derive(Debug, Clone)]
pub struct Clause {
    enabled: bool,
    /// The edges connecting the clause to its variables
    edges: Vec<EdgeIndex>,
}

impl Default for Clause {
    fn default() -> Self {
        Self::new()
    }
}

impl Clause {

    pub fn new() -> Self {
        Self {
            enabled: true,
            edges: vec![],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Adds an edge in the incidence list of the clause
    pub fn add_edge(&mut self, edge: EdgeIndex) {
        self.edges.push(edge);
    }

    /// Returns the number of incident edges, enabled or not
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Returns the incident edge stored at the given position
    pub fn edge_at(&self, index: usize) -> EdgeIndex {
        self.edges[index]
    }

    /// Returns an iterator on the incident edges of the clause
    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.iter().copied()
    }
}
