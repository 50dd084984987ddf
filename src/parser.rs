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

//! This module provides a parser for the DIMACS CNF format. An example of
//! valid file is given next
//!
//! c This line is a comment
//! c The header declares 3 variables and 2 clauses
//! p cnf 3 2
//! 1 -3 0
//! 2 3 -1 0
//!
//! Clauses are lists of nonzero signed integers terminated by 0 and may span
//! several lines. Positive literals map to positive-polarity edges of the
//! factor graph, negative literals to negative-polarity ones.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not read the input: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed header, expected 'p cnf <variables> <clauses>'")]
    MalformedHeader { line: usize },
    #[error("line {line}: clauses found before the 'p cnf' header")]
    MissingHeader { line: usize },
    #[error("line {line}: invalid literal '{token}'")]
    InvalidLiteral { line: usize, token: String },
    #[error("line {line}: literal {literal} is outside the declared variable range")]
    LiteralOutOfRange { line: usize, literal: isize },
    #[error("the last clause is not terminated by 0")]
    UnterminatedClause,
}

/// A CNF formula as parsed: the declared number of variables and the clauses
/// in the DIMACS literal convention
#[derive(Debug, Clone)]
pub struct CnfInstance {
    number_variables: usize,
    clauses: Vec<Vec<isize>>,
}

impl CnfInstance {

    pub fn new(number_variables: usize, clauses: Vec<Vec<isize>>) -> Self {
        Self {
            number_variables,
            clauses,
        }
    }

    pub fn number_variables(&self) -> usize {
        self.number_variables
    }

    pub fn clauses(&self) -> &[Vec<isize>] {
        &self.clauses
    }

    pub fn into_parts(self) -> (usize, Vec<Vec<isize>>) {
        (self.number_variables, self.clauses)
    }
}

/// Parses a DIMACS CNF file
pub fn instance_from_cnf_file<P: AsRef<Path>>(filepath: P) -> Result<CnfInstance, ParseError> {
    let file = File::open(filepath)?;
    instance_from_cnf(BufReader::new(file))
}

/// Parses a DIMACS CNF formula from any buffered reader
pub fn instance_from_cnf<R: BufRead>(reader: R) -> Result<CnfInstance, ParseError> {
    let mut number_variables: Option<usize> = None;
    let mut clauses: Vec<Vec<isize>> = vec![];
    let mut current: Vec<isize> = vec![];
    for (index, l) in reader.lines().enumerate() {
        let line = l?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') || trimmed.starts_with('%') {
            continue;
        }
        if let Some(header) = trimmed.strip_prefix('p') {
            let mut split = header.split_whitespace();
            if split.next() != Some("cnf") {
                return Err(ParseError::MalformedHeader { line: line_number });
            }
            let variables = split
                .next()
                .and_then(|token| token.parse::<usize>().ok())
                .ok_or(ParseError::MalformedHeader { line: line_number })?;
            // The declared clause count is read but not enforced; the clauses
            // themselves are authoritative
            split
                .next()
                .and_then(|token| token.parse::<usize>().ok())
                .ok_or(ParseError::MalformedHeader { line: line_number })?;
            number_variables = Some(variables);
            continue;
        }
        let variables = match number_variables {
            Some(n) => n,
            None => return Err(ParseError::MissingHeader { line: line_number }),
        };
        for token in trimmed.split_whitespace() {
            let literal = token
                .parse::<isize>()
                .map_err(|_| ParseError::InvalidLiteral {
                    line: line_number,
                    token: token.to_string(),
                })?;
            if literal == 0 {
                clauses.push(std::mem::take(&mut current));
            } else if literal.unsigned_abs() > variables {
                return Err(ParseError::LiteralOutOfRange {
                    line: line_number,
                    literal,
                });
            } else {
                current.push(literal);
            }
        }
    }
    if !current.is_empty() {
        return Err(ParseError::UnterminatedClause);
    }
    let number_variables = number_variables.unwrap_or(0);
    Ok(CnfInstance::new(number_variables, clauses))
}
