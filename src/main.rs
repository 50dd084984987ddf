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

use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sidsat::{
    instance_from_cnf_file, random_ksat, solve, verify_assignment, Args, Parameters, Verdict,
};

fn main() {
    let args = Args::parse();
    let mut parameters = Parameters::from(&args);
    if parameters.seed() == 0 {
        parameters.set_seed(rand::random());
    }

    let (number_variables, clauses) = match args.input() {
        Some(path) => match instance_from_cnf_file(path) {
            Ok(instance) => instance.into_parts(),
            Err(e) => {
                eprintln!("c could not parse {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(parameters.seed());
            let clauses = random_ksat(args.variables(), args.alpha(), args.clause_size(), &mut rng);
            (args.variables(), clauses)
        }
    };
    println!(
        "c {} variables, {} clauses, seed {}",
        number_variables,
        clauses.len(),
        parameters.seed()
    );

    match solve(number_variables, &clauses, parameters, args.statistics()) {
        Verdict::Satisfiable(assignment) => {
            if !verify_assignment(&clauses, &assignment) {
                eprintln!("c ERROR: the produced assignment does not satisfy the formula");
                process::exit(1);
            }
            println!("s SATISFIABLE");
            print_assignment(&assignment);
        }
        Verdict::Contradiction => {
            println!("c contradiction found during decimation");
            println!("s UNKNOWN");
        }
        Verdict::Unconverged => {
            println!("c survey propagation did not converge");
            println!("s UNKNOWN");
        }
        Verdict::Unknown => {
            println!("c walksat exhausted its flip budget");
            println!("s UNKNOWN");
        }
    }
}

/// Prints the assignment in the conventional `v` lines, 20 literals per line
fn print_assignment(assignment: &[bool]) {
    let literals: Vec<String> = assignment
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let literal = i as isize + 1;
            (if value { literal } else { -literal }).to_string()
        })
        .collect();
    for chunk in literals.chunks(20) {
        println!("v {}", chunk.join(" "));
    }
    println!("v 0");
}
