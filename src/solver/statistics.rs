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

use std::fmt;

/// Implements a bunch of statistics that are collected during the solving
#[derive(Default)]
pub struct Statistics<const B: bool> {
    sp_runs: usize,
    sp_sweeps: usize,
    decimation_rounds: usize,
    decimated_variables: usize,
    propagated_variables: usize,
    walksat_calls: usize,
    walksat_flips: usize,
    peak_memory: f32,
}

impl<const B: bool> Statistics<B> {
    pub fn sp_run(&mut self) {
        if B {
            self.sp_runs += 1;
        }
    }

    pub fn sp_sweep(&mut self) {
        if B {
            self.sp_sweeps += 1;
        }
    }

    pub fn decimation_round(&mut self) {
        if B {
            self.decimation_rounds += 1;
        }
    }

    pub fn decimated(&mut self, number_variables: usize) {
        if B {
            self.decimated_variables += number_variables;
        }
    }

    pub fn propagated(&mut self, number_variables: usize) {
        if B {
            self.propagated_variables += number_variables;
        }
    }

    pub fn walksat_call(&mut self) {
        if B {
            self.walksat_calls += 1;
        }
    }

    pub fn walksat_flips(&mut self, flips: usize) {
        if B {
            self.walksat_flips += flips;
        }
    }

    pub fn peak_memory(&mut self, peak_memory: f32) {
        if B {
            self.peak_memory = peak_memory;
        }
    }

    pub fn print(&self) {
        if B {
            println!("{}", self);
        }
    }
}

impl<const B: bool> fmt::Display for Statistics<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if B {
            let sweeps_per_run = if self.sp_runs > 0 {
                self.sp_sweeps as f64 / self.sp_runs as f64
            } else {
                0.0
            };
            writeln!(f,
                "SP runs {} | avg sweeps {:.1} | decimation rounds {} | decimated {} | propagated {} | walksat calls {} | walksat flips {} | Peak memory usage {} Mb",
                self.sp_runs,
                sweeps_per_run,
                self.decimation_rounds,
                self.decimated_variables,
                self.propagated_variables,
                self.walksat_calls,
                self.walksat_flips,
                self.peak_memory)
        } else {
            write!(f, "")
        }
    }
}
