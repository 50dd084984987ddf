use clap::Parser;

use std::path::PathBuf;

use crate::common::{
    DEFAULT_PARAMAGNETIC_THRESHOLD, DEFAULT_SID_FRACTION, DEFAULT_SP_EPSILON,
    DEFAULT_SP_MAX_ITERATIONS, DEFAULT_WALKSAT_NOISE,
};

#[derive(Parser)]
#[clap(name="sidsat", version, author, about)]
pub struct Args {
    /// DIMACS CNF input file. When absent, a random k-SAT instance is
    /// generated from the options below
    #[clap(short, long, value_parser)]
    input: Option<PathBuf>,
    /// Number of variables of the generated instance
    #[clap(short = 'n', long, default_value_t = 1000)]
    variables: usize,
    /// Clause-to-variable ratio of the generated instance
    #[clap(short, long, default_value_t = 4.21)]
    alpha: f64,
    /// Number of literals per clause of the generated instance
    #[clap(short = 'k', long, default_value_t = 3)]
    clause_size: usize,
    /// Random seed; 0 draws a seed from the system entropy
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
    /// Fraction of the unassigned variables fixed at each decimation round
    #[clap(short, long, default_value_t = DEFAULT_SID_FRACTION)]
    fraction: f64,
    /// Maximum number of survey propagation sweeps per run
    #[clap(long, default_value_t = DEFAULT_SP_MAX_ITERATIONS)]
    sp_max_iterations: usize,
    /// Convergence threshold on the maximum survey change in a sweep
    #[clap(long, default_value_t = DEFAULT_SP_EPSILON)]
    sp_epsilon: f64,
    /// Average maximum bias under which the state is considered paramagnetic
    /// and the formula is handed to WalkSAT
    #[clap(long, default_value_t = DEFAULT_PARAMAGNETIC_THRESHOLD)]
    paramagnetic_threshold: f64,
    /// Maximum number of WalkSAT flips; 0 uses 100 flips per variable
    #[clap(long, default_value_t = 0)]
    max_flips: usize,
    /// Probability of a random walk move in WalkSAT
    #[clap(long, default_value_t = DEFAULT_WALKSAT_NOISE)]
    noise: f64,
    /// Collect and print statistics during the solving
    #[clap(long, action)]
    statistics: bool,
}

impl Args {

    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    pub fn variables(&self) -> usize {
        self.variables
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn clause_size(&self) -> usize {
        self.clause_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn sp_max_iterations(&self) -> usize {
        self.sp_max_iterations
    }

    pub fn sp_epsilon(&self) -> f64 {
        self.sp_epsilon
    }

    pub fn paramagnetic_threshold(&self) -> f64 {
        self.paramagnetic_threshold
    }

    pub fn max_flips(&self) -> usize {
        self.max_flips
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn statistics(&self) -> bool {
        self.statistics
    }
}
