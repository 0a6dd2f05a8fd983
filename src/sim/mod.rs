pub mod driver;
pub mod generate;

pub use driver::{Sim, SimOutcome, simulate};
pub use generate::{BernoulliConfig, bernoulli_processes, full_run_length};
