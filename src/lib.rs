pub mod config;
pub mod core;
pub mod error;
pub mod parse;
pub mod report;
pub mod scheduler;
pub mod sim;
pub mod stats;

pub use config::{Policy, Workload};
pub use crate::core::{Event, EventKind, Process, ProcessId, Ticks};
pub use error::{ConfigError, Error};
pub use scheduler::Scheduler;
pub use sim::{Sim, SimOutcome, simulate};
pub use stats::Statistics;
