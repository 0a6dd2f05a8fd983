//! Seeded synthetic workloads.

use rand::prelude::*;

use crate::core::{Process, Ticks};

/// Parameters for Bernoulli process arrivals.
#[derive(Debug, Clone, PartialEq)]
pub struct BernoulliConfig {
    /// Number of ticks during which arrivals may happen.
    pub ticks: Ticks,
    /// Probability that a process arrives on a given tick.
    pub p_arrival: f64,
    /// Probability that an arriving process is short.
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub seed: u64,
}

impl Default for BernoulliConfig {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            seed: 0,
        }
    }
}

/// At most one process per tick, named `P1`, `P2`, ... in arrival order.
pub fn bernoulli_processes(config: &BernoulliConfig) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = Vec::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let burst = if rng.random::<f64>() < config.p_short {
                config.short_burst
            } else {
                config.long_burst
            };

            let name = format!("P{}", processes.len() + 1);
            processes.push(Process::new(name, t, burst));
        }
    }

    processes
}

/// Horizon long enough for any work-conserving policy to finish every
/// process: the arrival window plus the sum of all bursts. `None` on overflow.
pub fn full_run_length(ticks: Ticks, processes: &[Process]) -> Option<Ticks> {
    processes
        .iter()
        .try_fold(ticks, |total, p| total.checked_add(p.burst))
}
