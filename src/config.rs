//! Workload configuration: policy selection, horizon and quantum.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::{
    core::{Process, Ticks},
    error::ConfigError,
};

/// Scheduling policy used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-Come First-Served, non-preemptive.
    Fcfs,
    /// Preemptive Shortest Job First (shortest remaining time).
    Sjf,
    /// Round-Robin with a fixed quantum.
    Rr,
}

impl Policy {
    /// Short name as written after `use` in workload files.
    pub fn keyword(self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Rr => "rr",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "First-Come First-Served"),
            Policy::Sjf => write!(f, "preemptive Shortest Job First"),
            Policy::Rr => write!(f, "Round-Robin"),
        }
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "rr" => Ok(Policy::Rr),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Declared number of processes. Only echoed in the report.
    pub process_count: usize,

    /// Simulation horizon. The tick loop stops here whether or not every
    /// process has finished.
    pub run_for: Ticks,

    /// Scheduling policy.
    pub policy: Policy,

    /// Round-Robin time slice. Required (and positive) for [`Policy::Rr`].
    pub quantum: Option<Ticks>,

    /// Emit a `preempted` event when a Round-Robin quantum expires.
    /// Shortest-job preemption is always announced.
    pub announce_quantum_expiry: bool,
}

impl Workload {
    /// Create a workload with no quantum and a process count of zero.
    pub fn new(policy: Policy, run_for: Ticks) -> Self {
        Self {
            process_count: 0,
            run_for,
            policy,
            quantum: None,
            announce_quantum_expiry: false,
        }
    }

    /// Set the declared process count.
    pub fn with_process_count(mut self, count: usize) -> Self {
        self.process_count = count;
        self
    }

    /// Set the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Toggle explicit `preempted` events on quantum expiry.
    pub fn with_quantum_expiry_events(mut self, announce: bool) -> Self {
        self.announce_quantum_expiry = announce;
        self
    }

    /// The quantum to use, validated for Round-Robin.
    pub fn rr_quantum(&self) -> Result<Ticks, ConfigError> {
        match self.quantum {
            None => Err(ConfigError::MissingQuantum),
            Some(0) => Err(ConfigError::NonPositiveQuantum),
            Some(q) => Ok(q),
        }
    }

    /// Check the workload and its processes before simulating.
    pub fn validate(&self, processes: &[Process]) -> Result<(), ConfigError> {
        if self.policy == Policy::Rr {
            self.rr_quantum()?;
        } else if self.quantum == Some(0) {
            return Err(ConfigError::NonPositiveQuantum);
        }

        let mut names = FxHashSet::default();
        for process in processes {
            if process.burst == 0 {
                return Err(ConfigError::NonPositiveBurst {
                    process: process.name.clone(),
                });
            }
            if !names.insert(process.name.as_str()) {
                return Err(ConfigError::DuplicateProcess(process.name.clone()));
            }
        }

        if self.process_count != processes.len() {
            warn!(
                declared = self.process_count,
                actual = processes.len(),
                "processcount does not match the number of declared processes"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("fcfs".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("SJF".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!("rr".parse::<Policy>().unwrap(), Policy::Rr);
        assert_eq!(
            "lottery".parse::<Policy>(),
            Err(ConfigError::UnknownPolicy("lottery".to_string()))
        );
    }

    #[test]
    fn test_rr_requires_quantum() {
        let workload = Workload::new(Policy::Rr, 10);
        let processes = vec![Process::new("P1", 0, 3)];
        assert_eq!(
            workload.validate(&processes),
            Err(ConfigError::MissingQuantum)
        );

        let workload = workload.with_quantum(0);
        assert_eq!(workload.validate(&processes), Err(ConfigError::NonPositiveQuantum));

        let workload = workload.with_quantum(2);
        assert_eq!(workload.validate(&processes), Ok(()));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let workload = Workload::new(Policy::Fcfs, 10);
        let processes = vec![Process::new("P1", 0, 3), Process::new("P2", 1, 0)];
        assert_eq!(
            workload.validate(&processes),
            Err(ConfigError::NonPositiveBurst {
                process: "P2".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let workload = Workload::new(Policy::Sjf, 10).with_process_count(2);
        let processes = vec![Process::new("A", 0, 3), Process::new("A", 4, 1)];
        assert_eq!(
            workload.validate(&processes),
            Err(ConfigError::DuplicateProcess("A".to_string()))
        );
    }

    #[test]
    fn test_quantum_ignored_outside_rr() {
        let workload = Workload::new(Policy::Fcfs, 10)
            .with_process_count(1)
            .with_quantum(4);
        assert_eq!(workload.validate(&[Process::new("P1", 0, 1)]), Ok(()));
    }

    #[traced_test]
    #[test]
    fn test_process_count_mismatch_only_warns() {
        let workload = Workload::new(Policy::Fcfs, 10).with_process_count(3);
        assert_eq!(workload.validate(&[Process::new("P1", 0, 1)]), Ok(()));
        assert!(logs_contain("processcount does not match"));
    }
}
