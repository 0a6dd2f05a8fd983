//! Per-process wait, turnaround and response times.
//!
//! Derived from final process records once the whole trace exists; the
//! formulas are the same for every policy.

use average::{Estimate, Mean};

use crate::core::{Process, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub name: String,
    /// Time spent ready but not running: `turnaround - burst`.
    pub wait: Ticks,
    /// Arrival to completion: `finish - arrival`.
    pub turnaround: Ticks,
    /// Arrival to first selection: `start - arrival`.
    pub response: Ticks,
}

impl ProcessStats {
    /// `None` for a process that did not finish within the horizon.
    pub fn of(process: &Process) -> Option<Self> {
        let finish = process.finish_time?;
        let start = process.start_time?;
        let turnaround = finish - process.arrival;
        debug_assert!(turnaround >= process.burst);
        debug_assert!(start >= process.arrival);

        Some(Self {
            name: process.name.clone(),
            wait: turnaround - process.burst,
            turnaround,
            response: start - process.arrival,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Finished processes in canonical name order.
    pub completed: Vec<ProcessStats>,
    /// Names of processes that did not finish, in canonical name order.
    pub unfinished: Vec<String>,
}

impl Statistics {
    pub fn from_processes(processes: &[Process]) -> Self {
        let mut sorted: Vec<&Process> = processes.iter().collect();
        sorted.sort_by(|a, b| a.name_key().cmp(&b.name_key()));

        let mut stats = Self::default();
        for process in sorted {
            match ProcessStats::of(process) {
                Some(s) => stats.completed.push(s),
                None => stats.unfinished.push(process.name.clone()),
            }
        }
        stats
    }

    pub fn mean_wait(&self) -> Option<f64> {
        self.mean_of(|s| s.wait)
    }

    pub fn mean_turnaround(&self) -> Option<f64> {
        self.mean_of(|s| s.turnaround)
    }

    pub fn mean_response(&self) -> Option<f64> {
        self.mean_of(|s| s.response)
    }

    fn mean_of(&self, metric: impl Fn(&ProcessStats) -> Ticks) -> Option<f64> {
        if self.completed.is_empty() {
            return None;
        }
        let mean: Mean = self.completed.iter().map(|s| metric(s) as f64).collect();
        Some(mean.estimate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(name: &str, arrival: Ticks, burst: Ticks, start: Ticks, finish: Ticks) -> Process {
        let mut p = Process::new(name, arrival, burst);
        p.remaining = 0;
        p.start_time = Some(start);
        p.finish_time = Some(finish);
        p
    }

    #[test]
    fn test_formulas() {
        let p = finished("P2", 1, 4, 5, 9);
        assert_eq!(
            ProcessStats::of(&p),
            Some(ProcessStats {
                name: "P2".to_string(),
                wait: 4,
                turnaround: 8,
                response: 4,
            })
        );
    }

    #[test]
    fn test_unfinished_listed_separately_in_name_order() {
        let mut started = Process::new("P3", 0, 10);
        started.start_time = Some(2);
        started.remaining = 4;

        let processes = vec![
            started,
            finished("P10", 0, 1, 0, 1),
            Process::new("P2", 5, 3),
            finished("P1", 0, 2, 1, 3),
        ];
        let stats = Statistics::from_processes(&processes);

        let names: Vec<_> = stats.completed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "P10"]);
        assert_eq!(stats.unfinished, vec!["P2", "P3"]);
    }

    #[test]
    fn test_means() {
        let processes = vec![finished("P1", 0, 5, 0, 5), finished("P2", 1, 4, 5, 9)];
        let stats = Statistics::from_processes(&processes);
        assert_eq!(stats.mean_wait(), Some(2.0));
        assert_eq!(stats.mean_turnaround(), Some(6.5));
        assert_eq!(stats.mean_response(), Some(2.0));

        assert_eq!(Statistics::default().mean_wait(), None);
    }
}
