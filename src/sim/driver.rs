use tracing::{debug, info};

use crate::{
    config::Workload,
    core::{Event, EventKind, Process, SchedCore, SimCtx, Ticks},
    error::ConfigError,
    scheduler::{PolicyScheduler, Scheduler},
};

/// Final trace and process records of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOutcome {
    /// Events ordered by timestamp, category priority, then creation order.
    pub events: Vec<Event>,
    /// Process records in arrival order, annotated with start/finish times.
    pub processes: Vec<Process>,
}

impl SimOutcome {
    pub fn unfinished(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter().filter(|p| !p.is_finished())
    }
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    run_for: Ticks,
    // Next entry of ctx.arrival_order that has not arrived yet
    arrival_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: Vec<Process>, scheduler: S, workload: &Workload) -> Self {
        let ctx = SimCtx::new(processes);
        Self {
            core: SchedCore::new(ctx, scheduler, workload.announce_quantum_expiry),
            run_for: workload.run_for,
            arrival_cursor: 0,
        }
    }

    pub fn step(&mut self) {
        self.handle_arrivals();
        if let Some(id) = self.core.tick() {
            let process = self.core.ctx.process(id);
            debug_assert_eq!(process.finish_time, Some(self.core.now()));
        }
    }

    // Admit every process whose arrival time has been reached. Arrivals
    // missed by an earlier tick are caught up here too.
    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        while let Some(&id) = self.core.ctx.arrival_order.get(self.arrival_cursor) {
            if self.core.ctx.process(id).arrival > now {
                break; // Contiguous, since arrival_order is sorted
            }
            self.core.admit(id);
            self.arrival_cursor += 1;
        }
    }

    pub fn is_done(&self) -> bool {
        self.core.now() >= self.run_for
    }

    pub fn run(mut self) -> SimOutcome {
        while !self.is_done() {
            self.step();
        }

        let SchedCore { ctx, mut log, .. } = self.core;
        log.record(self.run_for, EventKind::RunComplete);
        debug!(ticks = self.run_for, events = log.len(), "horizon reached");

        SimOutcome {
            events: log.into_sorted(),
            processes: ctx.into_processes(),
        }
    }
}

/// Validate `workload` and run it over `processes` to the horizon.
pub fn simulate(workload: &Workload, processes: Vec<Process>) -> Result<SimOutcome, ConfigError> {
    workload.validate(&processes)?;
    let scheduler = PolicyScheduler::for_workload(workload)?;

    info!(
        policy = workload.policy.keyword(),
        processes = processes.len(),
        run_for = workload.run_for,
        quantum = ?workload.quantum,
        "starting simulation"
    );
    let outcome = Sim::new(processes, scheduler, workload).run();

    let unfinished = outcome.unfinished().count();
    info!(
        events = outcome.events.len(),
        unfinished, "simulation finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Policy, scheduler::FcfsScheduler};

    #[test]
    fn test_late_arrival_is_caught_up() {
        // A process that arrives after an idle gap is still admitted
        let workload = Workload::new(Policy::Fcfs, 6).with_process_count(1);
        let outcome = simulate(&workload, vec![Process::new("P1", 3, 2)]).unwrap();

        let idle_ticks: Vec<_> = outcome
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Idle)
            .map(|e| e.time)
            .collect();
        assert_eq!(idle_ticks, vec![0, 1, 2, 5]);
        assert_eq!(outcome.processes[0].start_time, Some(3));
        assert_eq!(outcome.processes[0].finish_time, Some(5));
    }

    #[test]
    fn test_zero_horizon_only_reports_completion() {
        let workload = Workload::new(Policy::Sjf, 0).with_process_count(1);
        let outcome = simulate(&workload, vec![Process::new("P1", 0, 2)]).unwrap();
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].kind, EventKind::RunComplete);
        assert_eq!(outcome.unfinished().count(), 1);
    }

    #[test]
    fn test_observer_runs_only_with_debug_assertions() {
        let workload = Workload::new(Policy::Fcfs, 7).with_process_count(1);
        let mut sim = Sim::new(
            vec![Process::new("P1", 0, 3)],
            FcfsScheduler::new(),
            &workload,
        );
        while !sim.is_done() {
            sim.step();
        }

        let expected = if cfg!(debug_assertions) { 7 } else { 0 };
        assert_eq!(sim.core.observer().steps(), expected);
    }

    #[test]
    fn test_invalid_workload_never_runs() {
        let workload = Workload::new(Policy::Rr, 10);
        assert_eq!(
            simulate(&workload, vec![Process::new("P1", 0, 2)]),
            Err(ConfigError::MissingQuantum)
        );
    }
}
