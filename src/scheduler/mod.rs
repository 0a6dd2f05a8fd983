pub mod fcfs;
pub mod rr;
pub mod sjf;

use crate::{
    config::{Policy, Workload},
    core::{PreemptReason, ProcessId, SimCtx, Ticks},
    error::ConfigError,
};
pub use fcfs::FcfsScheduler;
pub use rr::RrScheduler;
pub use sjf::SjfScheduler;

/// A ready pool plus the rule for taking the CPU away from its holder.
pub trait Scheduler {
    /// Put a process into the ready pool, either on arrival or after it has
    /// been preempted.
    fn admit(&mut self, ctx: &SimCtx, process: ProcessId);

    /// Remove and return the next process to run.
    fn select(&mut self, ctx: &SimCtx) -> Option<ProcessId>;

    /// Called at the start of every tick while a process holds the CPU.
    /// `slice_used` counts ticks executed since its last selection.
    fn preempt_check(
        &self,
        _ctx: &SimCtx,
        _running: ProcessId,
        _slice_used: Ticks,
    ) -> Option<PreemptReason> {
        None
    }

    /// Processes currently waiting in the pool, in no particular order.
    fn queued(&self) -> Vec<ProcessId>;
}

/// The closed set of policies, picked once from the workload.
#[derive(Debug)]
pub enum PolicyScheduler {
    Fcfs(FcfsScheduler),
    Sjf(SjfScheduler),
    Rr(RrScheduler),
}

impl PolicyScheduler {
    pub fn for_workload(workload: &Workload) -> Result<Self, ConfigError> {
        Ok(match workload.policy {
            Policy::Fcfs => Self::Fcfs(FcfsScheduler::new()),
            Policy::Sjf => Self::Sjf(SjfScheduler::new()),
            Policy::Rr => Self::Rr(RrScheduler::new(workload.rr_quantum()?)),
        })
    }
}

impl Scheduler for PolicyScheduler {
    fn admit(&mut self, ctx: &SimCtx, process: ProcessId) {
        match self {
            Self::Fcfs(s) => s.admit(ctx, process),
            Self::Sjf(s) => s.admit(ctx, process),
            Self::Rr(s) => s.admit(ctx, process),
        }
    }

    fn select(&mut self, ctx: &SimCtx) -> Option<ProcessId> {
        match self {
            Self::Fcfs(s) => s.select(ctx),
            Self::Sjf(s) => s.select(ctx),
            Self::Rr(s) => s.select(ctx),
        }
    }

    fn preempt_check(
        &self,
        ctx: &SimCtx,
        running: ProcessId,
        slice_used: Ticks,
    ) -> Option<PreemptReason> {
        match self {
            Self::Fcfs(s) => s.preempt_check(ctx, running, slice_used),
            Self::Sjf(s) => s.preempt_check(ctx, running, slice_used),
            Self::Rr(s) => s.preempt_check(ctx, running, slice_used),
        }
    }

    fn queued(&self) -> Vec<ProcessId> {
        match self {
            Self::Fcfs(s) => s.queued(),
            Self::Sjf(s) => s.queued(),
            Self::Rr(s) => s.queued(),
        }
    }
}
