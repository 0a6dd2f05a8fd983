use std::collections::VecDeque;

use super::{PreemptReason, ProcessId, Scheduler, SimCtx, Ticks};

/// FIFO ready queue with a fixed time slice. A process whose slice runs out
/// goes back to the tail, behind anything that arrived in the same tick.
#[derive(Debug)]
pub struct RrScheduler {
    queue: VecDeque<ProcessId>,
    quantum: Ticks,
}

impl RrScheduler {
    pub fn new(quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "Round-Robin quantum must be positive");
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RrScheduler {
    fn admit(&mut self, _ctx: &SimCtx, process: ProcessId) {
        self.queue.push_back(process);
    }

    fn select(&mut self, _ctx: &SimCtx) -> Option<ProcessId> {
        self.queue.pop_front()
    }

    fn preempt_check(
        &self,
        _ctx: &SimCtx,
        _running: ProcessId,
        slice_used: Ticks,
    ) -> Option<PreemptReason> {
        (slice_used >= self.quantum).then_some(PreemptReason::QuantumExpired)
    }

    fn queued(&self) -> Vec<ProcessId> {
        self.queue.iter().copied().collect()
    }
}
