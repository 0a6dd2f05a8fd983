use std::collections::VecDeque;

use super::{ProcessId, Scheduler, SimCtx};

/// Arrival-ordered queue. Nothing is ever preempted, so the head runs to
/// completion before the next process is looked at.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    queue: VecDeque<ProcessId>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn admit(&mut self, _ctx: &SimCtx, process: ProcessId) {
        self.queue.push_back(process);
    }

    fn select(&mut self, _ctx: &SimCtx) -> Option<ProcessId> {
        self.queue.pop_front()
    }

    fn queued(&self) -> Vec<ProcessId> {
        self.queue.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Process;

    #[test]
    fn test_selects_in_admission_order() {
        let ctx = SimCtx::new(vec![
            Process::new("P1", 0, 9),
            Process::new("P2", 1, 1),
        ]);
        let mut fcfs = FcfsScheduler::new();
        for &id in &ctx.arrival_order {
            fcfs.admit(&ctx, id);
        }

        let first = fcfs.select(&ctx).unwrap();
        assert_eq!(ctx.process(first).name, "P1");
        assert_eq!(fcfs.preempt_check(&ctx, first, 100), None);
        assert_eq!(fcfs.queued().len(), 1);
    }
}
