use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

use super::{PreemptReason, ProcessId, Scheduler, SimCtx, Ticks};

/// Pool ordering for shortest-remaining-time: least remaining first, then
/// earliest in arrival order (which already folds in the name tie-break).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SjfKey {
    pub remaining: Ticks,
    pub arrival_rank: usize,
}

// KeyedPriorityQueue is a max-heap, so the smallest key must compare greatest
impl PartialOrd for SjfKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SjfKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .remaining
            .cmp(&self.remaining)
            .then_with(|| other.arrival_rank.cmp(&self.arrival_rank))
    }
}

#[derive(Debug)]
pub struct SjfScheduler {
    ready: KeyedPriorityQueue<ProcessId, SjfKey>,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self {
            ready: KeyedPriorityQueue::new(),
        }
    }

    pub fn peek(&self) -> Option<(ProcessId, SjfKey)> {
        self.ready.peek().map(|(&id, &key)| (id, key))
    }

    /// True if the best waiting process has strictly less remaining time.
    pub fn beats(&self, remaining: Ticks) -> bool {
        self.peek().is_some_and(|(_, key)| key.remaining < remaining)
    }
}

impl Scheduler for SjfScheduler {
    fn admit(&mut self, ctx: &SimCtx, process: ProcessId) {
        let p = ctx.process(process);
        // Remaining time only changes while running, so the key stays valid
        // for as long as the process sits in the pool.
        let previous = self.ready.push(
            process,
            SjfKey {
                remaining: p.remaining,
                arrival_rank: p.arrival_rank,
            },
        );
        debug_assert!(previous.is_none(), "Process {} admitted twice", p.name);
    }

    fn select(&mut self, _ctx: &SimCtx) -> Option<ProcessId> {
        self.ready.pop().map(|(id, _)| id)
    }

    fn preempt_check(
        &self,
        ctx: &SimCtx,
        running: ProcessId,
        _slice_used: Ticks,
    ) -> Option<PreemptReason> {
        self.beats(ctx.process(running).remaining)
            .then_some(PreemptReason::ShorterJob)
    }

    fn queued(&self) -> Vec<ProcessId> {
        self.ready.iter().map(|(&id, _)| id).collect()
    }
}
