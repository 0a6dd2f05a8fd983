use rustc_hash::{FxHashMap, FxHashSet};

use super::state::{ProcessId, ProcessState, SimCtx, Ticks};

// Snapshot of the fields that must only ever move one way
#[derive(Debug, Clone, Copy)]
struct Seen {
    remaining: Ticks,
    start_time: Option<Ticks>,
}

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    seen: FxHashMap<ProcessId, Seen>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx, queued: &[ProcessId]) {
        self.step += 1;

        if let Some(id) = ctx.running {
            let process = ctx.process(id);
            debug_assert_eq!(
                process.state,
                ProcessState::Running,
                "running process {} must be Running",
                process.name
            );
            debug_assert!(
                process.start_time.is_some(),
                "running process {} has no start time",
                process.name
            );
        }

        let mut pooled = FxHashSet::default();
        for &id in queued {
            let process = ctx.process(id);
            debug_assert!(
                pooled.insert(id),
                "process {} appears in the ready pool twice",
                process.name
            );
            debug_assert_eq!(
                process.state,
                ProcessState::Ready,
                "pooled process {} must be Ready",
                process.name
            );
            debug_assert_ne!(
                ctx.running,
                Some(id),
                "running process {} must not be in the ready pool",
                process.name
            );
        }

        for (id, process) in &ctx.processes {
            debug_assert!(
                process.remaining <= process.burst,
                "process {} remaining {} exceeds burst {}",
                process.name,
                process.remaining,
                process.burst
            );

            if process.state == ProcessState::Finished {
                debug_assert_eq!(process.remaining, 0);
                debug_assert!(process.finish_time.is_some());
                debug_assert!(!pooled.contains(&id));
            } else {
                debug_assert!(process.finish_time.is_none());
            }

            let now = Seen {
                remaining: process.remaining,
                start_time: process.start_time,
            };
            if let Some(prev) = self.seen.insert(id, now) {
                debug_assert!(
                    now.remaining <= prev.remaining,
                    "process {} remaining time went up",
                    process.name
                );
                debug_assert!(
                    prev.start_time.is_none() || prev.start_time == now.start_time,
                    "process {} start time changed after being set",
                    process.name
                );
            }
        }
    }
}
