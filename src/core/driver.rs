use tracing::debug;

use super::{
    event::{EventKind, EventLog, PreemptReason},
    observer::Observer,
    state::{ProcessId, SimCtx, Ticks},
};
use crate::scheduler::Scheduler;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    pub log: EventLog,
    // Ticks executed by the running process since its last selection
    slice_used: Ticks,
    announce_quantum_expiry: bool,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(ctx: SimCtx, scheduler: S, announce_quantum_expiry: bool) -> Self {
        Self {
            ctx,
            scheduler,
            log: EventLog::new(),
            slice_used: 0,
            announce_quantum_expiry,
            observer: Observer::new(),
        }
    }

    /// Move an arriving process into the ready pool.
    pub fn admit(&mut self, id: ProcessId) {
        self.ctx.mark_ready(id);
        let process = self.ctx.process(id);
        debug!(tick = self.ctx.now, process = %process.name, "arrived");
        self.log.record(
            self.ctx.now,
            EventKind::Arrived {
                process: process.name.clone(),
            },
        );
        self.scheduler.admit(&self.ctx, id);
    }

    /// Run the preemption, selection and execution phases for the current
    /// tick, then advance the clock. Arrivals must already have been
    /// admitted. Returns the process that completed during this tick.
    pub fn tick(&mut self) -> Option<ProcessId> {
        self.preempt();
        if self.ctx.cpu_is_idle() {
            self.try_select();
        }
        let completed = self.execute();

        if cfg!(debug_assertions) {
            self.observer.observe(&self.ctx, &self.scheduler.queued());
        }
        self.ctx.advance_time(1);
        completed
    }

    fn preempt(&mut self) {
        let Some(running) = self.ctx.running else {
            return;
        };
        let Some(reason) = self
            .scheduler
            .preempt_check(&self.ctx, running, self.slice_used)
        else {
            return;
        };

        let now = self.ctx.now;
        let name = self.ctx.process(running).name.clone();
        debug!(tick = now, process = %name, ?reason, "preempted");

        let announce = match reason {
            PreemptReason::ShorterJob => true,
            PreemptReason::QuantumExpired => self.announce_quantum_expiry,
        };
        if announce {
            self.log.record(
                now,
                EventKind::Preempted {
                    process: name,
                    reason,
                },
            );
        }

        self.ctx.clear_running();
        self.ctx.mark_ready(running);
        self.scheduler.admit(&self.ctx, running);
        self.slice_used = 0;
    }

    fn try_select(&mut self) {
        let Some(id) = self.scheduler.select(&self.ctx) else {
            return;
        };

        let first_run = self.ctx.set_running(id);
        self.slice_used = 0;

        let now = self.ctx.now;
        let process = self.ctx.process(id);
        debug!(
            tick = now,
            process = %process.name,
            remaining = process.remaining,
            first_run,
            "selected"
        );
        self.log.record(
            now,
            EventKind::Selected {
                process: process.name.clone(),
                burst: process.remaining,
            },
        );
    }

    // Return the ProcessId if the running process completed this tick
    fn execute(&mut self) -> Option<ProcessId> {
        let now = self.ctx.now;
        let Some(id) = self.ctx.running else {
            self.log.record(now, EventKind::Idle);
            return None;
        };

        self.slice_used += 1;
        let process = self.ctx.process_mut(id);
        process.remaining -= 1;
        if process.remaining > 0 {
            return None;
        }

        // Completion is reported at the tick after the last executed unit
        let finish_time = now + 1;
        let name = process.name.clone();
        debug!(tick = finish_time, process = %name, "finished");

        self.ctx.clear_running();
        self.ctx.mark_finished(id, finish_time);
        self.log
            .record(finish_time, EventKind::Finished { process: name });
        self.slice_used = 0;
        Some(id)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
