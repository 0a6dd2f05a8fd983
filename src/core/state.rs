use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;

pub type Ticks = u64;
new_key_type! {
    pub struct ProcessId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    // Not arrived yet
    Pending,
    Ready,
    Running,
    Finished,
}

/// A process record. `remaining`, `start_time` and `finish_time` are only
/// mutated by the tick loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub remaining: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
    pub state: ProcessState,
    // Position in (arrival, name key, declaration) order; set by SimCtx
    pub arrival_rank: usize,
}

impl Process {
    pub fn new(name: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            finish_time: None,
            state: ProcessState::Pending,
            arrival_rank: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    pub fn name_key(&self) -> NameKey<'_> {
        NameKey::of(&self.name)
    }
}

/// Canonical name-derived ordering: `P<digits>` names sort numerically and
/// ahead of every other name, which sort lexically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameKey<'a> {
    Numbered(u64, &'a str),
    Named(&'a str),
}

impl<'a> NameKey<'a> {
    pub fn of(name: &'a str) -> Self {
        name.strip_prefix('P')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map_or(Self::Named(name), |n| Self::Numbered(n, name))
    }
}

fn arrival_order(a: &Process, b: &Process) -> Ordering {
    a.arrival
        .cmp(&b.arrival)
        .then_with(|| a.name_key().cmp(&b.name_key()))
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub processes: SlotMap<ProcessId, Process>,
    // Sorted by arrival, then name key, then declaration order
    pub arrival_order: Vec<ProcessId>,
    pub running: Option<ProcessId>,
}

impl SimCtx {
    pub fn new(mut processes: Vec<Process>) -> Self {
        // Stable sort keeps declaration order as the final tie-break
        processes.sort_by(arrival_order);

        let mut table = SlotMap::with_capacity_and_key(processes.len());
        let arrival_order = processes
            .into_iter()
            .enumerate()
            .map(|(rank, mut process)| {
                process.arrival_rank = rank;
                process.remaining = process.burst;
                process.start_time = None;
                process.finish_time = None;
                process.state = ProcessState::Pending;
                table.insert(process)
            })
            .collect();

        Self {
            now: 0,
            processes: table,
            arrival_order,
            running: None,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id]
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[id]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn mark_ready(&mut self, id: ProcessId) {
        let process = self.process_mut(id);
        debug_assert!(
            matches!(process.state, ProcessState::Pending | ProcessState::Running),
            "Process {} cannot become ready from {:?}",
            process.name,
            process.state
        );
        process.state = ProcessState::Ready;
    }

    // Return true if this is the process's first selection
    pub fn set_running(&mut self, id: ProcessId) -> bool {
        debug_assert!(self.running.is_none(), "CPU already running a process");

        let now = self.now;
        self.running = Some(id);
        let process = self.process_mut(id);
        debug_assert_eq!(
            process.state,
            ProcessState::Ready,
            "Process {} must be ready before it runs",
            process.name
        );
        process.state = ProcessState::Running;
        if process.start_time.is_none() {
            process.start_time = Some(now);
            true
        } else {
            false
        }
    }

    // Take the running process off the CPU and hand it back
    pub fn clear_running(&mut self) -> Option<ProcessId> {
        self.running.take()
    }

    pub fn mark_finished(&mut self, id: ProcessId, finish_time: Ticks) {
        let process = self.process_mut(id);
        debug_assert!(
            process.finish_time.is_none(),
            "Process {} finished twice",
            process.name
        );
        debug_assert_eq!(process.remaining, 0);

        process.state = ProcessState::Finished;
        process.finish_time = Some(finish_time);
    }

    pub fn into_processes(mut self) -> Vec<Process> {
        self.arrival_order
            .iter()
            .filter_map(|&id| self.processes.remove(id))
            .collect()
    }
}
