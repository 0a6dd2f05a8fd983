use crate::core::Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptReason {
    // A ready process has strictly less remaining time
    ShorterJob,
    QuantumExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Arrived {
        process: String,
    },
    Finished {
        process: String,
    },
    Preempted {
        process: String,
        reason: PreemptReason,
    },
    Selected {
        process: String,
        // Remaining burst at selection time
        burst: Ticks,
    },
    Idle,
    // "Finished at time N"
    RunComplete,
}

impl EventKind {
    /// Rank among events sharing a timestamp. Lower is reported first.
    pub fn priority(&self) -> u8 {
        match self {
            EventKind::Arrived { .. } => 0,
            EventKind::Finished { .. } => 1,
            EventKind::Preempted { .. } => 2,
            EventKind::Selected { .. } => 3,
            EventKind::Idle => 4,
            EventKind::RunComplete => 5,
        }
    }

    pub fn process(&self) -> Option<&str> {
        match self {
            EventKind::Arrived { process }
            | EventKind::Finished { process }
            | EventKind::Preempted { process, .. }
            | EventKind::Selected { process, .. } => Some(process),
            EventKind::Idle | EventKind::RunComplete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: Ticks,
    pub kind: EventKind,
    // Creation order; breaks ties that priority leaves open
    pub seq: u64,
}

impl Event {
    fn sort_key(&self) -> (Ticks, u8, u64) {
        (self.time, self.kind.priority(), self.seq)
    }
}

/// Append-only event record. Events come out ordered by timestamp, then
/// category priority, then creation order, regardless of the order in
/// which the tick loop recorded them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, time: Ticks, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event { time, kind, seq });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_sorted(mut self) -> Vec<Event> {
        self.events.sort_by_key(Event::sort_key);
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrived(name: &str) -> EventKind {
        EventKind::Arrived {
            process: name.to_string(),
        }
    }

    #[test]
    fn test_log_starts_empty() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.record(0, EventKind::Idle);
        assert!(!log.is_empty());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_same_tick_orders_by_category() {
        let mut log = EventLog::new();
        log.record(
            5,
            EventKind::Selected {
                process: "P2".to_string(),
                burst: 4,
            },
        );
        log.record(5, EventKind::Idle);
        log.record(
            5,
            EventKind::Finished {
                process: "P1".to_string(),
            },
        );
        log.record(5, arrived("P3"));
        log.record(4, EventKind::RunComplete);

        let kinds: Vec<_> = log.into_sorted().into_iter().map(|e| e.kind.priority()).collect();
        assert_eq!(kinds, vec![5, 0, 1, 3, 4]);
    }

    #[test]
    fn test_equal_category_keeps_insertion_order() {
        let mut log = EventLog::new();
        log.record(0, arrived("B"));
        log.record(0, arrived("A"));
        log.record(0, arrived("C"));

        let names: Vec<_> = log
            .into_sorted()
            .iter()
            .map(|e| e.kind.process().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_preempted_precedes_selected() {
        let mut log = EventLog::new();
        log.record(
            2,
            EventKind::Selected {
                process: "P2".to_string(),
                burst: 2,
            },
        );
        log.record(
            2,
            EventKind::Preempted {
                process: "P1".to_string(),
                reason: PreemptReason::ShorterJob,
            },
        );
        let events = log.into_sorted();
        assert_eq!(events[0].kind.process(), Some("P1"));
        assert_eq!(events[1].kind.process(), Some("P2"));
    }
}
