//! Text rendering of a finished run.

use crate::{
    config::{Policy, Workload},
    core::{Event, EventKind},
    sim::SimOutcome,
    stats::Statistics,
};

/// One trace line, e.g. `Time   5 : P2 selected (burst   4)`.
pub fn event_line(event: &Event) -> String {
    let t = event.time;
    match &event.kind {
        EventKind::Arrived { process } => format!("Time {t:>3} : {process} arrived"),
        EventKind::Finished { process } => format!("Time {t:>3} : {process} finished"),
        EventKind::Preempted { process, .. } => format!("Time {t:>3} : {process} preempted"),
        EventKind::Selected { process, burst } => {
            format!("Time {t:>3} : {process} selected (burst {burst:>3})")
        }
        EventKind::Idle => format!("Time {t:>3} : Idle"),
        EventKind::RunComplete => format!("Finished at time {t:>3}"),
    }
}

/// Full report: header, trace, then per-process statistics.
pub fn render(workload: &Workload, outcome: &SimOutcome, stats: &Statistics) -> String {
    let mut lines = vec![
        format!("{:>3} processes", workload.process_count),
        format!("Using {}", workload.policy),
    ];
    if let (Policy::Rr, Some(quantum)) = (workload.policy, workload.quantum) {
        lines.push(format!("Quantum {quantum:>3}"));
    }

    lines.extend(outcome.events.iter().map(event_line));
    lines.push(String::new());

    lines.extend(stats.completed.iter().map(|s| {
        format!(
            "{} wait {:>3} turnaround {:>3} response {:>3}",
            s.name, s.wait, s.turnaround, s.response
        )
    }));
    if !stats.unfinished.is_empty() {
        lines.push(format!(
            "Processes that did not finish: {}",
            stats.unfinished.join(" ")
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
