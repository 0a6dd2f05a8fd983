//! Line-oriented workload files.
//!
//! ```text
//! processcount 2
//! runfor 10
//! use rr
//! quantum 2
//! process name P1 arrival 0 burst 5
//! process name P2 arrival 1 burst 4
//! end
//! ```

use std::{fs, path::Path};

use tracing::warn;

use crate::{
    config::{Policy, Workload},
    core::{Process, Ticks},
    error::{ConfigError, Error, ParseError, ParseErrorKind},
};

/// A workload file after parsing, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedWorkload {
    pub workload: Workload,
    /// Processes in declaration order.
    pub processes: Vec<Process>,
}

pub fn load_workload(path: impl AsRef<Path>) -> Result<LoadedWorkload, Error> {
    let text = fs::read_to_string(path)?;
    parse_workload(&text)
}

pub fn parse_workload(text: &str) -> Result<LoadedWorkload, Error> {
    let mut process_count = 0;
    let mut run_for = None;
    let mut policy = None;
    let mut quantum = None;
    let mut processes = Vec::new();

    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));
    for (line_no, line) in lines.by_ref() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&directive) = parts.first() else {
            continue;
        };
        if directive.starts_with('#') {
            continue;
        }

        let fail = |kind: ParseErrorKind| ParseError {
            line: line_no,
            kind,
        };
        match directive {
            "processcount" => process_count = number(&parts, line_no)? as usize,
            "runfor" => run_for = Some(number(&parts, line_no)?),
            "quantum" => {
                let value = signed(&parts, 1, line_no)?;
                if value <= 0 {
                    return Err(ConfigError::NonPositiveQuantum.into());
                }
                quantum = Some(value as Ticks);
            }
            "use" => {
                let name = parts.get(1).ok_or_else(|| {
                    fail(ParseErrorKind::MissingValue {
                        directive: "use".to_string(),
                    })
                })?;
                policy = Some(name.parse::<Policy>()?);
            }
            "process" => processes.push(process(&parts, line_no)?),
            "end" => break,
            other => return Err(fail(ParseErrorKind::UnknownDirective(other.to_string())).into()),
        }
    }

    let trailing = lines
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .count();
    if trailing > 0 {
        warn!(lines = trailing, "ignoring content after 'end'");
    }

    let policy = policy.ok_or(ConfigError::MissingPolicy)?;
    let run_for = run_for.ok_or(ConfigError::MissingRunLength)?;

    let mut workload = Workload::new(policy, run_for).with_process_count(process_count);
    workload.quantum = quantum;

    Ok(LoadedWorkload {
        workload,
        processes,
    })
}

// Non-negative integer value of a `<directive> <n>` line
fn number(parts: &[&str], line: usize) -> Result<Ticks, ParseError> {
    let value = signed(parts, 1, line)?;
    Ticks::try_from(value).map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::InvalidNumber {
            directive: parts[0].to_string(),
            found: value.to_string(),
        },
    })
}

fn signed(parts: &[&str], index: usize, line: usize) -> Result<i64, ParseError> {
    let directive = parts[index - 1].to_string();
    let raw = parts.get(index).ok_or_else(|| ParseError {
        line,
        kind: ParseErrorKind::MissingValue {
            directive: directive.clone(),
        },
    })?;
    raw.parse().map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::InvalidNumber {
            directive,
            found: raw.to_string(),
        },
    })
}

// process name <name> arrival <n> burst <n>
fn process(parts: &[&str], line: usize) -> Result<Process, Error> {
    let malformed = || ParseError {
        line,
        kind: ParseErrorKind::MalformedProcess,
    };
    if parts.len() != 7 || parts[1] != "name" || parts[3] != "arrival" || parts[5] != "burst" {
        return Err(malformed().into());
    }

    let name = parts[2];
    let arrival = signed(parts, 4, line)?;
    let burst = signed(parts, 6, line)?;
    if arrival < 0 {
        return Err(ConfigError::NegativeArrival {
            process: name.to_string(),
            arrival,
        }
        .into());
    }
    if burst <= 0 {
        return Err(ConfigError::NonPositiveBurst {
            process: name.to_string(),
        }
        .into());
    }

    Ok(Process::new(name, arrival as Ticks, burst as Ticks))
}

/// Write a workload back out in the file format `parse_workload` reads.
pub fn render_workload(workload: &Workload, processes: &[Process]) -> String {
    let mut lines = vec![
        format!("processcount {}", workload.process_count),
        format!("runfor {}", workload.run_for),
        format!("use {}", workload.policy.keyword()),
    ];
    if let Some(quantum) = workload.quantum {
        lines.push(format!("quantum {quantum}"));
    }
    lines.extend(processes.iter().map(|p| {
        format!(
            "process name {} arrival {} burst {}",
            p.name, p.arrival, p.burst
        )
    }));
    lines.push("end".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RR_INPUT: &str = "\
# two processes sharing the CPU
processcount 2
runfor 15
use rr
quantum 2

process name A arrival 0 burst 5
process name B arrival 1 burst 4
end
process name C arrival 2 burst 1
";

    #[test]
    fn test_parses_full_workload() {
        let loaded = parse_workload(RR_INPUT).unwrap();
        assert_eq!(
            loaded.workload,
            Workload::new(Policy::Rr, 15)
                .with_process_count(2)
                .with_quantum(2)
        );
        assert_eq!(
            loaded.processes,
            vec![Process::new("A", 0, 5), Process::new("B", 1, 4)]
        );
    }

    #[test]
    fn test_unknown_directive_and_missing_policy() {
        let err = parse_workload("processcount 0\nruntfor 3\nend\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                line: 2,
                kind: ParseErrorKind::UnknownDirective(_)
            })
        ));

        let err = parse_workload("runfor 3\nend\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingPolicy)));
    }

    #[test]
    fn test_missing_run_length() {
        let err = parse_workload("use fcfs\nend\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingRunLength)));
    }

    #[test]
    fn test_unknown_policy() {
        let err = parse_workload("runfor 3\nuse lottery\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownPolicy(ref p)) if p == "lottery"));
    }

    #[test]
    fn test_negative_arrival() {
        let err = parse_workload("runfor 3\nuse sjf\nprocess name X arrival -1 burst 2\n")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::NegativeArrival { arrival: -1, .. })
        ));
    }

    #[test]
    fn test_bad_numbers() {
        let err = parse_workload("runfor ten\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: expected an integer after 'runfor', found \"ten\""
        );

        let err = parse_workload("use rr\nrunfor 4\nquantum -3\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NonPositiveQuantum)));

        let err = parse_workload("use rr\nprocess name X arrival 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                line: 2,
                kind: ParseErrorKind::MalformedProcess
            })
        ));
    }

    #[test]
    fn test_render_reads_back() {
        let loaded = parse_workload(RR_INPUT).unwrap();
        let text = render_workload(&loaded.workload, &loaded.processes);
        assert_eq!(parse_workload(&text).unwrap(), loaded);
    }
}
