//! Error types for workload loading and validation.

use thiserror::Error;

/// A workload that cannot be simulated.
///
/// Always raised before the tick loop starts; once a workload has been
/// validated, every tick transition is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown scheduler type: {0}")]
    UnknownPolicy(String),

    #[error("Missing 'use' directive: no scheduling policy selected")]
    MissingPolicy,

    #[error("Missing 'runfor' directive: no run length given")]
    MissingRunLength,

    #[error("Missing quantum parameter when using 'rr'")]
    MissingQuantum,

    #[error("Quantum must be a positive number of ticks")]
    NonPositiveQuantum,

    #[error("Process {process} must have a positive burst")]
    NonPositiveBurst { process: String },

    #[error("Process {process} has negative arrival time {arrival}")]
    NegativeArrival { process: String, arrival: i64 },

    #[error("Process name {0} is declared more than once")]
    DuplicateProcess(String),
}

/// What went wrong on a single line of workload text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected an integer after '{directive}', found {found:?}")]
    InvalidNumber { directive: String, found: String },

    #[error("'{directive}' is missing its value")]
    MissingValue { directive: String },

    #[error("malformed process line, expected 'process name <name> arrival <n> burst <n>'")]
    MalformedProcess,

    #[error("unknown directive '{0}'")]
    UnknownDirective(String),
}

/// Malformed workload text, with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Top-level error for loading and running a workload.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
