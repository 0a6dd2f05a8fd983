pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{Event, EventKind, EventLog, PreemptReason};
pub use state::{NameKey, Process, ProcessId, ProcessState, SimCtx, Ticks};
