// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use dining::prelude::*;` to get started quickly.

pub use crate::agent::{Agent, AgentReport};
pub use crate::arbiter::{AdmissionLimit, Arbiter, ArbiterClient, ArbiterReport, Book, Decision};
pub use crate::config::{DinnerConfig, DinnerConfigBuilder};
pub use crate::dinner::{Dinner, DinnerReport};
pub use crate::error::DiningError;
pub use crate::hook::{
    DinnerEvent, DinnerHook, HookRegistry, JournalEntry, MemoryJournal, TracingHook,
};
pub use crate::table::{Resource, ResourceGuard, Seat, Table};
