// ABOUTME: Table module - the shared resources and how agents are seated around them.
// ABOUTME: Resources are plain mutexes; the ring fixes which two each agent uses.

mod resource;
mod ring;

pub use resource::{Resource, ResourceGuard};
pub use ring::{Seat, Table};
