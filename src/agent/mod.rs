// ABOUTME: Agent module - the concurrent actors competing for two resources each.
// ABOUTME: Provides the Agent loop and its per-run report.

mod runner;

pub use runner::{Agent, AgentReport};
