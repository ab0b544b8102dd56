// ABOUTME: Arbiter module - the single coordinator that admits agents to act.
// ABOUTME: Contains the book, admission policy, message protocol, and event loop.

mod arbiter;
mod book;
mod message;
mod policy;

pub use arbiter::{Arbiter, ArbiterReport};
pub use book::Book;
pub use message::{ArbiterClient, Completion, Inbox, Request, channel};
pub use policy::{AdmissionLimit, Decision, evaluate};

#[cfg(test)]
mod arbiter_test;
#[cfg(test)]
mod policy_test;
