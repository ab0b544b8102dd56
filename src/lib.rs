// ABOUTME: Root module for dining - arbiter-mediated dining philosophers.
// ABOUTME: Re-exports all public types from submodules.

pub mod agent;
pub mod arbiter;
pub mod config;
pub mod dinner;
pub mod error;
pub mod hook;
pub mod prelude;
pub mod table;

pub use error::DiningError;
