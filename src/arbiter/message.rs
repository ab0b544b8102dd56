// ABOUTME: Message types exchanged between agents and the arbiter.
// ABOUTME: Provides the client handle agents use to request and report completion.

use tokio::sync::{mpsc, oneshot};

use super::policy::Decision;
use crate::error::DiningError;

/// A request for permission to act.
#[derive(Debug)]
pub struct Request {
    /// Index of the requesting agent.
    pub agent: usize,
    /// Where the arbiter sends its decision.
    pub reply: oneshot::Sender<Decision>,
}

/// Notice that an agent has released its resources.
#[derive(Debug)]
pub struct Completion {
    /// Index of the finishing agent.
    pub agent: usize,
    /// Fired once the book entry has been cleared.
    pub ack: oneshot::Sender<()>,
}

/// Receiving half of the arbiter's channels.
pub struct Inbox {
    pub(crate) requests: mpsc::Receiver<Request>,
    pub(crate) completions: mpsc::Receiver<Completion>,
}

/// Sending half of the arbiter's channels, shared by all agents.
///
/// The arbiter shuts down once every clone has been dropped.
#[derive(Debug, Clone)]
pub struct ArbiterClient {
    requests: mpsc::Sender<Request>,
    completions: mpsc::Sender<Completion>,
}

/// Create the channel pair for a table of `agents` seats.
///
/// Each agent has at most one request or completion in flight, so a buffer
/// of one slot per agent means sends never wait on the arbiter.
pub fn channel(agents: usize) -> (ArbiterClient, Inbox) {
    let capacity = agents.max(1);
    let (request_tx, request_rx) = mpsc::channel(capacity);
    let (completion_tx, completion_rx) = mpsc::channel(capacity);

    (
        ArbiterClient {
            requests: request_tx,
            completions: completion_tx,
        },
        Inbox {
            requests: request_rx,
            completions: completion_rx,
        },
    )
}

impl ArbiterClient {
    /// Ask for permission and wait for the decision.
    pub async fn request(&self, agent: usize) -> Result<Decision, DiningError> {
        let (reply, decision) = oneshot::channel();
        self.requests
            .send(Request { agent, reply })
            .await
            .map_err(|_| DiningError::ArbiterUnavailable { agent })?;

        decision
            .await
            .map_err(|_| DiningError::ArbiterUnavailable { agent })
    }

    /// Report completion and wait until the arbiter has recorded it.
    pub async fn complete(&self, agent: usize) -> Result<(), DiningError> {
        let (ack, recorded) = oneshot::channel();
        self.completions
            .send(Completion { agent, ack })
            .await
            .map_err(|_| DiningError::ArbiterUnavailable { agent })?;

        recorded
            .await
            .map_err(|_| DiningError::ArbiterUnavailable { agent })
    }
}
