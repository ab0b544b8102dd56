// ABOUTME: The arbiter - a single sequential loop deciding who may act.
// ABOUTME: Drains completions before requests and exits once all clients are gone.

use std::sync::Arc;

use super::book::Book;
use super::message::{Completion, Inbox, Request};
use super::policy::{self, Decision};
use crate::hook::{DinnerEvent, HookRegistry};

/// Counters collected over an arbiter's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArbiterReport {
    /// Requests answered with a grant.
    pub grants: usize,
    /// Requests answered with a denial.
    pub denials: usize,
    /// Completion notices consumed.
    pub completions: usize,
    /// Highest number of simultaneously admitted agents.
    pub peak_admitted: usize,
}

/// Serializes admission decisions for a ring of agents.
///
/// The arbiter is the only owner of the [`Book`]; agents never see it. Each
/// call to [`step`](Arbiter::step) handles exactly one message, preferring a
/// pending completion over a pending request so capacity is freed before any
/// new admission is considered. When nothing is pending it waits without
/// spinning.
pub struct Arbiter {
    book: Book,
    inbox: Inbox,
    hooks: Arc<HookRegistry>,
    report: ArbiterReport,
}

impl Arbiter {
    /// Create an arbiter for `agents` seats admitting at most `cap` at once.
    pub fn new(agents: usize, cap: usize, inbox: Inbox, hooks: Arc<HookRegistry>) -> Self {
        Self {
            book: Book::new(agents, cap),
            inbox,
            hooks,
            report: ArbiterReport::default(),
        }
    }

    /// The current book.
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Counters so far.
    pub fn report(&self) -> ArbiterReport {
        ArbiterReport {
            peak_admitted: self.book.peak(),
            ..self.report
        }
    }

    /// Run until every client has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if any agent is still admitted when the channels close.
    pub async fn run(mut self) -> ArbiterReport {
        while self.step().await {}

        assert!(
            self.book.is_empty(),
            "arbiter shut down with {} agents still admitted",
            self.book.admitted()
        );
        tracing::debug!(report = ?self.report(), "arbiter shutting down");
        self.report()
    }

    /// Handle one message. Returns false once both channels are closed.
    pub async fn step(&mut self) -> bool {
        tokio::select! {
            biased;
            Some(completion) = self.inbox.completions.recv() => {
                self.on_completion(completion).await;
                true
            }
            Some(request) = self.inbox.requests.recv() => {
                self.on_request(request).await;
                true
            }
            else => false,
        }
    }

    async fn on_completion(&mut self, completion: Completion) {
        let Completion { agent, ack } = completion;
        self.check_agent(agent);

        self.book.release(agent);
        self.report.completions += 1;
        self.hooks
            .fire(DinnerEvent::Released {
                agent,
                admitted: self.book.admitted(),
            })
            .await;

        // A dropped ack only means the agent stopped waiting; the book is already correct.
        let _ = ack.send(());
    }

    async fn on_request(&mut self, request: Request) {
        let Request { agent, reply } = request;
        self.check_agent(agent);
        assert!(
            !self.book.is_admitted(agent),
            "agent {} requested while already admitted",
            agent
        );

        let decision = policy::evaluate(self.book.admitted(), self.book.cap());
        match decision {
            Decision::Granted => {
                self.book.grant(agent);
                self.report.grants += 1;
                self.hooks
                    .fire(DinnerEvent::Granted {
                        agent,
                        admitted: self.book.admitted(),
                    })
                    .await;
            }
            Decision::Denied => {
                self.report.denials += 1;
                self.hooks
                    .fire(DinnerEvent::Denied {
                        agent,
                        admitted: self.book.admitted(),
                    })
                    .await;
            }
        }

        if reply.send(decision).is_err() && decision.is_granted() {
            tracing::warn!(agent, "agent vanished before its grant arrived");
            self.book.release(agent);
            self.hooks
                .fire(DinnerEvent::Released {
                    agent,
                    admitted: self.book.admitted(),
                })
                .await;
        }
    }

    fn check_agent(&self, agent: usize) {
        assert!(
            agent < self.book.seats(),
            "message from unknown agent {} (table has {})",
            agent,
            self.book.seats()
        );
    }
}
