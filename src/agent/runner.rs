// ABOUTME: Agent runner - the request, act, release, notify loop for one seat.
// ABOUTME: Retries denied requests immediately and reports per-round denial counts.

use std::sync::Arc;
use std::time::Duration;

use crate::arbiter::{ArbiterClient, Decision};
use crate::config::DinnerConfig;
use crate::error::DiningError;
use crate::hook::{DinnerEvent, HookRegistry};
use crate::table::{Seat, Table};

/// Result from running an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentReport {
    /// Zero-based index of the agent.
    pub agent: usize,

    /// Rounds completed.
    pub rounds: usize,

    /// Denials received across all rounds.
    pub denials: usize,

    /// Most denials received before a single grant.
    pub max_denials_in_round: usize,
}

/// One agent at the table.
pub struct Agent {
    seat: Seat,
    table: Arc<Table>,
    client: ArbiterClient,
    hooks: Arc<HookRegistry>,
    rounds: usize,
    eat_duration: Duration,
}

impl Agent {
    /// Seat an agent. Rounds and act duration come from `config`.
    pub fn new(
        seat: Seat,
        table: Arc<Table>,
        client: ArbiterClient,
        hooks: Arc<HookRegistry>,
        config: &DinnerConfig,
    ) -> Self {
        Self {
            seat,
            table,
            client,
            hooks,
            rounds: config.rounds,
            eat_duration: config.eat_duration,
        }
    }

    /// Get the agent's index.
    pub fn index(&self) -> usize {
        self.seat.agent
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Run every round, then drop the arbiter client.
    ///
    /// Each round waits for a grant, holds both resources for the critical
    /// action, releases them, and returns only after the arbiter has
    /// recorded the completion.
    pub async fn run(self) -> Result<AgentReport, DiningError> {
        let agent = self.index();
        let mut report = AgentReport {
            agent,
            ..AgentReport::default()
        };

        for round in 1..=self.rounds {
            let denials = self.wait_for_grant().await?;
            report.denials += denials;
            report.max_denials_in_round = report.max_denials_in_round.max(denials);

            self.eat(round).await;

            self.client.complete(agent).await?;
            report.rounds = round;
        }

        self.hooks.fire(DinnerEvent::AgentDone { agent }).await;
        Ok(report)
    }

    /// Ask until granted. Returns the number of denials.
    async fn wait_for_grant(&self) -> Result<usize, DiningError> {
        let mut denials = 0;
        loop {
            match self.client.request(self.index()).await? {
                Decision::Granted => return Ok(denials),
                Decision::Denied => denials += 1,
            }
        }
    }

    async fn eat(&self, round: usize) {
        let agent = self.index();

        // Order does not matter while fewer than N agents are admitted.
        let right = self.table.resource(self.seat.right).acquire(agent).await;
        let left = self.table.resource(self.seat.left).acquire(agent).await;

        self.hooks
            .fire(DinnerEvent::StartedEating { agent, round })
            .await;
        if self.eat_duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.eat_duration).await;
        }
        self.hooks
            .fire(DinnerEvent::FinishedEating { agent, round })
            .await;

        left.release();
        right.release();
    }
}
