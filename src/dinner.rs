// ABOUTME: Dinner - sets the table, spawns the arbiter and agents, waits for them all.
// ABOUTME: The arbiter stops once the last agent drops its client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;
use uuid::Uuid;

use crate::agent::{Agent, AgentReport};
use crate::arbiter::{self, Arbiter, ArbiterReport};
use crate::config::DinnerConfig;
use crate::error::DiningError;
use crate::hook::HookRegistry;
use crate::table::Table;

/// Result from running a dinner.
#[derive(Debug, Clone)]
pub struct DinnerReport {
    /// Identifier of this run.
    pub id: Uuid,

    /// One report per agent, in agent order.
    pub agents: Vec<AgentReport>,

    /// The arbiter's counters.
    pub arbiter: ArbiterReport,

    /// Wall-clock time from setup to shutdown.
    pub elapsed: Duration,
}

impl DinnerReport {
    /// Critical actions performed across all agents.
    pub fn total_rounds(&self) -> usize {
        self.agents.iter().map(|a| a.rounds).sum()
    }

    /// Longest run of denials any agent saw before a grant.
    pub fn max_denials_in_round(&self) -> usize {
        self.agents
            .iter()
            .map(|a| a.max_denials_in_round)
            .max()
            .unwrap_or(0)
    }
}

/// A full run: N agents, N resources, one arbiter.
pub struct Dinner {
    id: Uuid,
    config: DinnerConfig,
    hooks: Arc<HookRegistry>,
}

impl Dinner {
    /// Create a dinner from a validated config.
    pub fn new(config: DinnerConfig) -> Result<Self, DiningError> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            hooks: Arc::new(HookRegistry::new()),
        })
    }

    /// Get the run ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &DinnerConfig {
        &self.config
    }

    /// Hooks fired by the arbiter and every agent.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Run every agent to completion, then shut the arbiter down.
    ///
    /// Returns `DiningError::TaskFailed` if any task panicked.
    pub async fn run(self) -> Result<DinnerReport, DiningError> {
        let span = tracing::info_span!("dinner", id = %self.id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(self) -> Result<DinnerReport, DiningError> {
        let start = Instant::now();
        let agents = self.config.agents;
        let cap = self.config.admission_cap();
        tracing::debug!(agents, rounds = self.config.rounds, cap, "setting the table");

        let table = Arc::new(Table::new(agents));
        let (client, inbox) = arbiter::channel(agents);
        let arbiter = tokio::spawn(Arbiter::new(agents, cap, inbox, self.hooks.clone()).run());

        let handles: Vec<_> = table
            .seats()
            .map(|seat| {
                let agent = Agent::new(
                    seat,
                    table.clone(),
                    client.clone(),
                    self.hooks.clone(),
                    &self.config,
                );
                tokio::spawn(agent.run().in_current_span())
            })
            .collect();

        // Only agents may keep the arbiter alive.
        drop(client);

        let results = futures::future::join_all(handles).await;
        let arbiter = arbiter.await;

        let mut reports = Vec::with_capacity(agents);
        let mut agent_errors = Vec::new();
        for result in results {
            match result.map_err(DiningError::from).and_then(|r| r) {
                Ok(report) => reports.push(report),
                Err(e) => agent_errors.push(e),
            }
        }

        // A panicked agent is the root cause of everything after it. Otherwise
        // a panicked arbiter explains every ArbiterUnavailable the agents saw.
        if let Some(pos) = agent_errors
            .iter()
            .position(|e| matches!(e, DiningError::TaskFailed(_)))
        {
            return Err(agent_errors.swap_remove(pos));
        }
        let arbiter = arbiter?;
        if let Some(err) = agent_errors.into_iter().next() {
            return Err(err);
        }

        let report = DinnerReport {
            id: self.id,
            agents: reports,
            arbiter,
            elapsed: start.elapsed(),
        };

        tracing::debug!(
            rounds = report.total_rounds(),
            grants = report.arbiter.grants,
            denials = report.arbiter.denials,
            peak = report.arbiter.peak_admitted,
            "dinner finished"
        );
        Ok(report)
    }
}
