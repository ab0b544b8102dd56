// ABOUTME: Hook system for observing arbiter decisions and agent progress.
// ABOUTME: Provides events, a registry, a tracing logger, and an in-memory journal.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

/// Events fired during a dinner.
///
/// Agent indices are zero-based; `round` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DinnerEvent {
    /// The arbiter admitted an agent. `admitted` includes it.
    Granted { agent: usize, admitted: usize },

    /// The arbiter turned an agent away.
    Denied { agent: usize, admitted: usize },

    /// The arbiter consumed a completion notice. `admitted` excludes the agent.
    Released { agent: usize, admitted: usize },

    /// An agent holds both resources and begins its critical action.
    StartedEating { agent: usize, round: usize },

    /// An agent ends its critical action, still holding both resources.
    FinishedEating { agent: usize, round: usize },

    /// An agent finished its last round.
    AgentDone { agent: usize },
}

impl DinnerEvent {
    /// The agent this event concerns.
    pub fn agent(&self) -> usize {
        match *self {
            DinnerEvent::Granted { agent, .. }
            | DinnerEvent::Denied { agent, .. }
            | DinnerEvent::Released { agent, .. }
            | DinnerEvent::StartedEating { agent, .. }
            | DinnerEvent::FinishedEating { agent, .. }
            | DinnerEvent::AgentDone { agent } => agent,
        }
    }
}

/// Trait for implementing hooks.
#[async_trait]
pub trait DinnerHook: Send + Sync {
    /// Called when an event occurs.
    ///
    /// Errors are logged by the registry and never interrupt the dinner.
    async fn on_event(&self, event: &DinnerEvent) -> Result<(), anyhow::Error>;

    /// Optional: Filter which events this hook cares about.
    /// Default returns true for all events.
    fn accepts(&self, event: &DinnerEvent) -> bool {
        let _ = event;
        true
    }
}

/// Registry for managing and firing hooks.
pub struct HookRegistry {
    hooks: RwLock<Vec<Arc<dyn DinnerHook>>>,
}

impl HookRegistry {
    /// Create a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Register a hook.
    pub async fn register(&self, hook: impl DinnerHook + 'static) {
        self.hooks.write().await.push(Arc::new(hook));
    }

    /// Register a hook wrapped in Arc.
    pub async fn register_arc(&self, hook: Arc<dyn DinnerHook>) {
        self.hooks.write().await.push(hook);
    }

    /// Register a closure that sees every event.
    pub async fn on_event<F>(&self, f: F)
    where
        F: Fn(&DinnerEvent) + Send + Sync + 'static,
    {
        self.register(FnHook { callback: f }).await;
    }

    /// Fire an event to all accepting hooks, in registration order.
    pub async fn fire(&self, event: DinnerEvent) {
        let hooks = self.hooks.read().await;
        for hook in hooks.iter() {
            if !hook.accepts(&event) {
                continue;
            }
            if let Err(e) = hook.on_event(&event).await {
                tracing::warn!(?event, error = %e, "hook failed");
            }
        }
    }

    /// Get the number of registered hooks.
    pub async fn len(&self) -> usize {
        self.hooks.read().await.len()
    }

    /// Check if the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.hooks.read().await.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

struct FnHook<F> {
    callback: F,
}

#[async_trait]
impl<F> DinnerHook for FnHook<F>
where
    F: Fn(&DinnerEvent) + Send + Sync,
{
    async fn on_event(&self, event: &DinnerEvent) -> Result<(), anyhow::Error> {
        (self.callback)(event);
        Ok(())
    }
}

/// Logs events through `tracing`.
///
/// Eating events are logged at INFO with one-based display numbers;
/// arbiter decisions at DEBUG.
pub struct TracingHook;

#[async_trait]
impl DinnerHook for TracingHook {
    async fn on_event(&self, event: &DinnerEvent) -> Result<(), anyhow::Error> {
        match *event {
            DinnerEvent::StartedEating { agent, round } => {
                tracing::info!(round, "start to eat {}", agent + 1);
            }
            DinnerEvent::FinishedEating { agent, round } => {
                tracing::info!(round, "finishing eating {}", agent + 1);
            }
            DinnerEvent::Granted { agent, admitted } => {
                tracing::debug!(agent = agent + 1, admitted, "granted");
            }
            DinnerEvent::Denied { agent, admitted } => {
                tracing::debug!(agent = agent + 1, admitted, "denied");
            }
            DinnerEvent::Released { agent, admitted } => {
                tracing::debug!(agent = agent + 1, admitted, "released");
            }
            DinnerEvent::AgentDone { agent } => {
                tracing::debug!(agent = agent + 1, "done");
            }
        }
        Ok(())
    }
}

/// An event with its position in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub seq: usize,
    pub event: DinnerEvent,
}

/// In-memory journal of every event, in firing order.
///
/// Useful for testing: sequence numbers give a total order consistent with
/// real time, since each event is recorded while its cause still holds.
pub struct MemoryJournal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournal {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Create a new journal wrapped in Arc for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of all entries so far.
    pub async fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().await.clone()
    }

    /// Snapshot of all events so far, without sequence numbers.
    pub async fn events(&self) -> Vec<DinnerEvent> {
        self.entries.lock().await.iter().map(|e| e.event).collect()
    }

    /// Serialize the journal as a JSON array.
    pub async fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.entries.lock().await)
    }
}

impl Default for MemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DinnerHook for MemoryJournal {
    async fn on_event(&self, event: &DinnerEvent) -> Result<(), anyhow::Error> {
        let mut entries = self.entries.lock().await;
        let seq = entries.len();
        entries.push(JournalEntry { seq, event: *event });
        Ok(())
    }
}
