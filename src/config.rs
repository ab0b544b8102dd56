// ABOUTME: Configuration for a dinner - table size, rounds, admission cap, act duration.
// ABOUTME: Deserializable with serde, built with a builder, validated before use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::arbiter::AdmissionLimit;
use crate::error::DiningError;

/// Settings for one dinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DinnerConfig {
    /// Number of agents, and of resources in the ring.
    pub agents: usize,
    /// Critical actions each agent performs before finishing.
    pub rounds: usize,
    /// How many agents the arbiter admits at once.
    pub admission: AdmissionLimit,
    /// How long an agent holds both resources per round.
    #[serde(rename = "eat_duration_ms", with = "duration_ms")]
    pub eat_duration: Duration,
}

impl Default for DinnerConfig {
    fn default() -> Self {
        Self {
            agents: 5,
            rounds: 3,
            admission: AdmissionLimit::default(),
            eat_duration: Duration::ZERO,
        }
    }
}

impl DinnerConfig {
    /// Create a new config builder.
    pub fn builder() -> DinnerConfigBuilder {
        DinnerConfigBuilder::new()
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, DiningError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DiningError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The numeric admission cap for this table.
    pub fn admission_cap(&self) -> usize {
        self.admission.resolve(self.agents)
    }

    /// Check that the dinner can run and cannot deadlock.
    pub fn validate(&self) -> Result<(), DiningError> {
        if self.agents < 2 {
            return Err(DiningError::InvalidConfig(format!(
                "a ring needs at least 2 agents, got {}",
                self.agents
            )));
        }
        if self.rounds == 0 {
            return Err(DiningError::InvalidConfig(
                "rounds must be at least 1".to_string(),
            ));
        }

        let cap = self.admission_cap();
        if cap == 0 {
            return Err(DiningError::InvalidConfig(
                "admission cap of 0 admits nobody".to_string(),
            ));
        }
        if cap >= self.agents {
            return Err(DiningError::InvalidConfig(format!(
                "admission cap {} lets all {} agents contend at once",
                cap, self.agents
            )));
        }

        Ok(())
    }
}

/// Builder for constructing configs.
pub struct DinnerConfigBuilder {
    config: DinnerConfig,
}

impl Default for DinnerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DinnerConfigBuilder {
    /// Create a new builder starting from the defaults.
    pub fn new() -> Self {
        Self {
            config: DinnerConfig::default(),
        }
    }

    pub fn agents(mut self, agents: usize) -> Self {
        self.config.agents = agents;
        self
    }

    pub fn rounds(mut self, rounds: usize) -> Self {
        self.config.rounds = rounds;
        self
    }

    pub fn admission(mut self, admission: AdmissionLimit) -> Self {
        self.config.admission = admission;
        self
    }

    pub fn eat_duration(mut self, duration: Duration) -> Self {
        self.config.eat_duration = duration;
        self
    }

    /// Validate and build the config.
    pub fn build(self) -> Result<DinnerConfig, DiningError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).map_err(ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
