// ABOUTME: Defines the admission policy - how many agents may hold permission at once.
// ABOUTME: Supports a literal cap or one derived from the ring size.

use serde::{Deserialize, Serialize};

/// The arbiter's answer to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The agent may acquire its resources.
    Granted,
    /// The agent must ask again.
    Denied,
}

impl Decision {
    pub fn is_granted(self) -> bool {
        matches!(self, Decision::Granted)
    }
}

/// Maximum number of agents admitted at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionLimit {
    /// A literal cap, independent of ring size.
    Fixed(usize),
    /// Half the ring, rounded down.
    HalfRing,
}

impl Default for AdmissionLimit {
    fn default() -> Self {
        AdmissionLimit::Fixed(2)
    }
}

impl AdmissionLimit {
    /// Resolve the cap for a ring of `agents` seats.
    pub fn resolve(self, agents: usize) -> usize {
        match self {
            AdmissionLimit::Fixed(cap) => cap,
            AdmissionLimit::HalfRing => agents / 2,
        }
    }
}

/// Grant iff fewer than `cap` agents are currently admitted.
pub fn evaluate(admitted: usize, cap: usize) -> Decision {
    if admitted < cap {
        Decision::Granted
    } else {
        Decision::Denied
    }
}
