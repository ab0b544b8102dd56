// ABOUTME: Ring topology - N resources, N seats, each seat between two resources.
// ABOUTME: Agent i uses resource i on its left and resource i-1 (mod N) on its right.

use super::resource::Resource;

/// The two resources assigned to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub agent: usize,
    pub left: usize,
    pub right: usize,
}

impl Seat {
    /// True if the two seats have a resource in common.
    pub fn shares_with(&self, other: &Seat) -> bool {
        self.agent != other.agent
            && (self.left == other.left
                || self.left == other.right
                || self.right == other.left
                || self.right == other.right)
    }
}

/// A ring of resources.
///
/// ```text
///          r4  a0
///       a4        r0
///    r3              a1
///       a3        r1
///          r2  a2
/// ```
pub struct Table {
    resources: Vec<Resource>,
}

impl Table {
    /// Lay out `agents` resources in a ring.
    pub fn new(agents: usize) -> Self {
        Self {
            resources: (0..agents).map(Resource::new).collect(),
        }
    }

    /// Number of seats (and resources).
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resource(&self, index: usize) -> &Resource {
        &self.resources[index]
    }

    /// The seat of `agent`.
    pub fn seat(&self, agent: usize) -> Seat {
        let n = self.len();
        assert!(agent < n, "no seat {} at a table of {}", agent, n);
        Seat {
            agent,
            left: agent,
            right: (agent + n - 1) % n,
        }
    }

    /// Every seat, in agent order.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.len()).map(|agent| self.seat(agent))
    }

    /// True if no resource is currently held.
    pub fn is_idle(&self) -> bool {
        self.resources.iter().all(|r| !r.is_held())
    }
}
