// ABOUTME: The arbiter's book - which agents currently hold permission to act.
// ABOUTME: Owned by the arbiter loop alone; violations of the cap are fatal.

/// Record of admitted agents.
///
/// Entry `i` is true from the moment agent `i` is granted until its
/// completion notice is consumed. The number of true entries never exceeds
/// the cap the book was built with; `grant` and `release` assert this, so a
/// broken policy or a misbehaving agent aborts instead of corrupting state.
#[derive(Debug, Clone)]
pub struct Book {
    entries: Vec<bool>,
    admitted: usize,
    cap: usize,
    peak: usize,
}

impl Book {
    /// Create an empty book for `agents` seats.
    pub fn new(agents: usize, cap: usize) -> Self {
        Self {
            entries: vec![false; agents],
            admitted: 0,
            cap,
            peak: 0,
        }
    }

    /// Number of agents currently admitted.
    pub fn admitted(&self) -> usize {
        self.admitted
    }

    /// The admission cap.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Highest admitted count ever observed.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Number of seats the book covers.
    pub fn seats(&self) -> usize {
        self.entries.len()
    }

    /// True if nobody is admitted.
    pub fn is_empty(&self) -> bool {
        self.admitted == 0
    }

    pub fn is_admitted(&self, agent: usize) -> bool {
        self.entries[agent]
    }

    /// Mark `agent` as admitted.
    ///
    /// # Panics
    ///
    /// Panics if the agent is already admitted or the cap would be exceeded.
    pub fn grant(&mut self, agent: usize) {
        assert!(
            !self.entries[agent],
            "agent {} granted while already admitted",
            agent
        );
        assert!(
            self.admitted < self.cap,
            "admission cap {} exceeded by agent {}",
            self.cap,
            agent
        );

        self.entries[agent] = true;
        self.admitted += 1;
        self.peak = self.peak.max(self.admitted);
    }

    /// Clear `agent`'s entry.
    ///
    /// # Panics
    ///
    /// Panics if the agent was not admitted.
    pub fn release(&mut self, agent: usize) {
        assert!(
            self.entries[agent],
            "agent {} finished without being admitted",
            agent
        );

        self.entries[agent] = false;
        self.admitted -= 1;
    }
}
