// ABOUTME: A single shared resource - a binary mutex placed between two agents.
// ABOUTME: Acquire returns a guard; dropping the guard is the release.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

const FREE: usize = usize::MAX;

/// One non-shareable unit in the ring.
///
/// The holder is tracked beside the lock so that acquiring a resource that
/// is somehow still marked held, or releasing it as someone else, aborts.
pub struct Resource {
    index: usize,
    lock: Mutex<()>,
    holder: AtomicUsize,
}

impl Resource {
    /// Create a free resource.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Mutex::new(()),
            holder: AtomicUsize::new(FREE),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The agent currently holding this resource, if any.
    pub fn holder(&self) -> Option<usize> {
        match self.holder.load(Ordering::SeqCst) {
            FREE => None,
            agent => Some(agent),
        }
    }

    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }

    /// Wait until the resource is free, then take it for `agent`.
    ///
    /// Waiters are served in whatever order the underlying mutex picks.
    pub async fn acquire(&self, agent: usize) -> ResourceGuard<'_> {
        let guard = self.lock.lock().await;

        let previous = self.holder.swap(agent, Ordering::SeqCst);
        assert!(
            previous == FREE,
            "resource {} acquired by agent {} while held by agent {}",
            self.index,
            agent,
            previous
        );

        ResourceGuard {
            resource: self,
            agent,
            _guard: guard,
        }
    }
}

/// Proof that an agent holds a resource.
pub struct ResourceGuard<'a> {
    resource: &'a Resource,
    agent: usize,
    _guard: MutexGuard<'a, ()>,
}

impl ResourceGuard<'_> {
    pub fn agent(&self) -> usize {
        self.agent
    }

    pub fn resource(&self) -> usize {
        self.resource.index
    }

    /// Give the resource back.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        // Holder is cleared before the mutex guard field drops.
        let previous = self.resource.holder.swap(FREE, Ordering::SeqCst);
        if previous != self.agent && !std::thread::panicking() {
            panic!(
                "resource {} released by agent {} but held by {}",
                self.resource.index, self.agent, previous
            );
        }
    }
}
