//! The global aggregate behind the reserved `"all"` context.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::queue::{AlertQueue, AlertSink, QueueEnv};
use crate::types::{AlertMessage, AlertRecord, Severity};

/// Reserved context name of the global aggregate.
pub const GLOBAL_CONTEXT: &str = "all";

/// Named queues of a registry, in creation order.
pub(crate) type QueueMap = Arc<RwLock<IndexMap<String, AlertQueue>>>;

/// Fans alerts out to every named queue and mirrors them in its own queue.
///
/// The aggregate shares the registry's queue map rather than owning it, so
/// queues created after the aggregate still receive its pushes. The map stays
/// read-locked while a push or sweep touches the queues, so a context created
/// concurrently either receives the fan-out or is seeded after it. Render
/// effects are emitted once the lock is released.
#[derive(Debug, Clone)]
pub struct GlobalAggregate {
    queues: QueueMap,
    internal: AlertQueue,
}

impl GlobalAggregate {
    pub(crate) fn new(queues: QueueMap, env: Arc<QueueEnv>) -> Self {
        Self {
            queues,
            internal: AlertQueue::with_env(GLOBAL_CONTEXT, Vec::new(), env),
        }
    }

    /// Returns true if both handles refer to the same aggregate.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.internal.ptr_eq(&other.internal)
    }

    /// Returns the number of named queues the aggregate fans out to.
    #[must_use]
    pub fn queue_count(&self) -> usize {
        self.queues.read().len()
    }
}

impl AlertSink for GlobalAggregate {
    /// Returns a deep copy of the aggregate's own records.
    fn all(&self) -> Vec<AlertRecord> {
        self.internal.all()
    }

    fn size(&self) -> usize {
        self.internal.size()
    }

    fn clear_all_except_preserved(&self) {
        let changed: Vec<AlertQueue> = {
            let queues = self.queues.read();
            let mut changed: Vec<AlertQueue> =
                queues.values().filter(|q| q.sweep() > 0).cloned().collect();
            if self.internal.sweep() > 0 {
                changed.push(self.internal.clone());
            }
            info!(queues = queues.len(), "swept all alert contexts");
            changed
        };

        for queue in &changed {
            queue.notify_changed();
        }
    }

    fn push(&self, severity: Severity, message: AlertMessage) {
        let queues: Vec<AlertQueue> = {
            let queues = self.queues.read();
            for queue in queues.values() {
                queue.insert(severity, message.clone());
            }
            self.internal.insert(severity, message);
            queues.values().cloned().collect()
        };

        for queue in &queues {
            queue.notify_pushed();
        }
        self.internal.notify_pushed();

        debug!(severity = %severity, queues = queues.len(), "fanned out alert");
    }
}
