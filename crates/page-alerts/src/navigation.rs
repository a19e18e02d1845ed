//! Clearing alerts when navigation completes.
//!
//! The application publishes [`NavigationEvent`]s through
//! [`NavigationEvents`]; a listener started once per session sweeps every
//! context so only preserved alerts outlive a page change.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::registry::AlertRegistry;

/// Default capacity of the navigation channel.
pub const DEFAULT_CAPACITY: usize = 16;

/// A navigation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A route/state change finished successfully.
    StateChangeSuccess,
}

/// Publisher side of the navigation signal.
#[derive(Debug, Clone)]
pub struct NavigationEvents {
    sender: broadcast::Sender<NavigationEvent>,
}

impl NavigationEvents {
    /// Creates a channel holding up to `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns a new receiver for subsequent events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.sender.subscribe()
    }

    /// Publishes a completed navigation.
    ///
    /// Returns the number of listeners that will see it.
    pub fn completed(&self) -> usize {
        match self.sender.send(NavigationEvent::StateChangeSuccess) {
            Ok(listeners) => listeners,
            Err(_) => {
                debug!("navigation completed with no listeners");
                0
            }
        }
    }
}

impl Default for NavigationEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Sweeps `registry` on every navigation event until the channel closes.
///
/// A lagging receiver sweeps once for the events it missed. Returns the
/// number of sweeps performed.
pub async fn clear_on_navigation(
    registry: AlertRegistry,
    mut events: broadcast::Receiver<NavigationEvent>,
) -> usize {
    let mut sweeps = 0;
    loop {
        match events.recv().await {
            Ok(NavigationEvent::StateChangeSuccess) => {
                registry.navigation_completed();
                sweeps += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "navigation listener lagged");
                registry.navigation_completed();
                sweeps += 1;
            }
            Err(RecvError::Closed) => break,
        }
    }

    info!(sweeps, "navigation listener stopped");
    sweeps
}

/// Spawns [`clear_on_navigation`] on the current tokio runtime.
pub fn spawn_clear_on_navigation(
    registry: AlertRegistry,
    events: &NavigationEvents,
) -> JoinHandle<usize> {
    tokio::spawn(clear_on_navigation(registry, events.subscribe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::AlertSink;
    use crate::types::{AlertMessage, AlertOptions};

    #[test]
    fn completed_without_listeners() {
        let events = NavigationEvents::default();
        assert_eq!(events.completed(), 0);
    }

    #[tokio::test]
    async fn listener_sweeps_on_each_event() {
        let registry = AlertRegistry::new();
        let ctx = registry.get(Some("page"));
        ctx.info(AlertMessage::plain("kept").options(AlertOptions::new().preserve(true)));
        ctx.info("dropped");

        let events = NavigationEvents::default();
        let handle = spawn_clear_on_navigation(registry.clone(), &events);

        assert_eq!(events.completed(), 1);
        assert_eq!(events.completed(), 1);
        drop(events);

        let sweeps = handle.await.unwrap();
        assert_eq!(sweeps, 2);
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn single_sweep_keeps_preserved() {
        let registry = AlertRegistry::new();
        registry
            .get(None)
            .success(AlertMessage::plain("kept").options(AlertOptions::new().preserve(true)));

        let events = NavigationEvents::new(4);
        let receiver = events.subscribe();
        events.completed();
        drop(events);

        let sweeps = clear_on_navigation(registry.clone(), receiver).await;
        assert_eq!(sweeps, 1);
        assert_eq!(registry.global().size(), 1);
        assert!(!registry.global().all()[0].preserve);
    }

    #[tokio::test]
    async fn lagged_listener_still_sweeps() {
        let registry = AlertRegistry::new();
        registry.get(None).info("dropped");

        let events = NavigationEvents::new(1);
        let receiver = events.subscribe();
        events.completed();
        events.completed();
        events.completed();
        drop(events);

        let sweeps = clear_on_navigation(registry.clone(), receiver).await;
        assert!(sweeps >= 1);
        assert!(registry.global().is_empty());
    }
}
