//! Render effects emitted by queues.
//!
//! Queues never touch the page. After each mutation they emit a
//! [`RenderEffect`] to every registered [`RenderObserver`], and the observer
//! decides how to re-render or animate.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info};

/// A side effect requested by a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEffect {
    /// The records of a context changed and should be re-rendered.
    Changed {
        /// The context whose records changed.
        context: String,
    },
    /// Scroll the page to the top so a newly pushed alert is visible.
    ScrollToTop {
        /// Length of the scroll animation.
        duration: Duration,
    },
}

impl fmt::Display for RenderEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed { context } => write!(f, "changed({context})"),
            Self::ScrollToTop { duration } => {
                write!(f, "scroll-to-top({}ms)", duration.as_millis())
            }
        }
    }
}

/// Trait for receivers of render effects.
///
/// Implement this trait to connect a renderer to the alert queues.
pub trait RenderObserver: Send + Sync + fmt::Debug {
    /// Returns the name of this observer.
    fn name(&self) -> &str;

    /// Handles one effect. Must not block.
    fn on_effect(&self, effect: &RenderEffect);

    /// Returns true if this observer is enabled.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// An observer that logs effects for debugging.
#[derive(Debug, Clone)]
pub struct LogObserver {
    name: String,
    enabled: bool,
}

impl LogObserver {
    /// Creates a new log observer.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }

    /// Sets whether the observer is enabled.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new("log")
    }
}

impl RenderObserver for LogObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_effect(&self, effect: &RenderEffect) {
        match effect {
            RenderEffect::Changed { context } => {
                debug!(observer = %self.name, context = %context, "alerts changed");
            }
            RenderEffect::ScrollToTop { duration } => {
                info!(
                    observer = %self.name,
                    duration_ms = duration.as_millis() as u64,
                    "scroll to top"
                );
            }
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The observers shared by every queue of a registry.
#[derive(Debug, Clone, Default)]
pub(crate) struct ObserverSet {
    observers: Arc<RwLock<Vec<Arc<dyn RenderObserver>>>>,
}

impl ObserverSet {
    pub(crate) fn add(&self, observer: Arc<dyn RenderObserver>) {
        debug!(observer = %observer.name(), "added render observer");
        self.observers.write().push(observer);
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Delivers `effect` to every enabled observer.
    ///
    /// The lock is released before any observer runs so observers may read
    /// queues from inside `on_effect`.
    pub(crate) fn emit(&self, effect: &RenderEffect) {
        let observers: Vec<_> = self.observers.read().iter().cloned().collect();
        for observer in observers.iter().filter(|o| o.is_enabled()) {
            observer.on_effect(effect);
        }
    }
}
