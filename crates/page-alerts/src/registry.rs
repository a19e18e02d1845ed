//! The alert registry: one queue per context plus the global aggregate.
//!
//! This module provides the [`AlertRegistry`], the entry point for posting
//! and reading alerts. Named queues are created lazily on first access and
//! seeded once with the aggregate's current records; afterwards they only
//! receive what is pushed to them or fanned out by the aggregate.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::AlertsConfig;
use crate::global::{GlobalAggregate, QueueMap, GLOBAL_CONTEXT};
use crate::queue::{AlertQueue, AlertSink, QueueEnv};
use crate::render::RenderObserver;
use crate::translate::{IdentityResolver, TextResolver};
use crate::types::{AlertMessage, AlertRecord, Severity};

/// A context returned by [`AlertRegistry::get`].
#[derive(Debug, Clone)]
pub enum AlertContext {
    /// The global aggregate (`"all"`).
    Global(GlobalAggregate),
    /// A named queue.
    Named(AlertQueue),
}

impl AlertContext {
    /// Returns true for the global aggregate.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Returns the named queue, if this is one.
    #[must_use]
    pub const fn as_queue(&self) -> Option<&AlertQueue> {
        match self {
            Self::Named(queue) => Some(queue),
            Self::Global(_) => None,
        }
    }

    /// Returns the aggregate, if this is it.
    #[must_use]
    pub const fn as_global(&self) -> Option<&GlobalAggregate> {
        match self {
            Self::Global(global) => Some(global),
            Self::Named(_) => None,
        }
    }

    /// Returns the context name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Global(_) => GLOBAL_CONTEXT,
            Self::Named(queue) => queue.context(),
        }
    }

    /// Dismisses the record at `index` of a named queue.
    ///
    /// The aggregate has no dismissal, so this returns `false` for it.
    pub fn close(&self, index: usize) -> bool {
        match self {
            Self::Named(queue) => queue.close(index),
            Self::Global(_) => {
                debug!(index, "close is not supported on the global context");
                false
            }
        }
    }
}

impl AlertSink for AlertContext {
    fn all(&self) -> Vec<AlertRecord> {
        match self {
            Self::Global(global) => global.all(),
            Self::Named(queue) => queue.all(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Global(global) => global.size(),
            Self::Named(queue) => queue.size(),
        }
    }

    fn clear_all_except_preserved(&self) {
        match self {
            Self::Global(global) => global.clear_all_except_preserved(),
            Self::Named(queue) => queue.clear_all_except_preserved(),
        }
    }

    fn push(&self, severity: Severity, message: AlertMessage) {
        match self {
            Self::Global(global) => global.push(severity, message),
            Self::Named(queue) => queue.push(severity, message),
        }
    }
}

/// Owns every alert context of an application session.
///
/// Cloning yields another handle to the same contexts.
#[derive(Debug, Clone)]
pub struct AlertRegistry {
    queues: QueueMap,
    global: GlobalAggregate,
    env: Arc<QueueEnv>,
}

impl AlertRegistry {
    /// Creates a registry with default configuration and identity text resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new registry builder.
    #[must_use]
    pub fn builder() -> AlertRegistryBuilder {
        AlertRegistryBuilder::new()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AlertsConfig {
        &self.env.config
    }

    /// Returns the context for `name`.
    ///
    /// `None`, `""` and `"all"` return the global aggregate. Any other name
    /// returns its queue, creating it on first access with a copy of the
    /// aggregate's current records.
    pub fn get(&self, name: Option<&str>) -> AlertContext {
        match name {
            None | Some("" | GLOBAL_CONTEXT) => AlertContext::Global(self.global.clone()),
            Some(name) => AlertContext::Named(self.queue(name)),
        }
    }

    /// Returns the global aggregate.
    #[must_use]
    pub const fn global(&self) -> &GlobalAggregate {
        &self.global
    }

    fn queue(&self, name: &str) -> AlertQueue {
        if let Some(queue) = self.queues.read().get(name) {
            return queue.clone();
        }

        let mut queues = self.queues.write();
        queues
            .entry(name.to_string())
            .or_insert_with(|| {
                let seed = self.global.all();
                debug!(context = %name, seeded = seed.len(), "created alert context");
                AlertQueue::with_env(name, seed, Arc::clone(&self.env))
            })
            .clone()
    }

    /// Returns true if a named context has been created.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.queues.read().contains_key(name)
    }

    /// Returns the names of created contexts, in creation order.
    #[must_use]
    pub fn contexts(&self) -> Vec<String> {
        self.queues.read().keys().cloned().collect()
    }

    /// Registers an observer for render effects of every context.
    pub fn add_observer(&self, observer: Arc<dyn RenderObserver>) {
        self.env.observers.add(observer);
    }

    /// Handles a completed navigation by sweeping every context.
    pub fn navigation_completed(&self) {
        info!("navigation completed, clearing non-preserved alerts");
        self.get(Some(GLOBAL_CONTEXT)).clear_all_except_preserved();
    }
}

impl Default for AlertRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating [`AlertRegistry`] instances.
#[derive(Debug)]
pub struct AlertRegistryBuilder {
    config: AlertsConfig,
    resolver: Arc<dyn TextResolver>,
    observers: Vec<Arc<dyn RenderObserver>>,
}

impl AlertRegistryBuilder {
    fn new() -> Self {
        Self {
            config: AlertsConfig::default(),
            resolver: Arc::new(IdentityResolver),
            observers: Vec::new(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: AlertsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the text resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: impl TextResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Adds a render observer.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn RenderObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds the [`AlertRegistry`].
    #[must_use]
    pub fn build(self) -> AlertRegistry {
        let env = Arc::new(QueueEnv::new(self.config, self.resolver));
        for observer in self.observers {
            env.observers.add(observer);
        }

        let queues: QueueMap = Arc::new(RwLock::new(IndexMap::new()));
        let global = GlobalAggregate::new(Arc::clone(&queues), Arc::clone(&env));

        AlertRegistry {
            queues,
            global,
            env,
        }
    }
}
