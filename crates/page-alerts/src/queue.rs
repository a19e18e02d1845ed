//! Alert queues for a single context.
//!
//! This module provides the [`AlertSink`] trait shared by every context and
//! the [`AlertQueue`], an ordered list of records with severity-aware push
//! semantics: pushing a record drops every earlier *closable* record of the
//! same severity, so at most one transient notice of each kind is shown while
//! non-closable records accumulate.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::AlertsConfig;
use crate::render::{ObserverSet, RenderEffect};
use crate::translate::{IdentityResolver, TextResolver};
use crate::types::{AlertMessage, AlertRecord, Severity};

/// Operations available on every alert context.
pub trait AlertSink {
    /// Returns a snapshot of the records, oldest first.
    fn all(&self) -> Vec<AlertRecord>;

    /// Returns the number of records.
    fn size(&self) -> usize;

    /// Returns true if there are no records.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Keeps only preserved records and clears their `preserve` flag.
    fn clear_all_except_preserved(&self);

    /// Builds a record of the given severity and pushes it.
    fn push(&self, severity: Severity, message: AlertMessage);

    /// Pushes a success alert.
    fn success(&self, message: impl Into<AlertMessage>)
    where
        Self: Sized,
    {
        self.push(Severity::Success, message.into());
    }

    /// Pushes an info alert.
    fn info(&self, message: impl Into<AlertMessage>)
    where
        Self: Sized,
    {
        self.push(Severity::Info, message.into());
    }

    /// Pushes a warning alert.
    fn warning(&self, message: impl Into<AlertMessage>)
    where
        Self: Sized,
    {
        self.push(Severity::Warning, message.into());
    }

    /// Pushes a danger alert.
    fn danger(&self, message: impl Into<AlertMessage>)
    where
        Self: Sized,
    {
        self.push(Severity::Danger, message.into());
    }

    /// Alias of [`AlertSink::danger`].
    fn error(&self, message: impl Into<AlertMessage>)
    where
        Self: Sized,
    {
        self.push(Severity::Danger, message.into());
    }
}

/// Collaborators shared by every queue of a registry.
pub(crate) struct QueueEnv {
    pub(crate) config: AlertsConfig,
    pub(crate) resolver: Arc<dyn TextResolver>,
    pub(crate) observers: ObserverSet,
}

impl QueueEnv {
    pub(crate) fn new(config: AlertsConfig, resolver: Arc<dyn TextResolver>) -> Self {
        Self {
            config,
            resolver,
            observers: ObserverSet::default(),
        }
    }

    fn changed(&self, context: &str) {
        self.observers.emit(&RenderEffect::Changed {
            context: context.to_string(),
        });
    }

    fn pushed(&self, context: &str) {
        self.changed(context);
        if self.config.scroll_to_top {
            self.observers.emit(&RenderEffect::ScrollToTop {
                duration: self.config.scroll_duration(),
            });
        }
    }
}

impl Default for QueueEnv {
    fn default() -> Self {
        Self::new(AlertsConfig::default(), Arc::new(IdentityResolver))
    }
}

impl fmt::Debug for QueueEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueEnv")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// An ordered queue of alerts for one context.
///
/// Cloning yields another handle to the same records; use
/// [`AlertQueue::ptr_eq`] to check whether two handles share them.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    context: Arc<str>,
    records: Arc<RwLock<Vec<AlertRecord>>>,
    env: Arc<QueueEnv>,
}

impl AlertQueue {
    /// Creates an empty standalone queue that resolves text to itself and
    /// emits no effects.
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self::with_env(context, Vec::new(), Arc::new(QueueEnv::default()))
    }

    pub(crate) fn with_env(
        context: impl Into<String>,
        records: Vec<AlertRecord>,
        env: Arc<QueueEnv>,
    ) -> Self {
        let context: String = context.into();
        Self {
            context: context.into(),
            records: Arc::new(RwLock::new(records)),
            env,
        }
    }

    /// Returns the context name this queue was created for.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns true if both handles refer to the same queue.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Returns the record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<AlertRecord> {
        self.records.read().get(index).cloned()
    }

    /// Removes every record.
    pub fn clear(&self) {
        let removed = {
            let mut records = self.records.write();
            let removed = records.len();
            records.clear();
            removed
        };

        debug!(context = %self.context, removed, "cleared alerts");
        if removed > 0 {
            self.env.changed(&self.context);
        }
    }

    /// Removes the record at `index`, shifting later records left.
    ///
    /// Returns `false` and leaves the queue unchanged if `index` is out of range.
    pub fn close(&self, index: usize) -> bool {
        let closed = {
            let mut records = self.records.write();
            if index < records.len() {
                records.remove(index);
                true
            } else {
                false
            }
        };

        if closed {
            debug!(context = %self.context, index, "closed alert");
            self.env.changed(&self.context);
        } else {
            debug!(context = %self.context, index, "close index out of range, ignoring");
        }
        closed
    }
}

impl AlertQueue {
    /// Builds and appends a record without emitting render effects.
    pub(crate) fn insert(&self, severity: Severity, message: AlertMessage) {
        let record = AlertRecord::resolve(severity, message, self.env.resolver.as_ref());

        let replaced = {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|r| !(r.severity == severity && r.closable));
            let replaced = before - records.len();
            records.push(record);
            replaced
        };

        debug!(context = %self.context, severity = %severity, replaced, "pushed alert");
    }

    /// Sweeps without emitting render effects. Returns the number of records removed.
    pub(crate) fn sweep(&self) -> usize {
        let (removed, kept) = {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|r| r.preserve);
            for record in records.iter_mut() {
                record.preserve = false;
            }
            (before - records.len(), records.len())
        };

        info!(context = %self.context, removed, kept, "cleared alerts except preserved");
        removed
    }

    pub(crate) fn notify_pushed(&self) {
        self.env.pushed(&self.context);
    }

    pub(crate) fn notify_changed(&self) {
        self.env.changed(&self.context);
    }
}

impl AlertSink for AlertQueue {
    fn all(&self) -> Vec<AlertRecord> {
        self.records.read().clone()
    }

    fn size(&self) -> usize {
        self.records.read().len()
    }

    fn clear_all_except_preserved(&self) {
        if self.sweep() > 0 {
            self.notify_changed();
        }
    }

    fn push(&self, severity: Severity, message: AlertMessage) {
        self.insert(severity, message);
        self.notify_pushed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderObserver;
    use crate::types::AlertOptions;
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use std::time::Duration;

    fn closable(message: &str) -> AlertMessage {
        AlertMessage::plain(message).options(AlertOptions::new().closable(true))
    }

    fn preserved(message: &str) -> AlertMessage {
        AlertMessage::plain(message).options(AlertOptions::new().preserve(true))
    }

    fn messages(queue: &AlertQueue) -> Vec<String> {
        queue.all().into_iter().map(|r| r.message).collect()
    }

    mod push_tests {
        use super::*;

        #[test]
        fn closable_same_severity_is_replaced() {
            let queue = AlertQueue::new("orders");
            queue.success(closable("Saved"));
            queue.success(closable("Saved again"));

            assert_eq!(queue.size(), 1);
            assert_eq!(messages(&queue), vec!["Saved again"]);
        }

        #[test]
        fn non_closable_same_severity_accumulates() {
            let queue = AlertQueue::new("orders");
            queue.danger("Oops");
            queue.danger("Oops2");

            assert_eq!(queue.size(), 2);
            assert_eq!(messages(&queue), vec!["Oops", "Oops2"]);
        }

        #[test]
        fn closable_push_keeps_non_closable_same_severity() {
            let queue = AlertQueue::new("orders");
            queue.warning("banner");
            queue.warning(closable("first"));
            queue.warning(closable("second"));

            assert_eq!(messages(&queue), vec!["banner", "second"]);
        }

        #[test]
        fn non_closable_push_removes_closable_same_severity() {
            let queue = AlertQueue::new("orders");
            queue.info(closable("transient"));
            queue.info("sticky");

            assert_eq!(messages(&queue), vec!["sticky"]);
        }

        #[test]
        fn other_severities_untouched() {
            let queue = AlertQueue::new("orders");
            queue.success(closable("ok"));
            queue.info(closable("fyi"));
            queue.danger(closable("bad"));

            assert_eq!(messages(&queue), vec!["ok", "fyi", "bad"]);
        }

        #[test]
        fn error_is_danger() {
            let queue = AlertQueue::new("orders");
            queue.danger(closable("first"));
            queue.error(closable("second"));

            let records = queue.all();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].severity, Severity::Danger);
            assert_eq!(records[0].message, "second");
        }

        #[test]
        fn push_preserves_insertion_order() {
            let queue = AlertQueue::new("orders");
            queue.success(closable("a"));
            queue.info("b");
            queue.success(closable("c"));

            assert_eq!(messages(&queue), vec!["b", "c"]);
        }
    }

    mod close_tests {
        use super::*;

        #[test]
        fn close_removes_and_shifts() {
            let queue = AlertQueue::new("ctx");
            queue.info("a");
            queue.info("b");
            queue.info("c");

            assert!(queue.close(1));
            assert_eq!(messages(&queue), vec!["a", "c"]);
        }

        #[test]
        fn close_out_of_range_is_noop() {
            let queue = AlertQueue::new("ctx");
            queue.info("a");

            assert!(!queue.close(1));
            assert!(!queue.close(usize::MAX));
            assert_eq!(messages(&queue), vec!["a"]);
        }

        #[test]
        fn clear_removes_everything() {
            let queue = AlertQueue::new("ctx");
            queue.info("a");
            queue.danger(preserved("b"));
            queue.clear();

            assert!(queue.is_empty());
        }

        #[test]
        fn get_by_index() {
            let queue = AlertQueue::new("ctx");
            queue.info("a");
            assert_eq!(queue.get(0).map(|r| r.message), Some("a".to_string()));
            assert!(queue.get(1).is_none());
        }
    }

    mod preserve_tests {
        use super::*;

        #[test]
        fn sweep_keeps_preserved_and_strips_flag() {
            let queue = AlertQueue::new("ctx");
            queue.info("transient");
            queue.warning(preserved("kept"));
            queue.clear_all_except_preserved();

            let records = queue.all();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].message, "kept");
            assert!(!records[0].preserve);
        }

        #[test]
        fn second_sweep_removes_former_preserved() {
            let queue = AlertQueue::new("ctx");
            queue.warning(preserved("kept"));
            queue.clear_all_except_preserved();
            assert_eq!(queue.size(), 1);

            queue.clear_all_except_preserved();
            assert!(queue.is_empty());
        }
    }

    mod handle_tests {
        use super::*;

        #[test]
        fn clones_share_records() {
            let queue = AlertQueue::new("ctx");
            let other = queue.clone();
            other.info("shared");

            assert!(queue.ptr_eq(&other));
            assert_eq!(queue.size(), 1);
            assert!(!queue.ptr_eq(&AlertQueue::new("ctx")));
        }

        #[test]
        fn all_is_a_snapshot() {
            let queue = AlertQueue::new("ctx");
            queue.info("a");
            let mut snapshot = queue.all();
            snapshot.clear();
            assert_eq!(queue.size(), 1);
        }

        #[test]
        fn context_name() {
            assert_eq!(AlertQueue::new("sidebar").context(), "sidebar");
        }
    }

    mod effect_tests {
        use super::*;

        #[derive(Debug, Default)]
        struct Recorder {
            effects: Mutex<Vec<RenderEffect>>,
        }

        impl RenderObserver for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }

            fn on_effect(&self, effect: &RenderEffect) {
                self.effects.lock().push(effect.clone());
            }
        }

        fn queue_with(config: AlertsConfig) -> (AlertQueue, Arc<Recorder>) {
            let env = QueueEnv::new(config, Arc::new(IdentityResolver));
            let recorder = Arc::new(Recorder::default());
            env.observers.add(recorder.clone());
            (AlertQueue::with_env("ctx", Vec::new(), Arc::new(env)), recorder)
        }

        #[test]
        fn push_emits_changed_then_scroll() {
            let (queue, recorder) = queue_with(AlertsConfig::default());
            queue.info("a");

            assert_eq!(
                recorder.effects.lock().as_slice(),
                &[
                    RenderEffect::Changed {
                        context: "ctx".to_string()
                    },
                    RenderEffect::ScrollToTop {
                        duration: Duration::from_millis(200)
                    },
                ]
            );
        }

        #[test]
        fn scroll_disabled_by_config() {
            let config = AlertsConfig {
                scroll_to_top: false,
                ..Default::default()
            };
            let (queue, recorder) = queue_with(config);
            queue.info("a");

            assert_eq!(recorder.effects.lock().len(), 1);
        }

        #[test]
        fn noop_close_emits_nothing() {
            let (queue, recorder) = queue_with(AlertsConfig::default());
            assert!(!queue.close(0));
            queue.clear();
            assert!(recorder.effects.lock().is_empty());
        }
    }

    mod property_tests {
        use super::*;

        fn severity() -> impl Strategy<Value = Severity> {
            prop::sample::select(Severity::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn at_most_one_closable_per_severity(
                pushes in prop::collection::vec((severity(), any::<bool>(), any::<bool>()), 0..40)
            ) {
                let queue = AlertQueue::new("prop");
                for (i, (severity, closable, preserve)) in pushes.into_iter().enumerate() {
                    let options = AlertOptions::new().closable(closable).preserve(preserve);
                    queue.push(severity, AlertMessage::plain(i.to_string()).options(options));

                    let records = queue.all();
                    for s in Severity::ALL {
                        let count = records.iter().filter(|r| r.severity == s && r.closable).count();
                        prop_assert!(count <= 1);
                    }
                    prop_assert_eq!(&records.last().map(|r| r.message.clone()), &Some(i.to_string()));
                }
            }

            #[test]
            fn sweep_keeps_exactly_preserved(
                pushes in prop::collection::vec((severity(), any::<bool>()), 0..30)
            ) {
                let queue = AlertQueue::new("prop");
                for (i, (severity, preserve)) in pushes.into_iter().enumerate() {
                    let options = AlertOptions::new().preserve(preserve);
                    queue.push(severity, AlertMessage::plain(i.to_string()).options(options));
                }

                let expected: Vec<String> = queue
                    .all()
                    .into_iter()
                    .filter(|r| r.preserve)
                    .map(|r| r.message)
                    .collect();

                queue.clear_all_except_preserved();
                let after = queue.all();
                prop_assert!(after.iter().all(|r| !r.preserve));
                prop_assert_eq!(after.iter().map(|r| r.message.clone()).collect::<Vec<_>>(), expected);
            }

            #[test]
            fn close_removes_exactly_one(len in 0usize..10, index in 0usize..15) {
                let queue = AlertQueue::new("prop");
                for i in 0..len {
                    queue.info(i.to_string());
                }
                let mut expected = messages(&queue);

                let closed = queue.close(index);
                if index < len {
                    prop_assert!(closed);
                    expected.remove(index);
                } else {
                    prop_assert!(!closed);
                }
                prop_assert_eq!(messages(&queue), expected);
            }
        }
    }
}
