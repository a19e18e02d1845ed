//! In-page alert queues for single-page applications.
//!
//! `page-alerts` collects user-facing messages (success, info, warning,
//! danger) into per-context queues, mirrors global alerts into every context,
//! and clears non-preserved alerts when navigation completes.
//!
//! # Features
//!
//! - **Severity-aware push**: a new alert replaces earlier *closable* alerts
//!   of the same severity; non-closable alerts accumulate
//! - **Contexts**: named queues created lazily, plus the `"all"` aggregate
//!   that fans every push out to all of them
//! - **Preserve**: an alert can survive exactly one navigation sweep
//! - **Render effects**: queues notify observers instead of touching the page
//! - **Text resolution**: messages and titles go through a pluggable resolver
//!   unless marked as markup
//!
//! # Example
//!
//! ```rust
//! use page_alerts::{AlertMessage, AlertOptions, AlertRegistry, AlertSink};
//!
//! let registry = AlertRegistry::new();
//!
//! // Post to a page section
//! let orders = registry.get(Some("orders"));
//! let closable = AlertOptions::new().closable(true);
//! orders.success(AlertMessage::plain("Saved").options(closable.clone()));
//! orders.success(AlertMessage::plain("Saved again").options(closable));
//! assert_eq!(orders.size(), 1);
//!
//! // Post everywhere
//! registry
//!     .get(None)
//!     .warning(AlertMessage::with_title("Heads up", "Maintenance tonight"));
//! assert_eq!(orders.size(), 2);
//!
//! // A page change drops everything not preserved
//! registry.navigation_completed();
//! assert!(orders.is_empty());
//! ```
//!
//! # Legacy call shapes
//!
//! Loosely-typed arguments can be parsed into an [`AlertMessage`]; shapes
//! that match nothing are rejected instead of silently ignored:
//!
//! ```rust
//! use page_alerts::AlertMessage;
//! use serde_json::json;
//!
//! let message = AlertMessage::from_args(&[json!("Oops"), json!("Request failed")]).unwrap();
//! assert_eq!(message.title.as_deref(), Some("Oops"));
//! assert!(AlertMessage::from_args(&[json!(42)]).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod global;
pub mod navigation;
pub mod queue;
pub mod registry;
pub mod render;
pub mod translate;
pub mod types;
pub mod view;

// Re-export main types at crate root
pub use config::AlertsConfig;
pub use error::{AlertError, Result};
pub use global::{GlobalAggregate, GLOBAL_CONTEXT};
pub use navigation::{
    clear_on_navigation, spawn_clear_on_navigation, NavigationEvent, NavigationEvents,
};
pub use queue::{AlertQueue, AlertSink};
pub use registry::{AlertContext, AlertRegistry, AlertRegistryBuilder};
pub use render::{LogObserver, RenderEffect, RenderObserver};
pub use translate::{IdentityResolver, TextResolver, TranslationData};
pub use types::{AlertMessage, AlertOptions, AlertRecord, MessageRecord, Severity};
pub use view::{AlertContent, AlertListView, AlertView};
