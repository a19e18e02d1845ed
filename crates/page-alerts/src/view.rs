//! Render models for alert lists.
//!
//! An [`AlertListView`] is what a page section binds to: it resolves its
//! context through the registry, turns records into [`AlertView`]s and routes
//! dismissals back to the queue by position.

use serde::Serialize;

use crate::queue::AlertSink;
use crate::registry::{AlertContext, AlertRegistry};
use crate::types::{AlertRecord, Severity};

/// The body of a rendered alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AlertContent {
    /// Plain text; the renderer must escape it.
    Text(String),
    /// Caller-trusted markup; the renderer decides how to sanitize it.
    Markup(String),
}

impl AlertContent {
    /// Returns the raw content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Markup(s) => s,
        }
    }
}

/// One alert prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    /// Position in the list; pass it back to dismiss the alert.
    pub index: usize,
    /// The alert's severity.
    pub severity: Severity,
    /// CSS classes for the alert container.
    pub classes: Vec<String>,
    /// Optional title, always plain text.
    pub title: Option<String>,
    /// The alert body.
    pub content: AlertContent,
    /// Whether a dismiss control is shown.
    pub dismissible: bool,
}

impl AlertView {
    /// Builds the view of `record` at position `index`.
    #[must_use]
    pub fn new(index: usize, record: &AlertRecord) -> Self {
        let mut classes = vec!["alert".to_string(), format!("alert-{}", record.severity)];
        if record.closable {
            classes.push("closable".to_string());
        }
        if record.title.is_some() {
            classes.push("with-title".to_string());
        }

        let content = if record.html {
            AlertContent::Markup(record.message.clone())
        } else {
            AlertContent::Text(record.message.clone())
        };

        Self {
            index,
            severity: record.severity,
            classes,
            title: record.title.clone(),
            content,
            dismissible: record.closable,
        }
    }

    /// Returns the classes as a single attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// A list of alerts bound to one context.
#[derive(Debug, Clone)]
pub struct AlertListView {
    context: AlertContext,
}

impl AlertListView {
    /// Binds to `context`, falling back to the configured default context
    /// (`"global"` unless configured) when it is absent or empty.
    ///
    /// The default is a named context, not the `"all"` aggregate.
    #[must_use]
    pub fn bind(registry: &AlertRegistry, context: Option<&str>) -> Self {
        let name = context
            .filter(|c| !c.is_empty())
            .unwrap_or(registry.config().view_default_context.as_str());
        Self {
            context: registry.get(Some(name)),
        }
    }

    /// Returns the bound context.
    #[must_use]
    pub const fn context(&self) -> &AlertContext {
        &self.context
    }

    /// Renders the current records in order.
    #[must_use]
    pub fn views(&self) -> Vec<AlertView> {
        self.context
            .all()
            .iter()
            .enumerate()
            .map(|(index, record)| AlertView::new(index, record))
            .collect()
    }

    /// Dismisses the alert rendered at `index`.
    ///
    /// Returns `false` if nothing was removed.
    pub fn dismiss(&self, index: usize) -> bool {
        self.context.close(index)
    }
}
