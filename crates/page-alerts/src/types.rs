//! Core types for the alert queues.
//!
//! This module provides the fundamental types used throughout the page-alerts crate:
//! - [`Severity`]: The category of an alert
//! - [`AlertOptions`]: Flags and extension data supplied with an alert
//! - [`AlertMessage`]: The typed call shapes accepted by the severity methods
//! - [`AlertRecord`]: One alert as stored in a queue

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AlertError, Result};
use crate::translate::{TextResolver, TranslationData};

/// The category of an alert.
///
/// `error` is accepted as an alias of [`Severity::Danger`] when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something completed successfully.
    Success,
    /// Neutral information.
    Info,
    /// Something the user should look at.
    Warning,
    /// Something failed.
    #[serde(alias = "error")]
    Danger,
}

impl Severity {
    /// Every severity, in declaration order.
    pub const ALL: [Self; 4] = [Self::Success, Self::Info, Self::Warning, Self::Danger];

    /// Returns the severity as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Parses a severity name, accepting `error` as an alias of `danger`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "danger" | "error" => Some(Self::Danger),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options recognized by the severity methods.
///
/// Every flag defaults to off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertOptions {
    /// Treat message and title as caller-trusted markup and skip text resolution.
    pub html: bool,
    /// Interpolation values passed to the text resolver.
    pub translation_data: TranslationData,
    /// Eligible for same-severity replacement and manual dismissal.
    pub closable: bool,
    /// Survives the next "clear except preserved" sweep.
    pub preserve: bool,
    /// Extra fields merged shallowly into the record.
    pub alert_scope: Map<String, Value>,
}

impl AlertOptions {
    /// Creates options with every flag off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a loosely-typed value.
    ///
    /// `null` yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::InvalidOptions` if the value is not an object or
    /// one of its fields has the wrong type.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => {
                serde_json::from_value(value.clone()).map_err(|e| AlertError::InvalidOptions {
                    reason: e.to_string(),
                })
            }
            other => Err(AlertError::InvalidOptions {
                reason: format!("expected an object, got {other}"),
            }),
        }
    }

    /// Sets whether message and title are markup.
    #[must_use]
    pub const fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    /// Sets whether the alert is closable.
    #[must_use]
    pub const fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Sets whether the alert survives the next sweep.
    #[must_use]
    pub const fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Adds an interpolation value for text resolution.
    #[must_use]
    pub fn translation(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.translation_data.insert(key.into(), value.into());
        self
    }

    /// Adds an extra field to merge into the record.
    #[must_use]
    pub fn scope(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.alert_scope.insert(key.into(), value.into());
        self
    }
}

/// A single structured alert argument: message, optional title and options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// The message text or translation key.
    pub message: String,
    /// The optional title text or translation key.
    #[serde(default)]
    pub title: Option<String>,
    /// Options applied to both message and title.
    #[serde(default)]
    pub options: AlertOptions,
}

/// What a caller asks a queue to display.
///
/// One constructor exists per call shape: [`AlertMessage::plain`],
/// [`AlertMessage::with_title`] and [`AlertMessage::from_record`].
/// [`AlertMessage::from_args`] parses the loosely-typed legacy shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    /// The optional title text or translation key.
    pub title: Option<String>,
    /// The message text or translation key.
    pub message: String,
    /// Options for this alert.
    pub options: AlertOptions,
}

impl AlertMessage {
    /// A message without a title.
    #[must_use]
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            options: AlertOptions::default(),
        }
    }

    /// A message with an explicit title.
    #[must_use]
    pub fn with_title(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: message.into(),
            options: AlertOptions::default(),
        }
    }

    /// A message built from a single structured argument.
    #[must_use]
    pub fn from_record(record: MessageRecord) -> Self {
        Self {
            title: record.title,
            message: record.message,
            options: record.options,
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn options(mut self, options: AlertOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses the legacy dynamic call shapes.
    ///
    /// Accepted shapes:
    /// - `[{message, title?, options?}]`
    /// - `[message]` or `[message, options | null]`
    /// - `[title, message]` or `[title, message, options | null]`
    ///
    /// # Errors
    ///
    /// Returns `AlertError::UnrecognizedArguments` if the arguments match none
    /// of the shapes, and `AlertError::InvalidOptions` if the options are malformed.
    pub fn from_args(args: &[Value]) -> Result<Self> {
        let Some((first, rest)) = args.split_first() else {
            return Err(unrecognized("no arguments"));
        };

        if let Value::Object(fields) = first {
            return Self::from_object(fields);
        }

        match rest.first() {
            None | Some(Value::Null | Value::Object(_)) => {
                let Value::String(message) = first else {
                    return Err(unrecognized(format!("message must be a string, got {first}")));
                };
                let options = match rest.first() {
                    Some(value) => AlertOptions::from_value(value)?,
                    None => AlertOptions::default(),
                };
                Ok(Self::plain(message.as_str()).options(options))
            }
            Some(Value::String(message)) => {
                let Value::String(title) = first else {
                    return Err(unrecognized(format!("title must be a string, got {first}")));
                };
                let options = match rest.get(1) {
                    Some(value) => AlertOptions::from_value(value)?,
                    None => AlertOptions::default(),
                };
                Ok(Self::with_title(title.as_str(), message.as_str()).options(options))
            }
            Some(other) => Err(unrecognized(format!("unsupported message argument {other}"))),
        }
    }

    fn from_object(fields: &Map<String, Value>) -> Result<Self> {
        let message = match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => {
                return Err(unrecognized(format!("message must be a string, got {other}")));
            }
            None => return Err(unrecognized("structured argument has no message")),
        };
        let title = match fields.get("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(title)) => Some(title.clone()),
            Some(other) => {
                return Err(unrecognized(format!("title must be a string, got {other}")));
            }
        };
        let options = match fields.get("options") {
            Some(value) => AlertOptions::from_value(value)?,
            None => AlertOptions::default(),
        };

        Ok(Self::from_record(MessageRecord {
            message,
            title,
            options,
        }))
    }
}

impl From<&str> for AlertMessage {
    fn from(message: &str) -> Self {
        Self::plain(message)
    }
}

impl From<String> for AlertMessage {
    fn from(message: String) -> Self {
        Self::plain(message)
    }
}

impl From<MessageRecord> for AlertMessage {
    fn from(record: MessageRecord) -> Self {
        Self::from_record(record)
    }
}

// Keys serialized by `AlertRecord` itself.
const RECORD_FIELDS: [&str; 6] = ["type", "message", "title", "html", "closable", "preserve"];

fn unrecognized(reason: impl Into<String>) -> AlertError {
    AlertError::UnrecognizedArguments {
        reason: reason.into(),
    }
}

/// One alert as stored in a queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// The category of the alert.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Display text, or raw markup when `html` is set.
    pub message: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether `message` and `title` are caller-trusted markup.
    #[serde(default)]
    pub html: bool,
    /// Eligible for same-severity replacement and manual dismissal.
    #[serde(default)]
    pub closable: bool,
    /// Survives the next sweep; cleared once it has.
    #[serde(default)]
    pub preserve: bool,
    /// Extra caller-supplied fields.
    #[serde(flatten)]
    pub scope: Map<String, Value>,
}

impl AlertRecord {
    /// Creates a record with the given text and every flag off.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            title: None,
            html: false,
            closable: false,
            preserve: false,
            scope: Map::new(),
        }
    }

    /// Builds a record from a message, resolving text unless it is markup.
    #[must_use]
    pub fn resolve(severity: Severity, message: AlertMessage, resolver: &dyn TextResolver) -> Self {
        let AlertMessage {
            title,
            message,
            options,
        } = message;
        let text = |raw: String| {
            if options.html {
                raw
            } else {
                resolver.resolve(&raw, &options.translation_data)
            }
        };

        let mut record = Self {
            severity,
            message: text(message),
            title: title.filter(|t| !t.is_empty()).map(text),
            html: options.html,
            closable: options.closable,
            preserve: options.preserve,
            scope: Map::new(),
        };
        record.merge_scope(options.alert_scope);
        record
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets whether the record is closable.
    #[must_use]
    pub const fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Sets whether the record survives the next sweep.
    #[must_use]
    pub const fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Merges extra fields shallowly into the record.
    ///
    /// Keys naming a record field override it when the value has the
    /// matching type and are dropped otherwise, so they never shadow a field
    /// on serialization. An empty title clears the title. `type` and `html`
    /// never override the built record.
    pub fn merge_scope(&mut self, scope: Map<String, Value>) {
        for (key, value) in scope {
            match (key.as_str(), value) {
                ("message", Value::String(message)) => self.message = message,
                ("title", Value::String(title)) => {
                    self.title = Some(title).filter(|t| !t.is_empty());
                }
                ("title", Value::Null) => self.title = None,
                ("closable", Value::Bool(closable)) => self.closable = closable,
                ("preserve", Value::Bool(preserve)) => self.preserve = preserve,
                (field, value) if RECORD_FIELDS.contains(&field) => {
                    debug!(field, %value, "ignoring alert scope value for record field");
                }
                (_, value) => {
                    self.scope.insert(key, value);
                }
            }
        }
    }

    /// Returns an extra field by name.
    #[must_use]
    pub fn scope_value(&self, key: &str) -> Option<&Value> {
        self.scope.get(key)
    }
}
