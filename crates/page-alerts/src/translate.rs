//! Text resolution for alert messages and titles.
//!
//! Queues hand every non-markup message and title to a [`TextResolver`]
//! together with the caller's interpolation data. Translation catalogs live
//! in the application; it plugs them in by implementing the trait.

use std::fmt;

use serde_json::{Map, Value};

/// Interpolation values passed alongside a translation key.
pub type TranslationData = Map<String, Value>;

/// Resolves a translation key into display text.
pub trait TextResolver: Send + Sync + fmt::Debug {
    /// Returns the display text for `key`, interpolating `data`.
    fn resolve(&self, key: &str, data: &TranslationData) -> String;
}

/// A resolver that returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl TextResolver for IdentityResolver {
    fn resolve(&self, key: &str, _data: &TranslationData) -> String {
        key.to_string()
    }
}
