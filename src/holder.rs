//! Translation holder: the runtime value of one translated field on one record.
//!
//! A holder is either `Unset` (no map yet, stored as JSON `null`) or
//! `Populated` with a map, possibly empty. A scoped write on an unset holder
//! installs an empty map first, once the active locale has been checked.

use crate::error::{Result, TranslationError};
use crate::i18n::{normalize_locale_code, TranslationContext};
use crate::resolver::{resolve_read_outcome, resolve_write, ReadOutcome, TranslationMap};
use serde_json::Value;
use tracing::{debug, warn};

/// Lifecycle state of a holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderState {
    Unset,
    Populated,
}

/// Owns the translation map of one field instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationHolder {
    map: Option<TranslationMap>,
}

impl TranslationHolder {
    /// Create an unset holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder from an already decoded column value.
    pub fn from_raw(map: Option<TranslationMap>) -> Self {
        Self { map }
    }

    /// Parse a stored JSON document into a holder.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let mut holder = Self::new();
        holder.hydrate(value)?;
        Ok(holder)
    }

    pub fn state(&self) -> HolderState {
        match self.map {
            Some(_) => HolderState::Populated,
            None => HolderState::Unset,
        }
    }

    pub fn is_set(&self) -> bool {
        self.map.is_some()
    }

    /// Install a whole map, discarding the previous one. `None` unsets the holder.
    pub fn bulk_replace(&mut self, map: Option<TranslationMap>) {
        self.map = map;
    }

    /// Get the map exactly as it would be persisted.
    pub fn get_raw_map(&self) -> Option<&TranslationMap> {
        self.map.as_ref()
    }

    pub fn into_raw(self) -> Option<TranslationMap> {
        self.map
    }

    /// Resolve the value for the context's locales.
    pub fn read(&self, ctx: &TranslationContext) -> Result<Option<&Value>> {
        self.read_outcome(ctx).map(ReadOutcome::value)
    }

    /// Resolve for the context's locales, reporting which slot answered.
    pub fn read_outcome(&self, ctx: &TranslationContext) -> Result<ReadOutcome<'_>> {
        resolve_read_outcome(self.map.as_ref(), ctx.active.as_ref(), ctx.default.as_ref())
    }

    /// Write `value` for the active locale only.
    ///
    /// Returns the value the active locale held before.
    pub fn scoped_write(&mut self, ctx: &TranslationContext, value: Value) -> Result<Option<Value>> {
        let active = ctx.require_active()?;

        if self.map.is_none() {
            debug!(locale = %active, "Initializing empty translation map for first write");
        }
        let map = self.map.get_or_insert_with(TranslationMap::new);

        resolve_write(map, Some(active), value)
    }

    /// Load a decoded storage value: an object populates, `null` unsets.
    pub fn hydrate(&mut self, value: Value) -> Result<()> {
        match value {
            Value::Null => self.bulk_replace(None),
            Value::Object(object) => {
                let map: TranslationMap = object.into_iter().collect();
                for key in non_normalized_keys(&map) {
                    // Stored verbatim, but no active locale can ever match it
                    warn!(key, "Stored translation key is not a normalized locale code");
                }
                self.bulk_replace(Some(map));
            }
            other => {
                warn!(value = %other, "Rejecting non-object translation column value");
                return Err(TranslationError::InvalidRawValue(json_kind(&other).to_string()));
            }
        }
        Ok(())
    }

    /// Storage representation: the map as a JSON object, or `null` when unset.
    pub fn to_json(&self) -> Value {
        match &self.map {
            Some(map) => Value::Object(map.clone().into_iter().collect()),
            None => Value::Null,
        }
    }
}

/// Keys that normalization would change, and so can never be looked up.
pub fn non_normalized_keys(map: &TranslationMap) -> Vec<&str> {
    map.keys()
        .filter(|key| normalize_locale_code(key) != **key)
        .map(String::as_str)
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
