//! Translation resolution.
//!
//! Reads fall back from the active locale to the default locale. Writes never
//! fall back: they always target the active locale's slot.

use crate::error::{Result, TranslationError};
use crate::i18n::LocaleCode;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Mapping of locale code to translated value, as stored in the JSON column.
pub type TranslationMap = BTreeMap<String, Value>;

/// Which slot, if any, answered a read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadOutcome<'a> {
    /// No map was set; locales were not consulted
    Unset,
    /// The active locale's slot
    Active(&'a Value),
    /// The default locale's slot
    Fallback(&'a Value),
    /// Neither slot holds a value
    Missing,
}

impl<'a> ReadOutcome<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            ReadOutcome::Active(value) | ReadOutcome::Fallback(value) => Some(value),
            ReadOutcome::Unset | ReadOutcome::Missing => None,
        }
    }
}

/// Resolve a read and report which slot answered it.
///
/// An unset map answers `Unset` without looking at the locales. Otherwise the
/// active locale is required; its slot wins, then the default locale's slot.
/// A missing translation is `Missing`, never an error.
pub fn resolve_read_outcome<'a>(
    map: Option<&'a TranslationMap>,
    active: Option<&LocaleCode>,
    default: Option<&LocaleCode>,
) -> Result<ReadOutcome<'a>> {
    let Some(map) = map else {
        return Ok(ReadOutcome::Unset);
    };

    let active = active.ok_or(TranslationError::Configuration)?;

    if let Some(value) = map.get(active.as_str()) {
        return Ok(ReadOutcome::Active(value));
    }

    match default.and_then(|code| map.get(code.as_str()).map(|value| (code, value))) {
        Some((code, value)) => {
            debug!(active = %active, fallback = %code, "Using default locale translation");
            Ok(ReadOutcome::Fallback(value))
        }
        None => {
            debug!(active = %active, "No translation for active or default locale");
            Ok(ReadOutcome::Missing)
        }
    }
}

/// Pick the value to surface for a read.
pub fn resolve_read<'a>(
    map: Option<&'a TranslationMap>,
    active: Option<&LocaleCode>,
    default: Option<&LocaleCode>,
) -> Result<Option<&'a Value>> {
    resolve_read_outcome(map, active, default).map(ReadOutcome::value)
}

/// Store `value` under the active locale, leaving every other slot untouched.
///
/// Returns the value previously stored for that locale, if any.
pub fn resolve_write(
    map: &mut TranslationMap,
    active: Option<&LocaleCode>,
    value: Value,
) -> Result<Option<Value>> {
    let active = active.ok_or(TranslationError::Configuration)?;

    trace!(locale = %active, "Writing translation");
    Ok(map.insert(active.as_str().to_string(), value))
}
