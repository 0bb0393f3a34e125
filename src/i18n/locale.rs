//! Locale codes: canonical, normalized language identifiers.
//!
//! Every lookup into a translation map goes through a `LocaleCode`, so keys
//! written by this crate are always lowercase with `-` as the only separator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a language code so lookups ignore incidental formatting.
///
/// Lowercases every character and replaces `_` with `-`. Nothing else is
/// checked: `"jpn"`, `""` and `"x_Y_z"` are all accepted.
///
/// # Example
/// ```
/// use json_model_translations::normalize_locale_code;
///
/// assert_eq!(normalize_locale_code("en_GB"), "en-gb");
/// ```
pub fn normalize_locale_code(code: &str) -> String {
    code.to_lowercase().replace('_', "-")
}

/// A normalized locale code (e.g., "en-gb", "fr-fr").
///
/// Can only be built through normalization, so two codes that differ only in
/// case or separator compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Create a locale code from any raw spelling.
    pub fn new(code: impl AsRef<str>) -> Self {
        LocaleCode(normalize_locale_code(code.as_ref()))
    }

    /// Like `new`, but a blank code (empty or whitespace only) means no locale.
    pub fn non_empty(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref();
        if code.trim().is_empty() {
            None
        } else {
            Some(LocaleCode::new(code))
        }
    }

    /// Get the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the code is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for LocaleCode {
    fn from(code: String) -> Self {
        LocaleCode::new(code)
    }
}

impl From<&str> for LocaleCode {
    fn from(code: &str) -> Self {
        LocaleCode::new(code)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
