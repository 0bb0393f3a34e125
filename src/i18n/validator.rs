//! Translation map validation.
//!
//! Checks a stored map against the field's element type and flags keys that
//! are not in normalized form. Whether a key names a real language is not
//! checked.

use crate::field::BaseField;
use crate::i18n::normalize_locale_code;
use crate::resolver::TranslationMap;

/// Validation report containing errors and warnings about a translation map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Values that don't fit the field's element type
    pub errors: Vec<String>,

    /// Suspicious but storable content (e.g., non-normalized keys)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for stored translation maps.
pub struct TranslationMapValidator;

impl TranslationMapValidator {
    /// Validate every entry of `map` against `base_field`.
    ///
    /// # Returns
    /// A `ValidationReport` with one error per value of the wrong type and one
    /// warning per key that normalization would change.
    pub fn validate(map: &TranslationMap, base_field: &BaseField) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, value) in map {
            if key.is_empty() {
                report.warnings.push("Empty locale key".to_string());
            } else {
                let normalized = normalize_locale_code(key);
                if &normalized != key {
                    report.warnings.push(format!(
                        "Locale key '{}' is not normalized (expected '{}')",
                        key, normalized
                    ));
                }
            }

            if let Err(problem) = base_field.check(value) {
                report
                    .errors
                    .push(format!("Translation for '{}': {}", key, problem));
            }
        }

        report
    }
}
