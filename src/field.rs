//! Translated JSON field definition.
//!
//! `TranslationJsonField` describes one translated column of a model: the
//! element type of each translation (`base_field`) and an optional list of
//! locales (`langs`). Reads and writes on a record go through the explicit
//! accessor pair `get_translation` / `set_translation`; the raw accessors
//! skip locale resolution.

use crate::error::Result;
use crate::holder::{json_kind, TranslationHolder};
use crate::i18n::{LocaleCode, TranslationContext, TranslationMapValidator, ValidationReport};
use crate::resolver::{ReadOutcome, TranslationMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Import path recorded in field deconstructions.
pub const FIELD_PATH: &str = "json_model_translations::TranslationJsonField";

/// Suffix of the attribute that exposes the untranslated map.
pub const RAW_SUFFIX: &str = "__raw";

/// Element type of each translation stored in the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BaseField {
    /// String with a maximum length in characters
    Char { max_length: usize },
    /// Unbounded string
    Text,
    Integer,
    Float,
    Boolean,
    /// Any JSON value
    Json,
}

impl BaseField {
    /// Check that `value` fits this element type.
    pub fn check(&self, value: &Value) -> std::result::Result<(), String> {
        let fits = match (self, value) {
            (BaseField::Json, _) => true,
            (BaseField::Char { max_length }, Value::String(s)) => {
                let len = s.chars().count();
                if len > *max_length {
                    return Err(format!(
                        "ensure this value has at most {} characters (it has {})",
                        max_length, len
                    ));
                }
                true
            }
            (BaseField::Text, Value::String(_)) => true,
            (BaseField::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (BaseField::Float, Value::Number(_)) => true,
            (BaseField::Boolean, Value::Bool(_)) => true,
            _ => false,
        };

        if fits {
            Ok(())
        } else {
            Err(format!("expected {}, got {}", self.expected(), json_kind(value)))
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            BaseField::Char { .. } | BaseField::Text => "a string",
            BaseField::Integer => "an integer",
            BaseField::Float => "a number",
            BaseField::Boolean => "a boolean",
            BaseField::Json => "any JSON value",
        }
    }
}

/// A value assigned to a translated attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single translation for the active locale
    Translation(Value),
    /// A complete map (or `None` to unset), installed as-is
    Translations(Option<TranslationMap>),
}

impl From<Value> for FieldValue {
    /// Objects are full maps; anything else, `null` included, is one translation.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => FieldValue::Translations(Some(object.into_iter().collect())),
            other => FieldValue::Translation(other),
        }
    }
}

impl From<TranslationMap> for FieldValue {
    fn from(map: TranslationMap) -> Self {
        FieldValue::Translations(Some(map))
    }
}

/// Constructor arguments needed to rebuild a field in a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKwargs {
    pub base_field: BaseField,
    pub langs: Vec<LocaleCode>,
}

/// Serializable description of a field for schema migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeconstruction {
    pub name: String,
    pub path: String,
    pub kwargs: FieldKwargs,
}

/// A model field holding per-locale translations in one JSON column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJsonField {
    name: String,
    base_field: BaseField,
    // Carried through migrations only; writes are not checked against it
    langs: Vec<LocaleCode>,
}

impl TranslationJsonField {
    pub fn new(name: impl Into<String>, base_field: BaseField) -> Self {
        Self {
            name: name.into(),
            base_field,
            langs: Vec::new(),
        }
    }

    pub fn with_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.langs = langs.into_iter().map(LocaleCode::new).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_field(&self) -> &BaseField {
        &self.base_field
    }

    pub fn langs(&self) -> &[LocaleCode] {
        &self.langs
    }

    pub fn description(&self) -> &'static str {
        "A JSON object with translations"
    }

    /// Name of the attribute that bypasses locale resolution (`<name>__raw`).
    pub fn raw_attribute_name(&self) -> String {
        format!("{}{}", self.name, RAW_SUFFIX)
    }

    pub fn deconstruct(&self) -> FieldDeconstruction {
        FieldDeconstruction {
            name: self.name.clone(),
            path: FIELD_PATH.to_string(),
            kwargs: FieldKwargs {
                base_field: self.base_field.clone(),
                langs: self.langs.clone(),
            },
        }
    }

    /// Rebuild a field from its deconstruction.
    pub fn from_deconstruction(deconstruction: FieldDeconstruction) -> Self {
        Self {
            name: deconstruction.name,
            base_field: deconstruction.kwargs.base_field,
            langs: deconstruction.kwargs.langs,
        }
    }

    /// Validate the holder's stored map. An unset holder is always clean.
    pub fn validate(&self, holder: &TranslationHolder) -> ValidationReport {
        match holder.get_raw_map() {
            Some(map) => TranslationMapValidator::validate(map, &self.base_field),
            None => ValidationReport::new(),
        }
    }

    /// Read the translation for the context's locale.
    pub fn get_translation<'a>(
        &self,
        holder: &'a TranslationHolder,
        ctx: &TranslationContext,
    ) -> Result<Option<&'a Value>> {
        self.read_outcome(holder, ctx).map(ReadOutcome::value)
    }

    /// Read the translation and report which locale slot answered.
    pub fn read_outcome<'a>(
        &self,
        holder: &'a TranslationHolder,
        ctx: &TranslationContext,
    ) -> Result<ReadOutcome<'a>> {
        trace!(field = %self.name, "Reading translated field");
        holder.read_outcome(ctx)
    }

    /// Assign to the field: one translation for the active locale, or a whole map.
    pub fn set_translation(
        &self,
        holder: &mut TranslationHolder,
        ctx: &TranslationContext,
        value: FieldValue,
    ) -> Result<()> {
        match value {
            FieldValue::Translation(value) => {
                trace!(field = %self.name, "Writing translation for active locale");
                holder.scoped_write(ctx, value)?;
            }
            FieldValue::Translations(map) => {
                trace!(field = %self.name, "Replacing translation map");
                holder.bulk_replace(map);
            }
        }
        Ok(())
    }

    pub fn get_raw<'a>(&self, holder: &'a TranslationHolder) -> Option<&'a TranslationMap> {
        holder.get_raw_map()
    }

    pub fn set_raw(&self, holder: &mut TranslationHolder, map: Option<TranslationMap>) {
        holder.bulk_replace(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use serde_json::json;

    fn title_field() -> TranslationJsonField {
        TranslationJsonField::new("title", BaseField::Char { max_length: 200 })
            .with_langs(["en_GB", "fr-FR"])
    }

    fn sample_holder() -> TranslationHolder {
        TranslationHolder::from_json_str(r#"{"en-gb": "hello", "fr-fr": "salut"}"#)
            .expect("Should parse")
    }

    // ==================== BaseField Tests ====================

    #[test]
    fn test_base_field_check() {
        assert!(BaseField::Text.check(&json!("x")).is_ok());
        assert!(BaseField::Text.check(&json!(1)).is_err());
        assert!(BaseField::Integer.check(&json!(42)).is_ok());
        assert!(BaseField::Integer.check(&json!(4.2)).is_err());
        assert!(BaseField::Float.check(&json!(4.2)).is_ok());
        assert!(BaseField::Boolean.check(&json!(true)).is_ok());
        assert!(BaseField::Json.check(&json!({"any": ["thing"]})).is_ok());
    }

    #[test]
    fn test_base_field_check_message() {
        let err = BaseField::Boolean.check(&json!("yes")).unwrap_err();
        assert_eq!(err, "expected a boolean, got a string");
    }

    #[test]
    fn test_char_counts_characters_not_bytes() {
        let field = BaseField::Char { max_length: 6 };
        assert!(field.check(&json!("привет")).is_ok());
        assert!(field.check(&json!("приветы")).is_err());
    }

    #[test]
    fn test_base_field_serialization() {
        let json = serde_json::to_value(BaseField::Char { max_length: 10 }).expect("Should serialize");
        assert_eq!(json, json!({"type": "char", "max_length": 10}));
    }

    // ==================== Deconstruction Tests ====================

    #[test]
    fn test_deconstruct_includes_base_field_and_langs() {
        let deconstruction = title_field().deconstruct();

        assert_eq!(deconstruction.name, "title");
        assert_eq!(deconstruction.path, FIELD_PATH);
        assert_eq!(deconstruction.kwargs.base_field, BaseField::Char { max_length: 200 });
        assert_eq!(
            deconstruction.kwargs.langs,
            vec![LocaleCode::new("en-gb"), LocaleCode::new("fr-fr")]
        );
    }

    #[test]
    fn test_deconstruct_without_langs_keeps_empty_list() {
        let field = TranslationJsonField::new("body", BaseField::Text);
        let json = serde_json::to_value(field.deconstruct()).expect("Should serialize");
        assert_eq!(json["kwargs"]["langs"], json!([]));
    }

    #[test]
    fn test_from_deconstruction_rebuilds_field() {
        let field = title_field();
        let json = serde_json::to_string(&field.deconstruct()).expect("Should serialize");
        let parsed: FieldDeconstruction = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(TranslationJsonField::from_deconstruction(parsed), field);
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_raw_attribute_name() {
        assert_eq!(title_field().raw_attribute_name(), "title__raw");
    }

    #[test]
    fn test_get_translation() {
        let holder = sample_holder();
        let ctx = TranslationContext::new(Some("fr_FR"), Some("en-gb"));
        let value = title_field().get_translation(&holder, &ctx).expect("Should read");
        assert_eq!(value, Some(&json!("salut")));
    }

    #[test]
    fn test_set_translation_scalar_uses_active_locale() {
        let field = title_field();
        let mut holder = sample_holder();
        let ctx = TranslationContext::new(Some("fr_FR"), Some("en-gb"));

        field
            .set_translation(&mut holder, &ctx, FieldValue::from(json!("New value")))
            .expect("Should write");

        assert_eq!(
            holder.to_json(),
            json!({"en-gb": "hello", "fr-fr": "New value"})
        );
    }

    #[test]
    fn test_set_translation_map_replaces_everything() {
        let field = title_field();
        let mut holder = sample_holder();
        // No active locale needed for a whole-map assignment
        let ctx = TranslationContext::default();

        field
            .set_translation(&mut holder, &ctx, FieldValue::from(json!({"en": "Foo", "de": "Bar"})))
            .expect("Should replace");

        assert_eq!(holder.to_json(), json!({"en": "Foo", "de": "Bar"}));
    }

    #[test]
    fn test_set_translation_null_clears_only_active_slot() {
        let field = title_field();
        let mut holder = sample_holder();
        let ctx = TranslationContext::new(Some("fr-fr"), Some("en-gb"));

        field
            .set_translation(&mut holder, &ctx, json!(null).into())
            .expect("Should write");

        assert_eq!(holder.to_json(), json!({"en-gb": "hello", "fr-fr": null}));
    }

    #[test]
    fn test_set_translation_null_without_locale_fails() {
        let field = title_field();
        let mut holder = sample_holder();

        let err = field
            .set_translation(&mut holder, &TranslationContext::default(), json!(null).into())
            .unwrap_err();

        assert!(matches!(err, TranslationError::Configuration));
        assert_eq!(holder, sample_holder());
    }

    #[test]
    fn test_set_translation_explicit_unset() {
        let field = title_field();
        let mut holder = sample_holder();

        field
            .set_translation(&mut holder, &TranslationContext::default(), FieldValue::Translations(None))
            .expect("Should replace");

        assert!(!holder.is_set());
    }

    #[test]
    fn test_set_translation_without_locale_fails() {
        let field = title_field();
        let mut holder = sample_holder();

        let err = field
            .set_translation(&mut holder, &TranslationContext::default(), json!("value").into())
            .unwrap_err();
        assert!(matches!(err, TranslationError::Configuration));
    }

    #[test]
    fn test_raw_accessors_skip_resolution() {
        let field = title_field();
        let mut holder = TranslationHolder::new();

        let map: TranslationMap = [("EN".to_string(), json!("raw"))].into_iter().collect();
        field.set_raw(&mut holder, Some(map.clone()));

        assert_eq!(field.get_raw(&holder), Some(&map));
    }

    #[test]
    fn test_validate_holder() {
        let field = TranslationJsonField::new("count", BaseField::Integer);
        let holder = TranslationHolder::from_json_str(r#"{"en": 1, "de": "zwei"}"#).unwrap();

        let report = field.validate(&holder);
        assert_eq!(report.errors.len(), 1);
        assert!(field.validate(&TranslationHolder::new()).is_clean());
    }

    #[test]
    fn test_field_value_classification() {
        assert_eq!(FieldValue::from(json!(5)), FieldValue::Translation(json!(5)));
        assert_eq!(
            FieldValue::from(json!(["a"])),
            FieldValue::Translation(json!(["a"]))
        );
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Translation(Value::Null));
        assert_eq!(FieldValue::from(json!({})), FieldValue::Translations(Some(TranslationMap::new())));
    }
}
