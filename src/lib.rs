//! Multiple translations of a model field stored in a single JSON column.
//!
//! Reads resolve to the translation for the active locale, falling back to
//! the site default; writes update only the active locale's slot.
//!
//! ```rust
//! use json_model_translations::{BaseField, ModelTranslations, TranslationContext, TranslationJsonField};
//! use serde_json::json;
//!
//! let article = ModelTranslations::new("Article")
//!     .field(TranslationJsonField::new("title", BaseField::Text));
//! let mut record = article.instantiate();
//!
//! let french = TranslationContext::new(Some("fr_FR"), Some("en-gb"));
//! record.set_attr("title", &french, json!("Bonjour")).unwrap();
//!
//! assert_eq!(record.get_attr("title", &french).unwrap(), json!("Bonjour"));
//! assert_eq!(record.get_attr("title__raw", &french).unwrap(), json!({"fr-fr": "Bonjour"}));
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod holder;
pub mod i18n;
pub mod record;
pub mod registry;
pub mod resolver;

pub use config::TranslationSettings;
pub use error::{TranslationError, TRANSLATIONS_DISABLED_MESSAGE};
pub use field::{BaseField, FieldDeconstruction, FieldValue, TranslationJsonField};
pub use holder::{HolderState, TranslationHolder};
pub use i18n::{normalize_locale_code, LocaleCode, LocaleSource, ThreadLocale, TranslationContext};
pub use record::TranslatedRecord;
pub use registry::{ModelTranslations, Translator};
pub use resolver::{resolve_read, resolve_read_outcome, resolve_write, ReadOutcome, TranslationMap};
