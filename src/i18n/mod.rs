//! Locale handling for translated fields.
//!
//! # Architecture
//!
//! - `locale`: Locale code normalization and the normalized `LocaleCode` type
//! - `activation`: Explicit locale context and the ambient locale source
//! - `validator`: Checks stored translation maps against the field type
//! - `metrics`: Counters for how reads were resolved
//!
//! # Example
//!
//! ```rust
//! use json_model_translations::i18n::{LocaleCode, ThreadLocale, TranslationContext};
//! use json_model_translations::TranslationSettings;
//!
//! let settings = TranslationSettings::new(true, Some("en-gb"));
//! let _guard = ThreadLocale::override_locale("fr_FR");
//! let ctx = TranslationContext::from_source(&ThreadLocale, &settings);
//!
//! assert_eq!(ctx.active, Some(LocaleCode::new("fr-fr")));
//! ```

mod activation;
mod locale;
mod metrics;
mod validator;

pub use activation::{LocaleOverride, LocaleSource, ThreadLocale, TranslationContext};
pub use locale::{normalize_locale_code, LocaleCode};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use validator::{TranslationMapValidator, ValidationReport};
