use crate::i18n::LocaleCode;
use anyhow::{bail, Context, Result};

/// Site-wide localization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSettings {
    /// Whether locale-dependent access is enabled at all
    pub use_i18n: bool,

    /// Default (fallback) locale; `None` disables the fallback. Never blank.
    pub language_code: Option<LocaleCode>,
}

impl TranslationSettings {
    pub fn new(use_i18n: bool, language_code: Option<&str>) -> Self {
        Self {
            use_i18n,
            language_code: language_code.and_then(LocaleCode::non_empty),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            use_i18n: match std::env::var("USE_I18N") {
                Ok(raw) => parse_flag(&raw).context("USE_I18N is not a valid boolean")?,
                Err(_) => true,
            },

            // An explicitly empty LANGUAGE_CODE turns the fallback off
            language_code: match std::env::var("LANGUAGE_CODE") {
                Ok(raw) => LocaleCode::non_empty(raw.trim()),
                Err(_) => Some(LocaleCode::new("en-us")),
            },
        })
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self::new(true, Some("en-us"))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Expected true/false, got '{}'", other),
    }
}
