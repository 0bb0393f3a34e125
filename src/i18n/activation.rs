//! Active-locale context.
//!
//! Resolution never reaches for ambient state itself: callers build a
//! `TranslationContext` and pass it into every read and write. The ambient
//! locale lives behind the `LocaleSource` trait; `ThreadLocale` is the
//! per-thread implementation used at the framework boundary.

use crate::config::TranslationSettings;
use crate::error::{Result, TranslationError};
use crate::i18n::LocaleCode;
use std::cell::RefCell;

/// Something that knows the locale in effect for the current operation.
pub trait LocaleSource {
    /// Raw code of the current locale, if one is active.
    fn current_locale(&self) -> Option<String>;
}

/// Explicit locale context for one read or write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationContext {
    /// Locale the caller is operating in
    pub active: Option<LocaleCode>,

    /// Site-wide fallback locale
    pub default: Option<LocaleCode>,
}

impl TranslationContext {
    pub fn new(active: Option<&str>, default: Option<&str>) -> Self {
        Self {
            active: active.and_then(LocaleCode::non_empty),
            default: default.and_then(LocaleCode::non_empty),
        }
    }

    /// Build a context from the ambient locale and the site settings.
    ///
    /// With `use_i18n` off there is no active locale. Otherwise the ambient
    /// locale wins and `language_code` fills in when nothing is activated.
    /// A blank ambient locale counts as nothing activated.
    pub fn from_source(source: &dyn LocaleSource, settings: &TranslationSettings) -> Self {
        let active = if settings.use_i18n {
            source
                .current_locale()
                .and_then(LocaleCode::non_empty)
                .or_else(|| settings.language_code.clone())
        } else {
            None
        };

        Self {
            active,
            default: settings.language_code.clone(),
        }
    }

    /// Get the active locale or fail with a configuration error.
    pub fn require_active(&self) -> Result<&LocaleCode> {
        self.active.as_ref().ok_or(TranslationError::Configuration)
    }
}

thread_local! {
    static ACTIVE_LOCALE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Locale source backed by a per-thread slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLocale;

impl ThreadLocale {
    /// Activate `code` on this thread until the returned guard is dropped.
    pub fn override_locale(code: &str) -> LocaleOverride {
        let previous = ACTIVE_LOCALE.with(|slot| slot.replace(Some(code.to_string())));
        LocaleOverride { previous }
    }

    /// Clear the active locale on this thread until the returned guard is dropped.
    pub fn deactivate() -> LocaleOverride {
        let previous = ACTIVE_LOCALE.with(|slot| slot.replace(None));
        LocaleOverride { previous }
    }

    /// Current locale of this thread, already normalized.
    pub fn normalized() -> Option<LocaleCode> {
        ThreadLocale.current_locale().and_then(LocaleCode::non_empty)
    }
}

impl LocaleSource for ThreadLocale {
    fn current_locale(&self) -> Option<String> {
        ACTIVE_LOCALE.with(|slot| slot.borrow().clone())
    }
}

/// Restores the previously active locale when dropped.
#[derive(Debug)]
#[must_use = "the locale is restored as soon as the guard is dropped"]
pub struct LocaleOverride {
    previous: Option<String>,
}

impl Drop for LocaleOverride {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_LOCALE.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// A fixed locale, handy for callers that already know the request locale.
impl LocaleSource for Option<String> {
    fn current_locale(&self) -> Option<String> {
        self.clone()
    }
}
