//! Model registry: which models carry translated fields.
//!
//! A `ModelTranslations` is built once when a model is defined and lists its
//! translated fields. The `Translator` collects them; it is an ordinary value
//! owned by the application, not a process-wide singleton.

use crate::error::{Result, TranslationError};
use crate::field::TranslationJsonField;
use crate::record::TranslatedRecord;
use tracing::info;

/// Translated fields of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTranslations {
    model: String,
    fields: Vec<TranslationJsonField>,
}

impl ModelTranslations {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: Vec::new(),
        }
    }

    /// Add a translated field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, field: TranslationJsonField) -> Self {
        self.fields.retain(|existing| existing.name() != field.name());
        self.fields.push(field);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fields(&self) -> &[TranslationJsonField] {
        &self.fields
    }

    /// Get a translated field by its attribute name.
    pub fn get_field(&self, name: &str) -> Option<&TranslationJsonField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Create an empty record with one unset holder per translated field.
    pub fn instantiate(&self) -> TranslatedRecord<'_> {
        TranslatedRecord::new(self)
    }
}

/// Registry of models with translated fields.
#[derive(Debug, Default)]
pub struct Translator {
    registry: Vec<ModelTranslations>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model.
    ///
    /// # Returns
    /// * `Ok(())` if the model was added
    /// * `Err(TranslationError::AlreadyRegistered)` if a model with the same name exists
    pub fn register(&mut self, model: ModelTranslations) -> Result<()> {
        if self.is_registered(model.model()) {
            return Err(TranslationError::AlreadyRegistered {
                model: model.model().to_string(),
            });
        }

        info!(
            model = model.model(),
            fields = model.fields().len(),
            "Registered model for translation"
        );
        self.registry.push(model);
        Ok(())
    }

    /// Register several models, stopping at the first duplicate.
    pub fn register_all<I>(&mut self, models: I) -> Result<()>
    where
        I: IntoIterator<Item = ModelTranslations>,
    {
        models.into_iter().try_for_each(|model| self.register(model))
    }

    pub fn get(&self, model: &str) -> Option<&ModelTranslations> {
        self.registry.iter().find(|entry| entry.model() == model)
    }

    pub fn is_registered(&self, model: &str) -> bool {
        self.get(model).is_some()
    }

    /// All registered models, in registration order.
    pub fn list(&self) -> Vec<&ModelTranslations> {
        self.registry.iter().collect()
    }
}
