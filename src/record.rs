//! Per-instance translation state.
//!
//! A `TranslatedRecord` is what a model instance carries: one holder per
//! translated field. It hydrates from and serializes to a storage row (a
//! JSON object of column name to column value) and routes attribute access.
//! An attribute named `<field>__raw` reaches the stored map directly.

use crate::error::{Result, TranslationError};
use crate::field::{FieldValue, TranslationJsonField, RAW_SUFFIX};
use crate::holder::TranslationHolder;
use crate::i18n::{ResolutionMetrics, TranslationContext, ValidationReport};
use crate::registry::ModelTranslations;
use crate::resolver::TranslationMap;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Translation holders for one model instance.
#[derive(Debug, Clone)]
pub struct TranslatedRecord<'m> {
    model: &'m ModelTranslations,
    holders: BTreeMap<String, TranslationHolder>,
    metrics: Option<&'m ResolutionMetrics>,
}

impl<'m> TranslatedRecord<'m> {
    /// Create a record whose holders are all unset.
    pub fn new(model: &'m ModelTranslations) -> Self {
        let holders = model
            .fields()
            .iter()
            .map(|field| (field.name().to_string(), TranslationHolder::new()))
            .collect();

        Self {
            model,
            holders,
            metrics: None,
        }
    }

    /// Count reads and assignments made through this record.
    pub fn with_metrics(mut self, metrics: &'m ResolutionMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Hydrate from a storage row. Missing columns leave their holder unset;
    /// columns that aren't translated fields are ignored.
    pub fn from_row(model: &'m ModelTranslations, row: &Map<String, Value>) -> Result<Self> {
        let mut record = Self::new(model);
        for (name, holder) in record.holders.iter_mut() {
            if let Some(column) = row.get(name) {
                holder.hydrate(column.clone())?;
            }
        }
        Ok(record)
    }

    /// Storage values of every translated column.
    pub fn to_row(&self) -> Map<String, Value> {
        self.holders
            .iter()
            .map(|(name, holder)| (name.clone(), holder.to_json()))
            .collect()
    }

    pub fn model(&self) -> &'m ModelTranslations {
        self.model
    }

    pub fn holder(&self, field: &str) -> Option<&TranslationHolder> {
        self.holders.get(field)
    }

    /// Read a translated field for the context's locale.
    pub fn get(&self, field: &str, ctx: &TranslationContext) -> Result<Option<&Value>> {
        let (definition, holder) = self.lookup(field)?;
        let outcome = definition.read_outcome(holder, ctx)?;
        if let Some(metrics) = self.metrics {
            metrics.record_read(&outcome);
        }
        Ok(outcome.value())
    }

    /// Assign to a translated field.
    pub fn set(&mut self, field: &str, ctx: &TranslationContext, value: FieldValue) -> Result<()> {
        let metrics = self.metrics;
        let scoped = matches!(value, FieldValue::Translation(_));
        let (definition, holder) = self.lookup_mut(field)?;
        definition.set_translation(holder, ctx, value)?;

        if let Some(metrics) = metrics {
            if scoped {
                metrics.record_scoped_write();
            } else {
                metrics.record_bulk_replace();
            }
        }
        Ok(())
    }

    pub fn get_raw(&self, field: &str) -> Result<Option<&TranslationMap>> {
        let (definition, holder) = self.lookup(field)?;
        Ok(definition.get_raw(holder))
    }

    pub fn set_raw(&mut self, field: &str, map: Option<TranslationMap>) -> Result<()> {
        let metrics = self.metrics;
        let (definition, holder) = self.lookup_mut(field)?;
        definition.set_raw(holder, map);
        if let Some(metrics) = metrics {
            metrics.record_bulk_replace();
        }
        Ok(())
    }

    /// Attribute-style read. `title` resolves by locale, `title__raw` returns
    /// the stored object (or `null`). Absent translations read as `null`.
    pub fn get_attr(&self, attr: &str, ctx: &TranslationContext) -> Result<Value> {
        match attr.strip_suffix(RAW_SUFFIX) {
            Some(field) => {
                let (_, holder) = self.lookup(field)?;
                Ok(holder.to_json())
            }
            None => Ok(self.get(attr, ctx)?.cloned().unwrap_or(Value::Null)),
        }
    }

    /// Attribute-style write. `title__raw` accepts only an object or `null`;
    /// `title` treats an object as a whole map and anything else, `null`
    /// included, as the active locale's translation.
    pub fn set_attr(&mut self, attr: &str, ctx: &TranslationContext, value: Value) -> Result<()> {
        match attr.strip_suffix(RAW_SUFFIX) {
            Some(field) => {
                let metrics = self.metrics;
                let (_, holder) = self.lookup_mut(field)?;
                holder.hydrate(value)?;
                if let Some(metrics) = metrics {
                    metrics.record_bulk_replace();
                }
                Ok(())
            }
            None => self.set(attr, ctx, FieldValue::from(value)),
        }
    }

    /// Validate every translated field, keyed by field name.
    pub fn validate(&self) -> BTreeMap<String, ValidationReport> {
        self.model
            .fields()
            .iter()
            .filter_map(|field| {
                self.holders
                    .get(field.name())
                    .map(|holder| (field.name().to_string(), field.validate(holder)))
            })
            .collect()
    }

    fn lookup(&self, field: &str) -> Result<(&'m TranslationJsonField, &TranslationHolder)> {
        let model = self.model;
        let definition = model
            .get_field(field)
            .ok_or_else(|| unknown_field(model, field))?;
        let holder = self
            .holders
            .get(field)
            .ok_or_else(|| unknown_field(model, field))?;
        Ok((definition, holder))
    }

    fn lookup_mut(
        &mut self,
        field: &str,
    ) -> Result<(&'m TranslationJsonField, &mut TranslationHolder)> {
        let model = self.model;
        let definition = model
            .get_field(field)
            .ok_or_else(|| unknown_field(model, field))?;
        let holder = self
            .holders
            .get_mut(field)
            .ok_or_else(|| unknown_field(model, field))?;
        Ok((definition, holder))
    }
}

fn unknown_field(model: &ModelTranslations, field: &str) -> TranslationError {
    TranslationError::UnknownField {
        model: model.model().to_string(),
        field: field.to_string(),
    }
}
