// src/domain/record/services/mod.rs
use std::borrow::Cow;

use regex::NoExpand;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::entity::Record;
use crate::domain::record::options::SlugOptions;
use crate::domain::record::schema::{FieldSpec, SLUG_FIELD, Schema};
use crate::domain::record::value_objects::{FieldName, Slug};

/// Derives candidate slugs from a record's source field.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    options: SlugOptions,
}

impl SlugGenerator {
    pub fn new(options: SlugOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SlugOptions {
        &self.options
    }

    /// Normalizes `source` into a candidate: omit, lower-case, collapse
    /// disallowed runs, then strip one substitute from each end.
    pub fn generate(&self, source: &str) -> String {
        let text = match self.options.omit_pattern() {
            Some(omit) => omit.replace_all(source, ""),
            None => Cow::Borrowed(source),
        };
        let lowered = text.to_lowercase();
        let substitute = self.options.substitute_str();
        let replaced = self
            .options
            .disallow_pattern()
            .replace_all(&lowered, NoExpand(substitute));

        let mut slug: &str = &replaced;
        if let Some(rest) = slug.strip_prefix(substitute) {
            slug = rest;
        }
        if let Some(rest) = slug.strip_suffix(substitute) {
            slug = rest;
        }
        slug.to_string()
    }

    /// Pre-persistence hook. Assigns a generated slug unless the record
    /// already carries one.
    pub fn before_persist(&self, record: &mut Record) -> DomainResult<()> {
        if record.slug.is_some() {
            return Ok(());
        }
        let field = self.options.source_field();
        let source = record.field(field.as_str()).ok_or_else(|| {
            DomainError::Validation(format!("record has no `{field}` field to derive a slug from"))
        })?;
        let candidate = self.generate(source);
        record.slug = Some(Slug::from_candidate(candidate));
        Ok(())
    }
}

/// Declares the unique slug field on `schema` (unless the options leave that
/// to the caller) and returns the generator acting as its pre-persistence
/// hook.
pub fn enhance_schema(schema: &mut Schema, options: SlugOptions) -> DomainResult<SlugGenerator> {
    if !options.is_slug_manual() {
        schema.add(FieldSpec {
            name: FieldName::new(SLUG_FIELD)?,
            unique: true,
        })?;
    }
    Ok(SlugGenerator::new(options))
}
