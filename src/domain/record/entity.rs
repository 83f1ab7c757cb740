use crate::domain::record::value_objects::{RecordId, Slug};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A slugged record. `is_new` tells the store whether the next write is an
/// insert or an update of the row identified by `id`.
#[derive(Debug, Clone)]
pub struct Record {
    id: Option<RecordId>,
    is_new: bool,
    pub fields: BTreeMap<String, String>,
    pub slug: Option<Slug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, String>, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            is_new: true,
            fields,
            slug: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a record read back from a store.
    pub fn restore(
        id: RecordId,
        fields: BTreeMap<String, String>,
        slug: Option<Slug>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            is_new: false,
            fields,
            slug,
            created_at,
            updated_at,
        }
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }

    /// Records the identity the store assigned on insert.
    pub fn mark_persisted(&mut self, id: RecordId) {
        self.id = Some(id);
        self.is_new = false;
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn slug_str(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
