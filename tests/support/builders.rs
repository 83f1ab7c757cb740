// tests/support/builders.rs
use std::collections::BTreeMap;

use slugsmith::domain::record::{Record, Slug};

pub struct RecordBuilder {
    fields: BTreeMap<String, String>,
    slug: Option<String>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            slug: None,
        }
    }

    pub fn title(self, title: &str) -> Self {
        self.field("title", title)
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn build(self) -> Record {
        let record = Record::new(self.fields, super::mocks::fixed_now());
        match self.slug {
            Some(slug) => record.with_slug(Slug::from_candidate(slug)),
            None => record,
        }
    }
}
