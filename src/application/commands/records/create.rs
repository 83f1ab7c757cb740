// src/application/commands/records/create.rs
use std::{collections::BTreeMap, time::Duration};

use super::RecordCommandService;
use crate::{
    application::{dto::RecordDto, error::ApplicationResult},
    domain::record::{Record, Slug, WriteOptions},
};

pub struct CreateRecordCommand {
    pub fields: BTreeMap<String, String>,
    pub slug: Option<String>,
    pub options: WriteOptions,
}

impl CreateRecordCommand {
    pub fn builder() -> CreateRecordCommandBuilder {
        CreateRecordCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateRecordCommandBuilder {
    fields: BTreeMap<String, String>,
    slug: Option<String>,
    options: WriteOptions,
}

impl CreateRecordCommandBuilder {
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Supplies the slug up front; generation is skipped.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_timeout(timeout);
        self
    }

    pub fn build(self) -> Result<CreateRecordCommand, &'static str> {
        if self.fields.is_empty() {
            return Err("at least one field is required");
        }
        Ok(CreateRecordCommand {
            fields: self.fields,
            slug: self.slug,
            options: self.options,
        })
    }
}

impl RecordCommandService {
    pub async fn create_record(&self, command: CreateRecordCommand) -> ApplicationResult<RecordDto> {
        let CreateRecordCommand {
            fields,
            slug,
            options,
        } = command;

        let mut record = Record::new(fields, self.clock.now());
        if let Some(slug) = slug {
            record = record.with_slug(Slug::new(slug)?);
        }

        self.store.persist(&mut record, &options).await?;
        RecordDto::try_from(record)
    }
}
