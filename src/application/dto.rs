use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::record::Record,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDto {
    pub id: i64,
    pub slug: Option<String>,
    pub fields: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Record> for RecordDto {
    type Error = ApplicationError;

    fn try_from(record: Record) -> ApplicationResult<Self> {
        let id = record
            .id()
            .ok_or_else(|| ApplicationError::infrastructure("store did not assign a record id"))?;
        Ok(Self {
            id: id.into(),
            slug: record.slug.map(String::from),
            fields: record.fields,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
