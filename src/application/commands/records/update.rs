// src/application/commands/records/update.rs
use std::collections::BTreeMap;

use super::RecordCommandService;
use crate::{
    application::{
        dto::RecordDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::record::{RecordId, WriteOptions},
};

/// Changes field values of an existing record. The slug stays as first
/// assigned, even when the source field changes.
pub struct UpdateRecordCommand {
    pub id: i64,
    pub fields: BTreeMap<String, String>,
}

impl RecordCommandService {
    pub async fn update_record(&self, command: UpdateRecordCommand) -> ApplicationResult<RecordDto> {
        let id = RecordId::new(command.id)?;
        let mut record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("record {id} not found")))?;

        for (name, value) in command.fields {
            record.set_field(name, value);
        }
        record.touch(self.clock.now());

        self.store.persist(&mut record, &WriteOptions::default()).await?;
        RecordDto::try_from(record)
    }
}
