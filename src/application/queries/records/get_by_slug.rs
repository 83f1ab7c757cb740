use super::RecordQueryService;
use crate::{
    application::{
        dto::RecordDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::record::{Slug, SlugQuery},
};

pub struct GetRecordBySlugQuery {
    pub slug: String,
}

impl RecordQueryService {
    pub async fn get_record_by_slug(&self, query: GetRecordBySlugQuery) -> ApplicationResult<RecordDto> {
        let slug = Slug::new(query.slug)?;
        let record = self
            .store
            .find_one(&SlugQuery::Exact(slug))
            .await?
            .ok_or_else(|| ApplicationError::not_found("record not found"))?;

        RecordDto::try_from(record)
    }
}
