use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{
    Record, RecordId, RecordStore, SLUG_FIELD, Schema, Slug, SlugQuery, WriteOptions,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fields TEXT NOT NULL,
    slug TEXT CHECK (slug IS NULL OR length(slug) > 0),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const SELECT_BY_SLUG: &str =
    "SELECT id, fields, slug, created_at, updated_at FROM records WHERE slug = ? LIMIT 1";

// `?1` is the base. Suffixes must be all digits; the bare base ranks last.
const SELECT_HIGHEST_SUFFIX: &str = "SELECT id, fields, slug, created_at, updated_at FROM records
     WHERE slug = ?1
        OR (substr(slug, 1, length(?1) + 1) = ?1 || '-'
            AND length(slug) > length(?1) + 1
            AND substr(slug, length(?1) + 2) NOT GLOB '*[^0-9]*')
     ORDER BY CASE WHEN slug = ?1 THEN -1
                   ELSE CAST(substr(slug, length(?1) + 2) AS INTEGER) END DESC,
              length(slug) DESC
     LIMIT 1";

#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: Arc<SqlitePool>,
}

impl SqliteRecordStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Creates the records table and one unique index per unique field of
    /// `schema`. Idempotent.
    pub async fn ensure_schema(&self, schema: &Schema) -> DomainResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        for field in schema.unique_fields() {
            let target = if field.as_str() == SLUG_FIELD {
                SLUG_FIELD.to_string()
            } else {
                format!("json_extract(fields, '$.{field}')")
            };
            let ddl =
                format!("CREATE UNIQUE INDEX IF NOT EXISTS records_{field}_key ON records ({target})");
            sqlx::query(&ddl)
                .execute(&*self.pool)
                .await
                .map_err(map_sqlx)?;
        }
        Ok(())
    }

    async fn write(&self, record: &mut Record) -> DomainResult<()> {
        let fields = serde_json::to_string(&record.fields)
            .map_err(|err| DomainError::Persistence(format!("cannot encode fields: {err}")))?;

        if record.is_new() {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO records (fields, slug, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id",
            )
            .bind(&fields)
            .bind(record.slug_str())
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;

            record.mark_persisted(RecordId::new(id)?);
            return Ok(());
        }

        let Some(id) = record.id() else {
            debug!("record is neither new nor stored, nothing to write");
            return Ok(());
        };

        let result = sqlx::query("UPDATE records SET fields = ?, slug = ?, updated_at = ? WHERE id = ?")
            .bind(&fields)
            .bind(record.slug_str())
            .bind(record.updated_at)
            .bind(i64::from(id))
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("record {id} not found")));
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: i64,
    fields: String,
    slug: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for Record {
    type Error = DomainError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let fields: BTreeMap<String, String> = serde_json::from_str(&row.fields).map_err(|err| {
            DomainError::Persistence(format!("corrupt fields for record {}: {err}", row.id))
        })?;
        Ok(Record::restore(
            RecordId::new(row.id)?,
            fields,
            row.slug.map(Slug::from_candidate),
            row.created_at,
            row.updated_at,
        ))
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn persist(&self, record: &mut Record, options: &WriteOptions) -> DomainResult<()> {
        match options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.write(record))
                .await
                .map_err(|_| DomainError::Persistence(format!("write timed out after {limit:?}")))?,
            None => self.write(record).await,
        }
    }

    async fn find_one(&self, query: &SlugQuery) -> DomainResult<Option<Record>> {
        let row = match query {
            SlugQuery::Exact(slug) => {
                sqlx::query_as::<_, RecordRow>(SELECT_BY_SLUG)
                    .bind(slug.as_str())
                    .fetch_optional(&*self.pool)
                    .await
            }
            SlugQuery::HighestSuffix { base } => {
                sqlx::query_as::<_, RecordRow>(SELECT_HIGHEST_SUFFIX)
                    .bind(base.as_str())
                    .fetch_optional(&*self.pool)
                    .await
            }
        }
        .map_err(map_sqlx)?;

        row.map(Record::try_from).transpose()
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Record>> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT id, fields, slug, created_at, updated_at FROM records WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Record::try_from).transpose()
    }
}
