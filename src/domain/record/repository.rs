use crate::domain::errors::DomainResult;
use crate::domain::record::entity::Record;
use crate::domain::record::value_objects::{RecordId, Slug};
use async_trait::async_trait;
use std::time::Duration;

/// Options forwarded untouched to the store on every write attempt.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Upper bound for a single write. Enforced by the store.
    pub timeout: Option<Duration>,
}

impl WriteOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Single-result slug lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugQuery {
    /// The record holding exactly this slug.
    Exact(Slug),
    /// Among records whose slug is `base` or `base-<digits>`, the one with the
    /// highest numeric suffix. A bare `base` ranks below any suffixed slug.
    HighestSuffix { base: String },
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts the record when it is flagged new, otherwise updates the row
    /// with its id. A record that is neither new nor identified is left
    /// untouched and reported as success.
    ///
    /// Implementations may clear the new flag as soon as an attempt starts,
    /// so a caller retrying a failed insert must set it again. Uniqueness
    /// rejections are reported as `DomainError::UniqueViolation`.
    async fn persist(&self, record: &mut Record, options: &WriteOptions) -> DomainResult<()>;

    async fn find_one(&self, query: &SlugQuery) -> DomainResult<Option<Record>>;

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Record>>;
}
