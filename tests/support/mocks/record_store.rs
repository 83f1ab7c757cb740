// tests/support/mocks/record_store.rs
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use slugsmith::domain::errors::{DomainError, DomainResult, UniqueViolation};
use slugsmith::domain::record::{
    Record, RecordId, RecordStore, SLUG_FIELD, SlugQuery, WriteOptions,
};

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Record>,
}

/// インメモリのレコードストア
///
/// Behaves like a document store: the new flag is cleared as soon as a write
/// is attempted, uniqueness of the slug (and of any configured field) is
/// checked atomically with the write, and a record that is neither new nor
/// stored is silently skipped.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    unique_fields: Vec<String>,
    failures: Mutex<VecDeque<DomainError>>,
    persist_calls: AtomicUsize,
    find_one_calls: AtomicUsize,
    write_delay: Option<Duration>,
    seen_timeouts: Mutex<Vec<Option<Duration>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally enforces uniqueness of `field` among record fields.
    pub fn with_unique_field(mut self, field: &str) -> Self {
        self.unique_fields.push(field.to_string());
        self
    }

    /// Every write sleeps for `delay` before touching the rows.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Stores a record with the given slug and title directly.
    pub fn seed(&self, slug: &str) -> RecordId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = RecordId::new(state.next_id).unwrap();
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), slug.to_string());
        let record = Record::restore(
            id,
            fields,
            Some(slugsmith::domain::record::Slug::from_candidate(slug)),
            super::fixed_now(),
            super::fixed_now(),
        );
        state.rows.insert(i64::from(id), record);
        id
    }

    /// Queues an error returned by the next `persist` call instead of writing.
    pub fn fail_next(&self, err: DomainError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn persist_calls(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    /// `WriteOptions::timeout` of every `persist` call, in order.
    pub fn seen_timeouts(&self) -> Vec<Option<Duration>> {
        self.seen_timeouts.lock().unwrap().clone()
    }

    pub fn find_one_calls(&self) -> usize {
        self.find_one_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn slugs(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .rows
            .values()
            .filter_map(|r| r.slug_str().map(str::to_string))
            .collect()
    }

    fn conflict(&self, state: &State, record: &Record) -> Option<DomainError> {
        let others = state
            .rows
            .iter()
            .filter(|(id, _)| record.id().map(i64::from) != Some(**id))
            .map(|(_, row)| row);

        for other in others {
            if record.slug.is_some() && other.slug == record.slug {
                return Some(DomainError::UniqueViolation(UniqueViolation::on_field(SLUG_FIELD)));
            }
            for field in &self.unique_fields {
                if record.field(field).is_some() && record.field(field) == other.field(field) {
                    return Some(DomainError::UniqueViolation(UniqueViolation::on_field(
                        field.clone(),
                    )));
                }
            }
        }
        None
    }

    async fn write(&self, record: &mut Record) -> DomainResult<()> {
        // Let concurrent writers interleave between attempts.
        tokio::task::yield_now().await;
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            record.set_new(false);
            return Err(err);
        }

        let was_new = record.is_new();
        record.set_new(false);

        let mut state = self.state.lock().unwrap();
        if was_new {
            if let Some(err) = self.conflict(&state, record) {
                return Err(err);
            }
            state.next_id += 1;
            let id = RecordId::new(state.next_id)?;
            record.mark_persisted(id);
            state.rows.insert(i64::from(id), record.clone());
            return Ok(());
        }

        let Some(id) = record.id() else {
            return Ok(());
        };
        if !state.rows.contains_key(&i64::from(id)) {
            return Err(DomainError::NotFound(format!("record {id} not found")));
        }
        if let Some(err) = self.conflict(&state, record) {
            return Err(err);
        }
        state.rows.insert(i64::from(id), record.clone());
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn persist(&self, record: &mut Record, options: &WriteOptions) -> DomainResult<()> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_timeouts.lock().unwrap().push(options.timeout);

        match options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.write(record))
                .await
                .map_err(|_| DomainError::Persistence(format!("write timed out after {limit:?}")))?,
            None => self.write(record).await,
        }
    }

    async fn find_one(&self, query: &SlugQuery) -> DomainResult<Option<Record>> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let found = match query {
            SlugQuery::Exact(slug) => state
                .rows
                .values()
                .find(|r| r.slug.as_ref() == Some(slug))
                .cloned(),
            SlugQuery::HighestSuffix { base } => state
                .rows
                .values()
                .filter_map(|r| {
                    let rank = suffix_rank(r.slug_str()?, base)?;
                    Some((rank, r))
                })
                .max_by_key(|(rank, _)| *rank)
                .map(|(_, r)| r.clone()),
        };
        Ok(found)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Record>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.get(&i64::from(id)).cloned())
    }
}

fn suffix_rank(slug: &str, base: &str) -> Option<Option<u128>> {
    if slug == base {
        return Some(None);
    }
    let digits = slug.strip_prefix(base)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Some(digits.parse::<u128>().unwrap_or(u128::MAX)))
}
