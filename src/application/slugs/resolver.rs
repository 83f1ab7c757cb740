// src/application/slugs/resolver.rs
use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::policy::{RetryBudget, SuffixPolicy};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{
    Record, RecordId, RecordStore, SLUG_FIELD, Slug, SlugGenerator, SlugQuery, WriteOptions,
};

/// Store decorator that turns slug collisions into retries.
///
/// Each `persist` runs the slug hook, then writes. A rejection that names the
/// slug field revises the candidate according to the policy and writes again;
/// anything else is returned as the inner store reported it. Uniqueness itself
/// is enforced by the inner store's index, never checked up front.
pub struct UniqueSlugResolver {
    store: Arc<dyn RecordStore>,
    generator: SlugGenerator,
    policy: SuffixPolicy,
    budget: RetryBudget,
}

/// Wraps `store` so every write goes through slug generation and collision
/// recovery.
pub fn enhance_model(
    store: Arc<dyn RecordStore>,
    generator: SlugGenerator,
    policy: SuffixPolicy,
) -> UniqueSlugResolver {
    UniqueSlugResolver {
        store,
        generator,
        policy,
        budget: RetryBudget::default(),
    }
}

impl UniqueSlugResolver {
    pub fn with_budget(mut self, budget: RetryBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn generator(&self) -> &SlugGenerator {
        &self.generator
    }

    pub fn policy(&self) -> &SuffixPolicy {
        &self.policy
    }

    pub fn budget(&self) -> RetryBudget {
        self.budget
    }

    async fn revise(&self, current: &Slug) -> DomainResult<Slug> {
        match &self.policy {
            SuffixPolicy::RandomDigit(digits) => {
                let digit = digits.next_digit() % 10;
                Ok(Slug::from_candidate(format!("{current}{digit}")))
            }
            SuffixPolicy::Sequential => {
                let (base, _) = current.split_numeric_suffix();
                let query = SlugQuery::HighestSuffix {
                    base: base.to_string(),
                };
                let existing = self.store.find_one(&query).await?;
                Ok(next_sequential(current, existing.as_ref().and_then(Record::slug_str)))
            }
        }
    }
}

/// Next candidate after `current` collided, given the highest existing slug
/// sharing its base.
fn next_sequential(current: &Slug, highest: Option<&str>) -> Slug {
    let (base, _) = current.split_numeric_suffix();
    let Some(highest) = highest.filter(|slug| *slug != base) else {
        return Slug::from_candidate(format!("{base}-1"));
    };

    let next = highest
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|suffix| suffix.parse::<u64>().ok())
        .and_then(|n| n.checked_add(1));

    match next {
        Some(n) => Slug::from_candidate(format!("{base}-{n}")),
        None => {
            debug!(existing = highest, "unparseable slug suffix, starting a fresh one");
            Slug::from_candidate(format!("{current}-1"))
        }
    }
}

#[async_trait]
impl RecordStore for UniqueSlugResolver {
    async fn persist(&self, record: &mut Record, options: &WriteOptions) -> DomainResult<()> {
        self.generator.before_persist(record)?;

        let was_new = record.is_new();
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let err = match self.store.persist(record, options).await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            if err.unique_violation_on(SLUG_FIELD).is_none() {
                return Err(err);
            }
            let Some(current) = record.slug.clone() else {
                return Err(err);
            };

            if self.budget.is_spent(attempts, started.elapsed()) {
                warn!(
                    attempts,
                    candidate = %current,
                    policy = self.policy.name(),
                    "giving up on slug allocation"
                );
                return Err(DomainError::SlugExhausted {
                    candidate: current.into_inner(),
                    attempts,
                });
            }

            let next = self.revise(&current).await?;
            debug!(attempt = attempts, from = %current, to = %next, "slug taken, retrying");
            record.slug = Some(next);
            // A failed insert may have cleared the flag; without it the
            // retry would be treated as an update of a row that does not exist.
            if was_new {
                record.set_new(true);
            }
        }
    }

    async fn find_one(&self, query: &SlugQuery) -> DomainResult<Option<Record>> {
        self.store.find_one(query).await
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Record>> {
        self.store.find_by_id(id).await
    }
}
