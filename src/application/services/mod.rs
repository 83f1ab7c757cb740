// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::records::RecordCommandService,
        ports::ClockPort,
        queries::records::RecordQueryService,
        slugs::{RetryBudget, SuffixPolicy, UniqueSlugResolver, enhance_model},
    },
    domain::{
        errors::DomainResult,
        record::{RecordStore, SLUG_FIELD, Schema, SlugGenerator, SlugOptions, enhance_schema},
    },
};

/// Declares the record schema for `options` and returns the matching
/// generator. In manual mode the slug field is declared here, so the store
/// still carries a unique index on it.
pub fn declare_schema(options: SlugOptions) -> DomainResult<(Schema, SlugGenerator)> {
    let manual = options.is_slug_manual();
    let mut schema = Schema::new().with_field(options.source_field().as_str())?;
    let generator = enhance_schema(&mut schema, options)?;
    if manual {
        schema = schema.with_unique_field(SLUG_FIELD)?;
    }
    Ok((schema, generator))
}

pub struct ApplicationServices {
    pub record_commands: Arc<RecordCommandService>,
    pub record_queries: Arc<RecordQueryService>,
    resolver: Arc<UniqueSlugResolver>,
}

impl ApplicationServices {
    /// Wraps `store` in the slug resolver once; every command and query goes
    /// through that single decorator.
    pub fn new(
        store: Arc<dyn RecordStore>,
        generator: SlugGenerator,
        policy: SuffixPolicy,
        budget: RetryBudget,
        clock: Arc<ClockPort>,
    ) -> Self {
        let resolver = Arc::new(enhance_model(store, generator, policy).with_budget(budget));
        let slugged: Arc<dyn RecordStore> = resolver.clone();

        let record_commands = Arc::new(RecordCommandService::new(
            Arc::clone(&slugged),
            Arc::clone(&clock),
        ));
        let record_queries = Arc::new(RecordQueryService::new(Arc::clone(&slugged)));

        Self {
            record_commands,
            record_queries,
            resolver,
        }
    }

    pub fn resolver(&self) -> Arc<UniqueSlugResolver> {
        Arc::clone(&self.resolver)
    }
}
