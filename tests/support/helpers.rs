// tests/support/helpers.rs
use std::sync::Arc;

use super::mocks;
use slugsmith::application::{
    ports::{ClockPort, DigitSourcePort},
    services::ApplicationServices,
    slugs::{RetryBudget, SuffixPolicy, UniqueSlugResolver, enhance_model},
};
use slugsmith::domain::record::{RecordStore, SlugGenerator, SlugOptions};

pub fn random_policy(digits: impl IntoIterator<Item = u8>) -> SuffixPolicy {
    let digits: Arc<DigitSourcePort> = Arc::new(mocks::ScriptedDigits::new(digits));
    SuffixPolicy::RandomDigit(digits)
}

/// Resolver over `store` with default slug options.
pub fn resolver_over(store: Arc<mocks::MemoryStore>, policy: SuffixPolicy) -> UniqueSlugResolver {
    let store: Arc<dyn RecordStore> = store;
    enhance_model(store, SlugGenerator::new(SlugOptions::default()), policy)
}

pub fn build_services(store: Arc<mocks::MemoryStore>, policy: SuffixPolicy) -> ApplicationServices {
    let store: Arc<dyn RecordStore> = store;
    let clock: Arc<ClockPort> = Arc::new(mocks::DummyClock);
    ApplicationServices::new(
        store,
        SlugGenerator::new(SlugOptions::default()),
        policy,
        RetryBudget::default(),
        clock,
    )
}
