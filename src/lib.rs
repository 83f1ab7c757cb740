//! Unique slug allocation that lets the store's unique index arbitrate.
//!
//! A [`SlugGenerator`](domain::record::SlugGenerator) derives the first
//! candidate from a source field; a
//! [`UniqueSlugResolver`](application::slugs::UniqueSlugResolver) wraps any
//! [`RecordStore`](domain::record::RecordStore) and revises the candidate
//! whenever the store rejects it as a duplicate.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
