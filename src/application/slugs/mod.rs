// src/application/slugs/mod.rs
mod policy;
mod resolver;

pub use policy::{RetryBudget, SuffixPolicy};
pub use resolver::{UniqueSlugResolver, enhance_model};
