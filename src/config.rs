// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

use crate::application::slugs::RetryBudget;
use crate::domain::errors::DomainError;
use crate::domain::record::SlugOptions;

/// Which revision policy the binary should wire. The digit source for the
/// random policy is chosen at wiring time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Sequential,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    max_connections: u32,
    slug_options: SlugOptions,
    policy: PolicyKind,
    retry_budget: RetryBudget,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://slugsmith.db?mode=rwc".into()
}

fn default_max_connections() -> u32 {
    8
}

impl AppConfig {
    /// Build configuration from environment variables. Optional values fall
    /// back to defaults; the collision policy has none and must be named.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        let max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", &lookup, default_max_connections())?;

        let policy = match lookup("SLUG_POLICY")
            .ok_or(ConfigError::Missing("SLUG_POLICY"))?
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "random" => PolicyKind::Random,
            "sequential" => PolicyKind::Sequential,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "SLUG_POLICY must be `random` or `sequential`, got `{other}`"
                )));
            }
        };

        let max_attempts = parse_or("SLUG_MAX_ATTEMPTS", &lookup, RetryBudget::DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid("SLUG_MAX_ATTEMPTS must be at least 1".into()));
        }
        let mut retry_budget = RetryBudget::new(max_attempts);
        if let Some(ms) = lookup("SLUG_MAX_ELAPSED_MS") {
            let ms = ms
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid(format!("SLUG_MAX_ELAPSED_MS: `{ms}` is not a number")))?;
            retry_budget = retry_budget.with_max_elapsed(Duration::from_millis(ms));
        }

        Ok(Self {
            database_url,
            max_connections,
            slug_options: slug_options(&lookup)?,
            policy,
            retry_budget,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn slug_options(&self) -> &SlugOptions {
        &self.slug_options
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn retry_budget(&self) -> RetryBudget {
        self.retry_budget
    }
}

fn slug_options<F>(lookup: &F) -> Result<SlugOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let invalid = |err: DomainError| ConfigError::Invalid(format!("{err}"));
    let mut options = SlugOptions::default();

    if let Some(source) = lookup("SLUG_SOURCE") {
        options = options.source(source.trim()).map_err(invalid)?;
    }
    match lookup("SLUG_OMIT").as_deref() {
        None | Some("") => {}
        Some("quotes") => options = options.omit_quotes(),
        Some(pattern) => options = options.omit(pattern).map_err(invalid)?,
    }
    if let Some(pattern) = lookup("SLUG_DISALLOW") {
        options = options.disallow(&pattern).map_err(invalid)?;
    }
    if let Some(substitute) = lookup("SLUG_SUBSTITUTE") {
        options = options.substitute(substitute);
    }
    if let Some(manual) = lookup("SLUG_MANUAL") {
        options = options.add_slug_manually(manual == "1" || manual.eq_ignore_ascii_case("true"));
    }
    Ok(options)
}

fn parse_or<F, T>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key}: `{raw}` is not a valid number"))),
        None => Ok(default),
    }
}
