use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::value_objects::FieldName;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SOURCE_FIELD: &str = "title";
pub const DEFAULT_SUBSTITUTE: &str = "-";

/// Everything outside lowercase ASCII letters and digits. Accented letters
/// and underscores become separators.
pub const DEFAULT_DISALLOW: &str = "[^a-z0-9]+";

/// Straight and typographic quotes plus backticks.
pub const QUOTE_CLASS: &str = "['\"`\u{2018}\u{2019}\u{201C}\u{201D}]";

static DEFAULT_DISALLOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_DISALLOW).expect("default disallow pattern compiles"));

static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUOTE_CLASS).expect("quote pattern compiles"));

/// Text-transformation rules for slug generation. Built once, never mutated
/// after it is handed to a generator.
#[derive(Debug, Clone)]
pub struct SlugOptions {
    source: FieldName,
    omit: Option<Regex>,
    disallow: Regex,
    substitute: String,
    add_slug_manually: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            source: FieldName::trusted(DEFAULT_SOURCE_FIELD),
            omit: None,
            disallow: DEFAULT_DISALLOW_RE.clone(),
            substitute: DEFAULT_SUBSTITUTE.to_string(),
            add_slug_manually: false,
        }
    }
}

impl SlugOptions {
    pub fn source(mut self, field: impl Into<String>) -> DomainResult<Self> {
        self.source = FieldName::new(field)?;
        Ok(self)
    }

    pub fn omit(mut self, pattern: &str) -> DomainResult<Self> {
        self.omit = Some(compile("omit", pattern)?);
        Ok(self)
    }

    pub fn omit_quotes(mut self) -> Self {
        self.omit = Some(QUOTE_RE.clone());
        self
    }

    pub fn disallow(mut self, pattern: &str) -> DomainResult<Self> {
        self.disallow = compile("disallow", pattern)?;
        Ok(self)
    }

    pub fn substitute(mut self, substitute: impl Into<String>) -> Self {
        self.substitute = substitute.into();
        self
    }

    pub fn add_slug_manually(mut self, manual: bool) -> Self {
        self.add_slug_manually = manual;
        self
    }

    pub fn source_field(&self) -> &FieldName {
        &self.source
    }

    pub fn omit_pattern(&self) -> Option<&Regex> {
        self.omit.as_ref()
    }

    pub fn disallow_pattern(&self) -> &Regex {
        &self.disallow
    }

    pub fn substitute_str(&self) -> &str {
        &self.substitute
    }

    pub fn is_slug_manual(&self) -> bool {
        self.add_slug_manually
    }
}

fn compile(option: &str, pattern: &str) -> DomainResult<Regex> {
    Regex::new(pattern)
        .map_err(|err| DomainError::Validation(format!("invalid {option} pattern: {err}")))
}
