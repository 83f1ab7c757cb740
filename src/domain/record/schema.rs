use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::value_objects::FieldName;

/// Name of the field holding a record's slug.
pub const SLUG_FIELD: &str = "slug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub unique: bool,
}

/// Declared fields of a record type. Stores derive their unique indexes from
/// it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>) -> DomainResult<Self> {
        self.add(FieldSpec {
            name: FieldName::new(name)?,
            unique: false,
        })?;
        Ok(self)
    }

    pub fn with_unique_field(mut self, name: impl Into<String>) -> DomainResult<Self> {
        self.add(FieldSpec {
            name: FieldName::new(name)?,
            unique: true,
        })?;
        Ok(self)
    }

    pub fn add(&mut self, spec: FieldSpec) -> DomainResult<()> {
        if self.declares(spec.name.as_str()) {
            return Err(DomainError::Validation(format!(
                "field `{}` is already declared",
                spec.name
            )));
        }
        self.fields.push(spec);
        Ok(())
    }

    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name.as_str() == name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn unique_fields(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().filter(|f| f.unique).map(|f| &f.name)
    }
}
