use crate::domain::errors::{DomainError, UniqueViolation};

const UNIQUE_FAILED_PREFIX: &str = "UNIQUE constraint failed: ";
const INDEX_PREFIX: &str = "records_";
const INDEX_SUFFIX: &str = "_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if db_err.is_unique_violation() {
                return DomainError::UniqueViolation(UniqueViolation::new(
                    violated_fields(message),
                    message,
                ));
            }
            if db_err.is_check_violation() {
                return DomainError::Validation(format!("check constraint violated: {message}"));
            }
            DomainError::Persistence(message.to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Field names from a SQLite uniqueness message. Column constraints read as
/// `records.slug`, expression indexes as `index 'records_email_key'`.
fn violated_fields(message: &str) -> Vec<String> {
    let Some(list) = message.strip_prefix(UNIQUE_FAILED_PREFIX) else {
        return Vec::new();
    };

    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if let Some(index) = entry
                .strip_prefix("index '")
                .and_then(|rest| rest.strip_suffix('\''))
            {
                index
                    .strip_prefix(INDEX_PREFIX)
                    .and_then(|rest| rest.strip_suffix(INDEX_SUFFIX))
                    .unwrap_or(index)
                    .to_string()
            } else {
                entry
                    .rsplit_once('.')
                    .map_or(entry, |(_, column)| column)
                    .to_string()
            }
        })
        .collect()
}
