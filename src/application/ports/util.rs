// src/application/ports/util.rs
use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the digits appended by the random-suffix policy. Values above 9
/// are reduced modulo 10.
pub trait DigitSource: Send + Sync {
    fn next_digit(&self) -> u8;
}
