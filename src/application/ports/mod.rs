// src/application/ports/mod.rs
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn util::Clock;
pub type DigitSourcePort = dyn util::DigitSource;
