use crate::application::ports::util::{Clock, DigitSource};
use chrono::{DateTime, Utc};
use rand::Rng;

#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Default, Clone)]
pub struct ThreadRngDigits;

impl DigitSource for ThreadRngDigits {
    fn next_digit(&self) -> u8 {
        rand::thread_rng().gen_range(0..10)
    }
}
