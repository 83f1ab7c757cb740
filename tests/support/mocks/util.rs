// tests/support/mocks/util.rs
use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use slugsmith::application::ports::util::{Clock, DigitSource};

#[derive(Clone)]
pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        // Use fixed time for deterministic tests
        super::time::fixed_now()
    }
}

/// 指定した順に数字を返す。尽きたら 0 を返し続ける
pub struct ScriptedDigits {
    digits: Mutex<VecDeque<u8>>,
}

impl ScriptedDigits {
    pub fn new(digits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            digits: Mutex::new(digits.into_iter().collect()),
        }
    }
}

impl DigitSource for ScriptedDigits {
    fn next_digit(&self) -> u8 {
        self.digits.lock().unwrap().pop_front().unwrap_or(0)
    }
}
