// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![cfg(test)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod record_store;
pub mod time;
pub mod util;

// 時刻関連
pub use time::fixed_now;

// ユーティリティ関連
pub use util::{DummyClock, ScriptedDigits};

// レコードストア
pub use record_store::MemoryStore;
