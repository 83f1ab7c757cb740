// src/application/commands/records/service.rs
use std::sync::Arc;

use crate::{application::ports::ClockPort, domain::record::RecordStore};

pub struct RecordCommandService {
    pub(super) store: Arc<dyn RecordStore>,
    pub(super) clock: Arc<ClockPort>,
}

impl RecordCommandService {
    /// `store` is expected to be the slug-resolving decorator.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<ClockPort>) -> Self {
        Self { store, clock }
    }
}
