use std::sync::Arc;

use crate::domain::record::RecordStore;

pub struct RecordQueryService {
    pub(super) store: Arc<dyn RecordStore>,
}

impl RecordQueryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}
