use {
    crate::domain::submission::{Record, Tracker},
    std::sync::Mutex,
};

/// Keeps the transactions submitted by this process in memory.
#[derive(Debug, Default)]
pub struct InMemory(Mutex<Vec<Record>>);

impl Tracker for InMemory {
    fn add(&self, record: Record) {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }

    fn all(&self) -> Vec<Record> {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
