use crate::storage::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}
