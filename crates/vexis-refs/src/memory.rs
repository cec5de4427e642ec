use std::sync::RwLock;

use vexis_types::ObjectId;

use crate::error::Result;
use crate::traits::HeadStore;

/// In-memory HEAD for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryHeadStore {
    head: RwLock<Option<ObjectId>>,
}

impl InMemoryHeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeadStore for InMemoryHeadStore {
    fn read_head(&self) -> Result<Option<ObjectId>> {
        Ok(*self.head.read().expect("lock poisoned"))
    }

    fn write_head(&self, id: &ObjectId) -> Result<()> {
        *self.head.write().expect("lock poisoned") = Some(*id);
        Ok(())
    }
}
