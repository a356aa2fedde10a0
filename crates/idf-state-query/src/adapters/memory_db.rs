use crate::domain::StoreError;
use crate::ports::VersionedStore;
use std::collections::BTreeMap;
use std::sync::RwLock;

type History = Vec<(u64, Vec<u8>)>;

#[derive(Default)]
struct Inner {
    height: u64,
    /// Per key, `(height, value)` in ascending height order.
    versions: BTreeMap<Vec<u8>, History>,
    pending: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Inner {
    fn value_at(&self, key: &[u8], height: u64) -> Option<Vec<u8>> {
        self.versions.get(key).and_then(|history| {
            history
                .iter()
                .rev()
                .find(|(written_at, _)| *written_at <= height)
                .map(|(_, value)| value.clone())
        })
    }
}

/// In-memory implementation of VersionedStore for testing
pub struct InMemoryVersionedStore {
    inner: RwLock<Inner>,
}

impl InMemoryVersionedStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of keys with staged, uncommitted writes.
    pub fn pending_len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.pending.len())
    }
}

impl Default for InMemoryVersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionedStore for InMemoryVersionedStore {
    fn committed_height(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.height)
    }

    fn get_committed(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.value_at(key, inner.height))
    }

    fn get_committed_at(&self, key: &[u8], height: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let height = if height == 0 {
            inner.height
        } else {
            height.min(inner.height)
        };
        Ok(inner.value_at(key, height))
    }

    fn get_pending(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(value) = inner.pending.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(inner.value_at(key, inner.height))
    }

    fn get_pending_at(&self, key: &[u8], height: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        if height == 0 || height > inner.height {
            if let Some(value) = inner.pending.get(key) {
                return Ok(Some(value.clone()));
            }
            return Ok(inner.value_at(key, inner.height));
        }
        Ok(inner.value_at(key, height))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.pending.insert(key.to_vec(), value);
        Ok(())
    }

    fn commit(&self) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let height = inner.height + 1;
        let pending = std::mem::take(&mut inner.pending);
        for (key, value) in pending {
            inner.versions.entry(key).or_default().push((height, value));
        }
        inner.height = height;
        Ok(height)
    }

    fn rollback(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.pending.clear();
        Ok(())
    }
}
