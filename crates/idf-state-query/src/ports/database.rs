//! Storage ports and typed store views.
//!
//! The committed/working distinction is carried by the view type. Query code
//! only ever receives a [`CommittedView`], so it cannot observe pending
//! writes.

use crate::domain::StoreError;

/// Versioned key-value ledger.
///
/// Absent keys return `Ok(None)`, never an error. Heights of `None` or `0`
/// mean the latest committed block.
pub trait VersionedStore: Send + Sync {
    /// Height of the last finalized block (0 before the first commit).
    fn committed_height(&self) -> Result<u64, StoreError>;

    /// Value as of the last finalized block.
    fn get_committed(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Value as it existed at `height`.
    fn get_committed_at(&self, key: &[u8], height: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Pending writes overlaid on the last finalized block.
    fn get_pending(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Like [`get_committed_at`](Self::get_committed_at), but a height past
    /// the committed tip also sees pending writes.
    fn get_pending_at(&self, key: &[u8], height: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stage a write. Visible to committed reads only after [`commit`](Self::commit).
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;

    /// Finalize pending writes as a new block and return its height.
    fn commit(&self) -> Result<u64, StoreError>;

    /// Discard pending writes.
    fn rollback(&self) -> Result<(), StoreError>;
}

/// Read access shared by both views.
pub trait StateReader {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Height the view reads at.
    fn height(&self) -> Result<u64, StoreError>;
}

/// Write access, only available on the working view.
pub trait StateWriter: StateReader {
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;
}

/// Read-only view of finalized state, optionally pinned to a height.
pub struct CommittedView<'a, S: VersionedStore + ?Sized> {
    store: &'a S,
    height: Option<u64>,
}

impl<'a, S: VersionedStore + ?Sized> CommittedView<'a, S> {
    pub fn latest(store: &'a S) -> Self {
        Self {
            store,
            height: None,
        }
    }

    /// Pin reads to `height`. `0` behaves like [`latest`](Self::latest).
    pub fn at(store: &'a S, height: u64) -> Self {
        Self {
            store,
            height: (height > 0).then_some(height),
        }
    }

    /// Same store, different height.
    pub fn with_height(&self, height: Option<u64>) -> Self {
        Self {
            store: self.store,
            height: height.filter(|h| *h > 0),
        }
    }
}

impl<S: VersionedStore + ?Sized> StateReader for CommittedView<'_, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.height {
            Some(height) => self.store.get_committed_at(key, height),
            None => self.store.get_committed(key),
        }
    }

    fn height(&self) -> Result<u64, StoreError> {
        match self.height {
            Some(height) => Ok(height),
            None => self.store.committed_height(),
        }
    }
}

/// Read-write view for mutations: sees its own pending writes.
pub struct WorkingView<'a, S: VersionedStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: VersionedStore + ?Sized> WorkingView<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: VersionedStore + ?Sized> StateReader for WorkingView<'_, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.store.get_pending(key)
    }

    fn height(&self) -> Result<u64, StoreError> {
        Ok(self.store.committed_height()? + 1)
    }
}

impl<S: VersionedStore + ?Sized> StateWriter for WorkingView<'_, S> {
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        self.store.set(key, value)
    }
}
