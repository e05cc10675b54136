//! Lock-free address → locality directory, the cross-thread resolution path.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::locality::Locality;
use crate::util::Address;

/// Maps an [`Address`] to the [`Locality`] handle that owns it.
///
/// This is the only structure touched from more than one thread without
/// going through a locality's own queue lock (spec ยง5): looking a locality
/// up here never blocks on that locality's `do_process`, because `DashMap`
/// shards its internal locking independently of any one entry.
#[derive(Default)]
pub struct LocalityDirectory {
    localities: DashMap<Address, Arc<Locality>>,
}

impl LocalityDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `address` is owned by `locality`.
    pub fn register(&self, address: Address, locality: Arc<Locality>) {
        self.localities.insert(address, locality);
    }

    /// Remove the directory entry for `address`.
    pub fn unregister(&self, address: Address) {
        self.localities.remove(&address);
    }

    /// Resolve `address` to its owning locality handle, if still registered.
    pub fn resolve(&self, address: Address) -> Option<Arc<Locality>> {
        self.localities.get(&address).map(|entry| Arc::clone(entry.value()))
    }
}
