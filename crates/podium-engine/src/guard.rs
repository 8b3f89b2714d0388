//! Per-pair in-flight request guard.
//!
//! The store's uniqueness constraint would reject a duplicated insert on its
//! own, but only after a wasted round trip, and a revoke racing a cast can
//! interleave in surprising ways. The guard closes that gap on the caller
//! side: while one write for a `(project_id, voter)` pair is outstanding, a
//! second one is rejected rather than fired concurrently.

use std::collections::HashSet;
use std::sync::Mutex;

use podium_types::address::Address;

use crate::{EngineError, Result};

/// The set of `(project_id, voter)` pairs with a write in flight.
#[derive(Default)]
pub struct PendingVotes {
    inner: Mutex<HashSet<(i64, Address)>>,
}

impl PendingVotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as in flight. Fails with [`EngineError::OperationPending`]
    /// if it already is. The returned guard releases the pair when dropped,
    /// whether the operation settled in success or failure.
    pub fn begin(&self, project_id: i64, voter: &Address) -> Result<PendingGuard<'_>> {
        let mut set = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if !set.insert((project_id, voter.clone())) {
            return Err(EngineError::OperationPending {
                project_id,
                voter: voter.to_string(),
            });
        }
        Ok(PendingGuard {
            set: &self.inner,
            key: (project_id, voter.clone()),
        })
    }
}

/// Releases its pair on drop.
pub struct PendingGuard<'a> {
    set: &'a Mutex<HashSet<(i64, Address)>>,
    key: (i64, Address),
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut set = self
            .set
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        set.remove(&self.key);
    }
}
