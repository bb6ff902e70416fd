//! Double-buffered snapshot hand-off between the simulation thread and
//! readers (a renderer, a recorder).
//!
//! The producer publishes a complete [`FrameSnapshot`] after each frame;
//! readers clone an `Arc` to the latest one and never observe a frame
//! that is still being stepped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::snapshot::FrameSnapshot;

#[derive(Default)]
pub struct SnapshotExchange {
    latest: RwLock<Option<Arc<FrameSnapshot>>>,
    published: AtomicU64,
}

impl SnapshotExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the front buffer with `snapshot`.
    pub fn publish(&self, snapshot: FrameSnapshot) {
        let snapshot = Arc::new(snapshot);
        // Only a panicking writer can poison the lock; the stored Arc is still whole.
        let mut slot = match self.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(snapshot);
        self.published.fetch_add(1, Ordering::Release);
    }

    /// The most recently published frame, if any.
    pub fn latest(&self) -> Option<Arc<FrameSnapshot>> {
        let slot = match self.latest.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.clone()
    }

    /// Number of frames published so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }
}
