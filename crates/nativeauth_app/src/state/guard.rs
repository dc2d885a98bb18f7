use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-use marker shared by a continuation state and its clones. The first
/// operation on the state wins; every later one sees the state as spent.
#[derive(Clone, Debug, Default)]
pub(crate) struct FlowGuard(Arc<AtomicBool>);

impl FlowGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the state was already used.
    pub fn consume(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}
