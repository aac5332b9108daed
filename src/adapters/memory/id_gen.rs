//! Predictable ID sequence.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::IdGenerator;

/// Yields `id-0`, `id-1`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn generate_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}
