//! Cooperative cancellation.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag.
///
/// Once raised, pipelines stop starting new work. Work already in progress
/// is left to finish (or to time out).
#[derive(Debug, Clone, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::Cancel;

    #[test]
    fn clones_share_state() {
        let c = Cancel::default();
        let c2 = c.clone();
        assert!(!c2.is_cancelled());
        c.cancel();
        assert!(c2.is_cancelled());
    }
}
