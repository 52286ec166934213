//! Single-slot "run in progress" flag.
//!
//! The caller owns a `RunSlot` and acquires it before dispatching a run. The
//! returned guard clears the flag when dropped, which `Pipeline::spawn` does
//! once the run reaches a terminal state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::PipelineError;

#[derive(Debug, Clone, Default)]
pub struct RunSlot {
    in_progress: Arc<AtomicBool>,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Claim the slot, failing with `RunInProgress` if a run holds it.
    pub fn try_acquire(&self) -> Result<RunGuard, PipelineError> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PipelineError::RunInProgress)?;
        Ok(RunGuard {
            in_progress: Arc::clone(&self.in_progress),
        })
    }
}

/// Proof that the slot is held; releases it on drop.
#[derive(Debug)]
pub struct RunGuard {
    in_progress: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.in_progress.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_free() {
        assert!(!RunSlot::new().is_running());
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let slot = RunSlot::new();
        let guard = slot.try_acquire().unwrap();
        assert!(slot.is_running());
        assert!(matches!(slot.try_acquire(), Err(PipelineError::RunInProgress)));
        drop(guard);
        assert!(!slot.is_running());
        assert!(slot.try_acquire().is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let slot = RunSlot::new();
        let other = slot.clone();
        let _guard = slot.try_acquire().unwrap();
        assert!(other.is_running());
    }
}
