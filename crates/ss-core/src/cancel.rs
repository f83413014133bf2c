use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation token for a streaming session.
///
/// Cloneable and `Send + Sync`: one clone goes to the signal handler, one
/// stays with the pacing loop, which polls it at iteration boundaries only
/// (an in-flight frame always completes). Replaces the usual global
/// stop flag so independent sessions in one process stay independent.
///
/// # Example
/// ```
/// use ss_core::cancel::CancelToken;
/// let token = CancelToken::new();
/// assert!(!token.is_stopped());
/// token.request_stop();
/// token.request_stop(); // idempotent
/// assert!(token.is_stopped());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Demande l'arrêt. Idempotent: ne fait que running → stopped.
    #[inline]
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// `true` une fois l'arrêt demandé.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let handler_side = token.clone();
        assert!(!token.is_stopped());
        handler_side.request_stop();
        assert!(token.is_stopped());
    }
}
