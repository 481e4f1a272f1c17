//! Component lifetime
//!
//! A [`Mount`] lives as long as the host component that owns a loader.
//! Fetches are raced against it so results that arrive after unmount are
//! dropped instead of being written into dead state.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Mount handle shared between a host component and its loaders
#[derive(Debug, Clone, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the component as unmounted; pending guarded futures resolve to `None`
    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Run `fut` unless the component unmounts first
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => {
                if self.is_mounted() {
                    Some(out)
                } else {
                    None
                }
            }
        }
    }
}
