//! Connectivity gate.

use std::sync::Arc;

use tracing::trace;

use super::NetworkStateProvider;
use crate::error::SyncError;

/// Answers whether the device can currently reach the network.
///
/// The gate holds an optional platform provider. Without one, or when the
/// platform reports no usable network, the device counts as offline. Every
/// call queries the provider again; nothing is cached.
///
/// # Example
///
/// ```
/// use linkmark_sync::ConnectivityGate;
///
/// let gate = ConnectivityGate::unavailable();
/// assert!(!gate.is_connected());
/// ```
#[derive(Clone, Default)]
pub struct ConnectivityGate {
    provider: Option<Arc<dyn NetworkStateProvider>>,
}

impl ConnectivityGate {
    /// Creates a gate over an optional platform provider.
    pub fn new(provider: Option<Arc<dyn NetworkStateProvider>>) -> Self {
        Self { provider }
    }

    /// Creates a gate over the given provider.
    pub fn with_provider(provider: Arc<dyn NetworkStateProvider>) -> Self {
        Self::new(Some(provider))
    }

    /// Creates a gate with no platform provider. It always reports offline.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    /// Returns true only if an active network with internet access exists.
    pub fn is_connected(&self) -> bool {
        let Some(provider) = &self.provider else {
            trace!("No network state provider, reporting offline");
            return false;
        };

        let Some(network) = provider.active_network() else {
            trace!("No active network");
            return false;
        };

        match provider.capabilities(&network) {
            Some(capabilities) => capabilities.has_internet(),
            None => {
                trace!("No capabilities for network {}", network.name);
                false
            },
        }
    }

    /// Returns `SyncError::Offline` unless [`is_connected`](Self::is_connected) holds.
    pub fn ensure_connected(&self) -> Result<(), SyncError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(SyncError::Offline)
        }
    }
}

impl std::fmt::Debug for ConnectivityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityGate")
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}
