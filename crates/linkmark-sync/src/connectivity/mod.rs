//! Network reachability checks.
//!
//! The [`ConnectivityGate`] is consulted before any operation that needs
//! the network. The platform query behind it is injected through
//! [`NetworkStateProvider`] so the gate itself stays platform neutral.

mod gate;
mod host;
mod provider;

pub use gate::ConnectivityGate;
pub use host::HostNetworkState;
pub use provider::{NetworkCapabilities, NetworkHandle, NetworkStateProvider, Transport};
