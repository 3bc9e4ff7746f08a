//! Platform network-state collaborator.

/// Identifies a network reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkHandle {
    /// Platform index of the network interface.
    pub index: u32,
    /// Human readable interface name.
    pub name: String,
}

impl NetworkHandle {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Kind of link carrying a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Cellular,
    Wifi,
    Ethernet,
    Vpn,
    Other,
}

/// What a network is able to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkCapabilities {
    internet: bool,
    transports: Vec<Transport>,
}

impl NetworkCapabilities {
    /// Capabilities of a network that can reach the internet.
    pub fn internet(transports: Vec<Transport>) -> Self {
        Self {
            internet: true,
            transports,
        }
    }

    /// Capabilities of a network without internet access.
    pub fn local_only(transports: Vec<Transport>) -> Self {
        Self {
            internet: false,
            transports,
        }
    }

    /// Returns true if the network can reach the internet.
    pub fn has_internet(&self) -> bool {
        self.internet
    }

    /// Returns the transports backing this network.
    pub fn transports(&self) -> &[Transport] {
        &self.transports
    }

    /// Returns true if the network uses the given transport.
    pub fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }
}

/// Source of the device's current network state.
///
/// Implementations must answer from live platform state on every call.
pub trait NetworkStateProvider: Send + Sync {
    /// Returns the network currently used for outgoing traffic, if any.
    fn active_network(&self) -> Option<NetworkHandle>;

    /// Returns the capabilities of `network`, if the platform knows them.
    fn capabilities(&self, network: &NetworkHandle) -> Option<NetworkCapabilities>;
}
