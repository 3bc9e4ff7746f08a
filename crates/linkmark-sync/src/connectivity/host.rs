//! Network state of the host machine.

use netdev::interface::InterfaceType;
use tracing::debug;

use super::{NetworkCapabilities, NetworkHandle, NetworkStateProvider, Transport};

/// Reads network state from the host's interfaces.
///
/// The active network is the default route interface. It has internet
/// access when it is up, has an address and has a gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostNetworkState;

impl HostNetworkState {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkStateProvider for HostNetworkState {
    fn active_network(&self) -> Option<NetworkHandle> {
        match netdev::get_default_interface() {
            Ok(iface) => Some(NetworkHandle::new(
                iface.index,
                iface.friendly_name.unwrap_or(iface.name),
            )),
            Err(e) => {
                debug!("No default interface: {}", e);
                None
            },
        }
    }

    fn capabilities(&self, network: &NetworkHandle) -> Option<NetworkCapabilities> {
        let iface = netdev::get_interfaces()
            .into_iter()
            .find(|iface| iface.index == network.index)?;

        let transport = match iface.if_type {
            InterfaceType::Ethernet => Transport::Ethernet,
            InterfaceType::Wireless80211 => Transport::Wifi,
            InterfaceType::Tunnel => Transport::Vpn,
            _ => Transport::Other,
        };

        let reachable = iface.is_up()
            && !iface.is_loopback()
            && (!iface.ipv4.is_empty() || !iface.ipv6.is_empty())
            && iface.gateway.is_some();

        Some(if reachable {
            NetworkCapabilities::internet(vec![transport])
        } else {
            NetworkCapabilities::local_only(vec![transport])
        })
    }
}
