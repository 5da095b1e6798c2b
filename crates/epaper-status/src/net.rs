//! Local address probing.
//!
//! Primary strategy: enumerate every interface address (IPv4 and IPv6),
//! drop loopback, format as `"<iface>: <address>"`. When enumeration
//! fails, ask the OS which source address it would use to reach a public
//! host and show that as `"primary: <address>"`. The fallback connects a
//! UDP socket, which selects a route without sending a packet.
//!
//! Probing never fails: the worst case is an empty [`AddressList`].

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use ui::AddressList;

/// Well-known public address used only to pick a route.
pub const ROUTE_PROBE_TARGET: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Address family of an interface entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4
    Inet,
    /// IPv6
    Inet6,
}

/// One address assigned to one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// Interface name, e.g. `eth0`
    pub name: String,
    /// Address family
    pub family: AddressFamily,
    /// Address, optionally with a `/prefix` suffix
    pub address: String,
}

impl InterfaceAddress {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, family: AddressFamily, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family,
            address: address.into(),
        }
    }

    /// `"<iface>: <address>"`, or `None` for loopback and unparsable entries.
    pub fn display_line(&self) -> Option<String> {
        let bare = self.address.split('/').next().unwrap_or_default().trim();
        let ip: IpAddr = bare.parse().ok()?;
        if is_loopback(ip) {
            return None;
        }
        Some(format!("{}: {ip}", self.name))
    }
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback())
        }
    }
}

/// Probe errors
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Interface list unavailable
    #[error("interface enumeration failed: {0}")]
    Enumerate(#[source] io::Error),
    /// No route to the probe target
    #[error("primary route lookup failed: {0}")]
    Route(#[source] io::Error),
}

/// Primary strategy: list interface addresses.
pub trait InterfaceSource {
    /// Every `(interface, family, address)` the OS reports.
    fn interfaces(&self) -> Result<Vec<InterfaceAddress>, ProbeError>;
}

/// Fallback strategy: the source address of the default route.
pub trait RouteSource {
    /// Local address the OS would use for outbound traffic.
    fn primary_address(&self) -> Result<IpAddr, ProbeError>;
}

/// Something that produces the address lines for one tick.
pub trait AddressSource {
    /// Current address lines, at most three.
    fn probe(&self) -> AddressList;
}

/// Interface enumeration through `getifaddrs(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceAddress>, ProbeError> {
        let interfaces = get_if_addrs::get_if_addrs().map_err(ProbeError::Enumerate)?;
        Ok(interfaces
            .into_iter()
            .map(|iface| {
                let ip = iface.ip();
                let family = if ip.is_ipv4() {
                    AddressFamily::Inet
                } else {
                    AddressFamily::Inet6
                };
                InterfaceAddress {
                    name: iface.name,
                    family,
                    address: ip.to_string(),
                }
            })
            .collect())
    }
}

/// Route lookup via a connected, never-written UDP socket.
#[derive(Debug, Clone, Copy)]
pub struct UdpRoute {
    target: SocketAddr,
}

impl Default for UdpRoute {
    fn default() -> Self {
        Self::new(ROUTE_PROBE_TARGET)
    }
}

impl UdpRoute {
    /// Route lookup towards `target`.
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }
}

impl RouteSource for UdpRoute {
    fn primary_address(&self) -> Result<IpAddr, ProbeError> {
        let bind: SocketAddr = match self.target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(bind).map_err(ProbeError::Route)?;
        socket.connect(self.target).map_err(ProbeError::Route)?;
        let local = socket.local_addr().map_err(ProbeError::Route)?;
        Ok(local.ip())
    }
}

/// Address probe with a primary and a fallback strategy.
#[derive(Debug, Clone, Default)]
pub struct AddressProbe<I = SystemInterfaces, R = UdpRoute> {
    interfaces: I,
    route: R,
}

impl AddressProbe {
    /// Probe backed by the host's network stack.
    pub fn system() -> Self {
        Self::default()
    }
}

impl<I: InterfaceSource, R: RouteSource> AddressProbe<I, R> {
    /// Probe with explicit strategies.
    pub fn new(interfaces: I, route: R) -> Self {
        Self { interfaces, route }
    }

    fn candidates(&self) -> Vec<String> {
        match self.interfaces.interfaces() {
            Ok(entries) => entries
                .iter()
                .filter_map(InterfaceAddress::display_line)
                .collect(),
            Err(err) => {
                tracing::debug!(%err, "falling back to primary route lookup");
                match self.route.primary_address() {
                    Ok(ip) if !is_loopback(ip) && !ip.is_unspecified() => {
                        vec![format!("primary: {ip}")]
                    }
                    Ok(ip) => {
                        tracing::debug!(%ip, "primary route has no usable address");
                        Vec::new()
                    }
                    Err(err) => {
                        tracing::debug!(%err, "no addresses available");
                        Vec::new()
                    }
                }
            }
        }
    }
}

impl<I: InterfaceSource, R: RouteSource> AddressSource for AddressProbe<I, R> {
    fn probe(&self) -> AddressList {
        AddressList::from_candidates(self.candidates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listed(Vec<InterfaceAddress>);

    impl InterfaceSource for Listed {
        fn interfaces(&self) -> Result<Vec<InterfaceAddress>, ProbeError> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl InterfaceSource for Broken {
        fn interfaces(&self) -> Result<Vec<InterfaceAddress>, ProbeError> {
            Err(ProbeError::Enumerate(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    impl RouteSource for Broken {
        fn primary_address(&self) -> Result<IpAddr, ProbeError> {
            Err(ProbeError::Route(io::Error::new(
                io::ErrorKind::NetworkUnreachable,
                "unreachable",
            )))
        }
    }

    struct Fixed(IpAddr);

    impl RouteSource for Fixed {
        fn primary_address(&self) -> Result<IpAddr, ProbeError> {
            Ok(self.0)
        }
    }

    fn inet(name: &str, address: &str) -> InterfaceAddress {
        InterfaceAddress::new(name, AddressFamily::Inet, address)
    }

    #[test]
    fn test_loopback_filtered_and_prefix_stripped() {
        let probe = AddressProbe::new(
            Listed(vec![inet("eth0", "192.168.1.10/24"), inet("lo", "127.0.0.1/8")]),
            Broken,
        );
        assert_eq!(probe.probe().as_slice(), ["eth0: 192.168.1.10"]);
    }

    #[test]
    fn test_ipv6_entries_kept_except_loopback() {
        let probe = AddressProbe::new(
            Listed(vec![
                InterfaceAddress::new("lo", AddressFamily::Inet6, "::1/128"),
                InterfaceAddress::new("wlan0", AddressFamily::Inet6, "fe80::1/64"),
                InterfaceAddress::new("lo", AddressFamily::Inet6, "::ffff:127.0.0.1"),
            ]),
            Broken,
        );
        assert_eq!(probe.probe().as_slice(), ["wlan0: fe80::1"]);
    }

    #[test]
    fn test_duplicates_removed_and_capped() {
        let probe = AddressProbe::new(
            Listed(vec![
                inet("eth0", "10.0.0.1"),
                inet("eth0", "10.0.0.1/8"),
                inet("eth1", "10.0.0.2"),
                inet("eth2", "10.0.0.3"),
                inet("eth3", "10.0.0.4"),
            ]),
            Broken,
        );
        assert_eq!(
            probe.probe().as_slice(),
            ["eth0: 10.0.0.1", "eth1: 10.0.0.2", "eth2: 10.0.0.3"]
        );
    }

    #[test]
    fn test_fallback_to_primary_route() {
        let probe = AddressProbe::new(Broken, Fixed(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 7))));
        assert_eq!(probe.probe().as_slice(), ["primary: 192.168.0.7"]);
    }

    #[test]
    fn test_loopback_route_is_ignored() {
        let probe = AddressProbe::new(Broken, Fixed(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert!(probe.probe().is_empty());
    }

    #[test]
    fn test_both_strategies_fail() {
        let probe = AddressProbe::new(Broken, Broken);
        assert!(probe.probe().is_empty());
    }

    #[test]
    fn test_successful_empty_enumeration_does_not_fall_back() {
        let probe = AddressProbe::new(
            Listed(vec![inet("lo", "127.0.0.1/8")]),
            Fixed(IpAddr::V4(Ipv4Addr::new(10, 1, 1, 1))),
        );
        assert!(probe.probe().is_empty());
    }

    #[test]
    fn test_unparsable_address_dropped() {
        assert_eq!(inet("eth0", "not-an-ip").display_line(), None);
    }
}
