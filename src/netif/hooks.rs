//! Capability interfaces injected into the interface handle.
//!
//! The stack calls through these hooks; which implementation sits behind
//! each one is decided at bring-up. The adapter supplies the link output and
//! the multicast filters, the stack supplies its own input dispatch and IP
//! output paths through [`NetStack`].

use super::Netif;
use crate::error::{InputRejected, Result};

#[cfg(feature = "proto-ipv4")]
use core::net::Ipv4Addr;
#[cfg(feature = "proto-ipv6")]
use core::net::Ipv6Addr;

/// Sends a complete link-layer frame.
pub trait LinkOutput<B>: Sync {
    /// Send `buf` on `netif`. The buffer stays owned by the caller.
    fn link_output(&self, netif: &Netif<'_, B>, buf: &B) -> Result<()>;
}

/// Sends an IPv4 packet, resolving the link-layer destination.
#[cfg(feature = "proto-ipv4")]
pub trait Ipv4Output<B>: Sync {
    /// Send `buf` towards `next_hop` on `netif`.
    fn output(&self, netif: &Netif<'_, B>, buf: &B, next_hop: &Ipv4Addr) -> Result<()>;
}

/// Sends an IPv6 packet, resolving the link-layer destination.
#[cfg(feature = "proto-ipv6")]
pub trait Ipv6Output<B>: Sync {
    /// Send `buf` towards `next_hop` on `netif`.
    fn output(&self, netif: &Netif<'_, B>, buf: &B, next_hop: &Ipv6Addr) -> Result<()>;
}

/// Programs the hardware filter for a multicast group of address type `A`.
#[cfg(any(feature = "igmp", feature = "mld"))]
pub trait MacFilter<A, B>: Sync {
    /// Apply `action` (a raw [`FilterAction`](crate::adapter::FilterAction) code) for `group`.
    fn mac_filter(&self, netif: &Netif<'_, B>, group: &A, action: u8) -> Result<()>;
}

/// Network stack services the interface glue consumes.
pub trait NetStack<B>: Sync {
    /// Generic link-layer input dispatch.
    ///
    /// Safe to call from driver context. On success the stack owns the
    /// buffer; on failure it comes back inside [`InputRejected`].
    fn input(&self, netif: &Netif<'_, B>, buf: B) -> core::result::Result<(), InputRejected<B>>;

    /// The stack's ARP-aware IPv4 output path
    #[cfg(feature = "proto-ipv4")]
    fn ipv4_output(&self) -> &dyn Ipv4Output<B>;

    /// The stack's neighbor-discovery-aware IPv6 output path
    #[cfg(feature = "proto-ipv6")]
    fn ipv6_output(&self) -> &dyn Ipv6Output<B>;
}
