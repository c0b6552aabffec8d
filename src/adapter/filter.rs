//! Multicast-filter translation.
//!
//! The stack asks for link-layer group membership in terms of IP group
//! addresses. [`EmacMacFilter`] derives the matching Ethernet group address
//! and forwards it to the driver's [`MulticastGroups`] capability.
//!
//! Removal is accepted and ignored: membership is not reference counted here,
//! so a group the hardware accepts stays accepted until the MAC is reset.
//!
//! [`MulticastGroups`]: crate::driver::MulticastGroups

#[cfg(feature = "igmp")]
use core::net::Ipv4Addr;
#[cfg(feature = "mld")]
use core::net::Ipv6Addr;

use smoltcp::wire::EthernetAddress;

#[cfg(feature = "igmp")]
use crate::constants::{LL_IP4_MULTICAST_GROUP_MASK, LL_IP4_MULTICAST_PREFIX};
#[cfg(feature = "mld")]
use crate::constants::LL_IP6_MULTICAST_PREFIX;
use crate::constants::{MAC_FILTER_ADD, MAC_FILTER_DEL};
use crate::error::{FilterError, Result};
use crate::netif::{MacFilter, Netif};

/// Filter hook action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FilterAction {
    /// Stop accepting the group
    Delete = MAC_FILTER_DEL,
    /// Start accepting the group
    Add = MAC_FILTER_ADD,
}

impl TryFrom<u8> for FilterAction {
    type Error = FilterError;

    fn try_from(code: u8) -> core::result::Result<Self, Self::Error> {
        match code {
            MAC_FILTER_DEL => Ok(FilterAction::Delete),
            MAC_FILTER_ADD => Ok(FilterAction::Add),
            _ => Err(FilterError::InvalidAction),
        }
    }
}

impl From<FilterAction> for u8 {
    fn from(action: FilterAction) -> Self {
        action as u8
    }
}

/// Ethernet group address for an IPv4 multicast group (RFC 1112 §6.4).
///
/// The low 23 bits of the group follow the `01:00:5e` prefix.
#[cfg(feature = "igmp")]
pub fn ipv4_multicast_mac(group: &Ipv4Addr) -> EthernetAddress {
    let low = u32::from(*group) & LL_IP4_MULTICAST_GROUP_MASK;
    let [_, b3, b4, b5] = low.to_be_bytes();
    let [b0, b1, b2] = LL_IP4_MULTICAST_PREFIX;
    EthernetAddress([b0, b1, b2, b3, b4, b5])
}

/// Ethernet group address for an IPv6 multicast group (RFC 2464 §7).
///
/// The last 32 bits of the group follow the `33:33` prefix.
#[cfg(feature = "mld")]
pub fn ipv6_multicast_mac(group: &Ipv6Addr) -> EthernetAddress {
    let octets = group.octets();
    let [b0, b1] = LL_IP6_MULTICAST_PREFIX;
    EthernetAddress([b0, b1, octets[12], octets[13], octets[14], octets[15]])
}

/// The adapter's IGMP and MLD filter hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmacMacFilter;

impl EmacMacFilter {
    fn apply<B>(
        netif: &Netif<'_, B>,
        action: u8,
        group_mac: impl FnOnce() -> EthernetAddress,
    ) -> Result<()> {
        // Without hardware filtering every group is already accepted
        let Some(groups) = netif.driver().multicast() else {
            return Ok(());
        };

        match FilterAction::try_from(action) {
            Ok(FilterAction::Add) => {
                let mac = group_mac();
                #[cfg(feature = "defmt")]
                defmt::debug!("mac filter: add {}", mac);
                groups.add_multicast_group(&mac);
                netif.update_stats(|s| s.filter_adds += 1);
                Ok(())
            }
            Ok(FilterAction::Delete) => Ok(()),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("mac filter: invalid action {=u8}", action);
                Err(e.into())
            }
        }
    }
}

#[cfg(feature = "igmp")]
impl<B> MacFilter<Ipv4Addr, B> for EmacMacFilter {
    fn mac_filter(&self, netif: &Netif<'_, B>, group: &Ipv4Addr, action: u8) -> Result<()> {
        Self::apply(netif, action, || ipv4_multicast_mac(group))
    }
}

#[cfg(feature = "mld")]
impl<B> MacFilter<Ipv6Addr, B> for EmacMacFilter {
    fn mac_filter(&self, netif: &Netif<'_, B>, group: &Ipv6Addr, action: u8) -> Result<()> {
        Self::apply(netif, action, || ipv6_multicast_mac(group))
    }
}
