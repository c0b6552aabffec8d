//! Interface bring-up and shutdown.

#[cfg(any(feature = "igmp", feature = "mld"))]
use super::EmacMacFilter;
use super::EmacLinkOutput;
use crate::buffer::PacketBuffer;
use crate::constants::{NETIF_MAX_HWADDR_LEN, NETIF_NAME_LEN};
use crate::error::{ConfigError, IoError, Result};
use crate::netif::{Netif, NetifFlags};

/// Wire `netif` to its driver and bring the MAC up.
///
/// Call once, before the interface is reachable from the stack. The driver
/// callbacks are registered first so no event raised during power-up is lost.
///
/// Order:
/// 1. register the input and link-state callbacks, with `netif` as context
/// 2. copy the hardware address
/// 3. copy the MTU
/// 4. set `BROADCAST`, `ETHARP` and `ETHERNET`
/// 5. copy the interface name
/// 6. bind the IPv4 output path, then the IGMP filter (sets `IGMP`)
/// 7. bind the IPv6 output path, then the MLD filter (sets `MLD6`)
/// 8. bind the link output hook
/// 9. power the MAC up
///
/// # Errors
///
/// - `HwAddrTooLong` if the driver's address does not fit; steps after 1 are
///   skipped
/// - `PowerUpFailed` if the driver fails to power up; everything before is
///   left wired, nothing is rolled back
pub fn emac_netif_init<'a, B: PacketBuffer + 'a>(netif: &'a Netif<'a, B>) -> Result<()> {
    let driver = netif.driver();

    driver.set_link_input_cb(netif);
    driver.set_link_state_cb(netif);

    let len = driver.hwaddr_size();
    if len > NETIF_MAX_HWADDR_LEN {
        #[cfg(feature = "defmt")]
        defmt::warn!("netif init: hwaddr length {} exceeds {}", len, NETIF_MAX_HWADDR_LEN);
        return Err(ConfigError::HwAddrTooLong.into());
    }
    let mut hwaddr = [0u8; NETIF_MAX_HWADDR_LEN];
    driver.hwaddr(&mut hwaddr[..len]);
    netif.set_hwaddr(&hwaddr[..len])?;

    netif.set_mtu(driver.mtu_size());

    netif.insert_flags(NetifFlags::BROADCAST | NetifFlags::ETHARP | NetifFlags::ETHERNET);

    let mut name = [0u8; NETIF_NAME_LEN];
    driver.ifname(&mut name);
    netif.set_name(name);

    #[cfg(feature = "proto-ipv4")]
    {
        netif.set_ipv4_output(Some(netif.stack().ipv4_output()));
        #[cfg(feature = "igmp")]
        {
            netif.set_igmp_mac_filter(Some(&EmacMacFilter));
            netif.insert_flags(NetifFlags::IGMP);
        }
    }

    #[cfg(feature = "proto-ipv6")]
    {
        netif.set_ipv6_output(Some(netif.stack().ipv6_output()));
        #[cfg(feature = "mld")]
        {
            netif.set_mld_mac_filter(Some(&EmacMacFilter));
            netif.insert_flags(NetifFlags::MLD6);
        }
    }

    netif.set_link_output(Some(&EmacLinkOutput));

    #[cfg(feature = "defmt")]
    defmt::info!(
        "netif init: hwaddr {=[u8]:x} mtu {} name {=[u8]:a}",
        netif.hwaddr().as_bytes(),
        netif.mtu(),
        &name[..]
    );

    if !driver.power_up() {
        #[cfg(feature = "defmt")]
        defmt::warn!("netif init: driver power-up failed");
        return Err(IoError::PowerUpFailed.into());
    }

    Ok(())
}

/// Take the interface down and power the MAC off.
///
/// Link and admin state are cleared through the stack context, so this must
/// be called from outside it (or with an inline context). Hooks stay bound;
/// bring the interface back with a fresh [`emac_netif_init`].
pub fn emac_netif_shutdown<B>(netif: &Netif<'_, B>) {
    netif.context().call_blocking(&mut || {
        netif.set_link_down();
        netif.set_down();
    });
    netif.driver().power_down();

    #[cfg(feature = "defmt")]
    defmt::info!("netif shutdown");
}
