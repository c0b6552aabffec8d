//! Interface capability flags, hardware address and counters.

use bitflags::bitflags;

use crate::constants::NETIF_MAX_HWADDR_LEN;
use crate::error::{ConfigError, ConfigResult};

bitflags! {
    /// Interface capability and state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NetifFlags: u8 {
        /// Administratively up
        const UP        = 0x01;
        /// Broadcast capable
        const BROADCAST = 0x02;
        /// Physical link is up
        const LINK_UP   = 0x04;
        /// Resolves IPv4 neighbors with ARP
        const ETHARP    = 0x08;
        /// Ethernet framing
        const ETHERNET  = 0x10;
        /// IGMP group filtering available
        const IGMP      = 0x20;
        /// MLD group filtering available
        const MLD6      = 0x40;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetifFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "NetifFlags({=u8:#x})", self.bits());
    }
}

/// Hardware address as stored in the interface handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwAddr {
    bytes: [u8; NETIF_MAX_HWADDR_LEN],
    len: u8,
}

impl HwAddr {
    /// An address with no significant bytes
    pub const EMPTY: Self = Self {
        bytes: [0; NETIF_MAX_HWADDR_LEN],
        len: 0,
    };

    /// Build from a byte slice no longer than [`NETIF_MAX_HWADDR_LEN`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::HwAddrTooLong`] if `addr` does not fit.
    pub fn from_slice(addr: &[u8]) -> ConfigResult<Self> {
        if addr.len() > NETIF_MAX_HWADDR_LEN {
            return Err(ConfigError::HwAddrTooLong);
        }
        let mut bytes = [0u8; NETIF_MAX_HWADDR_LEN];
        bytes[..addr.len()].copy_from_slice(addr);
        Ok(Self {
            bytes,
            len: addr.len() as u8,
        })
    }

    /// The significant address bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of significant bytes
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True if no address has been set
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Per-interface counters kept by the adapter paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetifStats {
    /// Frames accepted by the driver for transmission
    pub tx_frames: u32,
    /// Frames the driver refused
    pub tx_errors: u32,
    /// Received frames accepted by stack dispatch
    pub rx_frames: u32,
    /// Received frames refused by stack dispatch and released
    pub rx_dropped: u32,
    /// Effective link up/down transitions
    pub link_transitions: u32,
    /// Multicast groups handed to the driver
    pub filter_adds: u32,
}
