//! EMAC Interface Adapter
//!
//! Glue between a MAC driver's [`EmacOps`](crate::driver::EmacOps) table and a
//! stack-owned [`Netif`](crate::netif::Netif).
//!
//! - [`emac_netif_init`] - one-shot bring-up sequence
//! - [`EmacLinkOutput`] - outbound frames, stack context to driver
//! - `LinkInput` / `LinkStateChange` for `Netif` - inbound frames and link
//!   events, driver context to stack
//! - [`EmacMacFilter`] - IGMP/MLD group requests to driver group registration
//!
//! # Example
//!
//! ```ignore
//! use ph_emac_netif::adapter::emac_netif_init;
//! use ph_emac_netif::netif::Netif;
//! use ph_emac_netif::sync::StackMailbox;
//!
//! static MAILBOX: StackMailbox = StackMailbox::new();
//!
//! let netif = Netif::new(&emac, &stack, &MAILBOX);
//! emac_netif_init(&netif)?;
//! ```

#[cfg(any(feature = "igmp", feature = "mld"))]
mod filter;
mod init;
mod link;

#[cfg(feature = "igmp")]
pub use filter::ipv4_multicast_mac;
#[cfg(feature = "mld")]
pub use filter::ipv6_multicast_mac;
#[cfg(any(feature = "igmp", feature = "mld"))]
pub use filter::{EmacMacFilter, FilterAction};
pub use init::{emac_netif_init, emac_netif_shutdown};
pub use link::EmacLinkOutput;
