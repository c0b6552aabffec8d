//! EMAC Network Interface Glue
//!
//! A `no_std`, `no_alloc` adapter that binds an Ethernet MAC driver to a
//! network stack's interface object.
//!
//! The driver side is asynchronous and callback driven: frames and link
//! events arrive from interrupts or a driver-owned worker. The stack side is a
//! single serialized context that owns all interface state. This crate
//! translates between the two without breaking either contract.
//!
//! # Architecture
//!
//! 1. **Driver contract** ([`driver`]): the [`EmacOps`] operation table a MAC
//!    driver implements, plus the callbacks it invokes
//! 2. **Interface handle** ([`netif`]): the stack-owned [`Netif`] with its
//!    properties, flags, counters and injected hooks
//! 3. **Adapter** ([`adapter`]): bring-up, transmit/receive/link-state
//!    marshaling and multicast filter translation
//! 4. **Sync** ([`sync`]): critical-section cells and the blocking
//!    cross-context handoff ([`StackMailbox`])
//!
//! ## Data Flow
//!
//! - Outbound: stack → [`EmacLinkOutput`] → `EmacOps::link_out`
//! - Inbound: driver → `LinkInput` for [`Netif`] → stack dispatch
//! - Link state: driver → `LinkStateChange` for [`Netif`] → [`StackContext`]
//!   → `Netif::set_link_up` / `Netif::set_link_down`
//! - Multicast: stack → [`EmacMacFilter`] → `MulticastGroups::add_multicast_group`
//!
//! # Features
//!
//! - `proto-ipv4` (default): Bind the IPv4 output path
//! - `igmp` (default): Bind the IGMP filter hook
//! - `proto-ipv6` (default): Bind the IPv6 output path
//! - `mld` (default): Bind the MLD filter hook (required by `proto-ipv6`)
//! - `async`: Wake an async stack runner when link work is queued
//! - `defmt`: Enable defmt logging and formatting for public types
//!
//! # Example
//!
//! ```ignore
//! use ph_emac_netif::{Netif, StackMailbox, emac_netif_init};
//!
//! static MAILBOX: StackMailbox = StackMailbox::new();
//!
//! // `emac` implements EmacOps, `stack` implements NetStack
//! let netif = Netif::new(&emac, &stack, &MAILBOX);
//! emac_netif_init(&netif)?;
//! netif.set_up();
//!
//! loop {
//!     MAILBOX.service();
//!     stack.poll(&netif);
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

#[cfg(all(feature = "proto-ipv6", not(feature = "mld")))]
compile_error!(
    "Feature 'proto-ipv6' requires 'mld': IPv6 multicast reception needs the MLD filter hook."
);

#[cfg(not(any(feature = "proto-ipv4", feature = "proto-ipv6")))]
compile_error!("At least one of 'proto-ipv4' or 'proto-ipv6' must be enabled.");

// =============================================================================
// Modules
// =============================================================================

pub mod adapter;
pub mod buffer;
pub mod constants;
pub mod driver;
pub mod error;
pub mod netif;
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

#[cfg(any(feature = "igmp", feature = "mld"))]
pub use adapter::{EmacMacFilter, FilterAction};
pub use adapter::{EmacLinkOutput, emac_netif_init, emac_netif_shutdown};
pub use buffer::PacketBuffer;
pub use driver::{EmacOps, LinkInput, LinkStateChange, MulticastGroups};
pub use error::{
    ConfigError, ConfigResult, Error, FilterError, InputRejected, IoError, RejectReason, Result,
};
pub use netif::{HwAddr, NetStack, Netif, NetifFlags, NetifStats};
pub use sync::{InlineContext, StackContext, StackMailbox};
