//! Centralized Constants
//!
//! This module provides a single source of truth for the fixed sizes, prefixes
//! and codes used throughout the interface glue.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Interface handle**: fixed capacities of the stack's interface object
//! - **Frame sizes**: Ethernet address dimensions
//! - **Multicast**: link-layer multicast prefixes (RFC 1112, RFC 2464)
//! - **Filter actions**: raw action codes passed to the filter hooks

// =============================================================================
// Interface Handle
// =============================================================================

/// Capacity of the interface's hardware address field in bytes
pub const NETIF_MAX_HWADDR_LEN: usize = 6;

/// Length of the short interface name (two-character convention, e.g. `en`)
pub const NETIF_NAME_LEN: usize = 2;

// =============================================================================
// Frame Sizes
// =============================================================================

/// Ethernet MAC address length
pub const ETH_ADDR_LEN: usize = 6;

// =============================================================================
// Multicast
// =============================================================================

/// Link-layer prefix for IPv4 multicast groups (`01:00:5e`)
pub const LL_IP4_MULTICAST_PREFIX: [u8; 3] = [0x01, 0x00, 0x5e];

/// Mask selecting the low 23 bits of an IPv4 group address
pub const LL_IP4_MULTICAST_GROUP_MASK: u32 = 0x007F_FFFF;

/// Link-layer prefix for IPv6 multicast groups (`33:33`)
pub const LL_IP6_MULTICAST_PREFIX: [u8; 2] = [0x33, 0x33];

// =============================================================================
// Filter Actions
// =============================================================================

/// Filter hook action code: stop accepting a group
pub const MAC_FILTER_DEL: u8 = 0;

/// Filter hook action code: start accepting a group
pub const MAC_FILTER_ADD: u8 = 1;
