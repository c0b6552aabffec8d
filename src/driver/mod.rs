//! Driver Operation Contract
//!
//! The MAC driver is consumed only through the [`EmacOps`] operation table.
//! Interrupt handling, DMA and PHY management live behind it and are never
//! touched directly by this crate.
//!
//! The driver calls back through two registered handlers:
//!
//! - [`LinkInput`] - a received frame, ownership passes to the handler
//! - [`LinkStateChange`] - the link went up or down
//!
//! Both may be invoked from driver context (interrupts or a driver-owned
//! worker), concurrently with the stack.
//!
//! # Example Implementation
//!
//! ```ignore
//! struct MyEmac<'a> {
//!     input: CriticalSectionCell<Option<&'a dyn LinkInput<Frame>>>,
//!     // ...
//! }
//!
//! impl<'a> EmacOps<'a, Frame> for MyEmac<'a> {
//!     fn link_out(&self, buf: &Frame) -> bool {
//!         let mut dma = [0u8; 1600];
//!         let len = buf.copy_to(&mut dma);
//!         self.hw_transmit(&dma[..len]).is_ok()
//!     }
//!
//!     fn set_link_input_cb(&self, cb: &'a dyn LinkInput<Frame>) {
//!         self.input.with(|slot| *slot = Some(cb));
//!     }
//!
//!     // ... other operations
//! }
//! ```

use smoltcp::wire::EthernetAddress;

// =============================================================================
// Callbacks
// =============================================================================

/// Receives frames from the driver.
pub trait LinkInput<B>: Sync {
    /// Hand a received frame over. The handler owns `buf` from here on.
    fn link_input(&self, buf: B);
}

/// Receives link-state transitions from the driver.
pub trait LinkStateChange: Sync {
    /// The physical link is now up (`true`) or down (`false`).
    fn link_state_changed(&self, up: bool);
}

// =============================================================================
// Capabilities
// =============================================================================

/// Optional hardware multicast group registration.
pub trait MulticastGroups: Sync {
    /// Start accepting frames addressed to `addr`.
    ///
    /// Safe to call from any context.
    fn add_multicast_group(&self, addr: &EthernetAddress);
}

// =============================================================================
// Operation Table
// =============================================================================

/// Operations a MAC driver supplies to the interface glue.
///
/// `'a` is the lifetime of the interface the driver is bound to; registered
/// callbacks must stay valid that long. `B` is the stack's packet buffer type.
///
/// A driver binds one interface at a time. Registering a callback replaces any
/// previous one.
pub trait EmacOps<'a, B>: Sync {
    /// Transmit a frame.
    ///
    /// The buffer is only borrowed: the driver must copy it or finish with it
    /// before returning. Safe to call from any context.
    fn link_out(&self, buf: &B) -> bool;

    /// Register the received-frame handler.
    fn set_link_input_cb(&self, cb: &'a dyn LinkInput<B>);

    /// Register the link-state handler.
    fn set_link_state_cb(&self, cb: &'a dyn LinkStateChange);

    /// Length of the hardware address in bytes
    fn hwaddr_size(&self) -> usize;

    /// Write the hardware address into `out` (`out.len() == hwaddr_size()`)
    fn hwaddr(&self, out: &mut [u8]);

    /// Maximum transmission unit in bytes
    fn mtu_size(&self) -> u16;

    /// Write the short interface name into `out`
    fn ifname(&self, out: &mut [u8]);

    /// Multicast group registration, if the hardware supports it
    fn multicast(&self) -> Option<&dyn MulticastGroups> {
        None
    }

    /// Power up the MAC. Returns `false` on failure.
    fn power_up(&self) -> bool;

    /// Power down the MAC.
    fn power_down(&self) {}
}
