//! Network Interface Handle
//!
//! [`Netif`] is the stack's representation of one network interface: static
//! properties negotiated at bring-up (hardware address, MTU, name, capability
//! flags), the hooks the stack calls through, and the link/admin state.
//!
//! The handle is owned by the stack. The adapter and the driver only hold
//! shared references to it for as long as the interface exists, so every
//! mutable field sits behind a [`CriticalSectionCell`].
//!
//! # Contexts
//!
//! - Properties and hooks are written once, during bring-up, before the
//!   interface is reachable from the stack.
//! - [`set_link_up`](Netif::set_link_up), [`set_link_down`](Netif::set_link_down),
//!   [`set_up`](Netif::set_up) and [`set_down`](Netif::set_down) are the stack's
//!   state transition entry points and must run in stack context. Driver
//!   context reaches them only through the [`StackContext`].
//!
//! # Example
//!
//! ```ignore
//! static MAILBOX: StackMailbox = StackMailbox::new();
//!
//! let netif = MockNetif::new(&emac, &stack, &MAILBOX);
//! emac_netif_init(&netif)?;
//!
//! // Stack side
//! netif.set_up();
//! netif.link_output(&frame)?;
//! ```

mod flags;
mod hooks;

pub use flags::{HwAddr, NetifFlags, NetifStats};
#[cfg(feature = "proto-ipv4")]
pub use hooks::Ipv4Output;
#[cfg(feature = "proto-ipv6")]
pub use hooks::Ipv6Output;
#[cfg(any(feature = "igmp", feature = "mld"))]
pub use hooks::MacFilter;
pub use hooks::{LinkOutput, NetStack};

#[cfg(any(feature = "proto-ipv4", feature = "igmp"))]
use core::net::Ipv4Addr;
#[cfg(any(feature = "proto-ipv6", feature = "mld"))]
use core::net::Ipv6Addr;

use smoltcp::wire::EthernetAddress;

use crate::constants::{ETH_ADDR_LEN, NETIF_NAME_LEN};
use crate::driver::EmacOps;
use crate::error::{ConfigResult, InputRejected, IoError, Result};
use crate::sync::{CriticalSectionCell, StackContext};

/// Called from stack context on every effective link transition.
pub type LinkCallback<B> = fn(&Netif<'_, B>);

struct NetifInner<'a, B> {
    hwaddr: HwAddr,
    mtu: u16,
    name: [u8; NETIF_NAME_LEN],
    flags: NetifFlags,
    stats: NetifStats,
    link_callback: Option<LinkCallback<B>>,
    link_output: Option<&'a dyn LinkOutput<B>>,
    #[cfg(feature = "proto-ipv4")]
    ipv4_output: Option<&'a dyn Ipv4Output<B>>,
    #[cfg(feature = "proto-ipv6")]
    ipv6_output: Option<&'a dyn Ipv6Output<B>>,
    #[cfg(feature = "igmp")]
    igmp_mac_filter: Option<&'a dyn MacFilter<Ipv4Addr, B>>,
    #[cfg(feature = "mld")]
    mld_mac_filter: Option<&'a dyn MacFilter<Ipv6Addr, B>>,
}

/// One network interface, as seen by the stack.
///
/// `'a` is the lifetime of the driver, stack and context the interface is
/// wired to. `B` is the stack's packet buffer type.
pub struct Netif<'a, B> {
    driver: &'a dyn EmacOps<'a, B>,
    stack: &'a dyn NetStack<B>,
    context: &'a dyn StackContext,
    inner: CriticalSectionCell<NetifInner<'a, B>>,
}

impl<'a, B> Netif<'a, B> {
    /// Create an unconfigured interface bound to `driver`.
    ///
    /// Nothing is queried from the driver yet; that is bring-up's job.
    pub const fn new(
        driver: &'a dyn EmacOps<'a, B>,
        stack: &'a dyn NetStack<B>,
        context: &'a dyn StackContext,
    ) -> Self {
        Self {
            driver,
            stack,
            context,
            inner: CriticalSectionCell::new(NetifInner {
                hwaddr: HwAddr::EMPTY,
                mtu: 0,
                name: [0; NETIF_NAME_LEN],
                flags: NetifFlags::empty(),
                stats: NetifStats {
                    tx_frames: 0,
                    tx_errors: 0,
                    rx_frames: 0,
                    rx_dropped: 0,
                    link_transitions: 0,
                    filter_adds: 0,
                },
                link_callback: None,
                link_output: None,
                #[cfg(feature = "proto-ipv4")]
                ipv4_output: None,
                #[cfg(feature = "proto-ipv6")]
                ipv6_output: None,
                #[cfg(feature = "igmp")]
                igmp_mac_filter: None,
                #[cfg(feature = "mld")]
                mld_mac_filter: None,
            }),
        }
    }

    /// The driver this interface is bound to
    pub fn driver(&self) -> &'a dyn EmacOps<'a, B> {
        self.driver
    }

    /// The stack that owns this interface
    pub fn stack(&self) -> &'a dyn NetStack<B> {
        self.stack
    }

    /// The stack's execution context
    pub fn context(&self) -> &'a dyn StackContext {
        self.context
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Hardware address
    pub fn hwaddr(&self) -> HwAddr {
        self.inner.with_ref(|i| i.hwaddr)
    }

    /// Set the hardware address.
    ///
    /// # Errors
    ///
    /// `HwAddrTooLong` if `addr` exceeds the address field capacity; the
    /// stored address is left unchanged.
    pub fn set_hwaddr(&self, addr: &[u8]) -> ConfigResult<()> {
        let hwaddr = HwAddr::from_slice(addr)?;
        self.inner.with(|i| i.hwaddr = hwaddr);
        Ok(())
    }

    /// The hardware address as an Ethernet address, if it is six bytes long
    pub fn ethernet_address(&self) -> Option<EthernetAddress> {
        let hwaddr = self.hwaddr();
        (hwaddr.len() == ETH_ADDR_LEN).then(|| EthernetAddress::from_bytes(hwaddr.as_bytes()))
    }

    /// Maximum transmission unit
    pub fn mtu(&self) -> u16 {
        self.inner.with_ref(|i| i.mtu)
    }

    /// Set the maximum transmission unit
    pub fn set_mtu(&self, mtu: u16) {
        self.inner.with(|i| i.mtu = mtu);
    }

    /// Short interface name
    pub fn name(&self) -> [u8; NETIF_NAME_LEN] {
        self.inner.with_ref(|i| i.name)
    }

    /// Set the short interface name
    pub fn set_name(&self, name: [u8; NETIF_NAME_LEN]) {
        self.inner.with(|i| i.name = name);
    }

    /// Capability and state flags
    pub fn flags(&self) -> NetifFlags {
        self.inner.with_ref(|i| i.flags)
    }

    /// Add capability flags, leaving the others untouched
    pub fn insert_flags(&self, flags: NetifFlags) {
        self.inner.with(|i| i.flags.insert(flags));
    }

    /// Administratively up
    pub fn is_up(&self) -> bool {
        self.flags().contains(NetifFlags::UP)
    }

    /// Physical link up
    pub fn is_link_up(&self) -> bool {
        self.flags().contains(NetifFlags::LINK_UP)
    }

    /// Snapshot of the interface counters
    pub fn stats(&self) -> NetifStats {
        self.inner.with_ref(|i| i.stats)
    }

    pub(crate) fn update_stats(&self, f: impl FnOnce(&mut NetifStats)) {
        self.inner.with(|i| f(&mut i.stats));
    }

    // =========================================================================
    // Hook Binding
    // =========================================================================

    /// Bind the link-layer output hook
    pub fn set_link_output(&self, hook: Option<&'a dyn LinkOutput<B>>) {
        self.inner.with(|i| i.link_output = hook);
    }

    /// Bind the IPv4 output hook
    #[cfg(feature = "proto-ipv4")]
    pub fn set_ipv4_output(&self, hook: Option<&'a dyn Ipv4Output<B>>) {
        self.inner.with(|i| i.ipv4_output = hook);
    }

    /// Bind the IPv6 output hook
    #[cfg(feature = "proto-ipv6")]
    pub fn set_ipv6_output(&self, hook: Option<&'a dyn Ipv6Output<B>>) {
        self.inner.with(|i| i.ipv6_output = hook);
    }

    /// Bind the IGMP group filter hook
    #[cfg(feature = "igmp")]
    pub fn set_igmp_mac_filter(&self, hook: Option<&'a dyn MacFilter<Ipv4Addr, B>>) {
        self.inner.with(|i| i.igmp_mac_filter = hook);
    }

    /// Bind the MLD group filter hook
    #[cfg(feature = "mld")]
    pub fn set_mld_mac_filter(&self, hook: Option<&'a dyn MacFilter<Ipv6Addr, B>>) {
        self.inner.with(|i| i.mld_mac_filter = hook);
    }

    /// Install the link transition callback
    pub fn set_link_callback(&self, callback: Option<LinkCallback<B>>) {
        self.inner.with(|i| i.link_callback = callback);
    }

    /// True if a link-layer output hook is bound
    pub fn has_link_output(&self) -> bool {
        self.inner.with_ref(|i| i.link_output.is_some())
    }

    /// True if an IPv4 output hook is bound
    #[cfg(feature = "proto-ipv4")]
    pub fn has_ipv4_output(&self) -> bool {
        self.inner.with_ref(|i| i.ipv4_output.is_some())
    }

    /// True if an IPv6 output hook is bound
    #[cfg(feature = "proto-ipv6")]
    pub fn has_ipv6_output(&self) -> bool {
        self.inner.with_ref(|i| i.ipv6_output.is_some())
    }

    // =========================================================================
    // Stack Calls
    // =========================================================================

    /// Send a complete frame through the link output hook.
    ///
    /// # Errors
    ///
    /// `NotBound` if no hook is bound, otherwise whatever the hook reports.
    pub fn link_output(&self, buf: &B) -> Result<()> {
        let hook = self.inner.with_ref(|i| i.link_output);
        match hook {
            Some(hook) => hook.link_output(self, buf),
            None => Err(IoError::NotBound.into()),
        }
    }

    /// Send an IPv4 packet through the IPv4 output hook.
    ///
    /// # Errors
    ///
    /// `NotBound` if no hook is bound, otherwise whatever the hook reports.
    #[cfg(feature = "proto-ipv4")]
    pub fn output_ipv4(&self, buf: &B, next_hop: &Ipv4Addr) -> Result<()> {
        let hook = self.inner.with_ref(|i| i.ipv4_output);
        match hook {
            Some(hook) => hook.output(self, buf, next_hop),
            None => Err(IoError::NotBound.into()),
        }
    }

    /// Send an IPv6 packet through the IPv6 output hook.
    ///
    /// # Errors
    ///
    /// `NotBound` if no hook is bound, otherwise whatever the hook reports.
    #[cfg(feature = "proto-ipv6")]
    pub fn output_ipv6(&self, buf: &B, next_hop: &Ipv6Addr) -> Result<()> {
        let hook = self.inner.with_ref(|i| i.ipv6_output);
        match hook {
            Some(hook) => hook.output(self, buf, next_hop),
            None => Err(IoError::NotBound.into()),
        }
    }

    /// Join or leave an IPv4 group at the link layer.
    ///
    /// Without a bound hook this is a no-op.
    ///
    /// # Errors
    ///
    /// Whatever the bound hook reports.
    #[cfg(feature = "igmp")]
    pub fn igmp_mac_filter(&self, group: &Ipv4Addr, action: u8) -> Result<()> {
        let hook = self.inner.with_ref(|i| i.igmp_mac_filter);
        hook.map_or(Ok(()), |hook| hook.mac_filter(self, group, action))
    }

    /// Join or leave an IPv6 group at the link layer.
    ///
    /// Without a bound hook this is a no-op.
    ///
    /// # Errors
    ///
    /// Whatever the bound hook reports.
    #[cfg(feature = "mld")]
    pub fn mld_mac_filter(&self, group: &Ipv6Addr, action: u8) -> Result<()> {
        let hook = self.inner.with_ref(|i| i.mld_mac_filter);
        hook.map_or(Ok(()), |hook| hook.mac_filter(self, group, action))
    }

    /// Pass a received frame to the stack's input dispatch.
    ///
    /// # Errors
    ///
    /// The stack's rejection, carrying the buffer back to the caller.
    pub fn input(&self, buf: B) -> core::result::Result<(), InputRejected<B>> {
        self.stack.input(self, buf)
    }

    // =========================================================================
    // State Transitions (stack context only)
    // =========================================================================

    /// Mark the interface administratively up
    pub fn set_up(&self) {
        self.inner.with(|i| i.flags.insert(NetifFlags::UP));
    }

    /// Mark the interface administratively down
    pub fn set_down(&self) {
        self.inner.with(|i| i.flags.remove(NetifFlags::UP));
    }

    /// Record that the physical link came up
    pub fn set_link_up(&self) {
        self.set_link(true);
    }

    /// Record that the physical link went down
    pub fn set_link_down(&self) {
        self.set_link(false);
    }

    fn set_link(&self, up: bool) {
        let changed = self.inner.with(|i| {
            if i.flags.contains(NetifFlags::LINK_UP) == up {
                return None;
            }
            i.flags.set(NetifFlags::LINK_UP, up);
            i.stats.link_transitions += 1;
            Some(i.link_callback)
        });

        // Callback runs outside the critical section so it may query the netif
        if let Some(Some(callback)) = changed {
            callback(self);
        }
    }
}
