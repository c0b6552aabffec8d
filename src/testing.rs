//! Testing utilities and mock implementations
//!
//! This module provides mock drivers, stacks and frames for exercising the
//! interface glue on the host.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::vec::Vec;

use smoltcp::wire::EthernetAddress;

#[cfg(feature = "proto-ipv4")]
use core::net::Ipv4Addr;
#[cfg(feature = "proto-ipv6")]
use core::net::Ipv6Addr;

use crate::buffer::PacketBuffer;
use crate::driver::{EmacOps, LinkInput, LinkStateChange, MulticastGroups};
use crate::error::{InputRejected, RejectReason, Result};
#[cfg(feature = "proto-ipv4")]
use crate::netif::Ipv4Output;
#[cfg(feature = "proto-ipv6")]
use crate::netif::Ipv6Output;
use crate::netif::{NetStack, Netif};
use crate::sync::CriticalSectionCell;

/// Interface handle over mock frames
pub type MockNetif<'a> = Netif<'a, MockFrame>;

// =============================================================================
// Mock Frame
// =============================================================================

/// Heap-backed segmented frame with optional drop counting
#[derive(Debug)]
pub struct MockFrame {
    segments: Vec<Vec<u8>>,
    drops: Option<Arc<AtomicUsize>>,
}

impl MockFrame {
    /// Single-segment frame
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::chained(&[bytes])
    }

    /// Frame split across the given segments
    pub fn chained(segments: &[&[u8]]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_vec()).collect(),
            drops: None,
        }
    }

    /// Single-segment frame that counts its own release in `drops`
    pub fn tracked(bytes: &[u8], drops: &Arc<AtomicUsize>) -> Self {
        Self {
            segments: std::vec![bytes.to_vec()],
            drops: Some(Arc::clone(drops)),
        }
    }

    /// Flatten into one vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.segments.concat()
    }
}

impl PacketBuffer for MockFrame {
    fn total_len(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    fn segments(&self) -> impl Iterator<Item = &[u8]> {
        self.segments.iter().map(Vec::as_slice)
    }
}

impl Drop for MockFrame {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// =============================================================================
// Mock EMAC Driver
// =============================================================================

struct MockEmacState<'a> {
    input_cb: Option<&'a dyn LinkInput<MockFrame>>,
    link_cb: Option<&'a dyn LinkStateChange>,
    sent: Vec<Vec<u8>>,
    groups: Vec<EthernetAddress>,
    power_ups: usize,
    power_downs: usize,
}

/// Mock MAC driver recording every call made through [`EmacOps`]
///
/// Defaults: hardware address `02:00:00:00:00:01`, MTU 1500, name `en`,
/// multicast registration supported, power-up succeeds, frames accepted.
///
/// # Example
///
/// ```ignore
/// let emac = MockEmac::new().without_multicast();
/// let netif = Netif::new(&emac, &stack, &InlineContext);
/// emac_netif_init(&netif).unwrap();
/// emac.deliver(MockFrame::from_bytes(&[0; 64]));
/// ```
pub struct MockEmac<'a> {
    hwaddr: Vec<u8>,
    mtu: u16,
    multicast: bool,
    power_up_ok: bool,
    accept_tx: bool,
    state: CriticalSectionCell<MockEmacState<'a>>,
}

impl<'a> MockEmac<'a> {
    pub fn new() -> Self {
        Self {
            hwaddr: std::vec![0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
            mtu: 1500,
            multicast: true,
            power_up_ok: true,
            accept_tx: true,
            state: CriticalSectionCell::new(MockEmacState {
                input_cb: None,
                link_cb: None,
                sent: Vec::new(),
                groups: Vec::new(),
                power_ups: 0,
                power_downs: 0,
            }),
        }
    }

    /// Report no multicast registration capability
    pub fn without_multicast(mut self) -> Self {
        self.multicast = false;
        self
    }

    /// Make `power_up` report failure
    pub fn failing_power_up(mut self) -> Self {
        self.power_up_ok = false;
        self
    }

    /// Refuse every frame passed to `link_out`
    pub fn rejecting_tx(mut self) -> Self {
        self.accept_tx = false;
        self
    }

    /// Override the reported hardware address (any length)
    pub fn with_hwaddr(mut self, addr: &[u8]) -> Self {
        self.hwaddr = addr.to_vec();
        self
    }

    /// Override the reported MTU
    pub fn with_mtu(mut self, mtu: u16) -> Self {
        self.mtu = mtu;
        self
    }

    /// Frames accepted by `link_out`, flattened
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.with_ref(|s| s.sent.clone())
    }

    /// Multicast groups registered so far
    pub fn groups(&self) -> Vec<EthernetAddress> {
        self.state.with_ref(|s| s.groups.clone())
    }

    pub fn power_ups(&self) -> usize {
        self.state.with_ref(|s| s.power_ups)
    }

    pub fn power_downs(&self) -> usize {
        self.state.with_ref(|s| s.power_downs)
    }

    pub fn has_input_cb(&self) -> bool {
        self.state.with_ref(|s| s.input_cb.is_some())
    }

    pub fn has_link_cb(&self) -> bool {
        self.state.with_ref(|s| s.link_cb.is_some())
    }

    /// Simulate a received frame, as the driver's RX path would
    pub fn deliver(&self, frame: MockFrame) {
        let cb = self.state.with_ref(|s| s.input_cb);
        if let Some(cb) = cb {
            cb.link_input(frame);
        }
    }

    /// Simulate a PHY link transition
    pub fn signal_link(&self, up: bool) {
        let cb = self.state.with_ref(|s| s.link_cb);
        if let Some(cb) = cb {
            cb.link_state_changed(up);
        }
    }
}

impl<'a> EmacOps<'a, MockFrame> for MockEmac<'a> {
    fn link_out(&self, buf: &MockFrame) -> bool {
        if self.accept_tx {
            let bytes = buf.to_vec();
            self.state.with(|s| s.sent.push(bytes));
        }
        self.accept_tx
    }

    fn set_link_input_cb(&self, cb: &'a dyn LinkInput<MockFrame>) {
        self.state.with(|s| s.input_cb = Some(cb));
    }

    fn set_link_state_cb(&self, cb: &'a dyn LinkStateChange) {
        self.state.with(|s| s.link_cb = Some(cb));
    }

    fn hwaddr_size(&self) -> usize {
        self.hwaddr.len()
    }

    fn hwaddr(&self, out: &mut [u8]) {
        let n = out.len().min(self.hwaddr.len());
        out[..n].copy_from_slice(&self.hwaddr[..n]);
    }

    fn mtu_size(&self) -> u16 {
        self.mtu
    }

    fn ifname(&self, out: &mut [u8]) {
        let name = b"en";
        let n = out.len().min(name.len());
        out[..n].copy_from_slice(&name[..n]);
    }

    fn multicast(&self) -> Option<&dyn MulticastGroups> {
        if self.multicast { Some(self) } else { None }
    }

    fn power_up(&self) -> bool {
        self.state.with(|s| s.power_ups += 1);
        self.power_up_ok
    }

    fn power_down(&self) {
        self.state.with(|s| s.power_downs += 1);
    }
}

impl MulticastGroups for MockEmac<'_> {
    fn add_multicast_group(&self, addr: &EthernetAddress) {
        let addr = *addr;
        self.state.with(|s| s.groups.push(addr));
    }
}

// =============================================================================
// Mock Network Stack
// =============================================================================

struct MockStackState {
    received: usize,
    #[cfg(feature = "proto-ipv4")]
    ipv4_hops: Vec<Ipv4Addr>,
    #[cfg(feature = "proto-ipv6")]
    ipv6_hops: Vec<Ipv6Addr>,
}

/// Mock stack: counts dispatched frames and records IP output next hops
pub struct MockStack {
    reject: Option<RejectReason>,
    state: CriticalSectionCell<MockStackState>,
}

impl MockStack {
    /// Stack whose dispatch accepts every frame
    pub fn new() -> Self {
        Self {
            reject: None,
            state: CriticalSectionCell::new(MockStackState {
                received: 0,
                #[cfg(feature = "proto-ipv4")]
                ipv4_hops: Vec::new(),
                #[cfg(feature = "proto-ipv6")]
                ipv6_hops: Vec::new(),
            }),
        }
    }

    /// Stack whose dispatch refuses every frame with `reason`
    pub fn rejecting(reason: RejectReason) -> Self {
        Self {
            reject: Some(reason),
            ..Self::new()
        }
    }

    /// Frames accepted by dispatch
    pub fn received(&self) -> usize {
        self.state.with_ref(|s| s.received)
    }

    #[cfg(feature = "proto-ipv4")]
    pub fn ipv4_hops(&self) -> Vec<Ipv4Addr> {
        self.state.with_ref(|s| s.ipv4_hops.clone())
    }

    #[cfg(feature = "proto-ipv6")]
    pub fn ipv6_hops(&self) -> Vec<Ipv6Addr> {
        self.state.with_ref(|s| s.ipv6_hops.clone())
    }
}

impl NetStack<MockFrame> for MockStack {
    fn input(
        &self,
        _netif: &Netif<'_, MockFrame>,
        buf: MockFrame,
    ) -> core::result::Result<(), InputRejected<MockFrame>> {
        if let Some(reason) = self.reject {
            return Err(InputRejected::new(reason, buf));
        }
        self.state.with(|s| s.received += 1);
        drop(buf);
        Ok(())
    }

    #[cfg(feature = "proto-ipv4")]
    fn ipv4_output(&self) -> &dyn Ipv4Output<MockFrame> {
        self
    }

    #[cfg(feature = "proto-ipv6")]
    fn ipv6_output(&self) -> &dyn Ipv6Output<MockFrame> {
        self
    }
}

#[cfg(feature = "proto-ipv4")]
impl Ipv4Output<MockFrame> for MockStack {
    fn output(
        &self,
        netif: &Netif<'_, MockFrame>,
        buf: &MockFrame,
        next_hop: &Ipv4Addr,
    ) -> Result<()> {
        let hop = *next_hop;
        self.state.with(|s| s.ipv4_hops.push(hop));
        netif.link_output(buf)
    }
}

#[cfg(feature = "proto-ipv6")]
impl Ipv6Output<MockFrame> for MockStack {
    fn output(
        &self,
        netif: &Netif<'_, MockFrame>,
        buf: &MockFrame,
        next_hop: &Ipv6Addr,
    ) -> Result<()> {
        let hop = *next_hop;
        self.state.with(|s| s.ipv6_hops.push(hop));
        netif.link_output(buf)
    }
}
