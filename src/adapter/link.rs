//! Context-marshaling paths between the driver and the stack.
//!
//! | Path        | Runs in        | Crosses into stack context via      |
//! |-------------|----------------|-------------------------------------|
//! | transmit    | stack context  | n/a, calls the driver directly      |
//! | input       | driver context | stack dispatch (driver-safe)        |
//! | link state  | driver context | [`StackContext::call_blocking`]     |
//!
//! [`StackContext::call_blocking`]: crate::sync::StackContext::call_blocking

use crate::buffer::PacketBuffer;
use crate::driver::{LinkInput, LinkStateChange};
use crate::error::{IoError, Result};
use crate::netif::{LinkOutput, Netif};

/// The adapter's link output hook: hands frames straight to the driver.
///
/// The driver only borrows the frame. Nothing is queued or retried here; a
/// refused frame is reported to the stack, which owns the drop policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmacLinkOutput;

impl<B: PacketBuffer> LinkOutput<B> for EmacLinkOutput {
    fn link_output(&self, netif: &Netif<'_, B>, buf: &B) -> Result<()> {
        if netif.driver().link_out(buf) {
            netif.update_stats(|s| s.tx_frames += 1);
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("tx: driver refused {} byte frame", buf.total_len());
            netif.update_stats(|s| s.tx_errors += 1);
            Err(IoError::TxRejected.into())
        }
    }
}

impl<B: PacketBuffer> LinkInput<B> for Netif<'_, B> {
    fn link_input(&self, buf: B) {
        match self.input(buf) {
            Ok(()) => self.update_stats(|s| s.rx_frames += 1),
            Err(rejected) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "rx: dispatch refused {} byte frame: {}",
                    rejected.buffer.total_len(),
                    rejected.reason
                );
                self.update_stats(|s| s.rx_dropped += 1);
                // Released here, the only owner left
                drop(rejected);
            }
        }
    }
}

impl<B> LinkStateChange for Netif<'_, B> {
    fn link_state_changed(&self, up: bool) {
        #[cfg(feature = "defmt")]
        defmt::debug!("link: {} handoff submitted", if up { "up" } else { "down" });

        self.context().call_blocking(&mut || {
            if up {
                self.set_link_up();
            } else {
                self.set_link_down();
            }
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("link: handoff completed");
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::adapter::emac_netif_init;
    use crate::error::{Error, RejectReason};
    use crate::sync::{InlineContext, StackMailbox};
    use crate::testing::{MockEmac, MockFrame, MockNetif, MockStack};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn transmit_accepted() {
        let emac = MockEmac::new();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &InlineContext);

        let frame = MockFrame::chained(&[&[0xFF; 6], &[0x02; 6], &[0x08, 0x00]]);
        assert_eq!(EmacLinkOutput.link_output(&netif, &frame), Ok(()));

        assert_eq!(emac.sent().len(), 1);
        assert_eq!(emac.sent()[0].len(), 14);
        assert_eq!(netif.stats().tx_frames, 1);
        // Caller still owns the frame
        assert_eq!(frame.total_len(), 14);
    }

    #[test]
    fn transmit_refused_is_interface_error() {
        let emac = MockEmac::new().rejecting_tx();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &InlineContext);

        let err = EmacLinkOutput
            .link_output(&netif, &MockFrame::from_bytes(&[0; 60]))
            .unwrap_err();
        assert_eq!(err, Error::Io(IoError::TxRejected));
        assert!(err.is_interface_error());
        assert_eq!(netif.stats().tx_errors, 1);
        assert_eq!(netif.stats().tx_frames, 0);
    }

    #[test]
    fn accepted_input_counted() {
        let emac = MockEmac::new();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &InlineContext);
        emac_netif_init(&netif).unwrap();

        let drops = Arc::new(AtomicUsize::new(0));
        emac.deliver(MockFrame::tracked(&[0xAA; 64], &drops));

        assert_eq!(stack.received(), 1);
        assert_eq!(netif.stats().rx_frames, 1);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_input_released_exactly_once() {
        let emac = MockEmac::new();
        let stack = MockStack::rejecting(RejectReason::OutOfMemory);
        let netif = MockNetif::new(&emac, &stack, &InlineContext);
        emac_netif_init(&netif).unwrap();

        let drops = Arc::new(AtomicUsize::new(0));
        emac.deliver(MockFrame::tracked(&[0x55; 128], &drops));

        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert_eq!(Arc::strong_count(&drops), 1);
        assert_eq!(stack.received(), 0);
        assert_eq!(netif.stats().rx_dropped, 1);
    }

    #[test]
    fn link_change_inline() {
        let emac = MockEmac::new();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &InlineContext);
        emac_netif_init(&netif).unwrap();

        emac.signal_link(true);
        assert!(netif.is_link_up());
        emac.signal_link(false);
        assert!(!netif.is_link_up());
        assert_eq!(netif.stats().link_transitions, 2);
    }

    #[test]
    fn link_down_visible_when_callback_returns() {
        static MAILBOX: StackMailbox = StackMailbox::new();

        let emac = MockEmac::new();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &MAILBOX);
        emac_netif_init(&netif).unwrap();

        let stop = AtomicBool::new(false);

        thread::scope(|s| {
            // Stack context
            s.spawn(|| {
                while !stop.load(Ordering::SeqCst) {
                    MAILBOX.service();
                }
            });

            // Driver context
            s.spawn(|| {
                emac.signal_link(true);
                assert!(netif.is_link_up());

                emac.signal_link(false);
                assert!(!netif.is_link_up());

                stop.store(true, Ordering::SeqCst);
            });
        });

        assert_eq!(netif.stats().link_transitions, 2);
        assert!(!MAILBOX.has_pending());
    }

    #[test]
    fn link_change_waits_for_stack_context() {
        let mailbox = StackMailbox::new();
        let emac = MockEmac::new();
        let stack = MockStack::new();
        let netif = MockNetif::new(&emac, &stack, &mailbox);
        emac_netif_init(&netif).unwrap();

        let returned = AtomicBool::new(false);

        thread::scope(|s| {
            s.spawn(|| {
                emac.signal_link(true);
                returned.store(true, Ordering::SeqCst);
            });

            // Nothing runs until the stack context services the mailbox
            while !mailbox.has_pending() {
                thread::yield_now();
            }
            assert!(!returned.load(Ordering::SeqCst));
            assert!(!netif.is_link_up());

            assert!(mailbox.service());
        });

        assert!(returned.load(Ordering::SeqCst));
        assert!(netif.is_link_up());
    }
}
