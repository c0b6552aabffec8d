//! Cross-context scheduling.
//!
//! Driver callbacks run in driver context (interrupts or a driver-owned
//! worker). Interface and protocol state may only change inside the stack's
//! own serialized context. [`StackContext`] is the single way across: submit
//! an action, block until the stack context has run it.
//!
//! Two implementations are provided:
//!
//! - [`StackMailbox`]: a one-slot mailbox the stack context drains with
//!   [`StackMailbox::service`]. Submitters spin until their action completes.
//! - [`InlineContext`]: runs the action immediately. Only valid when the driver
//!   delivers its callbacks from inside the stack context already (for example
//!   a super-loop that polls the driver between stack iterations).
//!
//! # Example
//!
//! ```ignore
//! static MAILBOX: StackMailbox = StackMailbox::new();
//!
//! // Stack task
//! loop {
//!     MAILBOX.service();
//!     stack.poll();
//! }
//! ```

#[cfg(feature = "async")]
use super::primitives::AtomicWaker;
use super::primitives::CriticalSectionCell;

/// Runs actions inside the stack's serialized execution context.
pub trait StackContext: Sync {
    /// Run `action` in stack context, returning only once it has completed.
    ///
    /// There is no timeout. Calling this from the stack context itself, with
    /// an implementation that defers to that context, never returns.
    fn call_blocking(&self, action: &mut (dyn FnMut() + Send));
}

// =============================================================================
// Inline Context
// =============================================================================

/// Stack context for systems with a single execution context.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineContext;

impl StackContext for InlineContext {
    fn call_blocking(&self, action: &mut (dyn FnMut() + Send)) {
        action();
    }
}

// =============================================================================
// Stack Mailbox
// =============================================================================

type RawAction<'a> = *mut (dyn FnMut() + Send + 'a);

/// Lifetime-erased pointer to a submitted action.
///
/// Only ever dereferenced between publication and completion, while the
/// submitter is parked in [`StackMailbox::call_blocking`].
#[derive(Clone, Copy)]
struct ErasedAction(RawAction<'static>);

#[derive(Clone, Copy)]
enum Slot {
    Idle,
    Pending(ErasedAction),
    Running,
    Done,
}

/// One-slot blocking handoff into the stack context.
///
/// Concurrent submitters are serialized: each waits for the slot to drain
/// before publishing its own action.
pub struct StackMailbox {
    slot: CriticalSectionCell<Slot>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl StackMailbox {
    /// Create an empty mailbox (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            slot: CriticalSectionCell::new(Slot::Idle),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// True if an action is waiting to be serviced.
    pub fn has_pending(&self) -> bool {
        matches!(self.slot.get(), Slot::Pending(_))
    }

    /// Run the pending action, if any. Call from the stack context only.
    ///
    /// Returns `true` if an action was run.
    pub fn service(&self) -> bool {
        let claimed = self.slot.with(|slot| match *slot {
            Slot::Pending(action) => {
                *slot = Slot::Running;
                Some(action)
            }
            _ => None,
        });

        let Some(action) = claimed else {
            return false;
        };

        // SAFETY: The submitter published this pointer from a live `&mut` and
        // stays parked in `call_blocking` until the slot reads `Done`, which is
        // only written below, after the call returns.
        let run = unsafe { &mut *action.0 };
        run();

        self.slot.with(|slot| *slot = Slot::Done);
        true
    }

    /// Wait until an action is pending.
    ///
    /// Lets an async stack runner sleep instead of polling [`service`](Self::service).
    #[cfg(feature = "async")]
    pub fn wait_pending(&self) -> impl core::future::Future<Output = ()> + '_ {
        core::future::poll_fn(move |cx| {
            if self.has_pending() {
                return core::task::Poll::Ready(());
            }
            self.waker.register(cx.waker());
            if self.has_pending() {
                core::task::Poll::Ready(())
            } else {
                core::task::Poll::Pending
            }
        })
    }

    fn publish(&self, action: ErasedAction) {
        loop {
            let claimed = self.slot.with(|slot| {
                if matches!(*slot, Slot::Idle) {
                    *slot = Slot::Pending(action);
                    true
                } else {
                    false
                }
            });
            if claimed {
                return;
            }
            core::hint::spin_loop();
        }
    }

    fn wait_done(&self) {
        loop {
            let done = self.slot.with(|slot| {
                if matches!(*slot, Slot::Done) {
                    *slot = Slot::Idle;
                    true
                } else {
                    false
                }
            });
            if done {
                return;
            }
            core::hint::spin_loop();
        }
    }
}

impl Default for StackMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl StackContext for StackMailbox {
    fn call_blocking(&self, action: &mut (dyn FnMut() + Send)) {
        let raw: RawAction<'_> = action;
        // SAFETY: Only the lifetime bound changes. The pointer is not used
        // after `wait_done` returns, and `action` outlives this call.
        let raw = unsafe { core::mem::transmute::<RawAction<'_>, RawAction<'static>>(raw) };

        self.publish(ErasedAction(raw));

        #[cfg(feature = "async")]
        self.waker.wake();

        #[cfg(feature = "defmt")]
        defmt::trace!("stack mailbox: action published, waiting");

        self.wait_done();
    }
}
