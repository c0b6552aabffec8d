//! Synchronization and Context Marshaling
//!
//! This module provides the primitives that keep driver context and stack
//! context apart:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Async waker storage (requires `async`)
//!
//! - **Mailbox** (`mailbox`): The cross-context scheduling primitive
//!   - [`StackContext`] - Run an action inside the stack context and wait
//!   - [`StackMailbox`] - Blocking submit-and-wait channel
//!   - [`InlineContext`] - Pass-through for single-context systems
//!
//! # Example
//!
//! ```ignore
//! use ph_emac_netif::sync::{StackContext, StackMailbox};
//!
//! static MAILBOX: StackMailbox = StackMailbox::new();
//!
//! // Driver worker thread / interrupt bottom half
//! MAILBOX.call_blocking(&mut || netif.set_link_down());
//!
//! // Stack loop
//! MAILBOX.service();
//! ```

mod mailbox;
mod primitives;

pub use mailbox::{InlineContext, StackContext, StackMailbox};
#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;
