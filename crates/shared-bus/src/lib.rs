//! # Shared Bus - Notification Bus for Wallet Observers
//!
//! Every committed wallet call emits structured notifications. Off-chain
//! observers (wallet UI, administrative tooling) consume them here; for some
//! operations, such as address recovery, the notification is the only place
//! the result appears.
//!
//! ```text
//! ┌──────────────┐    publish()    ┌──────────────┐   subscribe()   ┌──────────────┐
//! │ Proxy Wallet │ ──────────────→ │  Event Bus   │ ──────────────→ │  Observers   │
//! └──────────────┘  (post-commit)  └──────────────┘   (filtered)    └──────────────┘
//! ```
//!
//! Events are only published after the call that produced them has
//! committed, so a subscriber never observes a rolled-back call.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, WalletEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
