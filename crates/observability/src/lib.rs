//! Tracing setup for processes that use `tactical-core`.
//!
//! The core crate only emits `tracing` events; installing a subscriber is left
//! to the binary (or test) that embeds it.

/// Subscriber initialization (filters, JSON formatting).
pub mod subscriber;

pub use subscriber::{init, init_with_default};
