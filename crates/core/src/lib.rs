//! `tactical-core` — value object foundation for domain models.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).
//! Concrete value objects implement [`ValueObject`] by listing their atomic
//! values; equality, hashing and copying are derived from that list.

pub mod atomic;
pub mod error;
pub mod value_object;

pub use atomic::{AtomicValue, AtomicValues};
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
