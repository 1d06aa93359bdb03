//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects of the same type with the same atomic
//! values are considered equal.

use core::any::{TypeId, type_name};
use core::fmt::Debug;
use std::hash::{DefaultHasher, Hasher};

use tracing::{debug, trace};

use crate::atomic::{self, AtomicValues};
use crate::error::DomainResult;

/// Immutable domain value compared by its atomic values.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// ## Contract
///
/// Implementors supply [`atomic_values`](ValueObject::atomic_values): the ordered list of
/// defining attributes, each present or explicitly absent. Everything else is derived:
///
/// - [`equals`](ValueObject::equals) is scoped to the concrete type and compares the two
///   sequences pairwise; length is part of identity.
/// - [`value_hash`](ValueObject::value_hash) folds the same sequence, so equal values
///   always hash equally.
/// - [`copy`](ValueObject::copy) is a shallow duplicate through `Clone`.
///
/// The sequence must be deterministic for a given instance. Value objects must not be
/// mutated after construction; concurrent reads are then safe without locking.
///
/// ## Usage Pattern
///
/// ```
/// use tactical_core::{AtomicValues, ValueObject, impl_structural_eq};
///
/// #[derive(Debug, Clone)]
/// struct Point2D {
///     x: i64,
///     y: i64,
/// }
///
/// impl ValueObject for Point2D {
///     fn atomic_values(&self) -> AtomicValues<'_> {
///         AtomicValues::new().with(&self.x).with(&self.y)
///     }
/// }
///
/// impl_structural_eq!(Point2D);
///
/// let a = Point2D { x: 3, y: 4 };
/// assert!(a.equals(Some(&Point2D { x: 3, y: 4 })));
/// assert!(!a.equals(Some(&Point2D { x: 3, y: 5 })));
/// assert!(!a.equals::<Point2D>(None));
/// assert_eq!(a, a.copy());
/// ```
pub trait ValueObject: Clone + Debug + 'static {
    /// Ordered defining attributes of this value.
    fn atomic_values(&self) -> AtomicValues<'_>;

    /// Structural equality against a possibly absent value object.
    ///
    /// Values of different concrete types are never equal, even when their atomic
    /// sequences coincide.
    fn equals<O: ValueObject>(&self, other: Option<&O>) -> bool {
        let Some(other) = other else {
            return false;
        };

        if TypeId::of::<Self>() != TypeId::of::<O>() {
            trace!(
                lhs = type_name::<Self>(),
                rhs = type_name::<O>(),
                "value object types differ"
            );
            return false;
        }

        if core::ptr::addr_eq(self as *const Self, other as *const O) {
            return true;
        }

        atomic::sequences_equal(&self.atomic_values(), &other.atomic_values())
    }

    /// Hash consistent with [`equals`](ValueObject::equals).
    ///
    /// Deterministic for a given build; not suitable for persistence.
    fn value_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        atomic::hash_sequence(&self.atomic_values(), &mut hasher);
        hasher.finish()
    }

    /// Shallow field-wise duplicate with its own identity.
    ///
    /// Nested data is cloned exactly as `Clone` does for the concrete type; shared
    /// immutable structure (e.g. `Arc`) stays shared.
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Checks the value's invariants. Accepts everything unless overridden.
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Returns `self` if [`validate`](ValueObject::validate) accepts it.
    fn validated(self) -> DomainResult<Self> {
        self.validate().inspect_err(|err| {
            debug!(value_object = type_name::<Self>(), error = %err, "value object rejected");
        })?;
        Ok(self)
    }
}

/// Equality over two possibly absent value objects.
///
/// | lhs     | rhs     | result              |
/// |---------|---------|---------------------|
/// | absent  | absent  | `true`              |
/// | absent  | present | `false`             |
/// | present | absent  | `false`             |
/// | present | present | `lhs.equals(rhs)`   |
pub fn eq<L: ValueObject, R: ValueObject>(lhs: Option<&L>, rhs: Option<&R>) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(lhs), rhs) => lhs.equals(rhs),
    }
}

/// Negation of [`eq`].
pub fn ne<L: ValueObject, R: ValueObject>(lhs: Option<&L>, rhs: Option<&R>) -> bool {
    !eq(lhs, rhs)
}

/// Implements `PartialEq`, `Eq` and `Hash` for value objects in terms of
/// [`ValueObject`].
///
/// Afterwards `==` follows [`ValueObject::equals`], the types can be used as map keys,
/// and they can be nested as atomic values inside other value objects.
#[macro_export]
macro_rules! impl_structural_eq {
    ($($t:ty),+ $(,)?) => {
        $(
            impl ::core::cmp::PartialEq for $t {
                fn eq(&self, other: &Self) -> bool {
                    $crate::ValueObject::equals(self, ::core::option::Option::Some(other))
                }
            }

            impl ::core::cmp::Eq for $t {}

            impl ::core::hash::Hash for $t {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    $crate::atomic::hash_sequence(&$crate::ValueObject::atomic_values(self), state);
                }
            }
        )+
    };
}
