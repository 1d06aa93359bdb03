//! Atomic values: the ordered, independently-optional attributes that make up a
//! value object's identity.

use core::any::Any;
use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use tracing::trace;

/// A single opaque attribute of a value object.
///
/// Implemented automatically for every `'static` type that is `Debug + Eq + Hash`,
/// which includes other value objects that opt into structural equality via
/// [`impl_structural_eq!`](crate::impl_structural_eq). Floating point fields must
/// be wrapped (e.g. stored as bits or fixed-point integers) since `f64` is not `Eq`.
pub trait AtomicValue: Any + Debug {
    fn as_any(&self) -> &dyn Any;

    /// Value equality against another atomic value.
    ///
    /// Returns `false` when `other` has a different concrete type.
    fn eq_atomic(&self, other: &dyn AtomicValue) -> bool;

    /// Feeds this value's own hash into `state`.
    fn hash_atomic(&self, state: &mut dyn Hasher);
}

impl<T> AtomicValue for T
where
    T: Any + Debug + Eq + Hash,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_atomic(&self, other: &dyn AtomicValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn hash_atomic(&self, mut state: &mut dyn Hasher) {
        Hash::hash(self, &mut state);
    }
}

/// Ordered sequence of atomic values produced by a value object.
///
/// `None` entries mark an explicitly absent attribute. Both content and order are
/// significant, and so is the length.
#[derive(Debug, Default, Clone)]
pub struct AtomicValues<'a> {
    values: Vec<Option<&'a dyn AtomicValue>>,
}

impl<'a> AtomicValues<'a> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a present value.
    pub fn with<T: AtomicValue>(mut self, value: &'a T) -> Self {
        self.values.push(Some(value));
        self
    }

    /// Appends a value that may be absent.
    pub fn with_optional<T: AtomicValue>(mut self, value: Option<&'a T>) -> Self {
        self.values.push(value.map(|v| v as &dyn AtomicValue));
        self
    }

    /// Appends an explicit absent marker.
    pub fn absent(mut self) -> Self {
        self.values.push(None);
        self
    }

    pub fn push(&mut self, value: Option<&'a dyn AtomicValue>) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&'a dyn AtomicValue>> {
        self.values.iter().copied()
    }
}

impl<'a> FromIterator<Option<&'a dyn AtomicValue>> for AtomicValues<'a> {
    fn from_iter<I: IntoIterator<Item = Option<&'a dyn AtomicValue>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<Option<&'a dyn AtomicValue>> for AtomicValues<'a> {
    fn extend<I: IntoIterator<Item = Option<&'a dyn AtomicValue>>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// Compares two atomic-value sequences pairwise, in order.
///
/// - absent vs present (either way) is a mismatch
/// - present vs present uses the values' own equality
/// - absent vs absent matches
///
/// Stops at the first mismatch. A sequence that runs out before the other is
/// unequal.
pub fn sequences_equal(lhs: &AtomicValues<'_>, rhs: &AtomicValues<'_>) -> bool {
    let mut left = lhs.iter();
    let mut right = rhs.iter();
    let mut position = 0usize;

    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(_), None) | (None, Some(_)) => {
                trace!(
                    lhs_len = lhs.len(),
                    rhs_len = rhs.len(),
                    "atomic value sequences differ in length"
                );
                return false;
            }
            (Some(a), Some(b)) => {
                if !atomic_eq(a, b) {
                    trace!(position, "atomic values differ");
                    return false;
                }
            }
        }
        position += 1;
    }
}

fn atomic_eq(lhs: Option<&dyn AtomicValue>, rhs: Option<&dyn AtomicValue>) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_atomic(b),
        _ => false,
    }
}

/// Folds an atomic-value sequence into `state`, order-sensitively.
///
/// Absent entries write the sentinel `0u8`; present entries write `1u8`
/// followed by the value's own hash. Sequences that compare equal under
/// [`sequences_equal`] always produce the same hash.
pub fn hash_sequence<H: Hasher>(values: &AtomicValues<'_>, state: &mut H) {
    for value in values.iter() {
        match value {
            None => state.write_u8(0),
            Some(value) => {
                state.write_u8(1);
                value.hash_atomic(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::DefaultHasher;

    fn hash_of(values: &AtomicValues<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_sequence(values, &mut hasher);
        hasher.finish()
    }

    #[test]
    fn atomic_equality_is_type_scoped() {
        let a: i32 = 7;
        let b: i64 = 7;
        assert!(a.eq_atomic(&7i32));
        assert!(!a.eq_atomic(&b));
        assert!(!b.eq_atomic(&a));
    }

    #[test]
    fn equal_sequences_match() {
        let label = String::from("a");
        let lhs = AtomicValues::new().with(&label).with(&5u32).absent();
        let rhs = AtomicValues::new().with(&label).with(&5u32).absent();
        assert!(sequences_equal(&lhs, &rhs));
        assert_eq!(hash_of(&lhs), hash_of(&rhs));
    }

    #[test]
    fn absent_vs_present_is_a_mismatch() {
        let label = "a";
        let absent = AtomicValues::new().with(&label).with_optional::<u32>(None);
        let present = AtomicValues::new().with(&label).with(&5u32);
        assert!(!sequences_equal(&absent, &present));
        assert!(!sequences_equal(&present, &absent));
    }

    #[test]
    fn both_absent_counts_as_equal() {
        let lhs = AtomicValues::new().absent().with(&1u8);
        let rhs = AtomicValues::new().absent().with(&1u8);
        assert!(sequences_equal(&lhs, &rhs));
    }

    #[test]
    fn length_is_part_of_identity() {
        let prefix = AtomicValues::new().with(&1u8);
        let longer = AtomicValues::new().with(&1u8).with(&2u8);
        let trailing_absent = AtomicValues::new().with(&1u8).absent();

        assert!(!sequences_equal(&prefix, &longer));
        assert!(!sequences_equal(&longer, &prefix));
        assert!(!sequences_equal(&prefix, &trailing_absent));
        assert!(sequences_equal(&AtomicValues::new(), &AtomicValues::new()));
    }

    #[test]
    fn order_matters_for_equality_and_hash() {
        let xy = AtomicValues::new().with(&3i64).with(&4i64);
        let yx = AtomicValues::new().with(&4i64).with(&3i64);
        assert!(!sequences_equal(&xy, &yx));
        assert_ne!(hash_of(&xy), hash_of(&yx));
    }

    #[test]
    fn absent_hashes_differently_from_zero() {
        let absent = AtomicValues::new().absent();
        let zero = AtomicValues::new().with(&0u8);
        assert_ne!(hash_of(&absent), hash_of(&zero));
    }

    #[test]
    fn extend_appends_in_order() {
        let head = String::from("head");
        let tail = [4u32, 5];
        let mut values = AtomicValues::with_capacity(4).with(&head);
        values.extend(tail.iter().map(|v| Some(v as &dyn AtomicValue)));
        values.push(None);

        let expected = AtomicValues::new()
            .with(&head)
            .with(&4u32)
            .with(&5u32)
            .absent();
        assert_eq!(values.len(), 4);
        assert!(sequences_equal(&values, &expected));
    }

    #[test]
    fn collects_from_iterator() {
        let items = [1u16, 2, 3];
        let values: AtomicValues<'_> = items
            .iter()
            .map(|v| Some(v as &dyn AtomicValue))
            .chain(core::iter::once(None))
            .collect();

        assert_eq!(values.len(), 4);
        assert!(values.iter().last().is_some_and(|v| v.is_none()));
    }
}
