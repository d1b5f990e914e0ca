//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, and two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** once created. To "modify" one, build a new
/// value. A recorded revenue transaction is the typical example in this
/// workspace: it is a fact, compared by its fields, and never edited.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Charge {
///     amount: f64,
///     currency: String,
/// }
///
/// impl ValueObject for Charge {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
