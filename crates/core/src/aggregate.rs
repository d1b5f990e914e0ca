//! Aggregate root trait for in-memory domain models.

/// Aggregate root marker + minimal interface.
///
/// An aggregate root is the single entry point for mutating the state it owns.
/// Callers hold it explicitly and pass it where it is needed; there is no
/// process-wide instance.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented once per successful mutation. Reads never change it.
    fn version(&self) -> u64;
}
