//! Entity trait: records keyed by a stable identity inside an aggregate.

/// Something an aggregate stores under a key that never changes.
///
/// The aggregate may replace an entity wholesale (same id, fresh state), but
/// the id itself is fixed at creation.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
