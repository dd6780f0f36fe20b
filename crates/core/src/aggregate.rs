//! Aggregate root trait.

/// Aggregate root marker + minimal interface.
///
/// An aggregate owns its child entities outright (a reservation owns its
/// service selections) and is the only entry point for mutating them.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing revision of the aggregate's state.
    ///
    /// Bumped once per accepted mutation, including clamped ones.
    fn version(&self) -> u64;
}
