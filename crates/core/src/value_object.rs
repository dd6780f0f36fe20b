//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. A date
/// range `2024-05-20 → 2024-05-23` is the same range wherever it appears.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money {
///     amount: u64,
///     currency: String,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
