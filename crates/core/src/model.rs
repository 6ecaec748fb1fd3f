//! Modelling vocabulary: entities vs value objects.

/// Something with an identity that outlives changes to its attributes.
///
/// A user renamed under the same id is still the same user.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Something defined entirely by its value (e.g. an [`crate::Amount`]).
///
/// Immutable once constructed; two equal values are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
