use super::index::Index;

/// Trait for entities that maintain a lookup-index record
pub trait Indexable {
    /// The index type derived from this entity
    type IndexType: Index;

    /// Builds the index record for the current state of the entity
    fn to_index(&self) -> Self::IndexType;
}
