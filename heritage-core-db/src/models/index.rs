use super::identifiable::Identifiable;

/// Marker trait for lookup-index records kept next to their main table
pub trait Index: Identifiable {}
