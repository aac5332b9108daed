//! ID generator port for producing unique identifiers.

/// Generates unique identifiers.
///
/// Used to name cached response bodies inside a bucket.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
