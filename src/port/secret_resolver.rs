//! SecretResolver trait for looking up named credentials.

/// Resolves a named credential to its current value.
///
/// Called on every catalog fetch, so implementations must not cache
/// values that can rotate.
pub trait SecretResolver: Send + Sync {
    /// Returns `None` when the secret is missing or empty.
    fn get(&self, name: &str) -> Option<String>;
}
