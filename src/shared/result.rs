/// Crate-wide result type. Domain failures are `HyperionError` values
/// carried inside `anyhow::Error` so callers can downcast when needed.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
