/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with gvmd and the session store
/// through ports.
pub mod dto;
pub mod use_cases;
