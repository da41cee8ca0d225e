pub mod engine;
pub mod models;

// Re-export commonly used types
pub use engine::{available_for, by_sport, near_completion, nearby, search};
pub use models::{SearchFilter, SearchHit};
