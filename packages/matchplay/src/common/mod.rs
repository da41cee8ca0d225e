// Shared value types used across every domain

pub mod entity_ids;
pub mod id;
pub mod location;

pub use entity_ids::*;
pub use id::Id;
pub use location::{calculate_distance_km, Location};
