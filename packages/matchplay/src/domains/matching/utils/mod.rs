pub mod scoring;

pub use scoring::{is_candidate, rank, sport_affinity};
