pub mod models;

pub use models::{Gender, MatchOutcome, PastMatch, Player, SkillLevel};
