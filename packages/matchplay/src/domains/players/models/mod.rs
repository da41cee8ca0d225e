pub mod history;
pub mod player;

pub use history::{MatchOutcome, PastMatch};
pub use player::{Gender, Player, SkillLevel};
