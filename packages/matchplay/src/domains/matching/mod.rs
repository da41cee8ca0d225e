pub mod strategies;
pub mod utils;

// Re-export commonly used types
pub use strategies::{
    recommend_players, HistoryStrategy, HybridStrategy, LevelStrategy, MatchingStrategy,
    ProximityStrategy, ScoredCandidate, StrategyKind,
};
