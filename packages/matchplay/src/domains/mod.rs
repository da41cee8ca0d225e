pub mod matches;
pub mod matching;
pub mod players;
pub mod search;
pub mod sports;
