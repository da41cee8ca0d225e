// Match coordination core
//
// Organises pickup games: players join matches that move through a fixed
// lifecycle, strategies rank who to invite, search ranks what to join, and a
// recurring sweep starts confirmed matches when their time comes.
//
// Domain logic is pure and synchronous under domains/; kernel/ holds the shared
// match book, event dispatch and the scheduler.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
