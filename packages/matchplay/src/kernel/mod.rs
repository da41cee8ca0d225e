//! Runtime pieces around the pure domain: the shared match book, event
//! dispatch, the recurring start sweep and the match file.

pub mod book;
pub mod dispatch;
pub mod scheduled_tasks;
pub mod store;

// Re-export commonly used types
pub use book::{BookError, MatchBook, SharedMatch};
pub use dispatch::{EventDispatcher, EventListener, RecordingListener, TracingListener};
pub use scheduled_tasks::{promote_if_due, start_scheduler, sweep, SweepReport};
pub use store::{load_matches, save_matches};
