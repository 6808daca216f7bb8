//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: drops stale cached responses so memory does not hold
//!   entries that can no longer be served

mod cleanup;

pub use cleanup::spawn_cleanup_task;
