//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at a fixed interval

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupTask, CLEANUP_THREAD_NAME};
