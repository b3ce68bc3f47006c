//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired entries at the configured interval

mod sweeper;

pub(crate) use sweeper::spawn_sweeper;
