//! Background Tasks Module
//!
//! Infrastructure jobs that run alongside the HTTP server.
//!
//! # Tasks
//! - Cache cleanup: sweeps expired entries at a configured interval (opt-in)

mod cleanup;

pub use cleanup::spawn_cleanup_task;
