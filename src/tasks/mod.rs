//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: sweeps expired flag entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
