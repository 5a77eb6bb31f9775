//! Liveness endpoint for the process supervisor.

pub use server::{run, run_with_listener, spawn_with_listener};

mod server;
