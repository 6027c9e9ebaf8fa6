//! State module for tracking search workers
//!
//! - `WorkerState`: lifecycle of one worker (running, draining, stopped)

mod worker_state;

pub use worker_state::WorkerState;
