//! Background and on-demand frame loading.

/// Warm-up sweep and windowed bursts.
pub mod scheduler;
/// Task executors.
pub mod spawn;
