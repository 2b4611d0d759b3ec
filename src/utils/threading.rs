//! # Threading Configuration
//!
//! Configure rayon thread pools for panel-wide scans. Searches are
//! data-parallel with no shared mutable state, so a pool sized to the
//! machine is all the tuning they need.

use crate::error::{HaplokitError, Result};

/// Create a configured thread pool.
///
/// Pass `0` to let rayon size the pool to the available cores. Run
/// searches inside it with `pool.install(|| library.compatible_with(&g))`.
pub fn build_thread_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("haplokit-worker-{i}"))
        .build()
        .map_err(|e| HaplokitError::config(format!("failed to create thread pool: {e}")))
}
