//! Parallel processing configuration
//!
//! Reductions run on Rayon. By default they use the global pool; a
//! [`ParallelConfig`] with an explicit thread count runs them on a dedicated pool.

use crate::errors::{Result, TimeSeriesError};
use rayon::ThreadPoolBuilder;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    #[must_use]
    pub const fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Use all available CPU cores
    #[must_use]
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    #[must_use]
    pub const fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Set up the global Rayon thread pool
    ///
    /// # Errors
    ///
    /// Returns `ThreadPoolError` if the global pool was already initialized.
    pub fn setup_global_pool(&self) -> Result<()> {
        if let Some(num_threads) = self.num_threads {
            ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    TimeSeriesError::ThreadPoolError(format!(
                        "Failed to initialize thread pool with {num_threads} threads: {e}"
                    ))
                })?;
            log::info!("Configured parallel processing with {num_threads} threads");
        } else {
            log::info!("Using default thread pool configuration");
        }
        Ok(())
    }

    /// Run `op` on a pool sized by this configuration, or on the current pool
    ///
    /// # Errors
    ///
    /// Returns `ThreadPoolError` if a dedicated pool cannot be built.
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self.num_threads {
            Some(num_threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        TimeSeriesError::ThreadPoolError(format!(
                            "Failed to build thread pool with {num_threads} threads: {e}"
                        ))
                    })?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }

    /// Threads the configuration will use
    #[must_use]
    pub fn current_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(rayon::current_num_threads)
    }
}

/// Get information about the parallel processing environment
#[must_use]
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    pub fn log_info(&self) {
        log::info!(
            "Parallel processing: {} threads, {} CPU cores, parallelism {}",
            self.current_threads,
            self.available_cores,
            self.available_parallelism
        );
    }
}
