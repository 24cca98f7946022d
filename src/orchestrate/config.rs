//! Configuration for parallel runs.

/// How many actions a parallel run keeps in flight at once.
///
/// # Examples
///
/// ```rust
/// use flowline::ParallelConfig;
///
/// let config = ParallelConfig::new().with_max_concurrency(4);
/// assert_eq!(config.max_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    max_concurrency: usize,
}

impl ParallelConfig {
    /// One in-flight action per logical core.
    ///
    /// ```rust
    /// use flowline::ParallelConfig;
    ///
    /// assert!(ParallelConfig::new().max_concurrency() >= 1);
    /// ```
    pub fn new() -> Self {
        Self {
            max_concurrency: num_cpus::get().max(1),
        }
    }

    /// Set the maximum number of actions in flight.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero; a run that can launch nothing would never finish.
    ///
    /// ```rust,should_panic
    /// use flowline::ParallelConfig;
    ///
    /// let _ = ParallelConfig::new().with_max_concurrency(0);
    /// ```
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        assert!(n > 0, "ParallelConfig::with_max_concurrency requires n > 0");
        self.max_concurrency = n;
        self
    }

    /// Get the maximum number of actions in flight.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// A config that runs one action at a time.
    pub fn serial() -> Self {
        Self { max_concurrency: 1 }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new()
    }
}
