//! Configuration for chunking behavior.
//!
//! This module provides [`ChunkConfig`], which controls chunk size bounds,
//! the boundary mask, and the staging buffer size, along with the public
//! size constants.
//!
//! # Example
//!
//! ```
//! use rollchunk::{ChunkConfig, KIB};
//!
//! // Custom chunk sizes: min 64 KiB, max 1 MiB
//! let config = ChunkConfig::new(64 * KIB, 1024 * KIB)?;
//! assert_eq!(config.min_size(), 64 * KIB);
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// One kibibyte.
pub const KIB: usize = 1024;

/// One mebibyte.
pub const MIB: usize = 1024 * 1024;

/// Default minimum chunk size (512 KiB).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 512 * KIB;

/// Default average chunk size (1 MiB); the boundary mask is `avg - 1`.
pub const DEFAULT_AVG_CHUNK_SIZE: usize = MIB;

/// Default maximum chunk size (8 MiB).
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 8 * MIB;

/// Default staging buffer size (2 MiB).
pub const DEFAULT_STAGING_SIZE: usize = 2 * MIB;

/// Configuration for content-defined chunking behavior.
///
/// `ChunkConfig` controls the size constraints of the chunking process:
///
/// - Minimum chunk size (`min_size`) - boundaries below it are suppressed
/// - Maximum chunk size (`max_size`) - a chunk is cut there unconditionally
/// - Average chunk size (`avg_size`) - the boundary mask is `avg_size - 1`,
///   so with random input the expected chunk size is `avg_size`
/// - Staging size (`staging_size`) - the fixed read buffer in front of the
///   source; independent of `max_size`, chunks larger than the staging
///   buffer are assembled across refills
///
/// `min_size` and `max_size` may be arbitrary byte counts; only `avg_size`
/// must be a power of two. Bounds far below `avg_size` are legal and simply
/// make every chunk max-clamped.
///
/// # Example
///
/// ```
/// use rollchunk::ChunkConfig;
///
/// // Default configuration (512 KiB .. 8 MiB, 1 MiB average)
/// let config = ChunkConfig::default();
///
/// // Small chunks with a 4 KiB average
/// let config = ChunkConfig::new(1024, 16 * 1024)?.with_avg_size(4096);
/// assert!(config.validate().is_ok());
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    /// Minimum chunk size in bytes.
    min_size: usize,

    /// Maximum chunk size in bytes.
    max_size: usize,

    /// Average chunk size in bytes; must be a power of two.
    avg_size: usize,

    /// Staging buffer size in bytes.
    staging_size: usize,
}

impl ChunkConfig {
    /// Creates a new configuration with the specified size bounds.
    ///
    /// The average size and staging size keep their defaults
    /// ([`DEFAULT_AVG_CHUNK_SIZE`], [`DEFAULT_STAGING_SIZE`]); use the
    /// builder setters to change them.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `min_size` is zero or
    /// `min_size > max_size`.
    ///
    /// # Example
    ///
    /// ```
    /// use rollchunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::new(8, 16)?;
    /// assert_eq!(config.max_size(), 16);
    ///
    /// assert!(ChunkConfig::new(16, 8).is_err());
    /// # Ok::<(), rollchunk::ChunkError>(())
    /// ```
    pub fn new(min_size: usize, max_size: usize) -> Result<Self, ChunkError> {
        let config = Self {
            min_size,
            max_size,
            avg_size: DEFAULT_AVG_CHUNK_SIZE,
            staging_size: DEFAULT_STAGING_SIZE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the minimum chunk size.
    ///
    /// Note: builder setters do not validate. Use [`ChunkConfig::validate`]
    /// to check the final configuration.
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the maximum chunk size.
    ///
    /// Note: builder setters do not validate. Use [`ChunkConfig::validate`]
    /// to check the final configuration.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets the average chunk size, which defines the boundary mask.
    ///
    /// Must be a power of two for the configuration to validate.
    ///
    /// # Example
    ///
    /// ```
    /// use rollchunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_avg_size(64 * 1024);
    /// assert_eq!(config.avg_size(), 64 * 1024);
    /// ```
    pub fn with_avg_size(mut self, size: usize) -> Self {
        self.avg_size = size;
        self
    }

    /// Sets the staging buffer size.
    ///
    /// The staging buffer is allocated once per chunker and reused for the
    /// chunker's lifetime. It does not bound the chunk size.
    pub fn with_staging_size(mut self, size: usize) -> Self {
        self.staging_size = size;
        self
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the average chunk size.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the staging buffer size.
    pub fn staging_size(&self) -> usize {
        self.staging_size
    }

    /// Returns the boundary mask derived from the average size.
    ///
    /// A chunk boundary is declared when `digest & mask == 0`.
    pub fn boundary_mask(&self) -> u64 {
        (self.avg_size as u64).wrapping_sub(1)
    }

    /// Validates the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if any size is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use rollchunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::default().with_min_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.min_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "min_size must be non-zero",
            });
        }

        if self.min_size > self.max_size {
            return Err(ChunkError::InvalidConfig {
                message: "min_size cannot be greater than max_size",
            });
        }

        if self.avg_size < 2 || !self.avg_size.is_power_of_two() {
            return Err(ChunkError::InvalidConfig {
                message: "avg_size must be a power of two (at least 2)",
            });
        }

        if self.staging_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "staging_size must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_CHUNK_SIZE,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
            avg_size: DEFAULT_AVG_CHUNK_SIZE,
            staging_size: DEFAULT_STAGING_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.min_size(), DEFAULT_MIN_CHUNK_SIZE);
        assert_eq!(config.avg_size(), DEFAULT_AVG_CHUNK_SIZE);
        assert_eq!(config.max_size(), DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(config.staging_size(), DEFAULT_STAGING_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_boundary_mask() {
        let config = ChunkConfig::default();
        assert_eq!(config.boundary_mask(), (MIB - 1) as u64);

        let config = config.with_avg_size(8 * KIB);
        assert_eq!(config.boundary_mask(), 0x1fff);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChunkConfig::default()
            .with_min_size(8192)
            .with_avg_size(32768)
            .with_max_size(131072)
            .with_staging_size(4096);

        assert_eq!(config.min_size(), 8192);
        assert_eq!(config.avg_size(), 32768);
        assert_eq!(config.max_size(), 131072);
        assert_eq!(config.staging_size(), 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_zero_min() {
        assert!(ChunkConfig::new(0, 16384).is_err());
    }

    #[test]
    fn test_invalid_min_gt_max() {
        assert!(ChunkConfig::new(32768, 16384).is_err());
    }

    #[test]
    fn test_invalid_avg_not_power_of_two() {
        let config = ChunkConfig::default().with_avg_size(3000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_zero_staging() {
        let config = ChunkConfig::default().with_staging_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds_below_avg_are_legal() {
        // Tiny bounds with the default 1 MiB average simply force
        // max-clamped chunks.
        let config = ChunkConfig::new(8, 16).unwrap();
        assert!(config.validate().is_ok());

        // Odd, non-power-of-two bounds are legal too.
        let config = ChunkConfig::new(11, 71).unwrap();
        assert!(config.validate().is_ok());
    }
}
