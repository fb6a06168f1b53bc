//! Rolling hash cores for content-defined boundary detection.
//!
//! - [`RabinHash`] - polynomial-remainder fingerprint over a 64-byte window
//! - [`GearHash`] - shift-add hash over a random table
//! - [`RollingHash`] - the per-byte update contract both cores implement
//! - [`BoundaryScanner`] - min/max gating on top of a rolling hash

mod gear;
mod poly;
mod rabin;

pub(crate) use gear::{GearHash, DEFAULT_GEAR_SEED};
pub(crate) use rabin::RabinHash;

use crate::config::ChunkConfig;

/// Per-byte rolling hash contract.
///
/// Implementations keep their digest across chunk boundaries; only a
/// stream `reset` clears it. The chunkers slide a sentinel byte of 1
/// immediately after every reset, before any stream byte.
pub(crate) trait RollingHash {
    /// Clears all rolling state for a new stream.
    fn reset(&mut self);

    /// Feeds one byte into the sliding window.
    fn slide(&mut self, b: u8);

    /// Returns the current digest.
    fn digest(&self) -> u64;
}

/// Boundary gating on top of a rolling hash.
///
/// `update` feeds one byte and reports whether the byte ends a chunk:
/// boundaries below the minimum size are suppressed, a match of
/// `digest & mask == 0` at or above it cuts, and the maximum size cuts
/// unconditionally. These are the same rules the synchronous engine
/// applies, so a given input partitions identically through either path.
#[derive(Debug)]
#[cfg_attr(not(feature = "async-io"), allow(dead_code))]
pub(crate) struct BoundaryScanner<H> {
    hash: H,
    mask: u64,
    min_size: usize,
    max_size: usize,
    count: usize,
}

#[cfg_attr(not(feature = "async-io"), allow(dead_code))]
impl<H: RollingHash> BoundaryScanner<H> {
    pub(crate) fn new(mut hash: H, config: &ChunkConfig) -> Self {
        hash.reset();
        hash.slide(1);
        Self {
            hash,
            mask: config.boundary_mask(),
            min_size: config.min_size(),
            max_size: config.max_size(),
            count: 0,
        }
    }

    /// Feeds one byte; returns `true` if the byte closes a chunk.
    #[inline]
    pub(crate) fn update(&mut self, b: u8) -> bool {
        self.hash.slide(b);
        self.count += 1;

        if self.count < self.min_size {
            return false;
        }
        if self.count >= self.max_size || self.hash.digest() & self.mask == 0 {
            self.count = 0;
            return true;
        }
        false
    }

    /// Returns the current digest, the `cut` value of a chunk emitted at
    /// this position.
    #[inline]
    pub(crate) fn digest(&self) -> u64 {
        self.hash.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(min: usize, max: usize, avg: usize) -> BoundaryScanner<RabinHash> {
        let config = ChunkConfig::new(min, max)
            .unwrap()
            .with_avg_size(avg);
        BoundaryScanner::new(RabinHash::new(), &config)
    }

    #[test]
    fn test_no_boundary_below_min() {
        let mut s = scanner(8, 16, 2);
        // With a 1-bit mask roughly half of all positions match, but none
        // may cut below the minimum size.
        for i in 0..7 {
            assert!(!s.update(i as u8), "cut below min at byte {}", i);
        }
    }

    #[test]
    fn test_max_size_forces_boundary() {
        // An average far above max means the mask never matches, so every
        // cut must come from the max clamp.
        let config = ChunkConfig::new(4, 8).unwrap();
        let mut s = BoundaryScanner::new(RabinHash::new(), &config);

        let mut cuts = Vec::new();
        for i in 0..32u32 {
            if s.update(i as u8) {
                cuts.push(i + 1);
            }
        }
        assert_eq!(cuts, vec![8, 16, 24, 32]);
    }

    #[test]
    fn test_count_restarts_after_cut() {
        let config = ChunkConfig::new(5, 5).unwrap();
        let mut s = BoundaryScanner::new(RabinHash::new(), &config);

        for round in 0..3 {
            for i in 0..4 {
                assert!(!s.update(i), "early cut in round {}", round);
            }
            assert!(s.update(0xff));
        }
    }
}
