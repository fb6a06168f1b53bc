//! Rabin rolling fingerprint over a 64-byte window.

use super::poly::{default_tables, Tables, WINDOW_SIZE};
use super::RollingHash;

/// Rolling Rabin fingerprint state.
///
/// The digest is the remainder of the window contents, read as a
/// polynomial over GF(2), modulo the fingerprint polynomial. Each `slide`
/// cancels the byte leaving the window through `out_table` and folds the
/// entering byte in through `mod_table`, so the identity holds for streams
/// of any length at a few memory operations per byte.
#[derive(Debug, Clone)]
pub(crate) struct RabinHash {
    window: [u8; WINDOW_SIZE],
    wpos: usize,
    digest: u64,
    tables: &'static Tables,
}

impl RabinHash {
    pub(crate) fn new() -> Self {
        Self {
            window: [0; WINDOW_SIZE],
            wpos: 0,
            digest: 0,
            tables: default_tables(),
        }
    }

    /// One byte-step of polynomial long division using the precomputed
    /// reduction: `digest = ((digest << 8) | b) mod poly`.
    #[inline]
    fn append(&mut self, b: u8) {
        let index = (self.digest >> self.tables.shift) as usize;
        self.digest = ((self.digest << 8) | b as u64) ^ self.tables.modt[index];
    }
}

impl RollingHash for RabinHash {
    fn reset(&mut self) {
        // The digest is the remainder of the window polynomial, so both
        // must be cleared together for the identity to hold after reuse.
        self.window = [0; WINDOW_SIZE];
        self.wpos = 0;
        self.digest = 0;
    }

    #[inline]
    fn slide(&mut self, b: u8) {
        let out = self.window[self.wpos];
        self.window[self.wpos] = b;
        self.digest ^= self.tables.out[out as usize];
        self.wpos = (self.wpos + 1) % WINDOW_SIZE;
        self.append(b);
    }

    #[inline]
    fn digest(&self) -> u64 {
        self.digest
    }
}
