//! Gear rolling hash.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::RollingHash;

/// Default seed for the gear table, the 64-bit golden ratio constant.
pub(crate) const DEFAULT_GEAR_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Rolling Gear hash state.
///
/// Per byte the digest shifts left by one bit and adds a random table
/// value, so a byte's influence fades after 32 steps. Much cheaper than
/// the Rabin update at the cost of a shorter effective window.
#[derive(Debug, Clone)]
pub(crate) struct GearHash {
    table: [u32; 256],
    digest: u32,
}

impl GearHash {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            table: gear_table(seed),
            digest: 0,
        }
    }
}

/// Fills the 256-entry table with random 32-bit values from a seeded PRNG.
fn gear_table(seed: u64) -> [u32; 256] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = [0u32; 256];
    for entry in &mut table {
        *entry = rng.next_u32();
    }
    table
}

impl RollingHash for GearHash {
    fn reset(&mut self) {
        self.digest = 0;
    }

    #[inline]
    fn slide(&mut self, b: u8) {
        self.digest = (self.digest << 1).wrapping_add(self.table[b as usize]);
    }

    #[inline]
    fn digest(&self) -> u64 {
        self.digest as u64
    }
}
