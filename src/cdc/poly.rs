//! Polynomial arithmetic over GF(2) and lookup table construction.
//!
//! A `u64` is read as the coefficient vector of a polynomial with
//! coefficients in {0, 1}: addition is XOR, multiplication by `x` is a left
//! shift. The Rabin fingerprint of a byte window is the remainder of the
//! window polynomial modulo a fixed irreducible polynomial.
//!
//! Two tables turn per-byte long division into a handful of XORs:
//!
//! - `mod_table[b]` folds the "shift by 8 bits, then reduce" step into one
//!   XOR, indexed by the top byte of the digest.
//! - `out_table[b]` is the residual influence a byte still has on the
//!   digest after it has been shifted through the whole window; XORing it
//!   removes the byte when it falls out of the window.

use std::sync::OnceLock;

/// The default fingerprint polynomial, irreducible over GF(2), degree 53.
pub(crate) const RABIN_POLY: u64 = 0x3DA3358B4DC173;

/// The number of bytes the fingerprint rolls over.
pub(crate) const WINDOW_SIZE: usize = 64;

/// Precomputed reduction tables for a fixed `(poly, window)` pair.
#[derive(Debug)]
pub(crate) struct Tables {
    /// Residual window-exit contribution per byte value.
    pub(crate) out: [u64; 256],
    /// Combined shift-and-reduce step per top-byte value.
    pub(crate) modt: [u64; 256],
    /// Right shift that extracts the digest's top byte: `deg(poly) - 8`.
    pub(crate) shift: u32,
}

/// Returns the degree of polynomial `p`, or -1 if `p` is zero.
pub(crate) fn deg(p: u64) -> i32 {
    63 - p.leading_zeros() as i32
}

/// Returns the remainder of `p` modulo `q`.
///
/// Subtracts (XORs) `q` shifted up to the leading bit of `p` until the
/// degree of `p` drops below the degree of `q`.
pub(crate) fn rem(mut p: u64, q: u64) -> u64 {
    debug_assert!(q != 0, "modulus must be non-zero");
    let dq = deg(q);
    let mut dp = deg(p);
    while dp >= dq {
        p ^= q << (dp - dq) as u32;
        dp = deg(p);
    }
    p
}

/// Extends `sum` by one byte and reduces modulo `poly`.
pub(crate) fn append_byte(sum: u64, b: u8, poly: u64) -> u64 {
    rem((sum << 8) | b as u64, poly)
}

/// Computes the lookup tables for `poly` and a window of `window` bytes.
pub(crate) fn calc_tables(poly: u64, window: usize) -> Tables {
    let mut out = [0u64; 256];
    for (b, entry) in out.iter_mut().enumerate() {
        // A byte's contribution after it has been shifted through the
        // remaining window - 1 positions.
        let mut h = append_byte(0, b as u8, poly);
        for _ in 0..window - 1 {
            h = append_byte(h, 0, poly);
        }
        *entry = h;
    }

    let k = deg(poly);
    let mut modt = [0u64; 256];
    for (b, entry) in modt.iter_mut().enumerate() {
        let p = (b as u64) << k as u32;
        // OR with the unreduced form so one XOR both clears the top byte
        // and adds its reduction.
        *entry = rem(p, poly) | p;
    }

    Tables {
        out,
        modt,
        shift: (k - 8) as u32,
    }
}

/// Returns the process-wide tables for the default polynomial.
///
/// The polynomial and window size are fixed, so a single immutable table
/// pair is shared by every chunker instance.
pub(crate) fn default_tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| calc_tables(RABIN_POLY, WINDOW_SIZE))
}
