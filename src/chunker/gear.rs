//! Gear hash chunker.

use std::io::Read;

use bytes::BytesMut;

use super::engine::Engine;
use super::Chunker;
use crate::cdc::{GearHash, DEFAULT_GEAR_SEED};
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Content-defined chunker using the Gear rolling hash.
///
/// Per input byte the 32-bit digest shifts left one bit and adds an entry
/// from a 256-entry table of random values, so the hash is considerably
/// cheaper than the Rabin fingerprint while still yielding content-defined
/// boundaries. The table is derived from a seeded PRNG at construction;
/// two chunkers with the same seed produce identical partitions.
///
/// Boundary detection, size gating, and reader discipline are identical to
/// [`RabinChunker`](super::RabinChunker): `digest & mask == 0` cuts a
/// chunk between `min_size` and `max_size` bytes.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use rollchunk::{Chunker, GearChunker};
///
/// let mut chunker = GearChunker::with_seed(7);
/// chunker.reset(Cursor::new(vec![0x33u8; 2000]));
///
/// let mut total = 0;
/// while let Some(chunk) = chunker.next(None)? {
///     total += chunk.len();
/// }
/// assert_eq!(total, 2000);
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct GearChunker<R> {
    engine: Engine<GearHash, R>,
}

impl<R: Read> GearChunker<R> {
    /// Creates a chunker with the default configuration and table seed.
    pub fn new() -> Self {
        Self::build(ChunkConfig::default(), DEFAULT_GEAR_SEED)
    }

    /// Creates a chunker with the default configuration and a custom
    /// table seed.
    ///
    /// Distinct seeds give distinct boundary positions over the same
    /// input, which can be used to key chunking per data set.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(ChunkConfig::default(), seed)
    }

    /// Creates a chunker from a full configuration, with the default seed.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::build(config, DEFAULT_GEAR_SEED))
    }

    fn build(config: ChunkConfig, seed: u64) -> Self {
        Self {
            engine: Engine::new(GearHash::new(seed), config),
        }
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        self.engine.config()
    }
}

impl<R: Read> Default for GearChunker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> Chunker for GearChunker<R> {
    type Source = R;

    fn reset(&mut self, source: R) {
        self.engine.reset(source);
    }

    fn next(&mut self, buf: Option<BytesMut>) -> Result<Option<Chunk>, ChunkError> {
        self.engine.next_chunk(buf)
    }
}
