//! Rabin fingerprint chunker.

use std::io::Read;

use bytes::BytesMut;

use super::engine::Engine;
use super::Chunker;
use crate::cdc::RabinHash;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Content-defined chunker using a rolling Rabin fingerprint.
///
/// The fingerprint is the remainder of the current 64-byte window, read as
/// a polynomial over GF(2), modulo a fixed degree-53 polynomial. A chunk
/// boundary is declared when `fingerprint & mask == 0`, no earlier than
/// `min_size` bytes and no later than `max_size` bytes into the chunk.
/// With the default configuration chunks average 1 MiB between bounds of
/// 512 KiB and 8 MiB.
///
/// Because boundaries depend only on the bytes inside the window, an edit
/// in the stream disturbs at most a small neighborhood of chunks; distant
/// boundaries realign, which is what makes the chunker usable for
/// deduplication and delta sync.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use rollchunk::{Chunker, RabinChunker};
///
/// let mut chunker = RabinChunker::with_sizes(256, 1024)?;
/// chunker.reset(Cursor::new(vec![0x5au8; 4000]));
///
/// let mut total = 0;
/// while let Some(chunk) = chunker.next(None)? {
///     assert!(chunk.len() <= 1024);
///     total += chunk.len();
/// }
/// assert_eq!(total, 4000);
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct RabinChunker<R> {
    engine: Engine<RabinHash, R>,
}

impl<R: Read> RabinChunker<R> {
    /// Creates a chunker with the default configuration.
    pub fn new() -> Self {
        Self::build(ChunkConfig::default())
    }

    /// Creates a chunker with custom minimum and maximum chunk sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `min_size` is zero or
    /// greater than `max_size`.
    pub fn with_sizes(min_size: usize, max_size: usize) -> Result<Self, ChunkError> {
        Ok(Self::build(ChunkConfig::new(min_size, max_size)?))
    }

    /// Creates a chunker from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ChunkConfig) -> Self {
        Self {
            engine: Engine::new(RabinHash::new(), config),
        }
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        self.engine.config()
    }
}

impl<R: Read> Default for RabinChunker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> Chunker for RabinChunker<R> {
    type Source = R;

    fn reset(&mut self, source: R) {
        self.engine.reset(source);
    }

    fn next(&mut self, buf: Option<BytesMut>) -> Result<Option<Chunk>, ChunkError> {
        self.engine.next_chunk(buf)
    }
}
