//! The chunking state machine shared by both algorithms.
//!
//! [`Engine`] drives a rolling hash over a staged byte stream and applies
//! the boundary protocol: a minimum-size phase with boundary checks
//! suppressed, an immediate check once the minimum is reached, a search
//! phase that checks after every byte, and an unconditional cut at the
//! maximum size. Chunk bytes that span staging refills are carried in the
//! chunk's own buffer, so chunks may be arbitrarily larger than the
//! staging buffer.

use std::io::Read;

use bytes::BytesMut;

use crate::cdc::RollingHash;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::reader::Staging;

/// Outcome of consuming one byte from the staged stream.
enum Step {
    /// A byte was slid into the hash.
    Byte,
    /// The stream ended; no byte was consumed.
    Eof,
}

/// Chunking state machine, generic over the rolling hash.
#[derive(Debug)]
pub(crate) struct Engine<H, R> {
    hash: H,
    staging: Staging<R>,
    config: ChunkConfig,
    mask: u64,
    /// Stream offset of the next chunk to be emitted.
    offset: u64,
}

impl<H: RollingHash, R: Read> Engine<H, R> {
    /// Builds an engine from a validated configuration.
    pub(crate) fn new(hash: H, config: ChunkConfig) -> Self {
        Self {
            hash,
            staging: Staging::new(config.staging_size()),
            mask: config.boundary_mask(),
            config,
            offset: 0,
        }
    }

    pub(crate) fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Binds a new source and reinitializes all per-stream state.
    ///
    /// The sentinel byte slid here is part of the fingerprint definition:
    /// the first stream byte never meets an all-zero window state.
    pub(crate) fn reset(&mut self, source: R) {
        self.staging.rebind(source);
        self.hash.reset();
        self.hash.slide(1);
        self.offset = 0;
    }

    /// Advances to the next chunk.
    ///
    /// `buf`, when given, becomes the chunk's data buffer: it is cleared
    /// and refilled, growing only if the chunk outgrows its capacity.
    /// Returns `Ok(None)` exactly once per stream position when the stream
    /// is exhausted; the call is repeatable without touching the source.
    pub(crate) fn next_chunk(
        &mut self,
        buf: Option<BytesMut>,
    ) -> Result<Option<Chunk>, ChunkError> {
        let mut data = buf.unwrap_or_default();
        data.clear();

        if self.staging.is_drained() && !self.staging.fill()? {
            return Ok(None);
        }
        self.staging.mark();

        let mut count = 0usize;

        // Minimum-size phase: boundaries below min_size are suppressed, so
        // no mask checks happen here.
        while count < self.config.min_size() {
            match self.step(&mut data)? {
                Step::Byte => count += 1,
                Step::Eof => return Ok(Some(self.emit(data))),
            }
        }

        // The minimum phase may itself end on a boundary.
        if self.hash.digest() & self.mask == 0 {
            return Ok(Some(self.emit(data)));
        }

        // Search phase: check after every byte; the byte that matches is
        // included in the chunk.
        while count < self.config.max_size() {
            match self.step(&mut data)? {
                Step::Byte => {
                    count += 1;
                    if self.hash.digest() & self.mask == 0 {
                        return Ok(Some(self.emit(data)));
                    }
                }
                Step::Eof => return Ok(Some(self.emit(data))),
            }
        }

        // No boundary within bounds: cut unmodulated at exactly max_size.
        Ok(Some(self.emit(data)))
    }

    /// Consumes one byte, refilling the staging buffer when it drains.
    ///
    /// Before a refill the consumed tail is carried into `data`; the mark
    /// restarts at the head of the fresh buffer.
    #[inline]
    fn step(&mut self, data: &mut BytesMut) -> Result<Step, ChunkError> {
        if self.staging.is_drained() {
            data.extend_from_slice(self.staging.marked());
            if !self.staging.fill()? {
                return Ok(Step::Eof);
            }
        }
        self.hash.slide(self.staging.take_byte());
        Ok(Step::Byte)
    }

    /// Assembles the chunk from the carried tail plus the marked span.
    fn emit(&mut self, mut data: BytesMut) -> Chunk {
        data.extend_from_slice(self.staging.marked());
        let offset = self.offset;
        self.offset += data.len() as u64;
        Chunk {
            data,
            cut: self.hash.digest(),
            offset,
        }
    }
}
