//! Chunker contract and implementations.
//!
//! - [`Chunker`] - the polymorphic chunking contract
//! - [`RabinChunker`] - rolling polynomial fingerprint over a 64-byte window
//! - [`GearChunker`] - shift-add hash over a seeded random table
//! - [`ChunkIter`] - borrowing iterator over a chunker's output

mod engine;
mod gear;
mod rabin;

pub use gear::GearChunker;
pub use rabin::RabinChunker;

use std::io::Read;

use bytes::BytesMut;

use crate::chunk::Chunk;
use crate::error::ChunkError;

/// A chunker splits a stream of bytes into content-defined chunks.
///
/// The contract is pull-based: [`Chunker::reset`] binds a byte-stream
/// source, then each [`Chunker::next`] call consumes bytes until it can
/// emit a chunk. A chunk is returned if and only if the call succeeds;
/// `Ok(None)` is the end-of-stream signal.
///
/// After any terminal signal, end-of-stream or error, subsequent calls
/// repeat the same outcome without touching the source, and the source
/// itself is released.
///
/// The trait is object-safe, so an algorithm can be picked at run time:
///
/// ```
/// use std::io::Cursor;
/// use rollchunk::{Chunker, GearChunker, RabinChunker};
///
/// type Source = Cursor<Vec<u8>>;
///
/// let use_gear = false;
/// let mut chunker: Box<dyn Chunker<Source = Source>> = if use_gear {
///     Box::new(GearChunker::new())
/// } else {
///     Box::new(RabinChunker::new())
/// };
/// chunker.reset(Cursor::new(vec![0u8; 100]));
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
pub trait Chunker {
    /// The byte-stream source this chunker reads from.
    type Source: Read;

    /// Binds a new source and clears all per-stream state. Always succeeds.
    fn reset(&mut self, source: Self::Source);

    /// Pulls the next chunk.
    ///
    /// `buf`, when given, is reused as the chunk's data buffer: it is
    /// cleared, refilled, and grown only if the chunk exceeds its
    /// capacity. Without it the chunker allocates a buffer sized to the
    /// chunk.
    ///
    /// # Errors
    ///
    /// Exactly the source's errors, except that a short read ending the
    /// stream is reported as end-of-stream (`Ok(None)`). If bytes of a
    /// partial chunk were already consumed when a hard error arrives,
    /// they are discarded and the error surfaces instead.
    fn next(&mut self, buf: Option<BytesMut>) -> Result<Option<Chunk>, ChunkError>;

    /// Returns an iterator over the remaining chunks of the bound stream.
    ///
    /// The iterator yields `Err` at most once, then fuses.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Cursor;
    /// use rollchunk::{Chunker, RabinChunker};
    ///
    /// let mut chunker = RabinChunker::new();
    /// chunker.reset(Cursor::new(vec![0u8; 4096]));
    ///
    /// let mut total = 0;
    /// for chunk in chunker.chunks() {
    ///     total += chunk?.len();
    /// }
    /// assert_eq!(total, 4096);
    /// # Ok::<(), rollchunk::ChunkError>(())
    /// ```
    fn chunks(&mut self) -> ChunkIter<'_, Self>
    where
        Self: Sized,
    {
        ChunkIter {
            chunker: self,
            done: false,
        }
    }
}

/// Iterator over a chunker's output, created by [`Chunker::chunks`].
#[derive(Debug)]
pub struct ChunkIter<'a, C: ?Sized> {
    chunker: &'a mut C,
    done: bool,
}

impl<C: Chunker + ?Sized> Iterator for ChunkIter<'_, C> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.chunker.next(None) {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
