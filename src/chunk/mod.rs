//! Chunk data representation.

use std::fmt;

use bytes::{Bytes, BytesMut};

/// A content-defined chunk emitted by a chunker.
///
/// Contains:
/// - `data` - the exact bytes consumed for this chunk, in stream order
/// - `cut` - the rolling-fingerprint value at the chunk boundary
/// - `offset` - the byte position of the chunk's first byte in the stream
///
/// Concatenating the `data` of every chunk emitted between a `reset` and
/// end-of-stream reproduces the source byte sequence exactly.
///
/// `cut` is diagnostic metadata: it is not a cryptographic digest and must
/// not be used as a content identity. Consumers that need deduplication
/// identity should hash `data` with a strong hash of their choosing.
///
/// `data` is a [`BytesMut`] so the allocation can be recycled: hand the
/// buffer recovered with [`Chunk::into_data`] back to the chunker's `next`
/// call and no new allocation is made as long as the capacity suffices.
///
/// # Example
///
/// ```
/// use bytes::BytesMut;
/// use rollchunk::Chunk;
///
/// let chunk = Chunk {
///     data: BytesMut::from(&b"hello world"[..]),
///     cut: 0x1234,
///     offset: 0,
/// };
/// assert_eq!(chunk.len(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The chunk data.
    pub data: BytesMut,

    /// The fingerprint value at the chunk's final byte.
    pub cut: u64,

    /// The offset of the chunk's first byte in the stream.
    pub offset: u64,
}

impl Chunk {
    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the chunk contains no data.
    ///
    /// Chunkers never emit empty chunks; this exists for completeness.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the fingerprint value at the chunk boundary.
    pub fn cut(&self) -> u64 {
        self.cut
    }

    /// Returns the offset of the chunk's first byte in the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the offset one past the chunk's last byte.
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a stream range `[offset, end)`.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying buffer.
    ///
    /// The returned buffer can be passed back to a chunker's `next` call
    /// to reuse the allocation.
    pub fn into_data(self) -> BytesMut {
        self.data
    }

    /// Consumes the chunk and freezes its data into an immutable [`Bytes`].
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, cut={:#x})",
            self.len(),
            self.offset,
            self.cut
        )
    }
}
