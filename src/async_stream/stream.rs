//! Async stream adapter for chunking.
//!
//! This module provides asynchronous chunking via the
//! `futures_io::AsyncRead` trait, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! Boundary decisions are made by the same rolling fingerprint and gating
//! rules as the synchronous [`RabinChunker`](crate::RabinChunker), so a
//! given input and configuration partition identically through either
//! path.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rollchunk::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), rollchunk::ChunkError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::default());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::cdc::{BoundaryScanner, RabinHash};
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

const READ_BUF_SIZE: usize = 8 * 1024;

pin_project! {
    /// A stream that yields content-defined chunks from an async reader.
    ///
    /// Created by [`chunk_async`]. Yields `Result<Chunk, ChunkError>`; an
    /// error ends the stream. Any bytes of a partial chunk consumed before
    /// a hard read error are discarded with it.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        scanner: BoundaryScanner<RabinHash>,
        read_buf: Box<[u8]>,
        chunk_buf: BytesMut,
        // Bytes of chunk_buf already fed to the scanner; bytes are hashed
        // exactly once even when a refill lands mid-chunk.
        scanned: usize,
        offset: u64,
        finished: bool,
        config_err: Option<ChunkError>,
    }
}

impl<R> ChunkStream<R> {
    fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            config_err: config.validate().err(),
            reader,
            scanner: BoundaryScanner::new(RabinHash::new(), &config),
            read_buf: vec![0; READ_BUF_SIZE].into_boxed_slice(),
            chunk_buf: BytesMut::new(),
            scanned: 0,
            offset: 0,
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }
        if let Some(err) = this.config_err.take() {
            *this.finished = true;
            return Poll::Ready(Some(Err(err)));
        }

        loop {
            // Scan unhashed bytes for a boundary.
            while *this.scanned < this.chunk_buf.len() {
                let b = this.chunk_buf[*this.scanned];
                *this.scanned += 1;
                if this.scanner.update(b) {
                    let data = this.chunk_buf.split_to(*this.scanned);
                    *this.scanned = 0;
                    let chunk = Chunk {
                        cut: this.scanner.digest(),
                        offset: *this.offset,
                        data,
                    };
                    *this.offset += chunk.len() as u64;
                    return Poll::Ready(Some(Ok(chunk)));
                }
            }

            // All buffered bytes hashed without a boundary; pull more.
            match this.reader.as_mut().poll_read(cx, this.read_buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    if this.chunk_buf.is_empty() {
                        return Poll::Ready(None);
                    }
                    let data = this.chunk_buf.split_off(0);
                    let chunk = Chunk {
                        cut: this.scanner.digest(),
                        offset: *this.offset,
                        data,
                    };
                    *this.offset += chunk.len() as u64;
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Poll::Ready(Ok(n)) => {
                    this.chunk_buf.extend_from_slice(&this.read_buf[..n]);
                }
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    // Short read at the end is plain end-of-stream.
                    *this.finished = true;
                    if this.chunk_buf.is_empty() {
                        return Poll::Ready(None);
                    }
                    let data = this.chunk_buf.split_off(0);
                    let chunk = Chunk {
                        cut: this.scanner.digest(),
                        offset: *this.offset,
                        data,
                    };
                    *this.offset += chunk.len() as u64;
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    this.chunk_buf.clear();
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat::TokioAsyncReadCompatExt`.
///
/// An invalid `config` is reported as the stream's first and only item.
///
/// # Example
///
/// ```ignore
/// use futures_util::StreamExt;
/// use rollchunk::{chunk_async, ChunkConfig};
///
/// let data: &[u8] = &[0u8; 8192];
/// let mut stream = chunk_async(data, ChunkConfig::default());
/// while let Some(chunk) = stream.next().await {
///     println!("{}", chunk?);
/// }
/// # Ok::<(), rollchunk::ChunkError>(())
/// ```
pub fn chunk_async<R: AsyncRead>(reader: R, config: ChunkConfig) -> ChunkStream<R> {
    ChunkStream::new(reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::{Chunker, RabinChunker};
    use futures_util::StreamExt;
    use std::io::Cursor;

    fn test_config() -> ChunkConfig {
        ChunkConfig::new(32, 2048).unwrap().with_avg_size(256)
    }

    fn patterned(len: usize) -> Vec<u8> {
        let mut x: u32 = 0x1234_5678;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (x >> 24) as u8
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let reader: &[u8] = &[];
        let mut stream = chunk_async(reader, test_config());
        assert!(stream.next().await.is_none());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_reassembly() {
        let data = patterned(10_000);
        let stream = chunk_async(&data[..], test_config());
        let chunks: Vec<Chunk> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        let mut reassembled = Vec::new();
        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            expected_offset += chunk.len() as u64;
            reassembled.extend_from_slice(&chunk.data);
        }
        assert_eq!(reassembled, data);
    }

    #[tokio::test]
    async fn test_matches_sync_partition() {
        let data = patterned(50_000);
        let config = test_config().with_staging_size(512);

        let mut sync_chunker = RabinChunker::with_config(config).unwrap();
        sync_chunker.reset(Cursor::new(data.clone()));
        let sync_chunks: Vec<(usize, u64)> = sync_chunker
            .chunks()
            .map(|c| {
                let c = c.unwrap();
                (c.len(), c.cut)
            })
            .collect();

        let async_chunks: Vec<(usize, u64)> = chunk_async(&data[..], config)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|c| {
                let c = c.unwrap();
                (c.len(), c.cut)
            })
            .collect();

        assert_eq!(sync_chunks, async_chunks);
    }

    #[tokio::test]
    async fn test_invalid_config_surfaces_once() {
        let reader: &[u8] = &[1, 2, 3];
        let config = ChunkConfig::default().with_min_size(0);
        let mut stream = chunk_async(reader, config);

        match stream.next().await {
            Some(Err(ChunkError::InvalidConfig { .. })) => {}
            other => panic!("expected config error, got {:?}", other.map(|r| r.is_ok())),
        }
        assert!(stream.next().await.is_none());
    }
}
