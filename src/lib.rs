//! # rollchunk
//!
//! Streaming Content-Defined Chunking (CDC) for Rust.
//!
//! `rollchunk` splits an arbitrary byte stream into variable-length chunks
//! whose boundaries depend on the local content of the stream rather than
//! on fixed offsets. Because boundaries shift with content, insertions or
//! deletions upstream only disturb a small neighborhood of chunks, which
//! is the foundation of:
//!
//! - **Deduplicating backup** - unchanged regions keep their chunks
//! - **Content-addressable storage** - stable units to hash and store
//! - **Delta synchronization** - transfer only the chunks that changed
//!
//! ## Design Philosophy
//!
//! This crate intentionally maintains a narrow scope: **transform byte
//! streams into chunks**. It deliberately does not:
//!
//! - Manage files or file paths (any [`std::io::Read`] is a source)
//! - Hash chunk contents (the `cut` fingerprint is diagnostic, not an
//!   identity; hash `data` yourself for deduplication)
//! - Persist chunks or manage concurrency
//!
//! ## Algorithms
//!
//! Two chunkers share one [`Chunker`] contract:
//!
//! - [`RabinChunker`] - rolling Rabin fingerprint: the remainder of the
//!   current 64-byte window modulo a fixed polynomial over GF(2), reduced
//!   per byte with precomputed tables
//! - [`GearChunker`] - Gear hash: one shift and one table add per byte
//!
//! Both declare a boundary when `digest & mask == 0`, bounded by the
//! configured minimum and maximum chunk sizes, and both are fully
//! deterministic over their input.
//!
//! ## Features
//!
//! - **`async-io`** - async streaming via `futures_io::AsyncRead`, see
//!   `chunk_async`
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use rollchunk::{Chunker, ChunkError, RabinChunker};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let data = vec![0u8; 100_000];
//!     let mut chunker = RabinChunker::with_sizes(4 * 1024, 64 * 1024)?;
//!     chunker.reset(Cursor::new(data));
//!
//!     let mut total = 0;
//!     while let Some(chunk) = chunker.next(None)? {
//!         total += chunk.len();
//!     }
//!     assert_eq!(total, 100_000);
//!     Ok(())
//! }
//! ```
//!
//! Reusing one buffer for every chunk:
//!
//! ```
//! use bytes::BytesMut;
//! use std::io::Cursor;
//! use rollchunk::{Chunker, RabinChunker};
//!
//! let mut chunker = RabinChunker::with_sizes(512, 4096)?;
//! chunker.reset(Cursor::new(vec![7u8; 20_000]));
//!
//! let mut buf = Some(BytesMut::with_capacity(4096));
//! while let Some(chunk) = chunker.next(buf.take())? {
//!     // ... inspect chunk.data ...
//!     buf = Some(chunk.into_data());
//! }
//! # Ok::<(), rollchunk::ChunkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdc; // Rolling hash cores (Rabin fingerprint, Gear)
mod chunk;
mod chunker;
mod config;
mod error;
mod reader; // Staging buffer in front of the source

// Async streaming support (feature-gated)
#[cfg(feature = "async-io")]
mod async_stream;

pub use chunk::Chunk;
pub use chunker::{ChunkIter, Chunker, GearChunker, RabinChunker};
pub use config::{
    ChunkConfig, DEFAULT_AVG_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE,
    DEFAULT_STAGING_SIZE, KIB, MIB,
};
pub use error::ChunkError;

/// Async chunking support (requires the `async-io` feature).
#[cfg(feature = "async-io")]
pub use async_stream::{chunk_async, ChunkStream};
