//! Async stream adapter for chunking.
//!
//! - [`chunk_async`] - chunk any `futures_io::AsyncRead` as a `Stream`

mod stream;

pub use stream::{chunk_async, ChunkStream};
