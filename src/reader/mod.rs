//! Buffered reader adapter with latched terminal semantics.
//!
//! [`Staging`] sits between a chunker and its byte-stream source. It owns
//! one fixed staging buffer, refills it with full-buffer reads (hiding
//! short reads), normalizes "unexpected end" into plain end-of-stream, and
//! latches the first terminal signal: after end-of-stream or a hard error
//! the source is released and never read again, and every later `fill`
//! reports the same terminal outcome.

use std::io::{self, Read};

use crate::error::ChunkError;

/// Stream state, latched at the first terminal signal.
#[derive(Debug)]
enum StreamState {
    /// The source may still produce data.
    Active,
    /// End-of-stream observed; non-exceptional and repeatable.
    Eof,
    /// A hard read error, replayed on every subsequent fill.
    ///
    /// `std::io::Error` is not `Clone`, so the kind and message are kept
    /// and a fresh error of the same shape is surfaced each time.
    Failed { kind: io::ErrorKind, message: String },
}

/// The buffered reader adapter.
///
/// The staging buffer size is independent of the chunk size bounds; the
/// chunker assembles chunks larger than the buffer by carrying consumed
/// tails across refills.
#[derive(Debug)]
pub(crate) struct Staging<R> {
    source: Option<R>,
    buf: Box<[u8]>,
    /// Chunk-start mark within the buffer.
    start: usize,
    /// Read cursor.
    pos: usize,
    /// End of valid data.
    end: usize,
    state: StreamState,
    /// Set if the source is ever consulted after a terminal latch.
    used: bool,
}

impl<R: Read> Staging<R> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            source: None,
            buf: vec![0; capacity].into_boxed_slice(),
            start: 0,
            pos: 0,
            end: 0,
            state: StreamState::Eof,
            used: false,
        }
    }

    /// Binds a new source and clears all per-stream state.
    ///
    /// The staging allocation is kept.
    pub(crate) fn rebind(&mut self, source: R) {
        self.source = Some(source);
        self.start = 0;
        self.pos = 0;
        self.end = 0;
        self.state = StreamState::Active;
        self.used = false;
    }

    /// Returns `true` when every buffered byte has been consumed.
    #[inline]
    pub(crate) fn is_drained(&self) -> bool {
        self.pos == self.end
    }

    /// Consumes and returns the byte at the read cursor.
    ///
    /// Callers must check [`Staging::is_drained`] first.
    #[inline]
    pub(crate) fn take_byte(&mut self) -> u8 {
        debug_assert!(self.pos < self.end);
        let b = self.buf[self.pos];
        self.pos += 1;
        b
    }

    /// Marks the current cursor as the start of a chunk.
    #[inline]
    pub(crate) fn mark(&mut self) {
        self.start = self.pos;
    }

    /// Returns the bytes consumed since the last mark.
    #[inline]
    pub(crate) fn marked(&self) -> &[u8] {
        &self.buf[self.start..self.pos]
    }

    /// Refills the staging buffer from the source.
    ///
    /// Returns `Ok(true)` if any data is buffered, `Ok(false)` on
    /// end-of-stream, and the latched error otherwise. Any previously
    /// buffered bytes are discarded; the caller carries tails it still
    /// needs before refilling.
    ///
    /// A hard error observed after some bytes were already read in the
    /// same fill does not cost those bytes: they are surfaced as a
    /// successful fill now and the latched error is returned by the next
    /// one. The error is immediate only when the failing read was the
    /// first of the fill.
    pub(crate) fn fill(&mut self) -> Result<bool, ChunkError> {
        self.start = 0;
        self.pos = 0;
        self.end = 0;

        match &self.state {
            StreamState::Eof => Ok(false),
            StreamState::Failed { kind, message } => {
                Err(ChunkError::Io(io::Error::new(*kind, message.clone())))
            }
            StreamState::Active => self.read_from_source(),
        }
    }

    /// The only place the source is read. Loops until the buffer is full
    /// or the stream ends, matching full-buffer read semantics.
    fn read_from_source(&mut self) -> Result<bool, ChunkError> {
        if !matches!(self.state, StreamState::Active) {
            self.used = true;
        }

        let Some(source) = self.source.as_mut() else {
            self.state = StreamState::Eof;
            return Ok(false);
        };

        let mut failure = None;
        while self.end < self.buf.len() {
            match source.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.state = StreamState::Eof;
                    break;
                }
                Ok(n) => self.end += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    // A short read that signals "unexpected end" is plain
                    // end-of-stream to the chunker.
                    self.state = StreamState::Eof;
                    break;
                }
                Err(e) => {
                    // Bytes read earlier in this fill are still owed to
                    // the caller; latch the error and surface it on the
                    // fill after they have been consumed.
                    self.state = StreamState::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                    };
                    if self.end == 0 {
                        failure = Some(e);
                    }
                    break;
                }
            }
        }

        if !matches!(self.state, StreamState::Active) {
            // The source is not retained past its terminal signal.
            self.source = None;
        }

        match failure {
            Some(e) => Err(ChunkError::Io(e)),
            None => Ok(self.end > 0),
        }
    }

    /// Reports whether the source was consulted after a terminal latch.
    ///
    /// Stays `false` for a conforming chunker; exists as an introspection
    /// point for tests.
    #[allow(dead_code)]
    pub(crate) fn used(&self) -> bool {
        self.used
    }
}
