#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use rollchunk::{ChunkConfig, Chunker, GearChunker};

fuzz_target!(|input: (u64, Vec<u8>)| {
    let (seed, data) = input;

    let config = ChunkConfig::new(8, 512)
        .unwrap()
        .with_avg_size(64)
        .with_staging_size(13);

    let mut chunker = GearChunker::with_seed(seed);
    chunker.reset(Cursor::new(data.clone()));

    // The default config still reassembles whatever the seed.
    let mut reassembled = Vec::with_capacity(data.len());
    while let Ok(Some(chunk)) = chunker.next(None) {
        reassembled.extend_from_slice(&chunk.data);
    }
    assert_eq!(reassembled, data);

    // Small bounds with a custom seed hold the size invariants.
    let mut chunker = GearChunker::with_config(config).unwrap();
    chunker.reset(Cursor::new(data.clone()));

    let mut chunks = Vec::new();
    while let Ok(Some(chunk)) = chunker.next(None) {
        chunks.push(chunk);
    }
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.len() <= config.max_size());
        if i + 1 < chunks.len() {
            assert!(chunk.len() >= config.min_size());
        }
    }
    let total: usize = chunks.iter().map(|c| c.len()).sum();
    assert_eq!(total, data.len());
});
