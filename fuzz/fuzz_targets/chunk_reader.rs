#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use rollchunk::{ChunkConfig, Chunker, RabinChunker};

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        ChunkConfig::new(4, 16).unwrap().with_staging_size(7),
        ChunkConfig::new(64, 256).unwrap().with_avg_size(128),
        ChunkConfig::new(11, 71).unwrap().with_staging_size(32),
        ChunkConfig::new(1, 4096).unwrap().with_avg_size(512),
    ];

    for config in configs {
        let mut chunker = RabinChunker::with_config(config).unwrap();
        chunker.reset(Cursor::new(data.clone()));

        let mut chunks = Vec::new();
        loop {
            match chunker.next(None) {
                Ok(Some(chunk)) => chunks.push(chunk),
                Ok(None) => break,
                Err(e) => panic!("in-memory source cannot fail: {}", e),
            }
        }

        // Size bounds: max always, min for every non-final chunk.
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= config.max_size());
            if i + 1 < chunks.len() {
                assert!(chunk.len() >= config.min_size());
            }
        }

        // Reassembly and offsets.
        let mut reassembled = Vec::with_capacity(data.len());
        for chunk in &chunks {
            assert_eq!(chunk.offset as usize, reassembled.len());
            reassembled.extend_from_slice(&chunk.data);
        }
        assert_eq!(reassembled, data);

        // Determinism.
        chunker.reset(Cursor::new(data.clone()));
        let mut again = Vec::new();
        while let Ok(Some(chunk)) = chunker.next(None) {
            again.push((chunk.len(), chunk.cut));
        }
        let first: Vec<(usize, u64)> = chunks.iter().map(|c| (c.len(), c.cut)).collect();
        assert_eq!(first, again);
    }
});
