#![no_main]

use std::cell::RefCell;
use std::convert::Infallible;

use chunkbuf::{ChunkProcessor, Entry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (size, data) = input;
    let size = usize::from(size % 32);

    let sizes = RefCell::new(Vec::new());
    let output: Vec<u8> = ChunkProcessor::process(data.clone(), size, |chunk: Vec<u8>| {
        sizes.borrow_mut().push(chunk.len());
        Ok::<_, Infallible>(chunk.into_iter().map(Entry::new))
    })
    .map(|item| item.map(|(_, value)| value))
    .collect::<Result<_, _>>()
    .unwrap();

    // Verify: output matches input in order
    assert_eq!(output, data);

    // Verify: every chunk but the last is full, none is empty
    let sizes = sizes.into_inner();
    assert!(sizes.iter().all(|&n| n > 0));
    if size > 0 {
        if let Some((_, full)) = sizes.split_last() {
            assert!(full.iter().all(|&n| n == size));
        }
        assert_eq!(sizes.len(), data.len().div_ceil(size));
    } else {
        assert!(sizes.len() <= 1);
    }
});
