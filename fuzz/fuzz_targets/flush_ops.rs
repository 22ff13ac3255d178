#![no_main]

use std::convert::Infallible;

use chunkbuf::{Entries, FlushingBuffer};
use libfuzzer_sys::fuzz_target;

// Each byte is one operation: add keyed, add keyless, flush or force flush.
fuzz_target!(|input: (u8, Vec<u8>)| {
    let (size, ops) = input;
    let size = usize::from(size % 16);

    let mut buffer = FlushingBuffer::new(size, |items: &mut Entries<u8, u8>| Ok::<_, Infallible>(items.len()));

    for op in ops {
        let before = buffer.count();
        match op % 4 {
            0 => {
                buffer.add(op, Some(op >> 2)).unwrap();
            }
            1 => {
                buffer.add(op, None).unwrap();
            }
            2 => {
                let flushed = buffer.flush().unwrap();
                assert_eq!(flushed.is_some(), before > 0);
            }
            _ => {
                buffer.force_flush().unwrap();
            }
        }

        // Verify: the count never reaches an enabled threshold
        if size > 0 {
            assert!(buffer.count() < size);
        }
        assert_eq!(buffer.count(), buffer.contents().len());
    }
});
