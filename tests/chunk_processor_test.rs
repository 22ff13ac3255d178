// Integration tests for ChunkProcessor
// Tests cover: chunking, laziness, deferred sources, custom containers, keys, errors

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;

use chunkbuf::{ChunkConfig, ChunkProcessor, Entries, Entry, Key, Source};

fn values<K, T, E: std::fmt::Debug>(iter: impl Iterator<Item = Result<(Key<K>, T), E>>) -> Vec<T> {
    iter.map(|item| item.expect("no error expected").1).collect()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_chunk_size() {
    let processor = ChunkProcessor::new(Vec::<i32>::new(), 3, |chunk: Vec<i32>| {
        Ok::<_, Infallible>(chunk.into_iter().map(Entry::<Infallible, _>::new))
    });
    assert_eq!(processor.chunk_size(), 3);
    assert!(!processor.config().preserve_keys());
}

#[test]
fn test_consume() {
    let invoked = RefCell::new(Vec::new());
    let processor = ChunkProcessor::new(vec!["a", "b", "c", "d", "e"], 2, |chunk: Vec<&str>| {
        invoked.borrow_mut().push(chunk.clone());
        Ok::<_, Infallible>(
            chunk
                .into_iter()
                .map(|s| Entry::new(s.to_uppercase()))
                .collect::<Vec<_>>(),
        )
    });

    let output = processor.consume();
    assert!(invoked.borrow().is_empty(), "nothing runs before iteration");

    assert_eq!(values(output), ["A", "B", "C", "D", "E"]);
    assert_eq!(
        *invoked.borrow(),
        [vec!["a", "b"], vec!["c", "d"], vec!["e"]]
    );
}

#[test]
fn test_consume_from_iterator() {
    let invoked = Cell::new(0);
    let source = Source::values("abcde".chars());
    let output = ChunkProcessor::process(source, 2, |chunk: Vec<char>| {
        invoked.set(invoked.get() + 1);
        Ok::<_, Infallible>(
            chunk
                .into_iter()
                .map(|c| Entry::new(c.to_ascii_uppercase()))
                .collect::<Vec<_>>(),
        )
    });

    assert_eq!(values(output), ['A', 'B', 'C', 'D', 'E']);
    assert_eq!(invoked.get(), 3);
}

#[test]
fn test_consume_from_empty_iterator() {
    let invoked = Cell::new(0);
    let output = ChunkProcessor::process(Source::values(std::iter::empty()), 2, |chunk: Vec<&str>| {
        invoked.set(invoked.get() + 1);
        Ok::<_, Infallible>(chunk.into_iter().map(Entry::new).collect::<Vec<_>>())
    });

    assert!(values(output).is_empty());
    assert_eq!(invoked.get(), 0, "no handler call for an empty source");
}

#[test]
fn test_consume_from_deferred_source() {
    let supplied = Cell::new(0);
    let invoked = RefCell::new(Vec::new());
    let source = Source::deferred(|| {
        supplied.set(supplied.get() + 1);
        Source::values(vec!["a", "b", "c", "d", "e"])
    });

    let mut output = ChunkProcessor::process(source, 2, |chunk: Vec<&str>| {
        invoked.borrow_mut().push(chunk.len());
        Ok::<_, Infallible>(
            chunk
                .into_iter()
                .map(|s| Entry::new(s.to_uppercase()))
                .collect::<Vec<_>>(),
        )
    });
    assert_eq!(supplied.get(), 0, "supplier runs on first pull");

    let first = output.next().map(|item| item.unwrap().1);
    assert_eq!(first.as_deref(), Some("A"));
    assert_eq!(supplied.get(), 1);

    assert_eq!(values(output), ["B", "C", "D", "E"]);
    assert_eq!(supplied.get(), 1);
    assert_eq!(*invoked.borrow(), [2, 2, 1]);
}

// ============================================================================
// Handler Output Tests
// ============================================================================

#[test]
fn test_handler_returning_nothing() {
    let invoked = Cell::new(0);
    let output = ChunkProcessor::process(vec!["a", "b", "c", "d", "e"], 2, |_: Vec<&str>| {
        invoked.set(invoked.get() + 1);
        Ok::<_, Infallible>(Vec::<Entry<Infallible, String>>::new())
    });

    assert!(values(output).is_empty());
    assert_eq!(invoked.get(), 3, "every chunk is still handed over");
}

#[test]
fn test_handler_returning_sometimes_nothing() {
    let invoked = Cell::new(0);
    let output = ChunkProcessor::process(vec!["a", "b", "c", "d", "e"], 2, |chunk: Vec<&str>| {
        invoked.set(invoked.get() + 1);
        let out: Vec<Entry<Infallible, String>> = if invoked.get() == 2 {
            Vec::new()
        } else {
            chunk.into_iter().map(|s| Entry::new(s.to_uppercase())).collect()
        };
        Ok::<_, Infallible>(out)
    });

    assert_eq!(values(output), ["A", "B", "E"]);
    assert_eq!(invoked.get(), 3);
}

#[test]
fn test_handler_output_is_flattened_in_order() {
    let output = ChunkProcessor::process(vec![1, 2, 3], 1, |chunk: Vec<i32>| {
        let n = chunk[0];
        Ok::<_, Infallible>((0..n).map(move |i| Entry::new(n * 10 + i)))
    });

    assert_eq!(values(output), [10, 20, 21, 30, 31, 32]);
}

// ============================================================================
// Container Tests
// ============================================================================

#[test]
fn test_custom_container_from_factory() {
    let invoked = RefCell::new(Vec::new());
    let built = Cell::new(0);
    let output = ChunkProcessor::new(
        Source::deferred(|| Source::values(vec!["a", "b", "c", "d", "e"])),
        2,
        |chunk: Entries<usize, &str>| {
            invoked.borrow_mut().push(chunk.values().copied().collect::<Vec<_>>());
            Ok::<_, Infallible>(
                chunk
                    .into_values()
                    .map(|s| Entry::new(s.to_uppercase()))
                    .collect::<Vec<_>>(),
            )
        },
    )
    .with_factory(|| {
        built.set(built.get() + 1);
        Entries::with_capacity(2)
    })
    .consume();

    assert_eq!(values(output), ["A", "B", "C", "D", "E"]);
    assert_eq!(
        *invoked.borrow(),
        [vec!["a", "b"], vec!["c", "d"], vec!["e"]]
    );
    assert_eq!(built.get(), 3, "one container per chunk");
}

#[test]
fn test_keyed_source_overwrites_within_chunk() {
    let invoked = RefCell::new(Vec::new());
    let source = Source::entries([("x", 1), ("x", 2), ("y", 3)]);
    let output = ChunkProcessor::process(source, 2, |chunk: Entries<&str, i32>| {
        invoked.borrow_mut().push(chunk.len());
        Ok::<_, Infallible>(chunk)
    });

    // Both "x" items count towards the first chunk.
    assert_eq!(values(output), [2, 3]);
    assert_eq!(*invoked.borrow(), [1, 1]);
}

#[test]
fn test_repeated_numeric_key_fills_one_slot() {
    let seen = RefCell::new(Vec::new());
    let source = Source::entries([(7usize, "a"), (7, "b")]);
    let output = ChunkProcessor::process(source, 0, |chunk: Entries<usize, &str>| {
        seen.borrow_mut().push(chunk.values().copied().collect::<Vec<_>>());
        Ok::<_, Infallible>(chunk)
    });

    assert_eq!(values(output), ["b"]);
    assert_eq!(*seen.borrow(), [vec!["b"]]);
}

#[test]
fn test_from_factory_without_default() {
    // No `Default` impl: only the factory builds one.
    struct Batch(&'static str, Vec<i32>);

    impl chunkbuf::Container<Infallible, i32> for Batch {
        fn push(&mut self, value: i32) {
            self.1.push(value);
        }

        fn insert(&mut self, key: Infallible, _value: i32) -> Option<i32> {
            match key {}
        }

        fn get(&self, key: &Infallible) -> Option<&i32> {
            match *key {}
        }

        fn len(&self) -> usize {
            self.1.len()
        }
    }

    let output = ChunkProcessor::from_factory(
        vec![1, 2, 3],
        2,
        |batch: Batch| Ok::<_, Infallible>([Entry::new(format!("{}:{}", batch.0, batch.1.len()))]),
        || Batch("batch", Vec::new()),
    );

    assert_eq!(values(output.consume()), ["batch:2", "batch:1"]);
}

#[test]
fn test_unbounded_single_chunk() {
    let invoked = RefCell::new(Vec::new());
    let output = ChunkProcessor::process(vec![1, 2, 3, 4, 5], ChunkConfig::unbounded(), |chunk: Vec<i32>| {
        invoked.borrow_mut().push(chunk.clone());
        Ok::<_, Infallible>(chunk.into_iter().map(Entry::new))
    });

    assert_eq!(values(output), [1, 2, 3, 4, 5]);
    assert_eq!(*invoked.borrow(), [vec![1, 2, 3, 4, 5]]);
}

// ============================================================================
// Key Policy Tests
// ============================================================================

#[test]
fn test_keys_are_renumbered_by_default() {
    let output: Vec<_> = ChunkProcessor::process(vec!["a", "b", "c"], 2, |chunk: Entries<&str, &str>| {
        Ok::<_, Infallible>(chunk.into_values().map(|v| Entry::keyed(v, v.len())))
    })
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(
        output,
        [(Key::Index(0), 1), (Key::Index(1), 1), (Key::Index(2), 1)]
    );
}

#[test]
fn test_preserve_keys_passes_handler_keys() {
    let output: Vec<_> = ChunkProcessor::new(
        vec![1, 2, 3],
        ChunkConfig::new(2).with_preserve_keys(true),
        |chunk: Entries<&str, i32>| {
            let sum: i32 = chunk.values().sum();
            Ok::<_, Infallible>([Entry::keyed("sum", sum), Entry::new(chunk.len() as i32)])
        },
    )
    .consume()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(
        output,
        [
            (Key::Name("sum"), 3),
            (Key::Index(1), 2),
            (Key::Name("sum"), 3),
            (Key::Index(1), 1),
        ]
    );

    // Collecting into a map keeps the last duplicate.
    let by_key: HashMap<_, _> = output.into_iter().collect();
    assert_eq!(by_key[&Key::Index(1)], 1);
}

// ============================================================================
// Laziness and Error Tests
// ============================================================================

#[test]
fn test_early_termination_stops_source_and_handler() {
    let pulled = Cell::new(0);
    let invoked = Cell::new(0);
    let source = Source::values((0..100).inspect(|_| pulled.set(pulled.get() + 1)));

    let taken = values(
        ChunkProcessor::process(source, 3, |chunk: Vec<i32>| {
            invoked.set(invoked.get() + 1);
            Ok::<_, Infallible>(chunk.into_iter().map(Entry::new))
        })
        .take(4),
    );

    assert_eq!(taken, [0, 1, 2, 3]);
    assert_eq!(invoked.get(), 2);
    assert_eq!(pulled.get(), 6);
}

#[test]
fn test_handler_error_is_yielded_once() {
    let invoked = Cell::new(0);
    let mut output = ChunkProcessor::process(vec![1, 2, 3, 4, 5], 2, |chunk: Vec<i32>| {
        invoked.set(invoked.get() + 1);
        if chunk.contains(&3) {
            return Err(format!("bad chunk {chunk:?}"));
        }
        Ok(chunk.into_iter().map(Entry::new).collect::<Vec<_>>())
    });

    assert_eq!(output.next(), Some(Ok((Key::Index(0), 1))));
    assert_eq!(output.next(), Some(Ok((Key::Index(1), 2))));
    assert_eq!(output.next(), Some(Err("bad chunk [3, 4]".to_string())));
    assert_eq!(output.next(), None);
    assert_eq!(output.next(), None);
    assert_eq!(invoked.get(), 2);
}

#[test]
fn test_source_error_is_yielded() {
    let invoked = Cell::new(0);
    let source = Source::fallible(vec![
        Ok(Entry::new(1)),
        Ok(Entry::new(2)),
        Ok(Entry::new(3)),
        Err("read failed"),
        Ok(Entry::new(5)),
    ]);

    let output: Vec<_> = ChunkProcessor::process(source, 2, |chunk: Vec<i32>| {
        invoked.set(invoked.get() + 1);
        Ok(chunk.into_iter().map(Entry::new).collect::<Vec<_>>())
    })
    .collect();

    assert_eq!(
        output,
        [Ok((Key::Index(0), 1)), Ok((Key::Index(1), 2)), Err("read failed")]
    );
    assert_eq!(invoked.get(), 1, "the partial chunk is dropped");
}

#[test]
fn test_progress_counters() {
    let mut output = ChunkProcessor::process(vec![1, 2, 3], 2, |chunk: Vec<i32>| {
        Ok::<_, Infallible>(chunk.into_iter().map(Entry::new).collect::<Vec<_>>())
    });

    assert_eq!(output.emitted(), 0);
    output.next();
    assert_eq!(output.emitted(), 1);
    assert_eq!(output.pending(), 0);
    assert_eq!(output.config().size(), 2);
}
