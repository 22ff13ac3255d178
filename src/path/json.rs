//! `PathValue` for JSON values.

use serde_json::{Map, Value};

use super::PathValue;

impl PathValue for Value {
    fn empty() -> Self {
        Value::Object(Map::new())
    }

    fn assign(self, segments: &[String], value: Self) -> Self {
        let Some((head, tail)) = segments.split_first() else {
            return value;
        };

        match self {
            Value::Object(mut map) => {
                let slot = map.entry(head.as_str()).or_insert(Value::Null);
                *slot = slot.take().assign(tail, value);
                Value::Object(map)
            }
            Value::Array(mut items) => match index(head) {
                Some(i) if i < items.len() => {
                    items[i] = items[i].take().assign(tail, value);
                    Value::Array(items)
                }
                Some(i) if i == items.len() => {
                    items.push(Value::Null.assign(tail, value));
                    Value::Array(items)
                }
                // Not addressable as a list position: keep the elements under
                // their positions as object keys.
                _ => {
                    let map: Map<String, Value> = items
                        .into_iter()
                        .enumerate()
                        .map(|(i, item)| (i.to_string(), item))
                        .collect();
                    Value::Object(map).assign(segments, value)
                }
            },
            _ => Self::empty().assign(segments, value),
        }
    }
}

/// Parses a canonical list position (`"0"`, `"12"`; not `"01"` or `"+1"`).
fn index(segment: &str) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|i| i.to_string() == segment)
}
