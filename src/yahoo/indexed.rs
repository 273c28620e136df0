//! Yahoo's "indexed object" encoding.
//!
//! The Fantasy API never returns JSON arrays for collections. It returns an
//! object keyed by decimal indices plus a `count` field:
//!
//! ```json
//! { "0": { "league": [] }, "1": { "league": [] }, "count": 2 }
//! ```
//!
//! [`indexed_values`] walks the raw object; [`IndexedObject`] is the typed
//! container the decoders deserialize into.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Read the `count` field. Accepts a non-negative integer or its decimal string form.
///
/// Counts beyond `usize` saturate; the walk is bounded by the keys present anyway.
fn read_count(obj: &Map<String, Value>) -> usize {
    let count = match obj.get("count") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count.map_or(0, |c| usize::try_from(c).unwrap_or(usize::MAX))
}

/// Indices in `[0, count)` that are present as canonical decimal keys, ascending.
fn present_indices(obj: &Map<String, Value>) -> Vec<usize> {
    let count = read_count(obj);
    let mut indices: Vec<usize> = obj
        .keys()
        .filter_map(|k| {
            let idx = k.parse::<usize>().ok()?;
            // "01" and "+1" parse but are not keys Yahoo would have produced for index 1
            (idx < count && idx.to_string() == *k).then_some(idx)
        })
        .collect();
    indices.sort_unstable();
    indices
}

/// Walk an indexed object, yielding entries `"0"..count-1` in index order.
///
/// Numeric and `null` entries are skipped, as are missing indices. The
/// iterator is cheap to clone, so the walk can be restarted.
pub fn indexed_values(obj: &Map<String, Value>) -> IndexedValues<'_> {
    IndexedValues {
        obj,
        indices: present_indices(obj).into_iter(),
    }
}

#[derive(Clone)]
pub struct IndexedValues<'a> {
    obj: &'a Map<String, Value>,
    indices: std::vec::IntoIter<usize>,
}

impl<'a> Iterator for IndexedValues<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        for idx in self.indices.by_ref() {
            match self.obj.get(&idx.to_string()) {
                None | Some(Value::Null) | Some(Value::Number(_)) => continue,
                Some(value) => return Some(value),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.indices.len()))
    }
}

/// Typed indexed object: the walked entries that decode as `T`, in index order.
///
/// Entries that fail to decode are dropped rather than failing the whole
/// response.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedObject<T> {
    count: usize,
    entries: Vec<T>,
}

impl<T> IndexedObject<T> {
    /// The `count` the provider declared (not the number of decoded entries).
    pub fn declared_count(&self) -> usize {
        self.count
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T> Default for IndexedObject<T> {
    fn default() -> Self {
        Self {
            count: 0,
            entries: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IndexedObject<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: DeserializeOwned> IndexedObject<T> {
    /// Build from a raw JSON object.
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        let entries = indexed_values(obj)
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();
        Self {
            count: read_count(obj),
            entries,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for IndexedObject<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(obj) => Ok(Self::from_map(&obj)),
            _ => Err(serde::de::Error::custom(
                "indexed object must be a JSON object",
            )),
        }
    }
}

/// A value that either decodes as `T` or is ignored.
///
/// Used for union fragments whose shape varies between endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Lenient<T>(pub Option<T>);

impl<T> Lenient<T> {
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T> Default for Lenient<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(serde_json::from_value(value).ok()))
    }
}
