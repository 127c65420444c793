//! Depth-first flattening of nested JSON documents into dotted key-paths.
//!
//! Object members contribute `<parent>.<member>` and array elements
//! contribute `<parent>.<index>`. Scalars end a path. Empty objects and
//! arrays contribute no paths at all.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::document::FlatDocument;
use crate::error::{FlattenError, FlattenResult};

/// Default nesting limit, matching `serde_json`'s parser recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Traversal limits for [`flatten_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Maximum number of nested containers, root included.
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse raw document bytes into a JSON value.
///
/// Whitespace-only input is treated as an empty document and yields
/// `Value::Null`, which [`flatten`] maps to the empty [`FlatDocument`].
pub fn parse_document(bytes: &[u8]) -> FlattenResult<Value> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| FlattenError::malformed(format!("document is not valid UTF-8: {e}")))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|e| {
        if e.to_string().starts_with("recursion limit exceeded") {
            FlattenError::DocumentTooDeep {
                max_depth: DEFAULT_MAX_DEPTH,
            }
        } else {
            FlattenError::malformed(format!("document is not valid JSON: {e}"))
        }
    })
}

/// Flatten a document with default options.
///
/// `None` stands for a document that does not exist on this side of the
/// comparison and yields the empty [`FlatDocument`].
pub fn flatten(doc: Option<&Value>) -> FlattenResult<FlatDocument> {
    flatten_with(doc, &FlattenOptions::default())
}

/// Flatten a document with explicit options.
pub fn flatten_with(doc: Option<&Value>, options: &FlattenOptions) -> FlattenResult<FlatDocument> {
    let root = match doc {
        None | Some(Value::Null) => return Ok(FlatDocument::new()),
        Some(value) => value,
    };

    if !matches!(root, Value::Object(_) | Value::Array(_)) {
        return Err(FlattenError::malformed(
            "document root must be an object or an array",
        ));
    }

    let mut walker = Walker {
        entries: BTreeMap::new(),
        max_depth: options.max_depth,
    };
    walker.descend(root, "", 0)?;
    Ok(FlatDocument::from_entries(walker.entries))
}

struct Walker {
    entries: BTreeMap<String, Value>,
    max_depth: usize,
}

impl Walker {
    fn descend(&mut self, value: &Value, path: &str, depth: usize) -> FlattenResult<()> {
        if depth >= self.max_depth {
            return Err(FlattenError::DocumentTooDeep {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Object(members) => {
                for (name, child) in members {
                    self.visit(child, join(path, name), depth)?;
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.visit(child, join(path, &index.to_string()), depth)?;
                }
            }
            leaf => self.record(path.to_string(), leaf.clone())?,
        }
        Ok(())
    }

    fn visit(&mut self, value: &Value, path: String, depth: usize) -> FlattenResult<()> {
        match value {
            Value::Object(_) | Value::Array(_) => self.descend(value, &path, depth + 1),
            leaf => self.record(path, leaf.clone()),
        }
    }

    fn record(&mut self, path: String, value: Value) -> FlattenResult<()> {
        match self.entries.entry(path) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
            Entry::Occupied(slot) => Err(FlattenError::malformed(format!(
                "two leaves share the key path `{}`",
                slot.key()
            ))),
        }
    }
}

fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}
