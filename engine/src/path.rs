//! Path-addressed access to nested theme trees.
//!
//! Mutation is copy-on-write: [`set_at_path`] never touches the tree it is
//! given and hands back a new tree that the caller owns.

use crate::errors::{EngineError, EngineResult};
use crate::model::Theme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Separator used by the string form of a [`ThemePath`]
pub const PATH_SEPARATOR: char = '.';

/// Ordered key sequence addressing one leaf of a theme.
///
/// The string form joins segments with [`PATH_SEPARATOR`], e.g. `colors.primary`.
///
/// That form is lossy: a key that is empty or contains the separator has no
/// faithful string rendering, and parsing the rendering yields a different
/// path. Such leaves are still tracked by the registries under their segment
/// path and can be edited through [`ThemePath::new`] or the registry keys, but
/// neither the editor's `set` command nor an override keyed by the string form
/// can reach them. Serialization goes through the string form as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ThemePath(Vec<String>);

impl ThemePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse the dotted string form. An empty string yields an empty path.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self(raw.split(PATH_SEPARATOR).map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// New path extended by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for ThemePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ThemePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ThemePath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for ThemePath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ThemePath> for String {
    fn from(path: ThemePath) -> Self {
        path.to_string()
    }
}

/// Return a copy of `tree` whose leaf at `path` holds `value`.
///
/// Missing intermediate containers are created as objects. Arrays are only
/// entered through an existing numeric position. The type of `value` is not
/// checked against whatever the leaf held before.
pub fn set_at_path(tree: &Theme, path: &ThemePath, value: Value) -> EngineResult<Theme> {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(EngineError::InvalidPath);
    };

    let mut root = Value::Object(tree.clone());
    let mut cursor = &mut root;
    for segment in parents {
        cursor = descend(cursor, segment, path)?;
    }

    match cursor {
        Value::Object(map) => {
            map.insert(leaf.clone(), value);
        }
        Value::Array(items) => {
            let index = array_index(leaf, items.len()).ok_or_else(|| conflict(path, leaf))?;
            items[index] = value;
        }
        _ => return Err(conflict(path, leaf)),
    }

    match root {
        Value::Object(map) => Ok(map),
        // The root started as an object and only its children were replaced
        _ => Err(EngineError::InvalidPath),
    }
}

/// Value stored at `path`, or `None` when any segment is missing.
pub fn get_at_path<'a>(tree: &'a Theme, path: &ThemePath) -> Option<&'a Value> {
    let (first, rest) = path.segments().split_first()?;
    let mut cursor = tree.get(first)?;
    for segment in rest {
        cursor = match cursor {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(array_index(segment, items.len())?)?,
            _ => return None,
        };
    }
    Some(cursor)
}

/// Every leaf path of `tree` in traversal order.
///
/// Empty containers contribute no paths.
pub fn leaf_paths(tree: &Theme) -> Vec<ThemePath> {
    let mut paths = Vec::new();
    for (key, value) in tree {
        collect_leaves(value, ThemePath::new([key.as_str()]), &mut paths);
    }
    paths
}

/// Whether a value is a container the walkers descend into
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn collect_leaves(value: &Value, path: ThemePath, out: &mut Vec<ThemePath>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect_leaves(child, path.child(key.as_str()), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_leaves(child, path.child(index.to_string()), out);
            }
        }
        _ => out.push(path),
    }
}

fn descend<'a>(node: &'a mut Value, segment: &str, path: &ThemePath) -> EngineResult<&'a mut Value> {
    let child = match node {
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        Value::Array(items) => {
            let index = array_index(segment, items.len()).ok_or_else(|| conflict(path, segment))?;
            &mut items[index]
        }
        _ => return Err(conflict(path, segment)),
    };

    // Null slots count as absent
    if child.is_null() {
        *child = Value::Object(Map::new());
    }

    if is_container(child) {
        Ok(child)
    } else {
        Err(conflict(path, segment))
    }
}

fn array_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|index| *index < len)
}

fn conflict(path: &ThemePath, segment: &str) -> EngineError {
    EngineError::PathConflict {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}
