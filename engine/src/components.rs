//! Derivation of editable field metadata from raw theme trees.
//!
//! A [`ComponentRegistry`] holds exactly one [`FieldMeta`] per leaf of its
//! theme, keyed by the leaf's [`ThemePath`] and ordered the way the tree
//! enumerates its keys. That order is the default display order of the editor.

use crate::model::Theme;
use crate::path::{ThemePath, leaf_paths};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Control type used by the editor surface for one field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Boolean,
    Number,
    Color,
    Text,
    /// Host-specific hint the engine passes through untouched
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::Color => "color",
            FieldType::Text => "text",
            FieldType::Other(hint) => hint,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        match raw {
            "boolean" => FieldType::Boolean,
            "number" => FieldType::Number,
            "color" => FieldType::Color,
            "text" => FieldType::Text,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        FieldType::from(raw.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

/// Control type and current value of one leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: Value,
}

/// Host hints mapping a path to the control type it should get
pub type Overrides = HashMap<ThemePath, FieldType>;

/// Per-theme mapping from leaf path to field metadata
pub type ComponentRegistry = IndexMap<ThemePath, FieldMeta>;

/// Build the registry for `theme`.
///
/// Override hints win over structural inference. Paths in `overrides` that are
/// not leaves of `theme` are ignored.
pub fn build_theme_components(theme: &Theme, overrides: &Overrides) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for (key, value) in theme {
        walk(value, ThemePath::new([key.as_str()]), overrides, &mut registry);
    }
    registry
}

/// Bring `registry` in line with `theme`.
///
/// When the leaf paths are unchanged only values are refreshed and every entry
/// keeps its type. Any structural difference triggers a full rebuild.
pub fn refresh_theme_components(
    registry: &mut ComponentRegistry,
    theme: &Theme,
    overrides: &Overrides,
) {
    let paths = leaf_paths(theme);
    let same_shape =
        paths.len() == registry.len() && paths.iter().zip(registry.keys()).all(|(a, b)| a == b);

    if !same_shape {
        log::debug!(
            "Theme structure changed ({} -> {} fields), rebuilding components",
            registry.len(),
            paths.len()
        );
        *registry = build_theme_components(theme, overrides);
        return;
    }

    for (path, meta) in registry.iter_mut() {
        if let Some(value) = crate::path::get_at_path(theme, path) {
            meta.value = value.clone();
        }
    }
}

/// Control type inferred from the runtime shape of a leaf.
///
/// Priority: boolean, number, color string, then text.
pub fn infer_field_type(value: &Value) -> FieldType {
    match value {
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(_) => FieldType::Number,
        Value::String(s) if is_color(s) => FieldType::Color,
        _ => FieldType::Text,
    }
}

/// Whether `raw` uses a recognised CSS color syntax.
///
/// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), the `rgb`, `rgba`,
/// `hsl` and `hsla` functional notations, and `transparent`.
pub fn is_color(raw: &str) -> bool {
    let value = raw.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let lower = value.to_ascii_lowercase();
    if lower == "transparent" {
        return true;
    }

    ["rgba", "rgb", "hsla", "hsl"].iter().any(|name| {
        lower
            .strip_prefix(name)
            .and_then(|rest| rest.trim_start().strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(is_color_arguments)
    })
}

fn is_color_arguments(inner: &str) -> bool {
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    (3..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            let number = part
                .trim_end_matches('%')
                .trim_end_matches("deg")
                .trim_end_matches("turn");
            !number.is_empty() && number.parse::<f64>().is_ok()
        })
}

fn walk(value: &Value, path: ThemePath, overrides: &Overrides, out: &mut ComponentRegistry) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, path.child(key.as_str()), overrides, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, path.child(index.to_string()), overrides, out);
            }
        }
        leaf => {
            let field_type = overrides
                .get(&path)
                .cloned()
                .unwrap_or_else(|| infer_field_type(leaf));
            out.insert(
                path,
                FieldMeta {
                    field_type,
                    value: leaf.clone(),
                },
            );
        }
    }
}
