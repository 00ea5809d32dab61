//! Plain-text rendering of engine state for the terminal.

use engine::{EngineStatus, FieldView, Theme, ThemeEngine};
use serde_json::Value;

/// Field list of the active theme, one `label [type] = value` line each
pub fn render_fields(fields: &[FieldView]) -> String {
    if fields.is_empty() {
        return "No editable fields".to_string();
    }

    let width = fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|field| {
            format!(
                "{:<width$}  [{}] {} = {}",
                field.label,
                field.field_type,
                field.path,
                render_value(&field.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON of a theme, or a notice when code preview is turned off
pub fn render_code(theme: &Theme, show_code: bool) -> String {
    if !show_code {
        return "Code preview is disabled (config.showCode = false)".to_string();
    }
    serde_json::to_string_pretty(theme).unwrap_or_else(|e| format!("<unprintable theme: {e}>"))
}

pub fn render_status(engine: &ThemeEngine) -> String {
    match engine.status() {
        EngineStatus::Uninitialized => "Status: waiting for options".to_string(),
        EngineStatus::Ready => {
            let names: Vec<&str> = engine.themes().iter().map(|t| t.name.as_str()).collect();
            let config = engine.config();
            format!(
                "Status: ready\nActive theme: {}\nThemes: {}\nFields: {}\nDebounce: {}\nUpdate pending: {}",
                engine.active_theme().name,
                if names.is_empty() {
                    "(single theme)".to_string()
                } else {
                    names.join(", ")
                },
                engine.active_components().map_or(0, |c| c.len()),
                if config.debounce() {
                    format!("{}ms", config.debounce_rate_ms())
                } else {
                    "off".to_string()
                },
                if engine.is_pending() { "yes" } else { "no" },
            )
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
