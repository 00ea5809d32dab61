//! Editor command lines read from stdin.

use crate::error::{AppError, AppResult};
use engine::{Theme, ThemePath};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

/// One action requested by the person editing the theme
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// `set <path> <value>`
    Set { path: ThemePath, value: Value },
    /// `select <name>`
    Select(String),
    /// `replace <name> <json object>`
    Replace { name: String, theme: Theme },
    /// `themes <file>`: host pushes a new theme list
    Themes(PathBuf),
    /// `load <file>`: host re-delivers a full options payload
    Load(PathBuf),
    Reset,
    Fields,
    Code,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  set <path> <value>        edit a field of the active theme (value as JSON, or plain text)
  select <name>             switch the active theme
  replace <name> <json>     replace the active theme with a JSON object
  themes <file>             load a new theme list from a JSON file
  load <file>               replace everything with a new options payload
  reset                     discard all edits
  fields                    list editable fields of the active theme
  code                      print the active theme as JSON
  status                    show engine state
  help                      show this help
  quit                      exit";

impl FromStr for EditorCommand {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "set" => {
                let (path, raw) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("set <path> <value>"))?;
                let path = ThemePath::parse(path);
                if path.is_empty() {
                    return Err(usage("set <path> <value>"));
                }
                Ok(EditorCommand::Set {
                    path,
                    value: parse_value(raw.trim()),
                })
            }
            "select" => {
                if rest.is_empty() {
                    return Err(usage("select <name>"));
                }
                Ok(EditorCommand::Select(rest.to_string()))
            }
            "replace" => {
                let (name, raw) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("replace <name> <json>"))?;
                match serde_json::from_str(raw.trim()) {
                    Ok(Value::Object(theme)) => Ok(EditorCommand::Replace {
                        name: name.to_string(),
                        theme,
                    }),
                    Ok(_) => Err(AppError::Command(
                        "replace expects a JSON object as theme".to_string(),
                    )),
                    Err(e) => Err(AppError::Command(format!("replace: invalid JSON: {e}"))),
                }
            }
            "themes" => {
                if rest.is_empty() {
                    return Err(usage("themes <file>"));
                }
                Ok(EditorCommand::Themes(PathBuf::from(rest)))
            }
            "load" => {
                if rest.is_empty() {
                    return Err(usage("load <file>"));
                }
                Ok(EditorCommand::Load(PathBuf::from(rest)))
            }
            "reset" => Ok(EditorCommand::Reset),
            "fields" => Ok(EditorCommand::Fields),
            "code" => Ok(EditorCommand::Code),
            "status" => Ok(EditorCommand::Status),
            "help" | "?" => Ok(EditorCommand::Help),
            "quit" | "exit" => Ok(EditorCommand::Quit),
            "" => Err(AppError::Command("empty command".to_string())),
            other => Err(AppError::Command(format!(
                "unknown command '{other}', type 'help' for a list"
            ))),
        }
    }
}

/// JSON when it parses, the raw text otherwise (`#fff` and `Helvetica` are
/// taken as strings)
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn usage(form: &str) -> AppError {
    AppError::Command(format!("usage: {form}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use serde_json::json;

    fn parse(line: &str) -> AppResult<EditorCommand> {
        line.parse()
    }

    #[test]
    fn test_set_parses_json_and_plain_values() {
        assert_eq!(
            assert_ok!(parse("set colors.primary #ff4785")),
            EditorCommand::Set {
                path: ThemePath::parse("colors.primary"),
                value: json!("#ff4785"),
            }
        );
        assert_eq!(
            assert_ok!(parse("set radius 8")),
            EditorCommand::Set {
                path: ThemePath::parse("radius"),
                value: json!(8),
            }
        );
        assert_eq!(
            assert_ok!(parse("set ink rgb(1, 2, 3)")),
            EditorCommand::Set {
                path: ThemePath::parse("ink"),
                value: json!("rgb(1, 2, 3)"),
            }
        );
        assert_eq!(
            assert_ok!(parse("  set flags.bold   true ")),
            EditorCommand::Set {
                path: ThemePath::parse("flags.bold"),
                value: json!(true),
            }
        );
    }

    #[test]
    fn test_set_requires_value() {
        assert_matches!(assert_err!(parse("set colors.primary")), AppError::Command(ref msg) if msg.contains("usage"));
    }

    #[test]
    fn test_replace_requires_object() {
        assert_matches!(
            assert_ok!(parse(r##"replace custom {"bg": "#000"}"##)),
            EditorCommand::Replace { ref name, ref theme } if name == "custom" && theme.len() == 1
        );
        assert_err!(parse("replace custom [1, 2]"));
        assert_err!(parse("replace custom {oops"));
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(assert_ok!(parse("select dark")), EditorCommand::Select("dark".to_string()));
        assert_eq!(
            assert_ok!(parse("themes demos/sepia.json")),
            EditorCommand::Themes(PathBuf::from("demos/sepia.json"))
        );
        assert_eq!(
            assert_ok!(parse("load demos/themes.json")),
            EditorCommand::Load(PathBuf::from("demos/themes.json"))
        );
        assert_eq!(assert_ok!(parse("reset")), EditorCommand::Reset);
        assert_eq!(assert_ok!(parse("exit")), EditorCommand::Quit);
    }

    #[test]
    fn test_unknown_and_empty_lines() {
        assert_matches!(assert_err!(parse("paint it black")), AppError::Command(ref msg) if msg.contains("paint"));
        assert_err!(parse("   "));
        assert_err!(parse("select"));
        assert_err!(parse("load"));
    }
}
