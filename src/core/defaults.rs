use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

use crate::paths;

/// Root configuration structure for textkit.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextkitConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via textkit.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_generator")]
    pub generator: GeneratorConfig,

    #[serde(default = "default_fields")]
    pub fields: FieldsConfig,

    #[serde(default = "default_tokenizer")]
    pub tokenizer: TokenizerConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            fields: default_fields(),
            tokenizer: default_tokenizer(),
        }
    }
}

/// Configuration for template expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_alternative_separator")]
    pub alternative_separator: String,

    #[serde(default = "default_max_combinations")]
    pub max_combinations: usize,
}

/// Configuration for column-oriented tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default = "default_field_separator")]
    pub separator: String,
}

/// Configuration for the regex tokenizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    #[serde(default = "default_delimiter_pattern")]
    pub delimiter_pattern: String,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_generator() -> GeneratorConfig {
    GeneratorConfig {
        separator: default_separator(),
        alternative_separator: default_alternative_separator(),
        max_combinations: default_max_combinations(),
    }
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_alternative_separator() -> String {
    "|".to_string()
}

fn default_max_combinations() -> usize {
    1_000_000
}

fn default_fields() -> FieldsConfig {
    FieldsConfig {
        separator: default_field_separator(),
    }
}

fn default_field_separator() -> String {
    "\t".to_string()
}

fn default_tokenizer() -> TokenizerConfig {
    TokenizerConfig {
        delimiter_pattern: default_delimiter_pattern(),
    }
}

fn default_delimiter_pattern() -> String {
    "[ .,/()&#!?]+".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If textkit.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full textkit.json config, falling back to defaults on any error.
pub fn load_config() -> TextkitConfig {
    load_config_from_file().unwrap_or_default()
}

/// Attempt to load config from textkit.json file.
fn load_config_from_file() -> crate::Result<TextkitConfig> {
    let path = paths::textkit_json()?;

    if !path.exists() {
        return Err(crate::Error::other("textkit.json not found"));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    parse_config(&content, &path.display().to_string())
}

fn parse_config(content: &str, source: &str) -> crate::Result<TextkitConfig> {
    serde_json::from_str(content).map_err(|e| crate::Error::config_invalid_json(source, e))
}

/// Save config to textkit.json file (creates if missing).
pub fn save_config(config: &TextkitConfig) -> crate::Result<()> {
    let path = paths::textkit_json()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize textkit.json".to_string()))
    })?;

    crate::io::write_file_atomic(&path, &content, &format!("write {}", path.display()))
}

/// Check if textkit.json file exists
pub fn config_exists() -> bool {
    paths::textkit_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete textkit.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::textkit_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to textkit.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::textkit_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

// =============================================================================
// JSON pointer edits
// =============================================================================

/// Set a value at a JSON pointer (e.g. `/defaults/generator/max_combinations`)
/// and save the result. Missing intermediate objects are created.
pub fn set_value(pointer: &str, value: Value) -> crate::Result<TextkitConfig> {
    let mut root = config_to_value(&load_config())?;
    set_json_pointer(&mut root, pointer, value)?;
    let config = value_to_config(root, pointer)?;
    save_config(&config)?;
    Ok(config)
}

/// Remove the value at a JSON pointer and save; the built-in default takes
/// its place on the next load.
pub fn remove_value(pointer: &str) -> crate::Result<TextkitConfig> {
    let mut root = config_to_value(&load_config())?;
    remove_json_pointer(&mut root, pointer)?;
    let config = value_to_config(root, pointer)?;
    save_config(&config)?;
    Ok(config)
}

fn config_to_value(config: &TextkitConfig) -> crate::Result<Value> {
    serde_json::to_value(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize textkit.json".to_string()))
    })
}

fn value_to_config(root: Value, pointer: &str) -> crate::Result<TextkitConfig> {
    serde_json::from_value(root)
        .map_err(|e| crate::Error::config_invalid_value(pointer, None, e.to_string()))
}

fn pointer_tokens(pointer: &str) -> crate::Result<Vec<String>> {
    if pointer.is_empty() || pointer == "/" || !pointer.starts_with('/') {
        return Err(crate::Error::validation_invalid_argument(
            "pointer",
            format!("JSON pointer must start with '/' and name a key: {}", pointer),
            None,
            None,
        ));
    }

    Ok(pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn set_json_pointer(root: &mut Value, pointer: &str, new_value: Value) -> crate::Result<()> {
    let mut tokens = pointer_tokens(pointer)?;
    let Some(last) = tokens.pop() else {
        return Ok(());
    };

    let mut current = root;
    for token in tokens {
        if current.is_null() {
            *current = Value::Object(serde_json::Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(token)
                .or_insert_with(|| Value::Object(serde_json::Map::new())),
            _ => {
                return Err(crate::Error::config_invalid_value(
                    pointer,
                    None,
                    "Expected an object along the pointer path",
                ))
            }
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last, new_value);
            Ok(())
        }
        _ => Err(crate::Error::config_invalid_value(
            pointer,
            None,
            "Cannot set a key on a non-object value",
        )),
    }
}

fn remove_json_pointer(root: &mut Value, pointer: &str) -> crate::Result<()> {
    let mut tokens = pointer_tokens(pointer)?;
    let Some(last) = tokens.pop() else {
        return Ok(());
    };

    let mut current = root;
    for token in tokens {
        current = match current.get_mut(&token) {
            Some(next) => next,
            None => return Ok(()),
        };
    }

    if let Value::Object(map) = current {
        map.remove(&last);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_builtin_defaults() {
        let config = parse_config("{}", "test").unwrap();
        assert_eq!(config.defaults.generator.separator, " ");
        assert_eq!(config.defaults.generator.alternative_separator, "|");
        assert_eq!(config.defaults.generator.max_combinations, 1_000_000);
        assert_eq!(config.defaults.fields.separator, "\t");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_config(
            r#"{"defaults": {"generator": {"max_combinations": 50}}}"#,
            "test",
        )
        .unwrap();
        assert_eq!(config.defaults.generator.max_combinations, 50);
        assert_eq!(config.defaults.generator.separator, " ");
        assert_eq!(config.defaults.tokenizer.delimiter_pattern, "[ .,/()&#!?]+");
    }

    #[test]
    fn pointer_set_creates_missing_objects() {
        let mut root = serde_json::json!({});
        set_json_pointer(
            &mut root,
            "/defaults/generator/max_combinations",
            serde_json::json!(10),
        )
        .unwrap();
        let config = value_to_config(root, "/defaults").unwrap();
        assert_eq!(config.defaults.generator.max_combinations, 10);
        assert_eq!(config.defaults.fields.separator, "\t");
    }

    #[test]
    fn pointer_remove_restores_default() {
        let mut root = serde_json::json!({
            "defaults": {"generator": {"separator": ",", "max_combinations": 3}}
        });
        remove_json_pointer(&mut root, "/defaults/generator/separator").unwrap();
        let config = value_to_config(root, "/defaults/generator/separator").unwrap();
        assert_eq!(config.defaults.generator.separator, " ");
        assert_eq!(config.defaults.generator.max_combinations, 3);
    }

    #[test]
    fn wrong_type_is_config_value_error() {
        let mut root = serde_json::json!({});
        let pointer = "/defaults/generator/max_combinations";
        set_json_pointer(&mut root, pointer, serde_json::json!("lots")).unwrap();
        let err = value_to_config(root, pointer).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], pointer);
    }

    #[test]
    fn pointer_must_start_with_slash() {
        let mut root = serde_json::json!({});
        let err = set_json_pointer(&mut root, "defaults", serde_json::json!(1)).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = parse_config("{not json", "textkit.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], "textkit.json");
    }
}
