use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

use textkit::defaults::{self, Defaults, TextkitConfig};

use super::CmdResult;
use crate::output::TextOutput;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore textkit.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set a configuration value at a JSON pointer path
    Set {
        /// JSON pointer path (e.g., /defaults/generator/max_combinations)
        pointer: String,
        /// Value to set (JSON; bare words are taken as strings)
        value: String,
    },
    /// Remove a configuration value, restoring its built-in default
    Remove {
        /// JSON pointer path (e.g., /defaults/fields/separator)
        pointer: String,
    },
    /// Reset configuration to built-in defaults (deletes textkit.json)
    Reset,
    /// Show the path to textkit.json
    Path,
}

#[derive(Debug, Default, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<TextkitConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl TextOutput for ConfigOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(path) = &self.path {
            writeln!(out, "{}", path)?;
        }
        if let Some(deleted) = self.deleted {
            writeln!(out, "{}", if deleted { "deleted" } else { "not present" })?;
        }

        let body = match (&self.config, &self.defaults) {
            (Some(config), _) => serde_json::to_string_pretty(config),
            (None, Some(defaults)) => serde_json::to_string_pretty(defaults),
            (None, None) => return Ok(()),
        };
        let body = body.map_err(io::Error::other)?;
        writeln!(out, "{}", body)
    }
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { pointer, value } => set(&pointer, &value),
        ConfigCommand::Remove { pointer } => remove(&pointer),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let output = if builtin {
        ConfigOutput {
            command: "config.show".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            ..Default::default()
        }
    } else {
        ConfigOutput {
            command: "config.show".to_string(),
            config: Some(defaults::load_config()),
            ..Default::default()
        }
    };

    Ok((output, 0))
}

fn set(pointer: &str, value_str: &str) -> CmdResult<ConfigOutput> {
    let value = parse_value(value_str);
    let config = defaults::set_value(pointer, value.clone())?;

    Ok((
        ConfigOutput {
            command: "config.set".to_string(),
            config: Some(config),
            pointer: Some(pointer.to_string()),
            value: Some(value),
            ..Default::default()
        },
        0,
    ))
}

fn remove(pointer: &str) -> CmdResult<ConfigOutput> {
    let config = defaults::remove_value(pointer)?;

    Ok((
        ConfigOutput {
            command: "config.remove".to_string(),
            config: Some(config),
            pointer: Some(pointer.to_string()),
            ..Default::default()
        },
        0,
    ))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    Ok((
        ConfigOutput {
            command: "config.reset".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            path: Some(defaults::config_path()?),
            deleted: Some(deleted),
            ..Default::default()
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    Ok((
        ConfigOutput {
            command: "config.path".to_string(),
            path: Some(defaults::config_path()?),
            exists: Some(defaults::config_exists()),
            ..Default::default()
        },
        0,
    ))
}

/// JSON literal when it parses, otherwise the raw string, so separators
/// like `;` need no quoting.
fn parse_value(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_parsing_prefers_json() {
        assert_eq!(parse_value("500"), serde_json::json!(500));
        assert_eq!(parse_value("\"|\""), serde_json::json!("|"));
        assert_eq!(parse_value(";"), serde_json::json!(";"));
    }

    #[test]
    fn path_output_prints_path_only() {
        let output = ConfigOutput {
            command: "config.path".to_string(),
            path: Some("/tmp/textkit.json".to_string()),
            exists: Some(false),
            ..Default::default()
        };
        let mut buf = Vec::new();
        output.write_text(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "/tmp/textkit.json\n");
    }
}
