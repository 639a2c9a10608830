//! Result rendering

use crate::error::CliResult;
use clap::ValueEnum;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Print `value` in the structured formats, or `text` for [`OutputFormat::Text`]
pub fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> CliResult<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    println!("{}", render(format, value, text)?);
    Ok(())
}

fn render<T, F>(format: OutputFormat, value: &T, text: F) -> CliResult<String>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
    })
}
