use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};

use crate::engine::{Direction, Parameter};

#[derive(Parser, Debug)]
#[command(name = "param-resolver")]
#[command(about = "Resolve plugin request parameters against their definitions", long_about = None)]
pub struct Args {
    /// JSON object of parameter values
    #[arg(long, value_name = "FILE")]
    pub values: PathBuf,

    /// Parameter definitions (JSON or YAML list)
    #[arg(long, value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Resolution direction
    #[arg(short, long)]
    pub direction: Direction,

    /// Resolver config file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a directory-backed store rooted here
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Where downloaded files are materialized
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Fail when values disagree with their definitions
    #[arg(long)]
    pub strict: bool,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_file(&self.values)?;
        if let Some(ref definitions) = self.definitions {
            validate_file(definitions)?;
        }
        if let Some(ref config) = self.config {
            validate_file(config)?;
        }
        Ok(())
    }
}

pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }
    std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    Ok(())
}

pub fn read_values(path: &Path) -> Result<Map<String, JsonValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read values: {}", path.display()))?;
    let value: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in values: {}", path.display()))?;
    match value {
        JsonValue::Object(map) => Ok(map),
        other => anyhow::bail!(
            "Values must be a JSON object, found {} in {}",
            json_kind(&other),
            path.display()
        ),
    }
}

pub fn read_definitions(path: &Path) -> Result<Vec<Parameter>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read definitions: {}", path.display()))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let definitions: Vec<Parameter> = match extension {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in definitions: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in definitions: {}", path.display()))?,
    };
    Ok(definitions)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
