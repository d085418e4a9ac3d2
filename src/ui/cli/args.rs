use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde_json::{Map, Value};

use crate::ensemble::EnsembleConfig;
use crate::evaluation::CurveFormat;
use crate::ui::types::choices::{StreamChoice, StreamKind};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Prequential runner for the adaptive random tree ensemble"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the ensemble test-then-train on a stream
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Stream to consume (sea-generator, sea-drift)
    #[arg(long, default_value = "sea-generator", value_name = "STREAM")]
    pub stream: String,

    /// Ensemble configuration as a JSON document
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Overrides the ensemble seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Stop after this many instances (omit for unlimited)
    #[arg(long, value_name = "N")]
    pub max_instances: Option<u64>,

    /// Stop after this many CPU seconds (omit for unlimited)
    #[arg(long, value_name = "SECONDS")]
    pub max_seconds: Option<u64>,

    /// Emit metrics every N instances
    #[arg(
        long,
        default_value_t = 10_000,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub sample_frequency: u64,

    /// File to dump evaluation snapshots after completion
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub dump_file: Option<PathBuf>,

    /// Format for the dump file (csv, tsv, json)
    #[arg(long, default_value = "csv", value_name = "FORMAT")]
    pub dump_format: CurveFormat,

    /// Override ensemble parameters (key=value, nested keys with dots)
    #[arg(long = "learner-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub learner_params: Vec<KeyValue>,

    /// Override stream parameters (key=value, nested keys with dots)
    #[arg(long = "stream-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub stream_params: Vec<KeyValue>,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

/// Everything a prequential run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub stream: StreamChoice,
    pub learner: EnsembleConfig,
    pub max_instances: Option<u64>,
    pub max_seconds: Option<u64>,
    pub sample_frequency: u64,
    pub dump_file: Option<PathBuf>,
    pub dump_format: CurveFormat,
}

impl RunArgs {
    pub fn into_plan(self) -> Result<RunPlan> {
        let kind = parse_kind::<StreamKind>(&self.stream)
            .with_context(|| format!("invalid stream '{}'", self.stream))?;
        let mut stream_params = StreamChoice::default_params(kind)?;
        apply_overrides(&mut stream_params, &self.stream_params)?;
        let stream = StreamChoice::from_parts(kind, stream_params)
            .with_context(|| format!("invalid parameters for stream '{kind}'"))?;

        let learner = self.learner_config()?;

        Ok(RunPlan {
            stream,
            learner,
            max_instances: self.max_instances,
            max_seconds: self.max_seconds,
            sample_frequency: self.sample_frequency,
            dump_file: self.dump_file,
            dump_format: self.dump_format,
        })
    }

    fn learner_config(&self) -> Result<EnsembleConfig> {
        let mut params = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config '{}'", path.display()))?;
                serde_json::from_str::<Value>(&text)
                    .with_context(|| format!("config '{}' is not valid JSON", path.display()))?
            }
            None => serde_json::to_value(EnsembleConfig::default())?,
        };
        apply_overrides(&mut params, &self.learner_params)?;
        if let Some(seed) = self.seed {
            set_path(&mut params, "seed", Value::from(seed))?;
        }

        let config: EnsembleConfig =
            serde_json::from_value(params).context("invalid ensemble configuration")?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let candidates = candidate_spellings(raw);
    for cand in candidates {
        if let Ok(parsed) = cand.parse::<T>() {
            return Ok(parsed);
        }
    }
    Err(anyhow!("could not parse value '{raw}'"))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return out;
    }

    out.push(trimmed.to_string());
    out.push(trimmed.to_lowercase());
    out.push(kebab_from_token(trimmed));
    out.push(trimmed.replace('_', "-"));
    out.sort();
    out.dedup();
    out
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            buf.extend(ch.to_lowercase());
            prev_lower = false;
        } else if ch == '_' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase();
        }
    }
    buf
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = ensure_object(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    ensure_object(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn ensure_object(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other:?}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

/// JSON literal when it parses as one, plain string otherwise.
fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
