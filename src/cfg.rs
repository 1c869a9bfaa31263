use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path};
use thiserror::Error;

pub(crate) const DEFAULT_PATH: &str = "config.json";

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("output_file must not be empty")]
    EmptyOutputFile,
    #[error("output_file must be a plain file name, got `{0}`")]
    OutputFileNotPlain(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Config {
    /// Number of values to generate
    #[serde(default = "default_data_size")]
    pub(crate) data_size: usize,
    /// Dataset file name, relative to the data directory
    #[serde(default = "default_output_file")]
    pub(crate) output_file: String,
    /// Written as RFC 3339; read back with or without a UTC offset
    #[serde(
        default,
        deserialize_with = "deserialize_last_run",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) last_run: Option<DateTime<Local>>,
    /// Keys we do not understand; kept so that saving does not drop them
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

fn default_data_size() -> usize {
    10
}

fn default_output_file() -> String {
    "output.json".to_string()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Local));
    }
    // offset-less ISO-8601, taken as local time
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(
        naive
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or_else(|| naive.and_utc().with_timezone(&Local)),
    )
}

fn deserialize_last_run<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => parse_timestamp(&s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("last_run `{}` is not an ISO-8601 timestamp", s))
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_size: default_data_size(),
            output_file: default_output_file(),
            last_run: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.is_empty() {
            return Err(ConfigError::EmptyOutputFile);
        }
        let mut components = Path::new(&self.output_file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(ConfigError::OutputFileNotPlain(self.output_file.clone())),
        }
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser).context("failed to serialize config")?;
        std::fs::write(path, buf)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        tracing::info!("config saved to {}", path.display());
        Ok(())
    }
}

/// Reads and validates the config, `None` if the file does not exist.
pub(crate) fn read(path: &Path) -> Result<Option<Config>> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("file {} is not readable", path.display()))
        }
    };
    let config: Config = serde_json::from_slice(&data)
        .with_context(|| format!("parse error in {}", path.display()))?;
    for key in config.extra.keys() {
        tracing::warn!("unknown config key `{}`, keeping it as is", key);
    }
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(Some(config))
}

pub(crate) fn load(path: &Path) -> Result<Config> {
    match read(path)? {
        Some(config) => {
            tracing::info!("config loaded from {}", path.display());
            Ok(config)
        }
        None => {
            tracing::warn!(
                "config file {} not found, using defaults",
                path.display()
            );
            Ok(Config::default())
        }
    }
}
