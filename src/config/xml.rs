//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Unknown elements are rejected so typos surface instead of being ignored.
//!
//! Every element is optional; missing ones keep the Config defaults and CLI
//! flags are applied on top by the caller.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source: Option<String>,
    target: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    amount: Option<u64>,
    filter: Option<String>,
    older_first: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    preserve_times: Option<bool>,
    disable_locks: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional u64
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|e| <D::Error as serde::de::Error>::custom(format!("amount '{s}': {e}"))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(PathBuf::from)
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(p) = non_empty_path(parsed.source.as_deref()) {
        cfg.source = p;
    }
    if let Some(p) = non_empty_path(parsed.target.as_deref()) {
        cfg.target = p;
    }
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());

    cfg.amount_gib = parsed.amount.unwrap_or(0);
    // The filter is a regex; whitespace may be meaningful, so it is kept verbatim.
    cfg.filter = parsed.filter.unwrap_or_default();

    if let Some(level) = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok())
    {
        cfg.log_level = level;
    }

    cfg.older_first = parsed.older_first.unwrap_or(false);
    cfg.preserve_times = parsed.preserve_times.unwrap_or(false);
    cfg.disable_locks = parsed.disable_locks.unwrap_or(false);
    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Build the base Config for a run.
///
/// - `explicit` (from `--config`) must exist.
/// - Otherwise the default location is used; when it is missing, defaults
///   apply, unless MOVE_UPTO_CONFIG pointed there, which is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_config_from_xml_path(p);
    }
    let path = default_config_path()?;
    if path.exists() {
        debug!(path = %path.display(), "using config file");
        return load_config_from_xml_path(&path);
    }
    if std::env::var_os(super::CONFIG_ENV_VAR).is_some() {
        anyhow::bail!(
            "{} points to '{}', which does not exist",
            super::CONFIG_ENV_VAR,
            path.display()
        );
    }
    debug!(path = %path.display(), "no config file; using defaults");
    Ok(Config::default())
}
