use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::Config;

const BUILTIN_CATALOG: &str = include_str!("activities.toml");

pub fn load_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The catalog compiled into the binary.
pub fn builtin_config() -> Result<Config> {
    parse_config(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
}

/// Load `path` if given, the built-in catalog otherwise.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => builtin_config(),
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let mut names = HashSet::new();
    for entry in &config.activities {
        if entry.name.trim().is_empty() {
            bail!("Activity with empty name");
        }
        if !names.insert(entry.name.as_str()) {
            bail!("Duplicate activity '{}'", entry.name);
        }
        if entry.max_participants == 0 {
            bail!("Activity '{}': max_participants must be positive", entry.name);
        }
        if entry.participants.len() > entry.max_participants as usize {
            bail!(
                "Activity '{}': {} participants exceed capacity {}",
                entry.name,
                entry.participants.len(),
                entry.max_participants
            );
        }
        let mut seen = HashSet::new();
        for email in &entry.participants {
            if email.trim().is_empty() {
                bail!("Activity '{}': empty participant email", entry.name);
            }
            if !seen.insert(email.as_str()) {
                bail!("Activity '{}': duplicate participant {}", entry.name, email);
            }
        }
    }
    Ok(())
}
