//! Subcommand implementations

use anyhow::{Context, Result};
use oracle_core::reference::{generate as generate_values, ReferenceConfig, ReferenceValues};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

fn load_config(path: Option<&Path>) -> Result<ReferenceConfig> {
    let Some(path) = path else {
        debug!("using default reference config");
        return Ok(ReferenceConfig::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = ReferenceConfig::from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), scenarios = config.rng.len(), "loaded config");
    Ok(config)
}

fn build(config: Option<&Path>) -> Result<ReferenceValues> {
    let config = load_config(config)?;
    generate_values(&config).context("generating reference values")
}

pub fn generate(config: Option<&Path>, output: Option<&Path>, compact: bool) -> Result<()> {
    let values = build(config)?;
    let json = if compact {
        values.to_json()?
    } else {
        values.to_json_pretty()?
    };

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote reference document");
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Returns `true` when the candidate matches every reference value
pub fn verify(candidate: &Path, config: Option<&Path>) -> Result<bool> {
    let expected = build(config)?;

    let json = fs::read_to_string(candidate)
        .with_context(|| format!("reading candidate {}", candidate.display()))?;
    let actual = ReferenceValues::from_json(&json)
        .with_context(|| format!("parsing candidate {}", candidate.display()))?;

    let mismatches = expected.compare(&actual);
    for mismatch in &mismatches {
        println!("{}", mismatch);
    }

    if mismatches.is_empty() {
        println!("OK: {} conforms", candidate.display());
        Ok(true)
    } else {
        println!("FAIL: {} mismatches", mismatches.len());
        Ok(false)
    }
}

pub fn fingerprint(config: Option<&Path>) -> Result<()> {
    let values = build(config)?;
    println!("{}", values.fingerprint()?);
    Ok(())
}

pub fn default_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&ReferenceConfig::default())?;
    println!("{}", json);
    Ok(())
}
