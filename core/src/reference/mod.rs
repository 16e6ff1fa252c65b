//! Reference document generation
//!
//! Runs the configured rng scenarios and fixed-point tables and collects the
//! results into a [`ReferenceValues`] document. Other implementations of the
//! generator and the fixed-point library are checked against this document.
//!
//! # Example
//!
//! ```
//! use oracle_core::reference::{generate, ReferenceConfig};
//!
//! let values = generate(&ReferenceConfig::default()).unwrap();
//! assert_eq!(values.rng["seed_12345_range_0_999"][0], 148);
//! assert_eq!(values.fixpt["pow_3"][&-1i64], 21845);
//! ```

mod config;
mod values;

pub use config::{
    ConfigError, DrawEncoding, FixptConfig, InclusiveRange, PowTable, ReferenceConfig,
    RngScenario, MAX_WHOLE,
};
pub use values::{FixptTable, Mismatch, ReferenceValues};

use crate::fixpt::{checked_pow, fp_sqrt, from_int, FixptError};
use crate::rng::RngManager;
use thiserror::Error;
use tracing::debug;

/// Errors raised while generating or (de)serializing a reference document
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario '{label}': encoded value overflows 64 bits")]
    EncodingOverflow { label: String },

    #[error("Table '{table}' at {key}: {source}")]
    Fixpt {
        table: String,
        key: i64,
        #[source]
        source: FixptError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generate the reference document described by `config`
///
/// Each scenario reseeds both streams, so scenario order does not change
/// any individual scenario's output.
pub fn generate(config: &ReferenceConfig) -> Result<ReferenceValues, ReferenceError> {
    config.validate()?;

    let mut rng = RngManager::new();
    let mut values = ReferenceValues::default();

    for scenario in &config.rng {
        let draws = run_scenario(&mut rng, scenario)?;
        debug!(
            label = %scenario.label,
            seed = scenario.seed,
            count = draws.len(),
            "generated rng scenario"
        );
        values.rng.insert(scenario.label.clone(), draws);
    }

    values
        .fixpt
        .insert("sqrt".to_string(), sqrt_table(&config.fixpt.sqrt));
    debug!(
        start = config.fixpt.sqrt.start,
        end = config.fixpt.sqrt.end,
        "generated sqrt table"
    );

    for table in &config.fixpt.pow {
        values.fixpt.insert(table.key(), pow_table(table)?);
        debug!(base = table.base, "generated power table");
    }

    Ok(values)
}

/// Seed, then draw `scenario.count` values from the selected stream
pub fn run_scenario(
    rng: &mut RngManager,
    scenario: &RngScenario,
) -> Result<Vec<i64>, ReferenceError> {
    let stream = scenario.validate()?;
    let (lower, upper) = (scenario.lower, scenario.upper);

    rng.seed(scenario.seed);

    match scenario.encoding {
        DrawEncoding::Single => Ok((0..scenario.count)
            .map(|_| rng.rand_range(stream, lower, upper))
            .collect()),
        DrawEncoding::Paired { radix } => (0..scenario.count)
            .map(|_| {
                let lo = rng.rand_range(stream, lower, upper);
                let hi = rng.rand_range(stream, lower, upper);
                hi.checked_mul(radix)
                    .and_then(|v| v.checked_add(lo))
                    .ok_or_else(|| ReferenceError::EncodingOverflow {
                        label: scenario.label.clone(),
                    })
            })
            .collect(),
    }
}

fn sqrt_table(domain: &InclusiveRange<i64>) -> FixptTable {
    (domain.start..=domain.end)
        .map(|k| (k, fp_sqrt(from_int(k))))
        .collect()
}

fn pow_table(table: &PowTable) -> Result<FixptTable, ReferenceError> {
    let base = from_int(table.base);
    (table.exponents.start..=table.exponents.end)
        .map(|expn| {
            checked_pow(base, expn)
                .map(|value| (i64::from(expn), value))
                .map_err(|source| ReferenceError::Fixpt {
                    table: table.key(),
                    key: expn.into(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngStream;

    #[test]
    fn test_paired_encoding_low_draw_first() {
        let scenario = RngScenario {
            label: "pairs".to_string(),
            seed: 1,
            stream: 0,
            lower: 0,
            upper: 9999,
            count: 1,
            encoding: DrawEncoding::Paired { radix: 10000 },
        };
        let mut rng = RngManager::new();
        let values = run_scenario(&mut rng, &scenario).unwrap();

        let mut replay = RngManager::new();
        replay.seed(1);
        let lo = replay.rand_range(RngStream::Primary, 0, 9999);
        let hi = replay.rand_range(RngStream::Primary, 0, 9999);
        assert_eq!(values, vec![lo + hi * 10000]);
        assert_eq!(values, vec![12106340]);
    }

    #[test]
    fn test_secondary_stream_scenario_matches_primary_for_same_seed() {
        // Both streams are seeded identically, so they yield the same draws
        let mut scenario = ReferenceConfig::default().rng[0].clone();
        let mut rng = RngManager::new();
        let primary = run_scenario(&mut rng, &scenario).unwrap();

        scenario.stream = 1;
        let secondary = run_scenario(&mut rng, &scenario).unwrap();
        assert_eq!(primary, secondary);
    }

    #[test]
    fn test_encoding_overflow_reported() {
        let scenario = RngScenario {
            label: "huge".to_string(),
            seed: 3,
            stream: 0,
            lower: 1,
            upper: 1,
            count: 1,
            encoding: DrawEncoding::Paired { radix: i64::MAX },
        };
        // upper <= lower: both draws are 1, and 1 * MAX + 1 overflows
        let mut rng = RngManager::new();
        assert!(matches!(
            run_scenario(&mut rng, &scenario),
            Err(ReferenceError::EncodingOverflow { .. })
        ));
    }

    #[test]
    fn test_pow_table_overflow_reported() {
        let mut config = ReferenceConfig::default();
        config.fixpt.pow[0].exponents = InclusiveRange::new(0, 60);
        match generate(&config) {
            Err(ReferenceError::Fixpt { table, key, source }) => {
                assert_eq!(table, "pow_2");
                assert_eq!(key, 47);
                assert_eq!(source, FixptError::Overflow);
            }
            other => panic!("expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_generation() {
        let mut config = ReferenceConfig::default();
        config.rng[0].seed = 0;
        assert!(matches!(
            generate(&config),
            Err(ReferenceError::Config(ConfigError::ZeroSeed(_)))
        ));
    }
}
