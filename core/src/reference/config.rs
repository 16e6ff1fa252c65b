//! Reference document configuration
//!
//! Describes which rng scenarios and fixed-point tables make up a reference
//! document. [`ReferenceConfig::default`] is the compatibility surface every
//! conforming implementation is checked against; custom configs are for
//! extra coverage.

use crate::fixpt::FP_BASE;
use crate::rng::{RngError, RngStream};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Largest whole number that still fits in Q16.16
pub const MAX_WHOLE: i64 = i64::MAX >> FP_BASE;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Scenario label must not be empty")]
    EmptyLabel,

    #[error("Duplicate scenario label: {0}")]
    DuplicateLabel(String),

    #[error("Scenario '{0}' uses seed 0, which leaves the generator unseeded")]
    ZeroSeed(String),

    #[error("Scenario '{label}': {source}")]
    InvalidStream {
        label: String,
        #[source]
        source: RngError,
    },

    #[error("Scenario '{label}': range [{lower}, {upper}] is wider than the generator output")]
    RangeTooWide { label: String, lower: i64, upper: i64 },

    #[error("Scenario '{label}': paired radix must be positive, got {radix}")]
    InvalidRadix { label: String, radix: i64 },

    #[error("Table '{table}': empty domain [{start}, {end}]")]
    EmptyDomain { table: String, start: i64, end: i64 },

    #[error("Table '{table}': {value} does not fit in fixed point")]
    OutOfRange { table: String, value: i64 },

    #[error("Power table base must not be zero")]
    ZeroBase,

    #[error("Duplicate power table base: {0}")]
    DuplicateBase(i64),
}

/// Inclusive integer range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusiveRange<T> {
    pub start: T,
    pub end: T,
}

impl<T> InclusiveRange<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

/// How consecutive draws become one reference value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawEncoding {
    /// One draw per value
    #[default]
    Single,

    /// Two draws per value, combined as `lo + hi * radix`
    ///
    /// Legacy encoding for level seeds; the draw order (low first) matters.
    Paired { radix: i64 },
}

/// One seeded sequence of inclusive-range draws
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngScenario {
    /// Key under `"rng"` in the reference document
    pub label: String,

    /// Seed applied to both streams before drawing (must be non-zero)
    pub seed: u64,

    /// Stream the draws come from
    #[serde(default)]
    pub stream: usize,

    /// Inclusive lower bound of each draw
    pub lower: i64,

    /// Inclusive upper bound of each draw
    pub upper: i64,

    /// Number of values produced (a paired value consumes two draws)
    pub count: usize,

    #[serde(default)]
    pub encoding: DrawEncoding,
}

impl RngScenario {
    fn single(seed: u64, lower: i64, upper: i64, count: usize) -> Self {
        Self {
            label: format!("seed_{}_range_{}_{}", seed, lower, upper),
            seed,
            stream: 0,
            lower,
            upper,
            count,
            encoding: DrawEncoding::Single,
        }
    }

    /// Check the scenario and resolve the stream it draws from
    pub(crate) fn validate(&self) -> Result<RngStream, ConfigError> {
        if self.label.is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if self.seed == 0 {
            return Err(ConfigError::ZeroSeed(self.label.clone()));
        }

        let stream =
            RngStream::try_from(self.stream).map_err(|source| ConfigError::InvalidStream {
                label: self.label.clone(),
                source,
            })?;

        if self.upper > self.lower {
            let interval = self.upper as i128 - self.lower as i128 + 1;
            if interval > u32::MAX as i128 {
                return Err(ConfigError::RangeTooWide {
                    label: self.label.clone(),
                    lower: self.lower,
                    upper: self.upper,
                });
            }
        }

        if let DrawEncoding::Paired { radix } = self.encoding {
            if radix <= 0 {
                return Err(ConfigError::InvalidRadix {
                    label: self.label.clone(),
                    radix,
                });
            }
        }

        Ok(stream)
    }
}

/// One `pow_<base>` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowTable {
    /// Whole-number base
    pub base: i64,

    /// Exponents to tabulate
    pub exponents: InclusiveRange<i32>,
}

impl PowTable {
    /// Key under `"fixpt"` in the reference document
    pub fn key(&self) -> String {
        format!("pow_{}", self.base)
    }
}

/// Fixed-point tables to include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixptConfig {
    /// Whole numbers whose square roots are tabulated
    pub sqrt: InclusiveRange<i64>,

    pub pow: Vec<PowTable>,
}

impl Default for FixptConfig {
    fn default() -> Self {
        Self {
            sqrt: InclusiveRange::new(0, 127),
            pow: vec![
                PowTable {
                    base: 2,
                    exponents: InclusiveRange::new(-5, 10),
                },
                PowTable {
                    base: 3,
                    exponents: InclusiveRange::new(-3, 5),
                },
            ],
        }
    }
}

impl FixptConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let sqrt = &self.sqrt;
        if sqrt.start > sqrt.end {
            return Err(ConfigError::EmptyDomain {
                table: "sqrt".to_string(),
                start: sqrt.start,
                end: sqrt.end,
            });
        }
        for value in [sqrt.start, sqrt.end] {
            if value.unsigned_abs() > MAX_WHOLE as u64 {
                return Err(ConfigError::OutOfRange {
                    table: "sqrt".to_string(),
                    value,
                });
            }
        }

        let mut bases = HashSet::new();
        for table in &self.pow {
            if table.base == 0 {
                return Err(ConfigError::ZeroBase);
            }
            if table.base.unsigned_abs() > MAX_WHOLE as u64 {
                return Err(ConfigError::OutOfRange {
                    table: table.key(),
                    value: table.base,
                });
            }
            if !bases.insert(table.base) {
                return Err(ConfigError::DuplicateBase(table.base));
            }
            if table.exponents.start > table.exponents.end {
                return Err(ConfigError::EmptyDomain {
                    table: table.key(),
                    start: table.exponents.start.into(),
                    end: table.exponents.end.into(),
                });
            }
        }
        Ok(())
    }
}

/// Complete reference document configuration
///
/// # Example
/// ```
/// use oracle_core::reference::ReferenceConfig;
///
/// let config = ReferenceConfig::default();
/// assert_eq!(config.rng.len(), 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub rng: Vec<RngScenario>,
    pub fixpt: FixptConfig,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            rng: vec![
                RngScenario::single(12345, 0, 999, 20),
                RngScenario::single(42, 0, 999, 20),
                RngScenario::single(1, 0, 99, 20),
                RngScenario::single(1, 0, 999, 20),
                RngScenario {
                    label: "seed_1_level_seeds".to_string(),
                    seed: 1,
                    stream: 0,
                    lower: 0,
                    upper: 9999,
                    count: 10,
                    encoding: DrawEncoding::Paired { radix: 10000 },
                },
            ],
            fixpt: FixptConfig::default(),
        }
    }
}

impl ReferenceConfig {
    /// Parse a configuration from JSON; missing sections take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every scenario and table before anything is generated
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut labels = HashSet::new();
        for scenario in &self.rng {
            scenario.validate()?;
            if !labels.insert(scenario.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(scenario.label.clone()));
            }
        }
        self.fixpt.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labels: Vec<_> = ReferenceConfig::default()
            .rng
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "seed_12345_range_0_999",
                "seed_42_range_0_999",
                "seed_1_range_0_99",
                "seed_1_range_0_999",
                "seed_1_level_seeds",
            ]
        );
    }

    #[test]
    fn test_zero_seed_rejected() {
        let mut config = ReferenceConfig::default();
        config.rng[0].seed = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroSeed("seed_12345_range_0_999".to_string()))
        );
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut config = ReferenceConfig::default();
        config.rng[1].label = config.rng[0].label.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_invalid_stream_rejected() {
        let mut config = ReferenceConfig::default();
        config.rng[2].stream = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStream {
                source: RngError::InvalidStream(5),
                ..
            })
        ));
    }

    #[test]
    fn test_range_too_wide_rejected() {
        let mut config = ReferenceConfig::default();
        config.rng[0].lower = 0;
        config.rng[0].upper = u32::MAX as i64;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeTooWide { .. })
        ));

        // One less fits exactly
        config.rng[0].upper = u32::MAX as i64 - 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_are_allowed() {
        let mut config = ReferenceConfig::default();
        config.rng[0].lower = 10;
        config.rng[0].upper = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_radix_rejected() {
        let mut config = ReferenceConfig::default();
        config.rng[4].encoding = DrawEncoding::Paired { radix: 0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadix { radix: 0, .. })
        ));
    }

    #[test]
    fn test_fixpt_table_errors() {
        let mut config = ReferenceConfig::default();
        config.fixpt.pow[0].base = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBase));

        let mut config = ReferenceConfig::default();
        config.fixpt.pow[1].base = 2;
        assert_eq!(config.validate(), Err(ConfigError::DuplicateBase(2)));

        let mut config = ReferenceConfig::default();
        config.fixpt.sqrt = InclusiveRange::new(10, 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyDomain { .. })
        ));

        let mut config = ReferenceConfig::default();
        config.fixpt.sqrt.end = MAX_WHOLE + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = ReferenceConfig::from_json(r#"{"rng": []}"#).unwrap();
        assert!(config.rng.is_empty());
        assert_eq!(config.fixpt, FixptConfig::default());
    }

    #[test]
    fn test_scenario_json_defaults() {
        let json = r#"{
            "rng": [
                {"label": "dice", "seed": 9, "lower": 1, "upper": 6, "count": 3},
                {"label": "pairs", "seed": 9, "stream": 1, "lower": 0, "upper": 9,
                 "count": 2, "encoding": {"Paired": {"radix": 10}}}
            ]
        }"#;
        let config = ReferenceConfig::from_json(json).unwrap();
        assert_eq!(config.rng[0].stream, 0);
        assert_eq!(config.rng[0].encoding, DrawEncoding::Single);
        assert_eq!(config.rng[1].encoding, DrawEncoding::Paired { radix: 10 });
        assert!(config.validate().is_ok());
    }
}
