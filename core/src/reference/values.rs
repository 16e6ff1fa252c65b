//! Reference document and conformance comparison
//!
//! The document has exactly two top-level keys:
//!
//! ```text
//! { "rng":   { <label>: [int, ...], ... },
//!   "fixpt": { "sqrt": { "<k>": fixpt, ... }, "pow_<base>": { "<e>": fixpt, ... } } }
//! ```
//!
//! Integer map keys are written as JSON strings. Maps are ordered, so the
//! compact JSON (and therefore the fingerprint) is stable.

use super::ReferenceError;
use crate::fixpt::Fixpt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// One fixed-point table keyed by its integer input
pub type FixptTable = BTreeMap<i64, Fixpt>;

/// Generated (or loaded) reference values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceValues {
    pub rng: BTreeMap<String, Vec<i64>>,
    pub fixpt: BTreeMap<String, FixptTable>,
}

/// A single difference between an expected and a candidate document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Present in the expected document only
    Missing { path: String },

    /// Present in the candidate document only
    Unexpected { path: String },

    /// Sequence lengths differ
    Length {
        path: String,
        expected: usize,
        actual: usize,
    },

    /// Values differ
    Value {
        path: String,
        expected: i64,
        actual: i64,
    },
}

impl Mismatch {
    /// Dotted path of the differing entry, e.g. `rng.seed_42_range_0_999[3]`
    pub fn path(&self) -> &str {
        match self {
            Mismatch::Missing { path }
            | Mismatch::Unexpected { path }
            | Mismatch::Length { path, .. }
            | Mismatch::Value { path, .. } => path,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Missing { path } => write!(f, "{}: missing from candidate", path),
            Mismatch::Unexpected { path } => write!(f, "{}: not in reference", path),
            Mismatch::Length {
                path,
                expected,
                actual,
            } => write!(f, "{}: expected {} values, got {}", path, expected, actual),
            Mismatch::Value {
                path,
                expected,
                actual,
            } => write!(f, "{}: expected {}, got {}", path, expected, actual),
        }
    }
}

impl ReferenceValues {
    /// Compact JSON
    pub fn to_json(&self) -> Result<String, ReferenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String, ReferenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document produced by any implementation
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// SHA256 of the compact JSON, lowercase hex
    ///
    /// # Example
    /// ```
    /// use oracle_core::reference::{generate, ReferenceConfig};
    ///
    /// let values = generate(&ReferenceConfig::default()).unwrap();
    /// let fingerprint = values.fingerprint().unwrap();
    /// assert_eq!(fingerprint.len(), 64);
    /// ```
    pub fn fingerprint(&self) -> Result<String, ReferenceError> {
        let json = self.to_json()?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let result = hasher.finalize();

        Ok(format!("{:x}", result))
    }

    /// Every difference between `self` (expected) and `candidate`
    ///
    /// An empty result means the candidate conforms.
    pub fn compare(&self, candidate: &ReferenceValues) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();

        compare_maps(
            "rng",
            &self.rng,
            &candidate.rng,
            &mut mismatches,
            |path, expected, actual, out| compare_sequences(path, expected, actual, out),
        );
        compare_maps(
            "fixpt",
            &self.fixpt,
            &candidate.fixpt,
            &mut mismatches,
            |path, expected, actual, out| {
                compare_maps(path, expected, actual, out, |path, &e, &a, out| {
                    if e != a {
                        out.push(Mismatch::Value {
                            path: path.to_string(),
                            expected: e,
                            actual: a,
                        });
                    }
                })
            },
        );

        mismatches
    }
}

fn compare_maps<K, V, F>(
    prefix: &str,
    expected: &BTreeMap<K, V>,
    actual: &BTreeMap<K, V>,
    out: &mut Vec<Mismatch>,
    mut compare_entry: F,
) where
    K: Ord + fmt::Display,
    F: FnMut(&str, &V, &V, &mut Vec<Mismatch>),
{
    for (key, expected_value) in expected {
        let path = format!("{}.{}", prefix, key);
        match actual.get(key) {
            Some(actual_value) => compare_entry(&path, expected_value, actual_value, out),
            None => out.push(Mismatch::Missing { path }),
        }
    }
    for key in actual.keys().filter(|key| !expected.contains_key(*key)) {
        out.push(Mismatch::Unexpected {
            path: format!("{}.{}", prefix, key),
        });
    }
}

fn compare_sequences(path: &str, expected: &[i64], actual: &[i64], out: &mut Vec<Mismatch>) {
    if expected.len() != actual.len() {
        out.push(Mismatch::Length {
            path: path.to_string(),
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (index, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            out.push(Mismatch::Value {
                path: format!("{}[{}]", path, index),
                expected: e,
                actual: a,
            });
        }
    }
}
