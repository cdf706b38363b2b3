//! Advisory table - locally curated caution sentences per symptom.
//!
//! The table is built once on first use and is read-only afterwards, so it
//! is shared across concurrent turns without synchronization.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use super::Symptom;

static STANDARD_ADVISORIES: Lazy<Arc<AdvisoryTable>> = Lazy::new(|| {
    Arc::new(AdvisoryTable::from_entries([
        (
            "headache",
            "Headaches can be caused by stress, dehydration, or lack of sleep. \
             Seek medical attention if severe.",
        ),
        (
            "fever",
            "Fever often indicates infection. Consult a doctor if it persists or is high.",
        ),
        (
            "cough",
            "Coughing can be from infections or allergies. See a doctor if breathing is difficult.",
        ),
        (
            "fatigue",
            "Fatigue has many causes including stress and illness. Consult a doctor if persistent.",
        ),
    ]))
});

/// Immutable mapping from lowercase symptom key to advisory sentence.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryTable {
    entries: HashMap<String, String>,
}

impl AdvisoryTable {
    /// The process-wide table shipped with the service.
    pub fn standard() -> Arc<AdvisoryTable> {
        Arc::clone(&STANDARD_ADVISORIES)
    }

    /// Builds a table from `(key, advisory)` pairs. Keys are lowercased.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Looks up the curated advisory for a key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of curated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no curated entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the advisory sentence for a symptom.
    ///
    /// Total over every input: symptoms without a curated entry get a generic
    /// referral that keeps the symptom's original casing.
    pub fn explain(&self, symptom: &Symptom) -> String {
        match self.entries.get(symptom.key()) {
            Some(advisory) => advisory.clone(),
            None => format!(
                "{} should be evaluated by a doctor if it persists.",
                symptom.display_name()
            ),
        }
    }
}

/// Explains a symptom using the standard advisory table.
pub fn explain(symptom: &Symptom) -> String {
    AdvisoryTable::standard().explain(symptom)
}
