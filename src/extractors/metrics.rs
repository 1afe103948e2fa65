// src/extractors/metrics.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extractors::section::Section;

// --- Metric Vocabulary ---
// Financial-metric keywords in priority order. A line is credited to the
// first keyword found in it; later keywords on the same line are ignored.
static METRICS: &[&str] = &["revenue", "profit", "loss", "cash flow", "earnings", "ebitda"];

// --- Value Pattern (Lazy Static) ---
// Monetary/numeric value: optional currency symbol, decimal number,
// optional single whitespace, optional scale-unit word from a closed set.
// The leftmost match in a line is taken verbatim, symbol and unit
// included. No thousands separators, no negatives, no ranges.
static VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$?\d+(?:\.\d+)?\s?(?:million|billion|mn|bn|crore|lakh)?")
        .expect("Failed to compile VALUE_PATTERN")
});

// --- Data Structures ---

/// Classification of an extracted mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Quantitative,
    Qualitative,
}

impl InsightType {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightType::Quantitative => "quantitative",
            InsightType::Qualitative => "qualitative",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted metric mention. Field declaration order is the output
/// schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    /// Vocabulary keyword that matched, in its lowercase form.
    pub metric: String,
    /// Verbatim matched value substring, absent for qualitative mentions.
    pub value: Option<String>,
    /// Section the source line was assigned to.
    pub section: Section,
    /// Verbatim source line, trimmed.
    pub text: String,
    /// Quantitative when a value was parsed, qualitative otherwise.
    #[serde(rename = "type")]
    pub insight_type: InsightType,
}

// --- Extraction ---

/// Scans one section's content for metric mentions.
///
/// Each line contributes at most one record: the first vocabulary keyword
/// found in it (case-insensitive substring match), classified quantitative
/// when the value pattern matches anywhere in the line and qualitative
/// otherwise. Repeated mentions across lines each produce their own
/// record; nothing is deduplicated or numerically normalized.
pub fn extract(content: &str, section: Section) -> Vec<InsightRecord> {
    let mut records = Vec::new();

    for line in content.split('\n') {
        let lowered = line.to_lowercase();
        let metric = match METRICS.iter().copied().find(|m| lowered.contains(*m)) {
            Some(metric) => metric,
            None => continue,
        };

        // The pattern runs over the original line so the stored value
        // keeps its verbatim casing.
        let value = VALUE_PATTERN.find(line).map(|m| m.as_str().to_string());
        let insight_type = if value.is_some() {
            InsightType::Quantitative
        } else {
            InsightType::Qualitative
        };
        tracing::trace!(
            "Matched metric '{}' in section {}: value {:?}",
            metric,
            section,
            value
        );

        records.push(InsightRecord {
            metric: metric.to_string(),
            value,
            section,
            text: line.trim().to_string(),
            insight_type,
        });
    }

    records
}
