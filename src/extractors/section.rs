// src/extractors/section.rs

// --- Imports ---
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Data Structures ---

/// Named document regions recognized by the segmenter.
///
/// `Unknown` is the bucket for every line seen before the first header
/// keyword; the other variants correspond to entries in the header table.
/// Serialized names match the human-readable section titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "MD&A")]
    MdAndA,
    #[serde(rename = "Market Risk")]
    MarketRisk,
    #[serde(rename = "Risk Factors")]
    RiskFactors,
    #[serde(rename = "Financial Statements")]
    FinancialStatements,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Unknown => "Unknown",
            Section::MdAndA => "MD&A",
            Section::MarketRisk => "Market Risk",
            Section::RiskFactors => "Risk Factors",
            Section::FinancialStatements => "Financial Statements",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered section-to-content mapping produced by [`segment`]. Entries
/// appear in the order each section received its first line; content is
/// the newline-join of every line assigned to that section.
pub type SectionMap = Vec<(Section, String)>;

// --- Header Keyword Table ---
// One keyword list per named section, checked in declaration order. The
// first section with a keyword hit on a line wins that line's header
// match; overlapping keywords are allowed and resolved by this order
// alone.
static SECTION_HEADERS: &[(Section, &[&str])] = &[
    (
        Section::MdAndA,
        &["management discussion", "management discussion and analysis"],
    ),
    (Section::MarketRisk, &["market risk"]),
    (Section::RiskFactors, &["risk factors"]),
    (Section::FinancialStatements, &["financial statements"]),
];

// --- Segmentation ---

/// Partitions extracted document text into named sections.
///
/// Scans line by line keeping a current-section cursor that starts at
/// [`Section::Unknown`]. A line containing a header keyword
/// (case-insensitive substring) moves the cursor to that section and is
/// itself attributed to the section it introduces. Every line lands in
/// exactly one bucket; sections that never receive a line do not appear
/// in the result.
pub fn segment(text: &str) -> SectionMap {
    let mut buckets: Vec<(Section, Vec<&str>)> = Vec::new();
    let mut current = Section::Unknown;

    // str::split keeps the empty line after a trailing newline, so the
    // per-page join from text extraction flows through unchanged.
    for line in text.split('\n') {
        if let Some(section) = match_header(line) {
            current = section;
        }
        match buckets.iter().position(|(section, _)| *section == current) {
            Some(idx) => buckets[idx].1.push(line),
            None => buckets.push((current, vec![line])),
        }
    }

    let sections: SectionMap = buckets
        .into_iter()
        .map(|(section, lines)| (section, lines.join("\n")))
        .collect();

    tracing::debug!(
        "Segmented document into {} section(s): {:?}",
        sections.len(),
        sections.iter().map(|(s, _)| s.as_str()).collect::<Vec<_>>()
    );

    sections
}

/// Returns the first section (in table order) with a header keyword
/// appearing in the line, if any.
fn match_header(line: &str) -> Option<Section> {
    let lowered = line.to_lowercase();
    SECTION_HEADERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(section, _)| *section)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headerless_text_lands_in_unknown() {
        let sections = segment("Revenue grew to $5 million this year.\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, Section::Unknown);
        assert_eq!(sections[0].1, "Revenue grew to $5 million this year.\n");
    }

    #[test]
    fn header_line_joins_the_section_it_introduces() {
        let text = "Management discussion and analysis of operations\nProfit outlook remains uncertain.";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, Section::MdAndA);
        assert_eq!(
            sections[0].1,
            "Management discussion and analysis of operations\nProfit outlook remains uncertain."
        );
    }

    #[test]
    fn cursor_moves_at_each_header_and_unknown_leads() {
        let text = "preamble\nRisk factors\nsupply chain\nFinancial statements\nbalance sheet";
        let sections = segment(text);
        let names: Vec<Section> = sections.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            names,
            vec![
                Section::Unknown,
                Section::RiskFactors,
                Section::FinancialStatements
            ]
        );
        assert_eq!(sections[0].1, "preamble");
        assert_eq!(sections[1].1, "Risk factors\nsupply chain");
        assert_eq!(sections[2].1, "Financial statements\nbalance sheet");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let sections = segment("MARKET RISK DISCLOSURES\nrates");
        assert_eq!(sections[0].0, Section::MarketRisk);
    }

    #[test]
    fn unknown_is_dropped_when_document_opens_with_a_header() {
        let sections = segment("Financial statements\ntotals");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, Section::FinancialStatements);
    }

    #[test]
    fn overlapping_keywords_resolve_by_table_order() {
        // "market risk factors" contains keywords of both Market Risk and
        // Risk Factors; Market Risk is declared first and wins.
        let sections = segment("Quantitative market risk factors\ndetails");
        assert_eq!(sections[0].0, Section::MarketRisk);
    }

    #[test]
    fn every_line_appears_in_exactly_one_bucket() {
        let text = "a\nRisk factors\nb\nMarket risk\nc\nd";
        let sections = segment(text);
        let bucketed: usize = sections.iter().map(|(_, c)| c.split('\n').count()).sum();
        assert_eq!(bucketed, text.split('\n').count());
    }

    #[test]
    fn empty_text_yields_one_empty_unknown_bucket() {
        let sections = segment("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, Section::Unknown);
        assert_eq!(sections[0].1, "");
    }

    #[test]
    fn interrupted_section_keeps_a_single_bucket() {
        let text = "Risk factors\none\nMarket risk\ntwo\nRisk factors again\nthree";
        let sections = segment(text);
        let names: Vec<Section> = sections.iter().map(|(s, _)| *s).collect();
        assert_eq!(names, vec![Section::RiskFactors, Section::MarketRisk]);
        assert_eq!(sections[0].1, "Risk factors\none\nRisk factors again\nthree");
        assert_eq!(sections[1].1, "Market risk\ntwo");
    }
}
