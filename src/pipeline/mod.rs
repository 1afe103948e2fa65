// src/pipeline/mod.rs
use serde::{Deserialize, Serialize};

use crate::document;
use crate::extractors::{metrics, section, InsightRecord, InsightType};
use crate::utils::error::DocumentError;

/// Company label attached to every pipeline result. Fixed for now; the
/// label is never inferred from document content.
pub const COMPANY_LABEL: &str = "APPLE";

/// Full output of one pipeline invocation: the company label plus every
/// insight record in document scan order (sections in first-seen order,
/// lines in document order within each section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub company: String,
    pub metrics: Vec<InsightRecord>,
}

impl PipelineResult {
    /// Number of records carrying the given classification.
    pub fn count_by_type(&self, insight_type: InsightType) -> usize {
        self.metrics
            .iter()
            .filter(|r| r.insight_type == insight_type)
            .count()
    }
}

/// Runs the full extraction pipeline on a PDF byte stream.
///
/// Text extraction feeds section segmentation; each section's content is
/// scanned for metric mentions; all records are concatenated in section
/// order. The only failure mode is a document the PDF library cannot
/// read; a readable document with no extractable text yields an empty
/// metrics list.
pub fn run(data: &[u8]) -> Result<PipelineResult, DocumentError> {
    let text = document::extract_text(data)?;
    Ok(analyze(&text))
}

/// Pure text stages of the pipeline: segmentation plus per-section metric
/// extraction. Deterministic for a given input string.
fn analyze(text: &str) -> PipelineResult {
    let sections = section::segment(text);

    let mut records = Vec::new();
    for (sec, content) in &sections {
        records.extend(metrics::extract(content, *sec));
    }

    tracing::info!(
        "Pipeline produced {} insight record(s) across {} section(s)",
        records.len(),
        sections.len()
    );

    PipelineResult {
        company: COMPANY_LABEL.to_string(),
        metrics: records,
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::pdf_fixtures;
    use crate::extractors::Section;

    const SAMPLE: &str = "Annual report 2024\n\
        Management discussion and analysis\n\
        Revenue grew to $5 million this year.\n\
        Market risk\n\
        Loss exposure of 2.5 billion remains.\n";

    #[test]
    fn records_follow_section_scan_order() {
        let result = analyze(SAMPLE);
        let sections: Vec<Section> = result.metrics.iter().map(|r| r.section).collect();
        assert_eq!(sections, vec![Section::MdAndA, Section::MarketRisk]);
        assert_eq!(result.metrics[0].metric, "revenue");
        assert_eq!(result.metrics[1].metric, "loss");
    }

    #[test]
    fn every_record_section_is_a_segmenter_bucket() {
        let result = analyze(SAMPLE);
        let sections = section::segment(SAMPLE);
        for record in &result.metrics {
            assert!(sections.iter().any(|(s, _)| *s == record.section));
        }
    }

    #[test]
    fn analyze_is_deterministic() {
        assert_eq!(analyze(SAMPLE), analyze(SAMPLE));
    }

    #[test]
    fn company_label_is_fixed_even_for_empty_text() {
        let result = analyze("");
        assert_eq!(result.company, "APPLE");
        assert!(result.metrics.is_empty());
    }

    #[test]
    fn value_presence_and_type_agree() {
        let result = analyze(SAMPLE);
        for record in &result.metrics {
            assert_eq!(
                record.insight_type == InsightType::Quantitative,
                record.value.is_some()
            );
        }
    }

    #[test]
    fn count_by_type_partitions_the_records() {
        let result = analyze(SAMPLE);
        assert_eq!(
            result.count_by_type(InsightType::Quantitative)
                + result.count_by_type(InsightType::Qualitative),
            result.metrics.len()
        );
        assert_eq!(result.count_by_type(InsightType::Quantitative), 2);
    }

    #[test]
    fn unreadable_pdf_bytes_propagate_a_document_error() {
        assert!(run(b"definitely not a pdf").is_err());
    }

    #[test]
    fn readable_pdf_without_text_is_not_an_error() {
        let data = pdf_fixtures::pdf_with_pages(&["", ""]);
        let result = run(&data).unwrap();
        assert_eq!(result.company, "APPLE");
        assert!(result.metrics.is_empty());
    }

    #[test]
    fn single_page_pdf_flows_through_to_a_record() {
        let data = pdf_fixtures::pdf_with_pages(&["Revenue grew to $5 million this year."]);
        let result = run(&data).unwrap();
        assert_eq!(result.metrics.len(), 1);
        let r = &result.metrics[0];
        assert_eq!(r.metric, "revenue");
        assert_eq!(r.value.as_deref(), Some("$5 million"));
        assert_eq!(r.section, Section::Unknown);
        assert_eq!(r.insight_type, InsightType::Quantitative);
        assert_eq!(r.text, "Revenue grew to $5 million this year.");
    }
}
