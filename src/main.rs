// src/main.rs
mod document;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use extractors::InsightType;
use storage::StorageManager;
use utils::AppError;

/// Which insight records to list individually in the run log. The stored
/// JSON always contains the complete result.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum InsightFilter {
    All,
    Quantitative,
    Qualitative,
}

impl InsightFilter {
    fn keeps(self, insight_type: InsightType) -> bool {
        match self {
            InsightFilter::All => true,
            InsightFilter::Quantitative => insight_type == InsightType::Quantitative,
            InsightFilter::Qualitative => insight_type == InsightType::Qualitative,
        }
    }
}

/// Command Line Interface for the Financial Insight Extraction Pipeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the financial PDF (Annual Report / 10-K)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for extracted insights
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Only list insights of this type in the run log
    #[arg(long, value_enum, default_value_t = InsightFilter::All)]
    insight_type: InsightFilter,

    /// Debug mode - save extracted text and section report
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Only PDF input is supported
    let is_pdf = args
        .input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(AppError::Config(format!(
            "Input must be a PDF file: {}",
            args.input.display()
        )));
    }
    let doc_stem = args
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            AppError::Config(format!(
                "Cannot derive a document name from {}",
                args.input.display()
            ))
        })?;

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Read the document
    let data = fs::read(&args.input)?;
    tracing::info!("Read {} bytes from {}", data.len(), args.input.display());

    // 6. Debug mode - save the raw extracted text and a section report
    if args.debug {
        let debug_dir = storage.document_dir(&doc_stem).join("debug");
        fs::create_dir_all(&debug_dir)?;

        match document::extract_text(&data) {
            Ok(text) => {
                let text_path = debug_dir.join("extracted_text.txt");
                fs::write(&text_path, &text)?;
                tracing::info!("Saved extracted text to: {}", text_path.display());

                let sections = extractors::section::segment(&text);
                let report_path = debug_dir.join("section_report.txt");
                if let Err(e) = utils::text_debug::save_section_report(&sections, &report_path) {
                    tracing::warn!("Failed to create section report: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping debug artifacts, text extraction failed: {}", e);
            }
        }
    }

    // 7. Run the pipeline once on the document
    tracing::info!("Analyzing document: {}", args.input.display());
    match pipeline::run(&data) {
        Ok(result) => {
            let total = result.metrics.len();
            let quantitative = result.count_by_type(InsightType::Quantitative);
            let qualitative = result.count_by_type(InsightType::Qualitative);
            tracing::info!(
                "Extraction completed: {} insight(s) ({} quantitative, {} qualitative)",
                total,
                quantitative,
                qualitative
            );

            for record in result
                .metrics
                .iter()
                .filter(|r| args.insight_type.keeps(r.insight_type))
            {
                tracing::info!(
                    "[{}] {} = {} ({}): {}",
                    record.section,
                    record.metric,
                    record.value.as_deref().unwrap_or("-"),
                    record.insight_type,
                    record.text
                );
            }

            // 8. Save the full result and its metadata
            let insights_path = storage.save_insights(&doc_stem, &result)?;
            tracing::info!("Saved insights to: {}", insights_path.display());

            let meta_path = storage.save_metadata(&doc_stem, &result, &args.input)?;
            tracing::info!("Saved metadata to: {}", meta_path.display());

            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to extract insights: {}", e);

            if args.debug {
                // Save failure information for debugging (the debug
                // directory already exists at this point)
                let debug_dir = storage.document_dir(&doc_stem).join("debug");
                let failure_info_path = debug_dir.join("extraction_failure.txt");
                let failure_info = format!(
                    "Failed to extract insights from {}: {}\n",
                    args.input.display(),
                    e
                );
                if let Err(write_err) = fs::write(&failure_info_path, failure_info) {
                    tracing::error!("Failed to save failure info: {}", write_err);
                }
            }

            Err(e.into())
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_keeps_both_types() {
        assert!(InsightFilter::All.keeps(InsightType::Quantitative));
        assert!(InsightFilter::All.keeps(InsightType::Qualitative));
    }

    #[test]
    fn type_filters_keep_only_their_own_kind() {
        assert!(InsightFilter::Quantitative.keeps(InsightType::Quantitative));
        assert!(!InsightFilter::Quantitative.keeps(InsightType::Qualitative));
        assert!(InsightFilter::Qualitative.keeps(InsightType::Qualitative));
        assert!(!InsightFilter::Qualitative.keeps(InsightType::Quantitative));
    }
}
