// src/utils/text_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::extractors::SectionMap;
use crate::utils::error::AppError;

/// Writes a plain-text report of how the segmenter bucketed a document.
///
/// For each section, in bucket-creation order, the report shows a heading
/// with the line count followed by every line prefixed with its section
/// tag. Useful for diagnosing why a line landed in an unexpected bucket
/// (a header keyword hiding mid-sentence, page furniture, and so on).
pub fn save_section_report(sections: &SectionMap, filename: &Path) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    writeln!(file, "Section report: {} section(s)", sections.len())?;
    for (section, content) in sections {
        let line_count = content.split('\n').count();
        writeln!(file)?;
        writeln!(file, "==== {} ({} lines) ====", section, line_count)?;
        for line in content.split('\n') {
            writeln!(file, "[{}] {}", section, line)?;
        }
    }

    tracing::info!("Saved section report to {}", filename.display());
    Ok(())
}
