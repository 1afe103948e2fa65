// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::InsightType;
use crate::pipeline::PipelineResult;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager rooted at the given base directory,
    /// creating the directory if it doesn't exist
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    /// Directory holding every artifact for one processed document
    pub fn document_dir(&self, doc_stem: &str) -> PathBuf {
        self.base_dir.join(doc_stem)
    }

    /// Saves the full pipeline result as pretty-printed JSON.
    ///
    /// This file is the complete output contract and is never filtered;
    /// a rerun for the same document overwrites it.
    pub fn save_insights(
        &self,
        doc_stem: &str,
        result: &PipelineResult,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.document_dir(doc_stem);

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }

        let file_path = target_dir.join(format!("{}_insights.json", doc_stem));

        let payload = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, payload).map_err(StorageError::IoError)?;

        tracing::info!("Saved insights to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves run metadata (summary counts and provenance) in JSON format
    /// next to the insights file
    pub fn save_metadata(
        &self,
        doc_stem: &str,
        result: &PipelineResult,
        source: &Path,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.document_dir(doc_stem);

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }

        let file_path = target_dir.join(format!("{}_meta.json", doc_stem));

        let metadata = serde_json::json!({
            "company": result.company,
            "source_file": source.file_name().map(|n| n.to_string_lossy().into_owned()),
            "total_insights": result.metrics.len(),
            "quantitative_insights": result.count_by_type(InsightType::Quantitative),
            "qualitative_insights": result.count_by_type(InsightType::Qualitative),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
