// src/extractors/mod.rs
pub mod metrics;
pub mod section;

// Re-export key extraction types for convenience
pub use metrics::{InsightRecord, InsightType};
pub use section::{Section, SectionMap};
