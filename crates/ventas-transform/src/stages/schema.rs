use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;
use ventas_model::{CleaningRules, StageKind};

use crate::normalization::normalize_column_names;
use crate::stage::{Stage, StageOutput};

/// Canonicalizes the header row.
pub struct SchemaNormalizer;

impl Stage for SchemaNormalizer {
    fn kind(&self) -> StageKind {
        StageKind::SchemaNormalizer
    }

    fn apply(&self, frame: DataFrame, _rules: &CleaningRules) -> PolarsResult<StageOutput> {
        let mut frame = frame;
        let original: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let canonical = normalize_column_names(&original);
        let renamed = original
            .iter()
            .zip(&canonical)
            .filter(|(before, after)| before != after)
            .count();
        frame.set_column_names(canonical.iter().map(String::as_str))?;
        debug!(columns = ?canonical, "canonical column names");
        Ok(StageOutput::new(frame).with_values_changed(renamed))
    }
}
