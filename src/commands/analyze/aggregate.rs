use crate::model::Dataset;

use super::loader::LoadedSource;

/// Concatenates loaded sources in order. No deduplication, no reordering.
pub(super) fn merge_sources(sources: &[LoadedSource]) -> Dataset {
    let records = sources
        .iter()
        .flat_map(|source| source.records.iter().cloned())
        .collect();
    Dataset::new(records)
}
