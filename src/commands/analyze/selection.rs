use crate::model::{ConfigSelection, Dataset, MeasurementRecord};

use super::extremal::{first_max_by, first_min_by};

/// Per size category (first-seen order), the lowest-latency, highest-recall and
/// highest-throughput records. Ties keep the earliest record.
pub(super) fn select_configurations(dataset: &Dataset) -> Vec<ConfigSelection> {
    dataset
        .size_categories()
        .into_iter()
        .filter_map(|size| select_for_size(dataset, size))
        .collect()
}

fn select_for_size(dataset: &Dataset, size: &str) -> Option<ConfigSelection> {
    let group = dataset.in_size(size).collect::<Vec<&MeasurementRecord>>();

    let lowest_latency = first_min_by(group.iter().copied(), |record| record.p95_latency_ms)?;
    let best_recall = first_max_by(group.iter().copied(), |record| record.recall_at_10)?;
    let best_throughput = first_max_by(group.iter().copied(), |record| {
        record.throughput_per_minute
    })?;

    Some(ConfigSelection {
        size_category: size.to_string(),
        lowest_latency: lowest_latency.clone(),
        best_recall: best_recall.clone(),
        best_throughput: best_throughput.clone(),
    })
}
