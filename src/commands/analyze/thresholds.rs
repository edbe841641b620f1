use crate::model::{
    Dataset, Dimension, DimensionCheck, EvaluationResult, FULL_SCALE_SIZE, ThresholdSet, Verdict,
};

use super::extremal::first_max_by;

/// Go/no-go for the full-scale category.
///
/// Only the highest-recall full-scale record is judged, the first one in dataset
/// order when several share the maximum. Returns `None` when the dataset has no
/// full-scale records.
pub(super) fn evaluate_full_scale(
    dataset: &Dataset,
    thresholds: &ThresholdSet,
) -> Option<EvaluationResult> {
    let representative = first_max_by(dataset.in_size(FULL_SCALE_SIZE), |record| {
        record.recall_at_10
    })?;

    let checks = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let bound = thresholds.bound_for(dimension);
            let actual = dimension.value_of(representative);
            DimensionCheck {
                dimension,
                actual,
                bound,
                passed: bound.admits(actual),
            }
        })
        .collect::<Vec<DimensionCheck>>();

    let verdict = if checks.iter().all(|check| check.passed) {
        Verdict::Go
    } else {
        Verdict::NoGo
    };

    Some(EvaluationResult {
        size_category: FULL_SCALE_SIZE.to_string(),
        representative: representative.clone(),
        checks,
        verdict,
    })
}
