use std::cmp::Ordering;

use crate::model::MeasurementRecord;

/// First record with the largest metric value; later equal values never replace it.
pub(super) fn first_max_by<'a, I, F>(records: I, metric: F) -> Option<&'a MeasurementRecord>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
    F: Fn(&MeasurementRecord) -> f64,
{
    first_extremal_by(records, metric, Ordering::Greater)
}

/// First record with the smallest metric value; later equal values never replace it.
pub(super) fn first_min_by<'a, I, F>(records: I, metric: F) -> Option<&'a MeasurementRecord>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
    F: Fn(&MeasurementRecord) -> f64,
{
    first_extremal_by(records, metric, Ordering::Less)
}

fn first_extremal_by<'a, I, F>(
    records: I,
    metric: F,
    better: Ordering,
) -> Option<&'a MeasurementRecord>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
    F: Fn(&MeasurementRecord) -> f64,
{
    let mut best: Option<(&MeasurementRecord, f64)> = None;
    for record in records {
        let value = metric(record);
        let replace = match best {
            None => true,
            Some((_, current)) => value.partial_cmp(&current) == Some(better),
        };
        if replace {
            best = Some((record, value));
        }
    }
    best.map(|(record, _)| record)
}
