use crate::model::{
    ConfigSelection, Dataset, Dimension, DimensionCheck, EvaluationResult, FULL_SCALE_SIZE,
    MeasurementRecord, Verdict,
};
use crate::util::format_thousands;

use super::document::{Document, Table};

pub(super) const REPORT_TITLE: &str = "Retrieval Benchmark Analysis Report";
const BASELINE_BREADTH: u32 = 32;
const HIGH_QUALITY_BREADTH: u32 = 128;

const TUNING_ADVICE: [&str; 3] = [
    "**For production**: Use ef_search=64 as baseline, tune based on requirements",
    "**Low latency**: ef_search=32 (trade-off: -2-5% recall)",
    "**High quality**: ef_search=128 (trade-off: +20-40% latency)",
];

/// Relative change from the ef_search=32 to the ef_search=128 full-scale run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TuningDelta {
    pub latency_pct: f64,
    pub recall_pct: f64,
}

pub(super) fn render_report(
    dataset: &Dataset,
    evaluation: Option<&EvaluationResult>,
    selections: &[ConfigSelection],
) -> Document {
    let mut document = Document::new();
    document.heading(1, REPORT_TITLE);

    render_summary(&mut document, dataset);
    render_size_sections(&mut document, dataset, evaluation, selections);
    render_full_results(&mut document, dataset);
    render_tuning(&mut document, dataset);

    document.rule();
    document.paragraph("*Report generated by benchgate*");
    document
}

fn render_summary(document: &mut Document, dataset: &Dataset) {
    let breadths = dataset
        .search_breadths()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<String>>();

    document.heading(2, "Executive Summary");
    document.bullets(vec![
        format!("**Total tests run**: {}", dataset.len()),
        format!(
            "**Benchmark sizes**: {}",
            dataset.size_categories().join(", ")
        ),
        format!("**ef_search values tested**: {}", breadths.join(", ")),
    ]);
}

fn render_size_sections(
    document: &mut Document,
    dataset: &Dataset,
    evaluation: Option<&EvaluationResult>,
    selections: &[ConfigSelection],
) {
    document.heading(2, "Go/No-Go Analysis");

    for size in dataset.size_categories() {
        document.heading(3, format!("{} Benchmark", size.to_uppercase()));

        if let Some(evaluation) = evaluation.filter(|_| size == FULL_SCALE_SIZE) {
            render_verdict(document, evaluation);
        }

        if let Some(selection) = selections
            .iter()
            .find(|selection| selection.size_category == size)
        {
            render_recommendations(document, selection);
        }
    }
}

fn render_verdict(document: &mut Document, evaluation: &EvaluationResult) {
    let status = match evaluation.verdict {
        Verdict::Go => "✅ GO",
        Verdict::NoGo => "❌ NO-GO",
    };
    document.paragraph(format!("**Status**: {status}"));

    let mut table = Table::new(["Metric", "Value", "Threshold", "Status"]);
    for dimension in Dimension::ALL {
        if let Some(check) = evaluation.check(dimension) {
            table.push_row(vec![
                dimension.label().to_string(),
                format_check_value(check),
                format_check_threshold(check),
                pass_glyph(check.passed).to_string(),
            ]);
        }
    }
    document.table(table);
}

fn format_check_value(check: &DimensionCheck) -> String {
    match check.dimension {
        Dimension::Throughput => format!("{:.0} chunks/min", check.actual),
        Dimension::P95Latency => format!("{:.1}ms", check.actual),
        Dimension::Recall => format!("{:.3}", check.actual),
        Dimension::Disk => format!("{:.2}GB", check.actual),
    }
}

fn format_check_threshold(check: &DimensionCheck) -> String {
    let unit = match check.dimension {
        Dimension::P95Latency => "ms",
        Dimension::Disk => "GB",
        Dimension::Throughput | Dimension::Recall => "",
    };
    format!(
        "{}{}{unit}",
        check.bound.comparison.symbol(),
        check.bound.limit
    )
}

fn pass_glyph(passed: bool) -> &'static str {
    if passed { "✅" } else { "❌" }
}

fn render_recommendations(document: &mut Document, selection: &ConfigSelection) {
    document.heading(4, "Recommended Configurations");

    let mut table = Table::new([
        "Objective",
        "ef_search",
        "P95 Latency",
        "Recall@10",
        "Throughput",
    ]);
    let picks = [
        ("**Lowest Latency**", &selection.lowest_latency),
        ("**Best Recall**", &selection.best_recall),
        ("**Best Throughput**", &selection.best_throughput),
    ];
    for (objective, record) in picks {
        table.push_row(vec![
            objective.to_string(),
            record.search_breadth.to_string(),
            format!("{:.1}ms", record.p95_latency_ms),
            format!("{:.3}", record.recall_at_10),
            format!("{:.0}", record.throughput_per_minute),
        ]);
    }
    document.table(table);
}

fn render_full_results(document: &mut Document, dataset: &Dataset) {
    document.heading(2, "Complete Results");

    let mut table = Table::new([
        "Size",
        "Chunks",
        "ef_search",
        "Indexing (min)",
        "Throughput",
        "RAM (GB)",
        "Disk (GB)",
        "P95 Latency (ms)",
        "Recall@10",
    ]);
    for record in dataset.records() {
        table.push_row(vec![
            record.size_category.clone(),
            format_thousands(record.chunk_count),
            record.search_breadth.to_string(),
            format!("{:.1}", record.indexing_time_minutes),
            format!("{:.0}", record.throughput_per_minute),
            format!("{:.1}", record.ram_peak_gb),
            format!("{:.2}", record.disk_usage_gb),
            format!("{:.1}", record.p95_latency_ms),
            format!("{:.3}", record.recall_at_10),
        ]);
    }
    document.table(table);
}

fn render_tuning(document: &mut Document, dataset: &Dataset) {
    document.heading(2, "Tuning Recommendations");

    let mut items = Vec::with_capacity(TUNING_ADVICE.len() + 1);
    if let Some(delta) = tuning_delta(dataset) {
        items.push(format!(
            "**ef_search={BASELINE_BREADTH} vs {HIGH_QUALITY_BREADTH}**: {:+.1}% latency, {:+.1}% recall",
            delta.latency_pct, delta.recall_pct
        ));
    }
    items.extend(TUNING_ADVICE.iter().map(|line| line.to_string()));
    document.bullets(items);
}

pub(super) fn tuning_delta(dataset: &Dataset) -> Option<TuningDelta> {
    let baseline = first_full_scale_with_breadth(dataset, BASELINE_BREADTH)?;
    let high_quality = first_full_scale_with_breadth(dataset, HIGH_QUALITY_BREADTH)?;

    Some(TuningDelta {
        latency_pct: relative_change_pct(baseline.p95_latency_ms, high_quality.p95_latency_ms)?,
        recall_pct: relative_change_pct(baseline.recall_at_10, high_quality.recall_at_10)?,
    })
}

fn first_full_scale_with_breadth(dataset: &Dataset, breadth: u32) -> Option<&MeasurementRecord> {
    dataset
        .in_size(FULL_SCALE_SIZE)
        .find(|record| record.search_breadth == breadth)
}

fn relative_change_pct(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}
