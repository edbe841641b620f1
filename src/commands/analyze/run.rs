use anyhow::Result;
use tracing::{info, warn};

use crate::cli::AnalyzeArgs;
use crate::model::{
    AnalysisRunManifest, ConfigSelection, Dataset, EvaluationResult, SourceEntry, ThresholdSet,
};
use crate::util::{now_utc_string, write_json_pretty, write_text};

use super::aggregate::merge_sources;
use super::document::Document;
use super::loader::{LoadReport, discover_sources, load_sources};
use super::report::render_report;
use super::selection::select_configurations;
use super::thresholds::evaluate_full_scale;

const MANIFEST_VERSION: u32 = 1;

#[derive(Debug)]
pub(super) struct Analysis {
    pub load: LoadReport,
    pub dataset: Dataset,
    pub evaluation: Option<EvaluationResult>,
    pub selections: Vec<ConfigSelection>,
    pub document: Document,
}

#[derive(Debug)]
pub(super) enum AnalysisOutcome {
    NoSourcesFound,
    NoUsableRecords(LoadReport),
    Completed(Box<Analysis>),
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!(pattern = %args.pattern, "benchmark analysis requested");

    let analysis = match analyze(&args.pattern, &ThresholdSet::production())? {
        AnalysisOutcome::NoSourcesFound => {
            warn!(
                pattern = %args.pattern,
                "no data: no benchmark files match the pattern, report not written"
            );
            return Ok(());
        }
        AnalysisOutcome::NoUsableRecords(load) => {
            warn!(
                source_count = load.source_count(),
                failed_sources = load.failed.len(),
                "no usable benchmark records after parsing, report not written"
            );
            return Ok(());
        }
        AnalysisOutcome::Completed(analysis) => analysis,
    };

    log_summary(&analysis);

    if args.dry_run {
        info!(
            records = analysis.dataset.len(),
            "dry-run complete, report and manifest not written"
        );
        return Ok(());
    }

    write_text(&args.output, &analysis.document.to_markdown())?;
    info!(path = %args.output.display(), "wrote benchmark report");

    let manifest = build_manifest(&args, &analysis);
    write_json_pretty(&args.manifest_path, &manifest)?;
    info!(path = %args.manifest_path.display(), "wrote analysis manifest");

    Ok(())
}

/// Runs discovery, loading, merging, evaluation, selection and rendering.
pub(super) fn analyze(pattern: &str, thresholds: &ThresholdSet) -> Result<AnalysisOutcome> {
    let paths = discover_sources(pattern)?;
    if paths.is_empty() {
        return Ok(AnalysisOutcome::NoSourcesFound);
    }
    info!(source_count = paths.len(), "found benchmark files to analyze");

    let load = load_sources(&paths);
    let dataset = merge_sources(&load.loaded);
    if dataset.is_empty() {
        return Ok(AnalysisOutcome::NoUsableRecords(load));
    }
    info!(
        records = dataset.len(),
        loaded_sources = load.loaded.len(),
        failed_sources = load.failed.len(),
        "merged benchmark records"
    );

    let evaluation = evaluate_full_scale(&dataset, thresholds);
    if evaluation.is_none() {
        info!("no full-scale records, go/no-go evaluation skipped");
    }
    let selections = select_configurations(&dataset);
    let document = render_report(&dataset, evaluation.as_ref(), &selections);

    Ok(AnalysisOutcome::Completed(Box::new(Analysis {
        load,
        dataset,
        evaluation,
        selections,
        document,
    })))
}

fn log_summary(analysis: &Analysis) {
    for selection in &analysis.selections {
        let best = &selection.best_recall;
        info!(
            size = %selection.size_category,
            ef_search = best.search_breadth,
            p95_latency_ms = best.p95_latency_ms,
            recall_at_10 = best.recall_at_10,
            "best recall configuration"
        );
    }

    match &analysis.evaluation {
        Some(evaluation) => info!(
            verdict = evaluation.verdict.as_str(),
            ef_search = evaluation.representative.search_breadth,
            "full-scale go/no-go"
        ),
        None => info!("full-scale go/no-go not evaluated"),
    }
}

fn build_manifest(args: &AnalyzeArgs, analysis: &Analysis) -> AnalysisRunManifest {
    let load = &analysis.load;
    let mut sources = Vec::with_capacity(load.source_count());
    let mut warnings = Vec::new();

    for source in &load.loaded {
        for issue in &source.skipped_rows {
            warnings.push(format!(
                "{}: skipped line {}: {}",
                source.origin, issue.line, issue.reason
            ));
        }
        sources.push(SourceEntry {
            path: source.path.display().to_string(),
            origin: source.origin.clone(),
            status: "loaded".to_string(),
            sha256: Some(source.sha256.clone()),
            rows_loaded: source.records.len(),
            rows_skipped: source.skipped_rows.len(),
            failure_reason: None,
        });
    }

    for source in &load.failed {
        warnings.push(format!("{}: {}", source.origin, source.reason));
        sources.push(SourceEntry {
            path: source.path.display().to_string(),
            origin: source.origin.clone(),
            status: "failed".to_string(),
            sha256: None,
            rows_loaded: 0,
            rows_skipped: 0,
            failure_reason: Some(source.reason.clone()),
        });
    }
    sources.sort_by(|a, b| a.path.cmp(&b.path));

    AnalysisRunManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        pattern: args.pattern.clone(),
        report_path: args.output.display().to_string(),
        source_count: load.source_count(),
        loaded_source_count: load.loaded.len(),
        record_count: analysis.dataset.len(),
        size_categories: analysis
            .dataset
            .size_categories()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect(),
        verdict: analysis.evaluation.as_ref().map(|evaluation| evaluation.verdict),
        sources,
        warnings,
    }
}
