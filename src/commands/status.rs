use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::AnalysisRunManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    info!(manifest_path = %args.manifest_path.display(), "status requested");

    let Some(manifest) = load_manifest(&args.manifest_path)? else {
        warn!(path = %args.manifest_path.display(), "analysis manifest missing");
        return Ok(());
    };

    info!(
        generated_at = %manifest.generated_at,
        pattern = %manifest.pattern,
        report_path = %manifest.report_path,
        sources = manifest.source_count,
        loaded_sources = manifest.loaded_source_count,
        records = manifest.record_count,
        sizes = %manifest.size_categories.join(","),
        verdict = %manifest.verdict.map(|verdict| verdict.as_str()).unwrap_or("not evaluated"),
        "loaded analysis manifest"
    );

    for source in &manifest.sources {
        info!(
            origin = %source.origin,
            status = %source.status,
            rows_loaded = source.rows_loaded,
            rows_skipped = source.rows_skipped,
            failure_reason = %source.failure_reason.as_deref().unwrap_or_default(),
            "source"
        );
    }

    for warning in &manifest.warnings {
        warn!(warning = %warning, "recorded warning");
    }

    Ok(())
}

fn load_manifest(path: &Path) -> Result<Option<AnalysisRunManifest>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let manifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(manifest))
}

#[cfg(test)]
mod tests {
    use super::load_manifest;
    use crate::model::{AnalysisRunManifest, SourceEntry, Verdict};
    use crate::util::write_json_pretty;

    #[test]
    fn load_manifest_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let loaded = load_manifest(&dir.path().join("absent.json")).expect("missing is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_manifest_reads_back_written_manifest() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join("manifest.json");
        let manifest = AnalysisRunManifest {
            manifest_version: 1,
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            pattern: "benchmark_results/*.csv".to_string(),
            report_path: "benchmark_analysis_report.md".to_string(),
            source_count: 1,
            loaded_source_count: 1,
            record_count: 3,
            size_categories: vec!["full".to_string()],
            verdict: Some(Verdict::NoGo),
            sources: vec![SourceEntry {
                path: "benchmark_results/full.csv".to_string(),
                origin: "full.csv".to_string(),
                status: "loaded".to_string(),
                sha256: Some("abc".to_string()),
                rows_loaded: 3,
                rows_skipped: 0,
                failure_reason: None,
            }],
            warnings: Vec::new(),
        };
        write_json_pretty(&path, &manifest).expect("write manifest");

        let raw = std::fs::read_to_string(&path).expect("read manifest");
        assert!(raw.contains("\"verdict\": \"NO-GO\""), "unexpected json: {raw}");

        let loaded = load_manifest(&path)
            .expect("manifest should parse")
            .expect("manifest should exist");
        assert_eq!(loaded.record_count, 3);
        assert_eq!(loaded.verdict, Some(Verdict::NoGo));
        assert_eq!(loaded.sources[0].origin, "full.csv");
    }
}
