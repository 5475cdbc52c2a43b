use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use totem::AnalysisReport;

pub const RESULT_FILE: &str = "result.json";
pub const CONTEXT_FILE: &str = "interpretation_context.json";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Serialize)]
struct SummaryEntry<'a> {
    rank: usize,
    animal: &'a str,
    total: f64,
    overall_strength: f64,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    generated_at: DateTime<Utc>,
    top: Vec<SummaryEntry<'a>>,
}

fn summary(report: &AnalysisReport) -> Summary<'_> {
    let top = report
        .top()
        .iter()
        .zip(report.strength.rows.iter())
        .enumerate()
        .map(|(i, (ranked, strength))| SummaryEntry {
            rank: i + 1,
            animal: &ranked.animal,
            total: ranked.total.to_f64(),
            overall_strength: strength.overall_adjusted,
        })
        .collect();
    Summary {
        generated_at: Utc::now(),
        top,
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the combined result, the interpretation context and a short
/// summary. Returns the paths written.
pub fn write_outputs(out_dir: &Path, report: &AnalysisReport) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create out dir {}", out_dir.display()))?;

    let mut written = Vec::new();

    let result = out_dir.join(RESULT_FILE);
    write_json(&result, report)?;
    written.push(result);

    if let Some(context) = report.interpretation_context() {
        let path = out_dir.join(CONTEXT_FILE);
        write_json(&path, &context)?;
        written.push(path);
    }

    let path = out_dir.join(SUMMARY_FILE);
    write_json(&path, &summary(report))?;
    written.push(path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use totem::{AffinityRow, AffinityTable, Analyzer, ChartPositions, ScoringTables, Sign, WeightTable};

    fn report() -> AnalysisReport {
        let affinity = AffinityTable::new(vec![
            AffinityRow::uniform("Heron", 30),
            AffinityRow::uniform("Otter", 70),
            AffinityRow::uniform("Lynx", 50),
        ])
        .unwrap();
        let tables = ScoringTables::new(affinity, WeightTable::default(), None);
        Analyzer::new(Arc::new(tables))
            .analyze(&ChartPositions::uniform(Sign::Gemini))
            .unwrap()
    }

    #[test]
    fn test_write_outputs() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("nested/out");
        let written = write_outputs(&out, &report())?;
        assert_eq!(written.len(), 3);

        let result: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join(RESULT_FILE))?)?;
        assert_eq!(result["animal_totals"][0]["ANIMAL"], "Otter");

        let context: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join(CONTEXT_FILE))?)?;
        assert_eq!(context["animal"], "Otter");
        assert_eq!(context["salient"].as_array().map(Vec::len), Some(6));

        let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE))?)?;
        assert_eq!(summary["top"][2]["animal"], "Heron");
        assert!(summary["generated_at"].is_string());
        Ok(())
    }
}
