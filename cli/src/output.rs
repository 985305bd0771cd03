//! Plain-text rendering and JSON output.

use std::fmt::Write as _;
use std::io::Write;

use model_info::ModelInfo;
use serde::Serialize;

use crate::commands::{CostReport, ProviderRow};
use crate::CliError;

/// Writes `value` as JSON to `out`. When pretty is true, multi-line; else one line.
pub fn write_json_output<T, W>(value: &T, out: &mut W, pretty: bool) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", s)?;
    out.flush()?;
    Ok(())
}

pub fn render_providers(rows: &[ProviderRow]) -> String {
    let width = rows
        .iter()
        .map(|r| r.provider.as_str().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            row.provider.as_str(),
            row.adapter.as_deref().unwrap_or("-"),
            width = width
        );
    }
    out
}

pub fn render_models(models: &[String]) -> String {
    let mut out = String::new();
    for name in models {
        let _ = writeln!(out, "{}", name);
    }
    out
}

fn tokens(limit: Option<u64>) -> String {
    limit.map_or_else(|| "unknown".to_string(), |n| n.to_string())
}

pub fn render_info(info: &ModelInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:           {}", info.name);
    let _ = writeln!(out, "provider:       {}", info.provider);
    let _ = writeln!(out, "type:           {}", info.model_type);
    let _ = writeln!(out, "max input:      {}", tokens(info.max_input_tokens));
    let _ = writeln!(out, "max output:     {}", tokens(info.max_output_tokens));
    let _ = writeln!(out, "input $/token:  {}", info.input_cost_per_token);
    let _ = writeln!(out, "output $/token: {}", info.output_cost_per_token);
    let features: Vec<&str> = info.features.iter().map(|f| f.as_str()).collect();
    let _ = writeln!(
        out,
        "features:       {}",
        if features.is_empty() {
            "-".to_string()
        } else {
            features.join(", ")
        }
    );
    if info.is_deprecated {
        let _ = writeln!(out, "deprecated:     yes");
    }
    for (key, value) in &info.metadata {
        let _ = writeln!(out, "  {}: {}", key, value);
    }
    out
}

pub fn render_cost(report: &CostReport) -> String {
    format!(
        "{}/{}\n  input:  {} tokens  ${:.6}\n  output: {} tokens  ${:.6}\n  total:  ${:.6}\n",
        report.provider,
        report.model,
        report.input_tokens,
        report.input_cost,
        report.output_tokens,
        report.output_cost,
        report.total_cost
    )
}
