// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report rendering (table or JSON).

use std::io::Write;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use findprod_core::{RunReport, TrialKind};

use crate::config::OutputFormat;

fn label(kind: TrialKind) -> String {
    match kind {
        TrialKind::Sequential => "sequential".to_owned(),
        TrialKind::Threaded(s) => format!("threaded, {}", s.describe()),
    }
}

fn table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "trial",
            "strategy",
            "elapsed (ms)",
            "product",
            "zero found",
            "cancelled",
        ]);

    for trial in &report.trials {
        let (zero, cancelled) = trial.coordination.map_or_else(
            || ("-".to_owned(), "-".to_owned()),
            |c| (c.found_zero.to_string(), c.cancelled.to_string()),
        );
        table.add_row(vec![
            Cell::new(label(trial.kind)),
            Cell::new(trial.kind),
            Cell::new(trial.elapsed_ms()),
            Cell::new(trial.product),
            Cell::new(zero),
            Cell::new(cancelled),
        ]);
    }
    table
}

/// Writes `report` to `out` in `format`.
pub fn render(out: &mut impl Write, report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let cfg = &report.config;
            writeln!(
                out,
                "{} elements, {} workers, zero at {}",
                cfg.array_size,
                cfg.thread_count,
                cfg.zero_index
                    .map_or_else(|| "none".to_owned(), |i| i.to_string()),
            )?;
            writeln!(out, "{}", table(report))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use findprod_core::{run, RunConfig, Strategy};

    #[test]
    fn text_lists_every_trial() {
        let report = run(&RunConfig::new(10, 2), &Strategy::ALL).unwrap();
        let mut buf = Vec::new();
        render(&mut buf, &report, OutputFormat::Text).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("10 elements, 2 workers, zero at none"));
        for name in ["sequential", "join", "poll", "counted"] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn json_is_parseable() {
        let report = run(&RunConfig::new(12, 3), &[Strategy::Poll]).unwrap();
        let mut buf = Vec::new();
        render(&mut buf, &report, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["trials"].as_array().unwrap().len(), 2);
        assert_eq!(v["segments"].as_array().unwrap().len(), 3);
    }
}
