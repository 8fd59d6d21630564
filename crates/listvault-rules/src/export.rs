use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::extract::tokenize;
use crate::source::SourceFile;

/// One exported rule row.
#[derive(Debug, Serialize)]
pub struct RuleRecord<'a> {
    pub source: &'a str,
    pub line:   usize,
    pub rule:   &'a str,
    pub tokens: Vec<&'a str>,
}

/// Totals for an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub sources: usize,
    pub rules:   usize,
}

/// Write every rule of every source as JSON Lines.
pub fn export_rules<W: Write>(sources: &[SourceFile], mut out: W) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    for source in sources {
        let rules = source.rules()?;
        for rule in &rules {
            let record = RuleRecord {
                source: &source.name,
                line:   rule.line_number,
                rule:   &rule.text,
                tokens: tokenize(&rule.text),
            };
            serde_json::to_writer(&mut out, &record)?;
            out.write_all(b"\n")?;
        }
        tracing::debug!(source = %source.name, rules = rules.len(), "exported");
        summary.sources += 1;
        summary.rules += rules.len();
    }

    out.flush()?;
    Ok(summary)
}
