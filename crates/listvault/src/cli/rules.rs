use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use listvault::DEFAULT_OUTPUT_DIR;
use listvault_rules::{export_rules, scan_dir};

#[derive(Debug, Clone, clap::Args)]
pub struct RulesArg {
    /// Directory written by a previous sync
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub lists_dir: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl RulesArg {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        let sources = scan_dir(&self.lists_dir)?;

        let out: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let summary = export_rules(&sources, out)?;
        tracing::info!(sources = summary.sources, rules = summary.rules, "exported rules");
        Ok(ExitCode::SUCCESS)
    }
}
