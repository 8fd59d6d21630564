use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cli::rules::RulesArg;
use crate::cli::sync::SyncArg;
use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "listvault", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    #[command(flatten)]
    pub sync: SyncArg,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "rules", about = "Export stored rules as JSON Lines")]
    Rules(RulesArg),
}

impl App {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.cmd {
            None => self.sync.run().await,
            Some(Commands::Rules(arg)) => arg.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use listvault::{DEFAULT_CATALOG_URL, DEFAULT_OUTPUT_DIR};

    #[test]
    fn test_defaults_run_sync() {
        let app = App::try_parse_from(["listvault"]).unwrap();
        assert!(app.cmd.is_none());
        assert_eq!(app.sync.catalog, DEFAULT_CATALOG_URL);
        assert_eq!(app.sync.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(app.log_format, LogFormat::Text);
    }

    #[test]
    fn test_sync_flags() {
        let app = App::try_parse_from([
            "listvault",
            "--catalog",
            "https://catalog.example/c.json",
            "--output-dir",
            "/tmp/out",
            "--trusted-origin",
            "https://a.example/",
            "--trusted-origin",
            "https://b.example/",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(app.sync.catalog, "https://catalog.example/c.json");
        assert_eq!(app.sync.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(app.sync.trusted_origins, ["https://a.example/", "https://b.example/"]);
        assert_eq!(app.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rules_subcommand() {
        let app = App::try_parse_from(["listvault", "rules", "--lists-dir", "out", "-o", "rules.jsonl"]).unwrap();
        let Some(Commands::Rules(arg)) = app.cmd else {
            panic!("expected rules subcommand");
        };
        assert_eq!(arg.lists_dir, PathBuf::from("out"));
        assert_eq!(arg.output, Some(PathBuf::from("rules.jsonl")));
    }
}
