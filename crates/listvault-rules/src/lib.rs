//! Reading stored filter lists back as indexable rule rows.
//!
//! Each `*.txt` file in a store directory is one source. Rule lines are the
//! non-blank, non-comment lines, lowercased, with their original line number.

mod error;
mod export;
mod extract;
mod source;

pub use error::{Error, Result};
pub use export::{ExportSummary, RuleRecord, export_rules};
pub use extract::{Rule, SKIPPED_PREFIXES, TOKEN_SEPARATORS, decode_list, extract_rules, tokenize};
pub use source::{SourceFile, scan_dir};
