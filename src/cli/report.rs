//! CLI command for reports
//!
//! Prints the report to the terminal, or exports it with `--output`.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::RowLayout;
use crate::error::PfimResult;
use crate::export::{export_report_to_file, ExportFormat};
use crate::query::FetchOptions;
use crate::services::LedgerService;

/// Arguments of `pfim report`
///
/// Conflicting flags are accepted here and rejected by the query builder, so
/// every front end gets the same errors.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Order by date
    #[arg(long)]
    pub sort_date: bool,

    /// Order by tag
    #[arg(long)]
    pub sort_tag: bool,

    /// Order by amount
    #[arg(long)]
    pub sort_amount: bool,

    /// Reverse the sort key
    #[arg(long)]
    pub desc: bool,

    /// Only entries strictly before this date
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only entries strictly after this date
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only entries on this date
    #[arg(long, value_name = "DATE")]
    pub on: Option<String>,

    /// Only entries with this tag
    #[arg(long, value_name = "TAG")]
    pub for_tag: Option<String>,

    /// Only expenses
    #[arg(long)]
    pub for_exp: bool,

    /// Only income
    #[arg(long)]
    pub for_inc: bool,

    /// Every kind; narrowed by --for-inc or --for-exp when given with one
    #[arg(long)]
    pub all: bool,

    /// Write the report to a file instead of the terminal
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export format: csv, json or yaml (default: from the file extension, else csv)
    #[arg(long, requires = "output")]
    pub format: Option<String>,
}

impl From<&ReportArgs> for FetchOptions {
    fn from(args: &ReportArgs) -> Self {
        Self {
            tag: args.for_tag.clone(),
            before: args.before.clone(),
            after: args.after.clone(),
            on: args.on.clone(),
            income: args.for_inc,
            expense: args.for_exp,
            all: args.all,
            sort_date: args.sort_date,
            sort_tag: args.sort_tag,
            sort_amount: args.sort_amount,
            descending: args.desc,
        }
    }
}

/// Handle `pfim report`
pub fn handle_report_command(
    service: &LedgerService<'_>,
    settings: &Settings,
    args: ReportArgs,
) -> PfimResult<()> {
    // Resolve the format before fetching so a bad --format is an input error
    let format = match (&args.format, &args.output) {
        (Some(name), _) => Some(name.parse::<ExportFormat>()?),
        (None, Some(path)) => Some(ExportFormat::from_path(path).unwrap_or_default()),
        (None, None) => None,
    };

    let report = service.report(&FetchOptions::from(&args))?;

    match (args.output, format) {
        (Some(path), Some(format)) => {
            export_report_to_file(&report, &path, format)?;
            println!(
                "Report with {} entries exported to: {} ({})",
                report.entries.len(),
                path.display(),
                format
            );
        }
        _ => {
            print!("{}", report.format_terminal(&RowLayout::from_settings(settings)));
        }
    }

    Ok(())
}
