//! CLI command for recording entries

use clap::Args;

use crate::display::format_entry_details;
use crate::error::PfimResult;
use crate::query::RecordOptions;
use crate::services::LedgerService;

/// Arguments of `pfim record`
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Entry date (YYYY-MM-DD), today when omitted
    #[arg(long)]
    pub date: Option<String>,

    /// Tag grouping related entries
    #[arg(long)]
    pub tag: Option<String>,

    /// Short description
    #[arg(long = "descr")]
    pub description: Option<String>,

    /// Record income of this amount
    #[arg(long = "inc", value_name = "AMOUNT", allow_hyphen_values = true)]
    pub income: Option<String>,

    /// Record an expense of this amount
    #[arg(long = "exp", value_name = "AMOUNT", allow_hyphen_values = true)]
    pub expense: Option<String>,
}

impl From<RecordArgs> for RecordOptions {
    fn from(args: RecordArgs) -> Self {
        Self {
            date: args.date,
            tag: args.tag,
            description: args.description,
            income: args.income,
            expense: args.expense,
        }
    }
}

/// Handle `pfim record`
pub fn handle_record_command(service: &LedgerService<'_>, args: RecordArgs) -> PfimResult<()> {
    let stored = service.record(&args.into())?;

    println!("Recorded entry #{}", stored.id);
    print!("{}", format_entry_details(&stored.entry));

    Ok(())
}
