//! CLI command for deleting entries

use clap::Args;

use crate::error::PfimResult;
use crate::query::DeleteOptions;
use crate::services::LedgerService;

/// Arguments of `pfim delete`
#[derive(Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// Expenses of this amount
    #[arg(long = "exp", value_name = "AMOUNT", allow_hyphen_values = true)]
    pub expense: Option<String>,

    /// Income of this amount
    #[arg(long = "inc", value_name = "AMOUNT", allow_hyphen_values = true)]
    pub income: Option<String>,

    /// Entries with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Entries on this date
    #[arg(long, value_name = "DATE")]
    pub on: Option<String>,

    /// Entries strictly before this date
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Entries strictly after this date
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Every entry
    #[arg(long)]
    pub all: bool,
}

impl From<DeleteArgs> for DeleteOptions {
    fn from(args: DeleteArgs) -> Self {
        Self {
            tag: args.tag,
            on: args.on,
            before: args.before,
            after: args.after,
            income: args.income,
            expense: args.expense,
            all: args.all,
        }
    }
}

/// Handle `pfim delete`
pub fn handle_delete_command(service: &LedgerService<'_>, args: DeleteArgs) -> PfimResult<()> {
    let rows = service.delete(&args.into())?;

    if rows == 0 {
        println!("No entries matched; nothing deleted.");
    } else {
        println!("Deleted {} entr{}.", rows, if rows == 1 { "y" } else { "ies" });
    }

    Ok(())
}
