//! CLI command for updating entries

use clap::Args;

use crate::error::{PfimError, PfimResult};
use crate::query::{ReplaceArgs, UpdateOptions};
use crate::services::LedgerService;

/// Arguments of `pfim update`; each rule takes DATE OLD NEW
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    /// Change an expense amount on DATE from OLD to NEW
    #[arg(long, num_args = 3, value_names = ["DATE", "OLD", "NEW"])]
    pub expense: Option<Vec<String>>,

    /// Change an income amount on DATE from OLD to NEW
    #[arg(long, num_args = 3, value_names = ["DATE", "OLD", "NEW"])]
    pub income: Option<Vec<String>>,

    /// Rename tag OLD to NEW on entries dated DATE
    #[arg(long, num_args = 3, value_names = ["DATE", "OLD", "NEW"])]
    pub tag: Option<Vec<String>>,

    /// Replace description OLD with NEW on entries dated DATE
    #[arg(long = "descr", num_args = 3, value_names = ["DATE", "OLD", "NEW"])]
    pub description: Option<Vec<String>>,
}

fn replace_args(option: &str, values: Option<Vec<String>>) -> PfimResult<Option<ReplaceArgs>> {
    let Some(values) = values else {
        return Ok(None);
    };
    match <[String; 3]>::try_from(values) {
        Ok([date, old, new]) => Ok(Some(ReplaceArgs::new(date, old, new))),
        Err(values) => Err(PfimError::Validation(format!(
            "--{} takes DATE OLD NEW, got {} value(s)",
            option,
            values.len()
        ))),
    }
}

impl TryFrom<UpdateArgs> for UpdateOptions {
    type Error = PfimError;

    fn try_from(args: UpdateArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            tag: replace_args("tag", args.tag)?,
            income: replace_args("income", args.income)?,
            expense: replace_args("expense", args.expense)?,
            description: replace_args("descr", args.description)?,
        })
    }
}

/// Handle `pfim update`
pub fn handle_update_command(service: &LedgerService<'_>, args: UpdateArgs) -> PfimResult<()> {
    let opts = UpdateOptions::try_from(args)?;
    let rows = service.update(&opts)?;

    if rows == 0 {
        println!("No entries matched; nothing updated.");
    } else {
        println!("Updated {} entr{}.", rows, if rows == 1 { "y" } else { "ies" });
    }

    Ok(())
}
