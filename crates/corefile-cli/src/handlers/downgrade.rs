//! Downgrade command handler

use super::utils::read_corefile;
use crate::cli::RangeArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use corefile_core::Migrator;
use corefile_schemas::Catalog;
use serde::Serialize;

#[derive(Serialize)]
struct DowngradeOutput<'a> {
    corefile: &'a str,
}

/// Handle the downgrade command
pub fn handle_downgrade(args: RangeArgs, catalog: &Catalog, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Downgrading {} from {} to {}", args.corefile.display(), args.from, args.to))?;

    let timer = Timer::with_details("downgrade", &format!("{} -> {}", args.from, args.to));
    let _span = timer.span().enter();

    let text = read_corefile(&args.corefile)?;
    let downgraded = Migrator::new(catalog).migrate_down(&args.from, &args.to, &text)?;

    if output.is_human() {
        output.writeln(&downgraded)
    } else {
        output.data(&DowngradeOutput {
            corefile: &downgraded,
        })
    }
}
