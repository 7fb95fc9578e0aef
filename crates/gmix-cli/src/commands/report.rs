use anyhow::{Context as _, Result};
use gmix_cli::cli::{ReportArgs, ReportFormat};
use gmix_ts::load_table;
use tracing::{info, warn};

use crate::commands::common::build_context;

pub fn handle(args: &ReportArgs) -> Result<()> {
    let mut context = build_context(&args.run)?;
    context.verbose = args.verbose;
    if let Some(regions) = &args.regions {
        context.regions = regions.clone();
    }

    if let Some(path) = &args.spill {
        context.spill = load_table(path).context("loading spill table")?;
    }
    if let Some(path) = &args.generation {
        context.generation = load_table(path).context("loading generation table")?;
    }
    if let Some(path) = &args.unserved {
        context.unserved = load_table(path).context("loading unserved table")?;
        info!("Loaded {} unserved rows", context.unserved.len());
    }

    let exceedances = context.nonsync_exceedances();
    if exceedances > 0 {
        warn!(
            "{} timesteps exceed the non-synchronous penetration limit of {:.0}%",
            exceedances,
            context.nsp_limit() * 100.0
        );
    }

    match args.format {
        ReportFormat::Plain => println!("{context}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&context.metrics())?),
    }
    Ok(())
}
