use anyhow::{bail, Context as _, Result};
use gmix_cli::cli::RunArgs;
use gmix_core::{Battery, ConfigStore, Context, Generator, Plant, Polygon, Technology};
use tracing::info;

/// Assemble a context from command-line inputs: configuration, demand, fleet
/// and capacities, in that order.
pub fn build_context(args: &RunArgs) -> Result<Context> {
    let config =
        ConfigStore::discover(args.config.as_deref()).context("loading configuration")?;
    if let Some(path) = config.source() {
        info!("Using configuration {}", path.display());
    }
    let demand = gmix_ts::load_demand(&args.demand)?;
    let mut context = Context::new(&demand, &config).context("initialising context")?;

    if !args.fleet.is_empty() {
        context = context.with_generators(parse_fleet(&args.fleet)?);
    }
    if !args.capacities.is_empty() {
        let expected = context.tunable_count();
        if expected != args.capacities.len() {
            bail!(
                "--capacities has {} values but the fleet has {} tunable parameters",
                args.capacities.len(),
                expected
            );
        }
        context.set_capacities(&args.capacities);
    }
    info!(
        "Context ready: {} h, {} generators",
        context.hours(),
        context.generators.len()
    );
    Ok(context)
}

/// Parse `TECH[@POLYGON]` entries into zero-capacity units.
pub fn parse_fleet(entries: &[String]) -> Result<Vec<Box<dyn Generator>>> {
    entries
        .iter()
        .map(|entry| {
            let (tech, polygon) = match entry.split_once('@') {
                Some((tech, polygon)) => (tech, polygon.parse::<Polygon>()?),
                None => (entry.as_str(), Polygon::WILDCARD),
            };
            let unit: Box<dyn Generator> = match tech.parse::<Technology>()? {
                Technology::Battery => Box::new(Battery::new(polygon, 0.0, 0.0)),
                other => Box::new(Plant::new(other, polygon, 0.0)),
            };
            Ok(unit)
        })
        .collect()
}
