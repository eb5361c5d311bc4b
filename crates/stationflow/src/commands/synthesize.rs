// crates/stationflow/src/commands/synthesize.rs

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use stationflow_core::{outputs, synthesis};

use super::{load_config, rng_from};

pub fn handle_synthesize_command(
    output: &Path,
    start: NaiveDate,
    days: u32,
    config_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut rng = rng_from(seed);

    let table = synthesis::synthesize_historical(start, days, &config, &mut rng)?;
    outputs::write_canonical_csv(table.frame(), output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Wrote {} synthetic daily readings starting {} to {}",
        table.height(),
        start,
        output.display(),
    );
    Ok(())
}
