pub mod generate;
pub mod repair;

use anyhow::Context;
use itinex_itinerary::{AttractionPool, DayPlan};
use std::path::Path;

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_pool_file(path: &Path) -> anyhow::Result<AttractionPool> {
    AttractionPool::from_json(&read_file(path)?)
        .with_context(|| format!("invalid attraction pool in {}", path.display()))
}

/// Print the plan as JSON on stdout, or write it to `out`.
fn write_plan(plan: &[DayPlan], out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(plan)?;

    match out {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "plan written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
