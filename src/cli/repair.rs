use super::{load_pool_file, read_file, write_plan};
use anyhow::Context;
use clap::Args;
use itinex_itinerary::{Plan, RepairFocus, RepairStatus, RepairStyle, Repairer, Slot, swap_slots};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Plan JSON produced by `generate`
    #[arg(long)]
    pub plan: PathBuf,

    /// Attraction pool the plan was generated from
    #[arg(long)]
    pub pool: PathBuf,

    /// Day number, starting at 1
    #[arg(long)]
    pub day: u32,

    /// morning or evening
    #[arg(long)]
    pub slot: Slot,

    /// Write the plan to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SwapArgs {
    /// Plan JSON produced by `generate`
    #[arg(long)]
    pub plan: PathBuf,

    /// Day number, starting at 1
    #[arg(long)]
    pub day: u32,

    /// Write the plan to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RepairArgs {
    /// Plan JSON produced by `generate`
    #[arg(long)]
    pub plan: PathBuf,

    /// Attraction pool the plan was generated from
    #[arg(long)]
    pub pool: PathBuf,

    /// Day number, starting at 1
    #[arg(long)]
    pub day: u32,

    /// morning, evening or both
    #[arg(long, default_value = "both")]
    pub focus: RepairFocus,

    /// easy, budget or popular; random pick when omitted
    #[arg(long)]
    pub style: Option<RepairStyle>,

    /// Write the plan to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn load_plan(path: &Path) -> anyhow::Result<Plan> {
    serde_json::from_str(&read_file(path)?)
        .with_context(|| format!("invalid plan in {}", path.display()))
}

fn report(status: &RepairStatus, day: u32) {
    match status {
        RepairStatus::Applied { placed } => {
            tracing::info!(day, placed = ?placed, "Plan updated");
        }
        RepairStatus::NoAlternative => {
            tracing::warn!(day, "No alternative attractions left, plan unchanged");
        }
        RepairStatus::Degenerate => {
            tracing::warn!(day, "Change would repeat an attraction within the day, plan unchanged");
        }
    }
}

#[tracing::instrument(skip_all, fields(day = args.day, slot = %args.slot))]
pub fn replace(args: ReplaceArgs) -> anyhow::Result<()> {
    let mut plan = load_plan(&args.plan)?;
    let pool = load_pool_file(&args.pool)?;

    let status =
        Repairer::new(&pool).replace_slot(&mut plan, args.day, args.slot, &mut rand::rng())?;
    report(&status, args.day);

    write_plan(&plan, args.out.as_deref())
}

#[tracing::instrument(skip_all, fields(day = args.day))]
pub fn swap(args: SwapArgs) -> anyhow::Result<()> {
    let mut plan = load_plan(&args.plan)?;

    let status = swap_slots(&mut plan, args.day)?;
    report(&status, args.day);

    write_plan(&plan, args.out.as_deref())
}

#[tracing::instrument(skip_all, fields(day = args.day, focus = %args.focus))]
pub fn repair(args: RepairArgs) -> anyhow::Result<()> {
    let mut plan = load_plan(&args.plan)?;
    let pool = load_pool_file(&args.pool)?;

    let status = Repairer::new(&pool).repair_day(
        &mut plan,
        args.day,
        args.focus,
        args.style,
        &mut rand::rng(),
    )?;
    report(&status, args.day);

    write_plan(&plan, args.out.as_deref())
}
