use super::{load_pool_file, read_file, write_plan};
use anyhow::Context;
use clap::Args;
use itinex::config::{Config, PlannerConfig};
use itinex_itinerary::plan::parse_iso_date;
use itinex_itinerary::{
    AllocationStyle, AttractionPool, CuratedAttractions, ForecastResponse, Place, TripRequest,
    categorize, days_from_range, filter_places, generate_plan, select_pool,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Attraction pool JSON (`{"sunny": [...], "cloudy": [...], "rainy": [...]}`);
    /// skips source selection
    #[arg(long)]
    pub pool: Option<PathBuf>,

    /// Curated attractions JSON keyed by destination slug
    #[arg(long, requires = "destination")]
    pub curated: Option<PathBuf>,

    /// Destination name, e.g. "London, United Kingdom"
    #[arg(long)]
    pub destination: Option<String>,

    /// Discovered places JSON (`[{"name": ..., "text": ...}]`)
    #[arg(long)]
    pub places: Option<PathBuf>,

    /// Open-Meteo forecast JSON with a `daily` block
    #[arg(long)]
    pub forecast: Option<PathBuf>,

    /// Trip length in days
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<usize>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Prefer lesser-known attractions
    #[arg(long)]
    pub hidden_gems: bool,

    /// Randomness of the hidden-gems style, 0.0 to 1.0
    #[arg(long)]
    pub surprise: Option<f64>,

    /// Write the plan to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[tracing::instrument(skip_all, fields(destination = args.destination.as_deref()))]
pub fn generate(config: &Config, args: GenerateArgs) -> anyhow::Result<()> {
    let pool = load_pool(&args)?;
    let days = trip_days(&config.planner, &args);

    let start_date = args.start.as_deref().map(parse_iso_date).transpose()?;
    // days_from_range treats a bad end date as a one-day trip
    args.end.as_deref().map(parse_iso_date).transpose()?;

    let forecast = match &args.forecast {
        Some(path) => ForecastResponse::from_json(&read_file(path)?)
            .with_context(|| format!("invalid forecast in {}", path.display()))?
            .contexts(),
        None => Vec::new(),
    };

    let style = if args.hidden_gems || config.planner.hidden_gems {
        AllocationStyle::hidden_gems(args.surprise.unwrap_or(config.planner.surprise_level))?
    } else {
        AllocationStyle::Plain
    };

    let request = TripRequest {
        days,
        start_date,
        style,
    };
    let plan = generate_plan(&pool, &forecast, &request, &mut rand::rng())?;

    tracing::info!(
        days,
        forecast_days = forecast.len(),
        "Itinerary generated"
    );

    write_plan(&plan, args.out.as_deref())
}

fn load_pool(args: &GenerateArgs) -> anyhow::Result<AttractionPool> {
    if let Some(path) = &args.pool {
        tracing::debug!(path = %path.display(), "using attraction pool from file");
        return load_pool_file(path);
    }

    let curated = match (&args.curated, &args.destination) {
        (Some(path), Some(destination)) => {
            let curated = CuratedAttractions::from_json(&read_file(path)?)
                .with_context(|| format!("invalid curated attractions in {}", path.display()))?;
            curated.lookup(destination).cloned()
        }
        _ => None,
    };

    let discovered = match &args.places {
        Some(path) => {
            let places: Vec<Place> = serde_json::from_str(&read_file(path)?)
                .with_context(|| format!("invalid places in {}", path.display()))?;
            let kept = filter_places(&places);
            if kept.is_none() {
                tracing::warn!(found = places.len(), "too few usable discovered places");
            }
            kept.map(|places| categorize(&places))
        }
        None => None,
    };

    let (pool, source) = select_pool(curated.as_ref(), discovered.as_ref());
    tracing::info!(
        source = %source,
        distinct = pool.total_distinct(),
        "Attraction pool selected"
    );

    Ok(pool)
}

/// Date range wins over `--days`; both fall back to the configured default.
fn trip_days(planner: &PlannerConfig, args: &GenerateArgs) -> usize {
    let days = match (&args.start, &args.end, args.days) {
        (Some(start), Some(end), _) => days_from_range(start, end),
        (_, _, Some(days)) => days,
        _ => planner.default_days,
    };

    days.min(planner.max_days)
}
