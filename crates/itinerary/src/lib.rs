pub mod allocator;
pub mod error;
pub mod image;
pub mod plan;
pub mod pool;
pub mod repair;
pub mod scoring;
pub mod source;
pub mod weather;

pub use allocator::{
    AllocationStyle, Allocator, DEFAULT_SURPRISE_LEVEL, SlotPair, TripRequest, allocate,
    generate_plan, sample_width,
};
pub use error::ItineraryError;
pub use image::{ImageLookup, MemoryImageCache, hydrate};
pub use plan::{DayPlan, MAX_TRIP_DAYS, Plan, Slot, days_from_range, duplicate_names, used_names};
pub use pool::AttractionPool;
pub use repair::{RepairFocus, RepairStatus, Repairer, swap_slots};
pub use scoring::{HiddenGemScorer, RepairStyle, Scorer, is_mainstream};
pub use source::{
    CuratedAttractions, MIN_GOOD_PLACES, Place, PoolSource, categorize, filter_places,
    select_pool, slugify,
};
pub use weather::{Condition, DayWeather, ForecastResponse, WeatherContext, classify};
