use crate::error::ItineraryError;
use crate::weather::{Condition, DayWeather};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest trip a date range can produce
pub const MAX_TRIP_DAYS: usize = 14;

/// Position of an activity within a day
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Morning,
    Evening,
}

/// One day of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    /// Display label, e.g. `Mon, Jan 5`
    pub date: String,
    pub iso_date: String,
    #[serde(flatten)]
    pub weather: DayWeather,
    #[serde(default)]
    pub morning: String,
    #[serde(default)]
    pub evening: String,
}

/// Ordered days of a trip
pub type Plan = Vec<DayPlan>;

impl DayPlan {
    /// Day metadata with empty slots; attractions are assigned afterwards.
    pub fn scaffold(day: u32, anchor: NaiveDate, weather: DayWeather) -> Self {
        let date = anchor + Duration::days(i64::from(day.saturating_sub(1)));

        DayPlan {
            day,
            date: date.format("%a, %b %-d").to_string(),
            iso_date: date.format("%Y-%m-%d").to_string(),
            weather,
            morning: String::new(),
            evening: String::new(),
        }
    }

    pub fn condition(&self) -> Condition {
        self.weather.condition
    }

    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::Morning => &self.morning,
            Slot::Evening => &self.evening,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, name: String) {
        match slot {
            Slot::Morning => self.morning = name,
            Slot::Evening => self.evening = name,
        }
    }

    /// Morning and evening, skipping empty slots
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.morning.as_str(), self.evening.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }
}

/// Names committed anywhere in the plan, optionally ignoring one day.
///
/// Always rebuilt from the plan: callers may have edited it since the last
/// operation.
pub fn used_names(plan: &[DayPlan], exclude_day: Option<u32>) -> HashSet<String> {
    plan.iter()
        .filter(|d| Some(d.day) != exclude_day)
        .flat_map(DayPlan::names)
        .map(str::to_owned)
        .collect()
}

pub(crate) fn find_day(plan: &[DayPlan], day: u32) -> Result<usize, ItineraryError> {
    plan.iter()
        .position(|d| d.day == day)
        .ok_or(ItineraryError::DayNotFound(day))
}

/// Names placed in more than one slot of the plan
pub fn duplicate_names(plan: &[DayPlan]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for name in plan.iter().flat_map(DayPlan::names) {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_owned());
        }
    }

    duplicates
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ItineraryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ItineraryError::InvalidDate(format!("{value}: {e}")))
}

/// Inclusive number of days between two ISO dates, clamped to 1..=14.
///
/// Unparseable or inverted ranges count as a single day.
pub fn days_from_range(start: &str, end: &str) -> usize {
    let (Ok(start), Ok(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return 1;
    };

    let days = (end - start).num_days() + 1;
    days.clamp(1, MAX_TRIP_DAYS as i64) as usize
}
