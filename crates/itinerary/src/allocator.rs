use crate::error::ItineraryError;
use crate::plan::{DayPlan, Plan};
use crate::pool::AttractionPool;
use crate::scoring::{HiddenGemScorer, Scorer};
use crate::weather::{Condition, WeatherContext};
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_SURPRISE_LEVEL: f64 = 0.35;

/// How the allocator chooses among unused candidates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum AllocationStyle {
    /// First unused candidate, preferred bucket first
    #[default]
    Plain,
    /// Hidden gems: favour non-mainstream names, sample among the best few.
    /// `surprise_level` in `[0, 1]` widens both the jitter and the sample.
    Weighted { surprise_level: f64 },
}

impl AllocationStyle {
    pub fn hidden_gems(surprise_level: f64) -> Result<Self, ItineraryError> {
        if !(0.0..=1.0).contains(&surprise_level) {
            return Err(ItineraryError::InvalidSurpriseLevel(surprise_level));
        }
        Ok(AllocationStyle::Weighted { surprise_level })
    }
}

/// Size of the top-scored group the weighted style samples from
pub fn sample_width(surprise_level: f64) -> usize {
    ((2.0 + surprise_level * 8.0).round() as usize).clamp(2, 10)
}

/// Activities assigned to one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    pub morning: String,
    pub evening: String,
}

/// Stateful picker over a shuffled copy of the pool.
///
/// Each bucket keeps a cursor; every entry before a cursor is already used,
/// so scans start there. Once every name is used the picker wraps around the
/// preferred bucket and repeats names instead of failing.
pub struct Allocator<'p, S = HiddenGemScorer> {
    buckets: [Vec<&'p str>; 3],
    cursors: [usize; 3],
    used: HashSet<&'p str>,
    style: AllocationStyle,
    scorer: S,
}

impl<'p> Allocator<'p> {
    pub fn new<R: Rng + ?Sized>(
        pool: &'p AttractionPool,
        style: AllocationStyle,
        rng: &mut R,
    ) -> Result<Self, ItineraryError> {
        Allocator::with_scorer(pool, style, HiddenGemScorer, rng)
    }
}

impl<'p, S: Scorer> Allocator<'p, S> {
    pub fn with_scorer<R: Rng + ?Sized>(
        pool: &'p AttractionPool,
        style: AllocationStyle,
        scorer: S,
        rng: &mut R,
    ) -> Result<Self, ItineraryError> {
        if let AllocationStyle::Weighted { surprise_level } = style {
            AllocationStyle::hidden_gems(surprise_level)?;
        }

        let buckets = Condition::ALL.map(|condition| {
            let mut bucket: Vec<&'p str> = pool
                .bucket(condition)
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .collect();
            bucket.shuffle(rng);
            bucket
        });

        if buckets.iter().all(Vec::is_empty) {
            return Err(ItineraryError::EmptyPool);
        }

        Ok(Allocator {
            buckets,
            cursors: [0; 3],
            used: HashSet::new(),
            style,
            scorer,
        })
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Pick the next attraction for a day with the given condition.
    pub fn pick<R: Rng + ?Sized>(&mut self, condition: Condition, rng: &mut R) -> Option<&'p str> {
        self.pick_avoiding(condition, None, rng)
    }

    /// Pick a morning and an evening that differ whenever the pool holds
    /// more than one name.
    pub fn pick_day<R: Rng + ?Sized>(
        &mut self,
        condition: Condition,
        rng: &mut R,
    ) -> Option<(&'p str, &'p str)> {
        let morning = self.pick_avoiding(condition, None, rng)?;
        let evening = self.pick_avoiding(condition, Some(morning), rng)?;
        Some((morning, evening))
    }

    fn pick_avoiding<R: Rng + ?Sized>(
        &mut self,
        condition: Condition,
        avoid: Option<&str>,
        rng: &mut R,
    ) -> Option<&'p str> {
        // fresh picks are unused, so they can never equal `avoid`
        let picked = match self.style {
            AllocationStyle::Plain => self.pick_first(condition),
            AllocationStyle::Weighted { surprise_level } => {
                self.pick_weighted(condition, surprise_level, rng)
            }
        };

        picked.or_else(|| self.reuse(condition, avoid))
    }

    fn pick_first(&mut self, condition: Condition) -> Option<&'p str> {
        for c in condition.fallback_order() {
            let idx = c.index();
            let found = self.buckets[idx]
                .iter()
                .skip(self.cursors[idx])
                .find(|name| !self.used.contains(*name))
                .copied();

            if let Some(name) = found {
                self.commit(name);
                return Some(name);
            }
        }

        None
    }

    fn pick_weighted<R: Rng + ?Sized>(
        &mut self,
        condition: Condition,
        surprise_level: f64,
        rng: &mut R,
    ) -> Option<&'p str> {
        let mut seen = HashSet::new();
        let mut scored: Vec<(f64, &'p str)> = Vec::new();

        for c in condition.fallback_order() {
            let idx = c.index();
            for name in self.buckets[idx].iter().skip(self.cursors[idx]) {
                if self.used.contains(name) || !seen.insert(*name) {
                    continue;
                }
                let jitter = (rng.random::<f64>() - 0.5) * 2.0 * surprise_level;
                scored.push((self.scorer.score(name) + jitter, *name));
            }
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(sample_width(surprise_level));

        let (_, name) = *scored.choose(rng)?;
        self.commit(name);
        Some(name)
    }

    /// Every name is used: cycle through the preferred bucket (or the first
    /// non-empty one) and accept a repeat. `avoid` is skipped when any other
    /// name is left in fallback order.
    fn reuse(&mut self, condition: Condition, avoid: Option<&str>) -> Option<&'p str> {
        let mut only_avoided = None;

        for idx in condition.fallback_order().map(Condition::index) {
            let bucket = &self.buckets[idx];
            if bucket.is_empty() {
                continue;
            }

            let len = bucket.len();
            let cursor = self.cursors[idx];
            let Some(step) = (0..len).find(|step| Some(bucket[(cursor + step) % len]) != avoid)
            else {
                only_avoided.get_or_insert(idx);
                continue;
            };

            let name = bucket[(cursor + step) % len];
            self.cursors[idx] += step + 1;
            return Some(self.repeat(condition, name));
        }

        let idx = only_avoided?;
        let bucket = &self.buckets[idx];
        let name = bucket[self.cursors[idx] % bucket.len()];
        self.cursors[idx] += 1;
        Some(self.repeat(condition, name))
    }

    fn repeat(&self, condition: Condition, name: &'p str) -> &'p str {
        tracing::debug!(
            condition = %condition,
            attraction = name,
            "attraction pool exhausted, repeating an attraction"
        );
        name
    }

    fn commit(&mut self, name: &'p str) {
        self.used.insert(name);

        for (bucket, cursor) in self.buckets.iter().zip(self.cursors.iter_mut()) {
            while *cursor < bucket.len() && self.used.contains(bucket[*cursor]) {
                *cursor += 1;
            }
        }
    }
}

/// Assign a morning and an evening activity to each of `days` days.
///
/// `condition_for` receives the 0-based day index. Morning is picked before
/// evening, and the evening repeats the morning only when the pool holds a
/// single name. Results differ between runs unless `rng` is seeded.
pub fn allocate<R, F>(
    pool: &AttractionPool,
    days: usize,
    condition_for: F,
    style: AllocationStyle,
    rng: &mut R,
) -> Result<Vec<SlotPair>, ItineraryError>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> Condition,
{
    if days < 1 {
        return Err(ItineraryError::InvalidDays(days));
    }

    let mut allocator = Allocator::new(pool, style, rng)?;

    (0..days)
        .map(|i| {
            let (morning, evening) = allocator
                .pick_day(condition_for(i), rng)
                .ok_or(ItineraryError::EmptyPool)?;

            Ok(SlotPair {
                morning: morning.to_owned(),
                evening: evening.to_owned(),
            })
        })
        .collect()
}

/// Parameters of a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub days: usize,
    /// First day of the trip; today when absent
    pub start_date: Option<NaiveDate>,
    pub style: AllocationStyle,
}

impl TripRequest {
    pub fn new(days: usize) -> Self {
        TripRequest {
            days,
            start_date: None,
            style: AllocationStyle::Plain,
        }
    }
}

/// Build a full plan: day metadata from the forecast, then attractions.
///
/// Days beyond the end of `forecast` get the default cloudy weather.
pub fn generate_plan<R: Rng + ?Sized>(
    pool: &AttractionPool,
    forecast: &[WeatherContext],
    request: &TripRequest,
    rng: &mut R,
) -> Result<Plan, ItineraryError> {
    if request.days < 1 {
        return Err(ItineraryError::InvalidDays(request.days));
    }
    if pool.is_empty() {
        return Err(ItineraryError::EmptyPool);
    }

    let anchor = request
        .start_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut plan: Plan = (0..request.days)
        .map(|i| {
            let weather = forecast
                .get(i)
                .map(WeatherContext::resolve)
                .unwrap_or_default();
            DayPlan::scaffold(i as u32 + 1, anchor, weather)
        })
        .collect();

    let conditions: Vec<Condition> = plan.iter().map(DayPlan::condition).collect();
    let pairs = allocate(pool, request.days, |i| conditions[i], request.style, rng)?;

    for (day, pair) in plan.iter_mut().zip(pairs) {
        day.morning = pair.morning;
        day.evening = pair.evening;
    }

    tracing::debug!(
        days = plan.len(),
        distinct = pool.total_distinct(),
        anchor = %anchor,
        "itinerary generated"
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_sample_width() {
        assert_eq!(sample_width(0.0), 2);
        assert_eq!(sample_width(0.35), 5);
        assert_eq!(sample_width(0.5), 6);
        assert_eq!(sample_width(1.0), 10);
    }

    #[test]
    fn test_hidden_gems_rejects_out_of_range() {
        assert!(AllocationStyle::hidden_gems(1.5).is_err());
        assert!(AllocationStyle::hidden_gems(-0.1).is_err());
        assert!(AllocationStyle::hidden_gems(f64::NAN).is_err());
        assert!(AllocationStyle::hidden_gems(0.0).is_ok());
    }

    #[test]
    fn test_plain_picks_preferred_bucket_first() {
        let pool = AttractionPool::new(names(&["A", "B"]), names(&["C"]), names(&["D"]));
        let mut rng = StdRng::seed_from_u64(7);
        let mut allocator = Allocator::new(&pool, AllocationStyle::Plain, &mut rng).unwrap();

        let first = allocator.pick(Condition::Rainy, &mut rng).unwrap();
        assert_eq!(first, "D");

        // rainy is exhausted: fall back to sunny, then cloudy
        let second = allocator.pick(Condition::Rainy, &mut rng).unwrap();
        assert!(second == "A" || second == "B");
        let third = allocator.pick(Condition::Rainy, &mut rng).unwrap();
        assert!(third == "A" || third == "B");
        assert_ne!(second, third);
        assert_eq!(allocator.pick(Condition::Rainy, &mut rng), Some("C"));
    }

    #[test]
    fn test_exhausted_pool_cycles_preferred_bucket() {
        let pool = AttractionPool::new(names(&["A", "B"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut allocator = Allocator::new(&pool, AllocationStyle::Plain, &mut rng).unwrap();

        let picks: Vec<&str> = (0..6)
            .map(|_| allocator.pick(Condition::Sunny, &mut rng).unwrap())
            .collect();

        assert_ne!(picks[0], picks[1]);
        assert_eq!(picks[2], picks[4]);
        assert_eq!(picks[3], picks[5]);
        assert_ne!(picks[2], picks[3]);
    }

    #[test]
    fn test_exhausted_evening_skips_the_days_morning() {
        let pool = AttractionPool::new(names(&["A"]), names(&["B", "C"]), vec![]);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let conditions = [Condition::Cloudy, Condition::Sunny];
            let pairs = allocate(
                &pool,
                2,
                |i| conditions[i],
                AllocationStyle::Plain,
                &mut rng,
            )
            .unwrap();

            assert_eq!(pairs[1].morning, "A");
            assert_ne!(pairs[1].evening, "A", "seed {seed}");
        }
    }

    #[test]
    fn test_exhausted_bucket_steps_past_the_days_morning() {
        let pool = AttractionPool::new(names(&["A", "B", "C"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(9);

        let pairs =
            allocate(&pool, 4, |_| Condition::Sunny, AllocationStyle::Plain, &mut rng).unwrap();
        assert!(pairs.iter().all(|p| p.morning != p.evening), "{pairs:?}");
    }

    #[test]
    fn test_exhausted_empty_preferred_bucket_uses_next_non_empty() {
        let pool = AttractionPool::new(vec![], vec![], names(&["Only"]));
        let mut rng = StdRng::seed_from_u64(3);
        let mut allocator = Allocator::new(&pool, AllocationStyle::Plain, &mut rng).unwrap();

        assert_eq!(allocator.pick(Condition::Sunny, &mut rng), Some("Only"));
        assert_eq!(allocator.pick(Condition::Sunny, &mut rng), Some("Only"));
    }

    #[test]
    fn test_weighted_zero_surprise_prefers_hidden_gems() {
        let pool = AttractionPool::new(
            names(&["City Museum", "Central Park", "Royal Palace", "Leake Street Tunnel", "Neal's Yard"]),
            vec![],
            vec![],
        );
        let style = AllocationStyle::hidden_gems(0.0).unwrap();

        // no jitter and a sample width of two: the first pick is always one
        // of the two non-mainstream names
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut allocator = Allocator::new(&pool, style, &mut rng).unwrap();
            let first = allocator.pick(Condition::Sunny, &mut rng).unwrap();
            assert!(
                first == "Leake Street Tunnel" || first == "Neal's Yard",
                "unexpected pick {first}"
            );
        }
    }

    #[test]
    fn test_weighted_keeps_every_name_reachable() {
        let pool = AttractionPool::new(
            names(&["Tower Bridge", "Borough Market", "Secret Garden", "Hidden Alley"]),
            names(&["National Gallery", "Backstreet Cafe"]),
            vec![],
        );
        let style = AllocationStyle::hidden_gems(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let pairs = allocate(&pool, 3, |_| Condition::Sunny, style, &mut rng).unwrap();
        let mut placed: Vec<&str> = pairs
            .iter()
            .flat_map(|p| [p.morning.as_str(), p.evening.as_str()])
            .collect();
        placed.sort();
        placed.dedup();
        assert_eq!(placed.len(), 6);
    }

    #[test]
    fn test_weighted_rejects_invalid_surprise() {
        let pool = AttractionPool::new(names(&["A"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(0);
        let result = Allocator::new(
            &pool,
            AllocationStyle::Weighted { surprise_level: 2.0 },
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(ItineraryError::InvalidSurpriseLevel(_))
        ));
    }

    #[test]
    fn test_custom_scorer() {
        let pool = AttractionPool::new(names(&["short", "a much longer name"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(5);
        let by_length = |name: &str| name.len() as f64;
        let mut allocator = Allocator::with_scorer(
            &pool,
            AllocationStyle::hidden_gems(0.0).unwrap(),
            by_length,
            &mut rng,
        )
        .unwrap();

        // two candidates, sample width two: either may come first, both are used
        let first = allocator.pick(Condition::Sunny, &mut rng).unwrap();
        let second = allocator.pick(Condition::Sunny, &mut rng).unwrap();
        assert_ne!(first, second);
        assert!(allocator.is_used("short"));
        assert!(allocator.is_used("a much longer name"));
    }

    #[test]
    fn test_allocate_rejects_zero_days_and_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        let pool = AttractionPool::new(names(&["A"]), vec![], vec![]);

        assert!(matches!(
            allocate(&pool, 0, |_| Condition::Sunny, AllocationStyle::Plain, &mut rng),
            Err(ItineraryError::InvalidDays(0))
        ));
        assert!(matches!(
            allocate(
                &AttractionPool::default(),
                2,
                |_| Condition::Sunny,
                AllocationStyle::Plain,
                &mut rng
            ),
            Err(ItineraryError::EmptyPool)
        ));
    }

    #[test]
    fn test_whitespace_name_is_never_allocated() {
        let pool = AttractionPool::new(names(&["  ", "Hyde Park"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(2);

        let pairs =
            allocate(&pool, 2, |_| Condition::Sunny, AllocationStyle::Plain, &mut rng).unwrap();
        assert!(
            pairs
                .iter()
                .all(|p| p.morning == "Hyde Park" && p.evening == "Hyde Park")
        );
    }

    #[test]
    fn test_pool_of_blank_names_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let pool = AttractionPool::new(names(&[""]), names(&["   "]), names(&["\t"]));
        assert!(matches!(
            Allocator::new(&pool, AllocationStyle::Plain, &mut rng),
            Err(ItineraryError::EmptyPool)
        ));
    }
}
