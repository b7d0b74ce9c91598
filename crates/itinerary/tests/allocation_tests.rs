/// Integration tests for itinerary allocation
///
/// These tests drive `allocate` and `generate_plan` through the public API and
/// check the trip-wide properties every generated plan must have.
use itinex_itinerary::{
    AllocationStyle, AttractionPool, Condition, ItineraryError, TripRequest, WeatherContext,
    allocate, duplicate_names, generate_plan,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn names(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|x| x.to_string()).collect()
}

fn london() -> AttractionPool {
    AttractionPool::new(
        names(&[
            "Hyde Park",
            "Tower Bridge",
            "Greenwich Park",
            "Primrose Hill",
            "Little Venice",
        ]),
        names(&["Camden Market", "Shoreditch Street Art", "Borough Market"]),
        names(&[
            "British Museum",
            "Tate Modern",
            "National Gallery",
            "Sky Garden",
        ]),
    )
}

fn weather(code: i32) -> WeatherContext {
    WeatherContext {
        weather_code: Some(code),
        ..Default::default()
    }
}

#[cfg(test)]
mod allocation {
    use super::*;

    /// Test: no name repeats while the pool still has unused names
    ///
    /// 12 distinct names, 6 days: all 12 slots must hold distinct names in
    /// both styles.
    #[test]
    fn test_unique_while_pool_has_room() {
        let pool = london();
        let conditions = [
            Condition::Sunny,
            Condition::Rainy,
            Condition::Cloudy,
            Condition::Sunny,
            Condition::Rainy,
            Condition::Sunny,
        ];
        let styles = [
            AllocationStyle::Plain,
            AllocationStyle::hidden_gems(0.35).unwrap(),
            AllocationStyle::hidden_gems(1.0).unwrap(),
        ];

        for style in styles {
            for seed in 0..25 {
                let mut rng = StdRng::seed_from_u64(seed);
                let pairs = allocate(&pool, 6, |i| conditions[i], style, &mut rng).unwrap();

                let mut placed: Vec<&str> = pairs
                    .iter()
                    .flat_map(|p| [p.morning.as_str(), p.evening.as_str()])
                    .collect();
                placed.sort();
                placed.dedup();
                assert_eq!(placed.len(), 12, "style {style:?}, seed {seed}");
            }
        }
    }

    /// Test: preferred bucket is used before falling back
    #[test]
    fn test_plain_style_draws_preferred_bucket_first() {
        let pool = london();
        let mut rng = StdRng::seed_from_u64(42);

        let pairs = allocate(
            &pool,
            2,
            |_| Condition::Rainy,
            AllocationStyle::Plain,
            &mut rng,
        )
        .unwrap();

        for pair in &pairs {
            assert!(pool.rainy.contains(&pair.morning));
            assert!(pool.rainy.contains(&pair.evening));
        }
    }

    /// Test: sunny, sunny, cloudy over A,B,C / D,E / F
    ///
    /// Day 1 and day 2 take the three sunny names plus one cloudy fallback,
    /// day 3 takes the one cloudy name left plus the rainy fallback.
    #[test]
    fn test_small_pool_fallback_scenario() {
        let pool = AttractionPool::new(names(&["A", "B", "C"]), names(&["D", "E"]), names(&["F"]));
        let conditions = [Condition::Sunny, Condition::Sunny, Condition::Cloudy];

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pairs = allocate(
                &pool,
                3,
                |i| conditions[i],
                AllocationStyle::Plain,
                &mut rng,
            )
            .unwrap();

            let first_two: Vec<&str> = pairs[..2]
                .iter()
                .flat_map(|p| [p.morning.as_str(), p.evening.as_str()])
                .collect();
            for sunny in ["A", "B", "C"] {
                assert!(first_two.contains(&sunny), "seed {seed}: {first_two:?}");
            }
            assert!(pool.cloudy.contains(&pairs[1].evening));

            assert!(pool.cloudy.contains(&pairs[2].morning));
            assert_ne!(pairs[2].morning, pairs[1].evening);
            assert_eq!(pairs[2].evening, "F");
        }
    }

    /// Test: a single-name pool repeats that name rather than failing
    #[test]
    fn test_single_name_pool_repeats() {
        let pool = AttractionPool::new(names(&["Only"]), vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(0);

        let pairs = allocate(
            &pool,
            2,
            |_| Condition::Rainy,
            AllocationStyle::Plain,
            &mut rng,
        )
        .unwrap();

        assert_eq!(pairs.len(), 2);
        assert!(
            pairs
                .iter()
                .all(|p| p.morning == "Only" && p.evening == "Only")
        );
    }

    /// Test: generated plan uses forecast and defaults
    #[test]
    fn test_generate_plan_metadata() {
        let pool = london();
        let forecast = vec![
            weather(0),
            WeatherContext {
                weather_code: Some(61),
                temp_max: Some(12.6),
                temp_min: Some(7.2),
                precip_mm: Some(3.14),
                ..Default::default()
            },
        ];
        let mut request = TripRequest::new(3);
        request.start_date = chrono::NaiveDate::from_ymd_opt(2026, 7, 30);
        let mut rng = StdRng::seed_from_u64(8);

        let plan = generate_plan(&pool, &forecast, &request, &mut rng).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(plan[0].condition(), Condition::Sunny);
        assert_eq!(plan[1].condition(), Condition::Rainy);
        assert_eq!(plan[1].weather.temp_max, 13);
        assert_eq!(plan[1].weather.temp_min, 7);
        assert_eq!(plan[1].weather.precip_mm, 3.1);
        // beyond the forecast: default cloudy weather
        assert_eq!(plan[2].condition(), Condition::Cloudy);
        assert_eq!(plan[2].weather.temp_max, 20);
        assert_eq!(plan[2].iso_date, "2026-08-01");
        assert_eq!(plan[2].date, "Sat, Aug 1");

        assert!(duplicate_names(&plan).is_empty());
        assert!(plan.iter().all(|d| d.morning != d.evening));
    }

    /// Test: invalid trip parameters are rejected up front
    #[test]
    fn test_generate_plan_rejects_invalid_input() {
        let mut rng = StdRng::seed_from_u64(0);

        let result = generate_plan(&london(), &[], &TripRequest::new(0), &mut rng);
        assert!(matches!(result, Err(ItineraryError::InvalidDays(0))));

        let result = generate_plan(
            &AttractionPool::default(),
            &[],
            &TripRequest::new(2),
            &mut rng,
        );
        assert!(matches!(result, Err(ItineraryError::EmptyPool)));
    }

    /// Test: hidden-gem style spreads over the whole pool on a long trip
    #[test]
    fn test_hidden_gems_uses_every_name_on_long_trip() {
        let pool = london();
        let mut request = TripRequest::new(6);
        request.style = AllocationStyle::hidden_gems(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(17);

        let plan = generate_plan(&pool, &vec![weather(0); 6], &request, &mut rng).unwrap();

        assert!(duplicate_names(&plan).is_empty());
        assert_eq!(itinex_itinerary::used_names(&plan, None).len(), 12);
    }
}
