use crate::pool::AttractionPool;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const OUTDOOR_KEYWORDS: &[&str] = &[
    "park",
    "garden",
    "beach",
    "view",
    "lookout",
    "trail",
    "hike",
    "island",
    "zoo",
    "temple",
    "shrine",
    "castle",
    "palace",
    "fort",
    "harbor",
    "waterfront",
    "bridge",
    "square",
    "plaza",
];

const INDOOR_KEYWORDS: &[&str] = &[
    "museum",
    "gallery",
    "cathedral",
    "church",
    "basilica",
    "palace",
    "theatre",
    "theater",
    "market",
    "mall",
    "aquarium",
    "planetarium",
    "library",
    "exhibition",
];

/// Names that mark infrastructure or admin areas rather than attractions
const BAD_WORDS: &[&str] = &[
    "station",
    "district",
    "constituency",
    "railway",
    "school",
    "hospital",
    "road",
    "street",
    "avenue",
    "university",
    "college",
    "cemetery",
    "company",
    "office",
    "neighborhood",
];

const MAX_NAME_LEN: usize = 60;

/// Fewer usable places than this and discovery is not worth using
pub const MIN_GOOD_PLACES: usize = 12;

/// Buckets with this many entries or fewer get topped up
const THIN_BUCKET: usize = 8;
const TOP_UP_LIMIT: usize = 20;

/// A discovered place near the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

impl Place {
    fn haystack(&self) -> String {
        format!("{} {}", self.name, self.text).to_lowercase()
    }

    fn is_outdoor(&self) -> bool {
        let haystack = self.haystack();
        OUTDOOR_KEYWORDS.iter().any(|k| haystack.contains(k))
    }

    fn is_indoor(&self) -> bool {
        let haystack = self.haystack();
        INDOOR_KEYWORDS.iter().any(|k| haystack.contains(k))
    }

    fn is_attraction(&self) -> bool {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return false;
        }

        let lower = name.to_lowercase();
        !BAD_WORDS.iter().any(|w| lower.contains(w))
            && !self.text.to_lowercase().contains("administrative")
    }
}

/// Drop places that are not attractions: blank or overlong names, names
/// containing infrastructure words, administrative areas.
///
/// Returns `None` when fewer than [`MIN_GOOD_PLACES`] survive.
pub fn filter_places(places: &[Place]) -> Option<Vec<Place>> {
    let kept: Vec<Place> = places
        .iter()
        .filter(|p| p.is_attraction())
        .cloned()
        .collect();

    if kept.len() < MIN_GOOD_PLACES {
        tracing::debug!(
            total = places.len(),
            kept = kept.len(),
            "too few usable discovered places"
        );
        return None;
    }

    Some(kept)
}

/// Bucket discovered places by outdoor/indoor keywords.
///
/// Outdoor places go to sunny, indoor places to rainy (a place can be both),
/// the rest to cloudy. Buckets with 8 entries or fewer are topped up so a
/// short trip never starves on one weather type.
pub fn categorize(places: &[Place]) -> AttractionPool {
    let sunny: Vec<&Place> = places.iter().filter(|p| p.is_outdoor()).collect();
    let rainy: Vec<&Place> = places.iter().filter(|p| p.is_indoor()).collect();
    let cloudy: Vec<&Place> = places
        .iter()
        .filter(|p| !p.is_outdoor() && !p.is_indoor())
        .collect();

    let names = |xs: &[&Place]| xs.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
    let topped_up = |primary: &[&Place]| {
        primary
            .iter()
            .chain(cloudy.iter())
            .take(TOP_UP_LIMIT)
            .map(|p| p.name.clone())
            .collect::<Vec<_>>()
    };

    let mut pool = AttractionPool {
        sunny: if sunny.len() > THIN_BUCKET {
            names(&sunny)
        } else {
            topped_up(&sunny)
        },
        cloudy: if cloudy.len() > THIN_BUCKET {
            names(&cloudy)
        } else {
            places
                .iter()
                .take(TOP_UP_LIMIT)
                .map(|p| p.name.clone())
                .collect()
        },
        rainy: if rainy.len() > THIN_BUCKET {
            names(&rainy)
        } else {
            topped_up(&rainy)
        },
    };
    pool.dedup();
    pool
}

/// Lowercase slug used as the curated-attractions key (`london-united-kingdom`)
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Hand-maintained pools keyed by destination slug
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuratedAttractions(pub HashMap<String, AttractionPool>);

impl CuratedAttractions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn lookup(&self, destination: &str) -> Option<&AttractionPool> {
        self.0.get(&slugify(destination))
    }
}

/// Where the trip's pool came from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PoolSource {
    Curated,
    Discovered,
    Fallback,
}

/// Pick the best available pool: curated if complete, discovered if rich
/// enough, generic otherwise.
pub fn select_pool(
    curated: Option<&AttractionPool>,
    discovered: Option<&AttractionPool>,
) -> (AttractionPool, PoolSource) {
    if let Some(pool) = curated
        && !pool.sunny.is_empty()
        && !pool.cloudy.is_empty()
        && !pool.rainy.is_empty()
    {
        return (pool.clone(), PoolSource::Curated);
    }

    if let Some(pool) = discovered
        && pool.sunny.len() > THIN_BUCKET
    {
        return (pool.clone(), PoolSource::Discovered);
    }

    (AttractionPool::generic(), PoolSource::Fallback)
}
