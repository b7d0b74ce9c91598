use crate::weather::Condition;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Candidate attractions for one trip, bucketed by weather suitability
///
/// Name equality is the only identity: the same name may sit in several
/// buckets, and the allocator still places it at most once per plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttractionPool {
    #[serde(default, deserialize_with = "normalize_entries")]
    pub sunny: Vec<String>,
    #[serde(default, deserialize_with = "normalize_entries")]
    pub cloudy: Vec<String>,
    #[serde(default, deserialize_with = "normalize_entries")]
    pub rainy: Vec<String>,
}

/// Pool entries arrive either as plain names or as place objects
#[derive(Deserialize)]
#[serde(untagged)]
enum PoolEntry {
    Name(String),
    Place { name: String },
}

fn normalize_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<PoolEntry>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            PoolEntry::Name(name) | PoolEntry::Place { name } => name.trim().to_owned(),
        })
        .filter(|name| !name.is_empty())
        .collect())
}

impl AttractionPool {
    pub fn new(sunny: Vec<String>, cloudy: Vec<String>, rainy: Vec<String>) -> Self {
        AttractionPool {
            sunny,
            cloudy,
            rainy,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn bucket(&self, condition: Condition) -> &[String] {
        match condition {
            Condition::Sunny => &self.sunny,
            Condition::Cloudy => &self.cloudy,
            Condition::Rainy => &self.rainy,
        }
    }

    pub fn bucket_mut(&mut self, condition: Condition) -> &mut Vec<String> {
        match condition {
            Condition::Sunny => &mut self.sunny,
            Condition::Cloudy => &mut self.cloudy,
            Condition::Rainy => &mut self.rainy,
        }
    }

    /// True when every bucket is empty
    pub fn is_empty(&self) -> bool {
        Condition::ALL.iter().all(|c| self.bucket(*c).is_empty())
    }

    /// Number of distinct names across all buckets
    pub fn total_distinct(&self) -> usize {
        self.names().collect::<HashSet<_>>().len()
    }

    /// Every name, bucket by bucket, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        Condition::ALL
            .into_iter()
            .flat_map(move |c| self.bucket(c).iter().map(String::as_str))
    }

    /// Preferred bucket first, then the other buckets in fixed order,
    /// keeping only the first occurrence of each name.
    pub fn candidates_for(&self, condition: Condition) -> Vec<&str> {
        let mut seen = HashSet::new();
        condition
            .fallback_order()
            .into_iter()
            .flat_map(|c| self.bucket(c).iter().map(|name| name.trim()))
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect()
    }

    /// Trim names, then drop blank and repeated ones inside each bucket,
    /// keeping order.
    pub fn dedup(&mut self) {
        for condition in Condition::ALL {
            let bucket = self.bucket_mut(condition);
            for name in bucket.iter_mut() {
                if name.trim().len() != name.len() {
                    *name = name.trim().to_owned();
                }
            }

            let mut seen = HashSet::new();
            bucket.retain(|name| !name.is_empty() && seen.insert(name.clone()));
        }
    }

    /// Generic pool used when neither curated nor discovered attractions exist
    pub fn generic() -> Self {
        let names = |xs: &[&str]| xs.iter().map(|x| x.to_string()).collect::<Vec<_>>();

        AttractionPool {
            sunny: names(&[
                "City Park",
                "Waterfront Promenade",
                "Botanical Gardens",
                "Viewpoint Hill",
                "Beach Area",
                "Nature Reserve",
            ]),
            cloudy: names(&[
                "Main Square",
                "Old Town",
                "Market Place",
                "Historic Cathedral",
                "City Museum",
                "Art Gallery",
            ]),
            rainy: names(&[
                "National Museum",
                "Science Center",
                "Shopping Mall",
                "Aquarium",
                "Indoor Market",
                "Concert Hall",
            ]),
        }
    }
}
