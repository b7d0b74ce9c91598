use serde::{Deserialize, Serialize};

/// Affinity of an attraction name for a selection style. Higher is better.
///
/// Scores are compared only against each other within one selection, so the
/// scale is up to the implementation.
pub trait Scorer {
    fn score(&self, name: &str) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, name: &str) -> f64 {
        self(name)
    }
}

const MAINSTREAM_KEYWORDS: &[&str] = &[
    "museum",
    "cathedral",
    "palace",
    "tower",
    "bridge",
    "castle",
    "square",
    "old town",
    "market",
    "national",
    "central",
    "zoo",
    "aquarium",
    "monument",
    "park",
    "garden",
];

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    let name = name.to_lowercase();
    keywords.iter().any(|k| name.contains(k))
}

/// Landmark-type names everybody already has on their list
pub fn is_mainstream(name: &str) -> bool {
    contains_any(name, MAINSTREAM_KEYWORDS)
}

/// Prefers names that do not sound like a standard landmark
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenGemScorer;

impl Scorer for HiddenGemScorer {
    fn score(&self, name: &str) -> f64 {
        if is_mainstream(name) { 0.6 } else { 1.0 }
    }
}

const BUDGET_KEYWORDS: &[&str] = &[
    "park", "market", "walk", "garden", "square", "beach", "view", "bridge", "street",
];

const POPULAR_KEYWORDS: &[&str] = &[
    "museum",
    "cathedral",
    "castle",
    "palace",
    "tower",
    "temple",
    "basilica",
    "gallery",
    "opera",
    "fort",
];

const CALM_KEYWORDS: &[&str] = &[
    "garden",
    "park",
    "river",
    "old town",
    "view",
    "promenade",
    "harbour",
    "lake",
];

/// Flavour requested when repairing a day
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepairStyle {
    /// Calm, easy-paced places
    #[default]
    Easy,
    /// Free or cheap outdoor places
    Budget,
    /// Well-known highlights
    Popular,
}

impl Scorer for RepairStyle {
    fn score(&self, name: &str) -> f64 {
        let length = name.chars().count();
        let mut score = 0.0;

        match self {
            RepairStyle::Budget => {
                if contains_any(name, BUDGET_KEYWORDS) {
                    score += 6.0;
                }
                if length <= 18 {
                    score += 2.0;
                }
            }
            RepairStyle::Popular => {
                if contains_any(name, POPULAR_KEYWORDS) {
                    score += 6.0;
                }
                if name.to_lowercase().contains("museum") {
                    score += 2.0;
                }
            }
            RepairStyle::Easy => {
                if contains_any(name, CALM_KEYWORDS) {
                    score += 4.0;
                }
                if length <= 22 {
                    score += 1.0;
                }
            }
        }

        score
    }
}
