use crate::error::ItineraryError;
use crate::plan::{DayPlan, Slot, find_day, used_names};
use crate::pool::AttractionPool;
use crate::scoring::{RepairStyle, Scorer};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of a repair operation. Only `Applied` touches the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepairStatus {
    /// The plan was changed; `placed` lists names new to the plan, so the
    /// caller can hydrate their images.
    Applied { placed: Vec<String> },
    /// No unused attraction is left to offer.
    NoAlternative,
    /// The change would leave morning and evening equal (or a slot empty).
    Degenerate,
}

impl RepairStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, RepairStatus::Applied { .. })
    }
}

/// Which part of a day to repair
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
pub enum RepairFocus {
    Morning,
    Evening,
    #[default]
    Both,
}

impl RepairFocus {
    fn includes(self, slot: Slot) -> bool {
        matches!(
            (self, slot),
            (RepairFocus::Both, _)
                | (RepairFocus::Morning, Slot::Morning)
                | (RepairFocus::Evening, Slot::Evening)
        )
    }
}

/// Exchange morning and evening of one day.
///
/// The set of names in the plan does not change, so trip-wide uniqueness
/// holds without consulting other days.
pub fn swap_slots(plan: &mut [DayPlan], day: u32) -> Result<RepairStatus, ItineraryError> {
    let idx = find_day(plan, day)?;
    let target = &mut plan[idx];

    if target.morning.is_empty() || target.evening.is_empty() || target.morning == target.evening
    {
        return Ok(RepairStatus::Degenerate);
    }

    std::mem::swap(&mut target.morning, &mut target.evening);

    Ok(RepairStatus::Applied { placed: vec![] })
}

/// Post-generation edits of a plan against its original pool.
///
/// Every operation rebuilds the used set from the plan it is given and
/// either applies fully or leaves the plan untouched. Callers must not run
/// two operations on the same plan concurrently.
pub struct Repairer<'p> {
    pool: &'p AttractionPool,
}

impl<'p> Repairer<'p> {
    pub fn new(pool: &'p AttractionPool) -> Self {
        Repairer { pool }
    }

    /// Replace one slot with a random attraction not used anywhere in the plan.
    pub fn replace_slot<R: Rng + ?Sized>(
        &self,
        plan: &mut [DayPlan],
        day: u32,
        slot: Slot,
        rng: &mut R,
    ) -> Result<RepairStatus, ItineraryError> {
        let idx = find_day(plan, day)?;
        let current = plan[idx].slot(slot).to_owned();

        let mut used = used_names(plan, None);
        used.remove(&current);

        let candidates: Vec<&str> = self
            .pool
            .candidates_for(plan[idx].condition())
            .into_iter()
            .filter(|name| !used.contains(*name) && *name != current)
            .collect();

        let Some(replacement) = candidates.choose(rng) else {
            tracing::debug!(day, slot = %slot, "no alternative attraction to replace with");
            return Ok(RepairStatus::NoAlternative);
        };

        let replacement = replacement.to_string();
        plan[idx].set_slot(slot, replacement.clone());

        tracing::debug!(day, slot = %slot, from = %current, to = %replacement, "slot replaced");

        Ok(RepairStatus::Applied {
            placed: vec![replacement],
        })
    }

    /// Propose fresh activities for one day.
    ///
    /// With a style, candidates are ranked by the style score (plus jitter
    /// below one point) and the best eligible one wins; without a style the
    /// choice is uniform.
    pub fn repair_day<R: Rng + ?Sized>(
        &self,
        plan: &mut [DayPlan],
        day: u32,
        focus: RepairFocus,
        style: Option<RepairStyle>,
        rng: &mut R,
    ) -> Result<RepairStatus, ItineraryError> {
        let idx = find_day(plan, day)?;
        let used = used_names(plan, Some(day));
        let current_morning = plan[idx].morning.clone();
        let current_evening = plan[idx].evening.clone();

        let mut ordered = self.pool.candidates_for(plan[idx].condition());
        if let Some(style) = style {
            rank_by(&mut ordered, &style, rng);
        }

        let pick = |also_blocked: &str, avoid: &str, rng: &mut R| -> Option<String> {
            let eligible = ordered
                .iter()
                .filter(|name| !used.contains(**name) && **name != also_blocked && **name != avoid);

            match style {
                Some(_) => eligible.copied().next().map(str::to_owned),
                None => eligible
                    .copied()
                    .collect::<Vec<_>>()
                    .choose(rng)
                    .map(|name| name.to_string()),
            }
        };

        let mut morning = current_morning.clone();
        let mut evening = current_evening.clone();

        if focus.includes(Slot::Morning)
            && let Some(name) = pick(&current_evening, &current_morning, rng)
        {
            morning = name;
        }

        if focus.includes(Slot::Evening)
            && let Some(name) = pick(&morning, &current_evening, rng)
        {
            evening = name;
        }

        if !morning.is_empty() && morning == evening {
            if let Some(name) = pick(&morning, &evening, rng) {
                evening = name;
            }
            if morning == evening {
                tracing::debug!(day, "repair would repeat the same attraction twice");
                return Ok(RepairStatus::Degenerate);
            }
        }

        if morning == current_morning && evening == current_evening {
            tracing::debug!(day, focus = %focus, "no alternative attractions to repair day");
            return Ok(RepairStatus::NoAlternative);
        }

        let before: HashSet<&str> = [current_morning.as_str(), current_evening.as_str()].into();
        let placed = [&morning, &evening]
            .into_iter()
            .filter(|name| !before.contains(name.as_str()))
            .cloned()
            .collect();

        plan[idx].morning = morning;
        plan[idx].evening = evening;

        Ok(RepairStatus::Applied { placed })
    }
}

/// Sort names by descending score, breaking ties with jitter in `[0, 1)`.
fn rank_by<S: Scorer, R: Rng + ?Sized>(names: &mut Vec<&str>, scorer: &S, rng: &mut R) {
    let mut scored: Vec<(f64, &str)> = names
        .iter()
        .map(|name| (scorer.score(name) + rng.random::<f64>(), *name))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    *names = scored.into_iter().map(|(_, name)| name).collect();
}
