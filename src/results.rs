//! Final standings and the last-place summary.

use crate::config::LAST_PLACE_COUNT;
use crate::{Horse, LaneIndex, RaceState};
use serde::{Deserialize, Serialize};

/// One ranked lane as shown on the results board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub lane: LaneIndex,
    pub name: String,
    pub color: String,
    pub image_url: String,
}

fn ranked(state: &RaceState, horses: &[Horse]) -> Vec<Standing> {
    state
        .lanes
        .iter()
        .enumerate()
        .filter_map(|(lane, l)| {
            let rank = l.rank?;
            let horse = horses.get(lane);
            Some(Standing {
                rank,
                lane,
                name: horse
                    .map(|h| h.name.clone())
                    .unwrap_or_else(|| format!("Horse {}", lane + 1)),
                color: horse.map(|h| h.color.clone()).unwrap_or_default(),
                image_url: horse.map(|h| h.image_url.clone()).unwrap_or_default(),
            })
        })
        .collect()
}

/// Ranked lanes, winner first. Unranked lanes are left out.
pub fn standings(state: &RaceState, horses: &[Horse]) -> Vec<Standing> {
    let mut out = ranked(state, horses);
    out.sort_by_key(|s| s.rank);
    out
}

/// The bottom `min(2, ranked lanes)` finishers, last place first.
pub fn last_places(state: &RaceState, horses: &[Horse]) -> Vec<Standing> {
    let mut out = ranked(state, horses);
    out.sort_by(|a, b| b.rank.cmp(&a.rank));
    out.truncate(LAST_PLACE_COUNT);
    out
}
