//! Horse roster generation.
//!
//! Every race draws a fresh roster: names and colours come from shuffled
//! pools, stats are drawn uniformly from their configured ranges and the
//! image falls back from a custom override to the default table to a
//! generated placeholder.

use crate::config::{
    BASE_SPEED_RANGE, BURST_CHANCE_RANGE, BURST_POWER_RANGE, DEFAULT_HORSE_IMAGES,
    ENDURANCE_RANGE, HORSE_COLORS, HORSE_NAMES, PLACEHOLDER_IMAGE,
};
use crate::{validate_lane_count, RaceError};
use log::debug;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default image per pool name, built once on first use.
static DEFAULT_IMAGES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| DEFAULT_HORSE_IMAGES.iter().copied().collect());

/// Static stats of one horse, fixed for the duration of a race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub name: String,
    /// In `[0.5, 1.5)`.
    pub base_speed: f64,
    /// In `[0.5, 1.5)`.
    pub endurance: f64,
    /// Per-tick sprint probability, in `[0, 0.2)`.
    pub burst_chance: f64,
    /// In `[1.5, 3.0)`.
    pub burst_power: f64,
    /// CSS class, display only.
    pub color: String,
    pub image_url: String,
}

impl Horse {
    /// A horse with average stats; handy for scripted races.
    pub fn steady(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_speed: 1.0,
            endurance: 1.0,
            burst_chance: 0.0,
            burst_power: 2.0,
            color: HORSE_COLORS[0].to_string(),
            image_url: resolve_image(name, None),
        }
    }
}

/// Look up the default image for a pool name.
pub fn default_image_for(name: &str) -> Option<&'static str> {
    DEFAULT_IMAGES.get(name).copied()
}

fn placeholder_for(name: &str) -> String {
    format!("{}?height=32&width=32&text={}", PLACEHOLDER_IMAGE, name)
}

/// Resolve an image: custom override, then the default table, then a placeholder.
pub fn resolve_image(name: &str, custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|s| !s.is_empty()) {
        Some(url) => url.to_string(),
        None => default_image_for(name)
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_for(name)),
    }
}

fn non_empty(overrides: &[String], lane: usize) -> Option<&str> {
    overrides
        .get(lane)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Shuffled pool names for `count` lanes; names repeat once `count` exceeds the pool.
pub fn random_names<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut pool = HORSE_NAMES;
    pool.shuffle(rng);
    (0..count)
        .map(|i| pool[i % pool.len()].to_string())
        .collect()
}

/// Generate the roster for a race of `count` lanes.
///
/// `names` and `images` are per-lane overrides; blank or missing entries fall
/// back to the shuffled pool and the image chain respectively.
pub fn generate_horses<R: Rng + ?Sized>(
    count: usize,
    names: &[String],
    images: &[String],
    rng: &mut R,
) -> Result<Vec<Horse>, RaceError> {
    validate_lane_count(count)?;

    let mut name_pool = HORSE_NAMES;
    let mut color_pool = HORSE_COLORS;
    name_pool.shuffle(rng);
    color_pool.shuffle(rng);

    let horses = (0..count)
        .map(|lane| {
            let name = non_empty(names, lane)
                .map(str::to_string)
                .unwrap_or_else(|| name_pool[lane % name_pool.len()].to_string());
            let image_url = resolve_image(&name, non_empty(images, lane));

            let horse = Horse {
                base_speed: rng.random_range(BASE_SPEED_RANGE.0..BASE_SPEED_RANGE.1),
                endurance: rng.random_range(ENDURANCE_RANGE.0..ENDURANCE_RANGE.1),
                burst_chance: rng.random_range(BURST_CHANCE_RANGE.0..BURST_CHANCE_RANGE.1),
                burst_power: rng.random_range(BURST_POWER_RANGE.0..BURST_POWER_RANGE.1),
                color: color_pool[lane % color_pool.len()].to_string(),
                image_url,
                name,
            };
            debug!(
                "Lane {}: {} speed {:.2} endurance {:.2} burst {:.0}% x{:.2}",
                lane + 1,
                horse.name,
                horse.base_speed,
                horse.endurance,
                horse.burst_chance * 100.0,
                horse.burst_power
            );
            horse
        })
        .collect();

    Ok(horses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_LANES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn full_field_gets_every_name_and_distinct_colours() {
        let mut rng = StdRng::seed_from_u64(9);
        let horses = generate_horses(MAX_LANES, &[], &[], &mut rng).unwrap();

        assert_eq!(horses.len(), 9);
        let names: HashSet<&str> = horses.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names.len(), HORSE_NAMES.len());
        let colors: HashSet<&str> = horses.iter().map(|h| h.color.as_str()).collect();
        assert_eq!(colors.len(), 9);
    }

    #[test]
    fn stats_fall_inside_their_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            for h in generate_horses(5, &[], &[], &mut rng).unwrap() {
                assert!((0.5..1.5).contains(&h.base_speed));
                assert!((0.5..1.5).contains(&h.endurance));
                assert!((0.0..0.2).contains(&h.burst_chance));
                assert!((1.5..3.0).contains(&h.burst_power));
            }
        }
    }

    #[test]
    fn overrides_take_precedence_and_blanks_fall_back() {
        let mut rng = StdRng::seed_from_u64(5);
        let names = vec!["Thunder".to_string(), "   ".to_string()];
        let images = vec![String::new(), "https://example.com/b.png".to_string()];
        let horses = generate_horses(3, &names, &images, &mut rng).unwrap();

        assert_eq!(horses[0].name, "Thunder");
        assert!(horses[0].image_url.starts_with(PLACEHOLDER_IMAGE));
        assert!(horses[0].image_url.ends_with("text=Thunder"));

        assert!(HORSE_NAMES.contains(&horses[1].name.as_str()));
        assert_eq!(horses[1].image_url, "https://example.com/b.png");

        assert_eq!(
            horses[2].image_url,
            default_image_for(&horses[2].name).unwrap()
        );
    }

    #[test]
    fn out_of_range_counts_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_horses(0, &[], &[], &mut rng),
            Err(RaceError::ParticipantCount { requested: 0 })
        ));
        assert!(matches!(
            generate_horses(10, &[], &[], &mut rng),
            Err(RaceError::ParticipantCount { requested: 10 })
        ));
    }

    #[test]
    fn random_names_wrap_around_the_pool() {
        let mut rng = StdRng::seed_from_u64(4);
        let names = random_names(12, &mut rng);
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], names[9]);
        assert_eq!(names[2], names[11]);
    }

    #[test]
    fn image_chain_for_unknown_name_uses_placeholder() {
        assert_eq!(
            resolve_image("Nobody", None),
            "/placeholder.svg?height=32&width=32&text=Nobody"
        );
        assert_eq!(
            resolve_image("Vlad", Some("")),
            "https://i.postimg.cc/X7GF3RQ5/Vlad.png"
        );
    }
}
