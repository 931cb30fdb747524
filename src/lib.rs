use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod horses;
pub mod results;
pub mod session;
pub mod track;

use config::{
    EVENT_LOG_CAPACITY, FATIGUE_CAP, FATIGUE_ENDURANCE_SCALE, FATIGUE_STEP_MIN,
    FATIGUE_STEP_SPREAD, GOOD_TERRAIN_ABOVE, MAX_LANES, MIN_LANES, MOVE_ONE_THRESHOLD,
    MOVE_THREE_THRESHOLD, MOVE_TWO_THRESHOLD, SLOW_TERRAIN_BELOW, SLOW_TERRAIN_EVENT_CHANCE,
};
pub use horses::Horse;
pub use track::{Terrain, Track};

pub type LaneIndex = usize;

/// Errors raised by race configuration and the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    ParticipantCount { requested: usize },
    LaneOutOfRange { lane: LaneIndex, lanes: usize },
    NotRacing,
    RaceInProgress,
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::ParticipantCount { requested } => write!(
                f,
                "Participant count must be between {} and {} (got {})",
                MIN_LANES, MAX_LANES, requested
            ),
            RaceError::LaneOutOfRange { lane, lanes } => write!(
                f,
                "Lane {} does not exist in a {}-lane race",
                lane + 1,
                lanes
            ),
            RaceError::NotRacing => write!(f, "No race is running"),
            RaceError::RaceInProgress => {
                write!(f, "The race configuration cannot change while racing")
            }
        }
    }
}

impl std::error::Error for RaceError {}

/// Check that `count` lanes is a playable field.
pub fn validate_lane_count(count: usize) -> Result<usize, RaceError> {
    if (MIN_LANES..=MAX_LANES).contains(&count) {
        Ok(count)
    } else {
        Err(RaceError::ParticipantCount { requested: count })
    }
}

/// Source of uniform draws in `[0, 1)` consumed by the race engine.
///
/// Every `rand::Rng` is a `Dice`; tests can script exact sequences instead.
pub trait Dice {
    fn roll(&mut self) -> f64;
}

impl<R: rand::Rng + ?Sized> Dice for R {
    fn roll(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Per-lane mutable race state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub position: f64,
    pub fatigue: f64,
    pub finished: bool,
    /// 1-based finishing place, set in the tick the lane finishes.
    pub rank: Option<u32>,
}

/// Something worth telling the spectators about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceEvent {
    Sprint { lane: LaneIndex, name: String, bonus: u32 },
    SlowedByTerrain { lane: LaneIndex, name: String },
    GoodTerrain { lane: LaneIndex, name: String },
    Finished { lane: LaneIndex, name: String, rank: u32 },
}

impl RaceEvent {
    pub fn lane(&self) -> LaneIndex {
        match self {
            RaceEvent::Sprint { lane, .. }
            | RaceEvent::SlowedByTerrain { lane, .. }
            | RaceEvent::GoodTerrain { lane, .. }
            | RaceEvent::Finished { lane, .. } => *lane,
        }
    }
}

impl fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceEvent::Sprint { name, bonus, .. } => {
                write!(f, "{} makes a sudden sprint! (+{})", name, bonus)
            }
            RaceEvent::SlowedByTerrain { name, .. } => {
                write!(f, "{} slows down on difficult terrain", name)
            }
            RaceEvent::GoodTerrain { name, .. } => {
                write!(f, "{} takes advantage of good terrain", name)
            }
            RaceEvent::Finished { name, .. } => write!(f, "{} crosses the finish line!", name),
        }
    }
}

/// The few most recent events, newest batch first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<RaceEvent>,
}

impl EventLog {
    /// Put this tick's events in front of the older ones and drop the overflow.
    pub fn record(&mut self, fresh: &[RaceEvent]) {
        for event in fresh.iter().rev() {
            self.entries.push_front(event.clone());
        }
        self.entries.truncate(EVENT_LOG_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RaceEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot of a race between two ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    pub lanes: Vec<Lane>,
    /// Rank handed to the next horse to finish.
    pub next_rank: u32,
    /// Ticks elapsed since the start.
    pub clock: u32,
    pub log: EventLog,
}

impl RaceState {
    pub fn new(lane_count: usize) -> Self {
        Self {
            lanes: vec![Lane::default(); lane_count],
            next_rank: 1,
            clock: 0,
            log: EventLog::default(),
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// True once every lane has crossed the line.
    pub fn is_complete(&self) -> bool {
        self.lanes.iter().all(|lane| lane.finished)
    }

    pub fn finished_count(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.finished).count()
    }
}

/// Cells moved this tick for a movement roll against `move_chance`.
///
/// Each threshold overwrites the previous result rather than adding to it, so
/// whichever check is satisfied last decides the distance.
pub fn movement_distance(roll: f64, move_chance: f64) -> u32 {
    let mut distance = 0;
    if roll < move_chance * MOVE_ONE_THRESHOLD {
        distance = 1;
    }
    if roll < move_chance * MOVE_TWO_THRESHOLD {
        distance = 2;
    }
    if roll < move_chance * MOVE_THREE_THRESHOLD {
        distance = 3;
    }
    distance
}

/// Fatigue penalty in `[0, FATIGUE_CAP]`, scaled down by endurance.
#[inline]
pub fn fatigue_factor(fatigue: f64, endurance: f64) -> f64 {
    (fatigue / (endurance * FATIGUE_ENDURANCE_SCALE)).min(FATIGUE_CAP)
}

/// Advance the race by one tick.
///
/// Moves every unfinished lane, ranks the lanes that crossed the line during
/// this tick (furthest first, lower lane index on ties), folds the new events
/// into the log and bumps the clock. Returns the next snapshot together with
/// the events generated this tick.
///
/// Draw order per unfinished lane: fatigue step, movement roll, sprint check,
/// sprint size (only when sprinting), slow-terrain roll (only on difficult
/// terrain when the horse did not move).
pub fn advance<D: Dice + ?Sized>(
    mut state: RaceState,
    horses: &[Horse],
    track: &Track,
    dice: &mut D,
) -> (RaceState, Vec<RaceEvent>) {
    debug_assert_eq!(state.lanes.len(), horses.len());

    let finish_line = track.len() as f64;
    let mut events = Vec::new();
    let mut finishers: Vec<LaneIndex> = Vec::new();

    for (idx, (lane, horse)) in state.lanes.iter_mut().zip(horses).enumerate() {
        if lane.finished {
            continue;
        }

        let fatigue_penalty = fatigue_factor(lane.fatigue, horse.endurance);
        lane.fatigue += FATIGUE_STEP_MIN + dice.roll() * FATIGUE_STEP_SPREAD;

        let terrain = track.factor_at(lane.position);
        let move_chance = horse.base_speed * (1.0 - fatigue_penalty) * terrain;
        let mut distance = movement_distance(dice.roll(), move_chance);

        if dice.roll() < horse.burst_chance {
            let bonus = (horse.burst_power * dice.roll()).ceil() as u32;
            distance += bonus;
            events.push(RaceEvent::Sprint {
                lane: idx,
                name: horse.name.clone(),
                bonus,
            });
        }

        lane.position += f64::from(distance);

        if terrain < SLOW_TERRAIN_BELOW
            && distance == 0
            && dice.roll() < SLOW_TERRAIN_EVENT_CHANCE
        {
            events.push(RaceEvent::SlowedByTerrain {
                lane: idx,
                name: horse.name.clone(),
            });
        }
        if terrain > GOOD_TERRAIN_ABOVE && distance >= 2 {
            events.push(RaceEvent::GoodTerrain {
                lane: idx,
                name: horse.name.clone(),
            });
        }

        if lane.position >= finish_line {
            lane.finished = true;
            finishers.push(idx);
        }
    }

    finishers.sort_by(|&a, &b| {
        state.lanes[b]
            .position
            .total_cmp(&state.lanes[a].position)
            .then_with(|| a.cmp(&b))
    });

    for idx in finishers {
        let lane = &mut state.lanes[idx];
        if lane.rank.is_some() {
            continue;
        }
        let rank = state.next_rank;
        lane.rank = Some(rank);
        state.next_rank += 1;
        info!(
            "{} finished in place {} at position {}",
            horses[idx].name, rank, lane.position
        );
        events.push(RaceEvent::Finished {
            lane: idx,
            name: horses[idx].name.clone(),
            rank,
        });
    }

    for event in &events {
        debug!("tick {}: {}", state.clock + 1, event);
    }

    state.log.record(&events);
    state.clock += 1;

    (state, events)
}

/// Run a race from the start line until every lane has finished.
pub fn run_to_completion<D: Dice + ?Sized>(
    horses: &[Horse],
    track: &Track,
    dice: &mut D,
) -> RaceState {
    let mut state = RaceState::new(horses.len());
    while !state.is_complete() {
        state = advance(state, horses, track, dice).0;
    }
    info!("Race complete after {} ticks", state.clock);
    state
}

/// Headless entry point for JavaScript callers.
///
/// Runs a full race with pool names on a fresh track and returns the final
/// standings, or an error message if the participant count is out of range.
#[wasm_bindgen]
pub fn simulate_race(participants: usize) -> JsValue {
    let mut rng = rand::rng();
    let horses = match horses::generate_horses(participants, &[], &[], &mut rng) {
        Ok(h) => h,
        Err(e) => {
            return serde_wasm_bindgen::to_value(&format!("Simulation failed: {}", e))
                .unwrap_or(JsValue::NULL);
        }
    };
    let track = Track::generate(&mut rng);
    let state = run_to_completion(&horses, &track, &mut rng);
    let standings = results::standings(&state, &horses);
    serde_wasm_bindgen::to_value(&standings).unwrap_or(JsValue::NULL)
}
