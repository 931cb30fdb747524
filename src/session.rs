//! Race session: everything the UI shell needs to drive a race, minus rendering.
//!
//! The session owns the participant count, per-lane overrides, the roster,
//! the track and the current race snapshot, and tracks which dialog is open.

use crate::config::DEFAULT_LANES;
use crate::horses::{generate_horses, random_names};
use crate::results::{last_places, standings, Standing};
use crate::{advance, validate_lane_count, Dice, Horse, LaneIndex, RaceError, RaceEvent};
use crate::{RaceState, Track};
use log::{info, warn};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Idle,
    Racing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    None,
    Participants,
    Setup,
    LastPlace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    participants: usize,
    status: RaceStatus,
    dialog: Dialog,
    custom_names: Vec<String>,
    custom_images: Vec<String>,
    horses: Vec<Horse>,
    track: Track,
    race: RaceState,
    standings: Vec<Standing>,
    last_places: Vec<Standing>,
}

impl Session {
    /// Fresh session asking for the participant count.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            participants: DEFAULT_LANES,
            status: RaceStatus::Idle,
            dialog: Dialog::Participants,
            custom_names: vec![String::new(); DEFAULT_LANES],
            custom_images: vec![String::new(); DEFAULT_LANES],
            horses: Vec::new(),
            track: Track::generate(rng),
            race: RaceState::new(DEFAULT_LANES),
            standings: Vec::new(),
            last_places: Vec::new(),
        }
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn is_racing(&self) -> bool {
        self.status == RaceStatus::Racing
    }

    pub fn custom_names(&self) -> &[String] {
        &self.custom_names
    }

    pub fn custom_images(&self) -> &[String] {
        &self.custom_images
    }

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn race(&self) -> &RaceState {
        &self.race
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn last_places(&self) -> &[Standing] {
        &self.last_places
    }

    fn ensure_not_racing(&self) -> Result<(), RaceError> {
        if self.is_racing() {
            warn!("Rejected configuration change during a race");
            return Err(RaceError::RaceInProgress);
        }
        Ok(())
    }

    fn clear_overrides(&mut self) {
        self.custom_names = vec![String::new(); self.participants];
        self.custom_images = vec![String::new(); self.participants];
    }

    /// Accept a participant count, reset every lane and move on to setup.
    pub fn confirm_participants(&mut self, count: usize) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        let count = validate_lane_count(count).inspect_err(|e| warn!("{}", e))?;

        info!("Participants set to {}", count);
        self.participants = count;
        self.clear_overrides();
        self.horses.clear();
        self.race = RaceState::new(count);
        self.standings.clear();
        self.last_places.clear();
        self.status = RaceStatus::Idle;
        self.dialog = Dialog::Setup;
        Ok(())
    }

    fn check_lane(&self, lane: LaneIndex) -> Result<(), RaceError> {
        if lane < self.participants {
            Ok(())
        } else {
            Err(RaceError::LaneOutOfRange {
                lane,
                lanes: self.participants,
            })
        }
    }

    pub fn set_name(&mut self, lane: LaneIndex, name: &str) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        self.check_lane(lane)?;
        self.custom_names[lane] = name.to_string();
        Ok(())
    }

    pub fn set_image(&mut self, lane: LaneIndex, url: &str) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        self.check_lane(lane)?;
        self.custom_images[lane] = url.to_string();
        Ok(())
    }

    /// Fill every name override from the shuffled pool.
    pub fn randomize_names<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        self.custom_names = random_names(self.participants, rng);
        Ok(())
    }

    /// Open the setup dialog; after a finished race the overrides start blank.
    pub fn open_setup(&mut self) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        if self.status == RaceStatus::Finished {
            self.clear_overrides();
        }
        self.dialog = Dialog::Setup;
        Ok(())
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    /// Back to choosing how many horses race.
    pub fn change_participants(&mut self) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        self.status = RaceStatus::Idle;
        self.dialog = Dialog::Participants;
        Ok(())
    }

    /// Draw a roster and a new track, reset the snapshot and start racing.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RaceError> {
        self.ensure_not_racing()?;
        let horses = generate_horses(
            self.participants,
            &self.custom_names,
            &self.custom_images,
            rng,
        )?;

        self.horses = horses;
        self.track = Track::generate(rng);
        self.race = RaceState::new(self.participants);
        self.standings.clear();
        self.last_places.clear();
        self.status = RaceStatus::Racing;
        self.dialog = Dialog::None;
        info!(
            "Race started with {} horses: {}",
            self.participants,
            self.horses
                .iter()
                .map(|h| h.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(())
    }

    /// Advance one tick. When the last horse crosses the line the session
    /// moves to `Finished`, fills the results and opens the last-place dialog.
    pub fn tick<D: Dice + ?Sized>(&mut self, dice: &mut D) -> Result<Vec<RaceEvent>, RaceError> {
        if !self.is_racing() {
            return Err(RaceError::NotRacing);
        }

        let current = std::mem::replace(&mut self.race, RaceState::new(0));
        let (next, events) = advance(current, &self.horses, &self.track, dice);
        self.race = next;

        if self.race.is_complete() {
            self.status = RaceStatus::Finished;
            self.standings = standings(&self.race, &self.horses);
            self.last_places = last_places(&self.race, &self.horses);
            self.dialog = Dialog::LastPlace;
            info!(
                "Race over after {} ticks, winner: {}",
                self.race.clock,
                self.standings
                    .first()
                    .map(|s| s.name.as_str())
                    .unwrap_or("-")
            );
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ready(count: usize, seed: u64) -> (Session, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new(&mut rng);
        session.confirm_participants(count).unwrap();
        (session, rng)
    }

    fn finish(session: &mut Session, rng: &mut StdRng) {
        while session.is_racing() {
            session.tick(rng).unwrap();
        }
    }

    #[test]
    fn new_session_asks_for_participants() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = Session::new(&mut rng);
        assert_eq!(session.dialog(), Dialog::Participants);
        assert_eq!(session.status(), RaceStatus::Idle);
        assert_eq!(session.participants(), DEFAULT_LANES);
    }

    #[test]
    fn invalid_participant_count_is_rejected_before_racing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = Session::new(&mut rng);
        assert_eq!(
            session.confirm_participants(10),
            Err(RaceError::ParticipantCount { requested: 10 })
        );
        assert_eq!(session.participants(), DEFAULT_LANES);
        assert_eq!(session.dialog(), Dialog::Participants);
    }

    #[test]
    fn changing_participants_resets_lanes_and_overrides() {
        let (mut session, _) = ready(4, 1);
        session.set_name(2, "Rocket").unwrap();
        session.confirm_participants(3).unwrap();

        assert_eq!(session.race().lane_count(), 3);
        assert_eq!(session.custom_names(), &["", "", ""]);
        assert_eq!(session.dialog(), Dialog::Setup);
    }

    #[test]
    fn overrides_outside_the_field_are_rejected() {
        let (mut session, _) = ready(2, 1);
        assert_eq!(
            session.set_image(2, "x.png"),
            Err(RaceError::LaneOutOfRange { lane: 2, lanes: 2 })
        );
    }

    #[test]
    fn start_uses_overrides_and_resets_state() {
        let (mut session, mut rng) = ready(3, 2);
        session.set_name(0, "Rocket").unwrap();
        session.set_image(0, "https://example.com/r.png").unwrap();
        session.start(&mut rng).unwrap();

        assert!(session.is_racing());
        assert_eq!(session.dialog(), Dialog::None);
        assert_eq!(session.horses()[0].name, "Rocket");
        assert_eq!(session.horses()[0].image_url, "https://example.com/r.png");
        assert_eq!(session.race().clock, 0);
        assert_eq!(session.race().next_rank, 1);
    }

    #[test]
    fn configuration_is_locked_while_racing() {
        let (mut session, mut rng) = ready(2, 3);
        session.start(&mut rng).unwrap();

        assert_eq!(session.set_name(0, "x"), Err(RaceError::RaceInProgress));
        assert_eq!(session.open_setup(), Err(RaceError::RaceInProgress));
        assert_eq!(
            session.confirm_participants(5),
            Err(RaceError::RaceInProgress)
        );
        assert_eq!(session.start(&mut rng), Err(RaceError::RaceInProgress));
    }

    #[test]
    fn tick_requires_a_running_race() {
        let (mut session, mut rng) = ready(2, 4);
        assert_eq!(session.tick(&mut rng), Err(RaceError::NotRacing));
    }

    #[test]
    fn finished_race_fills_results_and_opens_last_place() {
        let (mut session, mut rng) = ready(5, 5);
        session.start(&mut rng).unwrap();
        finish(&mut session, &mut rng);

        assert_eq!(session.status(), RaceStatus::Finished);
        assert_eq!(session.dialog(), Dialog::LastPlace);
        let ranks: Vec<u32> = session.standings().iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        let bottom: Vec<u32> = session.last_places().iter().map(|s| s.rank).collect();
        assert_eq!(bottom, vec![5, 4]);
        assert_eq!(session.tick(&mut rng), Err(RaceError::NotRacing));
    }

    #[test]
    fn new_race_after_finish_clears_overrides() {
        let (mut session, mut rng) = ready(2, 6);
        session.set_name(1, "Comet").unwrap();
        session.start(&mut rng).unwrap();
        finish(&mut session, &mut rng);

        session.close_dialog();
        session.open_setup().unwrap();
        assert_eq!(session.custom_names(), &["", ""]);
        assert_eq!(session.dialog(), Dialog::Setup);
    }

    #[test]
    fn replays_draw_a_new_track() {
        let (mut session, mut rng) = ready(1, 7);
        session.start(&mut rng).unwrap();
        let first = session.track().clone();
        finish(&mut session, &mut rng);
        session.start(&mut rng).unwrap();
        assert_ne!(&first, session.track());
    }

    #[test]
    fn random_names_cover_every_lane() {
        let (mut session, mut rng) = ready(9, 8);
        session.randomize_names(&mut rng).unwrap();
        assert!(session.custom_names().iter().all(|n| !n.is_empty()));
    }
}
