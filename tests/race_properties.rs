use horse_race::config::{EVENT_LOG_CAPACITY, MAX_LANES, TRACK_LENGTH};
use horse_race::horses::generate_horses;
use horse_race::results::{last_places, standings};
use horse_race::session::{RaceStatus, Session};
use horse_race::{advance, RaceState, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Step a seeded race to the end, checking per-tick invariants along the way.
fn run_checked(lanes: usize, seed: u64) -> RaceState {
    let mut rng = StdRng::seed_from_u64(seed);
    let horses = generate_horses(lanes, &[], &[], &mut rng).unwrap();
    let track = Track::generate(&mut rng);
    let mut state = RaceState::new(lanes);

    while !state.is_complete() {
        let before = state.clone();
        let (next, events) = advance(state, &horses, &track, &mut rng);

        assert_eq!(next.clock, before.clock + 1);
        for (prev, lane) in before.lanes.iter().zip(&next.lanes) {
            assert!(lane.position >= prev.position);
            assert!(lane.fatigue >= prev.fatigue);
            if prev.finished {
                assert!(lane.finished);
                assert_eq!(lane.rank, prev.rank);
                assert_eq!(lane.fatigue, prev.fatigue);
            }
            assert_eq!(lane.finished, lane.rank.is_some());
            if lane.finished {
                assert!(lane.position >= TRACK_LENGTH as f64);
            }
        }

        assert!(next.log.len() <= EVENT_LOG_CAPACITY);
        let newest: Vec<_> = next.log.iter().take(events.len()).cloned().collect();
        let expected: Vec<_> = events.iter().take(EVENT_LOG_CAPACITY).cloned().collect();
        assert_eq!(newest, expected);

        state = next;
    }
    state
}

#[test]
fn invariants_hold_for_every_field_size() {
    for lanes in 1..=MAX_LANES {
        for seed in 0..20 {
            let state = run_checked(lanes, seed * 31 + lanes as u64);

            let mut ranks: Vec<u32> = state.lanes.iter().filter_map(|l| l.rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, (1..=lanes as u32).collect::<Vec<_>>());
            assert_eq!(state.next_rank, lanes as u32 + 1);
        }
    }
}

#[test]
fn last_place_summary_size_follows_field_size() {
    for lanes in 1..=MAX_LANES {
        let mut rng = StdRng::seed_from_u64(lanes as u64);
        let horses = generate_horses(lanes, &[], &[], &mut rng).unwrap();
        let state = run_checked(lanes, 500 + lanes as u64);

        let table = standings(&state, &horses);
        let bottom = last_places(&state, &horses);

        assert_eq!(table.len(), lanes);
        assert_eq!(bottom.len(), lanes.min(2));
        assert_eq!(bottom[0].rank, lanes as u32);
        assert_eq!(bottom[0].lane, table[lanes - 1].lane);
    }
}

#[test]
fn session_plays_back_to_back_races() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut session = Session::new(&mut rng);
    session.confirm_participants(MAX_LANES).unwrap();

    for _ in 0..3 {
        session.start(&mut rng).unwrap();
        let mut ticks = 0;
        while session.status() == RaceStatus::Racing {
            session.tick(&mut rng).unwrap();
            ticks += 1;
        }
        assert_eq!(session.race().clock, ticks);
        assert_eq!(session.standings().len(), MAX_LANES);
        assert_eq!(session.last_places().len(), 2);
        session.close_dialog();
        session.open_setup().unwrap();
    }
}
