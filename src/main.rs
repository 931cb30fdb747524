//! Main module for the horse race UI using Yew.
//! Wires the race session, the tick timer and the dialogs together.

use horse_race::config::{TICK_MS, TRACK_DOT};
use horse_race::session::{Dialog, RaceStatus, Session};
use horse_race::LaneIndex;
use log::{debug, warn};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;
mod utils;

use components::{
    EventFeed, LaneRow, LastPlaceDialog, ParticipantsDialog, ResultsBoard, SetupDialog,
};
use hooks::use_interval;
use utils::format_race_clock;

// ──────────────────────────────────────────────────────────────────────────────
// Session store

enum Action {
    ConfirmParticipants(usize),
    SetName(LaneIndex, String),
    SetImage(LaneIndex, String),
    RandomizeNames,
    OpenSetup,
    CloseDialog,
    Start,
    Tick,
    ChangeParticipants,
}

/// Reducer state: the session plus the last rejected action, if any.
#[derive(Clone, PartialEq)]
struct SessionStore {
    session: Session,
    error: Option<String>,
}

impl Reducible for SessionStore {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        // Ticks that land after the race has ended are dropped.
        if matches!(action, Action::Tick) && !self.session.is_racing() {
            return self;
        }

        let mut next = (*self).clone();
        let mut rng = rand::rng();
        let outcome = match action {
            Action::ConfirmParticipants(count) => next.session.confirm_participants(count),
            Action::SetName(lane, name) => next.session.set_name(lane, &name),
            Action::SetImage(lane, url) => next.session.set_image(lane, &url),
            Action::RandomizeNames => next.session.randomize_names(&mut rng),
            Action::OpenSetup => next.session.open_setup(),
            Action::CloseDialog => {
                next.session.close_dialog();
                Ok(())
            }
            Action::Start => next.session.start(&mut rng),
            Action::Tick => next.session.tick(&mut rng).map(|events| {
                debug!("tick produced {} events", events.len());
            }),
            Action::ChangeParticipants => next.session.change_participants(),
        };

        next.error = match outcome {
            Ok(()) => None,
            Err(e) => {
                warn!("{}", e);
                Some(e.to_string())
            }
        };
        Rc::new(next)
    }
}

/// Callback that ignores its argument and dispatches a fixed action.
fn send<IN: 'static>(store: &UseReducerHandle<SessionStore>, make: fn() -> Action) -> Callback<IN> {
    let dispatcher = store.dispatcher();
    Callback::from(move |_: IN| dispatcher.dispatch(make()))
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(|| SessionStore {
        session: Session::new(&mut rand::rng()),
        error: None,
    });
    let session = &store.session;

    // Drive the race while it runs; the interval is cancelled as soon as it stops.
    {
        let dispatcher = store.dispatcher();
        use_interval(
            session.is_racing(),
            TICK_MS,
            Callback::from(move |_| dispatcher.dispatch(Action::Tick)),
        );
    }

    let close_dialog: Callback<()> = send(&store, || Action::CloseDialog);
    let open_setup: Callback<MouseEvent> = send(&store, || Action::OpenSetup);
    let change_participants: Callback<MouseEvent> = send(&store, || Action::ChangeParticipants);
    let randomize: Callback<()> = send(&store, || Action::RandomizeNames);
    let start: Callback<()> = send(&store, || Action::Start);

    let confirm_participants = {
        let dispatcher = store.dispatcher();
        Callback::from(move |count: usize| dispatcher.dispatch(Action::ConfirmParticipants(count)))
    };
    let on_name = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(lane, name): (LaneIndex, String)| {
            dispatcher.dispatch(Action::SetName(lane, name))
        })
    };
    let on_image = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(lane, url): (LaneIndex, String)| {
            dispatcher.dispatch(Action::SetImage(lane, url))
        })
    };

    let race = session.race();
    let track = Rc::new(session.track().clone());
    let finished = session.status() == RaceStatus::Finished;
    let events: Vec<String> = race.log.iter().map(|e| e.to_string()).collect();

    html! {
        <div class="container">
            <h1>{ "HORSE RACE" }</h1>
            if session.is_racing() {
                <div class="race-clock">{ format!("Time: {}", format_race_clock(race.clock)) }</div>
            }

            <div class="track">
                { for session.horses().iter().zip(race.lanes.iter()).enumerate().map(|(i, (horse, lane))| html! {
                    <LaneRow
                        key={i.to_string()}
                        horse={horse.clone()}
                        lane={lane.clone()}
                        track={track.clone()}
                    />
                }) }
            </div>

            <EventFeed {events} />
            if finished {
                <ResultsBoard standings={session.standings().to_vec()} />
            }

            <div class="legend">
                { "Track legend: " }
                <span class="cell-difficult">{ TRACK_DOT }</span>{ " difficult terrain, " }
                <span class="cell-favorable">{ TRACK_DOT }</span>{ " favorable terrain" }
            </div>

            if let Some(err) = &store.error {
                <div class="current-error">{ err.clone() }</div>
            }

            <div class="controls">
                <button class="btn-primary" disabled={session.is_racing()} onclick={open_setup}>
                    { if finished { "New Race" } else { "Configure Race" } }
                </button>
                if finished {
                    <button class="btn-secondary" onclick={change_participants}>
                        { "Change Participants" }
                    </button>
                }
            </div>

            <ParticipantsDialog
                open={session.dialog() == Dialog::Participants}
                current={session.participants()}
                on_confirm={confirm_participants}
                on_close={close_dialog.clone()}
            />
            <SetupDialog
                open={session.dialog() == Dialog::Setup}
                participants={session.participants()}
                names={session.custom_names().to_vec()}
                images={session.custom_images().to_vec()}
                {on_name}
                {on_image}
                on_randomize={randomize}
                on_start={start}
                on_close={close_dialog.clone()}
            />
            <LastPlaceDialog
                open={session.dialog() == Dialog::LastPlace}
                finishers={session.last_places().to_vec()}
                on_close={close_dialog}
            />
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
