//! Yew view components for the race UI.
//!
//! Everything here renders from props; the only local state is dialog form
//! input and the image-failed flag on avatars.

use crate::utils::{looks_like_image_ref, marker_cell, ordinal, validate_participant_count};
use horse_race::config::{HORSE_GLYPH, MAX_LANES, MIN_LANES, TRACK_DOT};
use horse_race::results::Standing;
use horse_race::{Horse, Lane, Track};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Backdrop + dialog box. Clicking the backdrop or pressing Escape closes it.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return Html::default();
    }

    let on_backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    html! {
        <div class="modal-backdrop" role="presentation" onclick={on_backdrop}>
            <div
                class={classes!("modal", props.class.clone())}
                role="dialog"
                aria-modal="true"
                tabindex="-1"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                onkeydown={on_keydown}
            >
                <h2 class="modal-title">{ props.title.clone() }</h2>
                if let Some(desc) = &props.description {
                    <p class="modal-description">{ desc.clone() }</p>
                }
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HorseAvatarProps {
    pub name: AttrValue,
    pub image_url: AttrValue,
    #[prop_or_default]
    pub color: AttrValue,
    #[prop_or(AttrValue::Static("avatar"))]
    pub class: AttrValue,
}

/// Horse picture, swapped for the glyph when there is no image or it fails to load.
#[function_component(HorseAvatar)]
pub fn horse_avatar(props: &HorseAvatarProps) -> Html {
    let failed = use_state_eq(|| false);
    {
        let failed = failed.clone();
        use_effect_with(props.image_url.clone(), move |_| {
            failed.set(false);
            || ()
        });
    }

    if props.image_url.is_empty() || *failed {
        return html! {
            <span class={classes!("glyph", props.color.to_string())}>{ HORSE_GLYPH }</span>
        };
    }

    let onerror = {
        let failed = failed.clone();
        Callback::from(move |_: Event| failed.set(true))
    };

    html! {
        <span class={props.class.to_string()}>
            <img src={props.image_url.clone()} alt={props.name.clone()} {onerror} />
        </span>
    }
}

fn avatar_for(horse: &Horse, class: &'static str) -> Html {
    html! {
        <HorseAvatar
            name={horse.name.clone()}
            image_url={horse.image_url.clone()}
            color={horse.color.clone()}
            class={class}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct LaneRowProps {
    pub horse: Horse,
    pub lane: Lane,
    pub track: Rc<Track>,
}

/// One lane: name with a stats tooltip, the terrain rail with the horse on it,
/// and the finishing badge.
#[function_component(LaneRow)]
pub fn lane_row(props: &LaneRowProps) -> Html {
    let horse = &props.horse;
    let lane = &props.lane;
    let marker = marker_cell(lane.position, props.track.len());
    let avatar = avatar_for(horse, "avatar avatar-track");

    let tooltip = format!(
        "Speed: {:.2}\nEndurance: {:.2}\nSprint chance: {:.0}%\nFatigue: {:.1}",
        horse.base_speed,
        horse.endurance,
        horse.burst_chance * 100.0,
        lane.fatigue
    );

    let rail: Html = props
        .track
        .cells()
        .iter()
        .enumerate()
        .map(|(i, terrain)| {
            if marker == Some(i) {
                html! { <span key={i.to_string()} class="cell horse-cell">{ avatar.clone() }</span> }
            } else {
                html! {
                    <span key={i.to_string()} class={classes!("cell", terrain.css_class())}>
                        { TRACK_DOT }
                    </span>
                }
            }
        })
        .collect();

    html! {
        <div class={classes!("lane-row", lane.finished.then_some("lane-finished"))}>
            <span class={classes!("lane-name", horse.color.clone())} title={tooltip}>
                { format!("{}:", horse.name) }
            </span>
            <span class="rail">{ "|" }{ rail }{ "|" }</span>
            if marker.is_none() {
                { avatar }
            }
            if let Some(rank) = lane.rank {
                <span class="badge">{ format!("{} place", ordinal(rank)) }</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EventFeedProps {
    pub events: Vec<String>,
}

#[function_component(EventFeed)]
pub fn event_feed(props: &EventFeedProps) -> Html {
    if props.events.is_empty() {
        return Html::default();
    }
    html! {
        <div class="event-feed">
            <h4>{ "Recent events:" }</h4>
            <ul>
                { for props.events.iter().map(|e| html! { <li>{ e.clone() }</li> }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultsBoardProps {
    pub standings: Vec<Standing>,
}

/// Final standings, winner first.
#[function_component(ResultsBoard)]
pub fn results_board(props: &ResultsBoardProps) -> Html {
    if props.standings.is_empty() {
        return Html::default();
    }
    html! {
        <div class="results">
            <h3>{ "FINAL RESULTS:" }</h3>
            <ul>
                { for props.standings.iter().map(|s| html! {
                    <li key={s.lane.to_string()} class="result-row">
                        <span class="place">{ format!("{} place:", ordinal(s.rank)) }</span>
                        <HorseAvatar
                            name={s.name.clone()}
                            image_url={s.image_url.clone()}
                            color={s.color.clone()}
                            class="avatar avatar-result"
                        />
                        <span class={s.color.clone()}>{ s.name.clone() }</span>
                        <span class="muted">{ format!("(Lane {})", s.lane + 1) }</span>
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LastPlaceDialogProps {
    pub open: bool,
    pub finishers: Vec<Standing>,
    pub on_close: Callback<()>,
}

#[function_component(LastPlaceDialog)]
pub fn last_place_dialog(props: &LastPlaceDialogProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    html! {
        <Modal
            open={props.open}
            title="LAST PLACES!"
            description={Some(AttrValue::Static("They lost, so they pay for the empanadas..."))}
            class={classes!("last-place")}
            on_close={props.on_close.clone()}
        >
            <div class="last-place-grid">
                { for props.finishers.iter().map(|s| html! {
                    <div key={s.lane.to_string()} class="last-place-card">
                        <HorseAvatar
                            name={s.name.clone()}
                            image_url={s.image_url.clone()}
                            color={s.color.clone()}
                            class="avatar avatar-large"
                        />
                        <h3 class={s.color.clone()}>{ s.name.clone() }</h3>
                        <p class="muted">{ format!("Lane {}", s.lane + 1) }</p>
                        <span class="badge">{ format!("{} place", ordinal(s.rank)) }</span>
                    </div>
                }) }
            </div>
            <button class="btn-primary wide" onclick={close}>{ "Close" }</button>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct ParticipantsDialogProps {
    pub open: bool,
    pub current: usize,
    pub on_confirm: Callback<usize>,
    pub on_close: Callback<()>,
}

/// Radio grid for the number of horses.
#[function_component(ParticipantsDialog)]
pub fn participants_dialog(props: &ParticipantsDialogProps) -> Html {
    let choice = use_state(|| props.current.to_string());
    let error = use_state(|| None::<String>);

    let onchange = {
        let choice = choice.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            choice.set(input.value());
            error.set(None);
        })
    };

    let on_continue = {
        let choice = choice.clone();
        let error = error.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| match validate_participant_count(&choice) {
            Ok(count) => on_confirm.emit(count),
            Err(e) => error.set(Some(e)),
        })
    };

    html! {
        <Modal
            open={props.open}
            title="Number of Participants"
            description={Some(AttrValue::from(format!(
                "Choose how many horses will race (maximum {}).", MAX_LANES
            )))}
            on_close={props.on_close.clone()}
        >
            <p class="participants-label">{ format!("{} Participants", *choice) }</p>
            <div class="radio-grid">
                { for (MIN_LANES..=MAX_LANES).map(|n| {
                    let id = format!("option-{}", n);
                    html! {
                        <label key={n.to_string()} for={id.clone()} class="radio-option">
                            <input
                                type="radio"
                                name="participants"
                                id={id}
                                value={n.to_string()}
                                checked={*choice == n.to_string()}
                                onchange={onchange.clone()}
                            />
                            { n.to_string() }
                        </label>
                    }
                }) }
            </div>
            if let Some(err) = &*error {
                <div class="input-error">{ err.clone() }</div>
            }
            <button class="btn-primary wide" onclick={on_continue}>{ "Continue" }</button>
        </Modal>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SetupTab {
    Names,
    Images,
}

#[derive(Properties, PartialEq)]
pub struct SetupDialogProps {
    pub open: bool,
    pub participants: usize,
    pub names: Vec<String>,
    pub images: Vec<String>,
    pub on_name: Callback<(usize, String)>,
    pub on_image: Callback<(usize, String)>,
    pub on_randomize: Callback<()>,
    pub on_start: Callback<()>,
    pub on_close: Callback<()>,
}

/// Per-lane names and images, with a shortcut to fill names at random.
#[function_component(SetupDialog)]
pub fn setup_dialog(props: &SetupDialogProps) -> Html {
    let tab = use_state(|| SetupTab::Names);

    let select_tab = |target: SetupTab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };
    let tab_class = |target: SetupTab| classes!("tab", (*tab == target).then_some("active"));

    let name_rows = (0..props.participants).map(|i| {
        let on_name = props.on_name.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name.emit((i, input.value()));
        });
        html! {
            <div key={i.to_string()} class="form-row">
                <label for={format!("horse-{}", i)}>{ format!("Horse {}", i + 1) }</label>
                <input
                    type="text"
                    id={format!("horse-{}", i)}
                    value={props.names.get(i).cloned().unwrap_or_default()}
                    placeholder={format!("Name of horse {}", i + 1)}
                    {oninput}
                />
            </div>
        }
    });

    let image_rows = (0..props.participants).map(|i| {
        let url = props.images.get(i).cloned().unwrap_or_default();
        let on_image = props.on_image.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_image.emit((i, input.value()));
        });
        let preview = if looks_like_image_ref(&url) {
            html! {
                <HorseAvatar
                    name={format!("Preview {}", i + 1)}
                    image_url={url.trim().to_string()}
                    class="avatar avatar-preview"
                />
            }
        } else {
            html! { <span class="glyph">{ HORSE_GLYPH }</span> }
        };
        html! {
            <div key={i.to_string()} class="form-row">
                <label for={format!("horse-img-{}", i)}>{ format!("Horse {}", i + 1) }</label>
                <input
                    type="text"
                    id={format!("horse-img-{}", i)}
                    value={url.clone()}
                    placeholder="Image URL"
                    {oninput}
                />
                <div class="preview">{ preview }</div>
            </div>
        }
    });

    let randomize = props.on_randomize.reform(|_: MouseEvent| ());
    let start = props.on_start.reform(|_: MouseEvent| ());

    html! {
        <Modal
            open={props.open}
            title="Configure Race"
            description={Some(AttrValue::from(format!(
                "Customize the names and images of the {} horses.", props.participants
            )))}
            on_close={props.on_close.clone()}
        >
            <div class="tabs">
                <button class={tab_class(SetupTab::Names)} onclick={select_tab(SetupTab::Names)}>
                    { "Names" }
                </button>
                <button class={tab_class(SetupTab::Images)} onclick={select_tab(SetupTab::Images)}>
                    { "Images" }
                </button>
            </div>
            <div class="tab-content">
                if *tab == SetupTab::Names {
                    <>
                        { for name_rows }
                        <button class="btn-secondary wide" onclick={randomize}>
                            { "Generate Random Names" }
                        </button>
                    </>
                } else {
                    <>
                        { for image_rows }
                        <p class="hint">
                            { "Enter an image URL for each horse. Leave it empty to use the default picture." }
                        </p>
                    </>
                }
            </div>
            <button class="btn-primary" onclick={start}>{ "Start Race!" }</button>
        </Modal>
    }
}
