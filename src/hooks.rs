use gloo_timers::callback::Interval;
use yew::prelude::*;

/// Fire `on_tick` every `period_ms` while `active` is true.
///
/// The interval is dropped (and so cancelled) when `active` turns false, when
/// the period changes, or when the component unmounts.
#[hook]
pub fn use_interval(active: bool, period_ms: u32, on_tick: Callback<()>) {
    use_effect_with((active, period_ms), move |&(active, period_ms)| {
        let interval = active.then(|| Interval::new(period_ms, move || on_tick.emit(())));
        move || drop(interval)
    });
}
