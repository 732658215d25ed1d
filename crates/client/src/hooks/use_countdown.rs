use chrono::{Local, NaiveDateTime};
use dioxus::prelude::*;
use eventnow_core::timer::sleep_ms;
use eventnow_shared::TimeLeft;

/// Time left until `target`, ticking once a second. `None` once it passed.
/// The ticking task belongs to the component and stops when it unmounts.
pub fn use_countdown(target: NaiveDateTime) -> Signal<Option<TimeLeft>> {
    let mut left = use_signal(|| TimeLeft::until(target, Local::now().naive_local()));

    use_future(move || async move {
        loop {
            sleep_ms(1_000).await;
            let next = TimeLeft::until(target, Local::now().naive_local());
            let done = next.is_none();
            left.set(next);
            if done {
                break;
            }
        }
    });

    left
}
