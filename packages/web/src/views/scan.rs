use dioxus::prelude::*;
use mood::Identity;
use ui::views::ScanView;

use crate::{HistoryParams, Route};

#[component]
pub fn Scan() -> Element {
    let nav = use_navigator();

    let on_recorded = move |identity: Identity| {
        nav.push(Route::MoodHistory {
            query: HistoryParams(identity.into()),
        });
    };

    rsx! {
        ScanView { on_recorded }
    }
}
