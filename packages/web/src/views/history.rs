use dioxus::prelude::*;
use ui::views::HistoryView;

use crate::{HistoryParams, Route};

#[component]
pub fn MoodHistory(query: HistoryParams) -> Element {
    let nav = use_navigator();

    rsx! {
        HistoryView {
            query: query.0,
            on_home: move |_| {
                nav.push(Route::Landing {});
            },
        }
    }
}
