use dioxus::prelude::*;
use ui::views::LandingView;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    let nav = use_navigator();

    rsx! {
        LandingView {
            on_start: move |_| {
                nav.push(Route::Scan {});
            },
        }
    }
}
