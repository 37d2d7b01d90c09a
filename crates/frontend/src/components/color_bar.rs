use dioxus::prelude::*;
use meshplanner_shared::color::{self, RSSI_MAX, RSSI_MIN};

/// Legend for the coverage colors. The gradient is computed once per mount.
#[component]
pub fn ColorBar() -> Element {
    let gradient = use_hook(color::legend_gradient);

    rsx! {
        div { class: "legend",
            div {
                id: "color-bar",
                class: "color-bar",
                style: "background: {gradient};",
            }
            div { class: "legend-labels",
                span { "{RSSI_MIN} dBm" }
                span { "{RSSI_MAX} dBm" }
            }
        }
    }
}
