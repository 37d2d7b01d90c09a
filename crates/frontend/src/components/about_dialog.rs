use dioxus::prelude::*;

#[component]
pub fn AboutDialog(mut show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "about-backdrop",
            onclick: move |_| show.set(false),

            div {
                id: "about-dialog",
                class: "about-dialog",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "About" }

                div { class: "about-section",
                    p { "Meshtastic Coverage Planner estimates where a Meshtastic node can be heard. Pick a transmitter site by clicking the map or using " b { "My Location" } ", adjust the antenna heights and gains, then press " b { "Run Model" } "." }
                }

                div { class: "about-section",
                    h3 { "How the prediction works" }
                    p { "The prediction service runs the Irregular Terrain Model (ITM) over SRTM elevation data around the transmitter and reports a predicted signal strength (RSSI, in dBm) for each hexagonal H3 cell at resolution 8." }
                    p { "Cells at or below the receiver sensitivity are hidden. The remaining cells are colored from dark purple (-140 dBm) to yellow (-90 dBm); hover a cell to see its value." }
                }

                div { class: "about-section",
                    h3 { "Radio parameters" }
                    p { "By default the region's LoRa frequency and transmit power are used. Enable " b { "Override radio parameters" } " to set transmit power and frequency yourself, and to include additional losses such as cable loss." }
                }

                div { class: "about-section",
                    h3 { "Limitations" }
                    p { "Predictions are a model, not a measurement. Buildings and vegetation are not taken into account." }
                }

                button {
                    class: "close-about",
                    onclick: move |_| show.set(false),
                    "Close"
                }
            }
        }
    }
}
