use dioxus::prelude::*;
use meshplanner_shared::form::FormState;
use meshplanner_shared::predict::TriggerState;
use meshplanner_shared::regions::REGIONS;

#[component]
fn NumericInput(
    id: &'static str,
    label: &'static str,
    value: String,
    #[props(default)] disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { r#for: id, "{label}" }
            input {
                id: id,
                r#type: "number",
                step: "any",
                value: "{value}",
                disabled: disabled,
                oninput: move |evt: Event<FormData>| on_change.call(evt.value()),
            }
        }
    }
}

#[component]
pub fn ControlsPanel(
    mut form: Signal<FormState>,
    trigger: Signal<TriggerState>,
    on_run: EventHandler<()>,
) -> Element {
    let current = form.read().clone();
    let run_state = *trigger.read();
    let locked = current.override_inputs_disabled();

    rsx! {
        div { class: "controls-body",
            div { class: "panel",
                h3 { "Transmitter" }
                div { class: "field-row",
                    NumericInput {
                        id: "lat",
                        label: "Latitude",
                        value: current.lat.clone(),
                        on_change: move |v| form.write().lat = v,
                    }
                    NumericInput {
                        id: "lng",
                        label: "Longitude",
                        value: current.lng.clone(),
                        on_change: move |v| form.write().lng = v,
                    }
                }
                div { class: "field-row",
                    NumericInput {
                        id: "height",
                        label: "Height (m)",
                        value: current.height.clone(),
                        on_change: move |v| form.write().height = v,
                    }
                    NumericInput {
                        id: "gain",
                        label: "Gain (dB)",
                        value: current.gain.clone(),
                        on_change: move |v| form.write().gain = v,
                    }
                }
                div { class: "field",
                    label { r#for: "region", "Region" }
                    select {
                        id: "region",
                        "aria-label": "Select LoRa region",
                        value: "{current.region}",
                        onchange: move |evt: Event<FormData>| {
                            form.write().set_region(&evt.value());
                        },
                        for r in REGIONS {
                            option {
                                value: r.code,
                                selected: current.region == r.code,
                                "{r.code} ({r.frequency_mhz} MHz)"
                            }
                        }
                    }
                }
            }

            div { class: "panel",
                h3 { "Receiver" }
                div { class: "field-row",
                    NumericInput {
                        id: "rx_height",
                        label: "Height (m)",
                        value: current.rx_height.clone(),
                        on_change: move |v| form.write().rx_height = v,
                    }
                    NumericInput {
                        id: "rx_gain",
                        label: "Gain (dB)",
                        value: current.rx_gain.clone(),
                        on_change: move |v| form.write().rx_gain = v,
                    }
                }
            }

            div { class: "panel",
                div { class: "override-row",
                    input {
                        id: "override-checkbox",
                        r#type: "checkbox",
                        checked: current.override_enabled,
                        onchange: move |evt: Event<FormData>| form.write().set_override(evt.checked()),
                    }
                    label { r#for: "override-checkbox", "Override radio parameters" }
                }
                div { class: "field-row",
                    NumericInput {
                        id: "tx_power",
                        label: "Tx power (dBm)",
                        value: current.tx_power.clone(),
                        disabled: locked,
                        on_change: move |v| form.write().tx_power = v,
                    }
                    NumericInput {
                        id: "frequency",
                        label: "Frequency (MHz)",
                        value: current.frequency.clone(),
                        disabled: locked,
                        on_change: move |v| form.write().frequency = v,
                    }
                }
                div { class: "field-row",
                    NumericInput {
                        id: "additional_loss",
                        label: "Extra loss (dB)",
                        value: current.additional_loss.clone(),
                        on_change: move |v| form.write().additional_loss = v,
                    }
                    NumericInput {
                        id: "rx_sensitivity",
                        label: "Rx sensitivity (dBm)",
                        value: current.rx_sensitivity.clone(),
                        on_change: move |v| form.write().rx_sensitivity = v,
                    }
                }
            }

            button {
                id: "run-model",
                class: "run",
                disabled: run_state.disabled,
                onclick: move |_| on_run.call(()),
                "{run_state.label}"
            }
        }
    }
}
