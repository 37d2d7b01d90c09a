use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use meshplanner_shared::form::FormState;
use meshplanner_shared::models::Coordinate;
use meshplanner_shared::predict::{run_prediction, Trigger, TriggerState};

use crate::api::HttpPredictor;
use crate::components::about_dialog::AboutDialog;
use crate::components::color_bar::ColorBar;
use crate::components::controls::ControlsPanel;
use crate::components::map_view::{MapView, SessionHandle};

/// Top-left corner of the floating controls panel, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub left: f64,
    pub top: f64,
}

const INITIAL_PANEL_POSITION: PanelPosition = PanelPosition {
    left: 56.0,
    top: 12.0,
};

/// Pointer and panel positions captured when a header drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelDrag {
    pointer: (f64, f64),
    origin: PanelPosition,
}

/// Move the panel by however far the pointer has travelled since the drag began.
fn dragged_position(drag: &PanelDrag, pointer: (f64, f64)) -> PanelPosition {
    PanelPosition {
        left: drag.origin.left + (pointer.0 - drag.pointer.0),
        top: drag.origin.top + (pointer.1 - drag.pointer.1),
    }
}

/// The run button's state signal, driven by the prediction's trigger guard.
struct RunButton(Signal<TriggerState>);

impl Trigger for RunButton {
    fn set_state(&mut self, state: TriggerState) {
        self.0.set(state);
    }
}

#[component]
pub fn Planner() -> Element {
    let mut form = use_signal(FormState::default);
    let trigger = use_signal(TriggerState::default);
    let mut show_about = use_signal(|| false);
    let mut panel = use_signal(|| INITIAL_PANEL_POSITION);
    let mut drag = use_signal(|| None::<PanelDrag>);
    let session = use_hook(SessionHandle::default);

    let run_session = session.clone();
    let pos = *panel.read();

    rsx! {
        div {
            class: "app",

            onmousemove: move |evt: Event<MouseData>| {
                let Some(active) = *drag.read() else { return };
                let client = evt.client_coordinates();
                panel.set(dragged_position(&active, (client.x, client.y)));
            },

            onmouseup: move |_| drag.set(None),

            MapView {
                session: session.clone(),
                on_select: move |coordinate: Coordinate| form.write().set_coordinate(coordinate),
            }

            div {
                class: "controls",
                style: "left: {pos.left}px; top: {pos.top}px;",

                div {
                    class: "controls-header",
                    onmousedown: move |evt: Event<MouseData>| {
                        if evt.trigger_button() != Some(MouseButton::Primary) {
                            return;
                        }
                        let client = evt.client_coordinates();
                        drag.set(Some(PanelDrag {
                            pointer: (client.x, client.y),
                            origin: *panel.read(),
                        }));
                    },
                    h1 { "Meshtastic Coverage Planner" }
                    button {
                        class: "secondary",
                        onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                        onclick: move |_| show_about.set(true),
                        "About"
                    }
                }

                ControlsPanel {
                    form: form,
                    trigger: trigger,
                    on_run: move |_| {
                        if trigger.peek().disabled {
                            return;
                        }
                        let submitted = form.peek().clone();
                        let session = run_session.clone();
                        spawn(async move {
                            let predictor = HttpPredictor::default();
                            // Failures are logged inside; the map is left as it was.
                            let _ = run_prediction(&predictor, RunButton(trigger), &submitted, |collection| {
                                // Sensitivity is read when the response arrives, not at submit time
                                let threshold = form.peek().rssi_threshold();
                                session.with(|s| s.render(collection, threshold)).unwrap_or(0)
                            })
                            .await;
                        });
                    },
                }

                ColorBar {}
            }

            AboutDialog { show: show_about }
        }
    }
}
