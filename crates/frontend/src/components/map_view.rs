use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::StreamExt;
use meshplanner_shared::models::Coordinate;
use meshplanner_shared::session::CoverageSession;

use crate::leaflet::{self, LeafletSurface, MAP_ELEMENT_ID};

/// Shared handle to the page's coverage session. Empty until the Leaflet map
/// has been created.
#[derive(Clone, Default)]
pub struct SessionHandle(Rc<RefCell<Option<CoverageSession<LeafletSurface>>>>);

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SessionHandle {
    fn install(&self, session: CoverageSession<LeafletSurface>) {
        *self.0.borrow_mut() = Some(session);
    }

    fn is_installed(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Run `f` against the session, or return `None` if the map is not up yet.
    pub fn with<R>(&self, f: impl FnOnce(&mut CoverageSession<LeafletSurface>) -> R) -> Option<R> {
        self.0.borrow_mut().as_mut().map(f)
    }
}

#[component]
pub fn MapView(session: SessionHandle, on_select: EventHandler<Coordinate>) -> Element {
    // Leaflet callbacks fire outside the Dioxus runtime, so they only push
    // coordinates into a channel; this task does the marker and form updates.
    let selections = use_hook({
        let session = session.clone();
        move || {
            let (tx, mut rx) = mpsc::unbounded::<Coordinate>();
            spawn(async move {
                while let Some(coordinate) = rx.next().await {
                    session.with(|s| s.select(coordinate));
                    on_select.call(coordinate);
                }
            });
            tx
        }
    });

    use_effect(move || {
        if session.is_installed() {
            return;
        }
        match leaflet::init_map() {
            Ok(map) => {
                for event in ["click", "locationfound"] {
                    let tx = selections.clone();
                    leaflet::on_latlng_event(&map, event, move |evt| {
                        if let Err(e) = tx.unbounded_send(evt.coordinate().wrap()) {
                            tracing::warn!(error = %e, "Dropped map selection");
                        }
                    });
                }
                session.install(CoverageSession::new(LeafletSurface::new(map)));
                tracing::info!("Map initialized");
            }
            Err(e) => tracing::error!(error = ?e, "Failed to initialize map"),
        }
    });

    rsx! {
        div { id: MAP_ELEMENT_ID, class: "map" }
    }
}
