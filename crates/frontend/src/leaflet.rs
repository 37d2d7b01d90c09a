//! Bindings to the global Leaflet `L` namespace and the locate-control
//! plugin, both loaded as page scripts (see Dioxus.toml).

use meshplanner_shared::coverage::{CoveragePolygon, FILL_OPACITY};
use meshplanner_shared::models::Coordinate;
use meshplanner_shared::session::MapSurface;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(element_id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &Layer, content: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn new_marker(latlng: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = polygon)]
    fn new_polygon(latlngs: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn new_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    type Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    fn layers_control(
        base_layers: &js_sys::Object,
        overlays: &js_sys::Object,
        options: &JsValue,
    ) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = locate)]
    fn locate_control(options: &JsValue) -> Control;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Control, map: &Map) -> Control;

    /// `LeafletMouseEvent` and `LocationEvent` both carry `latlng`.
    pub type LatLngEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LatLngEvent) -> LatLng;

    type LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;
}

impl LatLngEvent {
    pub fn coordinate(&self) -> Coordinate {
        let latlng = self.latlng();
        Coordinate::new(latlng.lat(), latlng.lng())
    }
}

pub const MAP_ELEMENT_ID: &str = "map";

const DEFAULT_CENTER: [f64; 2] = [51.0, -114.0];
const DEFAULT_ZOOM: u8 = 10;
const LOCATE_MAX_ZOOM: u8 = 10;
const WORLD_BOUNDS: [[f64; 2]; 2] = [[-90.0, -180.0], [90.0, 180.0]];

struct BaseLayer {
    name: &'static str,
    url: &'static str,
    max_zoom: u8,
    attribution: &'static str,
}

const BASE_LAYERS: [BaseLayer; 2] = [
    BaseLayer {
        name: "OpenStreetMap",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        max_zoom: 19,
        attribution: "© OpenStreetMap contributors",
    },
    BaseLayer {
        name: "OpenTopoMap",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        max_zoom: 17,
        attribution: r#"Map data: &copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors, <a href="http://viewfinderpanoramas.org">SRTM</a> | Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> (<a href="https://creativecommons.org/licenses/by-sa/3.0/">CC-BY-SA</a>)"#,
    },
];

// Option objects, serialized to plain JS objects.

#[derive(Serialize)]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    max_zoom: u8,
    no_wrap: bool,
    bounds: [[f64; 2]; 2],
    attribution: &'static str,
}

#[derive(Serialize)]
struct ControlPosition {
    position: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateOptions {
    strings: LocateStrings,
    locate_options: LocateZoom,
}

#[derive(Serialize)]
struct LocateStrings {
    title: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateZoom {
    max_zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolygonOptions<'a> {
    color: &'a str,
    fill_opacity: f64,
}

#[derive(Serialize)]
struct TooltipOptions {
    permanent: bool,
    direction: &'static str,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Create the map in `#map` with both base layers, the layer switcher and
/// the locate control. OpenStreetMap is shown first.
pub fn init_map() -> Result<Map, JsValue> {
    let map = new_map(
        MAP_ELEMENT_ID,
        &to_js(&MapOptions {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        })?,
    );

    let base_layers = js_sys::Object::new();
    for (i, base) in BASE_LAYERS.iter().enumerate() {
        let layer = tile_layer(
            base.url,
            &to_js(&TileOptions {
                max_zoom: base.max_zoom,
                no_wrap: true,
                bounds: WORLD_BOUNDS,
                attribution: base.attribution,
            })?,
        );
        if i == 0 {
            layer.add_to(&map);
        }
        js_sys::Reflect::set(&base_layers, &JsValue::from_str(base.name), &layer)?;
    }

    layers_control(
        &base_layers,
        &js_sys::Object::new(),
        &to_js(&ControlPosition { position: "topleft" })?,
    )
    .add_to(&map);

    locate_control(&to_js(&LocateOptions {
        strings: LocateStrings {
            title: "My Location",
        },
        locate_options: LocateZoom {
            max_zoom: LOCATE_MAX_ZOOM,
        },
    })?)
    .add_to(&map);

    Ok(map)
}

/// Register `handler` for a Leaflet event carrying a `latlng`
/// (`click`, `locationfound`). The closure lives as long as the page.
pub fn on_latlng_event(map: &Map, event: &str, handler: impl FnMut(LatLngEvent) + 'static) {
    let closure = Closure::<dyn FnMut(LatLngEvent)>::new(handler);
    map.on(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// [`MapSurface`] backed by a live Leaflet map.
pub struct LeafletSurface {
    map: Map,
}

impl LeafletSurface {
    pub fn new(map: Map) -> Self {
        Self { map }
    }

    fn build_polygon(polygon: &CoveragePolygon) -> Result<Layer, JsValue> {
        let shape = new_polygon(
            &to_js(&polygon.boundary)?,
            &to_js(&PolygonOptions {
                color: &polygon.color,
                fill_opacity: FILL_OPACITY,
            })?,
        );
        shape.bind_tooltip(
            &polygon.tooltip,
            &to_js(&TooltipOptions {
                permanent: false,
                direction: "center",
            })?,
        );
        Ok(shape)
    }
}

impl MapSurface for LeafletSurface {
    type Marker = Layer;
    type Layer = LayerGroup;

    fn add_marker(&mut self, at: Coordinate) -> Layer {
        let latlng = js_sys::Array::of2(
            &JsValue::from_f64(at.latitude),
            &JsValue::from_f64(at.longitude),
        );
        new_marker(&latlng).add_to(&self.map)
    }

    fn remove_marker(&mut self, marker: &Layer) {
        self.map.remove_layer(marker);
    }

    fn add_layer(&mut self, polygons: &[CoveragePolygon]) -> LayerGroup {
        let group = new_layer_group();
        for polygon in polygons {
            match Self::build_polygon(polygon) {
                Ok(shape) => {
                    group.add_layer(&shape);
                }
                Err(e) => tracing::error!(error = ?e, "Failed to build coverage polygon"),
            }
        }
        group.add_to(&self.map);
        group
    }

    fn remove_layer(&mut self, layer: &LayerGroup) {
        self.map.remove_layer(layer);
    }
}
