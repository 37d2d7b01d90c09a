use crate::color;
use crate::models::{to_fixed, CoverageFeature, FeatureCollection};

pub const FILL_OPACITY: f64 = 0.5;

/// A coverage cell ready to hand to the map: boundary in `[lat, lon]` order,
/// its fill color and tooltip text.
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePolygon {
    pub boundary: Vec<[f64; 2]>,
    pub rssi: f64,
    pub color: String,
    pub tooltip: String,
}

/// Swap GeoJSON `[lon, lat]` positions into the `[lat, lon]` order Leaflet expects.
pub fn swap_ring(ring: &[[f64; 2]]) -> Vec<[f64; 2]> {
    ring.iter().map(|&[lon, lat]| [lat, lon]).collect()
}

pub fn tooltip_text(rssi: f64) -> String {
    format!("{} dBm", to_fixed(rssi, 2))
}

/// A feature is drawn only when its RSSI is strictly above the threshold.
/// A NaN threshold draws nothing.
pub fn passes_threshold(rssi: f64, threshold: f64) -> bool {
    rssi > threshold
}

impl CoveragePolygon {
    pub fn from_feature(feature: &CoverageFeature) -> Self {
        let rssi = feature.rssi();
        Self {
            boundary: swap_ring(feature.outer_ring()),
            rssi,
            color: color::rssi_color(rssi),
            tooltip: tooltip_text(rssi),
        }
    }
}

/// Build the polygons for every feature above `threshold`, in response order.
pub fn build_polygons(collection: &FeatureCollection, threshold: f64) -> Vec<CoveragePolygon> {
    collection
        .features
        .iter()
        .filter(|f| passes_threshold(f.rssi(), threshold))
        .map(CoveragePolygon::from_feature)
        .collect()
}
