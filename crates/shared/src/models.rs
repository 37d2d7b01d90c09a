use serde::{Deserialize, Serialize};

/// H3 cell resolution requested from the prediction service.
pub const H3_RESOLUTION: u8 = 8;

/// Number of decimal places written into the coordinate fields.
pub const COORDINATE_DECIMALS: usize = 6;

/// Fixed-point text with ties rounded away from zero, as the map page has
/// always displayed them. Plain `{:.N}` rounds ties to even.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", decimals, rounded)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Wrap the longitude back into [-180, 180]. Clicking on a panned-around
    /// world copy reports longitudes outside that range.
    pub fn wrap(self) -> Self {
        let lon = self.longitude;
        let wrapped = if lon == 180.0 {
            lon
        } else {
            ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0
        };
        Self {
            latitude: self.latitude,
            longitude: wrapped,
        }
    }

    /// Format as the (latitude, longitude) text shown in the form fields.
    pub fn field_text(&self) -> (String, String) {
        (
            to_fixed(self.latitude, COORDINATE_DECIMALS),
            to_fixed(self.longitude, COORDINATE_DECIMALS),
        )
    }
}

/// Advanced radio parameters sent only when manual override is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadioOverrides {
    pub tx_power: f64,
    pub frequency: f64,
    pub additional_loss: f64,
    pub rx_sensitivity: f64,
}

/// Payload for `POST /predict`. Field names follow the service schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub lat: f64,
    pub lon: f64,
    /// Transmitter height in meters.
    pub txh: f64,
    /// Receiver height in meters.
    pub rxh: f64,
    pub tx_gain: f64,
    pub rx_gain: f64,
    pub region: String,
    pub resolution: u8,
    #[serde(flatten)]
    pub overrides: Option<RadioOverrides>,
}

// Response types: a GeoJSON FeatureCollection of H3 cell polygons.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<CoverageFeature>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoverageFeature {
    pub geometry: PolygonGeometry,
    pub properties: CoverageProperties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolygonGeometry {
    /// Rings of `[lon, lat]` positions; the first ring is the outer boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CoverageProperties {
    pub model_rssi: f64,
}

impl CoverageFeature {
    pub fn rssi(&self) -> f64 {
        self.properties.model_rssi
    }

    /// The outer ring in `[lon, lat]` order, or an empty slice for a
    /// polygon without rings.
    pub fn outer_ring(&self) -> &[[f64; 2]] {
        self.geometry
            .coordinates
            .first()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
