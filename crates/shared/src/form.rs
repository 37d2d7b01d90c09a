use crate::models::{Coordinate, PredictionRequest, RadioOverrides, H3_RESOLUTION};
use crate::regions;

/// Raw text of every field in the controls panel.
///
/// Values stay as typed so the form can hold partial input; conversion to
/// numbers happens once, in [`FormState::to_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub lat: String,
    pub lng: String,
    pub height: String,
    pub gain: String,
    pub region: String,
    pub rx_height: String,
    pub rx_gain: String,
    pub override_enabled: bool,
    pub tx_power: String,
    pub frequency: String,
    pub additional_loss: String,
    pub rx_sensitivity: String,
}

impl Default for FormState {
    fn default() -> Self {
        let region = regions::default_region();
        Self {
            lat: String::new(),
            lng: String::new(),
            height: "2".to_string(),
            gain: "2".to_string(),
            region: region.code.to_string(),
            rx_height: "1".to_string(),
            rx_gain: "2".to_string(),
            override_enabled: false,
            tx_power: format_number(region.transmit_power_dbm),
            frequency: format_number(region.frequency_mhz),
            additional_loss: "0".to_string(),
            rx_sensitivity: "-130".to_string(),
        }
    }
}

fn format_number(v: f64) -> String {
    format!("{}", v)
}

/// Parse a numeric field. Empty or non-numeric text becomes NaN; the
/// service is left to reject it.
pub fn parse_field(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl FormState {
    /// Write a selected coordinate into the latitude/longitude fields.
    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        let (lat, lng) = coordinate.field_text();
        self.lat = lat;
        self.lng = lng;
    }

    /// Select a region. While manual override is off, the transmit power and
    /// frequency fields follow the region preset.
    pub fn set_region(&mut self, code: &str) {
        self.region = code.to_string();
        if self.override_enabled {
            return;
        }
        if let Some(preset) = regions::find(code) {
            self.tx_power = format_number(preset.transmit_power_dbm);
            self.frequency = format_number(preset.frequency_mhz);
        }
    }

    pub fn set_override(&mut self, enabled: bool) {
        self.override_enabled = enabled;
    }

    /// Whether the transmit power and frequency inputs are disabled.
    pub fn override_inputs_disabled(&self) -> bool {
        !self.override_enabled
    }

    /// Receiver sensitivity used as the render threshold.
    pub fn rssi_threshold(&self) -> f64 {
        parse_field(&self.rx_sensitivity)
    }

    pub fn to_request(&self) -> PredictionRequest {
        let overrides = self.override_enabled.then(|| RadioOverrides {
            tx_power: parse_field(&self.tx_power),
            frequency: parse_field(&self.frequency),
            additional_loss: parse_field(&self.additional_loss),
            rx_sensitivity: parse_field(&self.rx_sensitivity),
        });

        PredictionRequest {
            lat: parse_field(&self.lat),
            lon: parse_field(&self.lng),
            txh: parse_field(&self.height),
            rxh: parse_field(&self.rx_height),
            tx_gain: parse_field(&self.gain),
            rx_gain: parse_field(&self.rx_gain),
            region: self.region.clone(),
            resolution: H3_RESOLUTION,
            overrides,
        }
    }
}
