//! Signal-strength color scale.
//!
//! RSSI values are normalized linearly over [`RSSI_MIN`, `RSSI_MAX`] and fed
//! through a plasma ramp. Normalization itself does not clamp; the ramp
//! clamps its input to [0, 1] like any sequential interpolator.

pub const RSSI_MIN: f64 = -140.0;
pub const RSSI_MAX: f64 = -90.0;

/// Number of intervals in the legend gradient (LEGEND_STEPS + 1 stops).
pub const LEGEND_STEPS: usize = 64;

/// Plasma anchors at t = 0.0, 0.1, ..., 1.0.
const PLASMA: [[u8; 3]; 11] = [
    [0x0d, 0x08, 0x87],
    [0x41, 0x04, 0x9d],
    [0x6a, 0x00, 0xa8],
    [0x8f, 0x0d, 0xa4],
    [0xb1, 0x2a, 0x90],
    [0xcc, 0x47, 0x78],
    [0xe1, 0x64, 0x62],
    [0xf2, 0x84, 0x4b],
    [0xfc, 0xa6, 0x36],
    [0xfc, 0xce, 0x25],
    [0xf0, 0xf9, 0x21],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn lerp_channel(a: u8, b: u8, frac: f64) -> u8 {
    let v = a as f64 + (b as f64 - a as f64) * frac;
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample the plasma ramp. `t` is clamped to [0, 1]; NaN maps to the low end.
pub fn plasma(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (PLASMA.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(PLASMA.len() - 2);
    let frac = scaled - idx as f64;

    let lo = PLASMA[idx];
    let hi = PLASMA[idx + 1];
    Rgb {
        r: lerp_channel(lo[0], hi[0], frac),
        g: lerp_channel(lo[1], hi[1], frac),
        b: lerp_channel(lo[2], hi[2], frac),
    }
}

/// Map an RSSI value onto [0, 1] over the fixed dBm domain, without clamping.
pub fn normalize_rssi(rssi: f64) -> f64 {
    (rssi - RSSI_MIN) / (RSSI_MAX - RSSI_MIN)
}

/// CSS color for a predicted RSSI value.
pub fn rssi_color(rssi: f64) -> String {
    plasma(normalize_rssi(rssi)).to_hex()
}

/// CSS background for the legend bar: the plasma ramp swept left to right.
pub fn legend_gradient() -> String {
    let stops: Vec<String> = (0..=LEGEND_STEPS)
        .map(|i| {
            let t = i as f64 / LEGEND_STEPS as f64;
            format!("{} {}%", plasma(t).to_hex(), t * 100.0)
        })
        .collect();
    format!("linear-gradient(to right, {})", stops.join(", "))
}
