//! Meshtastic LoRa region presets.
//!
//! Frequencies and default transmit powers per region code, as published in
//! the Meshtastic region-by-country table. The prediction service resolves
//! the region code itself; the frontend uses this table for the region
//! selector and to prefill the override fields.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPreset {
    pub code: &'static str,
    pub frequency_mhz: f64,
    pub transmit_power_dbm: f64,
}

pub const DEFAULT_REGION: &str = "US";

pub const REGIONS: &[RegionPreset] = &[
    RegionPreset { code: "EU_868", frequency_mhz: 868.3, transmit_power_dbm: 14.0 },
    RegionPreset { code: "EU_433", frequency_mhz: 433.3, transmit_power_dbm: 12.0 },
    RegionPreset { code: "ANZ", frequency_mhz: 915.2, transmit_power_dbm: 27.0 },
    RegionPreset { code: "US", frequency_mhz: 903.0, transmit_power_dbm: 30.0 },
    RegionPreset { code: "CN", frequency_mhz: 470.5, transmit_power_dbm: 20.0 },
    RegionPreset { code: "IN", frequency_mhz: 865.4, transmit_power_dbm: 30.0 },
    RegionPreset { code: "JP", frequency_mhz: 920.8, transmit_power_dbm: 16.0 },
    RegionPreset { code: "KR", frequency_mhz: 922.3, transmit_power_dbm: 23.0 },
    RegionPreset { code: "MY_919", frequency_mhz: 920.0, transmit_power_dbm: 14.0 },
    RegionPreset { code: "MY_433", frequency_mhz: 433.3, transmit_power_dbm: 12.0 },
    RegionPreset { code: "NZ_865", frequency_mhz: 865.4, transmit_power_dbm: 30.0 },
    RegionPreset { code: "RU", frequency_mhz: 864.2, transmit_power_dbm: 30.0 },
    RegionPreset { code: "SG_923", frequency_mhz: 923.4, transmit_power_dbm: 16.0 },
    RegionPreset { code: "TW", frequency_mhz: 922.3, transmit_power_dbm: 30.0 },
    RegionPreset { code: "TH", frequency_mhz: 921.0, transmit_power_dbm: 30.0 },
    RegionPreset { code: "UA_868", frequency_mhz: 868.3, transmit_power_dbm: 14.0 },
    RegionPreset { code: "UA_433", frequency_mhz: 433.3, transmit_power_dbm: 12.0 },
];

/// Look up a region preset by its code.
pub fn find(code: &str) -> Option<&'static RegionPreset> {
    REGIONS.iter().find(|r| r.code == code)
}

/// The preset used when no region has been chosen yet.
pub fn default_region() -> &'static RegionPreset {
    // DEFAULT_REGION is a member of REGIONS
    find(DEFAULT_REGION).unwrap_or(&REGIONS[0])
}
