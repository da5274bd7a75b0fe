//! Celsius to Fahrenheit/Kelvin conversion

use serde::{Deserialize, Serialize};

/// Offset added to Celsius to get Kelvin.
///
/// The service reports `C + 273`, not the physical 273.15.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Temperature in the three reported scales, all derived from one Celsius value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReport {
    #[serde(rename = "temp_C")]
    pub celsius: f64,

    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,

    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl TemperatureReport {
    /// Convert a Celsius reading
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 1.8 + 32.0,
            kelvin: celsius + KELVIN_OFFSET,
        }
    }
}
