//! On-die temperature sensor

/// Temperature sensitivity in LSB/°C
pub const LSB_PER_DEGREE: f32 = 340.0;

/// Temperature reported for a raw reading of zero, in °C
pub const OFFSET_CELSIUS: f32 = 36.53;

/// Convert a raw `TEMP_OUT` reading to degrees Celsius
#[must_use]
pub fn raw_to_celsius(raw: i16) -> f32 {
    f32::from(raw) / LSB_PER_DEGREE + OFFSET_CELSIUS
}
