//! Accelerometer sensor types and configuration
//!
//! Provides types and utility functions for the MPU-6050's 3-axis accelerometer.

/// Raw-to-g factor at the most sensitive range (±2g = 16384 LSB/g)
pub const RAW_TO_G_BASE: f32 = 1.0 / 16384.0;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// Build from a 2-bit sensitivity level, clamping anything above 3
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }

    /// The 2-bit level stored in `ACCEL_CONFIG.AFS_SEL`
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Conversion factor from raw LSB to g
    ///
    /// Doubles with each level: `2^level / 16384`.
    #[must_use]
    pub fn scale_factor(self) -> f32 {
        f32::from(1u8 << self.level()) * RAW_TO_G_BASE
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// * `scale` - g per LSB (from [`AccelFullScale::scale_factor()`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, scale: f32) -> Self {
        Self {
            x: f32::from(raw_x) * scale,
            y: f32::from(raw_y) * scale,
            z: f32::from(raw_z) * scale,
        }
    }
}

/// Accelerometer bias correction, in g
///
/// Added to each axis after scaling. Fill it in by hand or let
/// [`Gy521Driver::calibrate`](crate::Gy521Driver::calibrate) compute it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelBias {
    /// Offset for X-axis (added to scaled value)
    pub x: f32,
    /// Offset for Y-axis (added to scaled value)
    pub y: f32,
    /// Offset for Z-axis (added to scaled value)
    pub z: f32,
}

impl AccelBias {
    /// Apply the correction to scaled accelerometer data
    #[must_use]
    pub fn apply(&self, data: AccelDataG) -> AccelDataG {
        AccelDataG {
            x: data.x + self.x,
            y: data.y + self.y,
            z: data.z + self.z,
        }
    }
}
