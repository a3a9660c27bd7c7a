//! Gyroscope sensor types and configuration
//!
//! Provides types and utility functions for the MPU-6050's 3-axis gyroscope.

/// Raw-to-°/s factor at the most sensitive range (±250°/s = 131 LSB/(°/s))
pub const RAW_TO_DPS_BASE: f32 = 1.0 / 131.0;

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range
    #[default]
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Build from a 2-bit sensitivity level, clamping anything above 3
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Dps250,
            1 => Self::Dps500,
            2 => Self::Dps1000,
            _ => Self::Dps2000,
        }
    }

    /// The 2-bit level stored in `GYRO_CONFIG.FS_SEL`
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Conversion factor from raw LSB to °/s: `2^level / 131`
    #[must_use]
    pub fn scale_factor(self) -> f32 {
        f32::from(1u8 << self.level()) * RAW_TO_DPS_BASE
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// * `scale` - °/s per LSB (from [`GyroFullScale::scale_factor()`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, scale: f32) -> Self {
        Self {
            x: f32::from(raw_x) * scale,
            y: f32::from(raw_y) * scale,
            z: f32::from(raw_z) * scale,
        }
    }
}

/// Gyroscope bias correction, in °/s
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroBias {
    /// Offset for X-axis (added to scaled value)
    pub x: f32,
    /// Offset for Y-axis (added to scaled value)
    pub y: f32,
    /// Offset for Z-axis (added to scaled value)
    pub z: f32,
}

impl GyroBias {
    /// Apply the correction to scaled gyroscope data
    #[must_use]
    pub fn apply(&self, data: GyroDataDps) -> GyroDataDps {
        GyroDataDps {
            x: data.x + self.x,
            y: data.y + self.y,
            z: data.z + self.z,
        }
    }
}
