//! Orientation estimate: accelerometer tilt, gyro integration and a
//! fixed-weight complementary filter
//!
//! The gyroscope is precise over short intervals but its integral drifts; the
//! accelerometer tilt is noisy but drift free. Pitch and roll blend the two
//! with fixed weights. Yaw comes from the gyro integral alone since gravity
//! carries no information about rotation around the vertical axis.

use crate::sensors::{AccelDataG, GyroDataDps};

/// Radians to degrees
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Weight of the integrated gyro angle in pitch and roll
pub const GYRO_WEIGHT: f32 = 0.96;

/// Weight of the accelerometer tilt angle in pitch and roll
pub const ACCEL_WEIGHT: f32 = 0.04;

/// Tilt angles derived from a single accelerometer sample, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltAngles {
    /// Rotation about X (from Y against the XZ plane)
    pub x: f32,
    /// Rotation about Y (from -X against the YZ plane)
    pub y: f32,
    /// Inclination of Z against the XY plane
    pub z: f32,
}

impl TiltAngles {
    /// Compute tilt angles from gravity
    ///
    /// `atan2` with a non-negative second argument equals
    /// `atan(a / b)` and stays defined when both components are zero.
    #[must_use]
    pub fn from_accel(accel: &AccelDataG) -> Self {
        let ax2 = accel.x * accel.x;
        let ay2 = accel.y * accel.y;
        let az2 = accel.z * accel.z;

        Self {
            x: libm::atan2f(accel.y, libm::sqrtf(ax2 + az2)) * RAD_TO_DEG,
            y: libm::atan2f(-accel.x, libm::sqrtf(ay2 + az2)) * RAD_TO_DEG,
            z: libm::atan2f(accel.z, libm::sqrtf(ax2 + ay2)) * RAD_TO_DEG,
        }
    }
}

/// Running orientation state, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Pitch (blend of gyro Y integral and accel Y tilt)
    pub pitch: f32,
    /// Roll (blend of gyro X integral and accel X tilt)
    pub roll: f32,
    /// Yaw (gyro Z integral)
    pub yaw: f32,
    /// Accumulated gyro X angle
    pub gyro_angle_x: f32,
    /// Accumulated gyro Y angle
    pub gyro_angle_y: f32,
    /// Accumulated gyro Z angle
    pub gyro_angle_z: f32,
}

impl Orientation {
    /// Accumulate gyro rates over `dt` seconds into the per-axis integrals
    ///
    /// Pitch, roll and yaw are left untouched; call [`Self::fuse`] to refresh them.
    pub fn integrate(&mut self, rate: &GyroDataDps, dt: f32) {
        self.gyro_angle_x += rate.x * dt;
        self.gyro_angle_y += rate.y * dt;
        self.gyro_angle_z += rate.z * dt;
    }

    /// Recompute pitch, roll and yaw from the gyro integrals and accel tilt
    pub fn fuse(&mut self, tilt: &TiltAngles) {
        self.yaw = self.gyro_angle_z;
        self.pitch = GYRO_WEIGHT * self.gyro_angle_y + ACCEL_WEIGHT * tilt.y;
        self.roll = GYRO_WEIGHT * self.gyro_angle_x + ACCEL_WEIGHT * tilt.x;
    }
}
