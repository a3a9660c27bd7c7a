//! Sensor modules for the GY-521
//!
//! This module provides types and configuration enums for each sensor
//! on the MPU-6050:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Temperature
//!
//! All sensor operations are performed through methods on `Gy521Driver`.

pub mod accelerometer;
pub mod gyroscope;
pub mod temperature;

// Re-export main types
pub use accelerometer::{AccelBias, AccelDataG, AccelFullScale};
pub use gyroscope::{GyroBias, GyroDataDps, GyroFullScale};
