//! High-level driver API for the GY-521
//!
//! This module provides the [`Gy521Driver`], which owns the bus interface and
//! a clock, reads the MPU-6050 data registers, converts them to physical units
//! and keeps a running pitch/roll/yaw estimate.

use crate::clock::{self, Clock};
use crate::interface::Gy521Interface;
use crate::orientation::{Orientation, TiltAngles};
use crate::registers::{
    self, ACCEL_XOUT_H, AXES_BURST_LEN, FULL_BURST_LEN, GYRO_XOUT_H, Mpu6050 as RegisterDevice,
    TEMP_BURST_LEN, TEMP_OUT_H,
};
use crate::sensors::{
    AccelBias, AccelDataG, AccelFullScale, GyroBias, GyroDataDps, GyroFullScale, temperature,
};
use crate::{DEFAULT_THROTTLE_TIME_MS, Error, Status};

use device_driver::RegisterInterface;

/// One decoded burst of raw sensor registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X, Y, Z acceleration (raw)
    pub accel: [i16; 3],
    /// Temperature (raw)
    pub temperature: i16,
    /// X, Y, Z rotation rate (raw)
    pub gyro: [i16; 3],
}

impl RawSample {
    /// Decode a full 14-byte burst starting at `ACCEL_XOUT_H`
    ///
    /// Seven big-endian words in register order: accel X/Y/Z, temperature,
    /// gyro X/Y/Z.
    #[must_use]
    pub fn from_be_bytes(buffer: &[u8; FULL_BURST_LEN]) -> Self {
        let word = |i: usize| i16::from_be_bytes([buffer[2 * i], buffer[2 * i + 1]]);
        Self {
            accel: [word(0), word(1), word(2)],
            temperature: word(3),
            gyro: [word(4), word(5), word(6)],
        }
    }
}

/// Decode three consecutive big-endian axes
fn decode_axes(buffer: &[u8; AXES_BURST_LEN]) -> [i16; 3] {
    [
        i16::from_be_bytes([buffer[0], buffer[1]]),
        i16::from_be_bytes([buffer[2], buffer[3]]),
        i16::from_be_bytes([buffer[4], buffer[5]]),
    ]
}

/// Result of a successful read call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// New data was read and the state updated
    Updated,
    /// Skipped because the throttle interval has not elapsed; nothing changed
    Throttled,
}

impl ReadOutcome {
    /// Legacy status for this outcome
    ///
    /// A throttled read leaves [`Gy521Driver::last_status`] alone, so polling
    /// callers that want the numeric throttle code take it from here.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::Updated => Status::Ok,
            Self::Throttled => Status::Throttled,
        }
    }
}

/// Main driver for the GY-521
pub struct Gy521Driver<I, C> {
    device: RegisterDevice<I>,
    clock: C,
    /// Accelerometer bias, added to every scaled reading
    pub accel_bias: AccelBias,
    /// Gyroscope bias, added to every scaled reading
    pub gyro_bias: GyroBias,
    // Last full-scale written; only used to pick the conversion factor
    accel_full_scale: AccelFullScale,
    gyro_full_scale: GyroFullScale,
    // Latest converted samples
    accel: AccelDataG,
    tilt: TiltAngles,
    gyro: GyroDataDps,
    temperature: f32,
    orientation: Orientation,
    // Throttle (millisecond clock)
    throttle: bool,
    throttle_time_ms: u16,
    last_read_ms: Option<u64>,
    // Gyro integration baseline (microsecond clock)
    last_gyro_us: Option<u64>,
    status: Status,
}

impl<I, C, E> Gy521Driver<I, C>
where
    I: Gy521Interface<Error = Error<E>>,
    C: Clock,
{
    /// Create a new GY-521 driver instance
    ///
    /// No bus traffic happens here. Call [`begin()`](Self::begin) to check the
    /// device is present and wake it from its power-on sleep.
    pub fn new(interface: I, clock: C) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            clock,
            accel_bias: AccelBias::default(),
            gyro_bias: GyroBias::default(),
            accel_full_scale: AccelFullScale::default(),
            gyro_full_scale: GyroFullScale::default(),
            accel: AccelDataG::default(),
            tilt: TiltAngles::default(),
            gyro: GyroDataDps::default(),
            temperature: 0.0,
            orientation: Orientation::default(),
            throttle: true,
            throttle_time_ms: DEFAULT_THROTTLE_TIME_MS,
            last_read_ms: None,
            last_gyro_us: None,
            status: Status::Ok,
        }
    }

    /// Check the device is present and wake it up
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] if the device does not acknowledge its
    /// address, or an error if the wake-up write fails.
    pub fn begin(&mut self) -> Result<(), Error<E>> {
        if !self.is_connected() {
            #[cfg(feature = "defmt")]
            defmt::warn!("GY521 not answering on the bus");
            self.status = Status::NotConnected;
            return Err(Error::NotConnected);
        }
        self.wakeup()
    }

    /// Whether the device acknowledges its address
    pub fn is_connected(&mut self) -> bool {
        self.device.interface.probe().is_ok()
    }

    /// Clear the power management register, taking the device out of sleep
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn wakeup(&mut self) -> Result<(), Error<E>> {
        // All-zero PWR_MGMT_1: sleep off, internal oscillator, temperature on
        let result = self.device.pwr_mgmt_1().write(|w| w.set_sleep(false));
        self.latch(result)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("GY521 awake");

        Ok(())
    }

    /// Zero all converted samples and orientation state
    ///
    /// Restores the default throttle interval. The next gyro read starts a new
    /// integration interval. No bus traffic.
    pub fn reset(&mut self) {
        self.throttle_time_ms = DEFAULT_THROTTLE_TIME_MS;
        self.clear_motion_state();
    }

    fn clear_motion_state(&mut self) {
        self.accel = AccelDataG::default();
        self.tilt = TiltAngles::default();
        self.gyro = GyroDataDps::default();
        self.temperature = 0.0;
        self.orientation = Orientation::default();
        self.last_gyro_us = None;
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x68 for a genuine MPU-6050
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<E>> {
        let result = self.device.who_am_i().read();
        let reg = self.latch(result)?;
        Ok(reg.who_am_i())
    }

    /// Read accelerometer, temperature and gyroscope in one burst and update
    /// the orientation estimate
    ///
    /// Returns [`ReadOutcome::Throttled`] without touching the bus if the
    /// previous read was less than the throttle interval ago.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the register select is not acknowledged and
    /// [`Error::Read`] if the 14-byte transfer fails. State is left unchanged.
    pub fn read(&mut self) -> Result<ReadOutcome, Error<E>> {
        if self.throttled() {
            return Ok(ReadOutcome::Throttled);
        }

        let mut buffer = [0u8; FULL_BURST_LEN];
        let result = self.read_block(ACCEL_XOUT_H, &mut buffer);
        self.latch(result)?;

        let raw = RawSample::from_be_bytes(&buffer);
        let dt = self.gyro_interval();

        self.update_accel(raw.accel);
        self.temperature = temperature::raw_to_celsius(raw.temperature);
        self.update_gyro(raw.gyro, dt);
        self.orientation.fuse(&self.tilt);

        Ok(ReadOutcome::Updated)
    }

    /// Read only the accelerometer and recompute the tilt angles
    ///
    /// Gyro integrals and pitch/roll/yaw are not touched. Throttled like
    /// [`read()`](Self::read).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<ReadOutcome, Error<E>> {
        if self.throttled() {
            return Ok(ReadOutcome::Throttled);
        }

        let mut buffer = [0u8; AXES_BURST_LEN];
        let result = self.read_block(ACCEL_XOUT_H, &mut buffer);
        self.latch(result)?;

        self.update_accel(decode_axes(&buffer));
        Ok(ReadOutcome::Updated)
    }

    /// Read only the gyroscope and accumulate the gyro angle integrals
    ///
    /// Pitch/roll/yaw are refreshed by the next full [`read()`](Self::read).
    /// Throttled like `read()`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<ReadOutcome, Error<E>> {
        if self.throttled() {
            return Ok(ReadOutcome::Throttled);
        }

        let mut buffer = [0u8; AXES_BURST_LEN];
        let result = self.read_block(GYRO_XOUT_H, &mut buffer);
        self.latch(result)?;

        let dt = self.gyro_interval();
        self.update_gyro(decode_axes(&buffer), dt);
        Ok(ReadOutcome::Updated)
    }

    /// Read the temperature in degrees Celsius
    ///
    /// Never throttled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
        let mut buffer = [0u8; TEMP_BURST_LEN];
        let result = self.read_block(TEMP_OUT_H, &mut buffer);
        self.latch(result)?;

        self.temperature = temperature::raw_to_celsius(i16::from_be_bytes(buffer));
        Ok(self.temperature)
    }

    /// Set the accelerometer full-scale range from a level (0 = ±2g .. 3 = ±16g)
    ///
    /// Levels above 3 are clamped. The register is only written when the
    /// stored level differs; the other bits of `ACCEL_CONFIG` are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The
    /// conversion factor is left unchanged in that case.
    pub fn set_accel_sensitivity(&mut self, level: u8) -> Result<AccelFullScale, Error<E>> {
        let full_scale = AccelFullScale::from_level(level);
        let result = self.write_accel_full_scale(full_scale);
        self.latch(result)?;

        self.accel_full_scale = full_scale;
        Ok(full_scale)
    }

    fn write_accel_full_scale(&mut self, full_scale: AccelFullScale) -> Result<(), Error<E>> {
        let config = self.device.accel_config().read()?;
        if config.afs_sel() == full_scale.level() {
            #[cfg(feature = "defmt")]
            defmt::trace!("ACCEL_CONFIG already at level {}", full_scale.level());
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ACCEL_CONFIG level {} -> {}", config.afs_sel(), full_scale.level());

        self.device.accel_config().write(|w| {
            *w = config;
            w.set_afs_sel(full_scale.level());
        })
    }

    /// Read the accelerometer full-scale range from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_accel_sensitivity(&mut self) -> Result<AccelFullScale, Error<E>> {
        let result = self.device.accel_config().read();
        let config = self.latch(result)?;
        Ok(AccelFullScale::from_level(config.afs_sel()))
    }

    /// Set the gyroscope full-scale range from a level (0 = ±250°/s .. 3 = ±2000°/s)
    ///
    /// Levels above 3 are clamped. The register is only written when the
    /// stored level differs; the other bits of `GYRO_CONFIG` are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_sensitivity(&mut self, level: u8) -> Result<GyroFullScale, Error<E>> {
        let full_scale = GyroFullScale::from_level(level);
        let result = self.write_gyro_full_scale(full_scale);
        self.latch(result)?;

        self.gyro_full_scale = full_scale;
        Ok(full_scale)
    }

    fn write_gyro_full_scale(&mut self, full_scale: GyroFullScale) -> Result<(), Error<E>> {
        let config = self.device.gyro_config().read()?;
        if config.fs_sel() == full_scale.level() {
            #[cfg(feature = "defmt")]
            defmt::trace!("GYRO_CONFIG already at level {}", full_scale.level());
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("GYRO_CONFIG level {} -> {}", config.fs_sel(), full_scale.level());

        self.device.gyro_config().write(|w| {
            *w = config;
            w.set_fs_sel(full_scale.level());
        })
    }

    /// Read the gyroscope full-scale range from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_gyro_sensitivity(&mut self) -> Result<GyroFullScale, Error<E>> {
        let result = self.device.gyro_config().read();
        let config = self.latch(result)?;
        Ok(GyroFullScale::from_level(config.fs_sel()))
    }

    /// Estimate bias corrections with the device lying flat and still
    ///
    /// Averages `samples` full reads (throttle is bypassed meanwhile) and
    /// stores corrections that bring the average to (0, 0, +1) g and
    /// (0, 0, 0) °/s. Orientation state is reset afterwards. On failure the
    /// previous corrections are kept and the samples already taken are
    /// discarded along with the orientation state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `samples` is zero, or an error if
    /// communication with the device fails.
    pub fn calibrate(&mut self, samples: u16) -> Result<(AccelBias, GyroBias), Error<E>> {
        if samples == 0 {
            self.status = Status::InvalidConfig;
            return Err(Error::InvalidConfig);
        }

        let previous = (self.accel_bias, self.gyro_bias);
        let throttle = self.throttle;
        self.accel_bias = AccelBias::default();
        self.gyro_bias = GyroBias::default();
        self.throttle = false;

        let result = self.average_samples(samples);
        self.throttle = throttle;

        let (accel, gyro) = match result {
            Ok(averages) => averages,
            Err(e) => {
                (self.accel_bias, self.gyro_bias) = previous;
                self.clear_motion_state();
                return Err(e);
            }
        };

        self.accel_bias = AccelBias {
            x: -accel.x,
            y: -accel.y,
            z: 1.0 - accel.z,
        };
        self.gyro_bias = GyroBias {
            x: -gyro.x,
            y: -gyro.y,
            z: -gyro.z,
        };
        self.clear_motion_state();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "GY521 calibrated: accel bias={}, gyro bias={}",
            self.accel_bias,
            self.gyro_bias
        );

        Ok((self.accel_bias, self.gyro_bias))
    }

    fn average_samples(&mut self, samples: u16) -> Result<(AccelDataG, GyroDataDps), Error<E>> {
        let mut accel = AccelDataG::default();
        let mut gyro = GyroDataDps::default();

        for _ in 0..samples {
            self.read()?;
            accel.x += self.accel.x;
            accel.y += self.accel.y;
            accel.z += self.accel.z;
            gyro.x += self.gyro.x;
            gyro.y += self.gyro.y;
            gyro.z += self.gyro.z;
        }

        let n = f32::from(samples);
        Ok((
            AccelDataG {
                x: accel.x / n,
                y: accel.y / n,
                z: accel.z / n,
            },
            GyroDataDps {
                x: gyro.x / n,
                y: gyro.y / n,
                z: gyro.z / n,
            },
        ))
    }

    /// Enable or disable read throttling
    pub fn set_throttle(&mut self, enable: bool) {
        self.throttle = enable;
    }

    /// Whether read throttling is enabled
    #[must_use]
    pub const fn get_throttle(&self) -> bool {
        self.throttle
    }

    /// Set the minimum interval between throttled reads, in milliseconds
    pub fn set_throttle_time(&mut self, ms: u16) {
        self.throttle_time_ms = ms;
    }

    /// Minimum interval between throttled reads, in milliseconds
    #[must_use]
    pub const fn get_throttle_time(&self) -> u16 {
        self.throttle_time_ms
    }

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        let result = self.read_block(register, &mut buffer);
        self.latch(result)?;
        Ok(buffer[0])
    }

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        let result = self.device.interface.write_register(register, 8, &[value]);
        self.latch(result)
    }

    /// Status of the most recent operation that talked to the device
    #[must_use]
    pub const fn last_status(&self) -> Status {
        self.status
    }

    /// Latest acceleration in g, bias corrected
    #[must_use]
    pub const fn accel(&self) -> AccelDataG {
        self.accel
    }

    /// X-axis acceleration in g
    #[must_use]
    pub const fn accel_x(&self) -> f32 {
        self.accel.x
    }

    /// Y-axis acceleration in g
    #[must_use]
    pub const fn accel_y(&self) -> f32 {
        self.accel.y
    }

    /// Z-axis acceleration in g
    #[must_use]
    pub const fn accel_z(&self) -> f32 {
        self.accel.z
    }

    /// Latest accelerometer tilt angles in degrees
    #[must_use]
    pub const fn tilt(&self) -> TiltAngles {
        self.tilt
    }

    /// Accelerometer tilt about X in degrees
    #[must_use]
    pub const fn angle_x(&self) -> f32 {
        self.tilt.x
    }

    /// Accelerometer tilt about Y in degrees
    #[must_use]
    pub const fn angle_y(&self) -> f32 {
        self.tilt.y
    }

    /// Accelerometer inclination of Z in degrees
    #[must_use]
    pub const fn angle_z(&self) -> f32 {
        self.tilt.z
    }

    /// Latest rotation rate in °/s, bias corrected
    #[must_use]
    pub const fn gyro(&self) -> GyroDataDps {
        self.gyro
    }

    /// X-axis rotation rate in °/s
    #[must_use]
    pub const fn gyro_x(&self) -> f32 {
        self.gyro.x
    }

    /// Y-axis rotation rate in °/s
    #[must_use]
    pub const fn gyro_y(&self) -> f32 {
        self.gyro.y
    }

    /// Z-axis rotation rate in °/s
    #[must_use]
    pub const fn gyro_z(&self) -> f32 {
        self.gyro.z
    }

    /// Accumulated gyro X angle in degrees
    #[must_use]
    pub const fn gyro_angle_x(&self) -> f32 {
        self.orientation.gyro_angle_x
    }

    /// Accumulated gyro Y angle in degrees
    #[must_use]
    pub const fn gyro_angle_y(&self) -> f32 {
        self.orientation.gyro_angle_y
    }

    /// Accumulated gyro Z angle in degrees
    #[must_use]
    pub const fn gyro_angle_z(&self) -> f32 {
        self.orientation.gyro_angle_z
    }

    /// Latest temperature in °C
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Full orientation state
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Pitch in degrees
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.orientation.pitch
    }

    /// Roll in degrees
    #[must_use]
    pub const fn roll(&self) -> f32 {
        self.orientation.roll
    }

    /// Yaw in degrees
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.orientation.yaw
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &registers::Mpu6050<I> {
        &self.device
    }

    /// Consume the driver and return the underlying interface and clock
    pub fn release(self) -> (I, C) {
        (self.device.interface, self.clock)
    }

    /// Throttle gate shared by the full and partial reads
    ///
    /// Records the read time when the read is allowed to proceed, even if
    /// the bus transfer later fails.
    fn throttled(&mut self) -> bool {
        let now = self.clock.now_ms();
        if self.throttle
            && let Some(last) = self.last_read_ms
            && now.saturating_sub(last) < u64::from(self.throttle_time_ms)
        {
            #[cfg(feature = "defmt")]
            defmt::trace!("GY521 read throttled");
            return true;
        }
        self.last_read_ms = Some(now);
        false
    }

    /// Seconds since the previous gyro sample; zero for the first one
    fn gyro_interval(&mut self) -> f32 {
        let now = self.clock.now_us();
        let dt = self
            .last_gyro_us
            .map_or(0.0, |last| clock::elapsed_seconds(last, now));
        self.last_gyro_us = Some(now);
        dt
    }

    fn update_accel(&mut self, raw: [i16; 3]) {
        let scaled =
            AccelDataG::from_raw(raw[0], raw[1], raw[2], self.accel_full_scale.scale_factor());
        self.accel = self.accel_bias.apply(scaled);
        self.tilt = TiltAngles::from_accel(&self.accel);
    }

    fn update_gyro(&mut self, raw: [i16; 3], dt: f32) {
        let scaled =
            GyroDataDps::from_raw(raw[0], raw[1], raw[2], self.gyro_full_scale.scale_factor());
        self.gyro = self.gyro_bias.apply(scaled);
        self.orientation.integrate(&self.gyro, dt);
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        // Bursts are at most 14 bytes
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.device
            .interface
            .read_register(register, size_bits, buffer)
    }

    /// Record the outcome of a bus operation in the status latch
    fn latch<T>(&mut self, result: Result<T, Error<E>>) -> Result<T, Error<E>> {
        self.status = match &result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        };

        #[cfg(feature = "defmt")]
        if self.status.is_error() {
            defmt::warn!("GY521 bus error: {}", self.status);
        }

        result
    }
}
