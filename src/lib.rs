#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod clock;
pub mod device;
pub mod interface;
pub mod orientation;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use clock::Clock;
pub use device::{Gy521Driver, RawSample, ReadOutcome};
pub use interface::{Gy521Interface, I2cInterface};
pub use orientation::{Orientation, TiltAngles};
pub use sensors::{
    AccelBias, AccelDataG, AccelFullScale, GyroBias, GyroDataDps, GyroFullScale,
};

/// GY-521 I2C address when AD0 pin is low (default: 0x68)
///
/// Most breakout boards pull AD0 low. Use [`I2cInterface::default()`]
/// for this configuration.
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// GY-521 I2C address when AD0 pin is high (alternative: 0x69)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Default minimum interval between two throttled reads, in milliseconds
pub const DEFAULT_THROTTLE_TIME_MS: u16 = 10;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Register-select (or register write) transaction was not acknowledged
    Write(E),
    /// Data transfer from the device failed or returned fewer bytes than requested
    Read(E),
    /// Device did not acknowledge its address
    NotConnected,
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> Error<E> {
    /// Status code latched for this error
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Write(_) => Status::WriteError,
            Self::Read(_) => Status::ReadError,
            Self::NotConnected => Status::NotConnected,
            Self::InvalidConfig => Status::InvalidConfig,
        }
    }
}

/// Outcome of the most recent bus-facing operation
///
/// Every operation that talks to the device overwrites this, so it stays
/// readable through [`Gy521Driver::last_status`] until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Operation completed
    #[default]
    Ok,
    /// Read skipped because the throttle interval had not elapsed (not an error)
    ///
    /// Only reported through [`ReadOutcome::status`]; a throttled read does not
    /// overwrite the latched status.
    Throttled,
    /// Register-select or register write not acknowledged
    WriteError,
    /// Data transfer failed or came back short
    ReadError,
    /// Device did not answer on its address
    NotConnected,
    /// Rejected argument, nothing was sent to the device
    InvalidConfig,
}

impl Status {
    /// Legacy numeric status code (0 = ok, 1 = throttled, negative = error)
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Ok => 0,
            Self::Throttled => 1,
            Self::ReadError => -1,
            Self::WriteError => -2,
            Self::NotConnected => -3,
            Self::InvalidConfig => -4,
        }
    }

    /// Whether this status represents a failure
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.code() < 0
    }
}
