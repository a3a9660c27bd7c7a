//! Bus interface implementations for the GY-521
//!
//! The MPU-6050 on the GY-521 board speaks I2C only. Every register read is
//! two transactions: a register-select write, then a plain read of the
//! requested number of bytes. The two are kept separate so a device that does
//! not acknowledge the select is reported as [`Error::Write`] and a transfer
//! that fails or comes back short is reported as [`Error::Read`].

use crate::{Error, I2C_ADDRESS_AD0_HIGH, I2C_ADDRESS_AD0_LOW};

use device_driver::RegisterInterface;

/// Register interface with an address probe
///
/// Implemented by [`I2cInterface`]; test doubles implement it to stand in
/// for the bus.
pub trait Gy521Interface: RegisterInterface<AddressType = u8> {
    /// Issue a zero-length transaction to the device address
    ///
    /// # Errors
    ///
    /// Returns an error if the device does not acknowledge its address.
    fn probe(&mut self) -> Result<(), Self::Error>;
}

/// I2C interface for the GY-521
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x68, AD0 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Gy521Driver::new(interface, clock);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, AD0 pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write(self.address, &[address])
            .map_err(Error::Write)?;
        self.i2c.read(self.address, read_data).map_err(Error::Read)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Register address followed by data, sent as one transaction
        let mut buffer = [0u8; 15];
        buffer[0] = address;
        let len = write_data.len().min(14);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c
            .write(self.address, &buffer[..=len])
            .map_err(Error::Write)
    }
}

impl<I2C, E> Gy521Interface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    fn probe(&mut self) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[]).map_err(|_| Error::NotConnected)
    }
}
