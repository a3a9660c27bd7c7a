//! Register definitions for the GY-521 (MPU-6050)
//!
//! Only the registers the driver touches are declared. The MPU-6050 has a
//! flat register map (no banks); the sensor data registers are laid out
//! consecutively so a single burst starting at `ACCEL_XOUT_H` returns
//! accelerometer, temperature and gyroscope samples in one transfer:
//!
//! | Address     | Content                        |
//! |-------------|--------------------------------|
//! | 0x3B..0x40  | `ACCEL_XOUT_H` .. `ACCEL_ZOUT_L` |
//! | 0x41..0x42  | `TEMP_OUT_H`, `TEMP_OUT_L`       |
//! | 0x43..0x48  | `GYRO_XOUT_H` .. `GYRO_ZOUT_L`   |

/// First accelerometer data register (burst read start)
pub const ACCEL_XOUT_H: u8 = 0x3B;
/// Temperature data register (high byte)
pub const TEMP_OUT_H: u8 = 0x41;
/// First gyroscope data register
pub const GYRO_XOUT_H: u8 = 0x43;

/// Bytes in a full accel + temperature + gyro burst
pub const FULL_BURST_LEN: usize = 14;
/// Bytes in a three-axis burst (accel or gyro)
pub const AXES_BURST_LEN: usize = 6;
/// Bytes in the temperature register pair
pub const TEMP_BURST_LEN: usize = 2;

device_driver::create_device!(
    device_name: Mpu6050,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// GYRO_CONFIG - Gyroscope configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale select (0 = ±250, 1 = ±500, 2 = ±1000, 3 = ±2000 °/s)
            fs_sel: uint = 3..5,
            /// Z-axis self-test
            zg_st: bool = 5,
            /// Y-axis self-test
            yg_st: bool = 6,
            /// X-axis self-test
            xg_st: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale select (0 = ±2g, 1 = ±4g, 2 = ±8g, 3 = ±16g)
            afs_sel: uint = 3..5,
            /// Z-axis self-test
            za_st: bool = 5,
            /// Y-axis self-test
            ya_st: bool = 6,
            /// X-axis self-test
            xa_st: bool = 7,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        ///
        /// Powers up with `sleep` set; the device must be woken before it samples.
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0 = internal 8MHz, 1..3 = gyro PLL)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and single sample
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset
            device_reset: bool = 7,
        },

        /// WHO_AM_I - Device ID Register (0x75)
        /// Expected value: 0x68
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID (should read 0x68 regardless of AD0)
            who_am_i: uint = 0..8,
        }
    }
);
