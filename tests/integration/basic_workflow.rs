//! Integration tests for basic workflow scenarios

use crate::common::{assert_float_eq, create_mock_driver};
use gy521::{AccelFullScale, GyroFullScale, ReadOutcome, Status};

#[test]
fn test_complete_initialization_workflow() {
    let (mut driver, interface, clock) = create_mock_driver();

    // Start the device
    driver.begin().unwrap();

    // Configure ranges
    assert_eq!(driver.set_accel_sensitivity(1).unwrap(), AccelFullScale::G4);
    assert_eq!(driver.set_gyro_sensitivity(1).unwrap(), GyroFullScale::Dps500);
    assert_eq!(driver.get_accel_sensitivity().unwrap(), AccelFullScale::G4);
    assert_eq!(driver.get_gyro_sensitivity().unwrap(), GyroFullScale::Dps500);

    // ±4g: 8192 LSB/g, ±500°/s: 65.5 LSB/(°/s)
    interface.set_accel_data(0, 0, 8192);
    interface.set_gyro_data(0, 131, 0);
    interface.set_temperature_data(1700);

    assert_eq!(driver.read().unwrap(), ReadOutcome::Updated);
    assert_float_eq(driver.accel_z(), 1.0, 1e-5);
    assert_float_eq(driver.gyro_y(), 2.0, 1e-4);
    assert_float_eq(driver.temperature(), 41.53, 1e-4);

    // Pitch up at 2°/s for 100 reads of 10 ms
    for _ in 0..100 {
        clock.advance_ms(10);
        assert_eq!(driver.read().unwrap(), ReadOutcome::Updated);
    }

    assert_float_eq(driver.gyro_angle_y(), 2.0, 1e-3);
    assert_float_eq(driver.pitch(), 0.96 * 2.0, 1e-3);
    assert_float_eq(driver.roll(), 0.0, 1e-4);
    assert_float_eq(driver.yaw(), 0.0, 1e-4);
    assert_eq!(driver.last_status(), Status::Ok);
}

#[test]
fn test_polling_loop_with_throttle() {
    let (mut driver, interface, clock) = create_mock_driver();
    driver.begin().unwrap();
    interface.set_accel_data(0, 0, 16384);

    let mut updated = 0;
    let mut throttled = 0;
    // Poll every millisecond for 100 ms
    for _ in 0..100 {
        match driver.read().unwrap() {
            ReadOutcome::Updated => updated += 1,
            ReadOutcome::Throttled => throttled += 1,
        }
        clock.advance_ms(1);
    }

    assert_eq!(updated, 10);
    assert_eq!(throttled, 90);
}

#[test]
fn test_error_recovery() {
    let (mut driver, interface, clock) = create_mock_driver();
    driver.begin().unwrap();
    interface.set_accel_data(0, 0, 16384);

    interface.fail_next_read();
    assert!(driver.read().is_err());
    assert_eq!(driver.last_status(), Status::ReadError);

    // Caller decides to retry after the throttle interval
    clock.advance_ms(10);
    assert_eq!(driver.read().unwrap(), ReadOutcome::Updated);
    assert_float_eq(driver.accel_z(), 1.0, 1e-6);
    assert_eq!(driver.last_status(), Status::Ok);
}
