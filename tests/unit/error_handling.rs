//! Unit tests for error handling and the status latch

use crate::common::{MockError, Operation, create_started_driver};
use gy521::{Error, ReadOutcome, Status};

#[test]
fn test_unacknowledged_select_is_write_error() {
    let (mut driver, interface, _clock) = create_started_driver();
    interface.fail_next_write();

    let result = driver.read();

    assert_eq!(result, Err(Error::Write(MockError::Nack)));
    assert_eq!(driver.last_status(), Status::WriteError);
    assert_eq!(driver.last_status().code(), -2);
}

#[test]
fn test_short_transfer_is_read_error() {
    let (mut driver, interface, _clock) = create_started_driver();
    interface.fail_next_read();

    let result = driver.read();

    assert_eq!(result, Err(Error::Read(MockError::ShortRead)));
    assert_eq!(driver.last_status(), Status::ReadError);
    assert_eq!(driver.last_status().code(), -1);
    assert!(driver.last_status().is_error());
}

#[test]
fn test_failed_read_leaves_state_unchanged() {
    let (mut driver, interface, clock) = create_started_driver();
    interface.set_accel_data(0, 0, 16384);
    interface.set_temperature_data(340);
    driver.read().unwrap();
    let accel = driver.accel();
    let orientation = driver.orientation();
    let temperature = driver.temperature();

    interface.set_accel_data(16384, 0, 0);
    interface.set_temperature_data(0);
    clock.advance_ms(10);
    interface.fail_next_read();
    assert!(driver.read().is_err());

    assert_eq!(driver.accel(), accel);
    assert_eq!(driver.orientation(), orientation);
    assert_eq!(driver.temperature(), temperature);
}

#[test]
fn test_failed_read_still_counts_for_throttle() {
    let (mut driver, interface, clock) = create_started_driver();
    interface.fail_next_write();

    assert!(driver.read().is_err());
    assert_eq!(driver.read().unwrap(), ReadOutcome::Throttled);

    clock.advance_ms(10);
    assert_eq!(driver.read().unwrap(), ReadOutcome::Updated);
}

#[test]
fn test_no_retry_after_failure() {
    let (mut driver, interface, _clock) = create_started_driver();
    interface.fail_next_read();

    assert!(driver.read().is_err());

    // Exactly one attempt reached the bus
    assert_eq!(
        interface.operations(),
        vec![Operation::ReadBlock {
            address: 0x3B,
            len: 14
        }]
    );
}

#[test]
fn test_status_is_sticky_until_next_operation() {
    let (mut driver, interface, clock) = create_started_driver();
    interface.fail_next_read();
    assert!(driver.read_temperature().is_err());

    // Pure configuration does not clear it
    driver.set_throttle_time(20);
    driver.set_throttle(true);
    assert_eq!(driver.last_status(), Status::ReadError);

    clock.advance_ms(20);
    driver.read().unwrap();
    assert_eq!(driver.last_status(), Status::Ok);
}

#[test]
fn test_partial_read_errors() {
    let (mut driver, interface, clock) = create_started_driver();

    interface.fail_next_write();
    assert_eq!(driver.read_accel(), Err(Error::Write(MockError::Nack)));

    clock.advance_ms(10);
    interface.fail_next_read();
    assert_eq!(driver.read_gyro(), Err(Error::Read(MockError::ShortRead)));

    interface.fail_next_write();
    assert_eq!(driver.read_temperature(), Err(Error::Write(MockError::Nack)));
}

#[test]
fn test_raw_register_access() {
    let (mut driver, interface, _clock) = create_started_driver();

    driver.set_register(0x1A, 0x03).unwrap();
    assert_eq!(interface.get_register(0x1A), 0x03);
    assert_eq!(driver.get_register(0x1A).unwrap(), 0x03);

    interface.fail_next_write();
    assert_eq!(
        driver.set_register(0x1A, 0x00),
        Err(Error::Write(MockError::Nack))
    );
    interface.fail_next_read();
    assert_eq!(
        driver.get_register(0x1A),
        Err(Error::Read(MockError::ShortRead))
    );
    assert_eq!(driver.last_status(), Status::ReadError);
}

#[test]
fn test_zero_calibration_samples_rejected() {
    let (mut driver, interface, _clock) = create_started_driver();

    assert_eq!(driver.calibrate(0), Err(Error::InvalidConfig));
    assert_eq!(driver.last_status(), Status::InvalidConfig);
    assert!(interface.operations().is_empty());
}
