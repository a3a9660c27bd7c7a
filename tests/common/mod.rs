//! Common test utilities and mock implementations

#![allow(dead_code)]

pub mod test_utils;

pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{
    MockClock, MockDriver, assert_float_eq, create_mock_driver, create_started_driver,
};
