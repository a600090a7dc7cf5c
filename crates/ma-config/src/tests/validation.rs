use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Credential Limits
// =========================================================================

#[test]
#[serial]
fn given_min_password_below_floor_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _min = EnvGuard::set("MA_VALIDATION_MIN_PASSWORD_LENGTH", "4");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_min_password_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _min = EnvGuard::set("MA_VALIDATION_MIN_PASSWORD_LENGTH", "129");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_max_email_length_too_small_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _max = EnvGuard::set("MA_VALIDATION_MAX_EMAIL_LENGTH", "3");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_valid_limits_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _min = EnvGuard::set("MA_VALIDATION_MIN_PASSWORD_LENGTH", "12");
    let _max = EnvGuard::set("MA_VALIDATION_MAX_EMAIL_LENGTH", "100");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}
