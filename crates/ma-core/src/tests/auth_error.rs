use crate::{AuthError, StoreError};

#[test]
fn given_form_errors_when_field_requested_then_names_the_field() {
    assert_eq!(AuthError::invalid_email("bad").field(), Some("email"));
    assert_eq!(AuthError::conflict("a@b.com").field(), Some("email"));
    assert_eq!(AuthError::weak_password(6).field(), Some("password"));
    assert_eq!(AuthError::invalid_credentials().field(), Some("password"));
}

#[test]
fn given_network_failure_when_inspected_then_generic_and_retryable() {
    let err = AuthError::network("connection refused");

    assert!(!err.is_field_error());
    assert!(err.is_retryable());
    assert!(!err.user_message().contains("connection refused"));
    assert_eq!(err.error_code(), "NETWORK_FAILURE");
}

#[test]
fn given_store_errors_when_converted_then_map_to_profile_failures() {
    let read: AuthError = StoreError::read("timeout").into();
    let write: AuthError = StoreError::write("constraint").into();

    assert!(matches!(read, AuthError::ProfileReadFailure { .. }));
    assert!(matches!(write, AuthError::ProfileWriteFailure { .. }));
}

#[test]
fn given_any_error_when_user_message_then_non_empty() {
    let errors = vec![
        AuthError::invalid_credentials(),
        AuthError::invalid_email("Enter a valid email"),
        AuthError::weak_password(6),
        AuthError::conflict("a@b.com"),
        AuthError::network("x"),
        AuthError::profile_write("x"),
        AuthError::profile_read("x"),
        AuthError::already_subscribed(),
    ];

    for err in errors {
        assert!(!err.user_message().is_empty(), "{err:?}");
    }
}
