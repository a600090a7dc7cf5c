//! Mapping provider error replies onto `AuthError`.

use crate::remote::client::ApiResponse;

use ma_core::AuthError;

use reqwest::StatusCode;
use serde_json::Value;

/// Which call failed; decides how an unrecognized 4xx is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    SignIn,
    SignUp,
}

fn string_field<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| body.get(*key).and_then(Value::as_str))
}

pub(crate) fn provider_message(body: &Value) -> String {
    string_field(body, &["msg", "message", "error_description", "error"])
        .map(str::to_string)
        .or_else(|| body.as_str().map(str::to_string))
        .unwrap_or_else(|| String::from("no error detail"))
}

#[track_caller]
pub(crate) fn classify(
    response: &ApiResponse,
    endpoint: Endpoint,
    email: &str,
    min_password_length: usize,
) -> AuthError {
    let status = response.status;
    let body = &response.body;
    let code = string_field(body, &["error_code", "error"]).unwrap_or_default();

    match code {
        "invalid_grant" | "invalid_credentials" => return AuthError::invalid_credentials(),
        "user_already_exists" | "email_exists" => return AuthError::conflict(email),
        "weak_password" => return AuthError::weak_password(min_password_length),
        "email_address_invalid" | "validation_failed" => {
            return AuthError::invalid_email("Enter a valid email");
        }
        _ => {}
    }

    if status == StatusCode::CONFLICT {
        return AuthError::conflict(email);
    }

    if endpoint == Endpoint::SignIn
        && (status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED)
    {
        return AuthError::invalid_credentials();
    }

    AuthError::network(format!(
        "provider returned {status}: {}",
        provider_message(body)
    ))
}
