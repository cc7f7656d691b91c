//! Auth data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `POST Account/login` payload.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Backend answer to account operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub is_success: bool,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// `GET Account/detail` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub id: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn login_request_debug_hides_password() {
        let request = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let debug = format!("{request:?}");

        assert!(!debug.contains("hunter22"), "password leaked: {debug}");
    }

    #[test]
    fn auth_response_tolerates_missing_fields() -> TestResult {
        let response: AuthResponse =
            serde_json::from_str(r#"{"isSuccess":false,"message":"Invalid credentials"}"#)?;

        assert!(!response.is_success);
        assert!(response.token.is_none());
        assert_eq!(response.message.as_deref(), Some("Invalid credentials"));

        Ok(())
    }
}
