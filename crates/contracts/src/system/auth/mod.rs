use serde::{Deserialize, Serialize};

use crate::shared::api::{ApiError, ValidationError};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Trims both fields; reports both missing at once
    pub fn from_form(username: &str, password: &str) -> Result<Self, ValidationError> {
        let (username, password) = (username.trim(), password.trim());
        match (username.is_empty(), password.is_empty()) {
            (true, true) => Err(ValidationError::Required("Username dan Password")),
            (true, false) => Err(ValidationError::Required("Username")),
            (false, true) => Err(ValidationError::Required("Password")),
            (false, false) => Ok(Self {
                username: username.to_string(),
                password: password.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl LoginResponse {
    /// Logged-in user name; falls back to what was typed
    pub fn into_result(self, typed_username: &str) -> Result<String, ApiError> {
        if !self.success {
            return Err(ApiError::Application(format!("Login gagal: {}", self.message)));
        }
        Ok(self
            .user
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| typed_username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_messages() {
        assert_eq!(
            LoginRequest::from_form(" ", "").unwrap_err().to_string(),
            "Username dan Password wajib diisi"
        );
        assert_eq!(
            LoginRequest::from_form("", "x"),
            Err(ValidationError::Required("Username"))
        );
        assert_eq!(
            LoginRequest::from_form("admin ", " secret").unwrap(),
            LoginRequest {
                username: "admin".into(),
                password: "secret".into()
            }
        );
    }

    #[test]
    fn test_login_response() {
        let ok: LoginResponse =
            serde_json::from_str(r#"{"success":true,"message":"ok","user":"admin"}"#).unwrap();
        assert_eq!(ok.into_result("x").unwrap(), "admin");
        let failed: LoginResponse =
            serde_json::from_str(r#"{"success":false,"message":"Password salah"}"#).unwrap();
        assert_eq!(
            failed.into_result("x").unwrap_err().alert_text(),
            "Gagal: Login gagal: Password salah"
        );
    }
}
