//! Username and password changes for the logged-in operator.

use serde::{Deserialize, Serialize};

use crate::shared::api::{ApiError, ValidationError};

pub const CHANGE_USERNAME_PATH: &str = "/api/manajemen/change-username";
pub const CHANGE_PASSWORD_PATH: &str = "/api/manajemen/change-password";

pub const RELOGIN_NOTICE: &str = "Silakan login kembali dengan password baru Anda.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeUsernameForm {
    pub old_username: String,
    pub new_username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    pub old_username: String,
    pub new_username: String,
    pub password: String,
}

impl ChangeUsernameForm {
    pub fn validate(&self) -> Result<ChangeUsernameRequest, ValidationError> {
        let old_username = required(&self.old_username, "Username lama")?;
        let new_username = required(&self.new_username, "Username baru")?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        if old_username == new_username {
            return Err(ValidationError::UsernameUnchanged);
        }
        Ok(ChangeUsernameRequest {
            old_username,
            new_username,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, ValidationError> {
        let username = required(&self.username, "Username")?;
        if self.old_password.is_empty() {
            return Err(ValidationError::Required("Password lama"));
        }
        if self.new_password.is_empty() {
            return Err(ValidationError::Required("Password baru"));
        }
        if self.new_password == self.old_password {
            return Err(ValidationError::PasswordUnchanged);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(ChangePasswordRequest {
            username,
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

fn required(raw: &str, what: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(what))
    } else {
        Ok(trimmed.to_string())
    }
}

/// `{success, message, token?}` of both account routes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl AccountResponse {
    pub fn into_result(self) -> Result<String, ApiError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ApiError::Application(self.message))
        }
    }
}

/// "✓ msg" block shown after a successful change
pub fn success_text(message: &str, details: &[(&str, &str)]) -> String {
    let mut text = format!("✓ {}", message);
    if !details.is_empty() {
        text.push('\n');
        for (label, value) in details {
            text.push_str(&format!("\n{}: {}", label, value));
        }
    }
    text
}

pub fn failure_text(message: &str) -> String {
    format!("✗ {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_change_rules() {
        let mut form = ChangeUsernameForm {
            old_username: "admin".into(),
            new_username: " admin ".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::UsernameUnchanged));
        form.new_username = "mandor1".into();
        let json = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(json["oldUsername"], "admin");
        assert_eq!(json["newUsername"], "mandor1");
    }

    #[test]
    fn test_password_change_rules() {
        let mut form = ChangePasswordForm {
            username: "admin".into(),
            old_password: "lama".into(),
            new_password: "lama".into(),
            confirm_password: "lama".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordUnchanged));
        form.new_password = "baru".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
        form.confirm_password = "baru".into();
        let req = form.validate().unwrap();
        assert_eq!(req.new_password, "baru");
        form.username.clear();
        assert_eq!(form.validate(), Err(ValidationError::Required("Username")));
    }

    #[test]
    fn test_result_texts() {
        assert_eq!(
            success_text("Username berhasil diubah", &[("Username Lama", "a"), ("Username Baru", "b")]),
            "✓ Username berhasil diubah\n\nUsername Lama: a\nUsername Baru: b"
        );
        assert_eq!(failure_text("Password lama salah"), "✗ Password lama salah");
        let failed = AccountResponse {
            success: false,
            message: "Password lama salah".into(),
            token: None,
        };
        assert_eq!(failed.into_result(), Err(ApiError::Application("Password lama salah".into())));
    }
}
