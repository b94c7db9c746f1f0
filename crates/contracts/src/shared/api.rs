//! Response envelope and error taxonomy shared by every endpoint.
//!
//! The backend answers `{ "success": bool, "data": ..., "message": "..." }`
//! for most routes, and a bare JSON array for a few older list routes.
//! Everything the client receives goes through [`ApiEnvelope::into_result`]
//! or [`ListResponse::into_result`] so that transport, HTTP and application
//! failures all end up as one [`ApiError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard `{success, data|message}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// `success:false` becomes [`ApiError::Application`] carrying the server message
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Application(
                self.message.unwrap_or_else(|| "Permintaan gagal".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("respons tanpa field data".to_string()))
    }

    /// For create/update/delete acknowledgements where only the message matters
    pub fn into_ack(self) -> Result<String, ApiError> {
        if self.success {
            Ok(self.message.unwrap_or_default())
        } else {
            Err(ApiError::Application(
                self.message.unwrap_or_else(|| "Permintaan gagal".to_string()),
            ))
        }
    }
}

/// List routes answer either with the envelope or with a bare array.
///
/// `Bare` is tried first: an empty array would otherwise deserialize as an
/// envelope with every field defaulted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Envelope(ApiEnvelope<Vec<T>>),
}

impl<T> ListResponse<T> {
    pub fn into_result(self) -> Result<Vec<T>, ApiError> {
        match self {
            ListResponse::Bare(items) => Ok(items),
            // A successful envelope without data is an empty list, not an error
            ListResponse::Envelope(env) if env.success => Ok(env.data.unwrap_or_default()),
            ListResponse::Envelope(env) => env.into_result(),
        }
    }
}

/// Client-side validation failures. Raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Silakan pilih mandor dari daftar yang tersedia!")]
    MissingMandor,
    #[error("Silakan pilih penyadap dari daftar yang tersedia!")]
    MissingPenyadap,
    #[error("ID {0} tidak valid. Silakan pilih dari daftar!")]
    InvalidId(&'static str),
    #[error("Silakan pilih tanggal awal dan akhir!")]
    MissingDateRange,
    #[error("Format tanggal tidak valid: {0}")]
    InvalidDate(String),
    #[error("Tanggal awal tidak boleh setelah tanggal akhir")]
    InvertedDateRange,
    #[error("{0} wajib diisi")]
    Required(&'static str),
    #[error("Ukuran file terlalu besar (maksimal {max_mb}MB)")]
    FileTooLarge { max_mb: u64 },
    #[error("Konfirmasi password tidak cocok")]
    PasswordMismatch,
    #[error("Password baru harus berbeda dari password lama")]
    PasswordUnchanged,
    #[error("Username baru harus berbeda dari username lama")]
    UsernameUnchanged,
    #[error("Tambahkan minimal {0} data untuk dibandingkan!")]
    TooFewComparisons(usize),
    #[error("Maksimal {0} perbandingan")]
    TooManyComparisons(usize),
    /// 1-based card number
    #[error("Lengkapi semua field yang wajib pada kartu {0}!")]
    IncompleteCard(usize),
}

/// Everything that can go wrong between a form and the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// fetch rejected (network down, CORS, aborted)
    #[error("Kesalahan jaringan: {0}")]
    Transport(String),
    /// non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// 200 with `success:false`
    #[error("{0}")]
    Application(String),
    #[error("Gagal membaca respons: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the blocking alert shown to the operator
    pub fn alert_text(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Application(msg) => format!("Gagal: {}", msg),
            other => format!("Error: {}", other),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_yields_data() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2,3]}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_failure_carries_server_message() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success":false,"message":"Mandor tidak ditemukan"}"#)
                .unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err, ApiError::Application("Mandor tidak ditemukan".to_string()));
        assert_eq!(err.alert_text(), "Gagal: Mandor tidak ditemukan");
    }

    #[test]
    fn test_list_response_accepts_bare_array_and_envelope() {
        let bare: ListResponse<i32> = serde_json::from_str("[4,5]").unwrap();
        assert_eq!(bare.into_result().unwrap(), vec![4, 5]);

        let empty: ListResponse<i32> = serde_json::from_str("[]").unwrap();
        assert!(empty.into_result().unwrap().is_empty());

        let wrapped: ListResponse<i32> =
            serde_json::from_str(r#"{"success":true,"data":[6]}"#).unwrap();
        assert_eq!(wrapped.into_result().unwrap(), vec![6]);

        let no_data: ListResponse<i32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(no_data.into_result().unwrap().is_empty());
    }

    #[test]
    fn test_alert_text_per_category() {
        assert_eq!(
            ApiError::from(ValidationError::MissingPenyadap).alert_text(),
            "Silakan pilih penyadap dari daftar yang tersedia!"
        );
        assert_eq!(
            ApiError::Transport("Failed to fetch".into()).alert_text(),
            "Error: Kesalahan jaringan: Failed to fetch"
        );
        assert_eq!(
            ApiError::Http { status: 500, body: "boom".into() }.alert_text(),
            "Error: HTTP 500: boom"
        );
    }
}
