use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::api::{ApiError, ValidationError};
use crate::shared::lenient;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Uploaded production workbook
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Master {
    #[serde(
        default,
        alias = "ID",
        alias = "Id",
        alias = "id_master",
        alias = "IDMaster",
        deserialize_with = "lenient::u64_or_string"
    )]
    pub id: u64,

    #[serde(default, alias = "Tanggal", alias = "tanggal_str")]
    pub tanggal: String,

    #[serde(default, alias = "Afdeling")]
    pub afdeling: String,

    #[serde(default, alias = "NamaFile", alias = "FileName", alias = "fileName")]
    pub nama_file: String,
}

impl AggregateRoot for Master {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn description(&self) -> String {
        self.nama_file.clone()
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "master"
    }

    fn element_name() -> &'static str {
        "Master"
    }

    fn list_name() -> &'static str {
        "Daftar Master"
    }
}

/// What the upload form holds before the file goes into a multipart body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub tanggal: String,
    pub afdeling: String,
    /// Name and size of the picked file
    pub file: Option<(String, u64)>,
}

impl UploadForm {
    pub fn validate(&self, max_bytes: u64) -> Result<(), ValidationError> {
        let Some((_, size)) = &self.file else {
            return Err(ValidationError::Required("Tanggal, afdeling, dan file"));
        };
        if self.tanggal.trim().is_empty() || self.afdeling.trim().is_empty() {
            return Err(ValidationError::Required("Tanggal, afdeling, dan file"));
        }
        if *size > max_bytes {
            return Err(ValidationError::FileTooLarge {
                max_mb: max_bytes / (1024 * 1024),
            });
        }
        Ok(())
    }
}

/// Flat answer of `POST /api/upload`; processing continues server-side
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tanggal: String,
    #[serde(default)]
    pub afdeling: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub file_size: u64,
}

impl UploadResponse {
    pub fn into_result(self) -> Result<UploadResponse, ApiError> {
        if self.success {
            Ok(self)
        } else if self.message.is_empty() {
            Err(ApiError::Application("Upload gagal".to_string()))
        } else {
            Err(ApiError::Application(self.message))
        }
    }

    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.file_size as f64 / 1024.0)
    }
}

/// Shown under the file picker: "1.50 MB (1536.00 KB)"
pub fn file_size_label(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    format!("{:.2} MB ({:.2} KB)", kb / 1024.0, kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_key_aliases() {
        let list: Vec<Master> = serde_json::from_str(
            r#"[{"id":1,"tanggal":"2024-01-05T00:00:00Z","afdeling":"Setro","nama_file":"a.xlsx"},
                {"ID":"2","Tanggal":"2024-01-06","Afdeling":"Klepu","FileName":"b.xlsx"}]"#,
        )
        .unwrap();
        assert_eq!(list[1].id, 2);
        assert_eq!(list[1].nama_file, "b.xlsx");
        assert_eq!(Master::item_path(list[0].id), "/api/master/1");
    }

    #[test]
    fn test_upload_requires_all_fields_and_size_limit() {
        let mut form = UploadForm {
            tanggal: "2024-01-05".into(),
            afdeling: "setro".into(),
            file: None,
        };
        assert_eq!(
            form.validate(MAX_UPLOAD_BYTES),
            Err(ValidationError::Required("Tanggal, afdeling, dan file"))
        );
        form.file = Some(("rekap.xlsx".into(), MAX_UPLOAD_BYTES + 1));
        assert_eq!(
            form.validate(MAX_UPLOAD_BYTES).map_err(|e| e.to_string()),
            Err("Ukuran file terlalu besar (maksimal 10MB)".to_string())
        );
        form.file = Some(("rekap.xlsx".into(), MAX_UPLOAD_BYTES));
        assert_eq!(form.validate(MAX_UPLOAD_BYTES), Ok(()));
    }

    #[test]
    fn test_upload_response() {
        let ok: UploadResponse = serde_json::from_str(
            r#"{"success":true,"message":"File sedang diproses di background","tanggal":"2024-01-05",
                "afdeling":"setro","fileName":"a.xlsx","fileSize":2048}"#,
        )
        .unwrap();
        let ok = ok.into_result().unwrap();
        assert_eq!(ok.size_label(), "2.00 KB");

        let failed: UploadResponse =
            serde_json::from_str(r#"{"success":false,"message":"Format salah"}"#).unwrap();
        assert_eq!(
            failed.into_result(),
            Err(ApiError::Application("Format salah".to_string()))
        );
        assert_eq!(file_size_label(1536 * 1024), "1.50 MB (1536.00 KB)");
    }
}
