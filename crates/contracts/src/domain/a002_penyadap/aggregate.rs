use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::api::ValidationError;
use crate::shared::lenient;

/// Rubber tapper
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Penyadap {
    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id: u64,

    #[serde(default, alias = "namapenyadap", alias = "nama")]
    pub nama_penyadap: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub nik: String,
}

impl AggregateRoot for Penyadap {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn description(&self) -> String {
        format!("{} ({})", self.nama_penyadap, self.nik)
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "penyadap"
    }

    fn element_name() -> &'static str {
        "Penyadap"
    }

    fn list_name() -> &'static str {
        "Data Penyadap"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenyadapForm {
    pub nama_penyadap: String,
    pub nik: String,
}

/// Body of `POST /api/penyadap` and `PUT /api/penyadap/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenyadapDto {
    pub nama_penyadap: String,
    pub nik: String,
}

impl PenyadapForm {
    pub fn from_penyadap(p: &Penyadap) -> Self {
        Self {
            nama_penyadap: p.nama_penyadap.clone(),
            nik: p.nik.clone(),
        }
    }

    pub fn validate(&self) -> Result<PenyadapDto, ValidationError> {
        if self.nama_penyadap.trim().is_empty() {
            return Err(ValidationError::Required("Nama penyadap"));
        }
        if self.nik.trim().is_empty() {
            return Err(ValidationError::Required("NIK"));
        }
        Ok(PenyadapDto {
            nama_penyadap: self.nama_penyadap.trim().to_string(),
            nik: self.nik.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penyadap_from_alias() {
        let p: Penyadap = serde_json::from_str(r#"{"id":5,"nama":"Sari","nik":"0042"}"#).unwrap();
        assert_eq!(p.nama_penyadap, "Sari");
        assert_eq!(p.nik, "0042");
        assert_eq!(p.description(), "Sari (0042)");
    }

    #[test]
    fn test_form_requires_both_fields() {
        let form = PenyadapForm {
            nama_penyadap: "Sari".into(),
            nik: "  ".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("NIK")));
    }
}
