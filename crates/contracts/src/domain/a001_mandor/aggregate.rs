use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::enums::TipeProduksi;
use crate::shared::api::ValidationError;
use crate::shared::lenient;
use crate::shared::numeric::parse_int_or_zero;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Field supervisor. One person may have several records, one per planting
/// year cohort they supervise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mandor {
    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id: u64,

    #[serde(default, alias = "nama_mandor", alias = "nama")]
    pub mandor: String,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub nik: String,

    #[serde(default, deserialize_with = "lenient::opt_year")]
    pub tahun_tanam: Option<u32>,

    #[serde(default)]
    pub afdeling: String,

    #[serde(default)]
    pub tipe: TipeProduksi,
}

impl Mandor {
    /// Option text in the production form select: "Joko (Setro) 2015"
    pub fn option_label(&self) -> String {
        let afdeling = if self.afdeling.trim().is_empty() {
            "-"
        } else {
            self.afdeling.as_str()
        };
        let tahun = self
            .tahun_tanam
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} ({}) {}", self.mandor, afdeling, tahun)
    }
}

impl AggregateRoot for Mandor {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn description(&self) -> String {
        self.option_label()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "mandor"
    }

    fn element_name() -> &'static str {
        "Mandor"
    }

    fn list_name() -> &'static str {
        "Data Mandor"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Raw text of the mandor form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MandorForm {
    pub mandor: String,
    pub nik: String,
    pub tahun_tanam: String,
    pub afdeling: String,
    pub tipe: String,
}

/// Body of `POST /api/mandor` and `PUT /api/mandor/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandorDto {
    pub mandor: String,
    pub nik: String,
    pub tahun_tanam: i64,
    pub afdeling: String,
    pub tipe: TipeProduksi,
}

impl MandorForm {
    pub fn from_mandor(m: &Mandor) -> Self {
        Self {
            mandor: m.mandor.clone(),
            nik: m.nik.clone(),
            tahun_tanam: m.tahun_tanam.map(|t| t.to_string()).unwrap_or_default(),
            afdeling: m.afdeling.clone(),
            tipe: m.tipe.code().to_string(),
        }
    }

    /// Name and afdeling are required; the planting year falls back to 0
    pub fn validate(&self) -> Result<MandorDto, ValidationError> {
        if self.mandor.trim().is_empty() {
            return Err(ValidationError::Required("Nama mandor"));
        }
        if self.afdeling.trim().is_empty() {
            return Err(ValidationError::Required("Afdeling"));
        }
        Ok(MandorDto {
            mandor: self.mandor.trim().to_string(),
            nik: self.nik.trim().to_string(),
            tahun_tanam: parse_int_or_zero(&self.tahun_tanam),
            afdeling: self.afdeling.trim().to_string(),
            tipe: TipeProduksi::from_code(&self.tipe),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandor_accepts_alias_and_mixed_types() {
        let m: Mandor = serde_json::from_str(
            r#"{"id":"3","nama_mandor":"Joko","nik":123,"tahun_tanam":"2015","afdeling":"Setro","tipe":"BAKU_BORONG"}"#,
        )
        .unwrap();
        assert_eq!(m.id, 3);
        assert_eq!(m.mandor, "Joko");
        assert_eq!(m.nik, "123");
        assert_eq!(m.tahun_tanam, Some(2015));
        assert_eq!(m.tipe, TipeProduksi::BakuBorong);
        assert_eq!(m.option_label(), "Joko (Setro) 2015");
    }

    #[test]
    fn test_option_label_placeholders() {
        let m = Mandor {
            mandor: "Agus".into(),
            ..Default::default()
        };
        assert_eq!(m.option_label(), "Agus (-) -");
    }

    #[test]
    fn test_form_requires_name_and_defaults_year() {
        let mut form = MandorForm {
            afdeling: "Klepu".into(),
            tahun_tanam: "abc".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("Nama mandor")));

        form.mandor = " Budi ".into();
        let dto = form.validate().unwrap();
        assert_eq!(dto.mandor, "Budi");
        assert_eq!(dto.tahun_tanam, 0);
        assert_eq!(dto.tipe, TipeProduksi::Baku);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Mandor::full_name(), "a001_mandor");
        assert_eq!(Mandor::item_path(7), "/api/mandor/7");
    }
}
