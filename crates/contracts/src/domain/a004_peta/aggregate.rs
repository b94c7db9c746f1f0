use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::enums::{AfdelingKey, AfdelingStyle};
use crate::shared::api::{ApiError, ValidationError};
use crate::shared::events::AfdelingClicked;
use crate::shared::lenient;
use crate::shared::numeric::{parse_int_or_zero, parse_or_zero};

use super::detect::detect_afdeling;

pub const ALL_PETA_PATH: &str = "/api/all/peta";

/// Lookup by map feature code
pub fn by_code_path(encoded_code: &str) -> String {
    format!("{}?code={}", Peta::collection_path(), encoded_code)
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Land block as stored by the backend (PascalCase keys)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Peta {
    #[serde(default, rename = "ID", alias = "id", deserialize_with = "lenient::u64_or_string")]
    pub id: u64,
    #[serde(default)]
    pub blok: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub afdeling: String,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub luas: f64,
    #[serde(default, deserialize_with = "lenient::i64_or_string")]
    pub jumlah_pohon: i64,
    #[serde(default)]
    pub jenis_kebun: String,
    /// Number or string on the wire
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub tahun_tanam: String,
    #[serde(default)]
    pub kloon: String,
}

impl Peta {
    /// Case-insensitive substring over the text columns; planting year as text
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [
            &self.code,
            &self.blok,
            &self.afdeling,
            &self.jenis_kebun,
            &self.kloon,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
            || self.tahun_tanam.contains(query.trim())
    }

    /// Click event for this block. The afdeling comes from the code when the
    /// code follows a known naming rule, otherwise from the afdeling column.
    pub fn click_event(&self) -> AfdelingClicked {
        let detected = detect_afdeling(&self.code);
        let key = detected
            .key
            .or_else(|| AfdelingKey::from_code(&self.afdeling));
        AfdelingClicked {
            afdeling: key
                .map(|k| k.label().to_string())
                .unwrap_or(detected.label),
            afdeling_key: key,
            name: self.code.clone(),
            feature_id: Some(self.id.to_string()),
        }
    }

    /// Colours of the afdeling the block is attributed to
    pub fn style(&self) -> AfdelingStyle {
        self.click_event()
            .afdeling_key
            .map(|k| k.style())
            .unwrap_or(AfdelingStyle::UNKNOWN)
    }
}

impl AggregateRoot for Peta {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn description(&self) -> String {
        format!("{} ({})", self.code, self.afdeling)
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "peta"
    }

    fn element_name() -> &'static str {
        "Blok"
    }

    fn list_name() -> &'static str {
        "Data Peta"
    }
}

/// Client-side filter of the block list
pub fn filter_peta<'a>(items: &'a [Peta], query: &str) -> Vec<&'a Peta> {
    items.iter().filter(|p| p.matches(query)).collect()
}

/// Line under the block table
pub fn search_info(shown: usize, total: usize) -> String {
    if shown == total {
        format!("Menampilkan {} data", total)
    } else {
        format!("Menampilkan {} dari {} data", shown, total)
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetaForm {
    pub code: String,
    pub blok: String,
    pub afdeling: String,
    pub luas: String,
    pub jumlah_pohon: String,
    pub jenis_kebun: String,
    pub tahun_tanam: String,
    pub kloon: String,
}

/// Body of `PUT /api/peta/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PetaDto {
    pub code: String,
    pub blok: String,
    pub afdeling: String,
    pub luas: f64,
    pub jumlah_pohon: i64,
    pub jenis_kebun: String,
    pub tahun_tanam: i64,
    pub kloon: String,
}

impl PetaForm {
    pub fn from_peta(p: &Peta) -> Self {
        Self {
            code: p.code.clone(),
            blok: p.blok.clone(),
            afdeling: p.afdeling.clone(),
            luas: p.luas.to_string(),
            jumlah_pohon: p.jumlah_pohon.to_string(),
            jenis_kebun: p.jenis_kebun.clone(),
            tahun_tanam: p.tahun_tanam.clone(),
            kloon: p.kloon.clone(),
        }
    }

    pub fn validate(&self) -> Result<PetaDto, ValidationError> {
        if self.code.trim().is_empty() || self.afdeling.trim().is_empty() {
            return Err(ValidationError::Required("Kode dan Afdeling"));
        }
        Ok(PetaDto {
            code: self.code.trim().to_string(),
            blok: self.blok.trim().to_string(),
            afdeling: self.afdeling.trim().to_string(),
            luas: parse_or_zero(&self.luas),
            jumlah_pohon: parse_int_or_zero(&self.jumlah_pohon),
            jenis_kebun: self.jenis_kebun.trim().to_string(),
            tahun_tanam: parse_int_or_zero(&self.tahun_tanam),
            kloon: self.kloon.trim().to_string(),
        })
    }
}

/// `PUT /api/peta/:id` answers `{message, data}` without a success flag
#[derive(Debug, Clone, Deserialize)]
pub struct PetaUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Peta>,
}

impl PetaUpdateResponse {
    pub fn into_result(self) -> Result<(Peta, String), ApiError> {
        let message = self
            .message
            .unwrap_or_else(|| "Data berhasil diperbarui".to_string());
        self.data
            .map(|peta| (peta, message))
            .ok_or_else(|| ApiError::Decode("respons tanpa data blok".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(code: &str, afdeling: &str, tahun: &str) -> Peta {
        Peta {
            id: 1,
            code: code.into(),
            afdeling: afdeling.into(),
            tahun_tanam: tahun.into(),
            kloon: "PB 260".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_peta_accepts_numeric_or_text_year() {
        let a: Peta =
            serde_json::from_str(r#"{"ID":4,"Code":"KLP-01","Afdeling":"Klepu","TahunTanam":2012,"Luas":3.5}"#)
                .unwrap();
        let b: Peta = serde_json::from_str(r#"{"ID":5,"Code":"ST-02","TahunTanam":"2014"}"#).unwrap();
        assert_eq!(a.tahun_tanam, "2012");
        assert_eq!(a.luas, 3.5);
        assert_eq!(b.tahun_tanam, "2014");
        assert_eq!(b.afdeling, "");
    }

    #[test]
    fn test_filter_and_info_line() {
        let items = vec![
            block("KLP-01", "Klepu", "2012"),
            block("ST-02", "Setro", "2014"),
            block("JR-03", "Jatiroenggo", "2012"),
        ];
        assert_eq!(filter_peta(&items, "klepu").len(), 1);
        assert_eq!(filter_peta(&items, "2012").len(), 2);
        assert_eq!(filter_peta(&items, "pb 260").len(), 3);
        assert_eq!(filter_peta(&items, "  ").len(), 3);
        assert_eq!(search_info(3, 3), "Menampilkan 3 data");
        assert_eq!(search_info(1, 3), "Menampilkan 1 dari 3 data");
    }

    #[test]
    fn test_form_requires_code_and_afdeling() {
        let mut form = PetaForm::from_peta(&block("KLP-01", "", "2012"));
        assert_eq!(form.validate(), Err(ValidationError::Required("Kode dan Afdeling")));
        form.afdeling = "Klepu".into();
        let dto = form.validate().unwrap();
        assert_eq!(dto.tahun_tanam, 2012);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["JumlahPohon"], 0);
        assert_eq!(json["TahunTanam"], 2012);
    }

    #[test]
    fn test_click_event_prefers_code_rule_then_column() {
        let by_code = block("FM-IE10-12-AR3", "Setro", "").click_event();
        assert_eq!(by_code.afdeling_key, Some(AfdelingKey::Gebugan));

        let by_column = block("BLOK-9", "klepu", "").click_event();
        assert_eq!(by_column.afdeling_key, Some(AfdelingKey::Klepu));
        assert_eq!(by_column.afdeling, "Klepu");

        let unknown = block("BLOK-9", "", "").click_event();
        assert_eq!(unknown.afdeling_key, None);
        assert_eq!(unknown.afdeling, "Tidak diketahui");
        assert_eq!(block("BLOK-9", "", "").style(), AfdelingStyle::UNKNOWN);
        assert_eq!(block("BLOK-9", "klepu", "").style().color, "#00b300");
    }

    #[test]
    fn test_update_response_without_success_flag() {
        let resp: PetaUpdateResponse =
            serde_json::from_str(r#"{"message":"Data berhasil diperbarui","data":{"ID":4,"Code":"A"}}"#)
                .unwrap();
        let (peta, msg) = resp.into_result().unwrap();
        assert_eq!(peta.id, 4);
        assert_eq!(msg, "Data berhasil diperbarui");
    }
}
