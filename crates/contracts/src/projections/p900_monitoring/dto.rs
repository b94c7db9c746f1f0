use serde::{Deserialize, Serialize};

use crate::domain::a003_baku::aggregate::required_id;
use crate::shared::api::{ApiError, ValidationError};
use crate::shared::lenient;
use crate::shared::series::DateRange;

pub const SEARCH_PATH: &str = "/api/search";

/// Loss percentages above this are flagged in the mandor table
pub const PERSEN_ALERT_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Penyadap,
    Mandor,
}

impl ViewMode {
    pub fn code(&self) -> &'static str {
        match self {
            ViewMode::Penyadap => "penyadap",
            ViewMode::Mandor => "mandor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Penyadap => "Penyadap",
            ViewMode::Mandor => "Mandor",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "mandor" => ViewMode::Mandor,
            _ => ViewMode::Penyadap,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// Raw text of the search form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub mode: ViewMode,
    /// Hidden id from the autocomplete selection
    pub person_id: String,
    pub tanggal_awal: String,
    pub tanggal_akhir: String,
    pub tipe_produksi: String,
    pub afdeling: String,
}

/// Query string of `GET /api/search`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_penyadap: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_mandor: Option<u64>,
    pub tanggal_awal: String,
    pub tanggal_akhir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipe_produksi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afdeling: Option<String>,
}

impl SearchForm {
    /// Person first, then dates
    pub fn validate(&self) -> Result<SearchQuery, ValidationError> {
        let (missing, what) = match self.mode {
            ViewMode::Penyadap => (ValidationError::MissingPenyadap, "penyadap"),
            ViewMode::Mandor => (ValidationError::MissingMandor, "mandor"),
        };
        let id = required_id(&self.person_id, missing, what)?;
        let range = DateRange::parse(&self.tanggal_awal, &self.tanggal_akhir)?;
        let (id_penyadap, id_mandor) = match self.mode {
            ViewMode::Penyadap => (Some(id), None),
            ViewMode::Mandor => (None, Some(id)),
        };
        Ok(SearchQuery {
            id_penyadap,
            id_mandor,
            tanggal_awal: range.start_str(),
            tanggal_akhir: range.end_str(),
            tipe_produksi: non_empty(&self.tipe_produksi),
            afdeling: non_empty(&self.afdeling),
        })
    }
}

pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// Rows
// ============================================================================

/// One tapper-day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenyadapRow {
    #[serde(default, alias = "Tanggal")]
    pub tanggal: String,
    #[serde(default, alias = "Mandor")]
    pub mandor: String,
    #[serde(default, alias = "TipeProduksi")]
    pub tipe_produksi: String,
    #[serde(default, alias = "TahunTanam", deserialize_with = "lenient::string_or_number")]
    pub tahun_tanam: String,
    #[serde(default, alias = "Afdeling")]
    pub afdeling: String,
    #[serde(default, alias = "NIK", deserialize_with = "lenient::string_or_number")]
    pub nik: String,
    #[serde(default, alias = "NamaPenyadap")]
    pub nama_penyadap: String,
    #[serde(default, alias = "BasahLatek", deserialize_with = "lenient::f64_or_string")]
    pub basah_latek: f64,
    #[serde(default, alias = "Sheet", deserialize_with = "lenient::f64_or_string")]
    pub sheet: f64,
    #[serde(default, alias = "BasahLump", deserialize_with = "lenient::f64_or_string")]
    pub basah_lump: f64,
    #[serde(default, alias = "BrCr", deserialize_with = "lenient::f64_or_string")]
    pub br_cr: f64,
    #[serde(default, alias = "TotalProduksi", deserialize_with = "lenient::f64_or_string")]
    pub total_produksi: f64,
}

/// One mandor-day recap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandorRow {
    pub tanggal: String,
    pub mandor: String,
    pub tipe_produksi: String,
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub tahun_tanam: String,
    pub afdeling: String,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hko_hari_ini: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_latek_kebun: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_latek_pabrik: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_latek_persen: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_lump_kebun: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_lump_pabrik: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_basah_lump_persen: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_kering_sheet: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub hari_ini_kering_br_cr: f64,
    #[serde(deserialize_with = "lenient::f64_or_string")]
    pub produksi_per_taper_hari_ini: f64,
    #[serde(alias = "total_produksi", deserialize_with = "lenient::f64_or_string")]
    pub total_produksi_hari_ini: f64,
}

impl MandorRow {
    pub fn latek_alert(&self) -> bool {
        self.hari_ini_basah_latek_persen > PERSEN_ALERT_THRESHOLD
    }

    pub fn lump_alert(&self) -> bool {
        self.hari_ini_basah_lump_persen > PERSEN_ALERT_THRESHOLD
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Backend summary; keys arrive snake_case or PascalCase depending on the route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSummary {
    #[serde(alias = "TotalRecords", deserialize_with = "lenient::f64_or_string")]
    pub total_records: f64,

    // penyadap mode
    #[serde(alias = "TotalLatek", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_latek: f64,
    #[serde(alias = "TotalSheet", deserialize_with = "lenient::f64_or_string")]
    pub total_sheet: f64,
    #[serde(alias = "TotalLump", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_lump: f64,
    #[serde(alias = "TotalBrCr", deserialize_with = "lenient::f64_or_string")]
    pub total_br_cr: f64,
    #[serde(alias = "TotalProduksi", deserialize_with = "lenient::f64_or_string")]
    pub total_produksi: f64,

    // mandor mode
    #[serde(alias = "TotalHKO", deserialize_with = "lenient::f64_or_string")]
    pub total_hko: f64,
    #[serde(alias = "TotalBasahLatekKebun", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_latek_kebun: f64,
    #[serde(alias = "TotalBasahLatekPabrik", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_latek_pabrik: f64,
    #[serde(alias = "TotalPersenLatek", deserialize_with = "lenient::f64_or_string")]
    pub total_persen_latek: f64,
    #[serde(alias = "TotalBasahLumpKebun", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_lump_kebun: f64,
    #[serde(alias = "TotalBasahLumpPabrik", deserialize_with = "lenient::f64_or_string")]
    pub total_basah_lump_pabrik: f64,
    #[serde(alias = "TotalPersenLump", deserialize_with = "lenient::f64_or_string")]
    pub total_persen_lump: f64,
    #[serde(alias = "TotalK3Sheet", deserialize_with = "lenient::f64_or_string")]
    pub total_k3_sheet: f64,
    #[serde(alias = "TotalKeringSheet", deserialize_with = "lenient::f64_or_string")]
    pub total_kering_sheet: f64,
    #[serde(alias = "TotalKeringBrCr", deserialize_with = "lenient::f64_or_string")]
    pub total_kering_br_cr: f64,
    #[serde(alias = "TotalKeringJumlah", deserialize_with = "lenient::f64_or_string")]
    pub total_kering_jumlah: f64,
    #[serde(alias = "RataRataProduksiPerTaper", deserialize_with = "lenient::f64_or_string")]
    pub rata_rata_produksi_per_taper: f64,
}

/// `{success, message, data, summary}` of `/api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// `null` when nothing matched
    #[serde(default)]
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub summary: Option<MonitoringSummary>,
}

impl<T> SearchResponse<T> {
    /// Rows and summary; a missing summary still reports the row count
    pub fn into_result(self) -> Result<(Vec<T>, MonitoringSummary), ApiError> {
        if !self.success {
            return Err(ApiError::Application(
                self.message
                    .unwrap_or_else(|| "Pencarian gagal".to_string()),
            ));
        }
        let data = self.data.unwrap_or_default();
        let summary = self.summary.unwrap_or_else(|| MonitoringSummary {
            total_records: data.len() as f64,
            ..Default::default()
        });
        Ok((data, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: ViewMode, id: &str) -> SearchForm {
        SearchForm {
            mode,
            person_id: id.into(),
            tanggal_awal: "2024-01-01".into(),
            tanggal_akhir: "2024-01-31".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_person_must_come_from_list() {
        assert_eq!(
            form(ViewMode::Mandor, "").validate(),
            Err(ValidationError::MissingMandor)
        );
        assert_eq!(
            form(ViewMode::Penyadap, "").validate(),
            Err(ValidationError::MissingPenyadap)
        );
        assert_eq!(
            form(ViewMode::Mandor, "Joko").validate(),
            Err(ValidationError::InvalidId("mandor"))
        );
    }

    #[test]
    fn test_dates_are_required_and_ordered() {
        let mut f = form(ViewMode::Penyadap, "4");
        f.tanggal_akhir.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingDateRange));
        f.tanggal_akhir = "2023-12-01".into();
        assert_eq!(f.validate(), Err(ValidationError::InvertedDateRange));
    }

    #[test]
    fn test_query_keeps_only_the_mode_id() {
        let mut f = form(ViewMode::Mandor, "12");
        f.afdeling = " Setro ".into();
        let q = f.validate().unwrap();
        assert_eq!(q.id_mandor, Some(12));
        assert_eq!(q.id_penyadap, None);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["idMandor"], 12);
        assert_eq!(json["afdeling"], "Setro");
        assert!(json.get("idPenyadap").is_none());
        assert!(json.get("tipeProduksi").is_none());
    }

    #[test]
    fn test_summary_accepts_both_casings() {
        let snake: MonitoringSummary =
            serde_json::from_str(r#"{"total_records":3,"total_basah_latek":12.5}"#).unwrap();
        let pascal: MonitoringSummary =
            serde_json::from_str(r#"{"TotalRecords":3,"TotalLatek":12.5}"#).unwrap();
        assert_eq!(snake, pascal);
    }

    #[test]
    fn test_rows_and_alerts() {
        let resp: SearchResponse<MandorRow> = serde_json::from_str(
            r#"{"success":true,"data":[{"tanggal":"2024-01-02T00:00:00Z","mandor":"Joko",
                "tahun_tanam":"2015","hko_hari_ini":6,"hari_ini_basah_latek_persen":7.25,
                "hari_ini_basah_lump_persen":5}]}"#,
        )
        .unwrap();
        let (rows, summary) = resp.into_result().unwrap();
        assert!(rows[0].latek_alert());
        assert!(!rows[0].lump_alert());
        assert_eq!(summary.total_records, 1.0);

        let penyadap: PenyadapRow =
            serde_json::from_str(r#"{"NamaPenyadap":"Sari","NIK":42,"BasahLatek":"3.5"}"#).unwrap();
        assert_eq!(penyadap.nik, "42");
        assert_eq!(penyadap.basah_latek, 3.5);
    }

    #[test]
    fn test_failed_search_surfaces_message() {
        let resp: SearchResponse<PenyadapRow> =
            serde_json::from_str(r#"{"success":false,"message":"Data tidak ditemukan"}"#).unwrap();
        assert_eq!(
            resp.into_result().unwrap_err(),
            ApiError::Application("Data tidak ditemukan".to_string())
        );
    }
}
