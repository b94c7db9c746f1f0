use serde::{Deserialize, Serialize};

use crate::domain::a003_baku::aggregate::required_id;
use crate::projections::p900_monitoring::dto::non_empty;
use crate::shared::api::ValidationError;
use crate::shared::numeric::parse_or_zero;
use crate::shared::series::{build_series, parse_date, DateRange, DatedValue, Granularity, SeriesPoint};

pub const VISUALISASI_PATH: &str = "/api/visualisasi";
pub const VISUALISASI_DEFAULT_PATH: &str = "/api/visualisasi/default";

pub const DEFAULT_THRESHOLD: f64 = 150.0;
pub const DEFAULT_TITLE: &str = "Grafik Produksi";
pub const SAMPLE_VALUES: &str = "180,220,195,240,160,210,185,200";

/// Scope of the recap series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipeData {
    #[default]
    Total,
    Afdeling,
    Mandor,
}

impl TipeData {
    pub fn code(&self) -> &'static str {
        match self {
            TipeData::Total => "total",
            TipeData::Afdeling => "afdeling",
            TipeData::Mandor => "mandor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TipeData::Total => "Total Kebun",
            TipeData::Afdeling => "Per Afdeling",
            TipeData::Mandor => "Per Mandor",
        }
    }

    pub fn all() -> Vec<TipeData> {
        vec![TipeData::Total, TipeData::Afdeling, TipeData::Mandor]
    }

    pub fn from_code(code: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|t| t.code() == code)
            .unwrap_or_default()
    }
}

/// Measure plotted on the chart; the codes are the backend's column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Satuan {
    Hko,
    #[default]
    BasahLatekKebun,
    BasahLatekPabrik,
    BasahLatekPersen,
    BasahLumpKebun,
    BasahLumpPabrik,
    BasahLumpPersen,
    K3Sheet,
    KeringSheet,
    KeringBrCr,
    KeringJumlah,
    ProduksiPerTaper,
    TotalProduksi,
}

impl Satuan {
    pub fn code(&self) -> &'static str {
        match self {
            Satuan::Hko => "hko",
            Satuan::BasahLatekKebun => "basah_latek_kebun",
            Satuan::BasahLatekPabrik => "basah_latek_pabrik",
            Satuan::BasahLatekPersen => "basah_latek_persen",
            Satuan::BasahLumpKebun => "basah_lump_kebun",
            Satuan::BasahLumpPabrik => "basah_lump_pabrik",
            Satuan::BasahLumpPersen => "basah_lump_persen",
            Satuan::K3Sheet => "k3_sheet",
            Satuan::KeringSheet => "kering_sheet",
            Satuan::KeringBrCr => "kering_br_cr",
            Satuan::KeringJumlah => "kering_jumlah",
            Satuan::ProduksiPerTaper => "produksi_per_taper",
            Satuan::TotalProduksi => "total_produksi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Satuan::Hko => "HKO",
            Satuan::BasahLatekKebun => "Basah Latek Kebun (kg)",
            Satuan::BasahLatekPabrik => "Basah Latek Pabrik (kg)",
            Satuan::BasahLatekPersen => "Selisih Latek (%)",
            Satuan::BasahLumpKebun => "Basah Lump Kebun (kg)",
            Satuan::BasahLumpPabrik => "Basah Lump Pabrik (kg)",
            Satuan::BasahLumpPersen => "Selisih Lump (%)",
            Satuan::K3Sheet => "K3 Sheet (%)",
            Satuan::KeringSheet => "Kering Sheet (kg)",
            Satuan::KeringBrCr => "Kering Br.Cr (kg)",
            Satuan::KeringJumlah => "Kering Jumlah (kg)",
            Satuan::ProduksiPerTaper => "Produksi per Taper",
            Satuan::TotalProduksi => "Total Produksi",
        }
    }

    pub fn all() -> Vec<Satuan> {
        vec![
            Satuan::Hko,
            Satuan::BasahLatekKebun,
            Satuan::BasahLatekPabrik,
            Satuan::BasahLatekPersen,
            Satuan::BasahLumpKebun,
            Satuan::BasahLumpPabrik,
            Satuan::BasahLumpPersen,
            Satuan::K3Sheet,
            Satuan::KeringSheet,
            Satuan::KeringBrCr,
            Satuan::KeringJumlah,
            Satuan::ProduksiPerTaper,
            Satuan::TotalProduksi,
        ]
    }

    pub fn from_code(code: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|s| s.code() == code)
            .unwrap_or_default()
    }
}

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualisasiForm {
    pub tipe_data: TipeData,
    pub satuan: Satuan,
    pub tipe_produksi: String,
    pub afdeling: String,
    /// Hidden id from the mandor autocomplete
    pub mandor_id: String,
    pub tanggal_awal: String,
    pub tanggal_akhir: String,
    pub granularity: Granularity,
    pub threshold: String,
}

/// Query string of `GET /api/visualisasi`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualisasiQuery {
    pub tipe_data: TipeData,
    pub satuan: Satuan,
    pub tanggal_awal: String,
    pub tanggal_akhir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipe_produksi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afdeling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_mandor: Option<u64>,
}

/// Everything the chart page needs once the form is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub query: VisualisasiQuery,
    pub range: DateRange,
    pub granularity: Granularity,
    pub threshold: f64,
}

impl VisualisasiForm {
    pub fn validate(&self) -> Result<ChartRequest, ValidationError> {
        let range = DateRange::parse(&self.tanggal_awal, &self.tanggal_akhir)?;
        let afdeling = non_empty(&self.afdeling);
        let id_mandor = match self.tipe_data {
            TipeData::Mandor => Some(required_id(
                &self.mandor_id,
                ValidationError::MissingMandor,
                "mandor",
            )?),
            _ => None,
        };
        if self.tipe_data == TipeData::Afdeling && afdeling.is_none() {
            return Err(ValidationError::Required("Afdeling"));
        }
        Ok(ChartRequest {
            query: VisualisasiQuery {
                tipe_data: self.tipe_data,
                satuan: self.satuan,
                tanggal_awal: range.start_str(),
                tanggal_akhir: range.end_str(),
                tipe_produksi: non_empty(&self.tipe_produksi),
                afdeling: if self.tipe_data == TipeData::Afdeling {
                    afdeling
                } else {
                    None
                },
                id_mandor,
            },
            range,
            granularity: self.granularity,
            threshold: threshold_or_default(&self.threshold),
        })
    }
}

pub fn threshold_or_default(raw: &str) -> f64 {
    if raw.trim().is_empty() {
        DEFAULT_THRESHOLD
    } else {
        parse_or_zero(raw)
    }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualPoint {
    #[serde(default)]
    pub tanggal: String,
    #[serde(default)]
    pub value: f64,
}

/// `{labels, data: [{tanggal, value}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualisasiResponse {
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub data: Option<Vec<VisualPoint>>,
}

impl VisualisasiResponse {
    /// Points with a readable date; others are logged and dropped
    pub fn dated_values(&self) -> Vec<DatedValue> {
        self.data
            .iter()
            .flatten()
            .filter_map(|p| match parse_date(&p.tanggal) {
                Ok(date) => Some(DatedValue {
                    date,
                    value: p.value,
                }),
                Err(e) => {
                    log::warn!("visualisasi: skipping point: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Range spanned by the returned dates, for the default view
    pub fn inferred_range(&self) -> Option<DateRange> {
        let values = self.dated_values();
        let start = values.iter().map(|v| v.date).min()?;
        let end = values.iter().map(|v| v.date).max()?;
        DateRange::new(start, end).ok()
    }

    pub fn series(&self, range: &DateRange, granularity: Granularity) -> Vec<SeriesPoint> {
        build_series(range, &self.dated_values(), granularity)
    }
}

/// Comma separated numbers typed by hand, labelled 1..n; blanks are skipped
pub fn parse_manual_values(raw: &str) -> Vec<SeriesPoint> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| SeriesPoint {
            label: (i + 1).to_string(),
            value: parse_or_zero(s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> VisualisasiForm {
        VisualisasiForm {
            tanggal_awal: "2024-01-01".into(),
            tanggal_akhir: "2024-01-03".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scope_requirements() {
        let mut form = base_form();
        form.tipe_data = TipeData::Afdeling;
        assert_eq!(form.validate(), Err(ValidationError::Required("Afdeling")));
        form.afdeling = "setro".into();
        assert_eq!(form.validate().unwrap().query.afdeling.as_deref(), Some("setro"));

        form.tipe_data = TipeData::Mandor;
        assert_eq!(form.validate(), Err(ValidationError::MissingMandor));
        form.mandor_id = "9".into();
        let req = form.validate().unwrap();
        assert_eq!(req.query.id_mandor, Some(9));
        assert_eq!(req.query.afdeling, None);
        assert_eq!(req.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_query_wire_format() {
        let mut form = base_form();
        form.satuan = Satuan::KeringBrCr;
        form.threshold = "80".into();
        let req = form.validate().unwrap();
        assert_eq!(req.threshold, 80.0);
        let json = serde_json::to_value(&req.query).unwrap();
        assert_eq!(json["tipeData"], "total");
        assert_eq!(json["satuan"], "kering_br_cr");
        assert_eq!(json["tanggalAwal"], "2024-01-01");
        assert!(json.get("idMandor").is_none());
    }

    #[test]
    fn test_response_zero_filled_series() {
        let resp: VisualisasiResponse = serde_json::from_str(
            r#"{"labels":["2024-01-01"],"data":[{"tanggal":"2024-01-01","value":10},{"tanggal":"??","value":5}]}"#,
        )
        .unwrap();
        let req = base_form().validate().unwrap();
        let series = resp.series(&req.range, Granularity::Day);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 0.0, 0.0]);
        assert_eq!(series[1].label, "02 Jan 2024");
    }

    #[test]
    fn test_inferred_range_and_null_data() {
        let resp: VisualisasiResponse = serde_json::from_str(
            r#"{"data":[{"tanggal":"2024-03-05","value":1},{"tanggal":"2024-03-01","value":2}]}"#,
        )
        .unwrap();
        let range = resp.inferred_range().unwrap();
        assert_eq!(range.start_str(), "2024-03-01");
        assert_eq!(range.day_count(), 5);

        let empty: VisualisasiResponse = serde_json::from_str(r#"{"labels":null,"data":null}"#).unwrap();
        assert_eq!(empty.inferred_range(), None);
    }

    #[test]
    fn test_manual_values() {
        let points = parse_manual_values(SAMPLE_VALUES);
        assert_eq!(points.len(), 8);
        assert_eq!(points[3], SeriesPoint { label: "4".into(), value: 240.0 });
        assert!(parse_manual_values(" , ").is_empty());
    }
}
