use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_mandor::aggregate::Mandor;
use crate::domain::a002_penyadap::aggregate::Penyadap;
use crate::domain::common::AggregateRoot;
use crate::enums::TipeProduksi;
use crate::shared::aggregation::{
    group_by, k3_percentage, loss_percentage, per_tapper, summarize, Aggregatable, Group,
    GroupKey, Summary,
};
use crate::shared::api::ValidationError;
use crate::shared::lenient;
use crate::shared::numeric::{parse_id, parse_or_zero};
use crate::shared::series::DATE_FORMAT;

pub const REKAP_TODAY_PATH: &str = "/api/baku/rekap/today";
pub const UNKNOWN_MANDOR: &str = "Unknown";

/// Per-mandor recap of one day
pub fn detail_path(date: NaiveDate) -> String {
    format!("{}/detail/{}", BakuEntry::collection_path(), date.format(DATE_FORMAT))
}

// ============================================================================
// Production entry
// ============================================================================

/// One tapper's yield for one day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakuEntry {
    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id: u64,

    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id_baku_mandor: u64,

    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id_penyadap: u64,

    #[serde(default)]
    pub tanggal: String,

    #[serde(default)]
    pub tipe: TipeProduksi,

    #[serde(default, rename = "tahun_tanam", deserialize_with = "lenient::opt_year")]
    pub tahun_tanam: Option<u32>,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub basah_latex: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub sheet: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub basah_lump: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub br_cr: f64,

    #[serde(default)]
    pub mandor: Option<Mandor>,

    #[serde(default)]
    pub penyadap: Option<Penyadap>,
}

impl BakuEntry {
    pub fn mandor_name(&self) -> &str {
        self.mandor
            .as_ref()
            .map(|m| m.mandor.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_MANDOR)
    }

    pub fn penyadap_name(&self) -> &str {
        self.penyadap
            .as_ref()
            .map(|p| p.nama_penyadap.as_str())
            .unwrap_or("-")
    }

    pub fn penyadap_nik(&self) -> &str {
        self.penyadap.as_ref().map(|p| p.nik.as_str()).unwrap_or("-")
    }

    fn effective_tahun_tanam(&self) -> Option<u32> {
        self.tahun_tanam
            .or_else(|| self.mandor.as_ref().and_then(|m| m.tahun_tanam))
    }
}

impl AggregateRoot for BakuEntry {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn description(&self) -> String {
        format!("{} / {}", self.mandor_name(), self.penyadap_name())
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "baku"
    }

    fn element_name() -> &'static str {
        "Produksi Baku"
    }

    fn list_name() -> &'static str {
        "Detail Produksi"
    }
}

/// Summed yields of a set of entries
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryTotals {
    pub basah_latex: f64,
    pub basah_lump: f64,
    pub sheet: f64,
    pub br_cr: f64,
}

impl AddAssign<&EntryTotals> for EntryTotals {
    fn add_assign(&mut self, rhs: &EntryTotals) {
        self.basah_latex += rhs.basah_latex;
        self.basah_lump += rhs.basah_lump;
        self.sheet += rhs.sheet;
        self.br_cr += rhs.br_cr;
    }
}

impl Aggregatable for BakuEntry {
    type Totals = EntryTotals;

    fn totals(&self) -> EntryTotals {
        EntryTotals {
            basah_latex: self.basah_latex,
            basah_lump: self.basah_lump,
            sheet: self.sheet,
            br_cr: self.br_cr,
        }
    }

    fn group_label(&self, key: GroupKey) -> String {
        match key {
            GroupKey::Mandor => self.mandor_name().to_string(),
            GroupKey::TahunTanam => self
                .effective_tahun_tanam()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            GroupKey::Afdeling => self
                .mandor
                .as_ref()
                .map(|m| m.afdeling.trim().to_string())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            GroupKey::Tipe => self.tipe.display_name(),
        }
    }
}

/// Today's entries as shown in the detail view, one table per mandor
pub fn group_by_mandor(entries: &[BakuEntry]) -> Vec<Group<BakuEntry>> {
    group_by(entries, GroupKey::Mandor)
}

// ============================================================================
// Daily recap per mandor
// ============================================================================

/// Backend-computed recap row for one mandor on one day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BakuDetail {
    #[serde(default, deserialize_with = "lenient::u64_or_string")]
    pub id: u64,
    #[serde(default)]
    pub tanggal: String,
    #[serde(default, rename = "idBakuMandor", deserialize_with = "lenient::u64_or_string")]
    pub id_baku_mandor: u64,
    #[serde(default)]
    pub mandor: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub nik: String,
    #[serde(default)]
    pub afdeling: String,
    #[serde(default, deserialize_with = "lenient::opt_year")]
    pub tahun_tanam: Option<u32>,
    #[serde(default)]
    pub tipe: TipeProduksi,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub hko: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_kebun_basah_latek: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_pabrik_basah_latek: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub selisih_basah_latek: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub persentase_selisih_basah_latek: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_sheet: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub k3_sheet: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_kebun_basah_lump: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_pabrik_basah_lump: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub selisih_basah_lump: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub persentase_selisih_basah_lump: f64,

    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_br_cr: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub k3_br_cr: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_string")]
    pub jumlah_kering: f64,
}

impl BakuDetail {
    /// Dry total; sheet plus BR/CR when the backend did not send one
    pub fn kering(&self) -> f64 {
        if self.jumlah_kering > 0.0 {
            self.jumlah_kering
        } else {
            self.jumlah_sheet + self.jumlah_br_cr
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetailTotals {
    pub hko: f64,
    pub kebun_latek: f64,
    pub pabrik_latek: f64,
    pub sheet: f64,
    pub k3_sheet: f64,
    pub kebun_lump: f64,
    pub pabrik_lump: f64,
    pub br_cr: f64,
    pub k3_br_cr: f64,
    pub kering: f64,
}

impl DetailTotals {
    pub fn latek_persen(&self) -> f64 {
        loss_percentage(self.kebun_latek, self.pabrik_latek)
    }

    pub fn lump_persen(&self) -> f64 {
        loss_percentage(self.kebun_lump, self.pabrik_lump)
    }

    /// Dry sheet against factory latex
    pub fn k3_sheet_persen(&self) -> f64 {
        k3_percentage(self.sheet, self.pabrik_latek)
    }

    pub fn produksi_per_taper(&self) -> f64 {
        per_tapper(self.kering, self.hko)
    }
}

impl AddAssign<&DetailTotals> for DetailTotals {
    fn add_assign(&mut self, rhs: &DetailTotals) {
        self.hko += rhs.hko;
        self.kebun_latek += rhs.kebun_latek;
        self.pabrik_latek += rhs.pabrik_latek;
        self.sheet += rhs.sheet;
        self.k3_sheet += rhs.k3_sheet;
        self.kebun_lump += rhs.kebun_lump;
        self.pabrik_lump += rhs.pabrik_lump;
        self.br_cr += rhs.br_cr;
        self.k3_br_cr += rhs.k3_br_cr;
        self.kering += rhs.kering;
    }
}

impl Aggregatable for BakuDetail {
    type Totals = DetailTotals;

    fn totals(&self) -> DetailTotals {
        DetailTotals {
            hko: self.hko,
            kebun_latek: self.jumlah_kebun_basah_latek,
            pabrik_latek: self.jumlah_pabrik_basah_latek,
            sheet: self.jumlah_sheet,
            k3_sheet: self.k3_sheet,
            kebun_lump: self.jumlah_kebun_basah_lump,
            pabrik_lump: self.jumlah_pabrik_basah_lump,
            br_cr: self.jumlah_br_cr,
            k3_br_cr: self.k3_br_cr,
            kering: self.kering(),
        }
    }

    fn group_label(&self, key: GroupKey) -> String {
        match key {
            GroupKey::Mandor => self.mandor.clone(),
            GroupKey::TahunTanam => self
                .tahun_tanam
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            GroupKey::Afdeling => self.afdeling.clone(),
            GroupKey::Tipe => self.tipe.display_name(),
        }
    }
}

/// Recap table: one section per production type plus the grand total
pub fn rekap_by_tipe(details: &[BakuDetail]) -> Summary<BakuDetail> {
    summarize(details, GroupKey::Tipe)
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Raw text of the production entry form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BakuForm {
    /// Value of the mandor select
    pub mandor_id: String,
    /// Hidden id set by the penyadap autocomplete
    pub penyadap_id: String,
    pub tipe: String,
    pub basah_latex: String,
    pub basah_lump: String,
    pub sheet: String,
    pub br_cr: String,
}

/// Body of `POST /api/baku` and `PUT /api/baku/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakuDto {
    pub id_baku_mandor: u64,
    pub id_penyadap: u64,
    pub tipe: TipeProduksi,
    pub basah_latex: f64,
    pub basah_lump: f64,
    pub sheet: f64,
    pub br_cr: f64,
}

impl BakuForm {
    /// Fills the form for editing an existing entry
    pub fn from_entry(entry: &BakuEntry) -> Self {
        Self {
            mandor_id: entry.id_baku_mandor.to_string(),
            penyadap_id: entry.id_penyadap.to_string(),
            tipe: entry.tipe.code().to_string(),
            basah_latex: entry.basah_latex.to_string(),
            basah_lump: entry.basah_lump.to_string(),
            sheet: entry.sheet.to_string(),
            br_cr: entry.br_cr.to_string(),
        }
    }

    pub fn validate(&self) -> Result<BakuDto, ValidationError> {
        let id_baku_mandor = required_id(&self.mandor_id, ValidationError::MissingMandor, "mandor")?;
        let id_penyadap =
            required_id(&self.penyadap_id, ValidationError::MissingPenyadap, "penyadap")?;
        Ok(BakuDto {
            id_baku_mandor,
            id_penyadap,
            tipe: TipeProduksi::from_code(&self.tipe),
            basah_latex: parse_or_zero(&self.basah_latex),
            basah_lump: parse_or_zero(&self.basah_lump),
            sheet: parse_or_zero(&self.sheet),
            br_cr: parse_or_zero(&self.br_cr),
        })
    }
}

/// Empty means nothing was picked; anything else must be all digits
pub fn required_id(
    raw: &str,
    missing: ValidationError,
    what: &'static str,
) -> Result<u64, ValidationError> {
    if raw.trim().is_empty() {
        return Err(missing);
    }
    parse_id(raw).ok_or(ValidationError::InvalidId(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::aggregation::grand_total;

    fn entry(id: u64, mandor: Option<&str>, latex: f64, sheet: f64) -> BakuEntry {
        BakuEntry {
            id,
            id_baku_mandor: 1,
            id_penyadap: id,
            basah_latex: latex,
            sheet,
            mandor: mandor.map(|name| Mandor {
                mandor: name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn sample() -> Vec<BakuEntry> {
        vec![
            entry(1, Some("Joko"), 10.0, 2.0),
            entry(2, Some("Agus"), 7.5, 1.0),
            entry(3, None, 3.0, 0.5),
            entry(4, Some("Joko"), 4.0, 1.5),
        ]
    }

    #[test]
    fn test_entry_wire_names() {
        let e: BakuEntry = serde_json::from_str(
            r#"{"id":9,"idBakuMandor":2,"idPenyadap":5,"tanggal":"2024-01-05T00:00:00Z",
                "tipe":"BAKU","basahLatex":12.5,"sheet":3,"basahLump":"1.5","brCr":null,
                "mandor":{"id":2,"mandor":"Joko","nik":"11","tahun_tanam":2015,"afdeling":"Setro","tipe":"BAKU"},
                "penyadap":{"id":5,"nama_penyadap":"Sari","nik":"0042"}}"#,
        )
        .unwrap();
        assert_eq!(e.id_baku_mandor, 2);
        assert_eq!(e.basah_lump, 1.5);
        assert_eq!(e.br_cr, 0.0);
        assert_eq!(e.mandor_name(), "Joko");
        assert_eq!(e.penyadap_nik(), "0042");
        assert_eq!(e.group_label(GroupKey::TahunTanam), "2015");
    }

    #[test]
    fn test_detail_view_groups_by_mandor_with_unknown() {
        let groups = group_by_mandor(&sample());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Joko", "Agus", "Unknown"]);
        assert_eq!(groups[0].totals.basah_latex, 14.0);
        assert_eq!(groups[0].totals.sheet, 3.5);
    }

    #[test]
    fn test_group_totals_sum_to_grand_total() {
        let data = sample();
        let grand = grand_total(&data);
        for key in [GroupKey::Mandor, GroupKey::TahunTanam, GroupKey::Afdeling, GroupKey::Tipe] {
            let mut sum = EntryTotals::default();
            for g in group_by(&data, key) {
                sum += &g.totals;
            }
            assert_eq!(sum, grand);
        }
    }

    #[test]
    fn test_delete_then_refetch_removes_only_that_row() {
        let before = sample();
        // Server answer after DELETE /api/baku/2
        let after: Vec<BakuEntry> = before.iter().filter(|e| e.id != 2).cloned().collect();

        let groups_before = group_by_mandor(&before);
        let groups_after = group_by_mandor(&after);

        let ids = |groups: &[Group<BakuEntry>]| -> Vec<u64> {
            groups.iter().flat_map(|g| g.rows.iter().map(|r| r.id)).collect()
        };
        assert_eq!(ids(&groups_after), vec![1, 4, 3]);
        assert!(!groups_after.iter().any(|g| g.label == "Agus"));
        // Untouched groups render identically
        assert_eq!(groups_after[0].rows, groups_before[0].rows);
        assert_eq!(groups_after[1].rows, groups_before[2].rows);
    }

    #[test]
    fn test_form_without_penyadap_is_rejected() {
        let form = BakuForm {
            mandor_id: "3".into(),
            basah_latex: "12".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingPenyadap));
    }

    #[test]
    fn test_form_rejects_typed_ids_and_defaults_numbers() {
        let mut form = BakuForm {
            mandor_id: "3".into(),
            penyadap_id: "Sari".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidId("penyadap")));

        form.penyadap_id = "8".into();
        form.basah_latex = "12,5".into();
        form.sheet = "x".into();
        let dto = form.validate().unwrap();
        assert_eq!(dto.id_penyadap, 8);
        assert_eq!(dto.basah_latex, 12.0);
        assert_eq!(dto.sheet, 0.0);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["idBakuMandor"], 3);
        assert_eq!(json["brCr"], 0.0);
    }

    #[test]
    fn test_edit_fills_form_from_entry() {
        let e = BakuEntry {
            id: 4,
            id_baku_mandor: 2,
            id_penyadap: 6,
            tipe: TipeProduksi::TetesLanjut,
            basah_latex: 12.5,
            ..Default::default()
        };
        let form = BakuForm::from_entry(&e);
        assert_eq!(form.tipe, "TETES_LANJUT");
        assert_eq!(form.basah_latex, "12.5");
        assert_eq!(form.validate().unwrap().id_penyadap, 6);
    }

    fn detail(tipe: TipeProduksi, kebun: f64, pabrik: f64, hko: f64) -> BakuDetail {
        BakuDetail {
            tipe,
            hko,
            jumlah_kebun_basah_latek: kebun,
            jumlah_pabrik_basah_latek: pabrik,
            jumlah_sheet: pabrik / 4.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_rekap_totals_recompute_percentages() {
        let rows = vec![
            detail(TipeProduksi::Baku, 110.0, 100.0, 2.0),
            detail(TipeProduksi::BakuBorong, 50.0, 0.0, 0.0),
            detail(TipeProduksi::Baku, 90.0, 100.0, 3.0),
        ];
        let rekap = rekap_by_tipe(&rows);
        assert_eq!(rekap.groups.len(), 2);
        assert_eq!(rekap.groups[0].label, "BAKU");
        let baku = &rekap.groups[0].totals;
        assert_eq!(baku.latek_persen(), 0.0);
        assert_eq!(baku.k3_sheet_persen(), 25.0);
        assert_eq!(baku.produksi_per_taper(), 10.0);
        assert_eq!(rekap.groups[1].totals.latek_persen(), 0.0);
        assert_eq!(rekap.grand_total.kebun_latek, 250.0);
        assert_eq!(rekap.grand_total.hko, 5.0);
    }

    #[test]
    fn test_kering_falls_back_to_sheet_plus_brcr() {
        let mut d = BakuDetail {
            jumlah_sheet: 3.0,
            jumlah_br_cr: 1.5,
            ..Default::default()
        };
        assert_eq!(d.kering(), 4.5);
        d.jumlah_kering = 6.0;
        assert_eq!(d.kering(), 6.0);
    }

    #[test]
    fn test_paths() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(detail_path(date), "/api/baku/detail/2024-01-05");
    }
}
