use serde::{Deserialize, Serialize};

use crate::enums::AfdelingKey;
use crate::shared::aggregation::{k3_percentage, per_tapper};

pub const DASHBOARD_PATH: &str = "/api/dashboard";

/// `/api/dashboard?afdeling=setro`; the backend compares the lower-cased name
pub fn dashboard_path(afdeling: AfdelingKey) -> String {
    format!("{}?afdeling={}", DASHBOARD_PATH, afdeling.code())
}

/// Today and to-date totals of one afdeling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    #[serde(rename = "totalHKOHariIni")]
    pub total_hko_hari_ini: i64,
    #[serde(rename = "totalHKOSampaiHariIni")]
    pub total_hko_sampai_hari_ini: i64,

    pub total_hari_ini_basah_latek_kebun: f64,
    pub total_hari_ini_basah_latek_pabrik: f64,
    pub total_hari_ini_basah_latek_persen: f64,
    pub total_hari_ini_basah_lump_kebun: f64,
    pub total_hari_ini_basah_lump_pabrik: f64,
    pub total_hari_ini_basah_lump_persen: f64,
    pub total_hari_ini_k3_sheet: f64,
    pub total_hari_ini_kering_sheet: f64,
    pub total_hari_ini_kering_br_cr: f64,
    pub total_hari_ini_kering_jumlah: f64,
    pub total_hari_ini_k3_sheet_persen: f64,

    pub total_sampai_hari_ini_basah_latek_kebun: f64,
    pub total_sampai_hari_ini_basah_latek_pabrik: f64,
    pub total_sampai_hari_ini_basah_latek_persen: f64,
    pub total_sampai_hari_ini_basah_lump_kebun: f64,
    pub total_sampai_hari_ini_basah_lump_pabrik: f64,
    pub total_sampai_hari_ini_basah_lump_persen: f64,
    pub total_sampai_hari_ini_k3_sheet: f64,
    pub total_sampai_hari_ini_kering_sheet: f64,
    pub total_sampai_hari_ini_kering_br_cr: f64,
    pub total_sampai_hari_ini_kering_jumlah: f64,
    pub total_sampai_hari_ini_k3_sheet_persen: f64,

    pub total_produksi_per_taper_hari_ini: f64,
    pub total_produksi_per_taper_sampai_hari_ini: f64,

    pub total_produksi_hari_ini: f64,
    pub total_produksi_sampai_hari_ini: f64,
}

/// One column of the dashboard (today or to date)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub hko: i64,
    pub latek_kebun: f64,
    pub latek_pabrik: f64,
    pub latek_persen: f64,
    pub lump_kebun: f64,
    pub lump_pabrik: f64,
    pub lump_persen: f64,
    pub k3_sheet: f64,
    pub kering_sheet: f64,
    pub kering_br_cr: f64,
    pub kering_jumlah: f64,
    pub k3_sheet_persen: f64,
    pub per_taper: f64,
    pub produksi: f64,
}

impl DashboardData {
    pub fn hari_ini(&self) -> PeriodTotals {
        PeriodTotals {
            hko: self.total_hko_hari_ini,
            latek_kebun: self.total_hari_ini_basah_latek_kebun,
            latek_pabrik: self.total_hari_ini_basah_latek_pabrik,
            latek_persen: self.total_hari_ini_basah_latek_persen,
            lump_kebun: self.total_hari_ini_basah_lump_kebun,
            lump_pabrik: self.total_hari_ini_basah_lump_pabrik,
            lump_persen: self.total_hari_ini_basah_lump_persen,
            k3_sheet: self.total_hari_ini_k3_sheet,
            kering_sheet: self.total_hari_ini_kering_sheet,
            kering_br_cr: self.total_hari_ini_kering_br_cr,
            kering_jumlah: self.total_hari_ini_kering_jumlah,
            k3_sheet_persen: self.total_hari_ini_k3_sheet_persen,
            per_taper: self.total_produksi_per_taper_hari_ini,
            produksi: self.total_produksi_hari_ini,
        }
        .with_ratios()
    }

    pub fn sampai_hari_ini(&self) -> PeriodTotals {
        PeriodTotals {
            hko: self.total_hko_sampai_hari_ini,
            latek_kebun: self.total_sampai_hari_ini_basah_latek_kebun,
            latek_pabrik: self.total_sampai_hari_ini_basah_latek_pabrik,
            latek_persen: self.total_sampai_hari_ini_basah_latek_persen,
            lump_kebun: self.total_sampai_hari_ini_basah_lump_kebun,
            lump_pabrik: self.total_sampai_hari_ini_basah_lump_pabrik,
            lump_persen: self.total_sampai_hari_ini_basah_lump_persen,
            k3_sheet: self.total_sampai_hari_ini_k3_sheet,
            kering_sheet: self.total_sampai_hari_ini_kering_sheet,
            kering_br_cr: self.total_sampai_hari_ini_kering_br_cr,
            kering_jumlah: self.total_sampai_hari_ini_kering_jumlah,
            k3_sheet_persen: self.total_sampai_hari_ini_k3_sheet_persen,
            per_taper: self.total_produksi_per_taper_sampai_hari_ini,
            produksi: self.total_produksi_sampai_hari_ini,
        }
        .with_ratios()
    }
}

impl PeriodTotals {
    // Older backends leave the derived ratios at zero
    fn with_ratios(mut self) -> Self {
        if self.k3_sheet_persen == 0.0 {
            self.k3_sheet_persen = k3_percentage(self.kering_sheet, self.latek_pabrik);
        }
        if self.per_taper == 0.0 {
            self.per_taper = per_tapper(self.kering_jumlah, self.hko as f64);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_and_partial_payload() {
        let data: DashboardData = serde_json::from_str(
            r#"{"totalHKOHariIni":4,"totalHariIniBasahLatekPabrik":200,"totalHariIniKeringSheet":50,
                "totalHariIniKeringJumlah":60,"totalHariIniK3Sheet":12}"#,
        )
        .unwrap();
        let today = data.hari_ini();
        assert_eq!(today.hko, 4);
        assert_eq!(today.k3_sheet, 12.0);
        assert_eq!(today.k3_sheet_persen, 25.0);
        assert_eq!(today.per_taper, 15.0);
        assert_eq!(data.sampai_hari_ini(), PeriodTotals::default());
    }

    #[test]
    fn test_path_uses_lowercase_key() {
        assert_eq!(
            dashboard_path(AfdelingKey::Jatiroenggo),
            "/api/dashboard?afdeling=jatiroenggo"
        );
    }
}
