//! Tab titles, one place for every tab key.
//!
//! Aggregate tabs take their title from `AggregateRoot::list_name`; reports,
//! dashboards and system pages are listed by hand.

use contracts::domain::a001_mandor::aggregate::Mandor;
use contracts::domain::a002_penyadap::aggregate::Penyadap;
use contracts::domain::a004_peta::aggregate::Peta;
use contracts::domain::a005_master::aggregate::Master;
use contracts::domain::common::AggregateRoot;

/// Title for a tab key, `""` for an unknown key
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Production ────────────────────────────────────────────────────
        "a003_baku" => "Input Produksi",
        "a003_baku_rekap" => "Rekap Produksi",

        // ── Master data ───────────────────────────────────────────────────
        "a001_mandor" => Mandor::list_name(),
        "a002_penyadap" => Penyadap::list_name(),
        "a004_peta" => Peta::list_name(),
        "a005_master" => Master::list_name(),

        // ── Reports ───────────────────────────────────────────────────────
        "d400_afdeling_summary" => "Ringkasan Afdeling",
        "p900_monitoring" => "Monitoring",
        "p901_visualisasi" => "Visualisasi",
        "p902_perbandingan" => "Perbandingan",

        // ── System ────────────────────────────────────────────────────────
        "sys_account" => "Manajemen Akun",

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_tabs_use_list_names() {
        assert_eq!(tab_label_for_key("a001_mandor"), "Data Mandor");
        assert_eq!(tab_label_for_key("a005_master"), "Daftar Master");
        assert_eq!(tab_label_for_key("p900_monitoring"), "Monitoring");
        assert_eq!(tab_label_for_key("u501_import_from_ut"), "");
    }

    #[test]
    fn test_aggregate_keys_match_full_names() {
        assert_eq!(Mandor::full_name(), "a001_mandor");
        assert_eq!(Penyadap::full_name(), "a002_penyadap");
        assert_eq!(Peta::full_name(), "a004_peta");
        assert_eq!(Master::full_name(), "a005_master");
    }
}
