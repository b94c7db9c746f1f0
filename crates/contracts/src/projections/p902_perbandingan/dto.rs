//! Side-by-side comparison of 2 to 4 people over their own date ranges.
//! Each card is one `/api/search` request; the backend summary is compared
//! on two headline metrics per view mode.

use crate::projections::p900_monitoring::dto::{MonitoringSummary, SearchForm, SearchQuery, ViewMode};
use crate::shared::api::ValidationError;

pub const MIN_CARDS: usize = 2;
pub const MAX_CARDS: usize = 4;

/// One comparison card as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonCard {
    pub person_id: String,
    /// Text shown in the autocomplete input, used as the card title
    pub display_name: String,
    pub tanggal_awal: String,
    pub tanggal_akhir: String,
    pub tipe_produksi: String,
}

/// Refuses a card beyond [`MAX_CARDS`]
pub fn can_add_card(current: usize) -> Result<(), ValidationError> {
    if current >= MAX_CARDS {
        Err(ValidationError::TooManyComparisons(MAX_CARDS))
    } else {
        Ok(())
    }
}

/// Validates every card in order and stops at the first incomplete one
pub fn validate_cards(
    mode: ViewMode,
    cards: &[ComparisonCard],
) -> Result<Vec<(String, SearchQuery)>, ValidationError> {
    if cards.len() < MIN_CARDS {
        return Err(ValidationError::TooFewComparisons(MIN_CARDS));
    }
    if cards.len() > MAX_CARDS {
        return Err(ValidationError::TooManyComparisons(MAX_CARDS));
    }
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let form = SearchForm {
                mode,
                person_id: card.person_id.clone(),
                tanggal_awal: card.tanggal_awal.clone(),
                tanggal_akhir: card.tanggal_akhir.clone(),
                tipe_produksi: card.tipe_produksi.clone(),
                afdeling: String::new(),
            };
            match form.validate() {
                Ok(query) => Ok((card.display_name.clone(), query)),
                Err(
                    ValidationError::MissingMandor
                    | ValidationError::MissingPenyadap
                    | ValidationError::MissingDateRange,
                ) => Err(ValidationError::IncompleteCard(i + 1)),
                Err(other) => Err(other),
            }
        })
        .collect()
}

/// Fetched summary of one card
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub name: String,
    pub summary: MonitoringSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Primary,
    Secondary,
}

/// Headline metric labels per mode
pub fn metric_label(mode: ViewMode, metric: Metric) -> &'static str {
    match (mode, metric) {
        (ViewMode::Penyadap, Metric::Primary) => "Total Basah Latek",
        (ViewMode::Penyadap, Metric::Secondary) => "Total Sheet",
        (ViewMode::Mandor, Metric::Primary) => "Total HKO",
        (ViewMode::Mandor, Metric::Secondary) => "Rata-rata Produksi/Taper",
    }
}

pub fn metric_value(mode: ViewMode, metric: Metric, summary: &MonitoringSummary) -> f64 {
    match (mode, metric) {
        (ViewMode::Penyadap, Metric::Primary) => summary.total_basah_latek,
        (ViewMode::Penyadap, Metric::Secondary) => summary.total_sheet,
        (ViewMode::Mandor, Metric::Primary) => summary.total_hko,
        (ViewMode::Mandor, Metric::Secondary) => summary.rata_rata_produksi_per_taper,
    }
}

/// Which headline metrics a card leads on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlights {
    pub primary: bool,
    pub secondary: bool,
}

/// Every card holding the maximum gets the badge; a maximum of zero gives none
pub fn highlights(mode: ViewMode, results: &[ComparisonResult]) -> Vec<Highlights> {
    let best = |metric: Metric| {
        results
            .iter()
            .map(|r| metric_value(mode, metric, &r.summary))
            .fold(f64::NEG_INFINITY, f64::max)
    };
    let (best_primary, best_secondary) = (best(Metric::Primary), best(Metric::Secondary));
    results
        .iter()
        .map(|r| {
            let p = metric_value(mode, Metric::Primary, &r.summary);
            let s = metric_value(mode, Metric::Secondary, &r.summary);
            Highlights {
                primary: p > 0.0 && p == best_primary,
                secondary: s > 0.0 && s == best_secondary,
            }
        })
        .collect()
}

/// Share of each card in the primary metric, in percent (all zero when the total is zero)
pub fn primary_shares(mode: ViewMode, results: &[ComparisonResult]) -> Vec<f64> {
    let values: Vec<f64> = results
        .iter()
        .map(|r| metric_value(mode, Metric::Primary, &r.summary))
        .collect();
    let total: f64 = values.iter().sum();
    values
        .iter()
        .map(|v| if total > 0.0 { v / total * 100.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> ComparisonCard {
        ComparisonCard {
            person_id: id.into(),
            display_name: format!("P{}", id),
            tanggal_awal: "2024-01-01".into(),
            tanggal_akhir: "2024-01-31".into(),
            tipe_produksi: String::new(),
        }
    }

    fn result(latek: f64, sheet: f64) -> ComparisonResult {
        ComparisonResult {
            name: String::new(),
            summary: MonitoringSummary {
                total_basah_latek: latek,
                total_sheet: sheet,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_card_count_bounds() {
        assert_eq!(
            validate_cards(ViewMode::Penyadap, &[card("1")]),
            Err(ValidationError::TooFewComparisons(2))
        );
        assert_eq!(can_add_card(3), Ok(()));
        assert_eq!(can_add_card(4), Err(ValidationError::TooManyComparisons(4)));
    }

    #[test]
    fn test_incomplete_card_is_reported_by_number() {
        let mut second = card("2");
        second.tanggal_akhir.clear();
        let err = validate_cards(ViewMode::Mandor, &[card("1"), second]).unwrap_err();
        assert_eq!(err, ValidationError::IncompleteCard(2));
        assert_eq!(err.to_string(), "Lengkapi semua field yang wajib pada kartu 2!");
    }

    #[test]
    fn test_valid_cards_build_one_query_each() {
        let queries = validate_cards(ViewMode::Mandor, &[card("1"), card("7")]).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].0, "P7");
        assert_eq!(queries[1].1.id_mandor, Some(7));
    }

    #[test]
    fn test_highlights_skip_zero_maximum() {
        let results = vec![result(10.0, 0.0), result(25.0, 0.0), result(25.0, 0.0)];
        let h = highlights(ViewMode::Penyadap, &results);
        assert_eq!(h[0], Highlights { primary: false, secondary: false });
        assert_eq!(h[1], Highlights { primary: true, secondary: false });
        assert_eq!(h[2], Highlights { primary: true, secondary: false });
    }

    #[test]
    fn test_primary_shares() {
        let results = vec![result(30.0, 0.0), result(10.0, 0.0)];
        assert_eq!(primary_shares(ViewMode::Penyadap, &results), vec![75.0, 25.0]);
        let zeros = vec![result(0.0, 0.0), result(0.0, 0.0)];
        assert_eq!(primary_shares(ViewMode::Penyadap, &zeros), vec![0.0, 0.0]);
    }
}
