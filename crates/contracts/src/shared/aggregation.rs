//! Grouping and totals for the production tables.
//!
//! Rows are partitioned by a [`GroupKey`]; every row lands in exactly one
//! group, so the sum of the group totals equals the grand total. Groups keep
//! the order in which their key was first seen.

use std::collections::HashMap;
use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Mandor,
    TahunTanam,
    Afdeling,
    Tipe,
}

/// A row that can be grouped and summed
pub trait Aggregatable {
    type Totals: Default + Clone + for<'a> AddAssign<&'a Self::Totals>;

    fn totals(&self) -> Self::Totals;

    /// Label of this row under `key`
    fn group_label(&self, key: GroupKey) -> String;
}

#[derive(Debug, Clone)]
pub struct Group<T: Aggregatable> {
    pub label: String,
    pub rows: Vec<T>,
    pub totals: T::Totals,
}

/// Groups plus the grand total over all rows
#[derive(Debug, Clone)]
pub struct Summary<T: Aggregatable> {
    pub groups: Vec<Group<T>>,
    pub grand_total: T::Totals,
}

impl<T: Aggregatable> Summary<T> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

pub fn group_by<T: Aggregatable + Clone>(rows: &[T], key: GroupKey) -> Vec<Group<T>> {
    let mut groups: Vec<Group<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let label = row.group_label(key);
        let slot = match index.get(&label) {
            Some(&i) => i,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(Group {
                    label,
                    rows: Vec::new(),
                    totals: T::Totals::default(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.totals += &row.totals();
        group.rows.push(row.clone());
    }
    groups
}

pub fn grand_total<T: Aggregatable>(rows: &[T]) -> T::Totals {
    let mut total = T::Totals::default();
    for row in rows {
        total += &row.totals();
    }
    total
}

pub fn summarize<T: Aggregatable + Clone>(rows: &[T], key: GroupKey) -> Summary<T> {
    Summary {
        groups: group_by(rows, key),
        grand_total: grand_total(rows),
    }
}

/// Shrinkage between field (kebun) and factory (pabrik) weight, in percent.
/// Zero when nothing was weighed at the factory.
pub fn loss_percentage(kebun: f64, pabrik: f64) -> f64 {
    guarded_ratio(kebun - pabrik, pabrik) * 100.0
}

/// Dry sheet as a percentage of factory wet latex (K3)
pub fn k3_percentage(kering_sheet: f64, pabrik_latex: f64) -> f64 {
    guarded_ratio(kering_sheet, pabrik_latex) * 100.0
}

/// Dry production per labor-day
pub fn per_tapper(kering_jumlah: f64, hko: f64) -> f64 {
    guarded_ratio(kering_jumlah, hko)
}

fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Weight(f64);

    impl AddAssign<&Weight> for Weight {
        fn add_assign(&mut self, rhs: &Weight) {
            self.0 += rhs.0;
        }
    }

    #[derive(Debug, Clone)]
    struct Row {
        mandor: &'static str,
        afdeling: &'static str,
        value: f64,
    }

    impl Aggregatable for Row {
        type Totals = Weight;

        fn totals(&self) -> Weight {
            Weight(self.value)
        }

        fn group_label(&self, key: GroupKey) -> String {
            match key {
                GroupKey::Afdeling => self.afdeling.to_string(),
                _ => self.mandor.to_string(),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { mandor: "Joko", afdeling: "Setro", value: 10.0 },
            Row { mandor: "Agus", afdeling: "Klepu", value: 4.5 },
            Row { mandor: "Joko", afdeling: "Klepu", value: 2.5 },
            Row { mandor: "Budi", afdeling: "Setro", value: 3.0 },
        ]
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = group_by(&rows(), GroupKey::Mandor);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Joko", "Agus", "Budi"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[0].totals, Weight(12.5));
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let data = rows();
        for key in [GroupKey::Mandor, GroupKey::Afdeling] {
            let summary = summarize(&data, key);
            let sum: f64 = summary.groups.iter().map(|g| g.totals.0).sum();
            assert_eq!(sum, summary.grand_total.0);
            assert_eq!(summary.row_count(), data.len());
        }
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        let summary = summarize::<Row>(&[], GroupKey::Mandor);
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total, Weight(0.0));
    }

    #[test]
    fn test_percentages_guard_zero_denominator() {
        assert_eq!(loss_percentage(120.0, 100.0), 20.0);
        assert_eq!(loss_percentage(50.0, 0.0), 0.0);
        assert_eq!(loss_percentage(0.0, 0.0), 0.0);
        assert_eq!(k3_percentage(30.0, 100.0), 30.0);
        assert_eq!(k3_percentage(30.0, 0.0), 0.0);
        assert_eq!(per_tapper(90.0, 3.0), 30.0);
        assert_eq!(per_tapper(90.0, 0.0), 0.0);
        assert!(!loss_percentage(f64::MAX, f64::MIN_POSITIVE).is_nan());
    }
}
