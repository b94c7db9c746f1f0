//! Typeahead matching over the mandor/penyadap lists.
//!
//! Raw list records are normalized once per fetch ([`normalize_records`]):
//! the backend has used several spellings for the name column over time, so
//! the field names are resolved from the first record's keys and every record
//! is turned into a [`Candidate`]. Matching ([`Matcher::run`]) then works on
//! typed values only.
//!
//! [`Selection`] tracks the committed pick so that editing the text after a
//! pick drops the stored id.

use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashSet;

pub const MIN_QUERY_LEN: usize = 2;

pub const MANDOR_NAME_ALIASES: &[&str] = &["mandor", "nama_mandor", "namamandor", "nama"];
pub const PENYADAP_NAME_ALIASES: &[&str] = &["nama_penyadap", "namapenyadap", "nama"];
const NIK_ALIASES: &[&str] = &["nik"];
const ID_ALIASES: &[&str] = &["id"];
const TAHUN_TANAM_ALIASES: &[&str] = &["tahun_tanam", "tahuntanam"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Mandor,
    Penyadap,
}

impl CandidateKind {
    fn name_aliases(&self) -> &'static [&'static str] {
        match self {
            CandidateKind::Mandor => MANDOR_NAME_ALIASES,
            CandidateKind::Penyadap => PENYADAP_NAME_ALIASES,
        }
    }
}

/// One selectable person in the dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub nik: String,
    /// Only mandor records carry a planting year
    pub tahun_tanam: Option<u32>,
}

impl Candidate {
    /// Text written into the input once this candidate is picked
    pub fn display_value(&self) -> String {
        match self.tahun_tanam {
            Some(tahun) => format!("{} ({}) - {}", self.name, self.nik, tahun),
            None => format!("{} ({})", self.name, self.nik),
        }
    }
}

/// Key names resolved from the first record of a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub name: String,
    pub nik: String,
    pub id: String,
    pub tahun_tanam: String,
}

impl FieldMap {
    /// Case-insensitive match of `first`'s keys against the alias sets;
    /// the first alias of each set is the fallback.
    pub fn detect(first: &Map<String, Value>, kind: CandidateKind) -> Self {
        Self {
            name: find_key(first, kind.name_aliases()),
            nik: find_key(first, NIK_ALIASES),
            id: find_key(first, ID_ALIASES),
            tahun_tanam: find_key(first, TAHUN_TANAM_ALIASES),
        }
    }
}

fn find_key(record: &Map<String, Value>, aliases: &[&str]) -> String {
    record
        .keys()
        .find(|key| {
            let lower = key.to_lowercase();
            aliases.iter().any(|alias| *alias == lower)
        })
        .cloned()
        .unwrap_or_else(|| aliases[0].to_string())
}

fn value_as_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn value_as_u64(value: Option<&Value>) -> Option<u64> {
    match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Turns a raw list payload into candidates. Non-object entries are skipped;
/// a missing id becomes 0 and a zero/missing planting year becomes `None`.
pub fn normalize_records(records: &[Value], kind: CandidateKind) -> Vec<Candidate> {
    let Some(first) = records.iter().find_map(Value::as_object) else {
        return Vec::new();
    };
    let fields = FieldMap::detect(first, kind);

    records
        .iter()
        .filter_map(Value::as_object)
        .map(|record| {
            let tahun_tanam = match kind {
                CandidateKind::Mandor => value_as_u64(record.get(&fields.tahun_tanam))
                    .filter(|t| *t > 0)
                    .map(|t| t as u32),
                CandidateKind::Penyadap => None,
            };
            Candidate {
                id: value_as_u64(record.get(&fields.id)).unwrap_or(0),
                name: value_as_string(record.get(&fields.name)),
                nik: value_as_string(record.get(&fields.nik)),
                tahun_tanam,
            }
        })
        .collect()
}

/// What the dropdown should show for the current input
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Query too short or unchanged selection: dropdown closed
    Hidden,
    /// The candidate list itself is empty
    NoData,
    /// Nothing matched the query
    NotFound,
    Matches(Vec<Candidate>),
}

impl Outcome {
    pub fn is_open(&self) -> bool {
        !matches!(self, Outcome::Hidden)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    pub kind: CandidateKind,
    pub min_query_len: usize,
}

impl Matcher {
    pub fn new(kind: CandidateKind) -> Self {
        Self {
            kind,
            min_query_len: MIN_QUERY_LEN,
        }
    }

    pub fn with_min_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    /// Name matches case-insensitively, NIK matches verbatim
    pub fn run(&self, query: &str, candidates: &[Candidate]) -> Outcome {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            return Outcome::Hidden;
        }
        if candidates.is_empty() {
            return Outcome::NoData;
        }

        let lowered = query.to_lowercase();
        let filtered = candidates
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&lowered) || c.nik.contains(query));

        let results: Vec<Candidate> = match self.kind {
            CandidateKind::Penyadap => filtered.cloned().collect(),
            CandidateKind::Mandor => {
                let mut seen = HashSet::new();
                let mut unique: Vec<Candidate> = filtered
                    .filter(|c| seen.insert((c.nik.clone(), c.tahun_tanam)))
                    .cloned()
                    .collect();
                unique.sort_by(compare_mandor);
                unique
            }
        };

        if results.is_empty() {
            Outcome::NotFound
        } else {
            Outcome::Matches(results)
        }
    }
}

/// Name ascending, then planting year descending with unknown years last
fn compare_mandor(a: &Candidate, b: &Candidate) -> Ordering {
    let by_name = a
        .name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name));
    by_name.then_with(|| match (a.tahun_tanam, b.tahun_tanam) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Committed pick of an autocomplete input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    committed: Option<(Candidate, String)>,
}

impl Selection {
    /// Stores the pick and returns the text to put into the input
    pub fn select(&mut self, candidate: Candidate) -> String {
        let display = candidate.display_value();
        self.committed = Some((candidate, display.clone()));
        display
    }

    /// Returns `true` when the text still equals the committed display value.
    /// Any other text drops the selection.
    pub fn keep_if_unchanged(&mut self, text: &str) -> bool {
        match &self.committed {
            Some((_, display)) if display == text => true,
            Some(_) => {
                self.committed = None;
                false
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.committed = None;
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.committed.as_ref().map(|(c, _)| c)
    }

    pub fn id(&self) -> Option<u64> {
        self.candidate().map(|c| c.id)
    }

    pub fn display_value(&self) -> Option<&str> {
        self.committed.as_ref().map(|(_, d)| d.as_str())
    }
}

/// Input event handler: keep an unchanged selection closed, otherwise
/// clear it and match the new text.
pub fn handle_input(
    selection: &mut Selection,
    matcher: &Matcher,
    text: &str,
    candidates: &[Candidate],
) -> Outcome {
    if selection.keep_if_unchanged(text) {
        return Outcome::Hidden;
    }
    matcher.run(text, candidates)
}

/// Server typeahead hits first, then every cached record the server did not
/// return. The name-only server search never sees NIK queries; the cached
/// records keep those matchable.
pub fn merge_candidates(server: Vec<Candidate>, cached: &[Candidate]) -> Vec<Candidate> {
    let mut merged = server;
    let extra: Vec<Candidate> = cached
        .iter()
        .filter(|c| merged.iter().all(|m| m.id != c.id))
        .cloned()
        .collect();
    merged.extend(extra);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mandor(id: u64, name: &str, nik: &str, tahun: Option<u32>) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            nik: nik.to_string(),
            tahun_tanam: tahun,
        }
    }

    #[test]
    fn test_short_query_hides_dropdown() {
        let matcher = Matcher::new(CandidateKind::Penyadap);
        let list = vec![mandor(1, "Budi", "123", None)];
        assert_eq!(matcher.run("", &list), Outcome::Hidden);
        assert_eq!(matcher.run("b", &list), Outcome::Hidden);
        assert_eq!(matcher.run(" b  ", &list), Outcome::Hidden);
        // Length check comes before the empty-list check
        assert_eq!(matcher.run("b", &[]), Outcome::Hidden);
    }

    #[test]
    fn test_empty_list_and_no_match_placeholders() {
        let matcher = Matcher::new(CandidateKind::Penyadap);
        assert_eq!(matcher.run("bu", &[]), Outcome::NoData);
        let list = vec![mandor(1, "Budi", "123", None)];
        assert_eq!(matcher.run("zz", &list), Outcome::NotFound);
    }

    #[test]
    fn test_name_is_case_insensitive_nik_is_verbatim() {
        let matcher = Matcher::new(CandidateKind::Penyadap);
        let list = vec![
            mandor(1, "Budi Santoso", "AB-771", None),
            mandor(2, "Sari", "ab-990", None),
        ];
        match matcher.run("SANTO", &list) {
            Outcome::Matches(found) => assert_eq!(found.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
        match matcher.run("AB-", &list) {
            Outcome::Matches(found) => {
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].id, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mandor_dedupe_keeps_each_planting_year() {
        let matcher = Matcher::new(CandidateKind::Mandor);
        let list = vec![
            mandor(1, "Joko", "123", Some(2015)),
            mandor(2, "Joko", "123", Some(2018)),
            mandor(3, "Joko", "123", Some(2015)),
        ];
        let Outcome::Matches(found) = matcher.run("123", &list) else {
            panic!("expected matches");
        };
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].tahun_tanam, Some(2018));
        assert_eq!(found[1].tahun_tanam, Some(2015));
        // First occurrence wins for the duplicate key
        assert_eq!(found[1].id, 1);
    }

    #[test]
    fn test_mandor_sort_name_then_year_unknown_last() {
        let matcher = Matcher::new(CandidateKind::Mandor);
        let list = vec![
            mandor(1, "Wawan", "9", None),
            mandor(2, "Wawan", "9", Some(2010)),
            mandor(3, "Dewi", "8", Some(2001)),
            mandor(4, "Wawan", "7", Some(2020)),
            mandor(5, "Awan", "6", Some(1999)),
        ];
        let Outcome::Matches(found) = matcher.run("wa", &list) else {
            panic!("expected matches");
        };
        let ids: Vec<u64> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 4, 2, 1]);
    }

    #[test]
    fn test_penyadap_keeps_source_order_without_dedupe() {
        let matcher = Matcher::new(CandidateKind::Penyadap);
        let list = vec![
            mandor(5, "Zainal", "11", None),
            mandor(6, "Ahmad", "11", None),
            mandor(7, "Zainal", "11", None),
        ];
        let Outcome::Matches(found) = matcher.run("11", &list) else {
            panic!("expected matches");
        };
        let ids: Vec<u64> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn test_normalize_resolves_alias_fields_from_first_record() {
        let raw = vec![
            json!({"ID": 3, "Nama_Mandor": "Slamet", "NIK": 5512, "TahunTanam": "2012"}),
            json!({"ID": "4", "Nama_Mandor": "Tono", "NIK": "5513", "TahunTanam": 0}),
            json!("garbage"),
        ];
        let found = normalize_records(&raw, CandidateKind::Mandor);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], mandor(3, "Slamet", "5512", Some(2012)));
        assert_eq!(found[1], mandor(4, "Tono", "5513", None));
    }

    #[test]
    fn test_field_map_falls_back_to_defaults() {
        let first = json!({"foo": 1});
        let map = FieldMap::detect(first.as_object().unwrap(), CandidateKind::Mandor);
        assert_eq!(map.name, "mandor");
        assert_eq!(map.nik, "nik");
        assert_eq!(map.id, "id");
        assert_eq!(map.tahun_tanam, "tahun_tanam");
    }

    #[test]
    fn test_selection_cleared_when_text_changes() {
        let matcher = Matcher::new(CandidateKind::Mandor);
        let list = vec![mandor(9, "Joko", "123", Some(2018))];
        let mut selection = Selection::default();

        let display = selection.select(list[0].clone());
        assert_eq!(display, "Joko (123) - 2018");
        assert_eq!(selection.id(), Some(9));

        // Re-firing the input event with the same text keeps the pick
        let outcome = handle_input(&mut selection, &matcher, &display, &list);
        assert_eq!(outcome, Outcome::Hidden);
        assert_eq!(selection.id(), Some(9));

        // Any edit drops it before matching
        let outcome = handle_input(&mut selection, &matcher, "Joko (123) - 201", &list);
        assert_eq!(selection.id(), None);
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn test_penyadap_display_has_no_year() {
        let c = mandor(1, "Sari", "77", None);
        assert_eq!(c.display_value(), "Sari (77)");
    }

    #[test]
    fn test_nik_query_matches_after_merging_cached_list() {
        let server = vec![mandor(4, "Budi", "3301", None)];
        let cached = vec![mandor(4, "Budi", "3301", None), mandor(9, "Sri", "7788", None)];
        let merged = merge_candidates(server, &cached);
        assert_eq!(merged.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4, 9]);

        let matcher = Matcher::new(CandidateKind::Penyadap);
        match matcher.run("778", &merge_candidates(Vec::new(), &cached)) {
            Outcome::Matches(found) => assert_eq!(found.len(), 1),
            other => panic!("expected a NIK match, got {:?}", other),
        }
    }
}
