//! # Table Ordering Engine
//!
//! Filters and orders the country listing. Everything here is a pure function
//! of its inputs: `ViewState` is owned by the caller and passed in on every
//! render, and the record collection is only ever borrowed.
//!
//! ```text
//! records ──► filter(keyword) ──► order(key, direction) ──► rows
//! ```
//!
//! ## Direction cycle
//!
//! Header clicks drive a 3-state cycle shared by every column:
//!
//! ```text
//! Unordered ──► Descending ──► Ascending ──► Unordered ...
//! ```
//!
//! Clicking a column other than the active one switches to it and restarts
//! the cycle at `Descending`.

use std::cmp::Ordering;

use crate::core::record::CountryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Population,
    Area,
    Gini,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Population,
        SortKey::Area,
        SortKey::Gini,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Population => "Population",
            SortKey::Area => "Area (km²)",
            SortKey::Gini => "Gini",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Unordered,
    Descending,
    Ascending,
}

impl SortDirection {
    /// Advances one step around the cycle (wraps around).
    pub fn next(self) -> SortDirection {
        match self {
            SortDirection::Unordered => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Unordered,
        }
    }

    /// Header arrow for the active column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Unordered => "",
            SortDirection::Descending => "▼",
            SortDirection::Ascending => "▲",
        }
    }
}

/// Listing view state: one active key, one shared direction, one keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
    /// Always stored lowercase.
    pub keyword: String,
}

impl ViewState {
    /// Applies a header click on `key`.
    pub fn click_header(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.next();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Descending;
        }
    }

    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.to_lowercase();
    }

    /// Arrow to draw next to `key`'s header, if it is the active column.
    pub fn arrow_for(&self, key: SortKey) -> Option<&'static str> {
        (self.key == Some(key) && self.direction != SortDirection::Unordered)
            .then(|| self.direction.arrow())
    }

    /// Filter then order, the full pipeline a render needs.
    pub fn apply<'a>(&self, records: &'a [CountryRecord]) -> Vec<&'a CountryRecord> {
        let filtered = filter(records, &self.keyword);
        order(&filtered, self.key, self.direction)
    }
}

/// True when the record's name or region contains `keyword`. The keyword
/// must already be lowercase.
pub fn matches_keyword(record: &CountryRecord, keyword: &str) -> bool {
    record.name.to_lowercase().contains(keyword) || record.region.to_lowercase().contains(keyword)
}

/// Keeps matching records in their original order, ignoring case. An empty
/// keyword keeps all.
pub fn filter<'a>(records: &'a [CountryRecord], keyword: &str) -> Vec<&'a CountryRecord> {
    if keyword.is_empty() {
        return records.iter().collect();
    }
    let keyword = keyword.to_lowercase();
    records
        .iter()
        .filter(|record| matches_keyword(record, &keyword))
        .collect()
}

/// Returns a newly ordered sequence over `records`.
///
/// With no key, or `Unordered`, the input order comes back unchanged.
/// Records with equal values keep their input order.
pub fn order<'a>(
    records: &[&'a CountryRecord],
    key: Option<SortKey>,
    direction: SortDirection,
) -> Vec<&'a CountryRecord> {
    let mut ordered = records.to_vec();
    let Some(key) = key else {
        return ordered;
    };
    match direction {
        SortDirection::Unordered => {}
        SortDirection::Ascending => ordered.sort_by(|a, b| compare_by(key, a, b)),
        SortDirection::Descending => ordered.sort_by(|a, b| compare_by(key, b, a)),
    }
    ordered
}

/// Compares two records on `key`, lower values first.
///
/// Missing populations and areas sort below every present value. Gini
/// compares the displayed figure (first year, or the 0 placeholder).
pub fn compare_by(key: SortKey, a: &CountryRecord, b: &CountryRecord) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Population => a.population.cmp(&b.population),
        SortKey::Area => match (a.area, b.area) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
        SortKey::Gini => a.gini_display().value.total_cmp(&b.gini_display().value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use std::collections::BTreeMap;

    fn names(rows: &[&CountryRecord]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    fn sample() -> Vec<CountryRecord> {
        vec![
            record("Chad", "Africa", 17),
            record("Aruba", "Americas", 3),
            record("Japan", "Asia", 125),
            record("Malaysia", "Asia", 32),
        ]
    }

    #[test]
    fn test_direction_cycle() {
        assert_eq!(SortDirection::Unordered.next(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.next(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.next(), SortDirection::Unordered);
    }

    #[test]
    fn test_three_clicks_return_to_unordered() {
        let mut view = ViewState::default();
        view.click_header(SortKey::Population);
        assert_eq!(view.direction, SortDirection::Descending);
        view.click_header(SortKey::Population);
        assert_eq!(view.direction, SortDirection::Ascending);
        view.click_header(SortKey::Population);
        assert_eq!(view.direction, SortDirection::Unordered);
        assert_eq!(view.key, Some(SortKey::Population));
    }

    #[test]
    fn test_switching_key_resets_to_descending() {
        let mut view = ViewState::default();
        view.click_header(SortKey::Name);
        view.click_header(SortKey::Name);
        assert_eq!(view.direction, SortDirection::Ascending);

        view.click_header(SortKey::Area);
        assert_eq!(view.key, Some(SortKey::Area));
        assert_eq!(view.direction, SortDirection::Descending);
    }

    #[test]
    fn test_order_without_key_is_identity() {
        let records = sample();
        let refs: Vec<&CountryRecord> = records.iter().collect();
        for direction in [
            SortDirection::Unordered,
            SortDirection::Ascending,
            SortDirection::Descending,
        ] {
            let ordered = order(&refs, None, direction);
            assert_eq!(names(&ordered), names(&refs));
        }
    }

    #[test]
    fn test_order_unordered_is_identity() {
        let records = sample();
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let ordered = order(&refs, Some(SortKey::Name), SortDirection::Unordered);
        assert_eq!(names(&ordered), vec!["Chad", "Aruba", "Japan", "Malaysia"]);
    }

    #[test]
    fn test_order_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let _ = order(&refs, Some(SortKey::Population), SortDirection::Ascending);
        assert_eq!(records, before);
        assert_eq!(names(&refs), vec!["Chad", "Aruba", "Japan", "Malaysia"]);
    }

    #[test]
    fn test_population_directions_are_reversals() {
        let records = sample();
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let asc = order(&refs, Some(SortKey::Population), SortDirection::Ascending);
        let mut desc = order(&refs, Some(SortKey::Population), SortDirection::Descending);
        assert_eq!(names(&asc), vec!["Aruba", "Chad", "Malaysia", "Japan"]);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn test_order_by_name() {
        let records = sample();
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let asc = order(&refs, Some(SortKey::Name), SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["Aruba", "Chad", "Japan", "Malaysia"]);
    }

    #[test]
    fn test_order_by_area_missing_sorts_lowest() {
        let mut records = sample();
        records[0].area = Some(1_284_000.0);
        records[1].area = None;
        records[2].area = Some(377_975.0);
        records[3].area = Some(330_803.0);
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let asc = order(&refs, Some(SortKey::Area), SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["Aruba", "Malaysia", "Japan", "Chad"]);
    }

    #[test]
    fn test_order_by_gini_uses_display_value() {
        let mut records = sample();
        records[0].gini = Some(BTreeMap::from([("2011".to_string(), 43.3)]));
        records[2].gini = Some(BTreeMap::from([("2013".to_string(), 32.9)]));
        records[3].gini = Some(BTreeMap::from([("2015".to_string(), 41.1)]));
        let refs: Vec<&CountryRecord> = records.iter().collect();
        let desc = order(&refs, Some(SortKey::Gini), SortDirection::Descending);
        // Aruba has no gini and sorts as the 0 placeholder
        assert_eq!(names(&desc), vec!["Chad", "Malaysia", "Japan", "Aruba"]);
    }

    #[test]
    fn test_filter_empty_keyword_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, "").len(), records.len());
    }

    #[test]
    fn test_filter_matches_name_or_region() {
        let mut records = sample();
        records.push(record("Asiana", "Oceania", 1));
        let kept = filter(&records, "asia");
        assert_eq!(names(&kept), vec!["Japan", "Malaysia", "Asiana"]);
    }

    #[test]
    fn test_filter_ignores_case() {
        let records = sample();
        let kept = filter(&records, "ChA");
        assert_eq!(names(&kept), vec!["Chad"]);
    }

    #[test]
    fn test_matches_keyword_expects_lowercase() {
        let chad = record("Chad", "Africa", 17);
        assert!(matches_keyword(&chad, "cha"));
        assert!(matches_keyword(&chad, "afr"));
        assert!(!matches_keyword(&chad, "asia"));
    }

    #[test]
    fn test_set_keyword_lowercases() {
        let mut view = ViewState::default();
        view.set_keyword("ASIA");
        assert_eq!(view.keyword, "asia");
    }

    #[test]
    fn test_population_header_clicks_end_to_end() {
        let records = vec![record("Chad", "Africa", 17), record("Aruba", "Americas", 3)];
        let mut view = ViewState::default();

        view.click_header(SortKey::Population);
        assert_eq!(names(&view.apply(&records)), vec!["Chad", "Aruba"]);

        view.click_header(SortKey::Population);
        assert_eq!(names(&view.apply(&records)), vec!["Aruba", "Chad"]);

        view.click_header(SortKey::Population);
        assert_eq!(names(&view.apply(&records)), vec!["Chad", "Aruba"]);
    }

    #[test]
    fn test_apply_filters_before_ordering() {
        let records = sample();
        let mut view = ViewState::default();
        view.set_keyword("asia");
        view.click_header(SortKey::Population);
        view.click_header(SortKey::Population);
        assert_eq!(names(&view.apply(&records)), vec!["Malaysia", "Japan"]);
    }

    #[test]
    fn test_arrow_for_active_column_only() {
        let mut view = ViewState::default();
        assert_eq!(view.arrow_for(SortKey::Name), None);
        view.click_header(SortKey::Name);
        assert_eq!(view.arrow_for(SortKey::Name), Some("▼"));
        assert_eq!(view.arrow_for(SortKey::Gini), None);
        view.click_header(SortKey::Name);
        assert_eq!(view.arrow_for(SortKey::Name), Some("▲"));
        view.click_header(SortKey::Name);
        assert_eq!(view.arrow_for(SortKey::Name), None);
    }
}
