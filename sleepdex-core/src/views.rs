//! Derived View Engine.
//!
//! Every function here is pure over a catalog and an acquisition snapshot;
//! front-ends recompute whatever they display after each mutation.

use serde::Serialize;
use std::fmt;

use crate::acquisition::AcquisitionState;
use crate::catalog::{Catalog, Location, Record, Style};
use crate::constants::{
    ACQUIRED_LABEL, ALL_LOCATIONS_LABEL, FILTER_ANY_LABEL, MAX_STAR_TIER, MIN_STAR_TIER,
    MISSING_LABEL, RATE_LABEL, TOTAL_ROW_LABEL,
};
use crate::kana::matches_phonetic;
use crate::rank::Rank;

/// Acquired/total counts for one summary cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryCell {
    pub acquired: usize,
    pub total: usize,
    pub rate: u8,
}

impl SummaryCell {
    #[must_use]
    pub fn new(acquired: usize, total: usize) -> Self {
        Self {
            acquired,
            total,
            rate: completion_rate(acquired, total),
        }
    }

    /// `取得率: N%`
    #[must_use]
    pub fn rate_text(&self) -> String {
        format!("{RATE_LABEL}: {}%", self.rate)
    }
}

impl fmt::Display for SummaryCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.acquired, self.total)
    }
}

/// `round(100 * acquired / total)` with halves rounding up; 0 for an empty total.
#[must_use]
pub fn completion_rate(acquired: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let acquired = acquired.min(total) as u64;
    let total = total as u64;
    let rate = (200 * acquired + total) / (2 * total);
    u8::try_from(rate).unwrap_or(100)
}

/// Column of the summary table: every record, or one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryColumn {
    All,
    At(Location),
}

impl SummaryColumn {
    #[must_use]
    pub fn all_columns() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Location::ALL.into_iter().map(Self::At))
            .collect()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_LOCATIONS_LABEL,
            Self::At(location) => location.label(),
        }
    }

    fn includes(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::At(location) => record.is_present_at(location),
        }
    }
}

/// Row of the summary table: one style, or the cross-style total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryRowKind {
    Style(Style),
    Total,
}

impl SummaryRowKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Style(style) => style.label(),
            Self::Total => TOTAL_ROW_LABEL,
        }
    }

    fn includes(self, record: &Record) -> bool {
        match self {
            Self::Style(style) => record.style_label == style.label(),
            Self::Total => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub kind: SummaryRowKind,
    pub cells: Vec<SummaryCell>,
}

/// Styles × (all + locations), plus a total row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub columns: Vec<SummaryColumn>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    #[must_use]
    pub fn cell(&self, row: SummaryRowKind, column: SummaryColumn) -> Option<SummaryCell> {
        let col = self.columns.iter().position(|c| *c == column)?;
        self.rows
            .iter()
            .find(|r| r.kind == row)
            .and_then(|r| r.cells.get(col).copied())
    }

    #[must_use]
    pub fn total(&self) -> Option<SummaryCell> {
        self.cell(SummaryRowKind::Total, SummaryColumn::All)
    }
}

#[must_use]
pub fn compute_summary(catalog: &Catalog, state: &AcquisitionState) -> SummaryTable {
    let columns = SummaryColumn::all_columns();
    let rows = Style::ALL
        .into_iter()
        .map(SummaryRowKind::Style)
        .chain(std::iter::once(SummaryRowKind::Total))
        .map(|kind| SummaryRow {
            kind,
            cells: columns
                .iter()
                .map(|&column| summary_cell(catalog, state, kind, column))
                .collect(),
        })
        .collect();
    SummaryTable { columns, rows }
}

fn summary_cell(
    catalog: &Catalog,
    state: &AcquisitionState,
    row: SummaryRowKind,
    column: SummaryColumn,
) -> SummaryCell {
    let (acquired, total) = catalog
        .records()
        .iter()
        .filter(|r| row.includes(r) && column.includes(r))
        .fold((0, 0), |(acquired, total), r| {
            (acquired + usize::from(state.is_acquired(&r.id)), total + 1)
        });
    SummaryCell::new(acquired, total)
}

/// Records present at `location`, or the whole catalog for `None`.
#[must_use]
pub fn location_rows(catalog: &Catalog, location: Option<Location>) -> Vec<&Record> {
    catalog
        .records()
        .iter()
        .filter(|r| location.is_none_or(|loc| r.is_present_at(loc)))
        .collect()
}

/// Records at `location` whose rank is at or below `threshold` and which
/// are not yet acquired, in catalog order.
#[must_use]
pub fn reverse_lookup<'a>(
    catalog: &'a Catalog,
    state: &AcquisitionState,
    location: Location,
    threshold: Rank,
) -> Vec<&'a Record> {
    catalog
        .records()
        .iter()
        .filter(|r| {
            r.rank_at(location)
                .is_some_and(|raw| threshold.admits(raw))
        })
        .filter(|r| !state.is_acquired(&r.id))
        .collect()
}

/// Star-tier variants of one named creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RarityGroup {
    pub catalog_number: String,
    pub name: String,
    /// Record ids indexed by star tier minus one.
    pub variants: [Option<String>; MAX_STAR_TIER],
}

impl RarityGroup {
    /// Record id for `tier` stars (1-based).
    #[must_use]
    pub fn variant(&self, tier: usize) -> Option<&str> {
        tier.checked_sub(MIN_STAR_TIER)
            .and_then(|slot| self.variants.get(slot))
            .and_then(Option::as_deref)
    }

    /// `(acquired, existing)` variant counts.
    #[must_use]
    pub fn progress(&self, state: &AcquisitionState) -> (usize, usize) {
        self.variants
            .iter()
            .flatten()
            .fold((0, 0), |(acquired, total), id| {
                (acquired + usize::from(state.is_acquired(id)), total + 1)
            })
    }
}

/// Group records by name, bucketing each by star tier. Groups keep the
/// order in which a name first appears; the first record claiming a tier
/// slot keeps it.
#[must_use]
pub fn rarity_groups(catalog: &Catalog) -> Vec<RarityGroup> {
    let mut groups: Vec<RarityGroup> = Vec::new();
    for record in catalog.records() {
        if !record.has_groupable_tier() {
            continue;
        }
        let slot = record.star_tier() - MIN_STAR_TIER;
        let pos = if let Some(pos) = groups.iter().position(|g| g.name == record.name) {
            pos
        } else {
            groups.push(RarityGroup {
                catalog_number: record.catalog_number.clone(),
                name: record.name.clone(),
                variants: Default::default(),
            });
            groups.len() - 1
        };
        let variant = &mut groups[pos].variants[slot];
        if variant.is_none() {
            *variant = Some(record.id.clone());
        } else {
            log::debug!(
                "{} already has a {}-star variant; ignoring {}",
                record.name,
                slot + MIN_STAR_TIER,
                record.id
            );
        }
    }
    groups
}

/// Acquisition filter offered above every record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AcquiredFilter {
    #[default]
    Any,
    Acquired,
    Missing,
}

impl AcquiredFilter {
    pub const ALL: [Self; 3] = [Self::Any, Self::Acquired, Self::Missing];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => FILTER_ANY_LABEL,
            Self::Acquired => ACQUIRED_LABEL,
            Self::Missing => MISSING_LABEL,
        }
    }

    /// Option value used by select widgets; empty means no filter.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Acquired => ACQUIRED_LABEL,
            Self::Missing => MISSING_LABEL,
        }
    }

    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            ACQUIRED_LABEL | "acquired" => Self::Acquired,
            MISSING_LABEL | "missing" => Self::Missing,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub const fn accepts(self, acquired: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Acquired => acquired,
            Self::Missing => !acquired,
        }
    }
}

/// Column filters for a record table. Empty strings pass everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowFilter {
    pub name_query: String,
    pub rarity: String,
    pub style: String,
    pub acquired: AcquiredFilter,
}

impl RowFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_query.trim().is_empty()
            && self.rarity.is_empty()
            && self.style.is_empty()
            && self.acquired == AcquiredFilter::Any
    }

    #[must_use]
    pub fn matches(&self, record: &Record, state: &AcquisitionState) -> bool {
        (self.rarity.is_empty() || record.rarity_label == self.rarity)
            && (self.style.is_empty() || record.style_label == self.style)
            && matches_phonetic(&record.name, self.name_query.trim())
            && self.acquired.accepts(state.is_acquired(&record.id))
    }
}

/// Ordered subset of `rows` passing `filter`.
#[must_use]
pub fn apply_row_filter<'a, I>(
    rows: I,
    state: &AcquisitionState,
    filter: &RowFilter,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    rows.into_iter()
        .filter(|record| filter.matches(record, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::Tier;

    fn record(id: &str, style: Style) -> Record {
        Record::new(id, id).with_style(style.label())
    }

    #[test]
    fn rate_rounds_half_up_and_handles_zero() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 2), 50);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 200), 1); // 0.5 rounds up
        assert_eq!(completion_rate(3, 3), 100);
    }

    #[test]
    fn summary_counts_location_presence() {
        let catalog = Catalog::from_records(vec![
            record("p1", Style::Dozing).with_rank(Location::Cyan, "ノーマル1"),
            record("p2", Style::Dozing).with_rank(Location::Cyan, "ノーマル2"),
            record("p3", Style::Slumbering),
        ]);
        let state = AcquisitionState::from_ids(["p1", "p3"]);
        let table = compute_summary(&catalog, &state);

        assert_eq!(table.columns.len(), 7);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(
            table.cell(SummaryRowKind::Style(Style::Dozing), SummaryColumn::At(Location::Cyan)),
            Some(SummaryCell::new(1, 2))
        );
        assert_eq!(
            table.cell(SummaryRowKind::Style(Style::Slumbering), SummaryColumn::All),
            Some(SummaryCell { acquired: 1, total: 1, rate: 100 })
        );
        assert_eq!(
            table.cell(SummaryRowKind::Style(Style::Snoozing), SummaryColumn::At(Location::Gold)),
            Some(SummaryCell { acquired: 0, total: 0, rate: 0 })
        );
        assert_eq!(table.total(), Some(SummaryCell::new(2, 3)));
    }

    #[test]
    fn summary_cell_text() {
        let cell = SummaryCell::new(1, 2);
        assert_eq!(cell.to_string(), "1 / 2");
        assert_eq!(cell.rate_text(), "取得率: 50%");
    }

    #[test]
    fn location_rows_preserve_order() {
        let catalog = Catalog::from_records(vec![
            record("a", Style::Dozing).with_rank(Location::Taupe, "スーパー1"),
            record("b", Style::Dozing),
            record("c", Style::Dozing).with_rank(Location::Taupe, "ノーマル1"),
        ]);
        let ids = |rows: Vec<&Record>| rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(location_rows(&catalog, Some(Location::Taupe))), ["a", "c"]);
        assert_eq!(ids(location_rows(&catalog, None)), ["a", "b", "c"]);
    }

    #[test]
    fn reverse_lookup_scenario() {
        let catalog = Catalog::from_records(vec![
            record("p1", Style::Dozing).with_rank(Location::Wakakusa, "スーパー3"),
        ]);
        let mut state = AcquisitionState::new();
        let threshold = Rank::new(Tier::Super, 5);

        let hits = reverse_lookup(&catalog, &state, Location::Wakakusa, threshold);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");

        state.toggle("p1");
        assert!(reverse_lookup(&catalog, &state, Location::Wakakusa, threshold).is_empty());
    }

    #[test]
    fn reverse_lookup_skips_higher_and_garbled_ranks() {
        let catalog = Catalog::from_records(vec![
            record("low", Style::Dozing).with_rank(Location::Lapis, "ノーマル4"),
            record("high", Style::Dozing).with_rank(Location::Lapis, "ハイパー1"),
            record("junk", Style::Dozing).with_rank(Location::Lapis, "???"),
            record("elsewhere", Style::Dozing).with_rank(Location::Gold, "ノーマル1"),
        ]);
        let hits = reverse_lookup(
            &catalog,
            &AcquisitionState::new(),
            Location::Lapis,
            Rank::new(Tier::Super, 1),
        );
        let ids: Vec<_> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["low"]);
    }

    #[test]
    fn rarity_groups_bucket_by_star_count() {
        let catalog = Catalog::from_records(vec![
            Record::new("e1", "イーブイ").with_number("133").with_rarity("☆"),
            Record::new("p2", "ピカチュウ").with_number("25").with_rarity("☆☆"),
            Record::new("e3", "イーブイ").with_number("133").with_rarity("☆☆☆"),
            Record::new("e3b", "イーブイ").with_number("133").with_rarity("☆☆☆"),
            Record::new("e5", "イーブイ").with_rarity("☆☆☆☆☆"),
            Record::new("none", "ダークライ").with_rarity("-"),
        ]);
        let groups = rarity_groups(&catalog);
        assert_eq!(groups.len(), 2);

        let eevee = &groups[0];
        assert_eq!(eevee.name, "イーブイ");
        assert_eq!(eevee.catalog_number, "133");
        assert_eq!(eevee.variant(1), Some("e1"));
        assert_eq!(eevee.variant(2), None);
        assert_eq!(eevee.variant(3), Some("e3"));
        assert_eq!(eevee.variant(4), None);
        assert_eq!(eevee.variant(0), None);
        assert_eq!(eevee.variant(5), None);

        let state = AcquisitionState::from_ids(["e3"]);
        assert_eq!(eevee.progress(&state), (1, 2));
        assert_eq!(groups[1].variant(2), Some("p2"));
    }

    #[test]
    fn row_filter_combines_columns() {
        let rows = vec![
            Record::new("1", "ピカチュウ").with_rarity("☆").with_style("うとうと"),
            Record::new("2", "ぴかちゅう").with_rarity("☆☆").with_style("すやすや"),
            Record::new("3", "イーブイ").with_rarity("☆").with_style("うとうと"),
        ];
        let state = AcquisitionState::from_ids(["3"]);
        let ids = |filter: &RowFilter| {
            apply_row_filter(&rows, &state, filter)
                .iter()
                .map(|r| r.id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(&RowFilter::default()), ["1", "2", "3"]);
        let by_name = RowFilter {
            name_query: " ピカ ".to_string(),
            ..RowFilter::default()
        };
        assert_eq!(ids(&by_name), ["1", "2"]);
        let by_rarity = RowFilter {
            rarity: "☆".to_string(),
            ..RowFilter::default()
        };
        assert_eq!(ids(&by_rarity), ["1", "3"]);
        let missing_dozing = RowFilter {
            style: "うとうと".to_string(),
            acquired: AcquiredFilter::Missing,
            ..RowFilter::default()
        };
        assert_eq!(ids(&missing_dozing), ["1"]);
        let acquired = RowFilter {
            acquired: AcquiredFilter::Acquired,
            ..RowFilter::default()
        };
        assert_eq!(ids(&acquired), ["3"]);
    }

    #[test]
    fn acquired_filter_parses_labels() {
        assert_eq!(AcquiredFilter::parse("取得済"), AcquiredFilter::Acquired);
        assert_eq!(AcquiredFilter::parse("missing"), AcquiredFilter::Missing);
        assert_eq!(AcquiredFilter::parse(""), AcquiredFilter::Any);
        assert_eq!(AcquiredFilter::Any.label(), "全て");
    }
}
