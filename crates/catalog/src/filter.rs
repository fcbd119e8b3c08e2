//! Search, status filtering, and sorting of the visible catalog.

use core::str::FromStr;

use chrono::NaiveDate;

use leafy_core::DomainError;
use leafy_inventory::Batch;

use crate::display::{DisplayEntry, visible_catalog};

/// Status facet a customer can narrow the catalog by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Anything with stock.
    Available,
    /// In stock, not yet flagged ready, still inside the maturation window.
    Growing,
    /// Flagged ready and in stock.
    Ready,
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "available" => Ok(StatusFilter::Available),
            "growing" => Ok(StatusFilter::Growing),
            "ready" => Ok(StatusFilter::Ready),
            other => Err(DomainError::validation(format!(
                "unknown status filter '{other}'"
            ))),
        }
    }
}

/// Sort order. An unknown or absent key means "leave the input order alone",
/// so callers hold an `Option<SortKey>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortKey {
    Newest,
    Oldest,
    StockHigh,
    StockLow,
}

impl SortKey {
    /// Lenient parse: unknown keys become `None` rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            "stock-high" => Some(SortKey::StockHigh),
            "stock-low" => Some(SortKey::StockLow),
            _ => None,
        }
    }
}

fn matches_search(batch: &Batch, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    batch.id.to_string().contains(needle)
        || batch.plant_date.to_string().to_lowercase().contains(needle)
        || batch.quantity().to_string().contains(needle)
}

fn matches_status(batch: &Batch, status: StatusFilter, today: NaiveDate, horizon: i64) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Available => batch.stock() > 0,
        StatusFilter::Growing => {
            batch.stock() > 0 && !batch.ready_for_sale && batch.age_days(today) < horizon
        }
        StatusFilter::Ready => batch.ready_for_sale && batch.stock() > 0,
    }
}

/// Apply search + status facet + sort, then derive display entries.
///
/// Search is a case-insensitive substring match against the stringified id,
/// plant date, or quantity. The sort is stable: ties keep their input order.
/// Sold-out batches are dropped regardless of the facet, so the result obeys
/// the same visibility rule as [`visible_catalog`].
pub fn filter_and_sort(
    batches: &[Batch],
    search: &str,
    status: StatusFilter,
    sort: Option<SortKey>,
    today: NaiveDate,
    maturation_days: i64,
) -> Vec<DisplayEntry> {
    let needle = search.trim().to_lowercase();

    let mut kept: Vec<&Batch> = batches
        .iter()
        .filter(|b| matches_search(b, &needle))
        .filter(|b| matches_status(b, status, today, maturation_days))
        .collect();

    if let Some(sort) = sort {
        match sort {
            SortKey::Newest => kept.sort_by(|a, b| b.plant_date.cmp(&a.plant_date)),
            SortKey::Oldest => kept.sort_by(|a, b| a.plant_date.cmp(&b.plant_date)),
            SortKey::StockHigh => kept.sort_by(|a, b| b.stock().cmp(&a.stock())),
            SortKey::StockLow => kept.sort_by(|a, b| a.stock().cmp(&b.stock())),
        }
    }

    let owned: Vec<Batch> = kept.into_iter().cloned().collect();
    visible_catalog(&owned, today, maturation_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafy_core::BatchId;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn batch(id: u32, quantity: u32, sold: u32, ready: bool, planted: &str) -> Batch {
        let mut b = Batch::plant(BatchId::new(id), None, date(planted), quantity, "Bibit Cabai").unwrap();
        b.decrement(sold).unwrap();
        if ready {
            b.toggle_ready();
        }
        b
    }

    fn fixture() -> Vec<Batch> {
        vec![
            batch(1, 30, 0, true, "2024-02-01"),
            batch(2, 40, 40, true, "2024-02-10"),
            batch(3, 20, 5, false, "2024-03-01"),
            batch(4, 50, 0, false, "2024-01-05"),
        ]
    }

    const TODAY: &str = "2024-03-08";

    #[test]
    fn search_matches_id_date_or_quantity() {
        let batches = fixture();

        let by_id = filter_and_sort(&batches, "3", "all".parse().unwrap(), None, date(TODAY), 14);
        // "3" matches id 3 and quantity 30 of batch 1.
        assert_eq!(
            by_id.iter().map(|e| e.id.as_u32()).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let by_date = filter_and_sort(&batches, "2024-01", StatusFilter::All, None, date(TODAY), 14);
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id.as_u32(), 4);
    }

    #[test]
    fn growing_facet_requires_stock_unready_and_young() {
        let batches = fixture();
        let growing = filter_and_sort(&batches, "", StatusFilter::Growing, None, date(TODAY), 14);
        // Batch 3 is 7 days old and unready; batch 4 is unready but past the
        // window; batch 2 has no stock.
        assert_eq!(growing.len(), 1);
        assert_eq!(growing[0].id.as_u32(), 3);
    }

    #[test]
    fn ready_facet_requires_flag_and_stock() {
        let batches = fixture();
        let ready = filter_and_sort(&batches, "", StatusFilter::Ready, None, date(TODAY), 14);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id.as_u32(), 1);
    }

    #[test]
    fn sort_keys_order_results() {
        let batches = fixture();

        let newest = filter_and_sort(&batches, "", StatusFilter::All, Some(SortKey::Newest), date(TODAY), 14);
        assert_eq!(
            newest.iter().map(|e| e.id.as_u32()).collect::<Vec<_>>(),
            vec![3, 1, 4]
        );

        let stock_low = filter_and_sort(&batches, "", StatusFilter::All, Some(SortKey::StockLow), date(TODAY), 14);
        assert_eq!(
            stock_low.iter().map(|e| e.id.as_u32()).collect::<Vec<_>>(),
            vec![3, 1, 4]
        );
    }

    #[test]
    fn missing_sort_key_keeps_input_order() {
        let batches = fixture();
        let unsorted = filter_and_sort(&batches, "", StatusFilter::All, SortKey::parse("bogus"), date(TODAY), 14);
        assert_eq!(
            unsorted.iter().map(|e| e.id.as_u32()).collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
    }

    #[test]
    fn stable_sort_breaks_ties_by_input_order() {
        let batches = vec![
            batch(1, 10, 0, true, "2024-03-01"),
            batch(2, 10, 0, true, "2024-03-01"),
            batch(3, 10, 0, true, "2024-03-01"),
        ];
        let sorted = filter_and_sort(&batches, "", StatusFilter::All, Some(SortKey::Newest), date(TODAY), 14);
        assert_eq!(
            sorted.iter().map(|e| e.id.as_u32()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn sold_out_batches_never_appear() {
        let batches = fixture();
        for status in [StatusFilter::All, StatusFilter::Available, StatusFilter::Ready] {
            let entries = filter_and_sort(&batches, "", status, None, date(TODAY), 14);
            assert!(entries.iter().all(|e| e.stock > 0));
            assert!(entries.iter().all(|e| e.id.as_u32() != 2));
        }
    }
}
