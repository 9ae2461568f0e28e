use crate::record::Fielded;

use super::{Criteria, SortDirection};

/// One rendered page of a filtered, sorted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    /// The records on this page, in view order.
    pub records: Vec<R>,
    /// Total records matching the criteria, across all pages.
    pub total: usize,
    /// The 1-based page number these records belong to.
    pub page: usize,
    /// Number of pages the filtered result spans. Zero when nothing matches.
    pub page_count: usize,
}

impl<R> Page<R> {
    /// An empty result is a valid, displayed state, not an error.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Derive the current view: search, filter, stable-sort, then slice the
/// requested page.
///
/// Records missing the sort field order first under an empty key; records
/// missing a filtered field are excluded. Ties under the sort comparator
/// keep their prior relative order, so pagination is deterministic.
pub fn view<R>(records: &[R], criteria: &Criteria, searchable: &[&str]) -> Page<R>
where
    R: Fielded + Clone,
{
    let matched = records
        .iter()
        .filter(|record| matches_search(*record, criteria, searchable))
        .filter(|record| matches_filters(*record, criteria));

    // Pair each record with its precomputed sort key; sort_by is stable, and
    // reversing the comparator leaves equal keys Equal, so descending order
    // preserves tie order too.
    let mut keyed: Vec<(String, &R)> = matched
        .map(|record| {
            let key = record
                .field(&criteria.sort().key)
                .map(|value| value.sort_key())
                .unwrap_or_default();
            (key, record)
        })
        .collect();

    keyed.sort_by(|a, b| {
        let ordering = a.0.cmp(&b.0);
        match criteria.sort().direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let total = keyed.len();
    let page_size = criteria.page_size();
    let page_count = if page_size == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    };

    let start = (criteria.page() - 1).saturating_mul(page_size);
    let end = (start + page_size).min(total);
    let records = if start < end {
        keyed[start..end]
            .iter()
            .map(|(_, record)| (*record).clone())
            .collect()
    } else {
        Vec::new()
    };

    Page {
        records,
        total,
        page: criteria.page(),
        page_count,
    }
}

fn matches_search<R: Fielded>(record: &R, criteria: &Criteria, searchable: &[&str]) -> bool {
    let search = criteria.search();
    if search.is_empty() {
        return true;
    }

    searchable.iter().any(|name| {
        record
            .field(name)
            .map(|value| value.contains_ci(search))
            .unwrap_or(false)
    })
}

fn matches_filters<R: Fielded>(record: &R, criteria: &Criteria) -> bool {
    criteria.filters().all(|(field, expected)| {
        record
            .field(field)
            .map(|value| value.matches(expected))
            .unwrap_or(false)
    })
}
