//! Query engine — pure derivation of the rendered view.
//!
//! Given a collection's records and the current criteria, [`view`]
//! deterministically produces the filtered, sorted, paginated subset the
//! operator sees. Nothing in this module performs I/O or mutates a store.
//!
//! ## Example
//!
//! ```ignore
//! use curator::query::{self, Criteria};
//!
//! let mut criteria = Criteria::new("name", 10);
//! criteria.set_search("am");
//! let page = query::view(&records, &criteria, &["name", "email"]);
//! ```

mod engine;

use std::collections::BTreeMap;

pub use engine::{view, Page};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The field and direction the view is ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        SortSpec {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Selecting the current key flips the direction; selecting a new key
    /// resets to ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

/// The operator's current search/filter/sort/pagination criteria.
///
/// Changing the search text or any field filter resets pagination to the
/// first page, so the operator is never left staring at a page that no
/// longer exists. Sort changes reorder the same result set and keep the
/// current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    search: String,
    filters: BTreeMap<String, String>,
    sort: SortSpec,
    page: usize,
    page_size: usize,
}

impl Criteria {
    /// Fresh criteria: no search, no filters, ascending sort on
    /// `default_sort`, page 1.
    pub fn new(default_sort: &str, page_size: usize) -> Self {
        Criteria {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: SortSpec::asc(default_sort),
            page: 1,
            page_size,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search text and reset to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    /// The active filter value for a field, if any.
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    /// Set an exact-match filter and reset to page 1.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(field.into(), value.into());
        self.page = 1;
    }

    /// Remove a filter (back to the "all" wildcard) and reset to page 1.
    pub fn clear_filter(&mut self, field: &str) {
        self.filters.remove(field);
        self.page = 1;
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Toggle the sort key (see [`SortSpec::toggle`]). Keeps the page.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to a page. Pages are 1-based; zero is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
