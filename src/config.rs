/// Per-collection configuration for a management screen.
///
/// Concrete screens supply configuration, not logic: the same engine runs
/// the users and roles collections, differing only in these values.
#[derive(Debug, Clone, Copy)]
pub struct CollectionConfig {
    /// Display label used in notification messages (e.g. "User").
    pub label: &'static str,
    /// Fields searched by the free-text search box.
    pub searchable: &'static [&'static str],
    /// Fields that accept an exact-match filter.
    pub filterable: &'static [&'static str],
    /// Fields that must be non-empty before a draft can be submitted.
    pub required: &'static [&'static str],
    /// Fields that cannot be changed once a record exists (edit mode only).
    pub immutable_on_edit: &'static [&'static str],
    /// Default sort key for a fresh screen.
    pub default_sort: &'static str,
    /// Records per page. Always positive.
    pub page_size: usize,
}
