//! Portal listing options, pager math, and last-message classification.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API layer and the repository layer. Everything here is pure: the SQL
//! that consumes these values is assembled in `dossier-db`.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Pagination constants
// ---------------------------------------------------------------------------

/// Number of training files per listing page.
pub const ITEMS_PER_PAGE: i64 = 80;

/// Maximum number of ids kept in a user's recent-history list.
pub const RECENT_HISTORY_CAP: usize = 100;

// ---------------------------------------------------------------------------
// Listing option keys
// ---------------------------------------------------------------------------
//
// Every user-supplied option key parses through a closed enum with an
// explicit default arm. Unrecognized input never errors; it falls back to
// the default variant.

/// Sort key for the training-file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first (`created_at DESC`). The default.
    Date,
    /// Subject, ascending (`name ASC`).
    Name,
    /// Reference, ascending (`id ASC`).
    Reference,
}

impl SortKey {
    /// Parse a raw query-string value, falling back to [`SortKey::Date`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::Name,
            Some("reference") => Self::Reference,
            _ => Self::Date,
        }
    }

    /// The query-string key for this variant.
    pub fn key(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Reference => "reference",
        }
    }

    /// The SQL ORDER BY clause for this variant.
    pub fn order_clause(self) -> &'static str {
        match self {
            Self::Date => "created_at DESC",
            Self::Name => "name ASC",
            Self::Reference => "id ASC",
        }
    }
}

/// Filter key for the training-file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// No extra restriction. The default.
    All,
    /// Files whose most recent comment was posted by the support side.
    LastMessageSupport,
    /// Files whose most recent comment was posted by the customer.
    LastMessageCustomer,
}

impl FilterKey {
    /// Parse a raw query-string value, falling back to [`FilterKey::All`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("last_message_sup") => Self::LastMessageSupport,
            Some("last_message_cust") => Self::LastMessageCustomer,
            _ => Self::All,
        }
    }

    /// The query-string key for this variant.
    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastMessageSupport => "last_message_sup",
            Self::LastMessageCustomer => "last_message_cust",
        }
    }
}

/// Search scope for the free-text search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Name or description. The default.
    Content,
    /// Comment message bodies.
    Message,
    /// Customer display name.
    Customer,
    /// Stringified record id.
    Id,
    /// Every scope at once.
    All,
}

impl SearchScope {
    /// Parse a raw query-string value, falling back to [`SearchScope::Content`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("message") => Self::Message,
            Some("customer") => Self::Customer,
            Some("id") => Self::Id,
            Some("all") => Self::All,
            _ => Self::Content,
        }
    }

    /// The query-string key for this variant.
    pub fn key(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Message => "message",
            Self::Customer => "customer",
            Self::Id => "id",
            Self::All => "all",
        }
    }

    /// Whether this scope enables the given single scope.
    ///
    /// `All` enables everything; every other variant enables only itself.
    pub fn includes(self, scope: SearchScope) -> bool {
        self == SearchScope::All || self == scope
    }
}

/// Group key for the listing. Accepted but currently inert: the only
/// variant is `None`, kept so clients can round-trip the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    None,
}

impl GroupKey {
    /// Parse a raw query-string value. Every input maps to [`GroupKey::None`].
    pub fn parse(_raw: Option<&str>) -> Self {
        Self::None
    }

    /// The query-string key for this variant.
    pub fn key(self) -> &'static str {
        "none"
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Combine the optional range bounds into an applicable range.
///
/// The range only applies when BOTH bounds are present; a single bound is
/// ignored entirely. The repository translates the pair into
/// `created_at > begin AND created_at <= end` (exclusive lower, inclusive
/// upper).
pub fn date_range(
    begin: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Option<(Timestamp, Timestamp)> {
    match (begin, end) {
        (Some(b), Some(e)) => Some((b, e)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Computed pagination descriptor for a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    /// Current page, 1-based.
    pub page: i64,
    /// Total number of records matching the filter.
    pub total: i64,
    /// Total number of pages (at least 1).
    pub page_count: i64,
    /// Page size.
    pub step: i64,
    /// Row offset of the current page.
    pub offset: i64,
}

impl Pager {
    /// Build a pager for the given 1-based page and total count.
    ///
    /// Pages below 1 clamp to 1. An out-of-range page keeps its offset so
    /// the fetch degenerates to an empty result set rather than erroring.
    pub fn build(page: i64, total: i64, step: i64) -> Self {
        let page = page.max(1);
        let page_count = if total <= 0 { 1 } else { (total + step - 1) / step };
        Self {
            page,
            total: total.max(0),
            page_count,
            step,
            offset: (page - 1) * step,
        }
    }

    /// Number of rows the current page holds: `min(step, total - offset)`,
    /// never negative.
    pub fn len(&self) -> i64 {
        (self.total - self.offset).clamp(0, self.step)
    }

    /// Whether the current page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Search-bar descriptors
// ---------------------------------------------------------------------------

/// One selectable option in a search-bar control.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchBarOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Sort options shown in the listing search bar.
pub const SORT_OPTIONS: &[SearchBarOption] = &[
    SearchBarOption { key: "date", label: "Newest" },
    SearchBarOption { key: "name", label: "Subject" },
    SearchBarOption { key: "reference", label: "Reference" },
];

/// Filter options shown in the listing search bar.
pub const FILTER_OPTIONS: &[SearchBarOption] = &[
    SearchBarOption { key: "all", label: "All" },
    SearchBarOption {
        key: "last_message_sup",
        label: "Last message is from support",
    },
    SearchBarOption {
        key: "last_message_cust",
        label: "Last message is from customer",
    },
];

/// Search-scope options shown in the listing search bar.
pub const SEARCH_SCOPE_OPTIONS: &[SearchBarOption] = &[
    SearchBarOption { key: "content", label: "Search in Content" },
    SearchBarOption { key: "message", label: "Search in Messages" },
    SearchBarOption { key: "customer", label: "Search in Customer" },
    SearchBarOption { key: "id", label: "Search in Reference" },
    SearchBarOption { key: "all", label: "Search in All" },
];

/// Group-by options shown in the listing search bar.
pub const GROUP_OPTIONS: &[SearchBarOption] =
    &[SearchBarOption { key: "none", label: "None" }];

/// The four static descriptor tables a client needs to render the
/// search-bar controls.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchBar {
    pub sortings: &'static [SearchBarOption],
    pub filters: &'static [SearchBarOption],
    pub inputs: &'static [SearchBarOption],
    pub groupby: &'static [SearchBarOption],
}

impl SearchBar {
    pub const fn new() -> Self {
        Self {
            sortings: SORT_OPTIONS,
            filters: FILTER_OPTIONS,
            inputs: SEARCH_SCOPE_OPTIONS,
            groupby: GROUP_OPTIONS,
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Last-message classification
// ---------------------------------------------------------------------------

/// Training-file ids partitioned by the author of their most recent comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastMessagePartition {
    /// Files whose last comment author is the file's own partner.
    pub customer: Vec<DbId>,
    /// Files whose last comment author is anyone else.
    pub support: Vec<DbId>,
}

impl LastMessagePartition {
    /// Select the bucket matching the given filter key, if it has one.
    pub fn bucket(&self, filter: FilterKey) -> Option<&[DbId]> {
        match filter {
            FilterKey::LastMessageCustomer => Some(&self.customer),
            FilterKey::LastMessageSupport => Some(&self.support),
            FilterKey::All => None,
        }
    }
}

/// Classify training files by who posted their most recent comment.
///
/// `messages_newest_first` holds `(file_id, author_id)` pairs scanned in
/// descending post-date order; the first pair seen for a file wins, which
/// makes equal-timestamp ties stable on scan order. `file_partners` holds
/// `(file_id, partner_id)` for the files under consideration.
///
/// A file with no comment message lands in neither bucket. A file whose
/// last author equals its own partner is "last message from customer";
/// every other authored file (including files with no partner set) is
/// "last message from support". The two buckets are disjoint and their
/// union is exactly the authored files, sorted by id.
pub fn partition_by_last_author(
    messages_newest_first: &[(DbId, DbId)],
    file_partners: &[(DbId, Option<DbId>)],
) -> LastMessagePartition {
    let mut last_author: HashMap<DbId, DbId> = HashMap::new();
    for &(file_id, author_id) in messages_newest_first {
        last_author.entry(file_id).or_insert(author_id);
    }

    let mut partition = LastMessagePartition::default();
    for &(file_id, partner_id) in file_partners {
        let Some(&author_id) = last_author.get(&file_id) else {
            continue;
        };
        if partner_id == Some(author_id) {
            partition.customer.push(file_id);
        } else {
            partition.support.push(file_id);
        }
    }

    partition.customer.sort_unstable();
    partition.support.sort_unstable();
    partition
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
