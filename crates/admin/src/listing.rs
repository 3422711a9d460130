//! Filtering, sorting and paging of fetched admin lists.
//!
//! List endpoints return one fetched batch; the dashboard narrows it down
//! locally. Filtering is a case-insensitive substring match, sorting is stable
//! so rows with equal keys keep the backend's order.

use std::cmp::Reverse;

use bazaar_core::{Category, Customer, Order, Product, Translator};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Lenient parse; anything but `desc` is ascending.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(d) if d.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// List page query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    /// Trimmed search text, `None` when blank.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Lowercased search text for matching.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.search().map(str::to_lowercase)
    }

    #[must_use]
    pub fn sort_column(&self) -> Option<&str> {
        self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn direction(&self) -> SortDir {
        SortDir::parse(self.dir.as_deref())
    }

    #[must_use]
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Parameters to carry over to pagination links.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = self.search() {
            params.push(("q", q.to_string()));
        }
        if let Some(status) = self.status_filter() {
            params.push(("status", status.to_string()));
        }
        if let Some(sort) = self.sort_column() {
            params.push(("sort", sort.to_string()));
            params.push(("dir", self.direction().as_str().to_string()));
        }
        params
    }
}

/// A comparable value for one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Int(i64),
    Amount(Decimal),
    Time(Option<DateTime<Utc>>),
    Text(String),
}

impl SortKey {
    fn text(value: &str) -> Self {
        Self::Text(value.to_lowercase())
    }
}

/// A row type the dashboard can search and sort.
pub trait Listable {
    /// Whether the row contains `needle` (already lowercased).
    fn matches(&self, needle: &str) -> bool;

    /// Value for `column`, `None` when the column is not sortable.
    fn sort_key(&self, column: &str) -> Option<SortKey>;
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn contains_opt(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains(h, needle))
}

/// Filter by the search text, then sort by the requested column.
#[must_use]
pub fn apply<T: Listable>(mut items: Vec<T>, query: &ListQuery) -> Vec<T> {
    if let Some(needle) = query.needle() {
        items.retain(|item| item.matches(&needle));
    }

    let Some(column) = query.sort_column() else {
        return items;
    };
    if !items.iter().any(|item| item.sort_key(column).is_some()) {
        return items;
    }

    match query.direction() {
        SortDir::Asc => items.sort_by_cached_key(|item| item.sort_key(column)),
        SortDir::Desc => items.sort_by_cached_key(|item| Reverse(item.sort_key(column))),
    }
    items
}

/// One page of a filtered list.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
}

/// Cut out `page` (1-based, clamped to the last page).
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Paged<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let last_page = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, last_page);
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Paged {
        items,
        page,
        last_page,
        total,
    }
}

/// Column definition for a data table.
#[derive(Debug, Clone, Copy)]
pub struct TableColumn {
    pub key: &'static str,
    pub label_key: &'static str,
    pub sortable: bool,
}

impl TableColumn {
    #[must_use]
    pub const fn sortable(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            sortable: true,
        }
    }

    #[must_use]
    pub const fn new(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            sortable: false,
        }
    }
}

/// A rendered column header.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: String,
    /// Link that sorts by this column, toggling direction when already active.
    pub url: Option<String>,
    pub indicator: &'static str,
}

/// Build headers for `columns` on the list at `path`.
#[must_use]
pub fn headers(
    columns: &[TableColumn],
    query: &ListQuery,
    path: &str,
    i18n: Translator,
) -> Vec<HeaderView> {
    let active = query.sort_column();
    let dir = query.direction();

    columns
        .iter()
        .map(|column| {
            let is_active = active == Some(column.key);
            let next_dir = if is_active { dir.toggled() } else { SortDir::Asc };
            let url = column.sortable.then(|| {
                let mut params = url::form_urlencoded::Serializer::new(String::new());
                if let Some(q) = query.search() {
                    params.append_pair("q", q);
                }
                if let Some(status) = query.status_filter() {
                    params.append_pair("status", status);
                }
                params.append_pair("sort", column.key);
                params.append_pair("dir", next_dir.as_str());
                format!("{path}?{}", params.finish())
            });
            let indicator = match (is_active, dir) {
                (true, SortDir::Asc) => "▲",
                (true, SortDir::Desc) => "▼",
                (false, _) => "",
            };
            HeaderView {
                label: i18n.t(column.label_key).to_string(),
                url,
                indicator,
            }
        })
        .collect()
}

/// Previous/next links for a paged list.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub label: String,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl Pagination {
    /// Links for `paged`, keeping the list's other query parameters.
    ///
    /// Returns `None` when everything fits on one page.
    #[must_use]
    pub fn new<T>(paged: &Paged<T>, query: &ListQuery, path: &str, i18n: Translator) -> Option<Self> {
        if paged.last_page <= 1 {
            return None;
        }
        let params = query.params();
        let link = |n: usize| {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in &params {
                serializer.append_pair(key, value);
            }
            if n > 1 {
                serializer.append_pair("page", &n.to_string());
            }
            let qs = serializer.finish();
            if qs.is_empty() {
                path.to_string()
            } else {
                format!("{path}?{qs}")
            }
        };
        Some(Self {
            label: i18n.f(
                "common.page_of",
                &[
                    ("current", &paged.page.to_string()),
                    ("last", &paged.last_page.to_string()),
                ],
            ),
            prev_url: (paged.page > 1).then(|| link(paged.page - 1)),
            next_url: (paged.page < paged.last_page).then(|| link(paged.page + 1)),
        })
    }
}

// =============================================================================
// Row types
// =============================================================================

impl Listable for Product {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains_opt(self.name_ar.as_deref(), needle)
            || contains_opt(self.category.as_ref().map(|c| c.name.as_str()), needle)
            || self.id.to_string() == needle
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "id" => Some(SortKey::Int(self.id.as_i64())),
            "name" => Some(SortKey::text(&self.name)),
            "price" => Some(SortKey::Amount(self.effective_price())),
            "stock" => Some(SortKey::Int(self.stock.unwrap_or(0))),
            "category" => Some(SortKey::text(
                self.category.as_ref().map_or("", |c| c.name.as_str()),
            )),
            _ => None,
        }
    }
}

impl Listable for Category {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains_opt(self.name_ar.as_deref(), needle)
            || contains_opt(self.description.as_deref(), needle)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "id" => Some(SortKey::Int(self.id.as_i64())),
            "name" => Some(SortKey::text(&self.name)),
            "products_count" => Some(SortKey::Int(self.products_count.unwrap_or(0))),
            _ => None,
        }
    }
}

impl Listable for Order {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.reference(), needle)
            || contains(&self.customer_name, needle)
            || contains_opt(self.customer_email.as_deref(), needle)
            || contains_opt(self.customer_phone.as_deref(), needle)
            || contains_opt(self.city.as_deref(), needle)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "id" => Some(SortKey::Int(self.id.as_i64())),
            "customer" => Some(SortKey::text(&self.customer_name)),
            "total" => Some(SortKey::Amount(self.total)),
            "status" => Some(SortKey::Text(self.status.as_str().to_string())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            _ => None,
        }
    }
}

impl Listable for Customer {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.email, needle)
            || contains_opt(self.phone.as_deref(), needle)
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "id" => Some(SortKey::Int(self.id.as_i64())),
            "name" => Some(SortKey::text(&self.name)),
            "email" => Some(SortKey::text(&self.email)),
            "orders_count" => Some(SortKey::Int(self.orders_count)),
            "total_spent" => Some(SortKey::Amount(self.total_spent.unwrap_or_default())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use bazaar_core::Locale;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        rank: i64,
    }

    impl Listable for Row {
        fn matches(&self, needle: &str) -> bool {
            contains(self.name, needle)
        }

        fn sort_key(&self, column: &str) -> Option<SortKey> {
            match column {
                "name" => Some(SortKey::text(self.name)),
                "rank" => Some(SortKey::Int(self.rank)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Cardamom", rank: 2 },
            Row { name: "saffron", rank: 1 },
            Row { name: "Dates", rank: 2 },
            Row { name: "Sumac", rank: 3 },
        ]
    }

    fn query(q: Option<&str>, sort: Option<&str>, dir: Option<&str>) -> ListQuery {
        ListQuery {
            q: q.map(String::from),
            sort: sort.map(String::from),
            dir: dir.map(String::from),
            ..ListQuery::default()
        }
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let out = apply(rows(), &query(Some(" SA "), None, None));
        assert_eq!(names(&out), ["saffron"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let asc = apply(rows(), &query(None, Some("rank"), None));
        assert_eq!(names(&asc), ["saffron", "Cardamom", "Dates", "Sumac"]);

        let desc = apply(rows(), &query(None, Some("rank"), Some("desc")));
        assert_eq!(names(&desc), ["Sumac", "Cardamom", "Dates", "saffron"]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let out = apply(rows(), &query(None, Some("name"), Some("asc")));
        assert_eq!(names(&out), ["Cardamom", "Dates", "saffron", "Sumac"]);
    }

    #[test]
    fn test_unknown_column_keeps_order() {
        let out = apply(rows(), &query(None, Some("colour"), Some("desc")));
        assert_eq!(out, rows());
    }

    #[test]
    fn test_paginate_clamps_page() {
        let paged = paginate((1..=7).collect::<Vec<_>>(), 9, 3);
        assert_eq!(paged.page, 3);
        assert_eq!(paged.last_page, 3);
        assert_eq!(paged.items, vec![7]);
        assert_eq!(paged.total, 7);

        let empty = paginate(Vec::<i32>::new(), 1, 25);
        assert_eq!(empty.last_page, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_headers_toggle_active_column() {
        let columns = [
            TableColumn::sortable("name", "admin.field.name"),
            TableColumn::new("actions", "common.actions"),
        ];
        let q = ListQuery {
            sort: Some("name".into()),
            dir: Some("asc".into()),
            status: Some("pending".into()),
            ..ListQuery::default()
        };
        let views = headers(&columns, &q, "/orders", Translator::new(Locale::En));
        assert_eq!(views[0].label, "Name");
        assert_eq!(
            views[0].url.as_deref(),
            Some("/orders?status=pending&sort=name&dir=desc")
        );
        assert_eq!(views[0].indicator, "▲");
        assert!(views[1].url.is_none());
    }

    #[test]
    fn test_pagination_keeps_filters() {
        let paged = paginate((1..=60).collect::<Vec<_>>(), 2, 25);
        let q = ListQuery {
            q: Some("oud".into()),
            page: Some(2),
            ..ListQuery::default()
        };
        let view = Pagination::new(&paged, &q, "/products", Translator::new(Locale::En)).unwrap();
        assert_eq!(view.label, "Page 2 of 3");
        assert_eq!(view.prev_url.as_deref(), Some("/products?q=oud"));
        assert_eq!(view.next_url.as_deref(), Some("/products?q=oud&page=3"));
    }
}
