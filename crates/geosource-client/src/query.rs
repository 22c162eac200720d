//! Query-parameter assembly for the GeoJSON endpoint.

use geosource_core::{encode_sort, RecordFilter, SortSpec};

/// Parameters for one GeoJSON request. All of them are optional.
///
/// `filter` and `sort` are carried on the wire as JSON-encoded strings
/// inside their query parameters; `page` is a string-encoded, 0-indexed
/// integer; `all=true` bypasses pagination entirely. Unset parameters are
/// omitted from the URL rather than sent empty.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonQuery {
    pub filter: Option<RecordFilter>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub sort: Vec<SortSpec>,
    pub all: bool,
}

impl GeoJsonQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter tree.
    #[must_use]
    pub fn filter(mut self, filter: RecordFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the free-text search string.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the 0-indexed page to fetch.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the multi-key sort order. The first entry is the primary key;
    /// later entries break ties, in list order.
    #[must_use]
    pub fn sort(mut self, sort: Vec<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// Bypasses pagination; the server returns every matching feature.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Renders the set parameters as query pairs, JSON-encoding `filter`
    /// and `sort`.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if filter or sort serialization fails.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.to_query_value()?));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort", encode_sort(&self.sort)?));
        }
        if self.all {
            pairs.push(("all", "true".to_owned()));
        }
        Ok(pairs)
    }
}
