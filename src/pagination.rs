//! Page requests, page results and the total-count strategies used to build them.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
/// Largest page size accepted at the HTTP boundary.
pub const MAX_ITEMS_PER_PAGE: usize = 100;
/// Largest zero-based page index accepted at the HTTP boundary.
///
/// Keeps `page * MAX_ITEMS_PER_PAGE` well inside SQLite's signed 64-bit `OFFSET`.
pub const MAX_PAGE_INDEX: usize = 10_000_000;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// A zero `size` is bumped to one so a page can always hold a row.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: usize) -> Self {
        Self::new(0, size)
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// How a paged search obtains its total element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStrategy {
    /// Load every matching row once and slice the page in memory.
    Naive,
    /// Run the content query and always run a separate count query.
    Split,
    /// Run the content query and only count when the page cannot tell the total.
    #[default]
    Optimized,
}

/// Where [`Page::total_elements`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalSource {
    /// A count was taken over the full result (count query or in-memory length).
    Counted,
    /// Derived from the content length and page boundaries without counting.
    Inferred,
}

/// One page of results plus the total number of matching elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub total_source: TotalSource,
}

impl<T> Page<T> {
    pub fn new(
        content: Vec<T>,
        request: PageRequest,
        total_elements: usize,
        total_source: TotalSource,
    ) -> Self {
        Self {
            content,
            total_elements,
            page_number: request.page,
            page_size: request.size,
            total_source,
        }
    }

    /// Slices `rows` (the complete ordered result) down to the requested page.
    pub fn from_all(rows: Vec<T>, request: PageRequest) -> Self {
        let total = rows.len();
        let content = rows
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self::new(content, request, total, TotalSource::Counted)
    }

    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.page_size.max(1))
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last(&self) -> bool {
        self.page_number.saturating_add(1) >= self.total_pages()
    }
}

/// Works out the total for a content page fetched with `request`.
///
/// `count` runs only when the content does not pin down the total:
/// - first page shorter than the page size: the content is the whole result;
/// - later page that is non-empty and short: the request hit the last page.
///
/// The second rule trusts the current page. Rows removed between requests
/// can make the inferred total stale.
pub fn resolve_total<E, F>(
    request: &PageRequest,
    content_len: usize,
    count: F,
) -> Result<(usize, TotalSource), E>
where
    F: FnOnce() -> Result<usize, E>,
{
    let offset = request.offset();

    if offset == 0 && content_len < request.size {
        return Ok((content_len, TotalSource::Inferred));
    }

    if offset > 0 && content_len != 0 && content_len < request.size {
        return Ok((offset.saturating_add(content_len), TotalSource::Inferred));
    }

    count().map(|total| (total, TotalSource::Counted))
}
