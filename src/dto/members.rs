//! JSON payloads returned by the member search endpoints.

use serde::Serialize;

use crate::pagination::{Page, TotalSource};

/// Page envelope serialized for the paged endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Zero-based page index.
    pub number: usize,
    pub size: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    /// `false` when the total was inferred without a count query.
    pub counted: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();

        Self {
            total_elements: page.total_elements,
            total_pages,
            number: page.page_number,
            size: page.page_size,
            number_of_elements: page.content.len(),
            first,
            last,
            empty: page.content.is_empty(),
            counted: page.total_source == TotalSource::Counted,
            content: page.content,
        }
    }
}

/// Body of every `4xx`/`5xx` JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
