use serde::Serialize;

use crate::errors::{QueryError, QueryResult};

///
/// A validated page request: 1-based page number and a page size of at least one.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> QueryResult<Self> {
        if page < 1 {
            return Err(QueryError::invalid_value("page", page));
        }
        if page_size < 1 {
            return Err(QueryError::invalid_value("limit", page_size));
        }
        Ok(PageRequest { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Same page number with the page size capped at `max_page_size`.
    pub fn clamped(self, max_page_size: usize) -> Self {
        PageRequest {
            page: self.page,
            page_size: self.page_size.min(max_page_size.max(1)),
        }
    }

    fn window(&self) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.page_size);
        (start, start.saturating_add(self.page_size))
    }
}

///
/// One page of a result set plus the pagination metadata.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "page")]
    pub page_number: usize,
    #[serde(rename = "limit")]
    pub page_size: usize,
    #[serde(rename = "total_records")]
    pub total_items: usize,
    pub total_pages: usize,
    #[serde(rename = "data")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

///
/// Slice a result set into the requested page.
///
/// Items keep the order the iterator yields them in. The whole iterator is
/// consumed so the total is exact; pages past the end come back empty.
///
pub fn paginate<T, I: IntoIterator<Item = T>>(items: I, request: &PageRequest) -> Page<T> {
    let (start, stop) = request.window();

    let mut total_items = 0;
    let mut window = Vec::with_capacity(request.page_size.min(1024));
    for item in items {
        if total_items >= start && total_items < stop {
            window.push(item);
        }
        total_items += 1;
    }

    Page {
        page_number: request.page,
        page_size: request.page_size,
        total_items,
        total_pages: total_items.div_ceil(request.page_size),
        items: window,
    }
}
