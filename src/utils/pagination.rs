use std::ops::Range;

/// Column pager with a 1-based page index.
///
/// The pager does not own the columns; every operation takes the current
/// column count so it stays correct when a poll replaces the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current: usize,
    per_page: usize,
}

impl Paginator {
    /// Create a pager on page 1. A page size of zero is treated as one.
    pub fn new(per_page: usize) -> Self {
        Self {
            current: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages needed for `total` columns
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Timer step: next page, wrapping from the last back to the first
    pub fn advance(&mut self, total: usize) {
        let pages = self.total_pages(total);
        self.current = if self.current >= pages { 1 } else { self.current + 1 };
    }

    /// Previous page; stays on page 1
    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Next page; stays on the last page
    pub fn next(&mut self, total: usize) {
        if self.current < self.total_pages(total) {
            self.current += 1;
        }
    }

    /// Jump to a page, clamped into range
    pub fn go_to(&mut self, page: usize, total: usize) {
        let last = self.total_pages(total).max(1);
        self.current = page.clamp(1, last);
    }

    /// Pull the index back into range after the column count changed
    pub fn clamp(&mut self, total: usize) {
        self.go_to(self.current, total);
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current < self.total_pages(total)
    }

    /// Index range of the columns on the current page
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(total);
        let end = (start + self.per_page).min(total);
        start..end
    }

    /// Columns on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_range(items.len())]
    }
}
