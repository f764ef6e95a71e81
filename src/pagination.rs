//! Page metadata shared by paginated service responses.

/// A zero-based slice of a larger ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub last: bool,
}

impl<T> Page<T> {
    /// Derives the page metadata from the total number of matching rows.
    ///
    /// `size` must be non-zero.
    pub fn new(items: Vec<T>, page: usize, size: usize, total_elements: usize) -> Self {
        let total_pages = total_elements.div_ceil(size);
        let last = page.saturating_add(1) >= total_pages;

        Self {
            items,
            page,
            size,
            total_elements,
            total_pages,
            last,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}
