pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalised page selection. Out-of-range input falls back to defaults
/// instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let page_size = page_size
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// `ceil(total / page_size)`.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.page_size - 1) / self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        assert_eq!(PageRequest::default(), PageRequest { page: 1, page_size: 10 });
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, page_size: 10 });
        assert_eq!(PageRequest::new(Some(-4), Some(101)), PageRequest { page: 1, page_size: 10 });
        assert_eq!(PageRequest::new(Some(3), Some(100)), PageRequest { page: 3, page_size: 100 });
    }

    #[test]
    fn second_page_of_fifteen() {
        let page = PageRequest::new(Some(2), Some(10));
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.total_pages(15), 2);
    }

    #[test]
    fn total_pages_edges() {
        let page = PageRequest::new(Some(1), Some(5));
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(5), 1);
        assert_eq!(page.total_pages(6), 2);
    }
}
