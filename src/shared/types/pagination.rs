/// Page of items plus the metadata needed to render pagination controls
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Validated page request: 1-based page and a limit clamped to 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let (page, limit) = crate::shared::validate_pagination(page, limit);
        Self { page, limit }
    }

    /// Zero-based page index as used by SeaORM paginators
    pub fn index(&self) -> u64 {
        (self.page - 1) as u64
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
    fn total_pages_rounds_up() {
        let page = PaginatedResult::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_request_index_is_zero_based() {
        let req = PageRequest::new(Some(3), Some(25));
        assert_eq!(req.index(), 2);
        assert_eq!(req.limit, 25);
    }
}
