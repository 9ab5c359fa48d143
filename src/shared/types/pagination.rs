/// Page request resolved against configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Clamp a raw `page`/`limit` pair into `1..` and `1..=max_limit`.
    pub fn clamped(page: u32, limit: u32, max_limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// Paginated result returned by repositories
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
            total.div_ceil(limit as u64) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Everything in a single page.
    pub fn single_page(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let limit = items.len().max(1) as u32;
        Self::new(items, total, 1, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResult::new(vec![1, 2, 3, 4], 9, 1, 4);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn single_page_of_empty_collection() {
        let page: PaginatedResult<u8> = PaginatedResult::single_page(vec![]);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn page_request_is_clamped() {
        let req = PageRequest::clamped(0, 500, 100);
        assert_eq!(req, PageRequest { page: 1, limit: 100 });
        assert_eq!(PageRequest::clamped(3, 4, 100).offset(), 8);
    }
}
