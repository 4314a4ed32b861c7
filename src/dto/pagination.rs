use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = (total + page_size - 1) / page_size;
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Resolves raw `page`/`pageSize` query values. `page` is capped so the
/// row offset always fits in an `i64`.
pub fn page_window(page: Option<i64>, page_size: Option<i64>, default_size: i64, max_size: i64) -> (i64, i64) {
    let max_page = i64::MAX / max_size.max(1);
    let page = page.unwrap_or(1).clamp(1, max_page);
    let page_size = page_size.unwrap_or(default_size).clamp(1, max_size);
    (page, page_size)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 12, 25).total_pages, 3);
        assert_eq!(Pagination::new(1, 12, 24).total_pages, 2);
        assert_eq!(Pagination::new(1, 12, 0).total_pages, 0);
    }

    #[test]
    fn window_clamps_inputs() {
        assert_eq!(page_window(None, None, 12, 100), (1, 12));
        assert_eq!(page_window(Some(0), Some(500), 12, 100), (1, 100));
        assert_eq!(page_window(Some(3), Some(0), 12, 100), (3, 1));
        assert_eq!(Pagination::new(3, 10, 100).offset(), 20);
    }

    #[test]
    fn huge_page_keeps_a_positive_offset() {
        let (page, size) = page_window(Some(i64::MAX), Some(100), 12, 100);
        assert_eq!(page, i64::MAX / 100);
        let offset = Pagination::new(page, size, 3).offset();
        assert!(offset > 0);
        assert_eq!(Pagination::new(i64::MAX, 100, 3).offset(), i64::MAX);
    }
}
