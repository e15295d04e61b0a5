use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 默认页码
pub const DEFAULT_PAGE: i64 = 1;
/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// 每页条数上限
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// 页码上限，保证 `page * size` 不溢出
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// 规整分页参数：页码从 1 开始，每页条数限制在 1..=100
pub fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE) as u64;
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        assert_eq!(normalize_page(None, None), (1, 10));
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        assert_eq!(normalize_page(Some(0), Some(0)), (1, 1));
        assert_eq!(normalize_page(Some(-3), Some(500)), (1, 100));
        assert_eq!(normalize_page(Some(4), Some(25)), (4, 25));
        assert_eq!(
            normalize_page(Some(i64::MAX), Some(100)),
            (MAX_PAGE as u64, 100)
        );
    }
}
