pub mod db_enum;
pub mod pagination;

pub use pagination::{MAX_PAGE_SIZE, PaginationInfo, normalize_page};
