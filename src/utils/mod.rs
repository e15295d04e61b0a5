pub mod jwt;
pub mod password;
pub mod sql;
pub mod validate;

pub use sql::{contains_any, escape_like_pattern};
