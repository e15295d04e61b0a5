//! 认证适配层
//!
//! 将用户记录映射为认证层使用的身份（邮箱登录、`ROLE_<角色>` 权限、
//! 启用/锁定状态），并提供基于存储的登录校验与 token 签发。

mod authentication;
mod principal;

pub use authentication::{authenticate, issue_tokens, load_principal_by_email};
pub use principal::UserPrincipal;

/// 认证层所需的用户身份契约
pub trait UserDetails {
    /// 登录名
    fn username(&self) -> &str;
    /// 密码哈希
    fn password(&self) -> &str;
    /// 授权列表
    fn authorities(&self) -> Vec<String>;
    fn is_account_non_expired(&self) -> bool;
    fn is_account_non_locked(&self) -> bool;
    fn is_credentials_non_expired(&self) -> bool;
    fn is_enabled(&self) -> bool;
}
