use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::{UserDetails, UserPrincipal};
use crate::errors::{ClassroomError, Result};
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenPair};
use crate::utils::password::{hash_password, verify_password};

/// 未知邮箱登录时用于校验的占位哈希
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("classroom-dummy-password").ok());

/// 按邮箱加载用户身份
pub async fn load_principal_by_email(storage: &dyn Storage, email: &str) -> Result<UserPrincipal> {
    let user = storage
        .get_user_by_email(email)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("用户不存在: {email}")))?;

    Ok(UserPrincipal::from(user))
}

/// 邮箱 + 密码登录
///
/// 校验通过后记录最后登录时间。停用的账号视为锁定，未审核的账号视为不可用。
pub async fn authenticate(
    storage: &dyn Storage,
    email: &str,
    password: &str,
) -> Result<UserPrincipal> {
    let Some(user) = storage.get_user_by_email(email).await? else {
        // 未知邮箱同样走一次哈希校验，响应时间与密码错误一致
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(password, hash);
        }
        debug!("Login failed, unknown email: {}", email);
        return Err(ClassroomError::authentication("邮箱或密码错误"));
    };

    let principal = UserPrincipal::from(user);

    if !verify_password(password, principal.password()) {
        debug!("Login failed, wrong password for user {}", principal.id);
        return Err(ClassroomError::authentication("邮箱或密码错误"));
    }

    if !principal.is_account_non_locked() {
        warn!("Login rejected, account {} is inactive", principal.id);
        return Err(ClassroomError::authentication("账号已被锁定"));
    }

    if !principal.is_enabled() {
        warn!("Login rejected, account {} is awaiting approval", principal.id);
        return Err(ClassroomError::authentication("账号尚未通过审核"));
    }

    storage.update_last_login(principal.id).await?;

    Ok(principal)
}

/// 为已认证用户签发 access / refresh token
pub fn issue_tokens(principal: &UserPrincipal) -> Result<TokenPair> {
    JwtUtils::generate_token_pair(principal.id, &principal.email, principal.role.as_str())
        .map_err(|e| ClassroomError::authentication(format!("Token 生成失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().expect("dummy hash should be generated");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("Sup3rSecret!", hash));
    }
}
