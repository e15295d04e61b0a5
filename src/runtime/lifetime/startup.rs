use crate::config::{AppConfig, SeedConfig};
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 各数据表的记录数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub classes: u64,
    pub materials: u64,
    pub assessments: u64,
    pub submissions: u64,
    pub notifications: u64,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
///
/// 仅在用户表为空时创建。`password` 为空时生成随机密码并打印到日志。
/// 返回新建的管理员，已有用户时返回 `None`。
pub async fn seed_admin(
    storage: &Arc<dyn Storage>,
    seed: &SeedConfig,
    password: Option<String>,
) -> Result<Option<User>> {
    // 检查是否已有用户
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(None);
    }
    info!("No users found in database, creating default admin account...");

    // 获取密码：优先使用传入的密码，否则生成随机密码
    let password = match password {
        Some(pwd) => {
            let policy = validate_password(&pwd);
            if !policy.is_valid {
                warn!(
                    "ADMIN_PASSWORD does not meet the password policy: {}",
                    policy.error_message()
                );
            }
            pwd
        }
        None => {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        }
    };

    let password_hash = hash_password(&password)?;

    // 创建管理员账号（默认启用且已审核）
    let mut admin_request = CreateUserRequest::new(
        seed.admin_full_name.clone(),
        seed.admin_email.clone(),
        password_hash,
        UserRole::Admin,
    );
    admin_request.is_active = Some(true);
    admin_request.is_approved = Some(true);

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default admin account created successfully (ID: {}, email: {})",
        user.id, user.email
    );

    Ok(Some(user))
}

/// 统计各数据表记录数
pub async fn collect_table_counts(storage: &Arc<dyn Storage>) -> Result<TableCounts> {
    Ok(TableCounts {
        users: storage.count_users().await?,
        classes: storage.count_classes().await?,
        materials: storage.count_materials().await?,
        assessments: storage.count_assessments().await?,
        submissions: storage.count_submissions().await?,
        notifications: storage.count_notifications().await?,
    })
}

/// 准备启动上下文
/// 包括存储初始化、迁移和默认管理员
pub async fn prepare_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    if config.seed.enabled {
        if let Err(e) = seed_admin(&storage, &config.seed, std::env::var("ADMIN_PASSWORD").ok()).await
        {
            warn!("Failed to seed admin account: {}", e);
        }
    } else {
        debug!("Admin seeding disabled");
    }

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }
}
