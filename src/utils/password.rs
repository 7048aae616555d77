use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::TrabalhosError;

/// PHC 格式 argon2 哈希的前缀
pub const ARGON2_PREFIX: &str = "$argon2";

/// 哈希口令（用于生成 `admin.password` 配置值）
pub fn hash_password(password: &str) -> Result<String, TrabalhosError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TrabalhosError::validation(format!("口令哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证口令
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}
