use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ClassroomError, Result};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<()> {
    validate_required("email", email, 100)?;
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err(ClassroomError::validation("Email format is invalid"));
    }
    Ok(())
}

/// 必填字段校验：不能为空白，长度不超过 max 个字符
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClassroomError::validation(format!("{field} must not be blank")));
    }
    validate_max_len(field, Some(value), max)
}

/// 可选字段长度校验
pub fn validate_max_len(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ClassroomError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// JSON 字段校验：不允许为 null
pub fn validate_json_present(field: &str, value: &serde_json::Value) -> Result<()> {
    if value.is_null() {
        return Err(ClassroomError::validation(format!("{field} must not be null")));
    }
    Ok(())
}

/// 数值字段校验：不允许为负数
pub fn validate_non_negative(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(ClassroomError::validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
];

/// 密码策略：至少 8 个字符，同时包含大写字母、小写字母和数字，且不在常见密码表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    let mut errors: Vec<&'static str> = checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| msg)
        .collect();

    if COMMON_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Tutor2024x").is_valid);

        let cases = [
            ("Tu1", "Password must be at least 8 characters long"),
            ("tutor2024", "Password must contain at least one uppercase letter"),
            ("TUTOR2024", "Password must contain at least one lowercase letter"),
            ("TutorTutor", "Password must contain at least one digit"),
            ("Abcd1234", "Password is too common, please choose a stronger password"),
        ];
        for (password, expected) in cases {
            let result = validate_password(password);
            assert!(!result.is_valid, "{password} should be rejected");
            assert!(result.errors.contains(&expected), "{password}: {:?}", result.errors);
        }
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(validate_required("title", "   ", 200).is_err());
        assert!(validate_required("title", "Algebra I", 200).is_ok());
    }

    #[test]
    fn test_required_counts_characters() {
        let title = "é".repeat(200);
        assert!(validate_required("title", &title, 200).is_ok());
        let too_long = "a".repeat(201);
        let err = validate_required("title", &too_long, 200).unwrap_err();
        assert_eq!(err.message(), "title must be at most 200 characters");
    }

    #[test]
    fn test_max_len_allows_missing_value() {
        assert!(validate_max_len("location", None, 100).is_ok());
        assert!(validate_max_len("location", Some("x".repeat(101).as_str()), 100).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("teacher@school.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b.||").is_err());
        assert!(validate_email("a@b.c|m").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_json_present() {
        assert!(validate_json_present("questions", &serde_json::Value::Null).is_err());
        assert!(validate_json_present("questions", &serde_json::json!([])).is_ok());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative("file_size", Some(-1)).is_err());
        assert!(validate_non_negative("file_size", Some(0)).is_ok());
        assert!(validate_non_negative("file_size", None).is_ok());
    }
}
