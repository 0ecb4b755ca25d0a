//! 表单字段校验
//!
//! 校验是同步的，一次返回全部字段错误，由界面就地显示。

use serde::{Deserialize, Serialize};

pub const PASSWORD_MIN_LEN: usize = 6;
pub const OTP_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 收集字段错误
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "This field is required");
        }
        self
    }

    pub fn username(&mut self, field: &str, value: &str) -> &mut Self {
        let v = value.trim();
        if v.is_empty() {
            self.push(field, "Username is required");
        } else if v.len() < 3 || !v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            self.push(field, "Use at least 3 letters, digits, '_' or '.'");
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.push(field, "Password is required");
        } else if value.chars().count() < PASSWORD_MIN_LEN {
            self.push(
                field,
                format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
            );
        }
        self
    }

    pub fn password_confirmation(&mut self, field: &str, password: &str, confirm: &str) -> &mut Self {
        if password != confirm {
            self.push(field, "Passwords do not match");
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "Email is required");
        } else if !is_email(value.trim()) {
            self.push(field, "Email address is not valid");
        }
        self
    }

    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "Phone number is required");
        } else if !is_phone(value.trim()) {
            self.push(field, "Phone number must have 9 to 11 digits");
        }
        self
    }

    pub fn otp(&mut self, field: &str, value: &str) -> &mut Self {
        let v = value.trim();
        if v.len() != OTP_LEN || !v.chars().all(|c| c.is_ascii_digit()) {
            self.push(field, format!("Enter the {}-digit code", OTP_LEN));
        }
        self
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// 取某个字段的第一条错误
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn is_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (9..=11).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_errors() {
        let errors = Validator::new()
            .username("username", "")
            .password("password", "123")
            .email("email", "nobody")
            .finish()
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(error_for(&errors, "password"), Some("Password must be at least 6 characters"));
        assert!(error_for(&errors, "phone").is_none());
    }

    #[test]
    fn valid_registration_passes() {
        assert!(
            Validator::new()
                .username("username", "an.nguyen")
                .password("password", "secret1")
                .password_confirmation("confirm", "secret1", "secret1")
                .email("email", "an@example.vn")
                .phone("phone", "+84901234567")
                .finish()
                .is_ok()
        );
    }

    #[test]
    fn email_and_phone_shapes() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a@.b"));
        assert!(!is_email("a b@c.d"));
        assert!(is_phone("0901234567"));
        assert!(!is_phone("09012"));
        assert!(!is_phone("09-0123-4567"));
    }

    #[test]
    fn otp_must_be_six_digits() {
        assert!(Validator::new().otp("otp", "123456").finish().is_ok());
        assert!(Validator::new().otp("otp", "12345a").finish().is_err());
        assert!(Validator::new().otp("otp", "1234567").finish().is_err());
    }

    #[test]
    fn mismatched_confirmation() {
        let errors = Validator::new()
            .password_confirmation("confirm", "secret1", "secret2")
            .finish()
            .unwrap_err();
        assert_eq!(errors[0].field, "confirm");
    }
}
