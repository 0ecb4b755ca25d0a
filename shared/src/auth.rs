//! 认证相关的模型与请求
//!
//! 同一用户名可能持有多个角色，因此登录前先通过 `/auth/get-role` 查询角色，
//! 再由 [`select_role`] 决定直接登录、进入角色选择或提示账户未激活。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod};

// =========================================================
// 角色
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleKind {
    Customer,
    Employee,
    Admin,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Customer => "CUSTOMER",
            RoleKind::Employee => "EMPLOYEE",
            RoleKind::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Some(RoleKind::Customer),
            "EMPLOYEE" => Some(RoleKind::Employee),
            "ADMIN" => Some(RoleKind::Admin),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleKind::Customer => "Customer",
            RoleKind::Employee => "Housekeeper",
            RoleKind::Admin => "Administrator",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/auth/get-role` 返回的单个角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOption {
    pub role_id: i64,
    pub role_name: RoleKind,
    #[serde(default)]
    pub is_active: bool,
}

/// 角色选择结果
#[derive(Debug, Clone, PartialEq)]
pub enum RoleSelection {
    /// 恰好一个激活角色：直接登录
    Direct(RoleOption),
    /// 两个及以上激活角色：进入角色选择页
    Choose(Vec<RoleOption>),
    /// 没有激活角色：账户未激活
    Inactive,
}

pub fn select_role(roles: &[RoleOption]) -> RoleSelection {
    let mut active: Vec<RoleOption> = roles.iter().filter(|r| r.is_active).cloned().collect();
    match active.len() {
        0 => RoleSelection::Inactive,
        1 => RoleSelection::Direct(active.remove(0)),
        _ => RoleSelection::Choose(active),
    }
}

// =========================================================
// 用户
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

// =========================================================
// 请求定义
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRoleRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for GetRoleRequest {
    type Response = Vec<RoleOption>;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/get-role".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: RoleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub role_id: i64,
    pub role: RoleKind,
    pub user: UserProfile,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: RoleKind,
}

impl ApiRequest for RegisterRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    /// 后端可能轮换刷新令牌，缺省时沿用旧值
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl ApiRequest for RefreshTokenRequest {
    type Response = RefreshTokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/refresh-token".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl ApiRequest for LogoutRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    // 登出是尽力而为的通知，不应触发刷新
    const REFRESHABLE: bool = false;

    fn path(&self) -> String {
        "/auth/logout".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/forgot-password".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    /// 重置密码时需要回传的一次性令牌
    #[serde(default)]
    pub reset_token: Option<String>,
}

impl ApiRequest for VerifyOtpRequest {
    type Response = Option<VerifyOtpResponse>;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/verify-otp".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    pub new_password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/reset-password".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: i64, name: RoleKind, active: bool) -> RoleOption {
        RoleOption {
            role_id: id,
            role_name: name,
            is_active: active,
        }
    }

    #[test]
    fn single_active_role_logs_in_directly() {
        let roles = vec![
            role(1, RoleKind::Customer, true),
            role(2, RoleKind::Employee, false),
        ];
        assert_eq!(
            select_role(&roles),
            RoleSelection::Direct(role(1, RoleKind::Customer, true))
        );
    }

    #[test]
    fn several_active_roles_need_a_choice() {
        let roles = vec![
            role(1, RoleKind::Customer, true),
            role(2, RoleKind::Employee, true),
            role(3, RoleKind::Admin, false),
        ];
        match select_role(&roles) {
            RoleSelection::Choose(options) => {
                assert_eq!(options.len(), 2);
                assert!(options.iter().all(|r| r.is_active));
            }
            other => panic!("unexpected selection: {:?}", other),
        }
    }

    #[test]
    fn no_active_role_is_inactive() {
        assert_eq!(select_role(&[]), RoleSelection::Inactive);
        assert_eq!(
            select_role(&[role(1, RoleKind::Customer, false)]),
            RoleSelection::Inactive
        );
    }

    #[test]
    fn role_kind_wire_format() {
        let json = serde_json::to_string(&RoleKind::Employee).unwrap();
        assert_eq!(json, "\"EMPLOYEE\"");
        let opt: RoleOption =
            serde_json::from_str(r#"{"roleId":4,"roleName":"ADMIN","isActive":true}"#).unwrap();
        assert_eq!(opt.role_name, RoleKind::Admin);
        assert_eq!(RoleKind::parse(" customer"), Some(RoleKind::Customer));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = UserProfile {
            username: "linh".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "linh");
        user.full_name = Some("Linh Tran".into());
        assert_eq!(user.display_name(), "Linh Tran");
    }
}
