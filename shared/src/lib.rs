//! 家政服务平台的共享模型与纯业务逻辑
//!
//! 前端与客户端核心共用此 crate：
//! - 线上数据模型（JSON 使用 camelCase）
//! - `protocol`: 每个后端接口对应一个强类型请求
//! - 权限集合、菜单推导、路由守卫、预约向导等纯函数逻辑（无 I/O）

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod guard;
pub mod menu;
pub mod permission;
pub mod protocol;
pub mod schedule;
pub mod validation;
pub mod wizard;

pub use auth::{RoleKind, RoleOption, RoleSelection, UserProfile, select_role};
pub use permission::{Feature, ModulePermissions, PermissionRequirement, PermissionSet, RoleDetail};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ACCEPT_LANGUAGE: &str = "Accept-Language";

/// 客户端持久化使用的存储键
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_ROLE: &str = "userRole";
    pub const ROLE_ID: &str = "roleId";
    pub const USER_DATA: &str = "userData";
    pub const USER_ROLE_DATA: &str = "userRoleData";
    pub const REMEMBER_ME: &str = "rememberMe";
    pub const LANGUAGE: &str = "language";

    /// 登出或刷新失败时需要清除的全部认证相关键（不含 `language`）
    pub const AUTH_KEYS: [&str; 7] = [
        ACCESS_TOKEN,
        REFRESH_TOKEN,
        USER_ROLE,
        ROLE_ID,
        USER_DATA,
        USER_ROLE_DATA,
        REMEMBER_ME,
    ];
}

// =========================================================
// 界面语言
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "vi" => Some(Language::Vi),
            _ => None,
        }
    }
}

/// 后端错误响应体中常见的字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code(" VI "), Some(Language::Vi));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::default().code(), "en");
    }

    #[test]
    fn auth_keys_keep_language() {
        assert!(!keys::AUTH_KEYS.contains(&keys::LANGUAGE));
        assert!(keys::AUTH_KEYS.contains(&keys::USER_ROLE_DATA));
    }
}
