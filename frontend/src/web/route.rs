//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM：路径解析、路径生成，以及每个页面的访问要求。

use std::fmt::Display;

use housekeeper_shared::guard::GuardRequirement;
use housekeeper_shared::protocol::with_query;
use housekeeper_shared::{PermissionRequirement, RoleKind};

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页；`redirect` 为登录后返回的地址
    Login { redirect: Option<String> },
    Register,
    ForgotPassword,
    /// 多角色账户的角色选择
    SelectRole,
    #[default]
    Dashboard,
    Services,
    ServiceDetail(i64),
    /// 预约向导；`service` 为预选的服务
    NewBooking { service: Option<i64> },
    Bookings,
    BookingDetail(i64),
    Schedules,
    AdminRoles,
    Unauthorized,
    NotFound,
}

impl AppRoute {
    pub fn login() -> Self {
        Self::Login { redirect: None }
    }

    /// 解析路径与查询参数
    ///
    /// `param` 按名称读取查询参数，由调用方从 `location.search` 提供。
    pub fn parse(path: &str, param: impl Fn(&str) -> Option<String>) -> Self {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] | ["login"] => Self::Login {
                redirect: param("redirect").and_then(|r| sanitize_redirect(&r)),
            },
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["select-role"] => Self::SelectRole,
            ["dashboard"] => Self::Dashboard,
            ["services"] => Self::Services,
            ["services", id] => id.parse().map_or(Self::NotFound, Self::ServiceDetail),
            ["bookings"] => Self::Bookings,
            ["bookings", "new"] => Self::NewBooking {
                service: param("service").and_then(|s| s.parse().ok()),
            },
            ["bookings", id] => id.parse().map_or(Self::NotFound, Self::BookingDetail),
            ["schedules"] => Self::Schedules,
            ["admin", "roles"] => Self::AdminRoles,
            ["unauthorized"] => Self::Unauthorized,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL（含查询参数）
    pub fn to_path(&self) -> String {
        match self {
            Self::Login { redirect } => with_query("/login", &[("redirect", redirect.clone())]),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::SelectRole => "/select-role".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Services => "/services".to_string(),
            Self::ServiceDetail(id) => format!("/services/{}", id),
            Self::NewBooking { service } => with_query(
                "/bookings/new",
                &[("service", service.map(|id| id.to_string()))],
            ),
            Self::Bookings => "/bookings".to_string(),
            Self::BookingDetail(id) => format!("/bookings/{}", id),
            Self::Schedules => "/schedules".to_string(),
            Self::AdminRoles => "/admin/roles".to_string(),
            Self::Unauthorized => "/unauthorized".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：每个页面的访问要求**
    pub fn guard(&self) -> GuardRequirement {
        match self {
            Self::Login { .. }
            | Self::Register
            | Self::ForgotPassword
            | Self::SelectRole
            | Self::Unauthorized
            | Self::NotFound => GuardRequirement::public(),
            Self::Dashboard => GuardRequirement::authenticated(),
            Self::Services | Self::ServiceDetail(_) => GuardRequirement::authenticated()
                .permission(
                    PermissionRequirement::new("Service", "view").with_resource("service.view.list"),
                ),
            Self::NewBooking { .. } => GuardRequirement::authenticated()
                .role(RoleKind::Customer)
                .permission(
                    PermissionRequirement::new("Booking", "create").with_resource("booking.create"),
                ),
            Self::Bookings | Self::BookingDetail(_) => GuardRequirement::authenticated()
                .role(RoleKind::Customer)
                .permission(
                    PermissionRequirement::new("Booking", "view")
                        .with_resource("booking.view.history"),
                ),
            Self::Schedules => GuardRequirement::authenticated()
                .role(RoleKind::Employee)
                .permission(
                    PermissionRequirement::new("Schedule", "view").with_resource("schedule.view"),
                ),
            Self::AdminRoles => GuardRequirement::authenticated()
                .role(RoleKind::Admin)
                .permission(
                    PermissionRequirement::new("Permission", "view")
                        .with_resource("permission.view.roles"),
                ),
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.guard().authenticated
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(
            self,
            Self::Login { .. } | Self::Register | Self::ForgotPassword | Self::SelectRole
        )
    }

    /// 认证失败时的重定向目标，保留原本要访问的地址
    pub fn auth_failure_redirect(from: &AppRoute) -> Self {
        let redirect = match from {
            Self::Dashboard | Self::NotFound | Self::Unauthorized => None,
            other if other.should_redirect_when_authenticated() => None,
            other => Some(other.to_path()),
        };
        Self::Login { redirect }
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect(&self) -> Self {
        match self {
            Self::Login {
                redirect: Some(target),
            } => {
                let route = Self::parse_url(target);
                if route.should_redirect_when_authenticated() || route == Self::NotFound {
                    Self::Dashboard
                } else {
                    route
                }
            }
            _ => Self::Dashboard,
        }
    }

    /// 解析站内地址（`/path?query`）
    pub fn parse_url(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        Self::parse(path, |name| query_param(query, name))
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 只接受站内路径，防止开放重定向
fn sanitize_redirect(target: &str) -> Option<String> {
    let target = target.trim();
    if target.starts_with('/') && !target.starts_with("//") && !target.contains("://") {
        Some(target.to_string())
    } else {
        None
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| percent_decode(v))
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(path: &str, query: &[(&str, &str)]) -> AppRoute {
        let params: HashMap<String, String> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppRoute::parse(path, |name| params.get(name).cloned())
    }

    #[test]
    fn parses_parameterised_paths() {
        assert_eq!(parse("/services/12", &[]), AppRoute::ServiceDetail(12));
        assert_eq!(parse("/bookings/7/", &[]), AppRoute::BookingDetail(7));
        assert_eq!(parse("/bookings/abc", &[]), AppRoute::NotFound);
        assert_eq!(
            parse("/bookings/new", &[("service", "3")]),
            AppRoute::NewBooking { service: Some(3) }
        );
        assert_eq!(parse("/", &[]), AppRoute::login());
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::ServiceDetail(4),
            AppRoute::NewBooking { service: Some(9) },
            AppRoute::AdminRoles,
            AppRoute::Login {
                redirect: Some("/bookings/5".into()),
            },
        ] {
            assert_eq!(AppRoute::parse_url(&route.to_path()), route);
        }
    }

    #[test]
    fn rejects_external_redirects() {
        assert_eq!(
            parse("/login", &[("redirect", "https://evil.example")]),
            AppRoute::login()
        );
        assert_eq!(parse("/login", &[("redirect", "//evil.example")]), AppRoute::login());
    }

    #[test]
    fn failure_redirect_keeps_target() {
        let login = AppRoute::auth_failure_redirect(&AppRoute::BookingDetail(5));
        assert_eq!(login.to_path(), "/login?redirect=/bookings/5");
        assert_eq!(login.auth_success_redirect(), AppRoute::BookingDetail(5));
        assert_eq!(
            AppRoute::auth_failure_redirect(&AppRoute::Dashboard),
            AppRoute::login()
        );
    }

    #[test]
    fn encoded_redirect_is_decoded() {
        let route = AppRoute::parse_url("/login?redirect=%2Fbookings%2Fnew%3Fservice%3D2");
        assert_eq!(
            route.auth_success_redirect(),
            AppRoute::NewBooking { service: Some(2) }
        );
    }

    #[test]
    fn every_protected_page_requires_login() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Services,
            AppRoute::Bookings,
            AppRoute::Schedules,
            AppRoute::AdminRoles,
        ] {
            assert!(route.requires_auth(), "{}", route);
        }
        assert!(!AppRoute::Register.requires_auth());
        assert_eq!(
            AppRoute::Schedules.guard().role,
            Some(RoleKind::Employee)
        );
    }
}
