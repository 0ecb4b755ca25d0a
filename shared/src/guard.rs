//! 路由守卫的判定逻辑
//!
//! 纯函数、同步：只读取加载标志、认证状态、角色和权限集合，
//! 由界面层根据 [`GuardDecision`] 渲染加载指示、跳转或拒绝面板。

use crate::auth::RoleKind;
use crate::permission::{PermissionRequirement, PermissionSet};

/// 页面声明的访问要求
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuardRequirement {
    /// 是否要求已登录
    pub authenticated: bool,
    pub role: Option<RoleKind>,
    pub roles: Vec<RoleKind>,
    pub permission: Option<PermissionRequirement>,
}

impl GuardRequirement {
    /// 公开页面
    pub fn public() -> Self {
        Self::default()
    }

    /// 仅需登录
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            ..Default::default()
        }
    }

    pub fn role(mut self, role: RoleKind) -> Self {
        self.authenticated = true;
        self.role = Some(role);
        self
    }

    pub fn roles(mut self, roles: &[RoleKind]) -> Self {
        self.authenticated = true;
        self.roles = roles.to_vec();
        self
    }

    pub fn permission(mut self, permission: PermissionRequirement) -> Self {
        self.authenticated = true;
        self.permission = Some(permission);
        self
    }

    fn accepts_role(&self, role: Option<RoleKind>) -> bool {
        if self.role.is_none() && self.roles.is_empty() {
            return true;
        }
        let Some(role) = role else {
            return false;
        };
        self.role.is_none_or(|r| r == role) && (self.roles.is_empty() || self.roles.contains(&role))
    }
}

/// 守卫所需的当前状态快照
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuardState {
    /// 会话或权限仍在加载
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub role: Option<RoleKind>,
    pub permissions: PermissionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 渲染加载指示
    Loading,
    /// 跳转登录页，并带上原本要访问的地址
    RedirectToLogin { from: String },
    /// 角色不符：跳转 "unauthorized" 页面
    Unauthorized,
    /// 权限不足：原地渲染拒绝面板
    AccessDenied(PermissionRequirement),
    Allow,
}

/// 判定顺序：加载 → 未登录 → 角色不符 → 权限不足 → 放行
pub fn evaluate(req: &GuardRequirement, state: &GuardState, location: &str) -> GuardDecision {
    if !req.authenticated {
        return GuardDecision::Allow;
    }
    if state.is_loading {
        return GuardDecision::Loading;
    }
    if !state.is_authenticated {
        return GuardDecision::RedirectToLogin {
            from: location.to_string(),
        };
    }
    if !req.accepts_role(state.role) {
        return GuardDecision::Unauthorized;
    }
    if let Some(permission) = &req.permission {
        if !state.permissions.allows(permission) {
            return GuardDecision::AccessDenied(permission.clone());
        }
    }
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{Feature, ModulePermissions, RoleDetail};

    fn customer_state() -> GuardState {
        let detail = RoleDetail {
            modules: vec![ModulePermissions {
                module_name: "Booking".into(),
                features: vec![Feature {
                    feature_id: 1,
                    feature_name: "booking.view.history".into(),
                    description: None,
                    is_enabled: true,
                }],
            }],
            ..Default::default()
        };
        GuardState {
            is_loading: false,
            is_authenticated: true,
            role: Some(RoleKind::Customer),
            permissions: PermissionSet::from_detail(&detail),
        }
    }

    #[test]
    fn public_pages_always_render() {
        let state = GuardState {
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&GuardRequirement::public(), &state, "/login"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn loading_comes_first() {
        let mut state = customer_state();
        state.is_loading = true;
        let req = GuardRequirement::authenticated().role(RoleKind::Admin);
        assert_eq!(evaluate(&req, &state, "/admin/roles"), GuardDecision::Loading);
    }

    #[test]
    fn anonymous_user_goes_to_login_with_location() {
        let req = GuardRequirement::authenticated();
        let decision = evaluate(&req, &GuardState::default(), "/bookings/42");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                from: "/bookings/42".into()
            }
        );
    }

    #[test]
    fn role_mismatch_is_unauthorized() {
        let state = customer_state();
        let single = GuardRequirement::authenticated().role(RoleKind::Employee);
        assert_eq!(evaluate(&single, &state, "/schedules"), GuardDecision::Unauthorized);

        let many = GuardRequirement::authenticated().roles(&[RoleKind::Employee, RoleKind::Admin]);
        assert_eq!(evaluate(&many, &state, "/x"), GuardDecision::Unauthorized);

        let ok = GuardRequirement::authenticated().roles(&[RoleKind::Customer, RoleKind::Admin]);
        assert_eq!(evaluate(&ok, &state, "/x"), GuardDecision::Allow);
    }

    #[test]
    fn missing_permission_is_denied_inline() {
        let state = customer_state();
        let cancel = PermissionRequirement::new("Booking", "cancel").with_resource("booking.cancel");
        let req = GuardRequirement::authenticated().permission(cancel.clone());
        assert_eq!(
            evaluate(&req, &state, "/bookings"),
            GuardDecision::AccessDenied(cancel)
        );

        let history =
            PermissionRequirement::new("Booking", "view").with_resource("booking.view.history");
        let req = GuardRequirement::authenticated()
            .role(RoleKind::Customer)
            .permission(history);
        assert_eq!(evaluate(&req, &state, "/bookings"), GuardDecision::Allow);
    }

    #[test]
    fn feature_filed_under_another_module_is_denied() {
        let detail = RoleDetail {
            modules: vec![ModulePermissions {
                module_name: "Orders".into(),
                features: vec![Feature {
                    feature_id: 7,
                    feature_name: "booking.create".into(),
                    description: None,
                    is_enabled: true,
                }],
            }],
            ..Default::default()
        };
        let state = GuardState {
            permissions: PermissionSet::from_detail(&detail),
            ..customer_state()
        };
        let create = PermissionRequirement::new("Booking", "create").with_resource("booking.create");
        let req = GuardRequirement::authenticated().permission(create.clone());
        assert_eq!(
            evaluate(&req, &state, "/bookings/new"),
            GuardDecision::AccessDenied(create)
        );
    }
}
