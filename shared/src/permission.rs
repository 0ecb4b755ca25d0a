//! 权限模型与权限集合
//!
//! 后端按角色返回 `{module -> [feature]}` 树，客户端将其展平为两个集合：
//! 至少含一个已启用功能的模块名，以及已启用的功能标识。所有权限查询都基于这两个集合。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod};

// =========================================================
// 线上模型
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub feature_id: i64,
    /// 点分资源路径，如 `booking.view.history`
    pub feature_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePermissions {
    pub module_name: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// 某个角色的完整权限树
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetail {
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModulePermissions>,
}

/// `/admin/permissions/roles` 列表中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub role_id: i64,
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =========================================================
// 权限查询
// =========================================================

/// 菜单项与路由守卫使用的权限要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequirement {
    pub module: String,
    pub action: String,
    pub resource: Option<String>,
}

impl PermissionRequirement {
    pub fn new(module: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            action: action.into(),
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

/// 展平后的权限集合
///
/// 默认值为空集合，对任何查询都返回 `false`。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSet {
    modules: HashSet<String>,
    features: HashSet<String>,
}

impl PermissionSet {
    pub fn from_detail(detail: &RoleDetail) -> Self {
        let mut set = Self::default();
        for module in &detail.modules {
            let mut any_enabled = false;
            for feature in module.features.iter().filter(|f| f.is_enabled) {
                set.features.insert(feature.feature_name.clone());
                any_enabled = true;
            }
            if any_enabled {
                set.modules.insert(module.module_name.clone());
            }
        }
        set
    }

    /// 模块下至少一个功能已启用
    pub fn has_module_permission(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    /// 指定功能存在且已启用
    pub fn has_feature_permission(&self, resource: &str) -> bool {
        self.features.contains(resource)
    }

    /// 模块必须已启用；给定资源时该功能也必须已启用。`action` 只用于展示与日志
    pub fn has_permission(&self, module: &str, _action: &str, resource: Option<&str>) -> bool {
        match resource {
            Some(resource) => {
                self.has_module_permission(module) && self.has_feature_permission(resource)
            }
            None => self.has_module_permission(module),
        }
    }

    pub fn allows(&self, req: &PermissionRequirement) -> bool {
        self.has_permission(&req.module, &req.action, req.resource.as_deref())
    }

    pub fn has_any_feature(&self, resources: &[&str]) -> bool {
        resources.iter().any(|r| self.has_feature_permission(r))
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

// =========================================================
// 请求定义
// =========================================================

/// 列出全部角色
#[derive(Debug, Serialize)]
pub struct ListRolesRequest;

impl ApiRequest for ListRolesRequest {
    type Response = Vec<RoleSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/permissions/roles".to_string()
    }
}

/// 获取角色权限树，响应为列表，第一个元素即权限树
#[derive(Debug, Serialize)]
pub struct RoleDetailRequest {
    #[serde(skip)]
    pub role_id: i64,
}

impl ApiRequest for RoleDetailRequest {
    type Response = Vec<RoleDetail>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/admin/permissions/roles/{}", self.role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_tree() -> RoleDetail {
        serde_json::from_str(
            r#"{"modules":[{"moduleName":"Booking","features":[
                {"featureId":1,"featureName":"booking.view.history","isEnabled":true},
                {"featureId":2,"featureName":"booking.cancel","isEnabled":false}
            ]}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn flattens_enabled_features() {
        let set = PermissionSet::from_detail(&booking_tree());
        assert!(set.has_feature_permission("booking.view.history"));
        assert!(!set.has_feature_permission("booking.cancel"));
        assert!(set.has_module_permission("Booking"));
    }

    #[test]
    fn module_requires_an_enabled_feature() {
        let detail = RoleDetail {
            modules: vec![ModulePermissions {
                module_name: "Schedule".into(),
                features: vec![Feature {
                    feature_id: 9,
                    feature_name: "schedule.view".into(),
                    description: None,
                    is_enabled: false,
                }],
            }],
            ..Default::default()
        };
        let set = PermissionSet::from_detail(&detail);
        assert!(!set.has_module_permission("Schedule"));
        assert!(set.is_empty());
    }

    #[test]
    fn has_permission_checks_module_and_resource() {
        let set = PermissionSet::from_detail(&booking_tree());
        assert!(set.has_permission("Booking", "view", None));
        assert!(!set.has_permission("Booking", "cancel", Some("booking.cancel")));
        // 模块已启用但资源未启用
        let req = PermissionRequirement::new("Booking", "cancel").with_resource("booking.cancel");
        assert!(!set.allows(&req));
        assert!(!set.has_permission("Service", "view", None));
    }

    #[test]
    fn resource_under_another_module_does_not_count() {
        let detail: RoleDetail = serde_json::from_str(
            r#"{"modules":[{"moduleName":"Orders","features":[
                {"featureId":1,"featureName":"booking.create","isEnabled":true}
            ]}]}"#,
        )
        .unwrap();
        let set = PermissionSet::from_detail(&detail);
        assert!(set.has_feature_permission("booking.create"));
        assert!(!set.has_module_permission("Booking"));
        assert!(!set.has_permission("Booking", "create", Some("booking.create")));
        assert!(set.has_permission("Orders", "create", Some("booking.create")));
    }

    #[test]
    fn empty_set_denies_everything() {
        let set = PermissionSet::default();
        assert!(!set.has_module_permission("Booking"));
        assert!(!set.has_any_feature(&["booking.view.history"]));
    }

    #[test]
    fn role_detail_path() {
        assert_eq!(
            RoleDetailRequest { role_id: 3 }.path(),
            "/admin/permissions/roles/3"
        );
        assert!(!RoleDetailRequest { role_id: 3 }.has_body());
    }
}
