//! 菜单目录与菜单推导
//!
//! 目录是编译期常量，只会被过滤，不会被修改。

use crate::permission::PermissionSet;

/// 静态菜单项定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub module: &'static str,
    pub action: &'static str,
    pub resource: Option<&'static str>,
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl MenuEntry {
    pub fn is_visible(&self, permissions: &PermissionSet) -> bool {
        permissions.has_permission(self.module, self.action, self.resource)
    }
}

/// 分组后的菜单（按模块分桶）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub module: &'static str,
    pub title: &'static str,
    pub entries: Vec<&'static MenuEntry>,
}

impl MenuGroup {
    /// 分组标识：模块名加上组内菜单路径，组内条目变化时标识随之变化
    pub fn key(&self) -> (&'static str, Vec<&'static str>) {
        (self.module, self.entries.iter().map(|e| e.path).collect())
    }
}

/// 菜单分组的固定顺序：(模块名, 分组标题)
pub const MENU_GROUPS: &[(&str, &str)] = &[
    ("Dashboard", "Overview"),
    ("Service", "Services"),
    ("Booking", "Bookings"),
    ("Schedule", "Work"),
    ("Permission", "Administration"),
];

pub const MENU_CATALOG: &[MenuEntry] = &[
    MenuEntry {
        module: "Dashboard",
        action: "view",
        resource: None,
        label: "Dashboard",
        path: "/dashboard",
        icon: "home",
        description: "Your overview",
    },
    MenuEntry {
        module: "Service",
        action: "view",
        resource: Some("service.view.list"),
        label: "Browse services",
        path: "/services",
        icon: "sparkles",
        description: "Find a housekeeping service",
    },
    MenuEntry {
        module: "Booking",
        action: "create",
        resource: Some("booking.create"),
        label: "New booking",
        path: "/bookings/new",
        icon: "calendar-plus",
        description: "Book a cleaner in a few steps",
    },
    MenuEntry {
        module: "Booking",
        action: "view",
        resource: Some("booking.view.history"),
        label: "Booking history",
        path: "/bookings",
        icon: "history",
        description: "Past and upcoming bookings",
    },
    MenuEntry {
        module: "Schedule",
        action: "view",
        resource: Some("schedule.view"),
        label: "My schedule",
        path: "/schedules",
        icon: "clock",
        description: "Assigned jobs",
    },
    MenuEntry {
        module: "Permission",
        action: "view",
        resource: Some("permission.view.roles"),
        label: "Roles & permissions",
        path: "/admin/roles",
        icon: "shield",
        description: "Feature flags per role",
    },
];

/// 过滤目录，保留当前权限可见的菜单项（保持目录顺序）
pub fn derive_menu(permissions: &PermissionSet) -> Vec<&'static MenuEntry> {
    MENU_CATALOG
        .iter()
        .filter(|entry| entry.is_visible(permissions))
        .collect()
}

/// 按固定分组顺序分桶，丢弃空分组
pub fn group_menu(permissions: &PermissionSet) -> Vec<MenuGroup> {
    let visible = derive_menu(permissions);
    MENU_GROUPS
        .iter()
        .filter_map(|&(module, title)| {
            let entries: Vec<_> = visible
                .iter()
                .copied()
                .filter(|e| e.module == module)
                .collect();
            (!entries.is_empty()).then_some(MenuGroup {
                module,
                title,
                entries,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{Feature, ModulePermissions, RoleDetail};

    fn tree(enabled: &[(&str, &str)]) -> PermissionSet {
        let mut modules: Vec<ModulePermissions> = Vec::new();
        for (i, (module, feature)) in enabled.iter().enumerate() {
            let f = Feature {
                feature_id: i as i64,
                feature_name: feature.to_string(),
                description: None,
                is_enabled: true,
            };
            match modules.iter_mut().find(|m| m.module_name == *module) {
                Some(m) => m.features.push(f),
                None => modules.push(ModulePermissions {
                    module_name: module.to_string(),
                    features: vec![f],
                }),
            }
        }
        PermissionSet::from_detail(&RoleDetail {
            modules,
            ..Default::default()
        })
    }

    #[test]
    fn every_group_module_has_catalog_entries() {
        for (module, _) in MENU_GROUPS {
            assert!(MENU_CATALOG.iter().any(|e| e.module == *module));
        }
        for entry in MENU_CATALOG {
            assert!(MENU_GROUPS.iter().any(|(m, _)| *m == entry.module));
        }
    }

    #[test]
    fn visible_iff_has_permission() {
        let set = tree(&[
            ("Booking", "booking.view.history"),
            ("Dashboard", "dashboard.view"),
        ]);
        let menu = derive_menu(&set);
        for entry in MENU_CATALOG {
            let expected = set.has_permission(entry.module, entry.action, entry.resource);
            assert_eq!(menu.contains(&entry), expected, "{}", entry.path);
        }
        let paths: Vec<_> = menu.iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["/dashboard", "/bookings"]);
    }

    #[test]
    fn entry_hidden_when_its_module_is_not_enabled() {
        // booking.create 挂在其他模块下，Booking 模块本身未启用
        let set = tree(&[("Orders", "booking.create"), ("Dashboard", "dashboard.view")]);
        assert!(set.has_feature_permission("booking.create"));
        let paths: Vec<_> = derive_menu(&set).iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["/dashboard"]);
        assert!(group_menu(&set).iter().all(|g| g.module != "Booking"));
    }

    #[test]
    fn group_key_changes_with_its_entries() {
        let before = group_menu(&tree(&[("Booking", "booking.view.history")]));
        let after = group_menu(&tree(&[
            ("Booking", "booking.create"),
            ("Booking", "booking.view.history"),
        ]));
        assert_eq!(before[0].module, after[0].module);
        assert_ne!(before[0].key(), after[0].key());
        assert_eq!(after[0].key().1, vec!["/bookings/new", "/bookings"]);
    }

    #[test]
    fn empty_tree_yields_no_menu_and_no_groups() {
        let set = PermissionSet::default();
        assert!(derive_menu(&set).is_empty());
        assert!(group_menu(&set).is_empty());
    }

    #[test]
    fn groups_follow_fixed_order_and_drop_empty() {
        let set = tree(&[
            ("Schedule", "schedule.view"),
            ("Booking", "booking.create"),
            ("Booking", "booking.view.history"),
        ]);
        let groups = group_menu(&set);
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Bookings", "Work"]);
        let booking_paths: Vec<_> = groups[0].entries.iter().map(|e| e.path).collect();
        assert_eq!(booking_paths, vec!["/bookings/new", "/bookings"]);
    }
}
