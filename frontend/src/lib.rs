//! 家政服务平台前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）与每个页面的访问要求
//! - `web::router`: 路由服务（核心引擎），只做登录态守卫
//! - `auth`: 认证状态管理，镜像客户端核心的会话与权限
//! - `components`: UI 组件层，`guard::RouteGuard` 负责角色与权限判定

mod auth;
mod components {
    pub mod admin_roles;
    pub mod booking_wizard;
    pub mod bookings;
    pub mod dashboard;
    pub mod forgot_password;
    pub mod guard;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod role_select;
    pub mod schedules;
    pub mod services;
    pub mod status;
}

use housekeeper_client::config::{ENV_API_BASE_URL, ENV_LANGUAGE};
use housekeeper_client::{ClientConfig, EnvAdapter};
use leptos::prelude::*;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin_roles::AdminRolesPage;
use crate::components::booking_wizard::BookingWizardPage;
use crate::components::bookings::{BookingDetailPage, BookingsPage};
use crate::components::dashboard::DashboardPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::guard::RouteGuard;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::role_select::RoleSelectPage;
use crate::components::schedules::SchedulesPage;
use crate::components::services::{ServiceDetailPage, ServicesPage};
use crate::components::status::{NotFoundPage, UnauthorizedPage};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod logger;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::{BrowserStore, on_storage_change};
}

pub use web::logger::init as init_logger;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 构建期注入的配置（`HOUSEKEEPER_API_URL` / `HOUSEKEEPER_LANGUAGE`）
struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            ENV_API_BASE_URL => option_env!("HOUSEKEEPER_API_URL"),
            ENV_LANGUAGE => option_env!("HOUSEKEEPER_LANGUAGE"),
            _ => None,
        };
        value.map(str::to_string)
    }
}

/// 路由匹配函数
///
/// 公开页面直接渲染；其余页面套上应用外壳，并由 `RouteGuard` 判定访问权限。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login { redirect } => view! { <LoginPage redirect=redirect /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::SelectRole => view! { <RoleSelectPage /> }.into_any(),
        AppRoute::Unauthorized => view! { <UnauthorizedPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        protected => {
            let page = protected.clone();
            view! {
                <AppShell>
                    <RouteGuard route=protected>{protected_page(page.clone())}</RouteGuard>
                </AppShell>
            }
            .into_any()
        }
    }
}

fn protected_page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Services => view! { <ServicesPage /> }.into_any(),
        AppRoute::ServiceDetail(id) => view! { <ServiceDetailPage service_id=id /> }.into_any(),
        AppRoute::NewBooking { service } => view! { <BookingWizardPage service=service /> }.into_any(),
        AppRoute::Bookings => view! { <BookingsPage /> }.into_any(),
        AppRoute::BookingDetail(id) => view! { <BookingDetailPage booking_id=id /> }.into_any(),
        AppRoute::Schedules => view! { <SchedulesPage /> }.into_any(),
        AppRoute::AdminRoles => view! { <AdminRolesPage /> }.into_any(),
        _ => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（持有会话、API 客户端与权限服务）
    let config = ClientConfig::from_env(&BuildEnv);
    log::info!("[App] API base {}", config.api_base_url);
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. 初始化认证状态（恢复权限、监听其他标签页）
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现登录态守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
