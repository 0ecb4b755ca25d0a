//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。此处只做登录态守卫，
//! 角色与权限由 `RouteGuard` 组件在渲染时判定。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 当前浏览器地址对应的路由
fn current_route_from_location() -> AppRoute {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return AppRoute::default();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let params = location
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());

    AppRoute::parse(&path, |name| params.as_ref().and_then(|p| p.get(name)))
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以信号形式注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(current_route_from_location());

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到站内地址（可带查询参数）
    pub fn navigate(&self, url: &str) {
        self.navigate_to(AppRoute::parse_url(url));
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 替换当前历史记录（守卫跳转使用）
    pub fn replace(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    pub fn back(&self) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }

    fn commit(&self, route: AppRoute, use_push: bool) {
        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(route);
    }

    /// **核心方法：导航与守卫**
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        // --- Step 1: 验证目标路由 ---
        if target_route.requires_auth() && !is_auth {
            log::info!("[Router] {} requires login, redirecting", target_route);
            self.commit(AppRoute::auth_failure_redirect(&target_route), use_push);
            return;
        }

        if target_route.should_redirect_when_authenticated() && is_auth {
            let redirect = target_route.auth_success_redirect();
            log::info!("[Router] already signed in, redirecting to {}", redirect);
            self.commit(redirect, use_push);
            return;
        }

        // --- Step 2: 加载页面 ---
        self.commit(target_route, use_push);
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = current_route_from_location();
            let is_auth = router.is_authenticated.get_untracked();

            if target_route.requires_auth() && !is_auth {
                router.commit(AppRoute::auth_failure_redirect(&target_route), false);
            } else {
                router.set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                let redirect = route.auth_success_redirect();
                log::info!("[Router] signed in, redirecting to {}", redirect);
                router.commit(redirect, true);
            } else if !is_auth && route.requires_auth() {
                log::info!("[Router] signed out, redirecting to login");
                router.commit(AppRoute::auth_failure_redirect(&route), true);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口组件：根据当前路由渲染对应页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，改用 History API 导航
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
