//! 路由守卫组件
//!
//! 在渲染时判定角色与权限：加载中显示指示器，未登录跳转登录页，
//! 角色不符跳转 unauthorized 页面，权限不足原地显示拒绝面板。

use housekeeper_shared::guard::{GuardDecision, evaluate};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::Lock;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn RouteGuard(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let guard_state = auth.guard_state();
    let requirement = route.guard();
    let location = route.to_path();

    let decision = Memo::new(move |_| evaluate(&requirement, &guard_state.get(), &location));

    // 跳转在 Effect 中进行，避免在渲染期间修改路由
    let redirect_route = route.clone();
    Effect::new(move |_| match decision.get() {
        GuardDecision::RedirectToLogin { .. } => {
            log::info!("[Guard] {} requires login", redirect_route);
            router.replace(AppRoute::auth_failure_redirect(&redirect_route));
        }
        GuardDecision::Unauthorized => {
            log::info!("[Guard] role not allowed on {}", redirect_route);
            router.replace(AppRoute::Unauthorized);
        }
        _ => {}
    });

    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::AccessDenied(requirement) => {
            let needed = requirement
                .resource
                .unwrap_or_else(|| format!("{}.{}", requirement.module, requirement.action));
            view! {
                <div class="card bg-base-100 shadow-xl max-w-lg mx-auto mt-12">
                    <div class="card-body items-center text-center">
                        <Lock attr:class="h-10 w-10 text-warning" />
                        <h2 class="card-title">"Access denied"</h2>
                        <p class="text-base-content/70">
                            "Your role does not include the permission required for this page."
                        </p>
                        <code class="badge badge-ghost">{needed}</code>
                        <div class="card-actions mt-4">
                            <button class="btn btn-primary" on:click=move |_| router.back()>
                                "Go back"
                            </button>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }
        // 加载中与等待跳转时都显示指示器
        _ => view! {
            <div class="flex items-center justify-center min-h-[50vh]">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}
