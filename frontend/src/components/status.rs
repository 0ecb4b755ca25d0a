use leptos::prelude::*;

use crate::components::icons::Lock;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 角色不符时的落地页
#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <Lock attr:class="h-16 w-16 mx-auto text-warning" />
                <h1 class="text-4xl font-bold">"Not available for your role"</h1>
                <p class="text-base-content/70">"This page belongs to a different kind of account."</p>
                <button class="btn btn-primary" on:click=move |_| router.navigate_to(AppRoute::Dashboard)>
                    "Back to dashboard"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <button class="btn btn-ghost mt-6" on:click=move |_| router.navigate_to(AppRoute::Dashboard)>
                    "Go home"
                </button>
            </div>
        </div>
    }
}
