//! 服务目录：列表（按分类/关键词筛选）与详情

use housekeeper_shared::catalog::{
    Category, GetServiceRequest, ListCategoriesRequest, ListServicesRequest, Service,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 预约入口所需的功能
const BOOKING_CREATE: &str = "booking.create";

#[component]
pub fn ServicesPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (services, set_services) = signal(Vec::<Service>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let category = RwSignal::new(Option::<i64>::None);
    let keyword = RwSignal::new(String::new());

    let api = auth.api();
    spawn_local(async move {
        match api.send(&ListCategoriesRequest).await {
            Ok(list) => set_categories.set(list),
            Err(e) => log::warn!("[Services] categories: {}", e),
        }
    });

    let load_services = move || {
        let api = auth.api();
        let req = ListServicesRequest {
            category_id: category.get_untracked(),
            keyword: Some(keyword.get_untracked().trim().to_string()).filter(|k| !k.is_empty()),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&req).await {
                Ok(list) => {
                    set_services.set(list);
                    set_error_msg.set(None);
                }
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    };

    // 分类切换时重新加载
    Effect::new(move |_| {
        category.track();
        load_services();
    });

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        load_services();
    };

    let permission_set = auth.permission_set();
    let can_book = move || permission_set.with(|p| p.has_feature_permission(BOOKING_CREATE));

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-end justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">"Services"</h1>
                    <p class="text-base-content/70">"Pick the help you need."</p>
                </div>
                <form class="join" on:submit=on_search>
                    <input
                        class="input input-bordered join-item"
                        placeholder="Search services"
                        prop:value=keyword
                        on:input=move |ev| keyword.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary join-item">"Search"</button>
                </form>
            </div>

            <div class="flex flex-wrap gap-2">
                <button
                    class="btn btn-sm"
                    class:btn-primary=move || category.get().is_none()
                    on:click=move |_| category.set(None)
                >
                    "All"
                </button>
                <For
                    each=move || categories.get()
                    key=|c| c.category_id
                    children=move |c| {
                        let id = c.category_id;
                        view! {
                            <button
                                class="btn btn-sm"
                                class:btn-primary=move || category.get() == Some(id)
                                on:click=move |_| category.set(Some(id))
                            >
                                {c.category_name.clone()}
                            </button>
                        }
                    }
                />
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <AlertCircle attr:class="h-5 w-5" />
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get() && services.with(|s| s.is_empty())>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && services.with(|s| s.is_empty()) && error_msg.get().is_none()>
                <p class="text-center py-12 text-base-content/50">"No services match your search."</p>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                <For
                    each=move || services.get()
                    key=|s| s.service_id
                    children=move |s| {
                        let id = s.service_id;
                        view! {
                            <div class="card bg-base-100 shadow hover:shadow-lg transition">
                                <div class="card-body">
                                    <h3 class="card-title">{s.name.clone()}</h3>
                                    <p class="text-sm text-base-content/70 line-clamp-2">
                                        {s.description.clone().unwrap_or_default()}
                                    </p>
                                    <div class="text-lg font-semibold text-primary">{s.price_label()}</div>
                                    <div class="card-actions justify-end">
                                        <button
                                            class="btn btn-ghost btn-sm"
                                            on:click=move |_| router.navigate_to(AppRoute::ServiceDetail(id))
                                        >
                                            "Details"
                                        </button>
                                        <Show when=can_book>
                                            <button
                                                class="btn btn-primary btn-sm"
                                                on:click=move |_| router.navigate_to(AppRoute::NewBooking { service: Some(id) })
                                            >
                                                "Book"
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub fn ServiceDetailPage(service_id: i64) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (service, set_service) = signal(Option::<Service>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.send(&GetServiceRequest { service_id }).await {
            Ok(s) => set_service.set(Some(s)),
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
    });

    let permission_set = auth.permission_set();
    let can_book = move || permission_set.with(|p| p.has_feature_permission(BOOKING_CREATE));

    view! {
        <div class="space-y-4">
            <button class="btn btn-ghost btn-sm gap-1" on:click=move |_| router.navigate_to(AppRoute::Services)>
                <ChevronLeft attr:class="h-4 w-4" /> "All services"
            </button>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || service.get().map(|s| {
                let is_active = s.is_active;
                let duration = s
                    .estimated_duration_minutes
                    .map(|m| format!("About {} minutes", m));
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <div class="flex items-start justify-between gap-4">
                                <h1 class="card-title text-2xl">{s.name.clone()}</h1>
                                <Show when=move || !is_active>
                                    <span class="badge badge-ghost">"Unavailable"</span>
                                </Show>
                            </div>
                            <p class="text-base-content/80">{s.description.clone().unwrap_or_default()}</p>
                            <div class="flex flex-wrap gap-6 mt-2">
                                <div>
                                    <div class="text-sm text-base-content/60">"Price"</div>
                                    <div class="text-xl font-semibold text-primary">{s.price_label()}</div>
                                </div>
                                {duration.map(|d| view! {
                                    <div>
                                        <div class="text-sm text-base-content/60">"Duration"</div>
                                        <div class="flex items-center gap-1"><Clock attr:class="h-4 w-4" /> {d}</div>
                                    </div>
                                })}
                            </div>
                            <div class="card-actions justify-end mt-4">
                                <Show when=move || can_book() && is_active>
                                    <button
                                        class="btn btn-primary gap-2"
                                        on:click=move |_| router.navigate_to(AppRoute::NewBooking { service: Some(service_id) })
                                    >
                                        <CalendarPlus attr:class="h-4 w-4" /> "Book this service"
                                    </button>
                                </Show>
                            </div>
                        </div>
                    </div>
                }
            })}

            <Show when=move || service.get().is_none() && error_msg.get().is_none()>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>
        </div>
    }
}
