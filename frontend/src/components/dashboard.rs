use housekeeper_shared::RoleKind;
use housekeeper_shared::booking::{Booking, ListBookingsRequest};
use housekeeper_shared::menu::derive_menu;
use housekeeper_shared::permission::ListRolesRequest;
use housekeeper_shared::schedule::{ListSchedulesRequest, Schedule};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::router::use_router;

/// 首页展示的最近预约数量
const RECENT_BOOKINGS: usize = 3;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let permission_set = auth.permission_set();

    let greeting = move || {
        auth.session
            .with(|s| s.user.as_ref().map(|u| u.display_name().to_string()))
            .unwrap_or_default()
    };

    // 快捷入口：与侧边菜单同源，去掉首页本身
    let shortcuts = move || {
        derive_menu(&permission_set.get())
            .into_iter()
            .filter(|entry| entry.path != "/dashboard")
            .collect::<Vec<_>>()
    };

    let role_body = move || match auth.role().get() {
        Some(RoleKind::Customer) => view! { <CustomerOverview /> }.into_any(),
        Some(RoleKind::Employee) => view! { <EmployeeOverview /> }.into_any(),
        Some(RoleKind::Admin) => view! { <AdminOverview /> }.into_any(),
        None => ().into_any(),
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Welcome back, " {greeting}</h1>
                <p class="text-base-content/70">"Here is what is happening today."</p>
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                <For
                    each=shortcuts
                    key=|entry| entry.path
                    children=move |entry| {
                        let path = entry.path;
                        view! {
                            <button
                                class="card bg-base-100 shadow hover:shadow-lg transition text-left"
                                on:click=move |_| router.navigate(path)
                            >
                                <div class="card-body flex-row items-center gap-4 p-5">
                                    <div class="p-3 bg-primary/10 rounded-xl text-primary">
                                        {menu_icon(entry.icon)}
                                    </div>
                                    <div>
                                        <div class="font-semibold">{entry.label}</div>
                                        <div class="text-sm text-base-content/60">{entry.description}</div>
                                    </div>
                                </div>
                            </button>
                        }
                    }
                />
            </div>

            {role_body}

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Modules"</div>
                    <div class="stat-value text-primary">{move || permission_set.with(|p| p.module_count())}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Enabled features"</div>
                    <div class="stat-value text-secondary">{move || permission_set.with(|p| p.feature_count())}</div>
                </div>
            </div>
        </div>
    }
}

/// 客户首页：最近的预约
#[component]
fn CustomerOverview() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (bookings, set_bookings) = signal(Vec::<Booking>::new());
    let (loading, set_loading) = signal(true);

    let api = auth.api();
    spawn_local(async move {
        match api.send(&ListBookingsRequest::default()).await {
            Ok(mut list) => {
                list.sort_by(|a, b| b.booking_time.cmp(&a.booking_time));
                list.truncate(RECENT_BOOKINGS);
                set_bookings.set(list);
            }
            Err(e) => log::warn!("[Dashboard] recent bookings: {}", e),
        }
        set_loading.set(false);
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h3 class="card-title">"Recent bookings"</h3>
                    <button class="btn btn-primary btn-sm gap-2" on:click=move |_| router.navigate("/bookings/new")>
                        <CalendarPlus attr:class="h-4 w-4" /> "Book now"
                    </button>
                </div>
                <Show when=move || loading.get()>
                    <span class="loading loading-dots"></span>
                </Show>
                <Show when=move || !loading.get() && bookings.with(|b| b.is_empty())>
                    <p class="text-base-content/50 py-4">"No bookings yet."</p>
                </Show>
                <ul class="divide-y divide-base-200">
                    <For
                        each=move || bookings.get()
                        key=|b| b.booking_id
                        children=move |b| {
                            let id = b.booking_id;
                            view! {
                                <li
                                    class="py-3 flex justify-between items-center cursor-pointer"
                                    on:click=move |_| router.navigate(&format!("/bookings/{}", id))
                                >
                                    <div>
                                        <div class="font-medium">{b.service_name.clone()}</div>
                                        <div class="text-sm text-base-content/60">
                                            {b.booking_time.format("%d/%m/%Y %H:%M").to_string()}
                                        </div>
                                    </div>
                                    <span class="badge badge-outline">{b.status.label()}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

/// 员工首页：今天的排班
#[component]
fn EmployeeOverview() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (schedules, set_schedules) = signal(Vec::<Schedule>::new());

    let today = chrono::Local::now().date_naive();
    let api = auth.api();
    spawn_local(async move {
        let req = ListSchedulesRequest {
            from: Some(today),
            to: Some(today),
        };
        match api.send(&req).await {
            Ok(list) => set_schedules.set(list),
            Err(e) => log::warn!("[Dashboard] today's schedule: {}", e),
        }
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h3 class="card-title">"Today's jobs"</h3>
                    <button class="btn btn-ghost btn-sm gap-2" on:click=move |_| router.navigate("/schedules")>
                        <Clock attr:class="h-4 w-4" /> "Full schedule"
                    </button>
                </div>
                <div class="stat p-0">
                    <div class="stat-value text-primary">{move || schedules.with(|s| s.len())}</div>
                    <div class="stat-desc">"assigned for today"</div>
                </div>
                <ul class="space-y-2">
                    <For
                        each=move || schedules.get()
                        key=|s| s.schedule_id
                        children=|s| view! {
                            <li class="flex items-center gap-3">
                                <span class="badge badge-primary badge-outline">
                                    {s.start_time.format("%H:%M").to_string()}
                                </span>
                                <span class="font-medium">{s.service_name.clone()}</span>
                                <span class="text-sm text-base-content/60 flex items-center gap-1">
                                    <MapPin attr:class="h-3 w-3" /> {s.address.clone()}
                                </span>
                            </li>
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

/// 管理员首页：角色数量
#[component]
fn AdminOverview() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (role_count, set_role_count) = signal(Option::<usize>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.send(&ListRolesRequest).await {
            Ok(roles) => set_role_count.set(Some(roles.len())),
            Err(e) => log::warn!("[Dashboard] roles: {}", e),
        }
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body flex-row items-center justify-between">
                <div>
                    <h3 class="card-title">"Roles"</h3>
                    <p class="text-base-content/70">
                        {move || match role_count.get() {
                            Some(n) => format!("{} roles configured", n),
                            None => "Loading...".to_string(),
                        }}
                    </p>
                </div>
                <button class="btn btn-primary btn-sm gap-2" on:click=move |_| router.navigate("/admin/roles")>
                    <Shield attr:class="h-4 w-4" /> "Manage permissions"
                </button>
            </div>
        </div>
    }
}
