//! 角色与权限（只读）：左侧角色列表，右侧模块/功能树

use housekeeper_shared::permission::{ListRolesRequest, RoleDetailRequest, RoleSummary};
use housekeeper_shared::RoleDetail;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::*;

#[component]
pub fn AdminRolesPage() -> impl IntoView {
    let auth = use_auth();

    let (roles, set_roles) = signal(Vec::<RoleSummary>::new());
    let (detail, set_detail) = signal(Option::<RoleDetail>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let selected = RwSignal::new(Option::<i64>::None);
    let loading_detail = RwSignal::new(false);

    let api = auth.api();
    spawn_local(async move {
        match api.send(&ListRolesRequest).await {
            Ok(list) => {
                if let Some(first) = list.first() {
                    selected.set(Some(first.role_id));
                }
                set_roles.set(list);
            }
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
    });

    Effect::new(move |_| {
        let Some(role_id) = selected.get() else {
            return;
        };
        let api = auth.api();
        loading_detail.set(true);
        spawn_local(async move {
            match api.send(&RoleDetailRequest { role_id }).await {
                // 切换过快时丢弃过期结果
                Ok(list) if selected.get_untracked() == Some(role_id) => {
                    set_detail.set(list.into_iter().next());
                    set_error_msg.set(None);
                }
                Ok(_) => {}
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            loading_detail.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Roles & permissions"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <ul class="menu bg-base-100 rounded-box shadow">
                    <li class="menu-title">"Roles"</li>
                    <For
                        each=move || roles.get()
                        key=|r| r.role_id
                        children=move |r| {
                            let id = r.role_id;
                            view! {
                                <li>
                                    <a
                                        class:active=move || selected.get() == Some(id)
                                        on:click=move |_| selected.set(Some(id))
                                    >
                                        <Shield attr:class="h-4 w-4" />
                                        <div class="flex flex-col">
                                            <span>{r.role_name.clone()}</span>
                                            <span class="text-xs opacity-60">
                                                {r.description.clone().unwrap_or_default()}
                                            </span>
                                        </div>
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>

                <div class="md:col-span-2 space-y-4">
                    <Show when=move || loading_detail.get()>
                        <span class="loading loading-dots"></span>
                    </Show>
                    {move || detail.get().map(|d| {
                        let modules = d.modules;
                        view! {
                            <For
                                each=move || modules.clone()
                                key=|m| m.module_name.clone()
                                children=|m| view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body p-5">
                                            <h3 class="card-title text-base">{m.module_name.clone()}</h3>
                                            <ul class="space-y-1">
                                                {m.features
                                                    .into_iter()
                                                    .map(|f| view! {
                                                        <li class="flex items-center justify-between gap-2">
                                                            <div>
                                                                <code class="text-sm">{f.feature_name.clone()}</code>
                                                                <div class="text-xs text-base-content/60">
                                                                    {f.description.clone().unwrap_or_default()}
                                                                </div>
                                                            </div>
                                                            {if f.is_enabled {
                                                                view! {
                                                                    <span class="badge badge-success gap-1">
                                                                        <Check attr:class="h-3 w-3" /> "Enabled"
                                                                    </span>
                                                                }.into_any()
                                                            } else {
                                                                view! { <span class="badge badge-ghost">"Disabled"</span> }.into_any()
                                                            }}
                                                        </li>
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        </div>
                                    </div>
                                }
                            />
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
