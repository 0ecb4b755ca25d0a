//! 应用外壳：顶部导航栏 + 按权限推导的侧边菜单

use housekeeper_shared::Language;
use housekeeper_shared::menu::group_menu;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::web::router::use_router;

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let permission_set = auth.permission_set();

    let menu = Memo::new(move |_| group_menu(&permission_set.get()));
    let current_path = move || router.current_route().get().to_path();

    let display_name = move || {
        auth.session
            .with(|s| s.user.as_ref().map(|u| u.display_name().to_string()))
            .unwrap_or_default()
    };
    let role_label = move || auth.role().get().map(|r| r.label()).unwrap_or_default();

    let toggle_language = move |_: leptos::ev::MouseEvent| {
        let next = match auth.language.get_untracked() {
            Language::En => Language::Vi,
            Language::Vi => Language::En,
        };
        auth.set_language(next);
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        spawn_local(logout(auth));
    };

    view! {
        <div class="drawer lg:drawer-open">
            <input id="app-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow-sm sticky top-0 z-30">
                    <div class="flex-none lg:hidden">
                        <label for="app-drawer" class="btn btn-square btn-ghost">
                            <Menu attr:class="h-6 w-6" />
                        </label>
                    </div>
                    <div class="flex-1 gap-2">
                        <Sparkles attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold">"HomeCare"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <button class="btn btn-ghost btn-sm gap-1" on:click=toggle_language>
                            <Globe attr:class="h-4 w-4" />
                            {move || auth.language.get().code().to_uppercase()}
                        </button>
                        <div class="hidden md:flex flex-col items-end leading-tight">
                            <span class="font-medium">{display_name}</span>
                            <span class="badge badge-primary badge-sm">{role_label}</span>
                        </div>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign out"
                        </button>
                    </div>
                </div>

                <main class="flex-1 p-4 md:p-8">
                    <div class="max-w-6xl mx-auto space-y-6">{children()}</div>
                </main>
            </div>

            <div class="drawer-side z-40">
                <label for="app-drawer" class="drawer-overlay"></label>
                <aside class="bg-base-100 w-64 min-h-full">
                    <div class="p-4 text-lg font-semibold">"Menu"</div>
                    <ul class="menu px-2 gap-1">
                        <For
                            each=move || menu.get()
                            key=|group| group.key()
                            children=move |group| {
                                view! {
                                    <li class="menu-title">{group.title}</li>
                                    {group
                                        .entries
                                        .into_iter()
                                        .map(|entry| {
                                            let path = entry.path;
                                            let on_click = move |ev: web_sys::MouseEvent| {
                                                ev.prevent_default();
                                                router.navigate(path);
                                            };
                                            view! {
                                                <li>
                                                    <a
                                                        href=path
                                                        class:active=move || current_path() == path
                                                        on:click=on_click
                                                    >
                                                        {menu_icon(entry.icon)}
                                                        {entry.label}
                                                    </a>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                }
                            }
                        />
                    </ul>
                </aside>
            </div>
        </div>
    }
}
