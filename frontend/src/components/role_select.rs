//! 多角色账户的角色选择页

use housekeeper_shared::RoleKind;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{choose_role, use_auth};
use crate::components::icons::{ChevronRight, ShieldCheck};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn RoleSelectPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (submitting, set_submitting) = signal(Option::<RoleKind>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 直接打开此页（没有待选角色的登录）时回到登录页
    Effect::new(move |_| {
        if auth.pending_login.get().is_none() && !auth.session.get().is_authenticated {
            router.replace(AppRoute::login());
        }
    });

    let options = move || {
        auth.pending_login
            .get()
            .map(|p| p.options)
            .unwrap_or_default()
    };

    let on_choose = move |role: RoleKind| {
        if submitting.get_untracked().is_some() {
            return;
        }
        let redirect = auth
            .pending_login
            .get_untracked()
            .and_then(|p| p.redirect);
        set_submitting.set(Some(role));
        set_error_msg.set(None);

        spawn_local(async move {
            match choose_role(auth, role).await {
                Ok(_) => {
                    router.replace(AppRoute::Login { redirect }.auth_success_redirect());
                }
                Err(e) => {
                    log::warn!("[Login] role {} rejected: {}", role, e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
            set_submitting.set(None);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="flex flex-col items-center gap-2 text-center">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <ShieldCheck attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-2xl font-bold">"Choose how to continue"</h1>
                    <p class="text-base-content/70">"Your account has more than one role."</p>
                </div>

                <div class="card w-full shadow-2xl bg-base-100">
                    <div class="card-body gap-3">
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <For
                            each=options
                            key=|option| option.role_id
                            children=move |option| {
                                let role = option.role_name;
                                view! {
                                    <button
                                        class="btn btn-outline justify-between"
                                        disabled=move || submitting.get().is_some()
                                        on:click=move |_| on_choose(role)
                                    >
                                        <span>{role.label()}</span>
                                        {move || if submitting.get() == Some(role) {
                                            view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                                        } else {
                                            view! { <ChevronRight attr:class="h-4 w-4" /> }.into_any()
                                        }}
                                    </button>
                                }
                            }
                        />
                        <button
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| {
                                auth.pending_login.set(None);
                                router.navigate_to(AppRoute::login());
                            }
                        >
                            "Use another account"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
