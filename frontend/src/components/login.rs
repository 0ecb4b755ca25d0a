use housekeeper_client::{Credentials, LoginOutcome};
use housekeeper_shared::validation::{FieldError, error_for};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{login, use_auth};
use crate::components::icons::{AlertCircle, Sparkles};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage(redirect: Option<String>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember_me, set_remember_me) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (field_errors, set_field_errors) = signal(Vec::<FieldError>::new());

    let field_error = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|errors| error_for(errors, field).map(str::to_string)))
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_field_errors.set(Vec::new());

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
            remember_me: remember_me.get_untracked(),
        };
        let redirect = redirect.clone();
        spawn_local(async move {
            match login(auth, credentials, redirect).await {
                // 跳转由路由服务的认证状态监听完成
                Ok(LoginOutcome::LoggedIn(_)) => {}
                Ok(LoginOutcome::ChooseRole(_)) => router.navigate_to(AppRoute::SelectRole),
                Err(e) if !e.fields().is_empty() => set_field_errors.set(e.fields().to_vec()),
                Err(e) => {
                    log::warn!("[Login] {}", e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sparkles attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"HomeCare"</h1>
                        <p class="text-base-content/70">"Sign in to book or manage your services"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || auth.notice.get().is_some()>
                            <div role="alert" class="alert alert-warning text-sm py-2">
                                <span>{move || auth.notice.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="shrink-0 h-6 w-6" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                            />
                            <FieldHint message=field_error("username") />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                            <FieldHint message=field_error("password") />
                        </div>
                        <div class="flex items-center justify-between">
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-sm"
                                    prop:checked=remember_me
                                    on:change=move |ev| set_remember_me.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Remember me"</span>
                            </label>
                            <Link to="/forgot-password" class="link link-primary text-sm">
                                "Forgot password?"
                            </Link>
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "New here? "
                            <Link to="/register" class="link link-primary">"Create an account"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 表单字段下方的错误提示
#[component]
pub fn FieldHint(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <label class="label">
                <span class="label-text-alt text-error">{move || message.get().unwrap_or_default()}</span>
            </label>
        </Show>
    }
}
