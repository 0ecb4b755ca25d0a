use housekeeper_client::RegistrationForm;
use housekeeper_shared::RoleKind;
use housekeeper_shared::validation::{FieldError, error_for};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{auth_flow, use_auth};
use crate::components::login::FieldHint;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// 注册表单状态
#[derive(Clone, Copy)]
struct RegisterState {
    username: RwSignal<String>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
    full_name: RwSignal<String>,
    email: RwSignal<String>,
    phone_number: RwSignal<String>,
    role: RwSignal<RoleKind>,
}

impl RegisterState {
    fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            full_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            role: RwSignal::new(RoleKind::Customer),
        }
    }

    fn to_form(&self) -> RegistrationForm {
        RegistrationForm {
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
            full_name: self.full_name.get_untracked(),
            email: self.email.get_untracked(),
            phone_number: self.phone_number.get_untracked(),
            role: self.role.get_untracked(),
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let state = RegisterState::new();

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (field_errors, set_field_errors) = signal(Vec::<FieldError>::new());
    let (registered, set_registered) = signal(false);

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

        let form = state.to_form();
        let flow = auth_flow(&auth);
        spawn_local(async move {
            match flow.register(&form).await {
                Ok(profile) => {
                    log::info!("[Register] account {} created", profile.username);
                    set_registered.set(true);
                }
                Err(e) if !e.fields().is_empty() => set_field_errors.set(e.fields().to_vec()),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_is_submitting.set(false);
        });
    };

    // 文本输入框
    let text_input = move |id: &'static str,
                           label: &'static str,
                           kind: &'static str,
                           value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
                <FieldHint message=field_error(id) />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <h1 class="text-3xl font-bold">"Create an account"</h1>

                <Show
                    when=move || !registered.get()
                    fallback=move || view! {
                        <div class="card w-full shadow-2xl bg-base-100">
                            <div class="card-body items-center text-center">
                                <h2 class="card-title">"Account created"</h2>
                                <p class="text-base-content/70">"You can now sign in with your new account."</p>
                                <button class="btn btn-primary mt-2" on:click=move |_| router.navigate_to(AppRoute::login())>
                                    "Go to sign in"
                                </button>
                            </div>
                        </div>
                    }
                >
                    <div class="card w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"I want to"</span>
                                </label>
                                <div class="join w-full">
                                    <button
                                        type="button"
                                        class="btn join-item flex-1"
                                        class:btn-primary=move || state.role.get() == RoleKind::Customer
                                        on:click=move |_| state.role.set(RoleKind::Customer)
                                    >
                                        "Book services"
                                    </button>
                                    <button
                                        type="button"
                                        class="btn join-item flex-1"
                                        class:btn-primary=move || state.role.get() == RoleKind::Employee
                                        on:click=move |_| state.role.set(RoleKind::Employee)
                                    >
                                        "Work as a housekeeper"
                                    </button>
                                </div>
                                <FieldHint message=field_error("role") />
                            </div>

                            {text_input("fullName", "Full name", "text", state.full_name)}
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                                {text_input("email", "Email", "email", state.email)}
                                {text_input("phoneNumber", "Phone number", "tel", state.phone_number)}
                            </div>
                            {text_input("username", "Username", "text", state.username)}
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                                {text_input("password", "Password", "password", state.password)}
                                {text_input("confirmPassword", "Confirm password", "password", state.confirm_password)}
                            </div>

                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                    } else {
                                        "Create account".into_any()
                                    }}
                                </button>
                            </div>
                            <p class="text-center text-sm mt-2">
                                "Already registered? "
                                <Link to="/login" class="link link-primary">"Sign in"</Link>
                            </p>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}
