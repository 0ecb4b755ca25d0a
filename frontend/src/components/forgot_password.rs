//! 找回密码：邮箱 → 验证码 → 新密码 → 完成

use housekeeper_client::{ClientError, PasswordReset};
use housekeeper_shared::validation::{FieldError, error_for};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{auth_flow, use_auth};
use crate::components::login::FieldHint;
use crate::web::router::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetStep {
    Email,
    Otp,
    NewPassword,
    Done,
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();

    let step = RwSignal::new(ResetStep::Email);
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let reset_token = RwSignal::new(Option::<String>::None);
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (field_errors, set_field_errors) = signal(Vec::<FieldError>::new());

    let field_error = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|errors| error_for(errors, field).map(str::to_string)))
    };

    let report = move |e: ClientError| {
        if e.fields().is_empty() {
            set_error_msg.set(Some(e.user_message()));
        } else {
            set_field_errors.set(e.fields().to_vec());
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error_msg.set(None);
        set_field_errors.set(Vec::new());

        let flow = auth_flow(&auth);
        spawn_local(async move {
            match step.get_untracked() {
                ResetStep::Email => match flow.forgot_password(&email.get_untracked()).await {
                    Ok(()) => step.set(ResetStep::Otp),
                    Err(e) => report(e),
                },
                ResetStep::Otp => {
                    match flow
                        .verify_otp(&email.get_untracked(), &otp.get_untracked())
                        .await
                    {
                        Ok(token) => {
                            reset_token.set(token);
                            step.set(ResetStep::NewPassword);
                        }
                        Err(e) => report(e),
                    }
                }
                ResetStep::NewPassword => {
                    let reset = PasswordReset {
                        email: email.get_untracked(),
                        otp: otp.get_untracked(),
                        reset_token: reset_token.get_untracked(),
                        new_password: new_password.get_untracked(),
                        confirm_password: confirm_password.get_untracked(),
                    };
                    match flow.reset_password(&reset).await {
                        Ok(()) => step.set(ResetStep::Done),
                        Err(e) => report(e),
                    }
                }
                ResetStep::Done => {}
            }
            set_busy.set(false);
        });
    };

    let input = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
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

    let step_view = move || match step.get() {
        ResetStep::Email => view! {
            <p class="text-sm text-base-content/70">"We will send a 6-digit code to your email."</p>
            {input("email", "Email", "email", email)}
        }
        .into_any(),
        ResetStep::Otp => view! {
            <p class="text-sm text-base-content/70">
                "Enter the code sent to " <span class="font-medium">{move || email.get()}</span>
            </p>
            {input("otp", "Verification code", "text", otp)}
        }
        .into_any(),
        ResetStep::NewPassword => view! {
            {input("newPassword", "New password", "password", new_password)}
            {input("confirmPassword", "Confirm password", "password", confirm_password)}
        }
        .into_any(),
        ResetStep::Done => view! {
            <div class="alert alert-success">"Your password has been reset."</div>
        }
        .into_any(),
    };

    let button_label = move || match step.get() {
        ResetStep::Email => "Send code",
        ResetStep::Otp => "Verify code",
        ResetStep::NewPassword => "Reset password",
        ResetStep::Done => "",
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Reset your password"</h1>
                <ul class="steps w-full">
                    <li class="step step-primary">"Email"</li>
                    <li class="step" class:step-primary=move || step.get() != ResetStep::Email>"Code"</li>
                    <li
                        class="step"
                        class:step-primary=move || matches!(step.get(), ResetStep::NewPassword | ResetStep::Done)
                    >
                        "New password"
                    </li>
                </ul>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        {step_view}
                        <Show when=move || step.get() != ResetStep::Done>
                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=move || busy.get()>
                                    <Show when=move || busy.get()>
                                        <span class="loading loading-spinner"></span>
                                    </Show>
                                    {button_label}
                                </button>
                            </div>
                        </Show>
                        <p class="text-center text-sm mt-2">
                            <Link to="/login" class="link link-primary">"Back to sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
