//! 预约向导页面
//!
//! 状态由 `form_state::WizardState` 持有，各步骤的表单在 `steps` 中渲染。

mod form_state;
mod steps;

use housekeeper_shared::catalog::{GetServiceRequest, ListServicesRequest, Service};
use housekeeper_shared::wizard::WizardStep;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{Check, ChevronLeft, ChevronRight};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

use form_state::WizardState;
use steps::{AddressStep, ReviewStep, ScheduleStep, ServiceStep};

#[component]
pub fn BookingWizardPage(service: Option<i64>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let state = WizardState::new();

    let (services, set_services) = signal(Vec::<Service>::new());

    // 只列出可预约的服务
    let api = auth.api();
    spawn_local(async move {
        match api.send(&ListServicesRequest::default()).await {
            Ok(list) => set_services.set(list.into_iter().filter(|s| s.is_active).collect()),
            Err(e) => state.fail(e.user_message()),
        }
    });

    // 从服务详情进入时预选服务
    if let Some(service_id) = service {
        let api = auth.api();
        spawn_local(async move {
            match api.send(&GetServiceRequest { service_id }).await {
                Ok(s) if s.is_active => state.start_with(&s),
                Ok(s) => log::info!("[Booking] service {} is not bookable", s.service_id),
                Err(e) => log::warn!("[Booking] preselected service {}: {}", service_id, e),
            }
        });
    }

    let on_next = move |_: leptos::ev::MouseEvent| {
        state.next();
    };

    let on_submit = move |_: leptos::ev::MouseEvent| {
        if state.submitting.get_untracked() {
            return;
        }
        let Some(req) = state.to_request() else {
            return;
        };
        state.submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.send(&req).await {
                Ok(booking) => {
                    log::info!("[Booking] created {}", booking.reference());
                    router.replace(AppRoute::BookingDetail(booking.booking_id));
                }
                Err(e) => {
                    log::warn!("[Booking] create failed: {}", e);
                    state.fail(e.user_message());
                }
            }
            state.submitting.set(false);
        });
    };

    // 只在步骤切换时重建表单，编辑草稿不触发
    let step = Memo::new(move |_| state.step());

    let step_body = move || match step.get() {
        WizardStep::Service => view! { <ServiceStep state=state services=services /> }.into_any(),
        WizardStep::Schedule => view! { <ScheduleStep state=state /> }.into_any(),
        WizardStep::Address => view! { <AddressStep state=state /> }.into_any(),
        WizardStep::Review => view! { <ReviewStep state=state /> }.into_any(),
    };

    let general_errors = state.general_errors();

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"New booking"</h1>

            <ul class="steps w-full">
                {WizardStep::ALL
                    .into_iter()
                    .map(|item| {
                        view! {
                            <li
                                class="step cursor-pointer"
                                class:step-primary=move || item <= step.get()
                                on:click=move |_| state.jump_to(item)
                            >
                                {item.title()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body gap-4">
                    <h2 class="card-title">{move || step.get().title()}</h2>

                    <For
                        each=move || general_errors.get()
                        key=|message| message.clone()
                        children=|message| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{message}</span>
                            </div>
                        }
                    />

                    {step_body}

                    <div class="card-actions justify-between mt-4">
                        <button
                            class="btn btn-ghost gap-1"
                            disabled=move || step.get() == WizardStep::Service
                            on:click=move |_| state.back()
                        >
                            <ChevronLeft attr:class="h-4 w-4" /> "Back"
                        </button>
                        <Show
                            when=move || step.get() == WizardStep::Review
                            fallback=move || view! {
                                <button class="btn btn-primary gap-1" on:click=on_next>
                                    "Continue" <ChevronRight attr:class="h-4 w-4" />
                                </button>
                            }
                        >
                            <button
                                class="btn btn-primary gap-1"
                                disabled=move || state.submitting.get()
                                on:click=on_submit
                            >
                                <Show
                                    when=move || state.submitting.get()
                                    fallback=|| view! { <Check attr:class="h-4 w-4" /> }
                                >
                                    <span class="loading loading-spinner loading-sm"></span>
                                </Show>
                                "Confirm booking"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
