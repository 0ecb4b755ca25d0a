//! 预约历史与详情

use housekeeper_shared::booking::{
    Booking, BookingStatus, CancelBookingRequest, GetBookingRequest, ListBookingsRequest,
};
use housekeeper_shared::catalog::format_price;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const BOOKING_CANCEL: &str = "booking.cancel";

fn status_badge(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "badge badge-warning",
        BookingStatus::Confirmed => "badge badge-info",
        BookingStatus::InProgress => "badge badge-primary",
        BookingStatus::Completed => "badge badge-success",
        BookingStatus::Cancelled => "badge badge-ghost",
    }
}

#[component]
pub fn BookingsPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (bookings, set_bookings) = signal(Vec::<Booking>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let status = RwSignal::new(Option::<BookingStatus>::None);

    let load_bookings = move || {
        let api = auth.api();
        let req = ListBookingsRequest {
            status: status.get_untracked(),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&req).await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.booking_time.cmp(&a.booking_time));
                    set_bookings.set(list);
                    set_error_msg.set(None);
                }
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        status.track();
        load_bookings();
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <h1 class="text-2xl font-bold">"Booking history"</h1>
                <div class="flex gap-2">
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| status.set(BookingStatus::parse(&event_target_value(&ev)))
                    >
                        <option value="" selected=move || status.get().is_none()>"All statuses"</option>
                        {BookingStatus::ALL
                            .into_iter()
                            .map(|s| view! {
                                <option value=s.as_str() selected=move || status.get() == Some(s)>
                                    {s.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                    <button on:click=move |_| load_bookings() disabled=move || loading.get() class="btn btn-ghost btn-sm btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                    <button class="btn btn-primary btn-sm gap-1" on:click=move |_| router.navigate("/bookings/new")>
                        <CalendarPlus attr:class="h-4 w-4" /> "New"
                    </button>
                </div>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Reference"</th>
                                <th>"Service"</th>
                                <th>"Time"</th>
                                <th class="hidden md:table-cell">"Total"</th>
                                <th>"Status"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || bookings.with(|b| b.is_empty()) && !loading.get()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No bookings found."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || bookings.get()
                                key=|b| (b.booking_id, b.status)
                                children=move |b| {
                                    let id = b.booking_id;
                                    view! {
                                        <tr
                                            class="hover cursor-pointer"
                                            on:click=move |_| router.navigate_to(AppRoute::BookingDetail(id))
                                        >
                                            <td class="font-mono text-sm">{b.reference()}</td>
                                            <td>{b.service_name.clone()}</td>
                                            <td>{b.booking_time.format("%d/%m/%Y %H:%M").to_string()}</td>
                                            <td class="hidden md:table-cell">{format_price(b.total_amount)}</td>
                                            <td><span class=status_badge(b.status)>{b.status.label()}</span></td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn BookingDetailPage(booking_id: i64) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let permission_set = auth.permission_set();

    let (booking, set_booking) = signal(Option::<Booking>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错
    let confirming = RwSignal::new(false);
    let cancelling = RwSignal::new(false);
    let reason = RwSignal::new(String::new());

    let api = auth.api();
    spawn_local(async move {
        match api.send(&GetBookingRequest { booking_id }).await {
            Ok(b) => set_booking.set(Some(b)),
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
    });

    let can_cancel = move || {
        permission_set.with(|p| p.has_feature_permission(BOOKING_CANCEL))
            && booking.with(|b| b.as_ref().is_some_and(|b| b.status.is_cancellable()))
    };

    let on_cancel = move |_: leptos::ev::MouseEvent| {
        if cancelling.get_untracked() {
            return;
        }
        cancelling.set(true);
        let api = auth.api();
        let req = CancelBookingRequest {
            booking_id,
            reason: Some(reason.get_untracked().trim().to_string()).filter(|r| !r.is_empty()),
        };
        spawn_local(async move {
            match api.send(&req).await {
                Ok(updated) => {
                    set_booking.set(Some(updated));
                    confirming.set(false);
                    set_notification.set(Some(("Booking cancelled".to_string(), false)));
                }
                Err(e) => {
                    set_notification.set(Some((e.user_message(), true)));
                }
            }
            cancelling.set(false);
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <div class="space-y-4">
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || {
                        let is_err = notification.get().is_some_and(|(_, e)| e);
                        if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                    }>
                        <span>{move || notification.get().map(|(m, _)| m).unwrap_or_default()}</span>
                    </div>
                </div>
            </Show>

            <button class="btn btn-ghost btn-sm gap-1" on:click=move |_| router.navigate_to(AppRoute::Bookings)>
                <ChevronLeft attr:class="h-4 w-4" /> "All bookings"
            </button>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || booking.get().map(|b| view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-start justify-between gap-4">
                            <div>
                                <h1 class="card-title text-2xl">{b.service_name.clone()}</h1>
                                <p class="font-mono text-sm text-base-content/60">{b.reference()}</p>
                            </div>
                            <span class=status_badge(b.status)>{b.status.label()}</span>
                        </div>
                        <table class="table mt-2">
                            <tbody>
                                <tr>
                                    <th class="w-40 font-normal text-base-content/60">"Time"</th>
                                    <td>{b.booking_time.format("%A, %d/%m/%Y %H:%M").to_string()}</td>
                                </tr>
                                <tr>
                                    <th class="font-normal text-base-content/60">"Address"</th>
                                    <td>{b.address.clone()}</td>
                                </tr>
                                <tr>
                                    <th class="font-normal text-base-content/60">"Housekeeper"</th>
                                    <td>{b.employee_name.clone().unwrap_or_else(|| "Not assigned yet".to_string())}</td>
                                </tr>
                                <tr>
                                    <th class="font-normal text-base-content/60">"Total"</th>
                                    <td class="font-semibold">{format_price(b.total_amount)}</td>
                                </tr>
                                {b.note.clone().map(|note| view! {
                                    <tr>
                                        <th class="font-normal text-base-content/60">"Note"</th>
                                        <td>{note}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                </div>
            })}

            <Show when=can_cancel>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <Show
                            when=move || confirming.get()
                            fallback=move || view! {
                                <div class="flex justify-end">
                                    <button class="btn btn-outline btn-error" on:click=move |_| confirming.set(true)>
                                        "Cancel booking"
                                    </button>
                                </div>
                            }
                        >
                            <div class="form-control">
                                <label class="label" for="cancel-reason">
                                    <span class="label-text">"Reason (optional)"</span>
                                </label>
                                <textarea
                                    id="cancel-reason"
                                    class="textarea textarea-bordered"
                                    prop:value=reason
                                    on:input=move |ev| reason.set(event_target_value(&ev))
                                ></textarea>
                            </div>
                            <div class="card-actions justify-end mt-2">
                                <button class="btn btn-ghost" on:click=move |_| confirming.set(false)>"Keep booking"</button>
                                <button class="btn btn-error" disabled=move || cancelling.get() on:click=on_cancel>
                                    <Show when=move || cancelling.get()>
                                        <span class="loading loading-spinner loading-sm"></span>
                                    </Show>
                                    "Confirm cancellation"
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}
