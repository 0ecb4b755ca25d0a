//! 员工排班：按日期范围查看，并推进工作状态

use chrono::{Days, NaiveDate};
use housekeeper_shared::schedule::{
    ListSchedulesRequest, Schedule, ScheduleStatus, UpdateScheduleStatusRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::*;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// 默认显示的天数（含今天）
const DEFAULT_RANGE_DAYS: u64 = 7;

fn next_action(status: ScheduleStatus) -> Option<(&'static str, ScheduleStatus)> {
    match status.next()? {
        ScheduleStatus::InProgress => Some(("Start job", ScheduleStatus::InProgress)),
        ScheduleStatus::Completed => Some(("Mark completed", ScheduleStatus::Completed)),
        _ => None,
    }
}

fn status_badge(status: ScheduleStatus) -> &'static str {
    match status {
        ScheduleStatus::Assigned => "badge badge-info",
        ScheduleStatus::InProgress => "badge badge-primary",
        ScheduleStatus::Completed => "badge badge-success",
        ScheduleStatus::Cancelled => "badge badge-ghost",
    }
}

#[component]
pub fn SchedulesPage() -> impl IntoView {
    let auth = use_auth();

    let today = chrono::Local::now().date_naive();
    let from = RwSignal::new(today);
    let to = RwSignal::new(
        today
            .checked_add_days(Days::new(DEFAULT_RANGE_DAYS - 1))
            .unwrap_or(today),
    );

    let (schedules, set_schedules) = signal(Vec::<Schedule>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let updating = RwSignal::new(Option::<i64>::None);

    let load_schedules = move || {
        let (start, end) = (from.get_untracked(), to.get_untracked());
        if end < start {
            set_error_msg.set(Some("The end date must not be before the start date".to_string()));
            return;
        }
        let api = auth.api();
        let req = ListSchedulesRequest {
            from: Some(start),
            to: Some(end),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&req).await {
                Ok(mut list) => {
                    list.sort_by_key(|s| s.start_time);
                    set_schedules.set(list);
                    set_error_msg.set(None);
                }
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        from.track();
        to.track();
        load_schedules();
    });

    let advance = move |schedule_id: i64, status: ScheduleStatus| {
        if updating.get_untracked().is_some() {
            return;
        }
        updating.set(Some(schedule_id));
        let api = auth.api();
        spawn_local(async move {
            match api
                .send(&UpdateScheduleStatusRequest {
                    schedule_id,
                    status,
                })
                .await
            {
                Ok(updated) => set_schedules.update(|list| {
                    if let Some(s) = list.iter_mut().find(|s| s.schedule_id == updated.schedule_id) {
                        *s = updated;
                    }
                }),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            updating.set(None);
        });
    };

    let date_input = move |id: &'static str, label: &'static str, value: RwSignal<NaiveDate>| {
        view! {
            <label class="form-control" for=id>
                <span class="label-text text-sm">{label}</span>
                <input
                    id=id
                    type="date"
                    class="input input-bordered input-sm"
                    prop:value=move || value.get().format(DATE_FORMAT).to_string()
                    on:change=move |ev| {
                        if let Ok(date) = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT) {
                            value.set(date);
                        }
                    }
                />
            </label>
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-end justify-between gap-4">
                <h1 class="text-2xl font-bold">"My schedule"</h1>
                <div class="flex items-end gap-2">
                    {date_input("from", "From", from)}
                    {date_input("to", "To", to)}
                    <button on:click=move |_| load_schedules() disabled=move || loading.get() class="btn btn-ghost btn-sm btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || schedules.with(|s| s.is_empty()) && !loading.get()>
                <p class="text-center py-12 text-base-content/50">"No jobs in this period."</p>
            </Show>

            <div class="space-y-3">
                <For
                    each=move || schedules.get()
                    key=|s| (s.schedule_id, s.status)
                    children=move |s| {
                        let id = s.schedule_id;
                        let action = next_action(s.status);
                        let time = match s.end_time {
                            Some(end) => format!(
                                "{} - {}",
                                s.start_time.format("%a %d/%m %H:%M"),
                                end.format("%H:%M")
                            ),
                            None => s.start_time.format("%a %d/%m %H:%M").to_string(),
                        };
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body p-5 md:flex-row md:items-center md:justify-between gap-4">
                                    <div class="space-y-1">
                                        <div class="flex items-center gap-2">
                                            <span class="font-semibold">{s.service_name.clone()}</span>
                                            <span class=status_badge(s.status)>{s.status.label()}</span>
                                        </div>
                                        <div class="text-sm flex items-center gap-1">
                                            <Clock attr:class="h-4 w-4" /> {time}
                                        </div>
                                        <div class="text-sm flex items-center gap-1 text-base-content/70">
                                            <MapPin attr:class="h-4 w-4" /> {s.address.clone()}
                                        </div>
                                        <div class="text-sm text-base-content/70">
                                            "Customer: " {s.customer_name.clone()}
                                        </div>
                                        {s.note.clone().map(|note| view! {
                                            <div class="text-sm italic text-base-content/60">{note}</div>
                                        })}
                                    </div>
                                    {action.map(|(label, status)| view! {
                                        <button
                                            class="btn btn-primary btn-sm"
                                            disabled=move || updating.get().is_some()
                                            on:click=move |_| advance(id, status)
                                        >
                                            <Show when=move || updating.get() == Some(id)>
                                                <span class="loading loading-spinner loading-xs"></span>
                                            </Show>
                                            {label}
                                        </button>
                                    })}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
