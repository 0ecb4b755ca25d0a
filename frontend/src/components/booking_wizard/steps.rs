//! 向导各步骤的表单渲染

use chrono::{NaiveDate, NaiveTime};
use housekeeper_shared::catalog::{Service, format_price};
use housekeeper_shared::wizard::{BookingDraft, NOTE_MAX_LEN, WizardStep, time_slots};
use leptos::prelude::*;

use super::form_state::{WizardState, today};
use crate::components::login::FieldHint;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 第一步：选择服务
#[component]
pub fn ServiceStep(state: WizardState, services: ReadSignal<Vec<Service>>) -> impl IntoView {
    let selected = move || state.draft(|d| d.service_id);

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
            <For
                each=move || services.get()
                key=|s| s.service_id
                children=move |s| {
                    let id = s.service_id;
                    let name = s.name.clone();
                    let price = s.price_label();
                    view! {
                        <button
                            type="button"
                            class="card border-2 text-left transition"
                            class:border-primary=move || selected() == Some(id)
                            class:border-base-200=move || selected() != Some(id)
                            on:click=move |_| state.select_service(&s)
                        >
                            <div class="card-body p-4">
                                <div class="font-semibold">{name}</div>
                                <div class="text-primary">{price}</div>
                            </div>
                        </button>
                    }
                }
            />
        </div>
        <FieldHint message=state.error("service") />
    }
}

/// 第二步：日期与开始时间
#[component]
pub fn ScheduleStep(state: WizardState) -> impl IntoView {
    let date_value = move || {
        state
            .draft(|d| d.date)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    let selected_time = move || state.draft(|d| d.start_time);

    let on_date = move |ev: leptos::ev::Event| {
        let date = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT).ok();
        state.edit("date", |d| d.date = date);
    };

    view! {
        <div class="form-control max-w-xs">
            <label class="label" for="booking-date">
                <span class="label-text">"Date"</span>
            </label>
            <input
                id="booking-date"
                type="date"
                class="input input-bordered"
                min=today().format(DATE_FORMAT).to_string()
                prop:value=date_value
                on:change=on_date
            />
            <FieldHint message=state.error("date") />
        </div>

        <div class="form-control">
            <label class="label">
                <span class="label-text">"Start time"</span>
            </label>
            <div class="grid grid-cols-4 md:grid-cols-7 gap-2">
                {time_slots()
                    .into_iter()
                    .map(|slot: NaiveTime| {
                        view! {
                            <button
                                type="button"
                                class="btn btn-sm"
                                class:btn-primary=move || selected_time() == Some(slot)
                                class:btn-outline=move || selected_time() != Some(slot)
                                on:click=move |_| state.edit("time", |d| d.start_time = Some(slot))
                            >
                                {slot.format("%H:%M").to_string()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <FieldHint message=state.error("time") />
        </div>
    }
}

/// 第三步：地址、联系电话与备注
#[component]
pub fn AddressStep(state: WizardState) -> impl IntoView {
    let note_len = move || state.draft(|d| d.note.chars().count());

    view! {
        <div class="form-control">
            <label class="label" for="address">
                <span class="label-text">"Address"</span>
            </label>
            <input
                id="address"
                type="text"
                class="input input-bordered"
                placeholder="Street, ward, district"
                prop:value=move || state.draft(|d| d.address.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.edit("address", |d| d.address = value);
                }
            />
            <FieldHint message=state.error("address") />
        </div>
        <div class="form-control">
            <label class="label" for="contact-phone">
                <span class="label-text">"Contact phone"</span>
            </label>
            <input
                id="contact-phone"
                type="tel"
                class="input input-bordered"
                prop:value=move || state.draft(|d| d.contact_phone.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.edit("contactPhone", |d| d.contact_phone = value);
                }
            />
            <FieldHint message=state.error("contactPhone") />
        </div>
        <div class="form-control">
            <label class="label" for="note">
                <span class="label-text">"Note for the housekeeper"</span>
                <span class="label-text-alt">{move || format!("{}/{}", note_len(), NOTE_MAX_LEN)}</span>
            </label>
            <textarea
                id="note"
                class="textarea textarea-bordered h-24"
                prop:value=move || state.draft(|d| d.note.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.edit("note", |d| d.note = value);
                }
            ></textarea>
            <FieldHint message=state.error("note") />
        </div>
    }
}

/// 第四步：确认；点击各行可跳回对应步骤修改
#[component]
pub fn ReviewStep(state: WizardState) -> impl IntoView {
    let row = move |label: &'static str, step: WizardStep, value: Signal<String>| {
        view! {
            <tr class="hover cursor-pointer" on:click=move |_| state.jump_to(step)>
                <th class="w-40 font-normal text-base-content/60">{label}</th>
                <td>{move || value.get()}</td>
                <td class="text-right"><span class="link link-primary text-sm">"Edit"</span></td>
            </tr>
        }
    };
    let text = move |f: fn(&BookingDraft) -> String| {
        Signal::derive(move || state.draft(f))
    };

    view! {
        <table class="table">
            <tbody>
                {row("Service", WizardStep::Service, text(|d| d.service_name.clone()))}
                {row("Price", WizardStep::Service, text(|d| format_price(d.base_price)))}
                {row(
                    "Date",
                    WizardStep::Schedule,
                    text(|d| d.date.map(|d| d.format("%A, %d/%m/%Y").to_string()).unwrap_or_default()),
                )}
                {row(
                    "Start time",
                    WizardStep::Schedule,
                    text(|d| d.start_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()),
                )}
                {row("Address", WizardStep::Address, text(|d| d.address.clone()))}
                {row("Contact phone", WizardStep::Address, text(|d| d.contact_phone.clone()))}
                {row("Note", WizardStep::Address, text(|d| d.note.clone()))}
            </tbody>
        </table>
    }
}
