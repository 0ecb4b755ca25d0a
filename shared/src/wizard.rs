//! 多步骤预约向导
//!
//! 步骤顺序：选择服务 → 时间 → 地址与联系方式 → 确认。
//! 前进时只校验当前步骤，后退不校验；提交只能在确认步骤进行，并重新校验全部步骤。

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::booking::CreateBookingRequest;
use crate::catalog::Service;
use crate::validation::{FieldError, Validator};

/// 最早与最晚可预约的开始时间
pub const FIRST_SLOT_HOUR: u32 = 8;
pub const LAST_SLOT_HOUR: u32 = 18;
pub const NOTE_MAX_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Service,
    Schedule,
    Address,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Service,
        WizardStep::Schedule,
        WizardStep::Address,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Service => 0,
            WizardStep::Schedule => 1,
            WizardStep::Address => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Service => "Service",
            WizardStep::Schedule => "Date & time",
            WizardStep::Address => "Address",
            WizardStep::Review => "Review",
        }
    }

    fn next(&self) -> Option<WizardStep> {
        WizardStep::ALL.get(self.index() + 1).copied()
    }

    fn prev(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| WizardStep::ALL[i])
    }
}

/// 向导收集的字段
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDraft {
    pub service_id: Option<i64>,
    pub service_name: String,
    pub base_price: i64,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub address: String,
    pub contact_phone: String,
    pub note: String,
}

impl BookingDraft {
    pub fn select_service(&mut self, service: &Service) {
        self.service_id = Some(service.service_id);
        self.service_name = service.name.clone();
        self.base_price = service.base_price;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从服务详情页进入时，服务已选定
    pub fn with_service(service: &Service) -> Self {
        let mut wizard = Self::new();
        wizard.draft.select_service(service);
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// 校验当前步骤，通过后前进一步
    pub fn advance(&mut self, today: NaiveDate) -> Result<WizardStep, Vec<FieldError>> {
        validate_step(&self.draft, self.step, today)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// 只允许跳回已经走过的步骤
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        if step <= self.step {
            self.step = step;
            true
        } else {
            false
        }
    }

    pub fn to_request(&self, today: NaiveDate) -> Result<CreateBookingRequest, Vec<FieldError>> {
        if self.step != WizardStep::Review {
            return Err(vec![FieldError::new("step", "Finish all steps before confirming")]);
        }

        let mut errors = Vec::new();
        for step in [WizardStep::Service, WizardStep::Schedule, WizardStep::Address] {
            if let Err(mut e) = validate_step(&self.draft, step, today) {
                errors.append(&mut e);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let d = &self.draft;
        match (d.service_id, d.date, d.start_time) {
            (Some(service_id), Some(booking_date), Some(start_time)) => Ok(CreateBookingRequest {
                service_id,
                booking_date,
                start_time,
                address: d.address.trim().to_string(),
                contact_phone: d.contact_phone.trim().to_string(),
                note: Some(d.note.trim().to_string()).filter(|n| !n.is_empty()),
            }),
            _ => Err(vec![FieldError::new("step", "Booking is incomplete")]),
        }
    }
}

/// 可选的开始时间（每半小时一档）
pub fn time_slots() -> Vec<NaiveTime> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .flat_map(|h| [0, 30].into_iter().map(move |m| (h, m)))
        .filter(|&(h, m)| h < LAST_SLOT_HOUR || m == 0)
        .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .collect()
}

fn is_valid_slot(time: NaiveTime) -> bool {
    time.second() == 0 && time_slots().contains(&time)
}

pub fn validate_step(
    draft: &BookingDraft,
    step: WizardStep,
    today: NaiveDate,
) -> Result<(), Vec<FieldError>> {
    let mut v = Validator::new();
    match step {
        WizardStep::Service => {
            if draft.service_id.is_none() {
                v.push("service", "Choose a service");
            }
        }
        WizardStep::Schedule => {
            match draft.date {
                None => v.push("date", "Choose a date"),
                Some(date) if date < today => v.push("date", "Date cannot be in the past"),
                Some(_) => {}
            }
            match draft.start_time {
                None => v.push("time", "Choose a start time"),
                Some(time) if !is_valid_slot(time) => v.push(
                    "time",
                    format!(
                        "Start between {:02}:00 and {:02}:00 on the hour or half hour",
                        FIRST_SLOT_HOUR, LAST_SLOT_HOUR
                    ),
                ),
                Some(_) => {}
            }
        }
        WizardStep::Address => {
            v.required("address", &draft.address)
                .phone("contactPhone", &draft.contact_phone);
            if draft.note.chars().count() > NOTE_MAX_LEN {
                v.push("note", format!("Keep the note under {} characters", NOTE_MAX_LEN));
            }
        }
        WizardStep::Review => {}
    }
    v.finish()
}

#[cfg(test)]
mod tests;
